use crate::core::geo::Point;

use rstar::{PointDistance, RTree, RTreeObject, AABB};

/// A point item that can be indexed via an R-tree
#[derive(Debug, Clone)]
pub struct SpatialItem<T> {
    pub id: usize,
    pub point: Point,
    pub data: T,
}

impl<T> SpatialItem<T> {
    pub fn new(id: usize, point: Point, data: T) -> Self {
        Self { id, point, data }
    }
}

impl<T> PartialEq for SpatialItem<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

// --- rstar integration -------------------------------------------------------------------------

impl<T> RTreeObject for SpatialItem<T> {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        AABB::from_point([self.point.x, self.point.y])
    }
}

impl<T> PointDistance for SpatialItem<T> {
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point.x - point[0];
        let dy = self.point.y - point[1];
        dx * dx + dy * dy
    }
}

/// R-tree over marker anchors in world pixel space
pub struct SpatialIndex<T> {
    rtree: RTree<SpatialItem<T>>,
}

impl<T> SpatialIndex<T> {
    pub fn bulk_load(items: Vec<SpatialItem<T>>) -> Self {
        Self {
            rtree: RTree::bulk_load(items),
        }
    }

    /// Items whose anchor lies within `radius` of `center`
    pub fn query_radius(&self, center: &Point, radius: f64) -> Vec<&SpatialItem<T>> {
        self.rtree
            .locate_within_distance([center.x, center.y], radius * radius)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rtree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.rtree.size() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_radius() {
        let index = SpatialIndex::bulk_load(vec![
            SpatialItem::new(0, Point::new(0.0, 0.0), "a"),
            SpatialItem::new(1, Point::new(3.0, 4.0), "b"),
            SpatialItem::new(2, Point::new(10.0, 10.0), "c"),
        ]);
        assert_eq!(index.len(), 3);

        let mut hits: Vec<usize> = index
            .query_radius(&Point::new(0.0, 0.0), 5.0)
            .iter()
            .map(|item| item.id)
            .collect();
        hits.sort_unstable();
        assert_eq!(hits, [0, 1]);

        assert!(index.query_radius(&Point::new(50.0, 50.0), 1.0).is_empty());
    }
}
