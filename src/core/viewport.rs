use crate::core::{
    constants::TILE_SIZE,
    geo::{LatLng, Point},
};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Web Mercator projection constants
const EARTH_RADIUS: f64 = 6378137.0;
const MAX_LATITUDE: f64 = 85.0511287798;

/// Manages the current view of the map: center, zoom, and screen dimensions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    /// Creates a new viewport
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            center,
            zoom: zoom.clamp(0.0, 18.0),
            size,
            min_zoom: 0.0,
            max_zoom: 18.0,
        }
    }

    /// Sets center and zoom in one step
    pub fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = LatLng::new(center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE), center.lng);
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the viewport size
    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Gets the scale factor for the current zoom level
    pub fn scale(&self) -> f64 {
        2_f64.powf(self.zoom)
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom, defaulting to the current one
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        Self::project_at(lat_lng, zoom.unwrap_or(self.zoom))
    }

    /// Web Mercator (EPSG:3857) projection to world pixels at `zoom`
    pub fn project_at(lat_lng: &LatLng, zoom: f64) -> Point {
        let scale = TILE_SIZE * 2_f64.powf(zoom);
        let lat = lat_lng.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);

        let x = lat_lng.lng.to_radians() * EARTH_RADIUS;
        let y = (PI / 4.0 + lat.to_radians() / 2.0).tan().ln() * EARTH_RADIUS;

        let world = 2.0 * PI * EARTH_RADIUS;
        Point::new(
            (x + PI * EARTH_RADIUS) / world * scale,
            (-y + PI * EARTH_RADIUS) / world * scale,
        )
    }

    /// Unprojects world pixel coordinates back to LatLng at the given zoom level
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let scale = TILE_SIZE * 2_f64.powf(zoom.unwrap_or(self.zoom));
        let world = 2.0 * PI * EARTH_RADIUS;

        let x = (pixel.x / scale) * world - PI * EARTH_RADIUS;
        let y = PI * EARTH_RADIUS - (pixel.y / scale) * world;

        let lng = (x / EARTH_RADIUS).to_degrees();
        let lat = (2.0 * (y / EARTH_RADIUS).exp().atan() - PI / 2.0).to_degrees();
        LatLng::new(lat, lng)
    }

    /// Converts a geographical coordinate to container pixel coordinates
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let origin = self.project(&self.center, None);
        let projected = self.project(lat_lng, None);
        Point::new(
            projected.x - origin.x + self.size.x / 2.0,
            projected.y - origin.y + self.size.y / 2.0,
        )
    }

    /// Converts container pixel coordinates back to geographical coordinates
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let origin = self.project(&self.center, None);
        let projected = Point::new(
            pixel.x - self.size.x / 2.0 + origin.x,
            pixel.y - self.size.y / 2.0 + origin.y,
        );
        self.unproject(&projected, None)
    }

    /// Converts a container pixel to world pixels at zoom 0
    pub fn pixel_to_world(&self, pixel: &Point) -> Point {
        let origin = self.project(&self.center, None);
        Point::new(
            pixel.x - self.size.x / 2.0 + origin.x,
            pixel.y - self.size.y / 2.0 + origin.y,
        )
        .multiply(1.0 / self.scale())
    }

    /// Pans the viewport by the given pixel offset
    pub fn pan(&mut self, delta: Point) {
        let center_pixel = Point::new(self.size.x / 2.0, self.size.y / 2.0);
        let new_center = self.pixel_to_lat_lng(&center_pixel.subtract(&delta));
        self.set_view(new_center, self.zoom);
    }

    /// Zooms the viewport, keeping the geographic point under `focus` fixed
    pub fn zoom_to(&mut self, zoom: f64, focus: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < 0.001 {
            return;
        }

        match focus {
            Some(focus) => {
                let focus_lat_lng = self.pixel_to_lat_lng(&focus);
                self.zoom = new_zoom;
                let focus_world = self.project(&focus_lat_lng, None);
                let offset = Point::new(focus.x - self.size.x / 2.0, focus.y - self.size.y / 2.0);
                let center = self.unproject(&focus_world.subtract(&offset), None);
                self.set_view(center, new_zoom);
            }
            None => self.zoom = new_zoom,
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(LatLng::new(40.0, -98.5), 4.0, Point::new(800.0, 600.0))
    }

    #[test]
    fn test_center_projects_to_container_center() {
        let vp = viewport();
        let pixel = vp.lat_lng_to_pixel(&vp.center);
        assert!((pixel.x - 400.0).abs() < 1e-6);
        assert!((pixel.y - 300.0).abs() < 1e-6);
    }

    #[test]
    fn test_pixel_round_trip() {
        let vp = viewport();
        let chicago = LatLng::new(41.8781, -87.6298);
        let back = vp.pixel_to_lat_lng(&vp.lat_lng_to_pixel(&chicago));
        assert!((back.lat - chicago.lat).abs() < 1e-6);
        assert!((back.lng - chicago.lng).abs() < 1e-6);
    }

    #[test]
    fn test_east_is_right_and_north_is_up() {
        let vp = viewport();
        let east = vp.lat_lng_to_pixel(&LatLng::new(40.0, -90.0));
        let north = vp.lat_lng_to_pixel(&LatLng::new(45.0, -98.5));
        assert!(east.x > 400.0);
        assert!(north.y < 300.0);
    }

    #[test]
    fn test_pan_moves_center() {
        let mut vp = viewport();
        vp.pan(Point::new(-100.0, 0.0));
        assert!(vp.center.lng > -98.5);
        assert!((vp.center.lat - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_around_focus_keeps_point_fixed() {
        let mut vp = viewport();
        let focus = Point::new(600.0, 200.0);
        let before = vp.pixel_to_lat_lng(&focus);
        vp.zoom_to(6.0, Some(focus));
        let after = vp.lat_lng_to_pixel(&before);
        assert_eq!(vp.zoom, 6.0);
        assert!((after.x - focus.x).abs() < 1e-6);
        assert!((after.y - focus.y).abs() < 1e-6);
    }
}
