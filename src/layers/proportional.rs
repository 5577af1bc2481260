//! Proportional symbol layer
//!
//! One circle marker per record. The marker area tracks the record's value
//! for the active attribute; its popup names the record and quotes the value.
//! Markers never read the active attribute from shared state: every update
//! arrives as a [`MarkerUpdate`] computed for an explicit key.

use crate::{
    core::{
        config::MapConfig,
        geo::Point,
        viewport::Viewport,
    },
    data::{
        attributes::AttributeKey,
        record::{Record, RecordSet},
    },
    layers::{
        base::LayerProperties,
        popup::{Popup, PopupContent},
        style::MarkerStyle,
    },
    rendering::surface::DrawSurface,
    spatial::index::{SpatialIndex, SpatialItem},
    symbology::radius::RadiusScale,
};
use serde::{Deserialize, Serialize};

/// New display state for one record's marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerUpdate {
    pub record: usize,
    /// `None` when the value cannot be drawn; the marker is hidden
    pub radius: Option<f64>,
    pub popup: PopupContent,
}

impl MarkerUpdate {
    /// Update for `record` at `key`, `None` if the record lacks the key
    pub fn for_record(
        record: &Record,
        key: &AttributeKey,
        scale: &RadiusScale,
        config: &MapConfig,
    ) -> Option<Self> {
        let value = record.value(key)?;
        let radius = match scale.checked_radius(value) {
            Ok(radius) => Some(radius),
            Err(e) => {
                log::warn!("{} at {}: {}", record.display_name(), key, e);
                None
            }
        };

        Some(Self {
            record: record.index,
            radius,
            popup: PopupContent::for_record(record, key, config),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircleMarker {
    /// Index of the record this marker draws
    pub id: usize,
    pub position: crate::core::geo::LatLng,
    pub radius: f64,
    pub visible: bool,
    pub highlighted: bool,
    pub popup: Popup,
}

impl CircleMarker {
    fn apply(&mut self, update: &MarkerUpdate) {
        match update.radius {
            Some(radius) => {
                self.radius = radius;
                self.visible = true;
            }
            None => {
                self.radius = 0.0;
                self.visible = false;
                self.highlighted = false;
                self.popup.hide();
            }
        }
        self.popup.rebind(update.popup.clone(), self.radius);
    }
}

pub struct ProportionalSymbolLayer {
    properties: LayerProperties,
    markers: Vec<CircleMarker>,
    base_style: MarkerStyle,
    highlight_style: MarkerStyle,
    active_key: AttributeKey,
    /// Marker anchors at zoom 0, for hit-testing
    index: SpatialIndex<()>,
}

impl ProportionalSymbolLayer {
    /// Builds one marker per record, sized for `key`
    pub fn build(
        records: &RecordSet,
        key: &AttributeKey,
        scale: &RadiusScale,
        config: &MapConfig,
    ) -> Self {
        let markers: Vec<CircleMarker> = records
            .iter()
            .map(|record| {
                let mut marker = CircleMarker {
                    id: record.index,
                    position: record.position,
                    radius: 0.0,
                    visible: false,
                    highlighted: false,
                    popup: Popup::new(
                        PopupContent::for_record(record, key, config),
                        Point::default(),
                    ),
                };
                match MarkerUpdate::for_record(record, key, scale, config) {
                    Some(update) => marker.apply(&update),
                    None => log::debug!("{} has no {}", record.display_name(), key),
                }
                marker
            })
            .collect();

        let index = SpatialIndex::bulk_load(
            markers
                .iter()
                .map(|m| SpatialItem::new(m.id, Viewport::project_at(&m.position, 0.0), ()))
                .collect(),
        );

        log::info!("built {} markers for {}", index.len(), key);
        Self {
            properties: LayerProperties::new(
                "proportional-symbols".to_string(),
                key.category().to_string(),
            ),
            markers,
            base_style: config.marker_style.clone(),
            highlight_style: config.highlight_style.clone(),
            active_key: key.clone(),
            index,
        }
    }

    pub fn properties(&self) -> &LayerProperties {
        &self.properties
    }

    pub fn active_key(&self) -> &AttributeKey {
        &self.active_key
    }

    pub fn markers(&self) -> &[CircleMarker] {
        &self.markers
    }

    pub fn marker(&self, id: usize) -> Option<&CircleMarker> {
        self.markers.get(id)
    }

    /// Applies updates computed for `key`; markers without an update stay as they are
    pub fn apply(&mut self, key: &AttributeKey, updates: &[MarkerUpdate]) {
        for update in updates {
            if let Some(marker) = self.markers.get_mut(update.record) {
                marker.apply(update);
            }
        }
        self.active_key = key.clone();
    }

    pub fn style_of(&self, marker: &CircleMarker) -> &MarkerStyle {
        if marker.highlighted {
            &self.highlight_style
        } else {
            &self.base_style
        }
    }

    /// Highlights the marker and opens its popup; false if nothing changed
    pub fn pointer_enter(&mut self, id: usize) -> bool {
        match self.markers.get_mut(id) {
            Some(marker) if marker.visible && !marker.highlighted => {
                marker.highlighted = true;
                marker.popup.show();
                true
            }
            _ => false,
        }
    }

    /// Restores the base style and closes the popup; false if nothing changed
    pub fn pointer_leave(&mut self, id: usize) -> bool {
        match self.markers.get_mut(id) {
            Some(marker) if marker.highlighted => {
                marker.highlighted = false;
                marker.popup.hide();
                true
            }
            _ => false,
        }
    }

    pub fn highlighted(&self) -> Option<&CircleMarker> {
        self.markers.iter().find(|m| m.highlighted)
    }

    /// Topmost visible marker under a container pixel
    pub fn hit_test(&self, viewport: &Viewport, pixel: &Point) -> Option<usize> {
        if !self.properties.visible || !self.properties.interactive {
            return None;
        }

        let max_radius = self
            .markers
            .iter()
            .filter(|m| m.visible)
            .map(|m| m.radius)
            .fold(0.0_f64, f64::max);
        let world = viewport.pixel_to_world(pixel);

        self.index
            .query_radius(&world, max_radius / viewport.scale())
            .into_iter()
            .filter_map(|item| self.markers.get(item.id))
            .filter(|m| m.visible)
            .filter(|m| viewport.lat_lng_to_pixel(&m.position).distance_to(pixel) <= m.radius)
            .map(|m| m.id)
            .max()
    }

    /// Draws visible markers in record order, then the open popup on top
    pub fn render(&self, surface: &mut dyn DrawSurface, viewport: &Viewport) {
        if !self.properties.visible {
            return;
        }

        for marker in self.markers.iter().filter(|m| m.visible) {
            let center = viewport.lat_lng_to_pixel(&marker.position);
            surface.circle(center, marker.radius, self.style_of(marker));
        }

        for marker in self.markers.iter().filter(|m| m.popup.visible) {
            let anchor = viewport
                .lat_lng_to_pixel(&marker.position)
                .add(&marker.popup.offset);
            surface.popup(anchor, &marker.popup.content);
        }
    }
}
