use crate::{
    core::{
        config::MapConfig,
        geo::Point,
        viewport::Viewport,
    },
    data::{attributes::AttributeKey, loader::Dataset},
    input::events::{InputEvent, MapEvent},
    layers::proportional::ProportionalSymbolLayer,
    legend::view::LegendView,
    rendering::{surface::DrawSurface, svg::SvgSurface},
    sequence::{
        controller::{SequenceController, ViewUpdate},
        state::{SelectionState, Transition},
    },
    symbology::radius::RadiusScale,
    Result,
};

/// Margin between the legend and the map corner in exported frames
const LEGEND_MARGIN: f64 = 10.0;

/// What the map area shows
pub enum ViewState {
    Loading,
    Ready(Box<Map>),
    /// Load failed; the message is shown instead of a blank view
    Failed(String),
}

impl ViewState {
    /// Ready map for a loaded dataset, or the error that stopped it
    pub fn from_load(result: Result<Dataset>, config: MapConfig, size: Point) -> Self {
        match result.and_then(|dataset| Map::new(dataset, config, size)) {
            Ok(map) => ViewState::Ready(Box::new(map)),
            Err(e) => {
                log::error!("map unavailable: {}", e);
                ViewState::Failed(e.to_string())
            }
        }
    }

    pub fn map(&self) -> Option<&Map> {
        match self {
            ViewState::Ready(map) => Some(&**map),
            _ => None,
        }
    }

    pub fn map_mut(&mut self) -> Option<&mut Map> {
        match self {
            ViewState::Ready(map) => Some(&mut **map),
            _ => None,
        }
    }

    pub fn render(&self, surface: &mut dyn DrawSurface) {
        match self {
            ViewState::Loading => surface.message("Loading data…"),
            ViewState::Ready(map) => map.render(surface),
            ViewState::Failed(message) => {
                surface.message(&format!("Could not load data: {message}"))
            }
        }
    }
}

/// Interactive proportional symbol map over one dataset
pub struct Map {
    pub viewport: Viewport,
    config: MapConfig,
    dataset: Dataset,
    layer: ProportionalSymbolLayer,
    controller: SequenceController,
    legend: LegendView,
    hovered: Option<usize>,
    pointer: Option<Point>,
}

impl Map {
    /// Builds the layer at the first attribute and the initial view
    pub fn new(dataset: Dataset, config: MapConfig, size: Point) -> Result<Self> {
        let scale = RadiusScale::new(config.scale_factor());
        let controller = SequenceController::new(dataset.attributes.clone(), scale)?;
        let layer = ProportionalSymbolLayer::build(
            &dataset.records,
            controller.current_key(),
            &scale,
            &config,
        );
        let legend = controller.legend(&dataset.records, &config);
        let viewport = Viewport::new(config.initial_center, config.initial_zoom, size);

        log::info!(
            "map ready: {} markers, {} years",
            layer.markers().len(),
            dataset.attributes.len()
        );
        Ok(Self {
            viewport,
            config,
            dataset,
            layer,
            controller,
            legend,
            hovered: None,
            pointer: None,
        })
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn layer(&self) -> &ProportionalSymbolLayer {
        &self.layer
    }

    pub fn legend(&self) -> &LegendView {
        &self.legend
    }

    pub fn selection(&self) -> SelectionState {
        self.controller.state()
    }

    pub fn current_key(&self) -> &AttributeKey {
        self.controller.current_key()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn handle_input(&mut self, input: InputEvent) -> Result<Vec<MapEvent>> {
        let mut events = Vec::new();

        if let Some(transition) = input.transition() {
            self.transition(transition, &mut events)?;
            return Ok(events);
        }

        match input {
            InputEvent::PointerMove { position } => {
                self.pointer = Some(position);
                self.refresh_hover(&mut events);
            }
            InputEvent::PointerLeave => {
                self.pointer = None;
                self.refresh_hover(&mut events);
            }
            InputEvent::Pan { delta } => {
                self.change_view(&mut events, |viewport| viewport.pan(delta));
            }
            InputEvent::Zoom { delta, focus } => {
                self.change_view(&mut events, |viewport| {
                    viewport.zoom_to(viewport.zoom + delta, focus)
                });
            }
            InputEvent::Home => self.home(&mut events),
            InputEvent::Resize { size } => {
                self.change_view(&mut events, |viewport| viewport.set_size(size));
            }
            InputEvent::Forward | InputEvent::Reverse | InputEvent::SliderInput { .. } => {}
        }

        Ok(events)
    }

    /// Draws the markers, then the open popup
    pub fn render(&self, surface: &mut dyn DrawSurface) {
        self.layer.render(surface, &self.viewport);
    }

    /// Current frame with the legend in the bottom right corner
    pub fn export_svg(&self) -> String {
        let mut surface = SvgSurface::new(self.viewport.size);
        self.render(&mut surface);

        let legend = &self.config.legend;
        let origin = Point::new(
            self.viewport.size.x - legend.width - LEGEND_MARGIN,
            self.viewport.size.y - legend.height - 24.0 - LEGEND_MARGIN,
        );
        surface.legend(&self.legend, legend, origin);
        surface.finish()
    }

    fn transition(&mut self, transition: Transition, events: &mut Vec<MapEvent>) -> Result<()> {
        let update = self
            .controller
            .dispatch(transition, &self.dataset.records, &self.config)?;
        self.apply(&update);

        if update.changed() {
            events.push(MapEvent::SelectionChanged {
                previous: update.previous.index(),
                current: update.current.index(),
                key: update.key.clone(),
            });
        }
        // radii changed, so the marker under the pointer may have too
        self.refresh_hover(events);
        Ok(())
    }

    fn apply(&mut self, update: &ViewUpdate) {
        self.layer.apply(&update.key, &update.markers);
        self.legend = update.legend.clone();
    }

    fn refresh_hover(&mut self, events: &mut Vec<MapEvent>) {
        let target = self
            .pointer
            .and_then(|pointer| self.layer.hit_test(&self.viewport, &pointer));
        if target == self.hovered {
            return;
        }

        if let Some(previous) = self.hovered.take() {
            // a marker hidden by the last update has already dropped its highlight
            self.layer.pointer_leave(previous);
            events.push(MapEvent::MarkerLeave { record: previous });
        }
        if let Some(record) = target {
            if self.layer.pointer_enter(record) {
                self.hovered = Some(record);
                events.push(MapEvent::MarkerEnter { record });
            }
        }
    }

    fn home(&mut self, events: &mut Vec<MapEvent>) {
        let center = self.config.initial_center;
        let zoom = self.config.initial_zoom;
        self.change_view(events, |viewport| viewport.set_view(center, zoom));
    }

    fn change_view<F>(&mut self, events: &mut Vec<MapEvent>, f: F)
    where
        F: FnOnce(&mut Viewport),
    {
        let before = self.viewport.clone();
        f(&mut self.viewport);
        if self.viewport != before {
            events.push(MapEvent::ViewChanged {
                center: self.viewport.center,
                zoom: self.viewport.zoom,
            });
            self.refresh_hover(events);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, rendering::surface::RecordingSurface};

    const DEPOSITS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-87.63, 41.88]},
             "properties": {"City": "Chicago", "Deposits_2010": 500, "Deposits_2011": 900}},
            {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-104.99, 39.74]},
             "properties": {"City": "Denver", "Deposits_2010": 120, "Deposits_2011": 80}}
        ]
    }"#;

    fn map() -> Map {
        let config = MapConfig::default();
        let dataset = Dataset::from_geojson_str(DEPOSITS, &config).unwrap();
        Map::new(dataset, config, Point::new(800.0, 600.0)).unwrap()
    }

    fn chicago_pixel(map: &Map) -> Point {
        map.viewport.lat_lng_to_pixel(&LatLng::new(41.88, -87.63))
    }

    #[test]
    fn test_initial_view() {
        let map = map();
        assert_eq!(map.viewport.center, LatLng::new(40.0, -98.5));
        assert_eq!(map.viewport.zoom, 4.0);
        assert_eq!(map.selection().index(), 0);
        assert_eq!(map.legend().title, "Deposits in 2010");
    }

    #[test]
    fn test_forward_emits_selection_changed() {
        let mut map = map();
        let events = map.handle_input(InputEvent::Forward).unwrap();
        assert_eq!(
            events,
            vec![MapEvent::SelectionChanged {
                previous: 0,
                current: 1,
                key: AttributeKey::new("Deposits_2011"),
            }]
        );
        assert_eq!(map.legend().title, "Deposits in 2011");
        assert_eq!(
            map.layer().marker(0).unwrap().radius,
            RadiusScale::new(5.0).radius(900.0)
        );
    }

    #[test]
    fn test_slider_to_current_index_emits_nothing() {
        let mut map = map();
        assert!(map.handle_input(InputEvent::SliderInput { index: 0 }).unwrap().is_empty());
    }

    #[test]
    fn test_hover_enter_and_leave() {
        let mut map = map();
        let chicago = chicago_pixel(&map);

        let events = map.handle_input(InputEvent::PointerMove { position: chicago }).unwrap();
        assert_eq!(events, vec![MapEvent::MarkerEnter { record: 0 }]);
        assert_eq!(map.hovered(), Some(0));

        let events = map.handle_input(InputEvent::PointerLeave).unwrap();
        assert_eq!(events, vec![MapEvent::MarkerLeave { record: 0 }]);
        assert_eq!(map.hovered(), None);
    }

    #[test]
    fn test_open_popup_follows_year() {
        let mut map = map();
        let chicago = chicago_pixel(&map);
        map.handle_input(InputEvent::PointerMove { position: chicago }).unwrap();
        map.handle_input(InputEvent::Forward).unwrap();

        let marker = map.layer().marker(0).unwrap();
        assert!(marker.popup.visible);
        assert_eq!(
            marker.popup.content.lines[1],
            "Number of deposits in 2011: 900 thousand"
        );
        assert_eq!(marker.popup.offset, Point::new(0.0, -marker.radius));
    }

    #[test]
    fn test_hovered_marker_hidden_by_year_change_is_left() {
        let config = MapConfig::default();
        let dataset = Dataset::from_geojson_str(
            r#"{"type": "FeatureCollection", "features": [
                {"type": "Feature", "geometry": {"type": "Point", "coordinates": [-87.63, 41.88]},
                 "properties": {"City": "Chicago", "Deposits_2010": 500, "Deposits_2011": "n/a"}}
            ]}"#,
            &config,
        )
        .unwrap();
        let mut map = Map::new(dataset, config, Point::new(800.0, 600.0)).unwrap();
        let chicago = chicago_pixel(&map);
        map.handle_input(InputEvent::PointerMove { position: chicago }).unwrap();

        let events = map.handle_input(InputEvent::Forward).unwrap();
        assert_eq!(events[1], MapEvent::MarkerLeave { record: 0 });
        assert_eq!(map.hovered(), None);
        let marker = map.layer().marker(0).unwrap();
        assert!(!marker.visible && !marker.highlighted && !marker.popup.visible);
    }

    #[test]
    fn test_home_restores_view() {
        let mut map = map();
        map.handle_input(InputEvent::Pan { delta: Point::new(120.0, -40.0) }).unwrap();
        map.handle_input(InputEvent::Zoom { delta: 2.0, focus: None }).unwrap();
        assert_ne!(map.viewport.zoom, 4.0);

        let events = map.handle_input(InputEvent::Home).unwrap();
        assert!(matches!(events[0], MapEvent::ViewChanged { zoom, .. } if zoom == 4.0));
        assert_eq!(map.viewport.center, LatLng::new(40.0, -98.5));
        assert!(map.handle_input(InputEvent::Home).unwrap().is_empty());
    }

    #[test]
    fn test_render_draws_popup_last() {
        let mut map = map();
        let chicago = chicago_pixel(&map);
        map.handle_input(InputEvent::PointerMove { position: chicago }).unwrap();

        let mut surface = RecordingSurface::new(map.viewport.size);
        map.render(&mut surface);
        assert_eq!(surface.circles.len(), 2);
        assert_eq!(surface.popups.len(), 1);
        assert_eq!(surface.popups[0].1.lines[0], "City: Chicago");
    }

    #[test]
    fn test_failed_load_is_visible() {
        let state = ViewState::from_load(
            Dataset::from_geojson_str("{}", &MapConfig::default()),
            MapConfig::default(),
            Point::new(800.0, 600.0),
        );
        assert!(matches!(state, ViewState::Failed(_)));

        let mut surface = RecordingSurface::new(Point::new(800.0, 600.0));
        state.render(&mut surface);
        assert!(surface.messages[0].starts_with("Could not load data"));
    }

    #[test]
    fn test_export_svg_contains_legend() {
        let svg = map().export_svg();
        assert!(svg.contains("Deposits in 2010"));
        assert_eq!(svg.matches("<circle").count(), 5);
    }
}
