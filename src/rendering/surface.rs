use crate::{
    core::geo::Point,
    layers::{popup::PopupContent, style::MarkerStyle},
};

/// Target of a render pass, in container pixel coordinates
pub trait DrawSurface {
    /// Size of the drawable area
    fn size(&self) -> Point;

    fn circle(&mut self, center: Point, radius: f64, style: &MarkerStyle);

    /// Popup whose tip sits at `anchor`
    fn popup(&mut self, anchor: Point, content: &PopupContent);

    /// Centered status text, used while loading and on failure
    fn message(&mut self, text: &str);
}

/// Records draw calls; handy for assertions
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub size: Point,
    pub circles: Vec<(Point, f64, MarkerStyle)>,
    pub popups: Vec<(Point, PopupContent)>,
    pub messages: Vec<String>,
}

impl RecordingSurface {
    pub fn new(size: Point) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn size(&self) -> Point {
        self.size
    }

    fn circle(&mut self, center: Point, radius: f64, style: &MarkerStyle) {
        self.circles.push((center, radius, style.clone()));
    }

    fn popup(&mut self, anchor: Point, content: &PopupContent) {
        self.popups.push((anchor, content.clone()));
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
