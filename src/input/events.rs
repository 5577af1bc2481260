use crate::{
    core::geo::{LatLng, Point},
    data::attributes::AttributeKey,
    sequence::state::Transition,
};
use serde::{Deserialize, Serialize};

/// Input events the map responds to, in container pixel coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// Step to the next year
    Forward,
    /// Step to the previous year
    Reverse,
    /// Slider moved to an absolute index
    SliderInput { index: usize },
    /// Pointer moved over the map
    PointerMove { position: Point },
    /// Pointer left the map
    PointerLeave,
    /// Drag by a pixel offset
    Pan { delta: Point },
    /// Scroll wheel or pinch zoom, in zoom levels
    Zoom { delta: f64, focus: Option<Point> },
    /// Restore the initial view
    Home,
    /// Viewport/window resize
    Resize { size: Point },
}

/// Keyboard keys with a map binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    ArrowLeft,
    ArrowRight,
    Plus,
    Minus,
    Home,
}

/// Map event types that can be emitted by the map
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// The selected year changed
    SelectionChanged {
        previous: usize,
        current: usize,
        key: AttributeKey,
    },
    /// Pointer entered a marker; its popup is open
    MarkerEnter { record: usize },
    /// Pointer left a marker; its popup is closed
    MarkerLeave { record: usize },
    /// Map view has changed (center, zoom, or size)
    ViewChanged { center: LatLng, zoom: f64 },
}

impl InputEvent {
    /// Sequence transition carried by this event, if any
    pub fn transition(&self) -> Option<Transition> {
        match self {
            InputEvent::Forward => Some(Transition::Forward),
            InputEvent::Reverse => Some(Transition::Reverse),
            InputEvent::SliderInput { index } => Some(Transition::Set(*index)),
            _ => None,
        }
    }

    /// Gets the primary position associated with this event, if any
    pub fn position(&self) -> Option<Point> {
        match self {
            InputEvent::PointerMove { position } => Some(*position),
            InputEvent::Zoom { focus, .. } => *focus,
            _ => None,
        }
    }

    /// Checks if this is a mouse/pointer event
    pub fn is_pointer_event(&self) -> bool {
        matches!(
            self,
            InputEvent::PointerMove { .. }
                | InputEvent::PointerLeave
                | InputEvent::Pan { .. }
                | InputEvent::Zoom { .. }
        )
    }
}

impl From<KeyCode> for InputEvent {
    fn from(key: KeyCode) -> Self {
        match key {
            KeyCode::ArrowLeft => InputEvent::Reverse,
            KeyCode::ArrowRight => InputEvent::Forward,
            KeyCode::Plus => InputEvent::Zoom {
                delta: 1.0,
                focus: None,
            },
            KeyCode::Minus => InputEvent::Zoom {
                delta: -1.0,
                focus: None,
            },
            KeyCode::Home => InputEvent::Home,
        }
    }
}
