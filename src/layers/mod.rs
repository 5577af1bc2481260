pub mod base;
pub mod popup;
pub mod proportional;
pub mod style;

pub use base::LayerProperties;
pub use popup::{Popup, PopupContent};
pub use proportional::{CircleMarker, MarkerUpdate, ProportionalSymbolLayer};
pub use style::{MarkerStyle, SerializableColor};
