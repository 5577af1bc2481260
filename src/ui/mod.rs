//! egui front end: map canvas, sequence controls, legend and help panels
pub mod controls;
pub mod help;
pub mod legend;
pub mod painter;
pub mod widget;

pub use controls::{MapControls, SequenceControls};
pub use help::{HelpPanel, WelcomeOverlay};
pub use legend::LegendPanel;
pub use painter::{EguiSurface, PopupStyle};
pub use widget::MapCanvas;
