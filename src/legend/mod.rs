//! Legend: summary statistics of the active attribute and their display
pub mod summary;
pub mod view;

pub use summary::{summarize, Summary};
pub use view::{LegendEntry, LegendKind, LegendView};
