//! Drawing backends
//!
//! Layers draw through [`DrawSurface`] so the same render pass feeds the
//! egui painter and the headless SVG export.
pub mod surface;
pub mod svg;

pub use surface::DrawSurface;
pub use svg::{render_legend_svg, SvgSurface};
