//! # propmap
//!
//! Proportional symbol maps driven by a time sequence.
//!
//! A GeoJSON point dataset carrying one numeric field per year is turned into
//! circle markers whose area tracks the selected year's value. A sequence
//! control steps through the years, and every step resizes the markers,
//! rewrites their popups and recomputes the legend.

pub mod core;
pub mod data;
pub mod input;
pub mod layers;
pub mod legend;
pub mod prelude;
pub mod rendering;
pub mod sequence;
pub mod spatial;
pub mod symbology;
#[cfg(feature = "egui")]
pub mod ui;

pub use crate::core::constants;

// Re-export public API
pub use crate::core::{
    config::{MapConfig, SymbolScale},
    geo::{LatLng, Point},
    map::{Map, ViewState},
    viewport::Viewport,
};

pub use data::{
    attributes::{extract_attributes, AttributeKey, AttributeSequence},
    loader::{load_dataset, DataSource, Dataset},
    record::{Record, RecordSet},
};

pub use input::events::{InputEvent, MapEvent};

pub use layers::proportional::{CircleMarker, ProportionalSymbolLayer};

pub use legend::{summary::Summary, view::LegendView};

pub use layers::{popup::PopupContent, style::MarkerStyle};

pub use sequence::{
    controller::{SequenceController, ViewUpdate},
    state::{SelectionState, Transition},
};

pub use symbology::radius::RadiusScale;

pub use rendering::{surface::DrawSurface, svg::SvgSurface};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Dataset contains no point features")]
    EmptyDataset,

    #[error("No attribute contains the marker {0:?}")]
    NoAttributes(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),
}

/// Error type alias for convenience
pub type Error = MapError;
