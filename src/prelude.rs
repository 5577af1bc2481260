//! Prelude module for common propmap types
//!
//! `use propmap::prelude::*;` brings in what an application needs to load a
//! dataset, drive the map and draw it.

pub use crate::core::{
    config::{LegendConfig, MapConfig, SymbolScale},
    geo::{LatLng, Point},
    map::{Map, ViewState},
    viewport::Viewport,
};

pub use crate::data::{
    attributes::{extract_attributes, AttributeKey, AttributeSequence},
    loader::{load_dataset, DataSource, Dataset, Fetcher},
    record::{Record, RecordSet},
};

#[cfg(feature = "tokio-runtime")]
pub use crate::data::loader::PendingLoad;

pub use crate::input::events::{InputEvent, KeyCode, MapEvent};

pub use crate::layers::{
    popup::PopupContent,
    proportional::{CircleMarker, MarkerUpdate, ProportionalSymbolLayer},
    style::{MarkerStyle, SerializableColor},
};

pub use crate::legend::{
    summary::{summarize, Summary},
    view::{LegendKind, LegendView},
};

pub use crate::rendering::{render_legend_svg, DrawSurface, SvgSurface};

pub use crate::sequence::{
    controller::{plan, SequenceController, ViewUpdate},
    state::{SelectionState, Transition},
};

pub use crate::symbology::radius::RadiusScale;

pub use crate::{MapError, Result};
