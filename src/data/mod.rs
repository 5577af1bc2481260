pub mod attributes;
pub mod geojson;
pub mod loader;
pub mod record;

pub use attributes::{extract_attributes, AttributeKey, AttributeSequence};
pub use geojson::{GeoJson, GeoJsonFeature, GeoJsonGeometry};
pub use loader::{load_dataset, DataSource, Dataset, FileFetcher, Fetcher, HttpFetcher};
#[cfg(feature = "tokio-runtime")]
pub use loader::PendingLoad;
pub use record::{Record, RecordSet};
