//! Dataset loading
//!
//! A dataset is fetched as GeoJSON text from a file, an http(s) URL or an
//! inline string, turned into records and scanned once for its attribute
//! keys. [`PendingLoad`] runs the fetch on a tokio runtime and hands the
//! result back to a polling UI thread.

use crate::{
    core::config::MapConfig,
    data::{
        attributes::{extract_attributes, AttributeSequence},
        geojson::GeoJson,
        record::RecordSet,
    },
    MapError, Result,
};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use std::{fmt, path::PathBuf, str::FromStr};

/// Shared async HTTP client
pub(crate) static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .user_agent(concat!("propmap/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(30))
        .build()
        .unwrap_or_else(|e| {
            log::warn!("falling back to default HTTP client: {}", e);
            reqwest::Client::new()
        })
});

/// Where the GeoJSON comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Url(String),
    /// GeoJSON text held in memory
    Inline(String),
}

impl FromStr for DataSource {
    type Err = MapError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MapError::Config("empty data source".to_string()));
        }
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(DataSource::Url(s.to_string()))
        } else {
            Ok(DataSource::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::File(path) => write!(f, "{}", path.display()),
            DataSource::Url(url) => f.write_str(url),
            DataSource::Inline(json) => write!(f, "<inline, {} bytes>", json.len()),
        }
    }
}

/// Fetches the raw text behind a location
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, location: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HttpFetcher;

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, location: &str) -> Result<String> {
        let response = HTTP_CLIENT.get(location).send().await?.error_for_status()?;
        let text = response.text().await?;
        log::info!("fetched {} ({} bytes)", location, text.len());
        Ok(text)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileFetcher;

#[async_trait]
impl Fetcher for FileFetcher {
    async fn fetch(&self, location: &str) -> Result<String> {
        #[cfg(feature = "tokio-runtime")]
        let text = tokio::fs::read_to_string(location).await?;
        #[cfg(not(feature = "tokio-runtime"))]
        let text = std::fs::read_to_string(location)?;

        log::info!("read {} ({} bytes)", location, text.len());
        Ok(text)
    }
}

/// Records plus the attribute keys found on the first record
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub records: RecordSet,
    pub attributes: AttributeSequence,
}

impl Dataset {
    pub fn from_geojson_str(json: &str, config: &MapConfig) -> Result<Self> {
        let geojson = GeoJson::parse(json)?;
        let records = RecordSet::from_geojson(geojson, &config.identity_field)?;
        let attributes = extract_attributes(&records, &config.attribute_marker);
        if attributes.is_empty() {
            return Err(MapError::NoAttributes(config.attribute_marker.clone()));
        }

        for (record, missing) in attributes.missing_in(&records) {
            log::warn!(
                "{} lacks {} of {} attributes: {:?}",
                record.display_name(),
                missing.len(),
                attributes.len(),
                missing.iter().map(|k| k.as_str()).collect::<Vec<_>>()
            );
        }

        log::info!(
            "loaded {} records with {} attributes",
            records.len(),
            attributes.len()
        );
        Ok(Self {
            records,
            attributes,
        })
    }
}

/// Fetches `source` with the default fetchers and builds the dataset
pub async fn load_dataset(source: &DataSource, config: &MapConfig) -> Result<Dataset> {
    match source {
        DataSource::File(path) => {
            load_with(&FileFetcher, &path.to_string_lossy(), config).await
        }
        DataSource::Url(url) => load_with(&HttpFetcher, url, config).await,
        DataSource::Inline(json) => Dataset::from_geojson_str(json, config),
    }
}

pub async fn load_with(fetcher: &dyn Fetcher, location: &str, config: &MapConfig) -> Result<Dataset> {
    log::debug!("loading dataset from {}", location);
    let text = fetcher.fetch(location).await?;
    Dataset::from_geojson_str(&text, config)
}

/// Load running in the background, polled from the UI thread
#[cfg(feature = "tokio-runtime")]
pub struct PendingLoad {
    rx: crossbeam_channel::Receiver<Result<Dataset>>,
    source: DataSource,
    finished: bool,
}

#[cfg(feature = "tokio-runtime")]
impl PendingLoad {
    /// Starts loading on `handle`; the result arrives exactly once
    pub fn spawn(handle: &tokio::runtime::Handle, source: DataSource, config: MapConfig) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let task_source = source.clone();
        handle.spawn(async move {
            let result = load_dataset(&task_source, &config).await;
            if let Err(e) = &result {
                log::warn!("loading {} failed: {}", task_source, e);
            }
            let _ = tx.send(result);
        });

        Self {
            rx,
            source,
            finished: false,
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Non-blocking; `None` while the load is still running or after the result was taken
    pub fn try_take(&mut self) -> Option<Result<Dataset>> {
        if self.finished {
            return None;
        }
        match self.rx.try_recv() {
            Ok(result) => {
                self.finished = true;
                Some(result)
            }
            Err(crossbeam_channel::TryRecvError::Empty) => None,
            Err(crossbeam_channel::TryRecvError::Disconnected) => {
                self.finished = true;
                Some(Err(MapError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "loader task ended without a result",
                ))))
            }
        }
    }

    /// Blocks until the result arrives
    pub fn wait(self) -> Result<Dataset> {
        self.rx.recv().unwrap_or_else(|_| {
            Err(MapError::Io(std::io::Error::new(
                std::io::ErrorKind::Other,
                "loader task ended without a result",
            )))
        })
    }
}
