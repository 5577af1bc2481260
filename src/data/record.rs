//! Records: one geographic entity with its year-keyed values
//!
//! Records are built once from the point features of a dataset and never
//! change afterwards. Values are read through [`coerce_number`], which turns
//! whatever JSON the source holds into an `f64` the way a loosely typed
//! source expects (`"12"` is 12, `null` is 0, `"abc"` is NaN).

use crate::{
    core::geo::LatLng,
    data::{
        attributes::AttributeKey,
        geojson::{GeoJson, GeoJsonFeature, Properties},
    },
    MapError, Result,
};
use serde_json::Value;

/// Coerces a JSON value to a number
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                match trimmed {
                    "Infinity" | "+Infinity" => f64::INFINITY,
                    "-Infinity" => f64::NEG_INFINITY,
                    // Rust also accepts "inf" and "NaN", which a loose source would not
                    _ if trimmed.chars().any(|c| c.is_ascii_alphabetic() && c != 'e' && c != 'E') => {
                        f64::NAN
                    }
                    _ => trimmed.parse().unwrap_or(f64::NAN),
                }
            }
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Formats a number the way it reads in popups: integers without a fraction
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Renders a raw property value for display
pub fn format_raw(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(format_number).unwrap_or_else(|| n.to_string()),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Position of the record in the dataset
    pub index: usize,
    /// Display name taken from the identity field
    pub name: Option<String>,
    pub position: LatLng,
    properties: Properties,
}

impl Record {
    pub fn new(index: usize, name: Option<String>, position: LatLng, properties: Properties) -> Self {
        Self {
            index,
            name,
            position,
            properties,
        }
    }

    /// Builds a record from a feature; `None` unless the geometry is a Point
    pub fn from_feature(index: usize, feature: GeoJsonFeature, identity_field: &str) -> Option<Self> {
        let position = feature.geometry.as_ref()?.point()?;
        let properties = feature.properties.unwrap_or_default();
        let name = properties.get(identity_field).map(format_raw);
        Some(Self::new(index, name, position, properties))
    }

    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Field names in source order
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn has(&self, key: &AttributeKey) -> bool {
        self.properties.contains_key(key.as_str())
    }

    pub fn raw(&self, key: &AttributeKey) -> Option<&Value> {
        self.properties.get(key.as_str())
    }

    /// Coerced value for `key`, `None` when the record lacks the field
    pub fn value(&self, key: &AttributeKey) -> Option<f64> {
        self.raw(key).map(coerce_number)
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("Unknown")
    }
}

/// The immutable set of records loaded for a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordSet {
    records: Vec<Record>,
}

impl RecordSet {
    /// Records are renumbered by position, so `index` always addresses `get`
    pub fn new(records: Vec<Record>) -> Self {
        let records = records
            .into_iter()
            .enumerate()
            .map(|(position, mut record)| {
                if record.index != position {
                    log::debug!("renumbering record {} to {}", record.index, position);
                    record.index = position;
                }
                record
            })
            .collect();
        Self { records }
    }

    /// Builds records from the Point features of a document, skipping other geometries
    pub fn from_geojson(geojson: GeoJson, identity_field: &str) -> Result<Self> {
        let mut records = Vec::new();
        for feature in geojson.into_features() {
            let kind = feature
                .geometry
                .as_ref()
                .map(|g| g.kind())
                .unwrap_or("null");
            let index = records.len();
            match Record::from_feature(index, feature, identity_field) {
                Some(record) => records.push(record),
                None => log::warn!("skipping feature with {} geometry", kind),
            }
        }

        if records.is_empty() {
            return Err(MapError::EmptyDataset);
        }
        log::info!("built {} records", records.len());
        Ok(Self::new(records))
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn first(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
