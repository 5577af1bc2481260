use crate::{
    core::constants::KEY_DELIMITER,
    data::record::{Record, RecordSet},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field name encoding a measurement category and a year, e.g. `Deposits_2010`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeKey(String);

impl AttributeKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The year segment: everything between the first and second delimiter
    pub fn year(&self) -> Option<&str> {
        self.0.split(KEY_DELIMITER).nth(1).filter(|s| !s.is_empty())
    }

    /// The category segment before the first delimiter
    pub fn category(&self) -> &str {
        self.0.split(KEY_DELIMITER).next().unwrap_or(&self.0)
    }

    /// The year, or the whole key when it carries none
    pub fn label(&self) -> &str {
        self.year().unwrap_or(&self.0)
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AttributeKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Ordered attribute keys, derived once from the first record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeSequence {
    keys: Vec<AttributeKey>,
}

impl AttributeSequence {
    pub fn new(keys: Vec<AttributeKey>) -> Self {
        Self { keys }
    }

    pub fn keys(&self) -> &[AttributeKey] {
        &self.keys
    }

    pub fn get(&self, index: usize) -> Option<&AttributeKey> {
        self.keys.get(index)
    }

    pub fn first(&self) -> Option<&AttributeKey> {
        self.keys.first()
    }

    pub fn position(&self, key: &AttributeKey) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AttributeKey> {
        self.keys.iter()
    }

    /// Records lacking at least one key, with the keys they lack
    pub fn missing_in<'a>(&'a self, records: &'a RecordSet) -> Vec<(&'a Record, Vec<&'a AttributeKey>)> {
        records
            .iter()
            .filter_map(|record| {
                let missing: Vec<_> = self.keys.iter().filter(|k| !record.has(k)).collect();
                (!missing.is_empty()).then_some((record, missing))
            })
            .collect()
    }
}

/// Extracts the keys of the first record whose names contain `marker`, in field order.
///
/// An empty record set yields an empty sequence.
pub fn extract_attributes(records: &RecordSet, marker: &str) -> AttributeSequence {
    let Some(first) = records.first() else {
        return AttributeSequence::default();
    };

    let keys = first
        .field_names()
        .filter(|name| name.contains(marker))
        .map(AttributeKey::new)
        .collect::<Vec<_>>();

    log::debug!("extracted attributes: {:?}", keys);
    AttributeSequence::new(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use serde_json::json;

    fn record(index: usize, properties: serde_json::Value) -> Record {
        let properties = properties.as_object().cloned().unwrap();
        Record::new(index, None, LatLng::default(), properties)
    }

    #[test]
    fn test_extracts_marked_fields_in_order() {
        let records = RecordSet::new(vec![record(
            0,
            json!({"City": "X", "Deposits_2010": 5, "Deposits_2011": 6, "Other": 1}),
        )]);

        let attributes = extract_attributes(&records, "Deposits");
        assert_eq!(
            attributes.keys(),
            [AttributeKey::new("Deposits_2010"), AttributeKey::new("Deposits_2011")]
        );
    }

    #[test]
    fn test_keeps_source_order_not_sorted_order() {
        let records = RecordSet::new(vec![record(
            0,
            json!({"Deposits_2012": 1, "City": "X", "Deposits_2010": 2}),
        )]);

        let attributes = extract_attributes(&records, "Deposits");
        assert_eq!(attributes.get(0).unwrap().as_str(), "Deposits_2012");
        assert_eq!(attributes.get(1).unwrap().as_str(), "Deposits_2010");
    }

    #[test]
    fn test_only_first_record_is_scanned() {
        let records = RecordSet::new(vec![
            record(0, json!({"Deposits_2010": 1})),
            record(1, json!({"Deposits_2010": 1, "Deposits_2011": 2})),
        ]);

        assert_eq!(extract_attributes(&records, "Deposits").len(), 1);
    }

    #[test]
    fn test_empty_record_set() {
        let attributes = extract_attributes(&RecordSet::default(), "Deposits");
        assert!(attributes.is_empty());
    }

    #[test]
    fn test_year_parsing() {
        assert_eq!(AttributeKey::new("Deposits_2010").year(), Some("2010"));
        assert_eq!(AttributeKey::new("Deposits_2010_adj").year(), Some("2010"));
        assert_eq!(AttributeKey::new("Deposits").year(), None);
        assert_eq!(AttributeKey::new("Deposits").label(), "Deposits");
        assert_eq!(AttributeKey::new("Deposits_2010").category(), "Deposits");
    }

    #[test]
    fn test_missing_in() {
        let records = RecordSet::new(vec![
            record(0, json!({"Deposits_2010": 1, "Deposits_2011": 2})),
            record(1, json!({"Deposits_2010": 1})),
        ]);
        let attributes = extract_attributes(&records, "Deposits");

        let missing = attributes.missing_in(&records);
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].0.index, 1);
        assert_eq!(missing[0].1, [&AttributeKey::new("Deposits_2011")]);
    }
}
