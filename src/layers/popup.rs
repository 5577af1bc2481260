use crate::{
    core::{config::MapConfig, geo::Point},
    data::{
        attributes::AttributeKey,
        record::{format_raw, Record},
    },
};
use serde::{Deserialize, Serialize};

/// Text of a marker popup, one entry per line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopupContent {
    pub lines: Vec<String>,
}

impl PopupContent {
    pub fn new(lines: Vec<String>) -> Self {
        Self { lines }
    }

    /// Name line plus the record's raw value for `key` and the key's year
    pub fn for_record(record: &Record, key: &AttributeKey, config: &MapConfig) -> Self {
        let name = format!("{}: {}", config.identity_label, record.display_name());
        let value = record
            .raw(key)
            .map(|raw| format!("{} {}", format_raw(raw), config.value_unit))
            .unwrap_or_else(|| "no data".to_string());
        let line = format!(
            "Number of {} in {}: {}",
            key.category().to_lowercase(),
            key.label(),
            value
        );
        Self::new(vec![name, line])
    }

    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Popup bound to a marker; opened while the pointer is over it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Popup {
    pub content: PopupContent,
    /// Pixel offset of the popup tip from the marker centre
    pub offset: Point,
    pub visible: bool,
}

impl Popup {
    pub fn new(content: PopupContent, offset: Point) -> Self {
        Self {
            content,
            offset,
            visible: false,
        }
    }

    /// Rebinds content and keeps the tip on the circle's top edge
    pub fn rebind(&mut self, content: PopupContent, radius: f64) {
        self.content = content;
        self.offset = Point::new(0.0, -radius);
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use serde_json::json;

    fn chicago() -> Record {
        let properties = json!({"City": "Chicago", "Deposits_2010": 523, "Deposits_2011": "610.5"})
            .as_object()
            .cloned()
            .unwrap();
        Record::new(0, Some("Chicago".to_string()), LatLng::new(41.9, -87.6), properties)
    }

    #[test]
    fn test_popup_text() {
        let content =
            PopupContent::for_record(&chicago(), &AttributeKey::new("Deposits_2010"), &MapConfig::default());
        assert_eq!(
            content.text(),
            "City: Chicago\nNumber of deposits in 2010: 523 thousand"
        );

        let content =
            PopupContent::for_record(&chicago(), &AttributeKey::new("Deposits_2011"), &MapConfig::default());
        assert_eq!(content.lines[1], "Number of deposits in 2011: 610.5 thousand");
    }

    #[test]
    fn test_popup_for_missing_key() {
        let content =
            PopupContent::for_record(&chicago(), &AttributeKey::new("Deposits_2012"), &MapConfig::default());
        assert_eq!(content.lines[1], "Number of deposits in 2012: no data");
    }

    #[test]
    fn test_rebind_moves_offset() {
        let mut popup = Popup::new(PopupContent::default(), Point::new(0.0, -3.0));
        popup.rebind(PopupContent::new(vec!["x".to_string()]), 12.0);
        assert_eq!(popup.offset, Point::new(0.0, -12.0));
        assert!(!popup.visible);
        popup.show();
        assert!(popup.visible);
    }
}
