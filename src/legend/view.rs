use crate::{
    core::config::LegendConfig,
    data::{attributes::AttributeKey, record::format_number},
    legend::summary::Summary,
    symbology::radius::RadiusScale,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegendKind {
    Max,
    Mean,
    Min,
}

impl LegendKind {
    pub const ALL: [LegendKind; 3] = [LegendKind::Max, LegendKind::Mean, LegendKind::Min];

    pub fn as_str(&self) -> &'static str {
        match self {
            LegendKind::Max => "max",
            LegendKind::Mean => "mean",
            LegendKind::Min => "min",
        }
    }

    fn value(&self, summary: &Summary) -> f64 {
        match self {
            LegendKind::Max => summary.max,
            LegendKind::Mean => summary.mean,
            LegendKind::Min => summary.min,
        }
    }
}

/// One nested legend circle with its label, in legend canvas pixels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub kind: LegendKind,
    pub value: f64,
    pub radius: f64,
    pub cx: f64,
    pub cy: f64,
    pub text_x: f64,
    pub text_y: f64,
    pub label: String,
}

/// Everything the legend shows for the active attribute
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendView {
    /// e.g. `Deposits in 2010`
    pub title: String,
    pub key: AttributeKey,
    pub summary: Option<Summary>,
    pub entries: Vec<LegendEntry>,
}

/// Rounds to two decimals, halves toward positive infinity
pub fn round2(value: f64) -> f64 {
    (value * 100.0 + 0.5).floor() / 100.0
}

impl LegendView {
    pub fn build(
        key: &AttributeKey,
        summary: Option<Summary>,
        scale: &RadiusScale,
        config: &LegendConfig,
        unit: &str,
    ) -> Self {
        let entries = summary
            .map(|summary| {
                LegendKind::ALL
                    .iter()
                    .zip(config.text_y)
                    .map(|(kind, text_y)| {
                        let value = kind.value(&summary);
                        let radius = scale.radius(value);
                        LegendEntry {
                            kind: *kind,
                            value,
                            radius,
                            cx: config.circle_x,
                            cy: config.baseline - radius,
                            text_x: config.text_x,
                            text_y,
                            label: format!("{} {}", format_number(round2(value)), unit),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            title: format!("{} in {}", key.category(), key.label()),
            key: key.clone(),
            summary,
            entries,
        }
    }

    pub fn entry(&self, kind: LegendKind) -> Option<&LegendEntry> {
        self.entries.iter().find(|e| e.kind == kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(summary: Option<Summary>) -> LegendView {
        LegendView::build(
            &AttributeKey::new("Deposits_2012"),
            summary,
            &RadiusScale::new(5.0),
            &LegendConfig::default(),
            "thousand",
        )
    }

    #[test]
    fn test_title_uses_year() {
        assert_eq!(build(None).title, "Deposits in 2012");
    }

    #[test]
    fn test_entries_sit_on_baseline() {
        let view = build(Summary::from_values([10.0, 20.0, 90.0]));
        assert_eq!(view.entries.len(), 3);

        let max = view.entry(LegendKind::Max).unwrap();
        assert_eq!(max.value, 90.0);
        assert!((max.cy + max.radius - 90.0).abs() < 1e-12);
        assert_eq!(max.text_y, 20.0);
        assert_eq!(max.label, "90 thousand");

        let mean = view.entry(LegendKind::Mean).unwrap();
        assert_eq!(mean.value, 50.0);
        assert_eq!(mean.text_y, 49.0);

        let min = view.entry(LegendKind::Min).unwrap();
        assert_eq!(min.text_y, 80.0);
        assert!(min.radius < mean.radius && mean.radius < max.radius);
    }

    #[test]
    fn test_labels_round_to_cents() {
        let view = build(Summary::from_values([1.005, 2.3333]));
        assert_eq!(view.entry(LegendKind::Max).unwrap().label, "2.33 thousand");
        assert_eq!(round2(12.345678), 12.35);
        assert_eq!(round2(7.0), 7.0);
    }

    #[test]
    fn test_no_summary_has_no_entries() {
        let view = build(None);
        assert!(view.entries.is_empty());
        assert!(view.summary.is_none());
    }
}
