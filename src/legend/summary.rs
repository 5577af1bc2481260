use crate::{
    data::{attributes::AttributeKey, record::RecordSet},
    symbology::radius::RadiusScale,
};
use serde::{Deserialize, Serialize};

/// Min, max and "mean" of one attribute across the displayed records.
///
/// `mean` is the midrange `(max + min) / 2`, not the arithmetic mean.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl Summary {
    /// Single pass over `values`; `None` when there are none
    pub fn from_values<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut seen = false;

        for value in values {
            if value < min {
                min = value;
            }
            if value > max {
                max = value;
            }
            seen = true;
        }

        seen.then(|| Self {
            min,
            max,
            mean: (max + min) / 2.0,
        })
    }

    /// Same as `mean`, under its real name
    pub fn midrange(&self) -> f64 {
        self.mean
    }
}

/// Summarizes `key` over the records a marker is drawn for.
///
/// Records lacking the key are skipped, as are values the radius guard
/// rejects, so the legend never describes a symbol that is not on the map.
pub fn summarize(records: &RecordSet, key: &AttributeKey, scale: &RadiusScale) -> Option<Summary> {
    Summary::from_values(
        records
            .iter()
            .filter_map(|record| record.value(key))
            .filter(|value| scale.checked_radius(*value).is_ok()),
    )
}
