use crate::{
    core::config::MapConfig,
    data::{
        attributes::{AttributeKey, AttributeSequence},
        record::RecordSet,
    },
    layers::proportional::MarkerUpdate,
    legend::{summary::summarize, view::LegendView},
    sequence::state::{SelectionState, Transition},
    symbology::radius::RadiusScale,
    MapError, Result,
};
use serde::{Deserialize, Serialize};

/// Everything that changes on screen after one transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewUpdate {
    pub previous: SelectionState,
    pub current: SelectionState,
    pub key: AttributeKey,
    /// One entry per record that carries `key`, in record order
    pub markers: Vec<MarkerUpdate>,
    /// Records lacking `key`; their markers are left as they were
    pub skipped: Vec<usize>,
    pub legend: LegendView,
}

impl ViewUpdate {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}

/// Computes the view update for `transition` without touching any state.
///
/// The returned update always describes the full display for the new key,
/// so applying it is idempotent.
pub fn plan(
    state: SelectionState,
    transition: Transition,
    records: &RecordSet,
    attributes: &AttributeSequence,
    scale: &RadiusScale,
    config: &MapConfig,
) -> Result<ViewUpdate> {
    let current = state.apply(transition);
    let key = attributes
        .get(current.index())
        .ok_or_else(|| MapError::InvalidValue {
            key: format!("index {}", current.index()),
            reason: format!("sequence has {} attributes", attributes.len()),
        })?
        .clone();

    let mut markers = Vec::with_capacity(records.len());
    let mut skipped = Vec::new();
    for record in records {
        match MarkerUpdate::for_record(record, &key, scale, config) {
            Some(update) => markers.push(update),
            None => {
                log::debug!("{} has no {}, marker left unchanged", record.display_name(), key);
                skipped.push(record.index);
            }
        }
    }

    let legend = LegendView::build(
        &key,
        summarize(records, &key, scale),
        scale,
        &config.legend,
        &config.value_unit,
    );

    log::debug!(
        "{:?}: {} -> {} ({})",
        transition,
        state.index(),
        current.index(),
        key
    );

    Ok(ViewUpdate {
        previous: state,
        current,
        key,
        markers,
        skipped,
        legend,
    })
}

/// Owns the selected year and turns transitions into view updates
#[derive(Debug, Clone)]
pub struct SequenceController {
    state: SelectionState,
    attributes: AttributeSequence,
    scale: RadiusScale,
}

impl SequenceController {
    /// Starts at the first attribute
    pub fn new(attributes: AttributeSequence, scale: RadiusScale) -> Result<Self> {
        let state = SelectionState::new(attributes.len())
            .ok_or_else(|| MapError::NoAttributes("attribute sequence is empty".to_string()))?;
        Ok(Self {
            state,
            attributes,
            scale,
        })
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn attributes(&self) -> &AttributeSequence {
        &self.attributes
    }

    pub fn scale(&self) -> &RadiusScale {
        &self.scale
    }

    pub fn current_key(&self) -> &AttributeKey {
        // state.index() < attributes.len() holds for the controller's lifetime
        &self.attributes.keys()[self.state.index()]
    }

    /// Legend for the current key
    pub fn legend(&self, records: &RecordSet, config: &MapConfig) -> LegendView {
        let key = self.current_key();
        LegendView::build(
            key,
            summarize(records, key, &self.scale),
            &self.scale,
            &config.legend,
            &config.value_unit,
        )
    }

    /// Advances the state and returns what must change on screen
    pub fn dispatch(
        &mut self,
        transition: Transition,
        records: &RecordSet,
        config: &MapConfig,
    ) -> Result<ViewUpdate> {
        let update = plan(
            self.state,
            transition,
            records,
            &self.attributes,
            &self.scale,
            config,
        )?;
        self.state = update.current;
        Ok(update)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::geo::LatLng, data::record::Record};
    use serde_json::json;

    fn records() -> RecordSet {
        let make = |i: usize, name: &str, props: serde_json::Value| {
            Record::new(
                i,
                Some(name.to_string()),
                LatLng::new(40.0, -90.0 - i as f64),
                props.as_object().cloned().unwrap(),
            )
        };
        RecordSet::new(vec![
            make(0, "A", json!({"City": "A", "Deposits_2010": 10, "Deposits_2011": 40, "Deposits_2012": 90})),
            make(1, "B", json!({"City": "B", "Deposits_2010": 30, "Deposits_2012": 10})),
        ])
    }

    fn attributes() -> AttributeSequence {
        AttributeSequence::new(vec![
            AttributeKey::new("Deposits_2010"),
            AttributeKey::new("Deposits_2011"),
            AttributeKey::new("Deposits_2012"),
        ])
    }

    fn controller() -> SequenceController {
        SequenceController::new(attributes(), RadiusScale::new(5.0)).unwrap()
    }

    #[test]
    fn test_plan_is_pure() {
        let state = SelectionState::new(3).unwrap();
        let config = MapConfig::default();
        let a = plan(state, Transition::Forward, &records(), &attributes(), &RadiusScale::new(5.0), &config).unwrap();
        let b = plan(state, Transition::Forward, &records(), &attributes(), &RadiusScale::new(5.0), &config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.previous.index(), 0);
        assert_eq!(a.current.index(), 1);
        assert!(a.changed());
    }

    #[test]
    fn test_missing_key_is_skipped() {
        let mut controller = controller();
        let update = controller
            .dispatch(Transition::Forward, &records(), &MapConfig::default())
            .unwrap();

        assert_eq!(update.key.as_str(), "Deposits_2011");
        assert_eq!(update.markers.len(), 1);
        assert_eq!(update.markers[0].record, 0);
        assert_eq!(update.skipped, vec![1]);

        let summary = update.legend.summary.unwrap();
        assert_eq!(summary.min, 40.0);
        assert_eq!(summary.max, 40.0);
    }

    #[test]
    fn test_reverse_from_start_wraps_to_last() {
        let mut controller = controller();
        let update = controller
            .dispatch(Transition::Reverse, &records(), &MapConfig::default())
            .unwrap();

        assert_eq!(update.current.index(), 2);
        assert_eq!(controller.current_key().as_str(), "Deposits_2012");
        assert_eq!(update.legend.title, "Deposits in 2012");
        assert_eq!(update.legend.summary.unwrap().mean, 50.0);
    }

    #[test]
    fn test_forward_cycle_returns_to_start() {
        let mut controller = controller();
        let records = records();
        let config = MapConfig::default();
        let initial = controller.legend(&records, &config);

        let mut last = None;
        for _ in 0..3 {
            last = Some(controller.dispatch(Transition::Forward, &records, &config).unwrap());
        }
        let last = last.unwrap();

        assert_eq!(controller.state().index(), 0);
        assert_eq!(last.legend, initial);
        assert!(last.skipped.is_empty());
    }

    #[test]
    fn test_set_same_index_is_unchanged() {
        let mut controller = controller();
        let update = controller
            .dispatch(Transition::Set(0), &records(), &MapConfig::default())
            .unwrap();
        assert!(!update.changed());

        let update = controller
            .dispatch(Transition::Set(9), &records(), &MapConfig::default())
            .unwrap();
        assert_eq!(update.current.index(), 2);
    }

    #[test]
    fn test_empty_sequence_is_rejected() {
        let result = SequenceController::new(AttributeSequence::default(), RadiusScale::default());
        assert!(matches!(result, Err(MapError::NoAttributes(_))));
    }
}
