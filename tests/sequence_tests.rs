use propmap::{
    core::config::MapConfig,
    data::{attributes::extract_attributes, record::RecordSet, GeoJson},
    legend::summary::Summary,
    sequence::{plan, SelectionState, Transition},
    RadiusScale,
};
use std::f64::consts::PI;

#[test]
fn test_radius_formula_and_monotonicity() {
    for factor in [5.0, 50.0] {
        let scale = RadiusScale::new(factor);
        let mut previous = 0.0;
        for v in [0.0, 0.5, 1.0, 10.0, 123.4, 1e6] {
            let r = scale.radius(v);
            assert!((r - (v * factor / PI).sqrt()).abs() < 1e-9);
            assert!(r >= previous);
            previous = r;
        }
    }
}

#[test]
fn test_forward_reverse_round_trip_for_every_index() {
    for len in 1..=6 {
        let mut state = SelectionState::new(len).unwrap();
        for _ in 0..len {
            assert_eq!(state.forward().reverse(), state);
            assert_eq!(state.reverse().forward(), state);
            state = state.forward();
        }
    }
}

#[test]
fn test_wraparound_boundaries() {
    let first = SelectionState::new(4).unwrap();
    let last = first.set(3);
    assert_eq!(last.forward().index(), 0);
    assert_eq!(first.reverse().index(), 3);
}

#[test]
fn test_summary_uses_midrange() {
    let summary = Summary::from_values([10.0, 20.0, 90.0]).unwrap();
    assert_eq!(summary.min, 10.0);
    assert_eq!(summary.max, 90.0);
    assert_eq!(summary.mean, 50.0);
}

#[test]
fn test_extractor_keeps_marked_fields_in_order() {
    let json = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
         "properties": {"City": "X", "Deposits_2010": 5, "Deposits_2011": 6, "Other": 1}}
    ]}"#;
    let records = RecordSet::from_geojson(GeoJson::parse(json).unwrap(), "City").unwrap();
    let attrs = extract_attributes(&records, "Deposits");
    let keys: Vec<&str> = attrs
        .iter()
        .map(|k| k.as_str())
        .collect();
    assert_eq!(keys, ["Deposits_2010", "Deposits_2011"]);
}

#[test]
fn test_plan_does_not_depend_on_call_history() {
    let json = r#"{"type": "FeatureCollection", "features": [
        {"type": "Feature", "geometry": {"type": "Point", "coordinates": [1.0, 2.0]},
         "properties": {"City": "X", "Deposits_2010": 5, "Deposits_2011": 6}}
    ]}"#;
    let records = RecordSet::from_geojson(GeoJson::parse(json).unwrap(), "City").unwrap();
    let attributes = extract_attributes(&records, "Deposits");
    let scale = RadiusScale::default();
    let config = MapConfig::default();
    let start = SelectionState::new(attributes.len()).unwrap();

    let direct = plan(start, Transition::Set(1), &records, &attributes, &scale, &config).unwrap();
    let stepped = plan(start, Transition::Forward, &records, &attributes, &scale, &config).unwrap();
    assert_eq!(direct.key, stepped.key);
    assert_eq!(direct.markers, stepped.markers);
    assert_eq!(direct.legend, stepped.legend);
}
