use chart_axis::api::{
    AXIS_CONFIG_JSON_SCHEMA_V1, AxisConfig, AxisFactory, AxisRequest, TickList,
};
use chart_axis::core::{AxisScale, LabelFormatter};
use chart_axis::error::AxisError;

#[test]
fn config_round_trips_through_json() {
    let config = AxisConfig::new(
        AxisFactory::new().with_fit(true).with_reverse(true),
        AxisRequest::new(300.0, 0.0, 50.0)
            .with_grid_division(10.0)
            .with_labels(LabelFormatter::new().with_units("$", "")),
    );
    let json = config.to_json_pretty().expect("serialize");
    let restored = AxisConfig::from_json_str(&json).expect("parse");

    assert_eq!(restored.factory, config.factory);
    assert_eq!(restored.request.grid_division, Some(10.0));
    assert_eq!(restored.request.labels.units_before, "$");
}

#[test]
fn versioned_payload_is_accepted() {
    let config = AxisConfig::new(AxisFactory::new(), AxisRequest::new(300.0, 0.0, 50.0));
    let json = config.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(&format!("\"schema_version\": {AXIS_CONFIG_JSON_SCHEMA_V1}")));

    let restored = AxisConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored.request.max_value, 50.0);
}

#[test]
fn unknown_schema_version_is_rejected() {
    let json = r#"{
        "schema_version": 99,
        "config": { "request": { "length": 300, "min_value": 0, "max_value": 50 } }
    }"#;
    assert!(matches!(
        AxisConfig::from_json_str(json),
        Err(AxisError::InvalidConfig(_))
    ));
}

#[test]
fn omitted_fields_take_defaults() {
    let json = r#"{ "request": { "length": 300, "min_value": 0, "max_value": 50, "grid_division": 10 } }"#;
    let config = AxisConfig::from_json_str(json).expect("parse");

    assert_eq!(config.factory, AxisFactory::default());
    assert_eq!(config.request.min_space, 15.0);
    assert_eq!(config.request.log_base, 10.0);
    assert_eq!(config.request.levels, 1);

    let axis = config.build().expect("axis");
    assert_eq!(axis.kind_name(), "fixed-step");
    assert_eq!(axis.unit(), 6.0);
}

#[test]
fn tick_lists_accept_numbers_or_text() {
    let json = r#"{
        "factory": { "datetime": true },
        "request": {
            "length": 300,
            "min_value": 0,
            "max_value": 2000000,
            "ticks": ["1970-01-02", "1970-01-10"]
        }
    }"#;
    let config = AxisConfig::from_json_str(json).expect("parse");
    assert_eq!(
        config.request.ticks,
        Some(TickList::Text(vec![
            "1970-01-02".to_owned(),
            "1970-01-10".to_owned()
        ]))
    );
    assert_eq!(config.build().expect("axis").grid_points(Some(0.0)).len(), 2);

    let numeric = r#"{ "request": { "length": 300, "min_value": 0, "max_value": 50, "ticks": [10, 20] } }"#;
    let config = AxisConfig::from_json_str(numeric).expect("parse");
    assert_eq!(config.request.ticks, Some(TickList::Values(vec![10.0, 20.0])));
}

#[test]
fn malformed_json_is_a_config_error() {
    assert!(matches!(
        AxisConfig::from_json_str("{ not json"),
        Err(AxisError::InvalidConfig(_))
    ));
}
