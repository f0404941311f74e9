use approx::assert_abs_diff_eq;
use chart_axis::api::{AxisFactory, AxisKind, AxisRequest, TickList, tight_ticks};
use chart_axis::core::{AxisScale, AxisSettings, LabelFormatter, LinearTicks, parse_datetime};
use chart_axis::error::{AxisError, AxisErrorKind};

fn request() -> AxisRequest {
    AxisRequest::new(300.0, 0.0, 50.0)
}

#[test]
fn plain_request_builds_a_calculated_axis() {
    let factory = AxisFactory::new();
    assert_eq!(factory.select(&request()).expect("select"), AxisKind::Calculated);
    let axis = factory.get(&request()).expect("axis");
    assert_eq!(axis.kind_name(), "calculated");
}

#[test]
fn grid_division_builds_a_fixed_step_axis() {
    let axis = AxisFactory::new()
        .get(&request().with_grid_division(10.0))
        .expect("axis");
    let linear = axis.as_linear().expect("linear axis");

    assert_eq!(axis.kind_name(), "fixed-step");
    assert_abs_diff_eq!(axis.unit(), 6.0, epsilon = 1e-12);
    assert_abs_diff_eq!(linear.division_spacing(), 60.0, epsilon = 1e-9);
}

#[test]
fn ticks_win_over_grid_division() {
    let kind = AxisFactory::new()
        .select(
            &request()
                .with_grid_division(10.0)
                .with_ticks(TickList::Values(vec![5.0, 25.0])),
        )
        .expect("select");
    assert_eq!(kind, AxisKind::FixedTicks(vec![5.0, 25.0]));
}

#[test]
fn datetime_wins_over_log() {
    let factory = AxisFactory::new().with_datetime(true);
    let request = AxisRequest::new(300.0, 0.0, 86_400.0 * 30.0).with_log(10.0);
    assert_eq!(factory.select(&request).expect("select"), AxisKind::DateTime);

    let with_ticks = request.with_ticks(TickList::Text(vec!["1970-01-10".to_owned()]));
    assert_eq!(
        factory.select(&with_ticks).expect("select"),
        AxisKind::DateTimeTicks(vec![86_400.0 * 9.0])
    );
}

#[test]
fn log_requests_pick_log_kinds() {
    let factory = AxisFactory::new();
    let log = AxisRequest::new(300.0, 1.0, 1000.0).with_log(10.0);
    assert_eq!(
        factory.select(&log).expect("select"),
        AxisKind::Log {
            base: 10.0,
            divisions: None
        }
    );

    let split = log.clone().with_grid_division(5.0);
    assert_eq!(
        factory.select(&split).expect("select"),
        AxisKind::Log {
            base: 10.0,
            divisions: Some(5)
        }
    );

    let ticks = log.with_ticks(TickList::Values(vec![2.0, 20.0]));
    assert!(matches!(
        factory.select(&ticks).expect("select"),
        AxisKind::LogTicks { .. }
    ));
}

#[test]
fn fractional_log_division_is_rejected() {
    let request = AxisRequest::new(300.0, 1.0, 1000.0)
        .with_log(10.0)
        .with_grid_division(2.5);
    assert!(matches!(
        AxisFactory::new().select(&request),
        Err(AxisError::InvalidDivision(_))
    ));
}

#[test]
fn non_positive_grid_division_is_rejected() {
    assert!(matches!(
        AxisFactory::new().get(&request().with_grid_division(-5.0)),
        Err(AxisError::InvalidDivision(_))
    ));
}

#[test]
fn tight_fit_synthesizes_fixed_ticks() {
    let factory = AxisFactory::new().with_fit(true).with_tightness(Some(1.0));
    let request = AxisRequest::new(300.0, 0.0, 9.0).with_min_space(20.0);

    assert_eq!(
        factory.select(&request).expect("select"),
        AxisKind::Tight { division: None }
    );
    let axis = factory.get(&request).expect("axis");
    assert_eq!(axis.kind_name(), "fixed-ticks");
    assert_eq!(axis.grid_points(Some(0.0)).len(), 10);
}

#[test]
fn tightness_needs_fit_and_a_positive_value() {
    let unfit = AxisFactory::new().with_tightness(Some(1.0));
    assert_eq!(unfit.select(&request()).expect("select"), AxisKind::Calculated);

    let zero = AxisFactory::new().with_fit(true).with_tightness(Some(0.0));
    assert_eq!(zero.select(&request()).expect("select"), AxisKind::Calculated);
}

#[test]
fn tight_ticks_start_on_a_step_multiple() {
    let settings = AxisSettings::new(300.0, 0.1, 1.0);
    let ticks = tight_ticks(&settings, Some(0.25), false, false).expect("ticks");
    assert_eq!(ticks, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn bar_extends_before_reverse_flips() {
    let factory = AxisFactory::new().with_bar(true).with_reverse(true);
    let request = AxisRequest::new(100.0, 0.0, 9.0)
        .with_min_unit(1.0)
        .with_grid_division(1.0);
    let axis = factory.get(&request).expect("axis");
    let linear = axis.as_linear().expect("linear axis");

    assert_eq!(linear.max_value(), 10.0);
    assert_eq!(linear.original_bounds(), Some((0.0, 10.0)));
    let points = axis.grid_points(Some(100.0));
    assert_eq!(points.len(), 11);
    assert_abs_diff_eq!(points[0].position, 100.0, epsilon = 1e-9);
    assert_eq!(points[0].value, 0.0);
    assert_eq!(points[10].value, 10.0);
}

#[test]
fn bar_leaves_log_axes_alone() {
    let factory = AxisFactory::new().with_bar(true);
    let request = AxisRequest::new(300.0, 1.0, 1000.0)
        .with_min_unit(1.0)
        .with_log(10.0);
    let axis = factory.get(&request).expect("axis");
    let log = axis.as_log().expect("log axis");
    assert_eq!(log.power_range(), (0, 3));
}

#[test]
fn explicit_ticks_ignore_the_bar_extension() {
    let factory = AxisFactory::new().with_bar(true);
    let request = AxisRequest::new(100.0, 0.0, 9.0)
        .with_min_unit(1.0)
        .with_ticks(TickList::Values(vec![0.0, 9.0, 9.5]));
    let axis = factory.get(&request).expect("axis");

    let values: Vec<f64> = axis
        .grid_points(Some(0.0))
        .iter()
        .map(|point| point.value)
        .collect();
    assert_eq!(values, vec![0.0, 9.0]);
    assert!(matches!(
        axis.as_linear().map(|linear| linear.ticks()),
        Some(LinearTicks::Explicit(_))
    ));
}

#[test]
fn double_ended_wraps_calculated_and_fixed_step() {
    let factory = AxisFactory::new().with_double_ended(true);
    let request = AxisRequest::new(600.0, 0.0, 100.0).with_min_space(30.0);

    let calculated = factory.get(&request).expect("axis");
    assert_eq!(calculated.kind_name(), "double-ended");
    assert_eq!(calculated.length(), 600.0);
    assert_eq!(calculated.zero(), 300.0);

    let fixed = factory
        .get(&request.clone().with_grid_division(25.0))
        .expect("axis");
    assert!(fixed.as_mirrored().is_some());
}

#[test]
fn double_ended_log_is_unsupported() {
    let factory = AxisFactory::new().with_double_ended(true);
    let request = AxisRequest::new(600.0, 1.0, 100.0).with_log(10.0);
    assert!(matches!(
        factory.get(&request),
        Err(AxisError::UnsupportedDoubleEnded { kind: "log" })
    ));
}

#[test]
fn bad_datetime_tick_fails_the_whole_axis() {
    let factory = AxisFactory::new().with_datetime(true);
    let request = AxisRequest::new(300.0, 0.0, 1e9).with_ticks(TickList::Text(vec![
        "2001-01-01".to_owned(),
        "not a date".to_owned(),
    ]));
    let err = factory.get(&request).expect_err("must fail");
    assert_eq!(err.kind(), AxisErrorKind::DataFormat);
}

#[test]
fn datetime_axes_accept_parsed_bounds() {
    let factory = AxisFactory::new().with_datetime(true);
    let request = AxisRequest::new(
        600.0,
        parse_datetime("2024-01-01T00:00:00Z").expect("date"),
        parse_datetime("2024-12-31T00:00:00Z").expect("date"),
    )
    .with_levels(2)
    .with_labels(LabelFormatter::new());
    let axis = factory.get(&request).expect("axis");

    assert_eq!(axis.kind_name(), "datetime");
    assert_eq!(axis.as_datetime().map(|datetime| datetime.label_levels()), Some(2));
}

#[test]
fn finished_axes_can_be_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<chart_axis::Axis>();

    let axis = AxisFactory::new().get(&request()).expect("axis");
    let shared = std::sync::Arc::new(axis);
    let worker = {
        let shared = std::sync::Arc::clone(&shared);
        std::thread::spawn(move || shared.grid_points(Some(0.0)).len())
    };
    let here = shared.grid_points(Some(0.0)).len();
    assert_eq!(worker.join().expect("worker"), here);
}

#[test]
fn tight_ticks_end_exactly_on_the_maximum() {
    let settings = AxisSettings::new(300.0, 0.0, 0.7);
    let ticks = tight_ticks(&settings, Some(0.1), false, false).expect("ticks");
    assert_eq!(ticks, vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);

    let factory = AxisFactory::new().with_fit(true).with_tightness(Some(1.0));
    let axis = factory
        .get(&AxisRequest::new(300.0, 0.0, 0.7).with_grid_division(0.1))
        .expect("axis");
    let values: Vec<f64> = axis
        .grid_points(Some(0.0))
        .iter()
        .map(|point| point.value)
        .collect();
    assert_eq!(values.len(), 8);
    assert_eq!(values.last(), Some(&0.7));
}

#[test]
fn coarse_natural_step_is_scaled_down() {
    // one calculated point at 0.25, so the span becomes the natural step
    let settings = AxisSettings::new(300.0, 0.21, 0.29)
        .with_min_space(120.0)
        .with_fit(true);
    let ticks = tight_ticks(&settings, None, false, false).expect("ticks");
    assert_eq!(ticks, vec![0.2, 0.24, 0.28]);
}

#[test]
fn tight_axis_positions_come_from_whole_unit_padding() {
    let factory = AxisFactory::new().with_fit(true).with_tightness(Some(1.0));
    let axis = factory
        .get(&AxisRequest::new(300.0, 0.0, 0.3).with_grid_division(0.1))
        .expect("axis");
    let points = axis.grid_points(Some(0.0));

    assert_eq!(points.len(), 4);
    assert_eq!(points[3].value, 0.3);
    assert_abs_diff_eq!(points[3].position, 90.0, epsilon = 1e-9);
    assert_abs_diff_eq!(axis.unit(), 300.0, epsilon = 1e-9);
}

#[test]
fn single_bar_category_builds_on_every_linear_path() {
    let bar = AxisFactory::new().with_bar(true);
    let request = AxisRequest::new(100.0, 0.0, 0.0).with_min_unit(1.0);

    let calculated = bar.get(&request).expect("calculated axis");
    assert_eq!(calculated.grid_points(Some(0.0)).len(), 2);

    let explicit = bar
        .get(&request.clone().with_ticks(TickList::Values(vec![0.0])))
        .expect("explicit axis");
    let points = explicit.grid_points(Some(0.0));
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].value, 0.0);

    let tight = bar.with_fit(true).with_tightness(Some(1.0));
    let axis = tight.get(&request).expect("tight axis");
    assert_eq!(axis.grid_points(Some(0.0)).len(), 1);

    assert!(matches!(
        AxisFactory::new().get(&request.with_ticks(TickList::Values(vec![0.0]))),
        Err(AxisError::ZeroLength { .. })
    ));
}
