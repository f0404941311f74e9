use approx::assert_abs_diff_eq;
use chart_axis::core::{AxisScale, AxisSettings, Direction, LinearAxis, LinearTicks};
use chart_axis::error::AxisError;

#[test]
fn step_rounds_the_larger_bound_up() {
    let settings = AxisSettings::new(400.0, 0.0, 95.0);
    let axis = LinearAxis::fixed_step(&settings, 25.0, Direction::Forward).expect("valid axis");

    assert_eq!(axis.min_value(), 0.0);
    assert_eq!(axis.max_value(), 100.0);
    assert_abs_diff_eq!(axis.division_count(), 4.0, epsilon = 1e-12);
    assert_abs_diff_eq!(axis.division_spacing(), 400.0 / 4.0, epsilon = 1e-9);
    assert_eq!(axis.original_bounds(), Some((0.0, 95.0)));
}

#[test]
fn aligned_range_is_left_unchanged() {
    let settings = AxisSettings::new(300.0, 0.0, 50.0);
    let axis = LinearAxis::fixed_step(&settings, 10.0, Direction::Forward).expect("valid axis");

    assert_eq!(axis.max_value(), 50.0);
    assert_abs_diff_eq!(axis.unit(), 6.0, epsilon = 1e-12);
    assert_abs_diff_eq!(axis.division_spacing(), 60.0, epsilon = 1e-9);

    let positions: Vec<f64> = axis
        .grid_points(Some(0.0))
        .iter()
        .map(|point| point.position)
        .collect();
    assert_eq!(positions.len(), 6);
    assert_abs_diff_eq!(positions[5], 300.0, epsilon = 1e-9);
}

#[test]
fn divisions_start_at_the_smaller_bound() {
    let settings = AxisSettings::new(200.0, 3.0, 20.0);
    let axis = LinearAxis::fixed_step(&settings, 5.0, Direction::Forward).expect("valid axis");

    assert_eq!(axis.min_value(), 3.0);
    assert_eq!(axis.max_value(), 23.0);
    let values: Vec<f64> = axis
        .grid_points(Some(0.0))
        .iter()
        .map(|point| point.value)
        .collect();
    assert_eq!(values, vec![3.0, 8.0, 13.0, 18.0, 23.0]);
}

#[test]
fn larger_negative_bound_moves_down() {
    let settings = AxisSettings::new(200.0, -95.0, -10.0);
    let axis = LinearAxis::fixed_step(&settings, 20.0, Direction::Forward).expect("valid axis");

    assert_eq!(axis.max_value(), -10.0);
    assert_eq!(axis.min_value(), -110.0);
}

#[test]
fn range_across_zero_snaps_both_bounds() {
    let settings = AxisSettings::new(300.0, -13.0, 27.0);
    let axis = LinearAxis::fixed_step(&settings, 10.0, Direction::Forward).expect("valid axis");

    assert_eq!(axis.min_value(), -20.0);
    assert_eq!(axis.max_value(), 30.0);
    assert!(
        axis.grid_points(Some(0.0))
            .iter()
            .any(|point| point.value == 0.0)
    );
}

#[test]
fn decimal_step_keeps_exact_count() {
    let settings = AxisSettings::new(300.0, 0.0, 0.3);
    let axis = LinearAxis::fixed_step(&settings, 0.1, Direction::Forward).expect("valid axis");

    assert_eq!(axis.grid_points(Some(0.0)).len(), 4);
    assert!(matches!(axis.ticks(), LinearTicks::FixedStep { .. }));
}

#[test]
fn subdivisions_follow_the_step_origin() {
    let settings = AxisSettings::new(200.0, 3.0, 23.0);
    let axis = LinearAxis::fixed_step(&settings, 5.0, Direction::Forward).expect("valid axis");

    let minors: Vec<f64> = axis
        .grid_subdivisions(1.0, 0.0, 0.0, Some(2.5))
        .iter()
        .map(|point| point.value)
        .collect();
    assert_eq!(minors, vec![5.5, 10.5, 15.5, 20.5]);
}

#[test]
fn non_positive_step_is_an_invalid_division() {
    let settings = AxisSettings::new(300.0, 0.0, 50.0);
    assert!(matches!(
        LinearAxis::fixed_step(&settings, 0.0, Direction::Forward),
        Err(AxisError::InvalidDivision(_))
    ));
    assert!(matches!(
        LinearAxis::fixed_step(&settings, f64::NAN, Direction::Forward),
        Err(AxisError::InvalidDivision(_))
    ));
}
