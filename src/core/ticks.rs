use ordered_float::OrderedFloat;

use crate::error::{AxisError, AxisResult};

/// Sorts caller-supplied ticks and keeps the distinct values inside
/// `[min, max]`.
pub fn normalize_ticks(ticks: &[f64], min: f64, max: f64) -> AxisResult<Vec<f64>> {
    let mut sorted = Vec::with_capacity(ticks.len());
    for &tick in ticks {
        if !tick.is_finite() {
            return Err(AxisError::InvalidParameter {
                name: "tick",
                value: tick,
            });
        }
        sorted.push(OrderedFloat(tick));
    }
    sorted.sort_unstable();
    sorted.dedup();

    let in_range: Vec<f64> = sorted
        .into_iter()
        .map(OrderedFloat::into_inner)
        .filter(|tick| *tick >= min && *tick <= max)
        .collect();
    if in_range.is_empty() {
        return Err(AxisError::NoTicksInRange { min, max });
    }
    Ok(in_range)
}

/// Smallest gap between consecutive sorted ticks.
pub(crate) fn min_gap(ticks: &[f64]) -> Option<f64> {
    ticks
        .windows(2)
        .map(|pair| pair[1] - pair[0])
        .filter(|gap| *gap > 0.0)
        .min_by(f64::total_cmp)
}
