//! Division arithmetic shared by the linear, mirrored and calendar scales.
//!
//! Every value derived here is recomputed from integer indices (`k * step`)
//! instead of being accumulated, so repeated re-derivation of bounds does not
//! drift.

use tracing::{debug, trace};

use crate::error::{AxisError, AxisResult};

/// Tolerance used when snapping quotients to integers.
pub(crate) const TOLERANCE: f64 = 1e-9;

/// Upper bound on points produced by any single grid query.
pub(crate) const MAX_GRID_POINTS: usize = 10_000;

const NICE_STEPS: &[f64] = &[1.0, 2.0, 5.0];
const MAX_STEP_CANDIDATES: usize = 64;

/// Nearest integer when `value` is within rounding noise of it. Large
/// quotients get a few ULPs of slack on top of the absolute tolerance.
fn snap(value: f64) -> Option<f64> {
    let rounded = value.round();
    let tolerance = TOLERANCE.max(rounded.abs() * f64::EPSILON * 16.0);
    ((value - rounded).abs() <= tolerance).then_some(rounded)
}

pub(crate) fn floor_tolerant(value: f64) -> f64 {
    snap(value).unwrap_or_else(|| value.floor())
}

pub(crate) fn ceil_tolerant(value: f64) -> f64 {
    snap(value).unwrap_or_else(|| value.ceil())
}

pub(crate) fn is_integral(value: f64) -> bool {
    snap(value).is_some()
}

const MAX_EXTRA_DECIMALS: usize = 12;

/// Decimal places needed to reach the first significant digit of `step`.
pub(crate) fn leading_decimals(step: f64) -> usize {
    (-floor_tolerant(step.log10())).max(0.0) as usize
}

/// Fewest decimal places that write `step` exactly, or `None` when it has
/// no short decimal form (thirds, for instance).
pub(crate) fn step_decimals(step: f64) -> Option<usize> {
    if !step.is_finite() || step <= 0.0 {
        return None;
    }
    let leading = leading_decimals(step);
    (leading..=leading + MAX_EXTRA_DECIMALS)
        .find(|places| is_integral(step * 10f64.powi(*places as i32)))
}

/// Rounds `value` to the decimal precision of `step`, removing the drift
/// of `k * step` products such as `3 * 0.1`.
pub(crate) fn round_to_step(value: f64, step: f64) -> f64 {
    let Some(places) = step_decimals(step) else {
        return value;
    };
    let scale = 10f64.powi(places as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Walks the `1, 2, 5 x 10^k` ladder.
#[derive(Debug, Clone, Copy)]
struct NiceStepper {
    idx: usize,
    exponent: i32,
}

impl NiceStepper {
    fn at_or_above(target: f64) -> Self {
        let exponent = if target > 0.0 && target.is_finite() {
            target.log10().floor() as i32 - 1
        } else {
            0
        };
        let mut stepper = Self { idx: 0, exponent };
        while stepper.step() < target * (1.0 - TOLERANCE) {
            stepper.next_bigger();
        }
        stepper
    }

    fn step(self) -> f64 {
        let base = NICE_STEPS[self.idx];
        if self.exponent < 0 {
            base / 10f64.powi(-self.exponent)
        } else {
            base * 10f64.powi(self.exponent)
        }
    }

    fn next_bigger(&mut self) {
        self.idx += 1;
        if self.idx == NICE_STEPS.len() {
            self.idx = 0;
            self.exponent += 1;
        }
    }
}

/// Settled division of a linear range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Division {
    pub step: f64,
    pub min: f64,
    pub max: f64,
}

impl Division {
    /// Number of steps between the bounds; fractional on fitted axes.
    pub fn count(self) -> f64 {
        (self.max - self.min) / self.step
    }
}

fn padded_bounds(min: f64, max: f64, step: f64, fit: bool) -> (f64, f64) {
    if fit {
        (min, max)
    } else {
        (
            floor_tolerant(min / step) * step,
            ceil_tolerant(max / step) * step,
        )
    }
}

/// Picks the smallest nice step whose divisions are at least `min_space`
/// pixels apart.
pub(crate) fn calculated_division(
    min: f64,
    max: f64,
    length: f64,
    min_space: f64,
    min_unit: f64,
    fit: bool,
) -> Division {
    let span = max - min;
    let max_divisions = (length / min_space).floor().max(1.0);
    let target = (span / max_divisions).max(min_unit);
    let mut stepper = NiceStepper::at_or_above(target);

    for _ in 0..MAX_STEP_CANDIDATES {
        let step = stepper.step();
        let (lo, hi) = padded_bounds(min, max, step, fit);
        let division = Division {
            step,
            min: lo,
            max: hi,
        };
        let count = division.count();
        if count <= 1.0 + TOLERANCE || length / count >= min_space {
            debug!(step, min = lo, max = hi, count, "calculated division settled");
            return division;
        }
        trace!(step, count, "division too dense");
        stepper.next_bigger();
    }

    Division {
        step: span,
        min,
        max,
    }
}

/// Snaps a range outward to a caller-fixed step.
///
/// Same-sign ranges move only the bound with the larger magnitude, keeping
/// the other bound as the origin of the divisions. Ranges crossing zero snap
/// both bounds to multiples of the step so zero lands on a division.
pub(crate) fn fixed_step_division(min: f64, max: f64, step: f64) -> AxisResult<Division> {
    if !step.is_finite() || step <= 0.0 {
        return Err(AxisError::InvalidDivision(step));
    }

    let (lo, hi) = if max * min >= 0.0 {
        let steps = ceil_tolerant((max - min) / step);
        if max.abs() >= min.abs() {
            (min, min + step * steps)
        } else {
            (max - step * steps, max)
        }
    } else {
        (
            step * floor_tolerant(min / step),
            step * ceil_tolerant(max / step),
        )
    };

    if hi <= lo {
        return Err(AxisError::ZeroLength { min: lo, max: hi });
    }

    Ok(Division {
        step,
        min: lo,
        max: hi,
    })
}

/// Value step of minor ticks between divisions of `step`, or `None` when
/// the division is too narrow to split.
pub(crate) fn subdivision_step(
    step: f64,
    unit_size: f64,
    min_space: f64,
    min_unit: f64,
    fixed: Option<f64>,
) -> Option<f64> {
    if let Some(fixed) = fixed {
        return (fixed.is_finite() && fixed > 0.0).then_some(fixed);
    }
    if !step.is_finite() || step <= 0.0 || unit_size <= 0.0 {
        return None;
    }

    let grid_px = step * unit_size;
    let min_px = min_space.max(min_unit * unit_size);
    if min_px <= 0.0 {
        return None;
    }
    let max_divisions = (grid_px / min_px).floor();
    if max_divisions <= 1.0 {
        return None;
    }

    // step scaled to an integer in the hundreds
    let scaled = (100.0 * 10f64.powf(-step.log10().floor()) * step).round() as i64;
    let max_divisions = (max_divisions as i64).min(scaled);
    (2..=max_divisions)
        .rev()
        .find(|divisions| scaled % divisions == 0)
        .map(|divisions| step / divisions as f64)
}

/// `k * step` for every integer `k` with the product inside `[min, max]`.
pub(crate) fn multiples_within(min: f64, max: f64, step: f64) -> Vec<f64> {
    let first = ceil_tolerant(min / step) as i64;
    let last = floor_tolerant(max / step) as i64;
    (first..=last)
        .take(MAX_GRID_POINTS)
        .map(|k| k as f64 * step)
        .collect()
}

/// Minor tick values at `origin + j * sub` inside `[min, max]`, skipping any
/// that coincide with a major division of `step` from the same origin.
pub(crate) fn minor_values(origin: f64, step: f64, sub: f64, min: f64, max: f64) -> Vec<f64> {
    let first = ceil_tolerant((min - origin) / sub) as i64;
    let last = floor_tolerant((max - origin) / sub) as i64;
    (first..=last)
        .filter(|j| !is_integral(*j as f64 * sub / step))
        .take(MAX_GRID_POINTS)
        .map(|j| origin + j as f64 * sub)
        .collect()
}
