use tracing::{debug, trace};

use crate::core::axis::{AxisScale, AxisSettings, Direction};
use crate::core::division::{TOLERANCE, ceil_tolerant, floor_tolerant, is_integral};
use crate::core::grid_point::GridPoint;
use crate::core::label::LabelFormatter;
use crate::core::ticks::normalize_ticks;
use crate::error::{AxisError, AxisResult};

/// Logarithmic scale over whole powers of `base`.
///
/// All-negative domains are handled on magnitudes and laid out from the far
/// end, so larger values still sit further along the axis.
#[derive(Debug, Clone)]
pub struct LogAxis {
    length: f64,
    base: f64,
    lgmin: i32,
    lgmax: i32,
    lgmul: f64,
    negative: bool,
    divisions: Option<u32>,
    min_space: f64,
    direction: Direction,
    labels: LabelFormatter,
    ticks: Option<Vec<f64>>,
}

impl LogAxis {
    /// Powers of the base plus sub-divisions where space allows.
    ///
    /// `divisions` asks for a specific number of parts per power; the search
    /// only uses counts that divide it.
    pub fn calculated(
        settings: &AxisSettings,
        base: f64,
        divisions: Option<u32>,
        direction: Direction,
    ) -> AxisResult<Self> {
        Self::build(settings, base, divisions, direction)
    }

    pub fn explicit_ticks(
        settings: &AxisSettings,
        base: f64,
        ticks: &[f64],
        direction: Direction,
    ) -> AxisResult<Self> {
        let base_settings = AxisSettings {
            min_unit: 1.0,
            min_space: 1.0,
            fit: false,
            ..settings.clone()
        };
        let mut axis = Self::build(&base_settings, base, None, direction)?;
        axis.ticks = Some(normalize_ticks(
            ticks,
            settings.min_value,
            settings.max_value,
        )?);
        Ok(axis)
    }

    fn build(
        settings: &AxisSettings,
        base: f64,
        divisions: Option<u32>,
        direction: Direction,
    ) -> AxisResult<Self> {
        settings.validate_inputs()?;
        if !base.is_finite() || base <= 1.0 {
            return Err(AxisError::InvalidParameter {
                name: "log_base",
                value: base,
            });
        }
        let (min, max) = (settings.min_value, settings.max_value);
        if min == 0.0 || max == 0.0 {
            return Err(AxisError::LogZeroValue);
        }
        if min < 0.0 && max > 0.0 {
            return Err(AxisError::LogMixedSign { min, max });
        }
        settings.ensure_range()?;

        let negative = min < 0.0;
        let (low, high) = if negative {
            (max.abs(), min.abs())
        } else {
            (min, max)
        };

        let lgmin_f = floor_tolerant(log_base(low, base));
        let lgmax_f = ceil_tolerant(log_base(high, base));
        if !lgmin_f.is_finite() || !lgmax_f.is_finite() {
            return Err(AxisError::InvalidParameter {
                name: "log_range",
                value: high,
            });
        }
        let lgmax = lgmax_f as i32;
        let mut lgmin = lgmin_f as i32;
        // same value at both ends, and a power of the base
        if lgmax <= lgmin {
            lgmin -= 1;
        }
        let lgmul = settings.length / f64::from(lgmax - lgmin);
        debug!(base, lgmin, lgmax, lgmul, negative, "log scale settled");

        Ok(Self {
            length: settings.length,
            base,
            lgmin,
            lgmax,
            lgmul,
            negative,
            divisions,
            min_space: settings.min_space,
            direction,
            labels: settings.labels.clone(),
            ticks: None,
        })
    }

    #[must_use]
    pub fn base(&self) -> f64 {
        self.base
    }

    /// Lowest and highest power of the base on the axis.
    #[must_use]
    pub fn power_range(&self) -> (i32, i32) {
        (self.lgmin, self.lgmax)
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Number of parts each power is split into by the major grid, if any.
    #[must_use]
    pub fn grid_split(&self) -> Option<u32> {
        if self.power_step() == 1 {
            self.find_division(self.min_space, self.divisions)
        } else {
            None
        }
    }

    fn power_step(&self) -> i32 {
        let decades = f64::from(self.lgmax - self.lgmin);
        let max_divisions = (self.length / self.min_space).floor().max(1.0);
        if decades > max_divisions {
            (decades / max_divisions).ceil() as i32
        } else {
            1
        }
    }

    /// Largest number of parts per power whose narrowest gap still clears
    /// `min_space`.
    ///
    /// Sub-ticks sit at `k * base / n`; the narrowest gap is always the last
    /// one, next to the following power, and it shrinks as `n` grows.
    fn find_division(&self, min_space: f64, requested: Option<u32>) -> Option<u32> {
        if !is_integral(self.base) {
            return None;
        }
        let target = requested
            .filter(|count| *count > 1)
            .unwrap_or(self.base.round() as u32);

        let mut best = None;
        for parts in 2..=target {
            if target % parts != 0 {
                continue;
            }
            let ratio = f64::from(parts) / f64::from(parts - 1);
            let gap = log_base(ratio, self.base) * self.lgmul;
            trace!(parts, gap, min_space, "log sub-division candidate");
            if gap < min_space {
                break;
            }
            best = Some(parts);
        }
        best
    }

    fn sub_multipliers(&self, parts: u32) -> impl Iterator<Item = f64> + '_ {
        (1..parts)
            .map(move |k| self.base * f64::from(k) / f64::from(parts))
            .filter(|multiplier| *multiplier > 1.0 + TOLERANCE)
    }

    fn power(&self, exponent: i32) -> f64 {
        if exponent < 0 {
            1.0 / self.base.powi(-exponent)
        } else {
            self.base.powi(exponent)
        }
    }

    fn magnitude_offset(&self, magnitude: f64) -> f64 {
        let offset = (log_base(magnitude, self.base) - f64::from(self.lgmin)) * self.lgmul;
        if self.negative {
            self.length - offset
        } else {
            offset
        }
    }

    fn signed(&self, magnitude: f64) -> f64 {
        if self.negative { -magnitude } else { magnitude }
    }

    fn labelled(&self, start: f64, magnitude: f64) -> GridPoint {
        let value = self.signed(magnitude);
        GridPoint::new(
            start + self.direction.sign() * self.magnitude_offset(magnitude),
            value,
            self.labels.format(value, magnitude),
        )
    }

    fn calculated_points(&self, start: f64) -> Vec<GridPoint> {
        let step = self.power_step();
        let split = self.grid_split();
        let mut points = Vec::new();
        let mut exponent = self.lgmin;
        while exponent <= self.lgmax {
            let power = self.power(exponent);
            points.push(self.labelled(start, power));
            if let Some(parts) = split.filter(|_| exponent < self.lgmax) {
                for multiplier in self.sub_multipliers(parts) {
                    points.push(self.labelled(start, power * multiplier));
                }
            }
            exponent += step;
        }
        points
    }
}

impl AxisScale for LogAxis {
    fn position(&self, value: f64) -> Option<f64> {
        if value == 0.0 || !value.is_finite() || (value < 0.0) != self.negative {
            return None;
        }
        let magnitude = value.abs();
        let exponent = log_base(magnitude, self.base);
        if exponent < f64::from(self.lgmin) - TOLERANCE {
            return None;
        }
        Some(self.magnitude_offset(magnitude))
    }

    /// Pixels per power of the base.
    fn unit(&self) -> f64 {
        self.lgmul
    }

    fn zero(&self) -> f64 {
        if self.negative { self.length } else { 0.0 }
    }

    fn length(&self) -> f64 {
        self.length
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn grid_points(&self, start: Option<f64>) -> Vec<GridPoint> {
        let Some(start) = start else {
            return Vec::new();
        };
        let mut points = match &self.ticks {
            Some(ticks) => ticks
                .iter()
                .filter(|tick| self.position(**tick).is_some())
                .map(|tick| self.labelled(start, tick.abs()))
                .collect(),
            None => self.calculated_points(start),
        };
        self.direction.sort(&mut points);
        points
    }

    /// Minor ticks use the same split search with the minor spacing; `fixed`
    /// is a requested part count. `min_unit` has no meaning on a log scale.
    fn grid_subdivisions(
        &self,
        min_space: f64,
        _min_unit: f64,
        start: f64,
        fixed: Option<f64>,
    ) -> Vec<GridPoint> {
        if self.ticks.is_some() || self.power_step() != 1 {
            return Vec::new();
        }
        let requested = fixed
            .filter(|count| is_integral(*count) && *count >= 2.0)
            .map(|count| count.round() as u32);
        let Some(parts) = self.find_division(min_space, requested) else {
            return Vec::new();
        };
        let major = self.grid_split();
        let sign = self.direction.sign();

        let mut points = Vec::new();
        for exponent in self.lgmin..self.lgmax {
            let power = self.power(exponent);
            for multiplier in self.sub_multipliers(parts) {
                let on_major = major.is_some_and(|major_parts| {
                    is_integral(multiplier * f64::from(major_parts) / self.base)
                });
                if on_major {
                    continue;
                }
                let magnitude = power * multiplier;
                points.push(GridPoint::unlabelled(
                    start + sign * self.magnitude_offset(magnitude),
                    self.signed(magnitude),
                ));
            }
        }
        self.direction.sort(&mut points);
        points
    }
}

/// `log_base(value)`, snapped to an integer when within rounding noise.
fn log_base(value: f64, base: f64) -> f64 {
    let raw = if base == 10.0 {
        value.log10()
    } else if base == 2.0 {
        value.log2()
    } else {
        value.ln() / base.ln()
    };
    let rounded = raw.round();
    if (raw - rounded).abs() <= 1e-10 {
        rounded
    } else {
        raw
    }
}
