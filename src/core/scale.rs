use crate::core::axis::{AxisScale, AxisSettings, Direction};
use crate::core::division::{
    Division, MAX_GRID_POINTS, TOLERANCE, calculated_division, fixed_step_division,
    minor_values, multiples_within, subdivision_step,
};
use crate::core::grid_point::GridPoint;
use crate::core::label::LabelFormatter;
use crate::core::ticks::{min_gap, normalize_ticks};
use crate::error::AxisResult;

/// Where the major ticks of a linear axis come from.
#[derive(Debug, Clone, PartialEq)]
pub enum LinearTicks {
    /// Nice divisions sized to the minimum spacing.
    Calculated,
    /// Caller-fixed step; keeps the unadjusted data bounds.
    FixedStep { original_min: f64, original_max: f64 },
    /// Caller-supplied ticks, sorted and filtered to the range.
    Explicit(Vec<f64>),
}

impl LinearTicks {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Calculated => "calculated",
            Self::FixedStep { .. } => "fixed-step",
            Self::Explicit(_) => "fixed-ticks",
        }
    }
}

/// Linear value-to-pixel scale.
#[derive(Debug, Clone)]
pub struct LinearAxis {
    length: f64,
    min_value: f64,
    max_value: f64,
    step: f64,
    unit_size: f64,
    zero: f64,
    direction: Direction,
    ticks: LinearTicks,
    labels: LabelFormatter,
}

impl LinearAxis {
    /// Scale with nice divisions at least `min_space` pixels apart.
    pub fn calculated(settings: &AxisSettings, direction: Direction) -> AxisResult<Self> {
        settings.validate()?;
        let division = calculated_division(
            settings.min_value,
            settings.max_value,
            settings.length,
            settings.min_space,
            settings.min_unit,
            settings.fit,
        );
        Ok(Self::from_division(
            settings,
            division,
            direction,
            LinearTicks::Calculated,
        ))
    }

    /// Scale divided every `step` data units.
    pub fn fixed_step(settings: &AxisSettings, step: f64, direction: Direction) -> AxisResult<Self> {
        settings.validate()?;
        let division = fixed_step_division(settings.min_value, settings.max_value, step)?;
        Ok(Self::from_division(
            settings,
            division,
            direction,
            LinearTicks::FixedStep {
                original_min: settings.min_value,
                original_max: settings.max_value,
            },
        ))
    }

    /// Scale whose major ticks are exactly `ticks` (those inside the range).
    ///
    /// The pixel mapping comes from a calculated scale with unit spacing and
    /// no fitting; the tick list decides where gridlines go.
    pub fn explicit_ticks(
        settings: &AxisSettings,
        ticks: &[f64],
        direction: Direction,
    ) -> AxisResult<Self> {
        settings.validate()?;
        let ticks = normalize_ticks(ticks, settings.min_value, settings.max_value)?;
        let base = AxisSettings {
            min_unit: 1.0,
            min_space: 1.0,
            fit: false,
            ..settings.clone()
        };
        let division = calculated_division(
            base.min_value,
            base.max_value,
            base.length,
            base.min_space,
            base.min_unit,
            base.fit,
        );
        Ok(Self::from_division(
            settings,
            division,
            direction,
            LinearTicks::Explicit(ticks),
        ))
    }

    fn from_division(
        settings: &AxisSettings,
        division: Division,
        direction: Direction,
        ticks: LinearTicks,
    ) -> Self {
        let unit_size = settings.length / (division.max - division.min);
        Self {
            length: settings.length,
            min_value: division.min,
            max_value: division.max,
            step: division.step,
            unit_size,
            zero: -division.min * unit_size,
            direction,
            ticks,
            labels: settings.labels.clone(),
        }
    }

    /// Working lower bound after padding or snapping.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Working upper bound after padding, snapping or bar extension.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Data size of one major division.
    #[must_use]
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Pixel size of one major division.
    #[must_use]
    pub fn division_spacing(&self) -> f64 {
        self.step * self.unit_size
    }

    /// Number of major divisions between the working bounds.
    #[must_use]
    pub fn division_count(&self) -> f64 {
        (self.max_value - self.min_value) / self.step
    }

    #[must_use]
    pub fn ticks(&self) -> &LinearTicks {
        &self.ticks
    }

    /// Data bounds before any step snapping.
    #[must_use]
    pub fn original_bounds(&self) -> Option<(f64, f64)> {
        match self.ticks {
            LinearTicks::FixedStep {
                original_min,
                original_max,
            } => Some((original_min, original_max)),
            _ => None,
        }
    }

    fn offset(&self, value: f64) -> f64 {
        self.zero + value * self.unit_size
    }

    fn major_values(&self) -> Vec<f64> {
        match &self.ticks {
            LinearTicks::Calculated => multiples_within(self.min_value, self.max_value, self.step),
            LinearTicks::FixedStep { .. } => {
                let count = self.division_count().round() as usize;
                (0..=count.min(MAX_GRID_POINTS))
                    .map(|index| self.min_value + index as f64 * self.step)
                    .collect()
            }
            LinearTicks::Explicit(ticks) => ticks.clone(),
        }
    }

    fn minor_values(&self, min_space: f64, min_unit: f64, fixed: Option<f64>) -> Vec<f64> {
        match &self.ticks {
            LinearTicks::Explicit(ticks) => {
                let Some(sub) = fixed.filter(|sub| sub.is_finite() && *sub > 0.0) else {
                    return Vec::new();
                };
                multiples_within(self.min_value, self.max_value, sub)
                    .into_iter()
                    .filter(|value| {
                        !ticks
                            .iter()
                            .any(|tick| (tick - value).abs() <= sub * TOLERANCE)
                    })
                    .collect()
            }
            LinearTicks::Calculated | LinearTicks::FixedStep { .. } => {
                let Some(sub) =
                    subdivision_step(self.step, self.unit_size, min_space, min_unit, fixed)
                else {
                    return Vec::new();
                };
                let origin = match self.ticks {
                    LinearTicks::FixedStep { .. } => self.min_value,
                    _ => 0.0,
                };
                minor_values(origin, self.step, sub, self.min_value, self.max_value)
            }
        }
    }
}

impl AxisScale for LinearAxis {
    fn position(&self, value: f64) -> Option<f64> {
        value.is_finite().then(|| self.offset(value))
    }

    fn unit(&self) -> f64 {
        self.unit_size
    }

    fn zero(&self) -> f64 {
        self.zero
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
        let sign = self.direction.sign();
        let label_step = match &self.ticks {
            LinearTicks::Explicit(ticks) => min_gap(ticks).unwrap_or(self.step),
            _ => self.step,
        };

        let mut points: Vec<GridPoint> = self
            .major_values()
            .into_iter()
            .map(|value| {
                GridPoint::new(
                    start + sign * self.offset(value),
                    value,
                    self.labels.format(value, label_step),
                )
            })
            .collect();
        self.direction.sort(&mut points);
        points
    }

    fn grid_subdivisions(
        &self,
        min_space: f64,
        min_unit: f64,
        start: f64,
        fixed: Option<f64>,
    ) -> Vec<GridPoint> {
        let sign = self.direction.sign();
        let mut points: Vec<GridPoint> = self
            .minor_values(min_space, min_unit, fixed)
            .into_iter()
            .map(|value| GridPoint::unlabelled(start + sign * self.offset(value), value))
            .collect();
        self.direction.sort(&mut points);
        points
    }
}
