use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    Axis, AxisSettings, DateTimeAxis, Direction, LinearAxis, LogAxis, MirroredAxis,
    normalize_ticks,
};
use crate::error::{AxisError, AxisResult};

use super::factory::tight_ticks;

/// Axis variant plus the data it needs, as chosen by the factory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AxisKind {
    DateTimeTicks(Vec<f64>),
    DateTime,
    LogTicks { base: f64, ticks: Vec<f64> },
    Log { base: f64, divisions: Option<u32> },
    FixedTicks(Vec<f64>),
    /// Tick list derived from the data range, then used as fixed ticks.
    Tight { division: Option<f64> },
    FixedStep(f64),
    Calculated,
}

impl AxisKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::DateTimeTicks(_) => "datetime-ticks",
            Self::DateTime => "datetime",
            Self::LogTicks { .. } => "log-ticks",
            Self::Log { .. } => "log",
            Self::FixedTicks(_) => "fixed-ticks",
            Self::Tight { .. } => "tight",
            Self::FixedStep(_) => "fixed-step",
            Self::Calculated => "calculated",
        }
    }
}

/// Builds one axis: settings and kind first, then the `bar`, `reverse` and
/// `double_ended` flags, then [`AxisBuilder::build`].
///
/// The bar extension lands on the working maximum before any scaling is
/// computed; the direction is applied last. Log axes ignore `bar`.
#[derive(Debug, Clone)]
pub struct AxisBuilder {
    settings: AxisSettings,
    kind: AxisKind,
    bar: bool,
    reverse: bool,
    double_ended: bool,
    levels: usize,
}

impl AxisBuilder {
    #[must_use]
    pub fn new(settings: AxisSettings, kind: AxisKind) -> Self {
        Self {
            settings,
            kind,
            bar: false,
            reverse: false,
            double_ended: false,
            levels: 1,
        }
    }

    /// Adds one `min_unit` after the maximum so the last bar has room.
    #[must_use]
    pub fn bar(mut self, bar: bool) -> Self {
        self.bar = bar;
        self
    }

    #[must_use]
    pub fn reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    /// Mirrors the axis around its centre. Only calculated and fixed-step
    /// axes can be mirrored.
    #[must_use]
    pub fn double_ended(mut self, double_ended: bool) -> Self {
        self.double_ended = double_ended;
        self
    }

    /// Label rows on date/time axes.
    #[must_use]
    pub fn levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    pub fn build(self) -> AxisResult<Axis> {
        let direction = if self.reverse {
            Direction::Reverse
        } else {
            Direction::Forward
        };
        let working = if self.bar {
            self.settings.extended_for_bar()
        } else {
            self.settings.clone()
        };
        debug!(
            kind = self.kind.name(),
            bar = self.bar,
            reverse = self.reverse,
            double_ended = self.double_ended,
            "building axis"
        );

        if self.double_ended {
            return match self.kind {
                AxisKind::Calculated => {
                    MirroredAxis::calculated(&working, direction).map(Axis::from)
                }
                AxisKind::FixedStep(step) => {
                    MirroredAxis::fixed_step(&working, step, direction).map(Axis::from)
                }
                other => Err(AxisError::UnsupportedDoubleEnded { kind: other.name() }),
            };
        }

        let axis: Axis = match &self.kind {
            AxisKind::Calculated => LinearAxis::calculated(&working, direction)?.into(),
            AxisKind::FixedStep(step) => LinearAxis::fixed_step(&working, *step, direction)?.into(),
            AxisKind::FixedTicks(ticks) => {
                let ticks = self.in_data_range(&working, ticks)?;
                LinearAxis::explicit_ticks(&working, &ticks, direction)?.into()
            }
            AxisKind::Tight { division } => {
                let ticks = tight_ticks(&self.settings, *division, self.bar, self.reverse)?;
                let ticks = self.in_data_range(&working, &ticks)?;
                LinearAxis::explicit_ticks(&working, &ticks, direction)?.into()
            }
            AxisKind::Log { base, divisions } => {
                LogAxis::calculated(&self.settings, *base, *divisions, direction)?.into()
            }
            AxisKind::LogTicks { base, ticks } => {
                LogAxis::explicit_ticks(&self.settings, *base, ticks, direction)?.into()
            }
            AxisKind::DateTime => DateTimeAxis::calculated(&working, self.levels, direction)?.into(),
            AxisKind::DateTimeTicks(ticks) => {
                let ticks = self.in_data_range(&working, ticks)?;
                DateTimeAxis::explicit_ticks(&working, &ticks, self.levels, direction)?.into()
            }
        };
        Ok(axis)
    }

    /// Ticks are filtered against the data bounds, not the bar-extended ones.
    /// The range check uses the working bounds, so a single bar category
    /// (`min == max`) is still a valid axis.
    fn in_data_range(&self, working: &AxisSettings, ticks: &[f64]) -> AxisResult<Vec<f64>> {
        working.validate()?;
        normalize_ticks(ticks, self.settings.min_value, self.settings.max_value)
    }
}
