use serde::{Deserialize, Serialize};

use crate::core::grid_point::GridPoint;
use crate::core::label::LabelFormatter;
use crate::core::{DateTimeAxis, LinearAxis, LogAxis, MirroredAxis};
use crate::error::{AxisError, AxisResult};

pub const DEFAULT_MIN_SPACE: f64 = 15.0;

/// Orientation of increasing values along the pixel axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Direction {
    #[default]
    Forward,
    Reverse,
}

impl Direction {
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Reverse => -1.0,
        }
    }

    /// Orders points along the physical axis: ascending pixel position when
    /// forward, descending when reversed.
    pub fn sort(self, points: &mut [GridPoint]) {
        match self {
            Self::Forward => points.sort_by(|lhs, rhs| lhs.position.total_cmp(&rhs.position)),
            Self::Reverse => points.sort_by(|lhs, rhs| rhs.position.total_cmp(&lhs.position)),
        }
    }
}

/// Primitives shared by every axis constructor.
///
/// `min_unit` is the smallest meaningful data increment and `min_space` the
/// minimum pixel gap between major ticks. `fit` keeps the bounds exactly at
/// the data instead of padding them to the next division.
#[derive(Debug, Clone)]
pub struct AxisSettings {
    pub length: f64,
    pub min_value: f64,
    pub max_value: f64,
    pub min_unit: f64,
    pub min_space: f64,
    pub fit: bool,
    pub labels: LabelFormatter,
}

impl AxisSettings {
    #[must_use]
    pub fn new(length: f64, min_value: f64, max_value: f64) -> Self {
        Self {
            length,
            min_value,
            max_value,
            min_unit: 0.0,
            min_space: DEFAULT_MIN_SPACE,
            fit: false,
            labels: LabelFormatter::default(),
        }
    }

    #[must_use]
    pub fn with_min_unit(mut self, min_unit: f64) -> Self {
        self.min_unit = min_unit;
        self
    }

    #[must_use]
    pub fn with_min_space(mut self, min_space: f64) -> Self {
        self.min_space = min_space;
        self
    }

    #[must_use]
    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: LabelFormatter) -> Self {
        self.labels = labels;
        self
    }

    /// Copy with one extra `min_unit` at the top, giving the last bar room.
    #[must_use]
    pub fn extended_for_bar(&self) -> Self {
        let mut extended = self.clone();
        extended.max_value += self.min_unit;
        extended
    }

    pub(crate) fn validate_inputs(&self) -> AxisResult<()> {
        if !self.length.is_finite() || self.length <= 0.0 {
            return Err(AxisError::InvalidParameter {
                name: "length",
                value: self.length,
            });
        }
        if !self.min_value.is_finite() {
            return Err(AxisError::InvalidParameter {
                name: "min_value",
                value: self.min_value,
            });
        }
        if !self.max_value.is_finite() {
            return Err(AxisError::InvalidParameter {
                name: "max_value",
                value: self.max_value,
            });
        }
        if !self.min_unit.is_finite() || self.min_unit < 0.0 {
            return Err(AxisError::InvalidParameter {
                name: "min_unit",
                value: self.min_unit,
            });
        }
        if !self.min_space.is_finite() || self.min_space <= 0.0 {
            return Err(AxisError::InvalidParameter {
                name: "min_space",
                value: self.min_space,
            });
        }
        Ok(())
    }

    pub(crate) fn ensure_range(&self) -> AxisResult<()> {
        if self.max_value <= self.min_value {
            return Err(AxisError::ZeroLength {
                min: self.min_value,
                max: self.max_value,
            });
        }
        Ok(())
    }

    pub(crate) fn validate(&self) -> AxisResult<()> {
        self.validate_inputs()?;
        self.ensure_range()
    }
}

/// Read contract every axis offers to chart drawing code.
///
/// All methods are queries: a built axis never changes.
pub trait AxisScale {
    /// Pixel offset of `value` from the axis start, or `None` when the value
    /// cannot be shown on this axis.
    fn position(&self, value: f64) -> Option<f64>;

    /// Pixels per data unit.
    fn unit(&self) -> f64;

    /// Pixel offset of the value zero (or of the scale origin).
    fn zero(&self) -> f64;

    fn length(&self) -> f64;

    fn direction(&self) -> Direction;

    /// Labelled major ticks at `start + direction * offset`, ordered along
    /// the physical axis. `None` yields no points.
    fn grid_points(&self, start: Option<f64>) -> Vec<GridPoint>;

    /// Unlabelled minor ticks between the major ones.
    fn grid_subdivisions(
        &self,
        min_space: f64,
        min_unit: f64,
        start: f64,
        fixed: Option<f64>,
    ) -> Vec<GridPoint>;
}

/// Any finished axis.
#[derive(Debug, Clone)]
pub enum Axis {
    Linear(LinearAxis),
    Log(LogAxis),
    DateTime(DateTimeAxis),
    Mirrored(MirroredAxis),
}

impl Axis {
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Linear(axis) => axis.ticks().name(),
            Self::Log(_) => "log",
            Self::DateTime(_) => "datetime",
            Self::Mirrored(_) => "double-ended",
        }
    }

    #[must_use]
    pub fn as_linear(&self) -> Option<&LinearAxis> {
        match self {
            Self::Linear(axis) => Some(axis),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_log(&self) -> Option<&LogAxis> {
        match self {
            Self::Log(axis) => Some(axis),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTimeAxis> {
        match self {
            Self::DateTime(axis) => Some(axis),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_mirrored(&self) -> Option<&MirroredAxis> {
        match self {
            Self::Mirrored(axis) => Some(axis),
            _ => None,
        }
    }

    fn scale(&self) -> &dyn AxisScale {
        match self {
            Self::Linear(axis) => axis,
            Self::Log(axis) => axis,
            Self::DateTime(axis) => axis,
            Self::Mirrored(axis) => axis,
        }
    }
}

impl AxisScale for Axis {
    fn position(&self, value: f64) -> Option<f64> {
        self.scale().position(value)
    }

    fn unit(&self) -> f64 {
        self.scale().unit()
    }

    fn zero(&self) -> f64 {
        self.scale().zero()
    }

    fn length(&self) -> f64 {
        self.scale().length()
    }

    fn direction(&self) -> Direction {
        self.scale().direction()
    }

    fn grid_points(&self, start: Option<f64>) -> Vec<GridPoint> {
        self.scale().grid_points(start)
    }

    fn grid_subdivisions(
        &self,
        min_space: f64,
        min_unit: f64,
        start: f64,
        fixed: Option<f64>,
    ) -> Vec<GridPoint> {
        self.scale()
            .grid_subdivisions(min_space, min_unit, start, fixed)
    }
}

impl From<LinearAxis> for Axis {
    fn from(axis: LinearAxis) -> Self {
        Self::Linear(axis)
    }
}

impl From<LogAxis> for Axis {
    fn from(axis: LogAxis) -> Self {
        Self::Log(axis)
    }
}

impl From<DateTimeAxis> for Axis {
    fn from(axis: DateTimeAxis) -> Self {
        Self::DateTime(axis)
    }
}

impl From<MirroredAxis> for Axis {
    fn from(axis: MirroredAxis) -> Self {
        Self::Mirrored(axis)
    }
}
