use crate::core::axis::{AxisScale, AxisSettings, Direction};
use crate::core::grid_point::GridPoint;
use crate::core::scale::LinearAxis;
use crate::error::{AxisError, AxisResult};

/// Double-ended axis: magnitudes grow both ways from a centre line.
///
/// One half of the length carries a normal linear scale over `[min, max]`;
/// the other half is its reflection. Negative values map to the mirrored
/// side.
#[derive(Debug, Clone)]
pub struct MirroredAxis {
    inner: LinearAxis,
    half: f64,
    direction: Direction,
}

impl MirroredAxis {
    pub fn calculated(settings: &AxisSettings, direction: Direction) -> AxisResult<Self> {
        let half_settings = Self::half_settings(settings)?;
        let inner = LinearAxis::calculated(&half_settings, Direction::Forward)?;
        Ok(Self::around(inner, half_settings.length, direction))
    }

    pub fn fixed_step(settings: &AxisSettings, step: f64, direction: Direction) -> AxisResult<Self> {
        let half_settings = Self::half_settings(settings)?;
        let inner = LinearAxis::fixed_step(&half_settings, step, Direction::Forward)?;
        Ok(Self::around(inner, half_settings.length, direction))
    }

    fn half_settings(settings: &AxisSettings) -> AxisResult<AxisSettings> {
        if settings.min_value < 0.0 {
            return Err(AxisError::NegativeDoubleEnded {
                min: settings.min_value,
            });
        }
        let mut half = settings.clone();
        half.length = settings.length / 2.0;
        Ok(half)
    }

    fn around(inner: LinearAxis, half: f64, direction: Direction) -> Self {
        Self {
            inner,
            half,
            direction,
        }
    }

    /// The one-sided scale both halves are drawn from.
    #[must_use]
    pub fn inner(&self) -> &LinearAxis {
        &self.inner
    }

    fn reflect(&self, start: f64, points: Vec<GridPoint>) -> Vec<GridPoint> {
        let sign = self.direction.sign();
        let mut mirrored = Vec::with_capacity(points.len() * 2);
        for point in points {
            if point.value != 0.0 {
                let mut reflection = point.clone();
                reflection.position = start + sign * (self.half - point.position);
                reflection.value = -point.value;
                mirrored.push(reflection);
            }
            let mut original = point;
            original.position = start + sign * (self.half + original.position);
            mirrored.push(original);
        }
        self.direction.sort(&mut mirrored);
        mirrored
    }
}

impl AxisScale for MirroredAxis {
    fn position(&self, value: f64) -> Option<f64> {
        let magnitude = self.inner.position(value.abs())?;
        Some(if value < 0.0 {
            self.half - magnitude
        } else {
            self.half + magnitude
        })
    }

    fn unit(&self) -> f64 {
        self.inner.unit()
    }

    /// Centre line offset.
    fn zero(&self) -> f64 {
        self.half
    }

    fn length(&self) -> f64 {
        self.half * 2.0
    }

    fn direction(&self) -> Direction {
        self.direction
    }

    fn grid_points(&self, start: Option<f64>) -> Vec<GridPoint> {
        let Some(start) = start else {
            return Vec::new();
        };
        self.reflect(start, self.inner.grid_points(Some(0.0)))
    }

    fn grid_subdivisions(
        &self,
        min_space: f64,
        min_unit: f64,
        start: f64,
        fixed: Option<f64>,
    ) -> Vec<GridPoint> {
        let inner = self
            .inner
            .grid_subdivisions(min_space, min_unit, 0.0, fixed);
        self.reflect(start, inner)
    }
}
