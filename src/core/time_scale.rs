use chrono::{DateTime, Utc};
use tracing::{debug, trace};

use crate::core::axis::{AxisScale, AxisSettings, Direction};
use crate::core::calendar::{
    CALENDAR_STEPS, CalendarStep, CalendarUnit, datetime_to_unix_seconds,
    unix_seconds_to_datetime,
};
use crate::core::division::{MAX_GRID_POINTS, multiples_within};
use crate::core::grid_point::GridPoint;
use crate::core::label::LabelFormatter;
use crate::core::ticks::{min_gap, normalize_ticks};
use crate::error::{AxisError, AxisResult};

/// Calendar-aware time axis over unix timestamps in seconds (UTC).
///
/// Major ticks fall on calendar boundaries (midnight, first of the month,
/// ...) so month and year steps have uneven pixel widths.
#[derive(Debug, Clone)]
pub struct DateTimeAxis {
    length: f64,
    min_value: f64,
    max_value: f64,
    unit_size: f64,
    zero: f64,
    step: CalendarStep,
    label_unit: CalendarUnit,
    levels: usize,
    direction: Direction,
    labels: LabelFormatter,
    ticks: Option<Vec<f64>>,
}

impl DateTimeAxis {
    /// Picks the finest calendar step that keeps ticks `min_space` apart.
    ///
    /// `levels` is the number of label rows wanted; it is reduced to what the
    /// chosen unit can show.
    pub fn calculated(
        settings: &AxisSettings,
        levels: usize,
        direction: Direction,
    ) -> AxisResult<Self> {
        settings.validate()?;
        let (min, max) = (settings.min_value, settings.max_value);
        let (step, low, high) = choose_step(settings)?;
        let unit_size = settings.length / (high - low);
        debug!(
            unit = ?step.unit,
            count = step.count,
            low,
            high,
            unit_size,
            "datetime scale settled"
        );
        trace!(min, max, "datetime data bounds");

        Ok(Self {
            length: settings.length,
            min_value: low,
            max_value: high,
            unit_size,
            zero: -low * unit_size,
            step,
            label_unit: step.unit,
            levels: levels.max(1),
            direction,
            labels: settings.labels.clone(),
            ticks: None,
        })
    }

    /// Major ticks exactly at the given timestamps, labelled with the unit
    /// matching the narrowest gap between them.
    pub fn explicit_ticks(
        settings: &AxisSettings,
        ticks: &[f64],
        levels: usize,
        direction: Direction,
    ) -> AxisResult<Self> {
        let base = AxisSettings {
            min_unit: 1.0,
            min_space: 1.0,
            fit: false,
            ..settings.clone()
        };
        let mut axis = Self::calculated(&base, levels, direction)?;
        let ticks = normalize_ticks(ticks, settings.min_value, settings.max_value)?;
        axis.label_unit = min_gap(&ticks)
            .map_or(CalendarUnit::Day, CalendarStep::unit_for_gap);
        axis.ticks = Some(ticks);
        Ok(axis)
    }

    #[must_use]
    pub fn step(&self) -> CalendarStep {
        self.step
    }

    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Label rows actually produced for each grid point.
    #[must_use]
    pub fn label_levels(&self) -> usize {
        self.levels.min(self.label_unit.label_formats().len())
    }

    fn offset(&self, value: f64) -> f64 {
        self.zero + value * self.unit_size
    }

    fn major_values(&self) -> Vec<f64> {
        match &self.ticks {
            Some(ticks) => ticks.clone(),
            None => boundaries(self.step, self.min_value, self.max_value),
        }
    }

    fn label_rows(&self, values: &[f64]) -> Vec<Vec<String>> {
        let formats = self.label_unit.label_formats();
        let levels = self.label_levels();
        let mut previous: Vec<String> = Vec::new();
        let mut rows = Vec::with_capacity(values.len());

        for &value in values {
            let Some(time) = unix_seconds_to_datetime(value) else {
                rows.push(Vec::new());
                continue;
            };
            let full: Vec<String> = formats[..levels]
                .iter()
                .map(|format| time.format(format).to_string())
                .collect();
            let mut row = Vec::with_capacity(levels);
            for (level, text) in full.iter().enumerate() {
                if level == 0 {
                    if self.labels.has_callback() {
                        row.push(self.labels.format(value, self.step.approx_seconds()));
                    } else {
                        row.push(text.clone());
                    }
                } else if previous.get(level) == Some(text) {
                    row.push(String::new());
                } else {
                    row.push(text.clone());
                }
            }
            previous = full;
            rows.push(row);
        }
        rows
    }

    fn minor_step(&self, min_space: f64, min_unit: f64) -> Option<CalendarStep> {
        let min_px = min_space.max(min_unit * self.unit_size);
        let major_seconds = self.step.approx_seconds();
        CALENDAR_STEPS
            .iter()
            .copied()
            .take_while(|candidate| candidate.approx_seconds() < major_seconds)
            .find(|candidate| candidate.approx_seconds() * self.unit_size >= min_px)
    }
}

impl AxisScale for DateTimeAxis {
    fn position(&self, value: f64) -> Option<f64> {
        value.is_finite().then(|| self.offset(value))
    }

    /// Pixels per second.
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
        let values = self.major_values();
        let rows = self.label_rows(&values);

        let mut points: Vec<GridPoint> = values
            .into_iter()
            .zip(rows)
            .map(|(value, row)| {
                GridPoint::with_levels(start + sign * self.offset(value), value, row)
            })
            .collect();
        self.direction.sort(&mut points);
        points
    }

    /// `fixed` is a step in seconds. Without it, explicit-tick axes draw no
    /// minor ticks.
    fn grid_subdivisions(
        &self,
        min_space: f64,
        min_unit: f64,
        start: f64,
        fixed: Option<f64>,
    ) -> Vec<GridPoint> {
        let minors = match fixed.filter(|step| step.is_finite() && *step > 0.0) {
            Some(step) => multiples_within(self.min_value, self.max_value, step),
            None if self.ticks.is_some() => return Vec::new(),
            None => match self.minor_step(min_space, min_unit) {
                Some(step) => boundaries(step, self.min_value, self.max_value),
                None => return Vec::new(),
            },
        };

        let mut majors: Vec<i64> = self
            .major_values()
            .into_iter()
            .map(|value| value.round() as i64)
            .collect();
        majors.sort_unstable();

        let sign = self.direction.sign();
        let mut points: Vec<GridPoint> = minors
            .into_iter()
            .filter(|value| majors.binary_search(&(value.round() as i64)).is_err())
            .map(|value| GridPoint::unlabelled(start + sign * self.offset(value), value))
            .collect();
        self.direction.sort(&mut points);
        points
    }
}

/// First candidate step whose division count fits the length, with the
/// working bounds it implies.
fn choose_step(settings: &AxisSettings) -> AxisResult<(CalendarStep, f64, f64)> {
    let (min, max) = (settings.min_value, settings.max_value);
    let (min_time, max_time) = match (unix_seconds_to_datetime(min), unix_seconds_to_datetime(max)) {
        (Some(min_time), Some(max_time)) => (min_time, max_time),
        (None, _) => {
            return Err(AxisError::InvalidParameter {
                name: "min_value",
                value: min,
            });
        }
        (_, None) => {
            return Err(AxisError::InvalidParameter {
                name: "max_value",
                value: max,
            });
        }
    };

    let mut chosen = None;
    for &candidate in CALENDAR_STEPS {
        if candidate.approx_seconds() < settings.min_unit {
            continue;
        }
        let Some((low, high)) = padded_bounds(candidate, min_time, max_time, settings.fit) else {
            continue;
        };
        if high <= low {
            continue;
        }
        let count = (high - low) / candidate.approx_seconds();
        let spacing = settings.length / count;
        trace!(unit = ?candidate.unit, count = candidate.count, spacing, "datetime step candidate");
        chosen = Some((candidate, low, high));
        if spacing >= settings.min_space {
            break;
        }
    }
    chosen.ok_or(AxisError::InvalidParameter {
        name: "min_unit",
        value: settings.min_unit,
    })
}

fn padded_bounds(
    step: CalendarStep,
    min_time: DateTime<Utc>,
    max_time: DateTime<Utc>,
    fit: bool,
) -> Option<(f64, f64)> {
    if fit {
        return Some((
            datetime_to_unix_seconds(min_time),
            datetime_to_unix_seconds(max_time),
        ));
    }
    let low = step.floor(min_time)?;
    let high = step.ceil(max_time)?;
    Some((datetime_to_unix_seconds(low), datetime_to_unix_seconds(high)))
}

/// Calendar boundaries of `step` inside `[min, max]`, ascending.
fn boundaries(step: CalendarStep, min: f64, max: f64) -> Vec<f64> {
    let (Some(min_time), Some(max_time)) =
        (unix_seconds_to_datetime(min), unix_seconds_to_datetime(max))
    else {
        return Vec::new();
    };
    let mut values = Vec::new();
    let mut current = step.ceil(min_time);
    while let Some(time) = current {
        if time > max_time || values.len() >= MAX_GRID_POINTS {
            break;
        }
        values.push(datetime_to_unix_seconds(time));
        current = step.advance(time);
    }
    values
}
