use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::division::{MAX_GRID_POINTS, TOLERANCE, is_integral, round_to_step};
use crate::core::{
    Axis, AxisScale, AxisSettings, DEFAULT_MIN_SPACE, LabelFormatter, parse_datetime,
};
use crate::error::{AxisError, AxisResult};

use super::builder::{AxisBuilder, AxisKind};

/// Step multipliers tried when the natural step is too coarse, largest first.
const TIGHT_MULTIPLIERS: [f64; 4] = [0.5, 0.25, 0.2, 0.1];

/// Caller-supplied tick list: numbers, or text parsed per axis kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TickList {
    Values(Vec<f64>),
    Text(Vec<String>),
}

impl TickList {
    /// Numeric ticks. Text is read as date/time on calendar axes and as
    /// decimal numbers otherwise; one bad entry fails the whole list.
    pub fn resolve(&self, datetime: bool) -> AxisResult<Vec<f64>> {
        match self {
            Self::Values(values) => Ok(values.clone()),
            Self::Text(texts) if datetime => texts.iter().map(|text| parse_datetime(text)).collect(),
            Self::Text(texts) => texts
                .iter()
                .map(|text| {
                    text.trim()
                        .parse::<f64>()
                        .map_err(|_| AxisError::InvalidConfig(format!("invalid tick {text:?}")))
                })
                .collect(),
        }
    }
}

/// Per-axis primitives handed to [`AxisFactory::get`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisRequest {
    pub length: f64,
    pub min_value: f64,
    pub max_value: f64,
    #[serde(default)]
    pub min_unit: f64,
    #[serde(default = "default_min_space")]
    pub min_space: f64,
    /// Fixed step, or the explicit sub-division count on log axes.
    #[serde(default)]
    pub grid_division: Option<f64>,
    #[serde(default)]
    pub labels: LabelFormatter,
    #[serde(default)]
    pub log: bool,
    #[serde(default = "default_log_base")]
    pub log_base: f64,
    #[serde(default = "default_levels")]
    pub levels: usize,
    #[serde(default)]
    pub ticks: Option<TickList>,
}

fn default_min_space() -> f64 {
    DEFAULT_MIN_SPACE
}

fn default_log_base() -> f64 {
    10.0
}

fn default_levels() -> usize {
    1
}

impl AxisRequest {
    #[must_use]
    pub fn new(length: f64, min_value: f64, max_value: f64) -> Self {
        Self {
            length,
            min_value,
            max_value,
            min_unit: 0.0,
            min_space: default_min_space(),
            grid_division: None,
            labels: LabelFormatter::default(),
            log: false,
            log_base: default_log_base(),
            levels: default_levels(),
            ticks: None,
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
    pub fn with_grid_division(mut self, division: f64) -> Self {
        self.grid_division = Some(division);
        self
    }

    #[must_use]
    pub fn with_labels(mut self, labels: LabelFormatter) -> Self {
        self.labels = labels;
        self
    }

    #[must_use]
    pub fn with_log(mut self, base: f64) -> Self {
        self.log = true;
        self.log_base = base;
        self
    }

    #[must_use]
    pub fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    #[must_use]
    pub fn with_ticks(mut self, ticks: TickList) -> Self {
        self.ticks = Some(ticks);
        self
    }

    #[must_use]
    pub fn settings(&self, fit: bool) -> AxisSettings {
        AxisSettings::new(self.length, self.min_value, self.max_value)
            .with_min_unit(self.min_unit)
            .with_min_space(self.min_space)
            .with_fit(fit)
            .with_labels(self.labels.clone())
    }

    fn step_division(&self) -> AxisResult<Option<f64>> {
        match self.grid_division {
            Some(division) if !division.is_finite() || division <= 0.0 => {
                Err(AxisError::InvalidDivision(division))
            }
            other => Ok(other),
        }
    }

    fn log_divisions(&self) -> AxisResult<Option<u32>> {
        match self.step_division()? {
            Some(division) if !is_integral(division) || division > f64::from(u32::MAX) => {
                Err(AxisError::InvalidDivision(division))
            }
            Some(division) => Ok(Some(division.round() as u32)),
            None => Ok(None),
        }
    }
}

/// Chooses and builds the axis for one chart dimension.
///
/// The flags are the per-chart part of the configuration; everything that
/// varies per axis comes in an [`AxisRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisFactory {
    pub datetime: bool,
    pub fit: bool,
    pub bar: bool,
    pub reverse: bool,
    pub double_ended: bool,
    /// Positive values request tight ticks on fitted axes.
    pub tightness: Option<f64>,
}

impl AxisFactory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_datetime(mut self, datetime: bool) -> Self {
        self.datetime = datetime;
        self
    }

    #[must_use]
    pub fn with_fit(mut self, fit: bool) -> Self {
        self.fit = fit;
        self
    }

    #[must_use]
    pub fn with_bar(mut self, bar: bool) -> Self {
        self.bar = bar;
        self
    }

    #[must_use]
    pub fn with_reverse(mut self, reverse: bool) -> Self {
        self.reverse = reverse;
        self
    }

    #[must_use]
    pub fn with_double_ended(mut self, double_ended: bool) -> Self {
        self.double_ended = double_ended;
        self
    }

    #[must_use]
    pub fn with_tightness(mut self, tightness: Option<f64>) -> Self {
        self.tightness = tightness;
        self
    }

    fn tight(&self) -> bool {
        self.fit && self.tightness.is_some_and(|tightness| tightness > 0.0)
    }

    /// Axis kind for `request`; the first matching rule wins.
    pub fn select(&self, request: &AxisRequest) -> AxisResult<AxisKind> {
        let ticks = request
            .ticks
            .as_ref()
            .map(|ticks| ticks.resolve(self.datetime))
            .transpose()?;

        let kind = match (self.datetime, request.log, ticks) {
            (true, _, Some(ticks)) => AxisKind::DateTimeTicks(ticks),
            (true, _, None) => AxisKind::DateTime,
            (false, true, Some(ticks)) => AxisKind::LogTicks {
                base: request.log_base,
                ticks,
            },
            (false, true, None) => AxisKind::Log {
                base: request.log_base,
                divisions: request.log_divisions()?,
            },
            (false, false, Some(ticks)) => AxisKind::FixedTicks(ticks),
            (false, false, None) if self.tight() => AxisKind::Tight {
                division: request.step_division()?,
            },
            (false, false, None) => match request.step_division()? {
                Some(step) => AxisKind::FixedStep(step),
                None => AxisKind::Calculated,
            },
        };
        debug!(kind = kind.name(), datetime = self.datetime, log = request.log, "axis kind selected");
        Ok(kind)
    }

    pub fn get(&self, request: &AxisRequest) -> AxisResult<Axis> {
        let kind = self.select(request)?;
        AxisBuilder::new(request.settings(self.fit), kind)
            .bar(self.bar)
            .reverse(self.reverse)
            .double_ended(self.double_ended)
            .levels(request.levels)
            .build()
    }
}

/// Evenly spaced ticks hugging the data range.
///
/// Without a `division`, the step comes from the first two points of a
/// calculated axis over the same range. When that step is too coarse for the
/// data (fewer than two points, or a step beyond the largest magnitude) it is
/// scaled down by the first multiplier that stays under that cap, provided
/// the result still respects `min_space`. Ticks start at the step multiple at
/// or below `min_value`, are rounded to the step's decimals and end at
/// `max_value` when the last one lands on it.
pub fn tight_ticks(
    settings: &AxisSettings,
    division: Option<f64>,
    bar: bool,
    reverse: bool,
) -> AxisResult<Vec<f64>> {
    if bar {
        settings.extended_for_bar().validate()?;
    } else {
        settings.validate()?;
    }
    let (min, max) = (settings.min_value, settings.max_value);
    let span = max - min;

    let step = match division {
        Some(step) if !step.is_finite() || step <= 0.0 => {
            return Err(AxisError::InvalidDivision(step));
        }
        Some(step) => step,
        None => {
            let axis = AxisBuilder::new(settings.clone(), AxisKind::Calculated)
                .bar(bar)
                .reverse(reverse)
                .build()?;
            let points = axis.grid_points(Some(0.0));
            let natural = match points.as_slice() {
                [first, second, ..] => (first.value - second.value).abs(),
                _ => span,
            };
            let cap = min.abs().max(max.abs());
            if points.len() < 2 || natural > cap {
                shrink_step(natural, cap, span, settings.min_space / settings.length)
            } else {
                natural
            }
        }
    };

    let start = min - min % step;
    let mut ticks = Vec::new();
    for index in 0..=MAX_GRID_POINTS {
        let tick = round_to_step(start + index as f64 * step, step);
        if tick > max + step * TOLERANCE {
            break;
        }
        ticks.push(tick.min(max));
    }
    debug!(step, start, count = ticks.len(), "tight ticks");
    Ok(ticks)
}

fn shrink_step(step: f64, cap: f64, span: f64, min_fraction: f64) -> f64 {
    for multiplier in TIGHT_MULTIPLIERS {
        let candidate = step * multiplier;
        trace!(multiplier, candidate, cap, "tight step candidate");
        if candidate >= cap {
            continue;
        }
        if candidate / span >= min_fraction {
            return candidate;
        }
        break;
    }
    warn!(step, cap, "no tighter step keeps the minimum spacing");
    step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shrinking_stops_at_first_step_under_the_cap() {
        // 0.5 * 10 = 5 >= cap, 0.25 * 10 = 2.5 is under it and wide enough
        assert_eq!(shrink_step(10.0, 4.0, 4.0, 0.1), 2.5);
        // 2.5 is under the cap but too narrow; the search does not go on
        assert_eq!(shrink_step(10.0, 4.0, 4.0, 0.9), 10.0);
    }

    #[test]
    fn text_ticks_parse_as_numbers_off_calendar_axes() {
        let ticks = TickList::Text(vec!["1.5".to_owned(), " 3".to_owned()]);
        assert_eq!(ticks.resolve(false).expect("numeric ticks"), vec![1.5, 3.0]);
        let bad = TickList::Text(vec!["abc".to_owned()]);
        assert!(bad.resolve(false).is_err());
    }
}
