use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::division::{is_integral, leading_decimals, step_decimals};

/// Digits past the first significant one for steps with no short decimal form.
const FALLBACK_EXTRA_DECIMALS: usize = 6;

/// Replaces the built-in label text for a tick value.
pub type LabelCallback = Arc<dyn Fn(f64) -> String + Send + Sync>;

/// Turns tick values into label text.
///
/// Resolution order: the callback if set, then category keys if set, then
/// `units_before + number + units_after`.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct LabelFormatter {
    #[serde(default)]
    pub units_before: String,
    #[serde(default)]
    pub units_after: String,
    /// Fixed number of decimals; derived from the tick step when `None`.
    #[serde(default)]
    pub decimal_digits: Option<usize>,
    #[serde(skip)]
    callback: Option<LabelCallback>,
    #[serde(skip)]
    keys: Option<Arc<[String]>>,
}

impl fmt::Debug for LabelFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFormatter")
            .field("units_before", &self.units_before)
            .field("units_after", &self.units_after)
            .field("decimal_digits", &self.decimal_digits)
            .field("callback", &self.callback.as_ref().map(|_| "<fn>"))
            .field("keys", &self.keys.as_ref().map(|keys| keys.len()))
            .finish()
    }
}

impl LabelFormatter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_units(mut self, before: impl Into<String>, after: impl Into<String>) -> Self {
        self.units_before = before.into();
        self.units_after = after.into();
        self
    }

    #[must_use]
    pub fn with_decimal_digits(mut self, digits: Option<usize>) -> Self {
        self.decimal_digits = digits;
        self
    }

    #[must_use]
    pub fn with_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn(f64) -> String + Send + Sync + 'static,
    {
        self.callback = Some(Arc::new(callback));
        self
    }

    /// Labels integral tick values with the chart's category keys.
    #[must_use]
    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Text for `value` on an axis whose ticks are `step` apart.
    #[must_use]
    pub fn format(&self, value: f64, step: f64) -> String {
        if let Some(callback) = &self.callback {
            return callback(value);
        }
        if let Some(keys) = &self.keys {
            return key_at(keys, value).unwrap_or_default().to_owned();
        }

        let number = match self.decimal_digits {
            Some(precision) => strip_negative_zero(format!("{value:.precision$}")),
            None => {
                let precision = precision_from_step(step);
                trim_decimal(format!("{value:.precision$}"))
            }
        };
        format!("{}{}{}", self.units_before, number, self.units_after)
    }
}

fn key_at(keys: &[String], value: f64) -> Option<&str> {
    if !is_integral(value) || value < -0.5 {
        return None;
    }
    keys.get(value.round() as usize).map(String::as_str)
}

fn precision_from_step(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 2;
    }
    step_decimals(step).unwrap_or_else(|| leading_decimals(step) + FALLBACK_EXTRA_DECIMALS)
}

fn trim_decimal(mut text: String) -> String {
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').len();
        text.truncate(trimmed);
        if text.ends_with('.') {
            text.pop();
        }
    }
    strip_negative_zero(text)
}

fn strip_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|ch| ch == '0' || ch == '.') => rest.to_owned(),
        _ => text,
    }
}
