use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

const SECONDS_PER_DAY: i64 = 86_400;

/// Calendar unit a date/time division is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CalendarUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl CalendarUnit {
    /// Average length in seconds (months and years vary).
    #[must_use]
    pub fn approx_seconds(self) -> f64 {
        match self {
            Self::Second => 1.0,
            Self::Minute => 60.0,
            Self::Hour => 3_600.0,
            Self::Day => 86_400.0,
            Self::Week => 604_800.0,
            Self::Month => 2_629_746.0,
            Self::Year => 31_556_952.0,
        }
    }

    /// `strftime` patterns per label level, innermost first.
    pub(crate) fn label_formats(self) -> &'static [&'static str] {
        match self {
            Self::Second => &["%H:%M:%S", "%Y-%m-%d"],
            Self::Minute | Self::Hour => &["%H:%M", "%Y-%m-%d"],
            Self::Day | Self::Week => &["%d", "%b", "%Y"],
            Self::Month => &["%b", "%Y"],
            Self::Year => &["%Y"],
        }
    }
}

/// `count` whole calendar units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarStep {
    pub unit: CalendarUnit,
    pub count: u32,
}

const fn step(unit: CalendarUnit, count: u32) -> CalendarStep {
    CalendarStep { unit, count }
}

/// Candidate divisions, finest first.
pub const CALENDAR_STEPS: &[CalendarStep] = &[
    step(CalendarUnit::Second, 1),
    step(CalendarUnit::Second, 2),
    step(CalendarUnit::Second, 5),
    step(CalendarUnit::Second, 10),
    step(CalendarUnit::Second, 15),
    step(CalendarUnit::Second, 30),
    step(CalendarUnit::Minute, 1),
    step(CalendarUnit::Minute, 2),
    step(CalendarUnit::Minute, 5),
    step(CalendarUnit::Minute, 10),
    step(CalendarUnit::Minute, 15),
    step(CalendarUnit::Minute, 30),
    step(CalendarUnit::Hour, 1),
    step(CalendarUnit::Hour, 2),
    step(CalendarUnit::Hour, 3),
    step(CalendarUnit::Hour, 6),
    step(CalendarUnit::Hour, 12),
    step(CalendarUnit::Day, 1),
    step(CalendarUnit::Day, 2),
    step(CalendarUnit::Week, 1),
    step(CalendarUnit::Month, 1),
    step(CalendarUnit::Month, 2),
    step(CalendarUnit::Month, 3),
    step(CalendarUnit::Month, 6),
    step(CalendarUnit::Year, 1),
    step(CalendarUnit::Year, 2),
    step(CalendarUnit::Year, 5),
    step(CalendarUnit::Year, 10),
    step(CalendarUnit::Year, 20),
    step(CalendarUnit::Year, 50),
    step(CalendarUnit::Year, 100),
    step(CalendarUnit::Year, 200),
    step(CalendarUnit::Year, 500),
    step(CalendarUnit::Year, 1000),
];

impl CalendarStep {
    #[must_use]
    pub fn approx_seconds(self) -> f64 {
        self.unit.approx_seconds() * f64::from(self.count)
    }

    /// Unit of the longest step that fits in `gap` (with 10% slack for
    /// short months).
    pub(crate) fn unit_for_gap(gap: f64) -> CalendarUnit {
        CALENDAR_STEPS
            .iter()
            .rev()
            .find(|candidate| candidate.approx_seconds() <= gap * 1.1)
            .map_or(CalendarUnit::Second, |candidate| candidate.unit)
    }

    /// Latest step boundary at or before `time`.
    pub(crate) fn floor(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let count = i64::from(self.count);
        let seconds = time.timestamp();
        match self.unit {
            CalendarUnit::Second => DateTime::from_timestamp(seconds - seconds.rem_euclid(count), 0),
            CalendarUnit::Minute => {
                DateTime::from_timestamp(seconds - seconds.rem_euclid(60 * count), 0)
            }
            CalendarUnit::Hour => {
                DateTime::from_timestamp(seconds - seconds.rem_euclid(3_600 * count), 0)
            }
            CalendarUnit::Day => DateTime::from_timestamp(
                seconds - seconds.rem_euclid(SECONDS_PER_DAY * count),
                0,
            ),
            CalendarUnit::Week => {
                let days = seconds.div_euclid(SECONDS_PER_DAY);
                // 1970-01-01 was a Thursday
                let monday = days - (days + 3).rem_euclid(7 * count);
                DateTime::from_timestamp(monday * SECONDS_PER_DAY, 0)
            }
            CalendarUnit::Month => {
                let months = i64::from(time.year()) * 12 + i64::from(time.month0());
                let floored = months - months.rem_euclid(count);
                let year = i32::try_from(floored.div_euclid(12)).ok()?;
                let month = u32::try_from(floored.rem_euclid(12)).ok()? + 1;
                start_of_month(year, month)
            }
            CalendarUnit::Year => {
                let year = time.year();
                start_of_month(year - year.rem_euclid(self.count as i32), 1)
            }
        }
    }

    /// Earliest step boundary at or after `time`.
    pub(crate) fn ceil(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let floored = self.floor(time)?;
        if floored < time {
            self.advance(floored)
        } else {
            Some(floored)
        }
    }

    pub(crate) fn advance(self, time: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let count = i64::from(self.count);
        match self.unit {
            CalendarUnit::Month => time.checked_add_months(Months::new(self.count)),
            CalendarUnit::Year => time.checked_add_months(Months::new(self.count.checked_mul(12)?)),
            CalendarUnit::Second
            | CalendarUnit::Minute
            | CalendarUnit::Hour
            | CalendarUnit::Day
            | CalendarUnit::Week => {
                let seconds = self.unit.approx_seconds() as i64 * count;
                time.checked_add_signed(TimeDelta::try_seconds(seconds)?)
            }
        }
    }
}

fn start_of_month(year: i32, month: u32) -> Option<DateTime<Utc>> {
    NaiveDate::from_ymd_opt(year, month, 1)?
        .and_hms_opt(0, 0, 0)
        .map(|naive| naive.and_utc())
}

#[must_use]
pub fn datetime_to_unix_seconds(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64 / 1000.0
}

#[must_use]
pub fn unix_seconds_to_datetime(seconds: f64) -> Option<DateTime<Utc>> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = (seconds * 1000.0).round();
    if millis > i64::MAX as f64 || millis < i64::MIN as f64 {
        return None;
    }
    DateTime::from_timestamp_millis(millis as i64)
}

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Converts a date/time string into a unix timestamp in seconds.
///
/// Accepts RFC 3339, `YYYY-MM-DD[ HH:MM[:SS]]`, `YYYY-MM-DDTHH:MM:SS` (all
/// read as UTC) and bare numeric timestamps.
pub fn parse_datetime(text: &str) -> AxisResult<f64> {
    let trimmed = text.trim();
    if let Ok(seconds) = trimmed.parse::<f64>() {
        if seconds.is_finite() {
            return Ok(seconds);
        }
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime_to_unix_seconds(time.with_timezone(&Utc)));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(datetime_to_unix_seconds(naive.and_utc()));
        }
    }
    if let Some(naive) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(datetime_to_unix_seconds(naive.and_utc()));
    }
    Err(AxisError::InvalidDateTime(text.to_owned()))
}
