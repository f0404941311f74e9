use thiserror::Error;

pub type AxisResult<T> = Result<T, AxisError>;

/// Broad failure category of an [`AxisError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisErrorKind {
    /// Invalid construction parameters; the axis cannot exist.
    Configuration,
    /// Input text that could not be converted into a value.
    DataFormat,
}

#[derive(Debug, Error)]
pub enum AxisError {
    #[error("zero length axis (min >= max): min={min}, max={max}")]
    ZeroLength { min: f64, max: f64 },

    #[error("negative minimum on double-ended axis: min={min}")]
    NegativeDoubleEnded { min: f64 },

    #[error("zero value on log axis")]
    LogZeroValue,

    #[error("negative and positive values on log axis: min={min}, max={max}")]
    LogMixedSign { min: f64, max: f64 },

    #[error("no ticks in range: min={min}, max={max}")]
    NoTicksInRange { min: f64, max: f64 },

    #[error("invalid grid division: {0}")]
    InvalidDivision(f64),

    #[error("invalid axis parameter {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("double-ended axis is not supported for {kind} scales")]
    UnsupportedDoubleEnded { kind: &'static str },

    #[error("invalid axis config: {0}")]
    InvalidConfig(String),

    #[error("invalid date/time value: {0:?}")]
    InvalidDateTime(String),
}

impl AxisError {
    #[must_use]
    pub fn kind(&self) -> AxisErrorKind {
        match self {
            Self::InvalidDateTime(_) => AxisErrorKind::DataFormat,
            _ => AxisErrorKind::Configuration,
        }
    }
}
