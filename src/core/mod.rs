pub mod axis;
pub mod calendar;
pub(crate) mod division;
pub mod grid_point;
pub mod label;
pub mod log_scale;
pub mod mirror;
pub mod scale;
pub mod ticks;
pub mod time_scale;

pub use axis::{Axis, AxisScale, AxisSettings, DEFAULT_MIN_SPACE, Direction};
pub use calendar::{CalendarStep, CalendarUnit, parse_datetime};
pub use grid_point::GridPoint;
pub use label::{LabelCallback, LabelFormatter};
pub use log_scale::LogAxis;
pub use mirror::MirroredAxis;
pub use scale::{LinearAxis, LinearTicks};
pub use ticks::normalize_ticks;
pub use time_scale::DateTimeAxis;
