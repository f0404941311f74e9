//! chart-axis: axis scaling and grid-point engine for chart renderers.
//!
//! Maps a data domain onto pixel space and decides where gridlines fall and
//! how they are labelled. Linear, fixed-step, explicit-tick, logarithmic,
//! calendar and double-ended axes all answer the same [`AxisScale`] queries.
//!
//! Construction returns an [`AxisResult`]; queries never fail and report
//! unrepresentable values as `None`.

pub mod api;
pub mod core;
pub mod error;
pub mod telemetry;

pub use api::{AxisBuilder, AxisConfig, AxisFactory, AxisKind, AxisRequest, TickList};
pub use crate::core::{Axis, AxisScale, AxisSettings, Direction, GridPoint, LabelFormatter};
pub use error::{AxisError, AxisErrorKind, AxisResult};
