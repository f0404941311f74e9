mod builder;
mod factory;
mod json_contract;

pub use builder::{AxisBuilder, AxisKind};
pub use factory::{AxisFactory, AxisRequest, TickList, tight_ticks};
pub use json_contract::{AXIS_CONFIG_JSON_SCHEMA_V1, AxisConfig, AxisConfigJsonContractV1};
