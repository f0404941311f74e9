use serde::{Deserialize, Serialize};

use crate::core::Axis;
use crate::error::{AxisError, AxisResult};

use super::{AxisFactory, AxisRequest};

pub const AXIS_CONFIG_JSON_SCHEMA_V1: u32 = 1;

/// Persistable axis setup: the per-chart flags plus one request.
///
/// Label callbacks and category keys are code, not data, and are not
/// serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default)]
    pub factory: AxisFactory,
    pub request: AxisRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisConfigJsonContractV1 {
    pub schema_version: u32,
    pub config: AxisConfig,
}

impl AxisConfig {
    #[must_use]
    pub fn new(factory: AxisFactory, request: AxisRequest) -> Self {
        Self { factory, request }
    }

    pub fn to_json_pretty(&self) -> AxisResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| AxisError::InvalidConfig(format!("failed to serialize axis config: {e}")))
    }

    pub fn to_json_contract_v1_pretty(&self) -> AxisResult<String> {
        let payload = AxisConfigJsonContractV1 {
            schema_version: AXIS_CONFIG_JSON_SCHEMA_V1,
            config: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            AxisError::InvalidConfig(format!("failed to serialize axis config contract v1: {e}"))
        })
    }

    /// Accepts both a bare config and a versioned contract payload.
    pub fn from_json_str(input: &str) -> AxisResult<Self> {
        if let Ok(config) = serde_json::from_str::<Self>(input) {
            return Ok(config);
        }
        let payload: AxisConfigJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            AxisError::InvalidConfig(format!("failed to parse axis config json payload: {e}"))
        })?;
        if payload.schema_version != AXIS_CONFIG_JSON_SCHEMA_V1 {
            return Err(AxisError::InvalidConfig(format!(
                "unsupported axis config schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.config)
    }

    pub fn build(&self) -> AxisResult<Axis> {
        self.factory.get(&self.request)
    }
}
