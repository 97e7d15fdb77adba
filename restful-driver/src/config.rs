//! Driver settings for RESTful devices.

use std::time::Duration;

use driver_framework::{ConfigDict, DriverError, Result};
use serde_json::Value;

/// Name under which this driver is selected in a device configuration.
pub const DRIVER_TYPE: &str = "restful";

/// Settings read from the `driver_config` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestfulSettings {
    /// Base URL every point path is appended to.
    pub device_address: String,

    /// Per-request timeout. `None` leaves the HTTP client default.
    pub timeout: Option<Duration>,
}

impl RestfulSettings {
    /// Extract the settings from a driver configuration map.
    ///
    /// `device_address` is required and kept verbatim.
    pub fn from_config_dict(config: &ConfigDict) -> Result<Self> {
        let device_address = match config.get("device_address") {
            None => return Err(DriverError::MissingConfigKey("device_address".to_string())),
            Some(Value::String(address)) => address.clone(),
            Some(other) => {
                return Err(DriverError::invalid_value(
                    "device_address",
                    format!("expected a string, got {}", other),
                ));
            }
        };

        let timeout = match config.get("timeout_ms") {
            None | Some(Value::Null) => None,
            Some(value) => Some(Duration::from_millis(parse_millis(value)?)),
        };

        Ok(Self {
            device_address,
            timeout,
        })
    }
}

fn parse_millis(value: &Value) -> Result<u64> {
    if let Some(ms) = value.as_u64() {
        return Ok(ms);
    }

    // JSON5 may hand integers over as floats.
    match value.as_f64() {
        Some(ms) if ms >= 0.0 && ms.fract() == 0.0 => Ok(ms as u64),
        _ => Err(DriverError::invalid_value(
            "timeout_ms",
            format!("expected a non-negative integer, got {}", value),
        )),
    }
}
