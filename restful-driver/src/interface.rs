//! Point access over plain HTTP.
//!
//! Each point is a resource below the device address: reads are `GET`
//! requests, writes `POST` the value as the raw request body. Any status
//! other than 200 is logged and the response body is still returned.

use driver_framework::{
    BaseInterface, BaseRegister, BasicRevert, ConfigDict, DriverError, PointRegister,
    RegisterKind, RegistryRow, RegistryStore, Result,
};
use reqwest::StatusCode;
use serde::Serialize;
use tracing::{debug, error, info};

use crate::config::RestfulSettings;

/// Registry column holding the device-side path segment.
pub const POINT_NAME: &str = "Point Name";
/// Registry column holding the platform-facing point name.
pub const VOLTTRON_POINT_NAME: &str = "Volttron Point Name";
pub const UNITS: &str = "Units";
pub const WRITABLE: &str = "Writable";
pub const NOTES: &str = "Notes";
pub const DEFAULT: &str = "Default";

/// A point addressed by a path below the device address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Register {
    #[serde(flatten)]
    base: BaseRegister,
    path: String,
}

impl Register {
    pub fn new(
        read_only: bool,
        point_name: impl Into<String>,
        units: impl Into<String>,
        description: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            base: BaseRegister::new(RegisterKind::Byte, read_only, point_name, units, description),
            path: path.into(),
        }
    }

    /// Path segment appended to the device address.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl PointRegister for Register {
    fn base(&self) -> &BaseRegister {
        &self.base
    }
}

/// Driver for one RESTful device.
#[derive(Debug, Default)]
pub struct Interface {
    device_address: String,
    client: reqwest::Client,
    registry: RegistryStore<Register>,
    revert: BasicRevert,
}

impl Interface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base URL set by `configure`.
    pub fn device_address(&self) -> &str {
        &self.device_address
    }

    /// Register the value a point reverts to.
    pub fn set_default(&mut self, point: &str, value: &str) {
        self.revert.set_default(point, value);
    }

    /// Build registers from registry rows.
    ///
    /// Rows with an empty point name are skipped. Defaults of writable
    /// points are registered under the device path, not the platform name.
    pub fn parse_config(&mut self, rows: Option<&[RegistryRow]>) -> Result<()> {
        let Some(rows) = rows else {
            return Ok(());
        };

        for row in rows {
            let path = row.require(POINT_NAME)?;
            if path.is_empty() {
                continue;
            }

            let read_only = row.require(WRITABLE)?.to_lowercase() != "true";
            let point_name = row.require(VOLTTRON_POINT_NAME)?;
            let units = row.require(UNITS)?;
            let description = row.get_or(NOTES, "");
            let default = row.get(DEFAULT);

            if !read_only {
                if let Some(default) = default {
                    self.set_default(path, default);
                }
            }

            self.registry.insert_register(Register::new(
                read_only,
                point_name,
                units,
                description,
                path,
            ));
        }

        Ok(())
    }

    /// URL of a register: device address and path joined by a single `/`.
    pub fn point_url(&self, register: &Register) -> String {
        format!("{}/{}", self.device_address, register.path())
    }

    async fn read_body(response: reqwest::Response, action: &str) -> Result<String> {
        let status = response.status();
        if status != StatusCode::OK {
            error!(
                status = status.as_u16(),
                url = %response.url(),
                "could not {} point, device returned code {}",
                action,
                status.as_u16()
            );
        }

        response.text().await.map_err(DriverError::transport)
    }
}

impl BaseInterface for Interface {
    type Register = Register;

    fn registry(&self) -> &RegistryStore<Register> {
        &self.registry
    }

    fn revert_state(&self) -> &BasicRevert {
        &self.revert
    }

    fn revert_state_mut(&mut self) -> &mut BasicRevert {
        &mut self.revert
    }

    async fn configure(
        &mut self,
        config: &ConfigDict,
        registry: Option<&[RegistryRow]>,
    ) -> Result<()> {
        let settings = RestfulSettings::from_config_dict(config)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = settings.timeout {
            builder = builder.timeout(timeout);
        }
        self.client = builder
            .build()
            .map_err(|e| DriverError::config(format!("Failed to build HTTP client: {}", e)))?;
        self.device_address = settings.device_address;

        self.parse_config(registry)?;

        info!(
            device_address = %self.device_address,
            points = self.registry.len(),
            "Configured RESTful device"
        );
        Ok(())
    }

    async fn get_point(&self, point_name: &str) -> Result<String> {
        let register = self.registry.get_register_by_name(point_name)?;
        let url = self.point_url(register);
        debug!(point = %point_name, url = %url, "Reading point");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(DriverError::transport)?;

        Self::read_body(response, "get").await
    }

    async fn set_point_raw(&self, point_name: &str, value: &str) -> Result<String> {
        let register = self.registry.get_register_by_name(point_name)?;
        if register.read_only() {
            return Err(DriverError::ReadOnly(point_name.to_string()));
        }

        let url = self.point_url(register);
        debug!(point = %point_name, url = %url, value = %value, "Writing point");

        let response = self
            .client
            .post(&url)
            .body(value.to_string())
            .send()
            .await
            .map_err(DriverError::transport)?;

        Self::read_body(response, "set").await
    }
}
