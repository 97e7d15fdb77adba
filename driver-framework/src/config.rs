//! Configuration traits and the device configuration file.

use std::path::{Path, PathBuf};

use driver_common::LoggingConfig;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{DriverError, Result};
use crate::interface::ConfigDict;
use crate::rows::{RegistryRow, load_registry_file};

/// Trait for driver configuration types.
///
/// Implement this trait for a configuration struct to get loading and
/// validation.
pub trait DriverConfig: Sized + DeserializeOwned {
    /// Get the logging configuration.
    fn logging(&self) -> &LoggingConfig;

    /// Validate the configuration.
    ///
    /// Called automatically after loading. Override to add custom validation.
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Load configuration from a file path.
    ///
    /// Supports JSON5 format. Calls [`validate`](Self::validate) after loading.
    fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(DriverError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let config: Self = driver_common::load_config(path)
            .map_err(|e| DriverError::ConfigParse(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

/// Configuration of one device: which driver to use, the settings passed
/// to it and where its point table lives.
///
/// ```json5
/// {
///   driver_type: "restful",
///   driver_config: { device_address: "http://10.0.0.5" },
///   registry_config: "registry.csv",
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceConfig {
    /// Driver name, e.g. "restful".
    pub driver_type: String,

    /// Settings handed to the driver's `configure`.
    #[serde(default)]
    pub driver_config: ConfigDict,

    /// Point table file (`.csv` or `.json`), relative to the config file.
    #[serde(default)]
    pub registry_config: Option<PathBuf>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl DriverConfig for DeviceConfig {
    fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    fn validate(&self) -> Result<()> {
        if self.driver_type.is_empty() {
            return Err(DriverError::validation("driver_type cannot be empty"));
        }
        Ok(())
    }
}

impl DeviceConfig {
    /// Check that this configuration targets the given driver.
    pub fn expect_driver(&self, driver_type: &str) -> Result<()> {
        if self.driver_type != driver_type {
            return Err(DriverError::validation(format!(
                "driver_type '{}' cannot be handled by the '{}' driver",
                self.driver_type, driver_type
            )));
        }
        Ok(())
    }

    /// Load the point table, resolving relative paths against `base_dir`.
    ///
    /// Returns `None` when no registry is configured.
    pub fn load_registry(&self, base_dir: &Path) -> Result<Option<Vec<RegistryRow>>> {
        let Some(path) = &self.registry_config else {
            return Ok(None);
        };

        let path = if path.is_absolute() {
            path.clone()
        } else {
            base_dir.join(path)
        };

        tracing::debug!(path = %path.display(), "Loading registry configuration");
        load_registry_file(&path).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found() {
        let result = DeviceConfig::load("/nonexistent/path.json5");
        assert!(matches!(result, Err(DriverError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_load_device_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.json5");
        std::fs::write(
            &path,
            r#"{
                // RESTful thermostat
                driver_type: "restful",
                driver_config: { device_address: "http://10.0.0.5" },
                logging: { level: "warn", format: "json" },
            }"#,
        )
        .unwrap();

        let config = DeviceConfig::load(&path).unwrap();
        assert_eq!(config.driver_type, "restful");
        assert_eq!(config.logging().level, "warn");
        assert_eq!(config.logging().format, driver_common::LogFormat::Json);
        assert!(config.registry_config.is_none());
    }

    #[test]
    fn test_load_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.json5");
        std::fs::write(&path, "{ driver_type: ").unwrap();

        match DeviceConfig::load(&path) {
            Err(DriverError::ConfigParse(msg)) => assert!(msg.contains("device.json5")),
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("device.json5");
        std::fs::write(&path, r#"{ driver_type: "" }"#).unwrap();

        assert!(matches!(
            DeviceConfig::load(&path),
            Err(DriverError::ConfigValidation(_))
        ));
    }

    #[test]
    fn test_parse_device_config() {
        let json = r#"{
            driver_type: "restful",
            driver_config: { device_address: "http://10.0.0.5", timeout_ms: 500 },
            registry_config: "points.csv",
            logging: { level: "debug" },
        }"#;

        let config: DeviceConfig = json5::from_str(json).unwrap();
        config.validate().unwrap();

        assert_eq!(config.driver_type, "restful");
        assert_eq!(
            config.driver_config["device_address"],
            serde_json::json!("http://10.0.0.5")
        );
        assert_eq!(config.registry_config, Some(PathBuf::from("points.csv")));
        assert_eq!(config.logging().level, "debug");
        assert!(config.expect_driver("restful").is_ok());
        assert!(config.expect_driver("modbus").is_err());
    }

    #[test]
    fn test_validate_empty_driver_type() {
        let config: DeviceConfig = json5::from_str(r#"{ driver_type: "" }"#).unwrap();
        assert!(matches!(
            config.validate(),
            Err(DriverError::ConfigValidation(_))
        ));
    }

    #[test]
    fn test_load_registry_relative_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("points.csv"),
            "Point Name,Units\ntemp1,F\nhum1,%\n",
        )
        .unwrap();

        let config: DeviceConfig = json5::from_str(
            r#"{ driver_type: "restful", registry_config: "points.csv" }"#,
        )
        .unwrap();

        let rows = config.load_registry(dir.path()).unwrap().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].get("Point Name"), Some("hum1"));
    }

    #[test]
    fn test_load_registry_absent() {
        let config: DeviceConfig = json5::from_str(r#"{ driver_type: "restful" }"#).unwrap();
        assert!(config.load_registry(Path::new(".")).unwrap().is_none());
    }
}
