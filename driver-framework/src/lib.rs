//! Platform Driver Framework
//!
//! Common abstractions for building point drivers that read and write
//! named data points on field devices.
//!
//! # Overview
//!
//! This framework provides:
//! - [`BaseInterface`] trait: the operations a driver exposes to the platform
//! - [`RegistryStore`] for registers keyed by point name
//! - [`BasicRevert`] for default-value and clean-value revert tracking
//! - [`RegistryRow`] and CSV/JSON loaders for point tables
//! - [`DriverConfig`] trait and [`DeviceConfig`] for configuration files
//! - [`DriverArgs`] for common CLI argument parsing
//!
//! # Example
//!
//! ```ignore
//! use driver_framework::{BaseInterface, DeviceConfig, DriverArgs, DriverConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = DriverArgs::parse_with_default("device.json5");
//!     let config = DeviceConfig::load(&args.config)?;
//!     let rows = config.load_registry(&args.config_dir())?;
//!
//!     let mut interface = MyInterface::default();
//!     interface.configure(&config.driver_config, rows.as_deref()).await?;
//!
//!     println!("{:?}", interface.scrape_all().await?);
//!     Ok(())
//! }
//! ```

mod args;
mod config;
mod error;
mod interface;
mod register;
mod registry;
mod revert;
mod rows;

pub use args::{DriverArgs, DriverCommand};
pub use config::{DeviceConfig, DriverConfig};
pub use error::{DriverError, Result};
pub use interface::{BaseInterface, ConfigDict, PointValues};
pub use register::{BaseRegister, PointRegister, RegisterKind};
pub use registry::RegistryStore;
pub use revert::BasicRevert;
pub use rows::{RegistryRow, load_registry_file, parse_csv_rows, parse_json_rows};

// Re-export commonly used types from driver-common
pub use driver_common::{LogFormat, LoggingConfig};
