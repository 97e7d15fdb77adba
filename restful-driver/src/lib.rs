//! Point driver for devices that expose each point as an HTTP resource.
//!
//! This driver reads points with `GET` and writes them with `POST` against
//! URLs built from the device address and a per-point path.
//!
//! # URLs
//!
//! ```text
//! <device_address>/<path>
//! ```
//!
//! Where:
//! - `<device_address>` - `driver_config.device_address`, used verbatim
//! - `<path>` - the point's `Point Name` column in the registry table

pub mod config;
pub mod interface;

pub use config::{DRIVER_TYPE, RestfulSettings};
pub use interface::{Interface, Register};
