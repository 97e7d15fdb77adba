//! The contract every point driver implements.
//!
//! A driver supplies configuration, single point reads and raw writes. The
//! provided methods layer revert tracking, bulk scraping and multi-point
//! access on top, so a driver only has to speak its wire protocol.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::Result;
use crate::register::PointRegister;
use crate::registry::RegistryStore;
use crate::revert::BasicRevert;
use crate::rows::RegistryRow;

/// Driver settings handed to [`BaseInterface::configure`].
pub type ConfigDict = serde_json::Map<String, serde_json::Value>;

/// Point name to value (or error message) map.
pub type PointValues = BTreeMap<String, String>;

/// A device driver.
///
/// Operations on one device are sequential: every method awaits its request
/// before returning and bulk operations walk points one at a time.
#[allow(async_fn_in_trait)]
pub trait BaseInterface {
    /// Protocol-specific register type.
    type Register: PointRegister;

    /// Registers configured for this device.
    fn registry(&self) -> &RegistryStore<Self::Register>;

    fn revert_state(&self) -> &BasicRevert;

    fn revert_state_mut(&mut self) -> &mut BasicRevert;

    /// Apply driver settings and build registers from the registry table.
    ///
    /// `registry` is `None` for devices configured without a point table.
    async fn configure(
        &mut self,
        config: &ConfigDict,
        registry: Option<&[RegistryRow]>,
    ) -> Result<()>;

    /// Read one point from the device.
    async fn get_point(&self, point_name: &str) -> Result<String>;

    /// Write one point without touching revert tracking.
    async fn set_point_raw(&self, point_name: &str, value: &str) -> Result<String>;

    /// Read every configured point, one after another.
    async fn scrape_all_raw(&self) -> Result<PointValues> {
        let mut results = PointValues::new();
        for point_name in self.registry().point_names() {
            let value = self.get_point(&point_name).await?;
            results.insert(point_name, value);
        }
        Ok(results)
    }

    /// Write one point and mark it as changed.
    async fn set_point(&mut self, point_name: &str, value: &str) -> Result<String> {
        let result = self.set_point_raw(point_name, value).await?;
        self.revert_state_mut().mark_changed(point_name);
        Ok(result)
    }

    /// Read every point and remember clean values for later reverts.
    async fn scrape_all(&mut self) -> Result<PointValues> {
        let results = self.scrape_all_raw().await?;
        self.revert_state_mut().update_clean_values(&results);
        Ok(results)
    }

    /// Write a point back to its default, or to its last clean value.
    async fn revert_point(&mut self, point_name: &str) -> Result<()> {
        let value = self.revert_state().revert_value(point_name)?;
        debug!(point = %point_name, value = %value, "Reverting point");

        self.set_point_raw(point_name, &value).await?;
        self.revert_state_mut().mark_reverted(point_name);
        Ok(())
    }

    /// Revert every point that has a default or a clean value.
    ///
    /// Points are written in name order. Failures are logged and collected;
    /// they do not stop the remaining points from being reverted.
    async fn revert_all(&mut self) -> PointValues {
        let targets = self.revert_state().revert_targets();
        let mut errors = PointValues::new();

        for (point_name, value) in targets {
            match self.set_point_raw(&point_name, &value).await {
                Ok(_) => self.revert_state_mut().mark_reverted(&point_name),
                Err(e) => {
                    warn!(point = %point_name, error = %e, "Error while reverting point");
                    errors.insert(point_name, e.to_string());
                }
            }
        }

        errors
    }

    /// Read several points, collecting per-point failures instead of failing.
    ///
    /// Both maps are keyed by the requested point name.
    async fn get_multiple_points(&self, point_names: &[String]) -> (PointValues, PointValues) {
        let mut results = PointValues::new();
        let mut errors = PointValues::new();

        for point_name in point_names {
            match self.get_point(point_name).await {
                Ok(value) => {
                    results.insert(point_name.clone(), value);
                }
                Err(e) => {
                    errors.insert(point_name.clone(), e.to_string());
                }
            }
        }

        (results, errors)
    }

    /// Write several points; returns the failures keyed by point name.
    async fn set_multiple_points(&mut self, points: &[(String, String)]) -> PointValues {
        let mut errors = PointValues::new();

        for (point_name, value) in points {
            if let Err(e) = self.set_point(point_name, value).await {
                errors.insert(point_name.clone(), e.to_string());
            }
        }

        errors
    }
}
