//! Default-value tracking for reverting written points.
//!
//! A point can be reverted to its configured default or, when it has none,
//! to the last value scraped before the point was written ("clean" value).

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{DriverError, Result};

/// Revert bookkeeping for one device.
#[derive(Debug, Clone, Default)]
pub struct BasicRevert {
    defaults: HashMap<String, String>,
    clean_values: HashMap<String, String>,
    changed: HashSet<String>,
}

impl BasicRevert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the value a point reverts to.
    pub fn set_default(&mut self, point: impl Into<String>, value: impl Into<String>) {
        self.defaults.insert(point.into(), value.into());
    }

    pub fn default_for(&self, point: &str) -> Option<&str> {
        self.defaults.get(point).map(String::as_str)
    }

    pub fn clean_value_for(&self, point: &str) -> Option<&str> {
        self.clean_values.get(point).map(String::as_str)
    }

    /// Record that a point was written through the driver.
    pub fn mark_changed(&mut self, point: impl Into<String>) {
        self.changed.insert(point.into());
    }

    /// Record that a point is back at its revert value.
    pub fn mark_reverted(&mut self, point: &str) {
        self.changed.remove(point);
    }

    pub fn is_changed(&self, point: &str) -> bool {
        self.changed.contains(point)
    }

    /// Remember scraped values of points that were never written and have
    /// no configured default.
    pub fn update_clean_values(&mut self, scraped: &BTreeMap<String, String>) {
        for (point, value) in scraped {
            if self.changed.contains(point) || self.defaults.contains_key(point) {
                continue;
            }
            self.clean_values.insert(point.clone(), value.clone());
        }
    }

    /// Value to write when reverting a single point.
    pub fn revert_value(&self, point: &str) -> Result<String> {
        self.default_for(point)
            .or_else(|| self.clean_value_for(point))
            .map(str::to_string)
            .ok_or_else(|| DriverError::NoCleanValue(point.to_string()))
    }

    /// Every (point, value) pair written by a full revert.
    ///
    /// Clean values take precedence over defaults for the same point.
    pub fn revert_targets(&self) -> BTreeMap<String, String> {
        let mut targets: BTreeMap<String, String> = self
            .defaults
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        targets.extend(
            self.clean_values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scrape(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_default_preferred_over_clean_value() {
        let mut revert = BasicRevert::new();
        revert.set_default("Setpoint", "72");
        revert.update_clean_values(&scrape(&[("Setpoint", "70"), ("Fan", "on")]));

        assert_eq!(revert.revert_value("Setpoint").unwrap(), "72");
        assert_eq!(revert.clean_value_for("Setpoint"), None);
        assert_eq!(revert.revert_value("Fan").unwrap(), "on");
    }

    #[test]
    fn test_changed_points_not_tracked() {
        let mut revert = BasicRevert::new();
        revert.update_clean_values(&scrape(&[("Fan", "on")]));
        revert.mark_changed("Fan");
        revert.update_clean_values(&scrape(&[("Fan", "off")]));

        assert!(revert.is_changed("Fan"));
        assert_eq!(revert.revert_value("Fan").unwrap(), "on");

        revert.mark_reverted("Fan");
        assert!(!revert.is_changed("Fan"));
    }

    #[test]
    fn test_no_clean_value() {
        let revert = BasicRevert::new();
        assert!(matches!(
            revert.revert_value("Damper"),
            Err(DriverError::NoCleanValue(p)) if p == "Damper"
        ));
    }

    #[test]
    fn test_revert_targets() {
        let mut revert = BasicRevert::new();
        revert.set_default("temp1", "72");
        revert.update_clean_values(&scrape(&[("Fan", "on")]));

        let targets = revert.revert_targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets["temp1"], "72");
        assert_eq!(targets["Fan"], "on");
    }
}
