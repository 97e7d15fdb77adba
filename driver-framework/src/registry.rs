//! Register storage keyed by point name.

use std::collections::HashMap;

use crate::error::{DriverError, Result};
use crate::register::{PointRegister, RegisterKind};

/// Holds the registers of one device in insertion order.
///
/// Point names are unique: inserting a register whose name is already
/// present replaces the earlier register in its original position.
#[derive(Debug, Clone)]
pub struct RegistryStore<R> {
    registers: Vec<R>,
    by_name: HashMap<String, usize>,
}

impl<R> Default for RegistryStore<R> {
    fn default() -> Self {
        Self {
            registers: Vec::new(),
            by_name: HashMap::new(),
        }
    }
}

impl<R: PointRegister> RegistryStore<R> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a register, replacing any register with the same point name.
    pub fn insert_register(&mut self, register: R) {
        let name = register.point_name().to_string();
        match self.by_name.get(&name) {
            Some(&index) => {
                tracing::debug!(point = %name, "Replacing existing register");
                self.registers[index] = register;
            }
            None => {
                self.by_name.insert(name, self.registers.len());
                self.registers.push(register);
            }
        }
    }

    /// Look up a register by its point name.
    pub fn get_register_by_name(&self, name: &str) -> Result<&R> {
        self.by_name
            .get(name)
            .map(|&index| &self.registers[index])
            .ok_or_else(|| DriverError::UnknownPoint(name.to_string()))
    }

    /// All registers as (point name, register) pairs, in insertion order.
    pub fn point_map(&self) -> impl Iterator<Item = (&str, &R)> {
        self.registers.iter().map(|r| (r.point_name(), r))
    }

    /// Point names in insertion order.
    pub fn point_names(&self) -> Vec<String> {
        self.registers
            .iter()
            .map(|r| r.point_name().to_string())
            .collect()
    }

    /// Registers of one kind and access mode.
    pub fn registers_by_kind(&self, kind: RegisterKind, read_only: bool) -> Vec<&R> {
        self.registers
            .iter()
            .filter(|r| r.kind() == kind && r.read_only() == read_only)
            .collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.registers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registers.is_empty()
    }
}
