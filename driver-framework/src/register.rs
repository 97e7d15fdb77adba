//! Register descriptors shared by all drivers.

use serde::{Deserialize, Serialize};

/// Wire representation of a register's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegisterKind {
    /// Single bit (coils, binary points). No driver in this workspace
    /// produces it; HTTP points are always [`Byte`](Self::Byte).
    Bit,
    /// Opaque byte payload.
    Byte,
}

impl RegisterKind {
    /// Return the string name for this register kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegisterKind::Bit => "bit",
            RegisterKind::Byte => "byte",
        }
    }
}

impl std::fmt::Display for RegisterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields every register carries regardless of protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseRegister {
    /// Value representation on the wire.
    pub kind: RegisterKind,
    /// Whether writes are rejected.
    pub read_only: bool,
    /// Platform-facing point name.
    pub point_name: String,
    /// Display unit.
    pub units: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
}

impl BaseRegister {
    /// Create a new base register.
    pub fn new(
        kind: RegisterKind,
        read_only: bool,
        point_name: impl Into<String>,
        units: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            read_only,
            point_name: point_name.into(),
            units: units.into(),
            description: description.into(),
        }
    }
}

/// A protocol-specific register stored in a [`RegistryStore`](crate::RegistryStore).
pub trait PointRegister {
    /// Common register fields.
    fn base(&self) -> &BaseRegister;

    /// Platform-facing point name, used as the registry key.
    fn point_name(&self) -> &str {
        &self.base().point_name
    }

    fn read_only(&self) -> bool {
        self.base().read_only
    }

    fn kind(&self) -> RegisterKind {
        self.base().kind
    }

    fn units(&self) -> &str {
        &self.base().units
    }

    fn description(&self) -> &str {
        &self.base().description
    }
}

impl PointRegister for BaseRegister {
    fn base(&self) -> &BaseRegister {
        self
    }
}
