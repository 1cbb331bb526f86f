//! Operator registry with explicit registration and teardown.

use lightpaint_ipc::OPERATOR_NAMESPACE;
use thiserror::Error;
use tracing::{debug, info};

/// Static description of an operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatorInfo {
    /// Short name, as used on the wire (`lamp`, `tube_light`, ...)
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
}

impl OperatorInfo {
    /// Fully qualified id, e.g. `lightpainter.lamp`
    pub fn id(&self) -> String {
        format!("{OPERATOR_NAMESPACE}.{}", self.name)
    }
}

/// Every operator, in panel order
pub const OPERATORS: [OperatorInfo; 6] = [
    OperatorInfo {
        name: "lamp",
        label: "Lamp",
        description: "Place a point, spot or area light over the painted surface",
    },
    OperatorInfo {
        name: "mesh",
        label: "Mesh Light",
        description: "Create an emissive convex hull around the painted surface",
    },
    OperatorInfo {
        name: "tube_light",
        label: "Tube Light",
        description: "Create an emissive tube along the painted path",
    },
    OperatorInfo {
        name: "sky",
        label: "Sky",
        description: "Point the sun along the painted surface normal",
    },
    OperatorInfo {
        name: "flag",
        label: "Flag",
        description: "Block the active light from the painted surface",
    },
    OperatorInfo {
        name: "lamp_adjust",
        label: "Adjust Lamp",
        description: "Move the active light along an axis, a surface normal or a reflection",
    },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Operator {0} is already registered")]
    AlreadyRegistered(String),

    #[error("Operator {0} is not registered")]
    NotRegistered(String),
}

/// The set of operators currently available to the host
#[derive(Debug, Default)]
pub struct OperatorRegistry {
    registered: Vec<OperatorInfo>,
}

impl OperatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every operator registered
    pub fn with_all() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        registry.register_all()?;
        Ok(registry)
    }

    pub fn register(&mut self, info: OperatorInfo) -> Result<(), RegistryError> {
        if self.is_registered(&info.id()) {
            return Err(RegistryError::AlreadyRegistered(info.id()));
        }
        debug!("Registering {}", info.id());
        self.registered.push(info);
        Ok(())
    }

    /// Register every operator in panel order
    pub fn register_all(&mut self) -> Result<(), RegistryError> {
        for info in OPERATORS {
            self.register(info)?;
        }
        info!("Registered {} operators", self.registered.len());
        Ok(())
    }

    /// Remove an operator. Returns whether it was registered; absence is not an error.
    pub fn unregister(&mut self, id: &str) -> bool {
        match self.registered.iter().position(|info| info.id() == id) {
            Some(index) => {
                self.registered.remove(index);
                debug!("Unregistered {}", id);
                true
            }
            None => {
                debug!("Unregister of {} skipped: not registered", id);
                false
            }
        }
    }

    /// Tear everything down in reverse registration order; returns the ids removed
    pub fn unregister_all(&mut self) -> Vec<String> {
        let removed: Vec<String> = self.registered.drain(..).rev().map(|info| info.id()).collect();
        info!("Unregistered {} operators", removed.len());
        removed
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: &str) -> Option<&OperatorInfo> {
        self.registered.iter().find(|info| info.id() == id)
    }

    /// Look up an operator the host wants to dispatch
    pub fn ensure_registered(&self, id: &str) -> Result<&OperatorInfo, RegistryError> {
        self.get(id)
            .ok_or_else(|| RegistryError::NotRegistered(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OperatorInfo> {
        self.registered.iter()
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}
