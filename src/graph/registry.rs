//! Node class catalog.
//!
//! Class descriptors are static data. The registry indexes them by full class
//! name and is built exactly once, by [`init`], before any graph is built.
//! After that it is read-only; nothing on the audio path touches it.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::RegistryError;
use crate::graph::kind::NodeKind;
use crate::graph::vertex::VertexInterface;

/// Stable identifier of a node class: `namespace.name[.variant]`.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassName {
    pub namespace: &'static str,
    pub name: &'static str,
    pub variant: &'static str,
}

impl fmt::Display for ClassName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)?;
        if !self.variant.is_empty() {
            write!(f, ".{}", self.variant)?;
        }
        Ok(())
    }
}

/// Catalog metadata for one node kind.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassDescriptor {
    pub class_name: ClassName,
    pub major_version: u32,
    pub minor_version: u32,
    pub display_name: &'static str,
    pub description: &'static str,
    pub author: &'static str,
    pub category: &'static str,
    pub interface: &'static VertexInterface,
}

#[derive(Debug)]
pub struct Registry {
    descriptors: Vec<(NodeKind, &'static ClassDescriptor)>,
    by_name: HashMap<String, NodeKind>,
}

impl Registry {
    fn builtin() -> Self {
        let descriptors: Vec<_> = NodeKind::ALL
            .iter()
            .map(|&kind| (kind, kind.class()))
            .collect();
        let by_name = descriptors
            .iter()
            .map(|(kind, class)| (class.class_name.to_string(), *kind))
            .collect();

        Self {
            descriptors,
            by_name,
        }
    }

    pub fn descriptor(&self, kind: NodeKind) -> &'static ClassDescriptor {
        kind.class()
    }

    /// Find the node kind registered under a full class name.
    pub fn lookup(&self, class_name: &str) -> Result<NodeKind, RegistryError> {
        self.by_name
            .get(class_name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownClass(class_name.to_owned()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeKind, &'static ClassDescriptor)> + '_ {
        self.descriptors.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Build the registry. Safe to call more than once; later calls return the
/// same instance.
pub fn init() -> &'static Registry {
    REGISTRY.get_or_init(|| {
        let registry = Registry::builtin();
        tracing::info!(classes = registry.len(), "node registry initialized");
        registry
    })
}

/// The registry, if [`init`] has run.
pub fn get() -> Result<&'static Registry, RegistryError> {
    REGISTRY.get().ok_or(RegistryError::Uninitialized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_name_display() {
        let plain = ClassName {
            namespace: "UE",
            name: "Click",
            variant: "",
        };
        let variant = ClassName {
            namespace: "UE",
            name: "Wrap (Audio)",
            variant: "Audio",
        };
        assert_eq!(plain.to_string(), "UE.Click");
        assert_eq!(variant.to_string(), "UE.Wrap (Audio).Audio");
    }

    #[test]
    fn test_init_registers_every_kind() {
        let registry = init();
        assert_eq!(registry.len(), NodeKind::ALL.len());

        for kind in NodeKind::ALL {
            let class = registry.descriptor(kind);
            assert_eq!(registry.lookup(&class.class_name.to_string()), Ok(kind));
            assert_eq!((class.major_version, class.minor_version), (1, 0));
            assert_eq!(class.category, "Utils");
        }
    }

    #[test]
    fn test_init_is_idempotent() {
        let first = init() as *const Registry;
        let second = init() as *const Registry;
        assert_eq!(first, second);
        assert!(get().is_ok());
    }

    #[test]
    fn test_lookup_unknown_class() {
        let registry = init();
        assert_eq!(
            registry.lookup("UE.Nope"),
            Err(RegistryError::UnknownClass("UE.Nope".to_owned()))
        );
    }
}
