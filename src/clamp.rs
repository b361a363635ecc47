//! Mechanical clamps and their append-only registry.

use std::collections::BTreeMap;

use heapless::String;

use crate::config::{bounded_name, ClampsSection, Node};
use crate::error::{ClampError, Error, Result};

/// Maximum length of a clamp name.
pub const MAX_CLAMP_NAME: usize = 32;

/// A clamp holding the workpiece or build platform.
#[derive(Debug, Clone, PartialEq)]
pub struct Clamp {
    /// Position in the registry.
    pub index: i32,
    /// Human-readable name (max 32 chars).
    pub name: String<MAX_CLAMP_NAME>,
    /// Raw attributes as text.
    pub attributes: BTreeMap<std::string::String, std::string::String>,
}

impl Clamp {
    /// Create an unregistered clamp.
    pub fn new(name: &str) -> Self {
        Self {
            index: -1,
            name: bounded_name(name),
            attributes: BTreeMap::new(),
        }
    }

    /// Build a clamp from a `clamp` node.
    pub fn from_node(node: &Node) -> Self {
        let mut clamp = Self::new(node.attribute("name").as_deref().unwrap_or("Clamp"));
        clamp.attributes = node
            .attributes
            .keys()
            .filter(|k| k.as_str() != "name")
            .filter_map(|k| node.attribute(k).map(|v| (k.clone(), v)))
            .collect();
        clamp
    }
}

/// Clamps in declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClampRegistry {
    clamps: Vec<Clamp>,
}

impl ClampRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one clamp per node of a clamps section.
    pub fn load(&mut self, section: &ClampsSection) {
        for node in &section.clamps {
            let index = self.add(Clamp::from_node(node));
            tracing::debug!(index, "loaded clamp");
        }
    }

    /// Append a clamp, assigning its index. Returns that index.
    pub fn add(&mut self, mut clamp: Clamp) -> i32 {
        clamp.index = self.clamps.len() as i32;
        self.clamps.push(clamp);
        self.clamps.len() as i32 - 1
    }

    /// Get the clamp at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ClampError::OutOfRange` if `index` is not inside the registry.
    pub fn get(&self, index: i32) -> Result<&Clamp> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.clamps.get(i))
            .ok_or(Error::Clamp(ClampError::OutOfRange {
                index,
                len: self.clamps.len(),
            }))
    }

    /// Number of clamps.
    pub fn len(&self) -> usize {
        self.clamps.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.clamps.is_empty()
    }

    /// Iterate over clamps.
    pub fn iter(&self) -> impl Iterator<Item = &Clamp> {
        self.clamps.iter()
    }

    /// Remove all clamps.
    pub fn clear(&mut self) {
        self.clamps.clear();
    }
}
