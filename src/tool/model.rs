//! Tool definitions built from descriptor nodes.

use std::collections::BTreeMap;

use heapless::String;

use crate::config::{bounded_name, Node};

/// Maximum length of a tool name.
pub const MAX_TOOL_NAME: usize = 32;

/// Index of a tool that has not been placed in a registry yet.
pub const UNASSIGNED_INDEX: i32 = -1;

const DEFAULT_TOOL_NAME: &str = "Generic Tool";
const NULL_TOOL_NAME: &str = "No tool";

/// An interchangeable end-effector (extruder, spindle, laser...).
#[derive(Debug, Clone, PartialEq)]
pub struct Tool {
    /// Registry index, or [`UNASSIGNED_INDEX`].
    pub index: i32,
    /// Human-readable name (max 32 chars).
    pub name: String<MAX_TOOL_NAME>,
    /// Tool type from the `type` attribute.
    pub kind: Option<std::string::String>,
    /// Remaining attributes as text, for consumers that know them.
    pub attributes: BTreeMap<std::string::String, std::string::String>,
}

impl Tool {
    /// Create a tool with no attributes.
    pub fn new(index: i32, name: &str) -> Self {
        Self {
            index,
            name: bounded_name(name),
            kind: None,
            attributes: BTreeMap::new(),
        }
    }

    /// The placeholder used whenever no real tool is selected.
    pub fn null() -> Self {
        Self::new(UNASSIGNED_INDEX, NULL_TOOL_NAME)
    }

    /// Build a tool from a `tool` node.
    ///
    /// A missing or unparsable `index` leaves the tool unassigned.
    pub fn from_node(node: &Node) -> Self {
        let index = node.attribute_i32("index").unwrap_or(UNASSIGNED_INDEX);
        let name = node.attribute("name");
        let mut tool = Self::new(index, name.as_deref().unwrap_or(DEFAULT_TOOL_NAME));
        tool.kind = node.attribute("type");
        tool.attributes = node
            .attributes
            .keys()
            .filter(|k| !matches!(k.as_str(), "index" | "name" | "type"))
            .filter_map(|k| node.attribute(k).map(|v| (k.clone(), v)))
            .collect();
        tool
    }

    /// Raw attribute text.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(|s| s.as_str())
    }
}
