//! Machine descriptor - the parsed form of a machine definition.
//!
//! Node attributes stay as raw TOML values. The model reads them back as text
//! through [`attribute_text`] and parses each one on its own, so a malformed
//! attribute never rejects the surrounding document. Sections are converted
//! the same way: an entry of the wrong shape is dropped and recorded in
//! [`MachineDescriptor::malformed`], and the rest of the document still loads.

use std::collections::BTreeMap;

use serde::Deserialize;

/// Raw attributes of a descriptor node, keyed by attribute name.
pub type Attributes = BTreeMap<String, toml::Value>;

/// Root machine node.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RawDescriptor")]
pub struct MachineDescriptor {
    /// Human-readable machine name.
    pub name: Option<String>,

    /// Axis definitions.
    pub geometry: Option<GeometrySection>,

    /// Clamp definitions.
    pub clamps: Option<ClampsSection>,

    /// Tool definitions.
    pub tools: Option<ToolsSection>,

    /// Entries dropped while parsing because they had the wrong shape.
    pub malformed: Vec<MalformedSection>,
}

/// `geometry` section: a sequence of `axis` nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeometrySection {
    /// Axis nodes in declaration order.
    pub axes: Vec<Node>,
}

/// `clamps` section: a sequence of `clamp` nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClampsSection {
    /// Clamp nodes in declaration order.
    pub clamps: Vec<Node>,
}

/// `tools` section: a sequence of `tool` nodes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolsSection {
    /// Tool nodes in declaration order.
    pub tools: Vec<Node>,
}

/// A descriptor node carrying free-form attributes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    /// Attributes by name.
    pub attributes: Attributes,
}

/// A descriptor entry that was dropped because it had the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedSection {
    /// Dotted path of the entry, e.g. `tools.tool`.
    pub section: String,
    /// What was expected and what was found.
    pub reason: String,
}

impl MalformedSection {
    fn new(section: &str, expected: &str, found: &toml::Value) -> Self {
        Self {
            section: section.to_owned(),
            reason: format!("expected {}, found {}", expected, found.type_str()),
        }
    }
}

/// The document as TOML values, before any section is interpreted.
#[derive(Deserialize)]
struct RawDescriptor {
    #[serde(default)]
    name: Option<toml::Value>,
    #[serde(default)]
    geometry: Option<toml::Value>,
    #[serde(default)]
    clamps: Option<toml::Value>,
    #[serde(default)]
    tools: Option<toml::Value>,
}

impl From<RawDescriptor> for MachineDescriptor {
    fn from(raw: RawDescriptor) -> Self {
        let mut malformed = Vec::new();

        let name = raw.name.and_then(|value| {
            let name = attribute_text(&value);
            if name.is_none() {
                malformed.push(MalformedSection::new("name", "a string", &value));
            }
            name
        });
        let geometry = section_nodes(raw.geometry, "geometry", "axis", &mut malformed)
            .map(|axes| GeometrySection { axes });
        let clamps = section_nodes(raw.clamps, "clamps", "clamp", &mut malformed)
            .map(|clamps| ClampsSection { clamps });
        let tools = section_nodes(raw.tools, "tools", "tool", &mut malformed)
            .map(|tools| ToolsSection { tools });

        Self {
            name,
            geometry,
            clamps,
            tools,
            malformed,
        }
    }
}

/// Collect the `key` nodes of a section, dropping entries that are not tables.
///
/// Returns `None` when the section is absent or is not a table itself. A
/// single `[section.key]` table is accepted as a one-node sequence.
fn section_nodes(
    section: Option<toml::Value>,
    name: &str,
    key: &str,
    malformed: &mut Vec<MalformedSection>,
) -> Option<Vec<Node>> {
    let mut table = match section? {
        toml::Value::Table(table) => table,
        other => {
            malformed.push(MalformedSection::new(name, "a table", &other));
            return None;
        }
    };

    let path = format!("{}.{}", name, key);
    let entries = match table.remove(key) {
        None => Vec::new(),
        Some(toml::Value::Array(entries)) => entries,
        Some(node @ toml::Value::Table(_)) => vec![node],
        Some(other) => {
            malformed.push(MalformedSection::new(&path, "an array of tables", &other));
            Vec::new()
        }
    };

    let nodes = entries
        .into_iter()
        .filter_map(|entry| match entry {
            toml::Value::Table(attributes) => Some(Node {
                attributes: attributes.into_iter().collect(),
            }),
            other => {
                malformed.push(MalformedSection::new(&path, "a table", &other));
                None
            }
        })
        .collect();
    Some(nodes)
}

impl Node {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style attribute setter, stored as a string value.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes
            .insert(name.to_owned(), toml::Value::String(value.into()));
        self
    }

    /// Builder-style attribute setter for an already typed value.
    pub fn with_value(mut self, name: &str, value: toml::Value) -> Self {
        self.attributes.insert(name.to_owned(), value);
        self
    }

    /// Attribute rendered as text, or `None` when missing or not a scalar.
    pub fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).and_then(attribute_text)
    }

    /// Attribute parsed as a float, or `None` when missing or unparsable.
    pub fn attribute_f64(&self, name: &str) -> Option<f64> {
        self.attribute(name)?.trim().parse().ok()
    }

    /// Attribute parsed as an integer, or `None` when missing or unparsable.
    pub fn attribute_i32(&self, name: &str) -> Option<i32> {
        self.attribute(name)?.trim().parse().ok()
    }
}

impl MachineDescriptor {
    /// Create a descriptor with only a name.
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_owned()),
            ..Self::default()
        }
    }

    /// Builder-style axis node append.
    pub fn with_axis(mut self, axis: Node) -> Self {
        self.geometry
            .get_or_insert_with(Default::default)
            .axes
            .push(axis);
        self
    }

    /// Builder-style clamp node append.
    pub fn with_clamp(mut self, clamp: Node) -> Self {
        self.clamps
            .get_or_insert_with(Default::default)
            .clamps
            .push(clamp);
        self
    }

    /// Builder-style tool node append.
    pub fn with_tool(mut self, tool: Node) -> Self {
        self.tools
            .get_or_insert_with(Default::default)
            .tools
            .push(tool);
        self
    }
}

/// Render a scalar TOML value as the text the model parses.
///
/// Tables and arrays have no textual form and yield `None`.
pub fn attribute_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(_) | toml::Value::Table(_) => None,
    }
}

/// Copy `s` into a bounded name, truncating at a character boundary.
pub(crate) fn bounded_name<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in s.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}
