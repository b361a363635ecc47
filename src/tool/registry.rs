//! Sparse tool storage with a shared "current tool" reference.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::{Diagnostic, LoadReport, ToolsSection};
use crate::error::{Error, Result, ToolError};

use super::Tool;

/// Maximum number of slots a registry grows to.
pub const MAX_TOOLS: usize = 256;

/// One position in the tool arena.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolSlot {
    /// Never filled; created when a later index was registered first.
    Empty,
    /// A registered tool.
    Occupied(Arc<Tool>),
}

impl ToolSlot {
    /// The tool in this slot, if any.
    pub fn tool(&self) -> Option<&Arc<Tool>> {
        match self {
            ToolSlot::Empty => None,
            ToolSlot::Occupied(tool) => Some(tool),
        }
    }

    /// Check if the slot is empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, ToolSlot::Empty)
    }
}

/// Index-addressed tools plus the currently selected one.
///
/// The current tool is either a registered tool or the registry's null tool,
/// never absent. Selection swaps the shared reference under a lock that is
/// held only for the swap, so readers holding a previous `Arc<Tool>` are not
/// blocked and never observe a partially replaced tool.
#[derive(Debug)]
pub struct ToolRegistry {
    slots: Vec<ToolSlot>,
    current: Mutex<Arc<Tool>>,
    null_tool: Arc<Tool>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create an empty registry with the null tool selected.
    pub fn new() -> Self {
        let null_tool = Arc::new(Tool::null());
        Self {
            slots: Vec::new(),
            current: Mutex::new(Arc::clone(&null_tool)),
            null_tool,
        }
    }

    /// Register every `tool` node of a tools section.
    ///
    /// A tool the registry cannot hold is skipped and reported.
    pub fn load(&mut self, section: &ToolsSection, report: &mut LoadReport) {
        for node in &section.tools {
            let tool = Tool::from_node(node);
            let name = tool.name.as_str().to_owned();
            match self.register(tool) {
                Ok(index) => tracing::debug!(index, "loaded tool"),
                Err(e) => report.push(Diagnostic::RejectedTool {
                    name,
                    reason: e.to_string(),
                }),
            }
        }
    }

    /// Place a tool at its own index, growing the arena as needed.
    ///
    /// An unassigned tool is appended and given the next index. Slots
    /// created between the old end and the tool's index are left empty.
    /// If no tool has been selected yet, the registered tool becomes current.
    ///
    /// Returns the index the tool now occupies.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::IndexTooLarge` if the tool would land at or past
    /// [`MAX_TOOLS`]. The registry is left unchanged.
    pub fn register(&mut self, mut tool: Tool) -> Result<i32> {
        // Any negative index counts as unassigned.
        let index = usize::try_from(tool.index).unwrap_or(self.slots.len());
        if index >= MAX_TOOLS {
            return Err(Error::Tool(ToolError::IndexTooLarge {
                index,
                max: MAX_TOOLS,
            }));
        }
        tool.index = index as i32;

        if self.slots.len() <= index {
            self.slots.resize(index + 1, ToolSlot::Empty);
        }
        let tool = Arc::new(tool);
        self.slots[index] = ToolSlot::Occupied(Arc::clone(&tool));

        let current = self.current.get_mut();
        if Arc::ptr_eq(current, &self.null_tool) {
            *current = tool;
        }

        Ok(index as i32)
    }

    /// Make the tool at `index` current.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::OutOfRange` or `ToolError::EmptySlot` when there is
    /// no tool at `index`. The null tool is current afterwards in both cases.
    pub fn select(&self, index: i32) -> Result<Arc<Tool>> {
        let found = self.get(index);
        let mut current = self.current.lock();
        match found {
            Ok(tool) => {
                *current = Arc::clone(&tool);
                Ok(tool)
            }
            Err(e) => {
                *current = Arc::clone(&self.null_tool);
                Err(e)
            }
        }
    }

    /// The current tool, or the null tool if none is selected.
    pub fn current(&self) -> Arc<Tool> {
        Arc::clone(&self.current.lock())
    }

    /// Check if the null tool is current.
    pub fn is_null_selected(&self) -> bool {
        Arc::ptr_eq(&self.current.lock(), &self.null_tool)
    }

    /// The placeholder tool used when none is selected.
    pub fn null_tool(&self) -> &Arc<Tool> {
        &self.null_tool
    }

    /// Get the tool at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::OutOfRange` or `ToolError::EmptySlot`.
    pub fn get(&self, index: i32) -> Result<Arc<Tool>> {
        match self.slot(index) {
            Some(ToolSlot::Occupied(tool)) => Ok(Arc::clone(tool)),
            Some(ToolSlot::Empty) => Err(Error::Tool(ToolError::EmptySlot(index))),
            None => Err(self.out_of_range(index)),
        }
    }

    /// Replace the slot at `index`.
    ///
    /// The tool keeps its own `index` field. The current tool is not changed.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::OutOfRange` if `index` is not inside the registry.
    pub fn set(&mut self, index: i32, tool: Tool) -> Result<()> {
        let err = self.out_of_range(index);
        let slot = usize::try_from(index)
            .ok()
            .and_then(|i| self.slots.get_mut(i))
            .ok_or(err)?;
        *slot = ToolSlot::Occupied(Arc::new(tool));
        Ok(())
    }

    /// Append a tool without index assignment or selection.
    pub fn add(&mut self, tool: Tool) {
        self.slots.push(ToolSlot::Occupied(Arc::new(tool)));
    }

    /// The slot at `index`, if inside the registry.
    pub fn slot(&self, index: i32) -> Option<&ToolSlot> {
        usize::try_from(index).ok().and_then(|i| self.slots.get(i))
    }

    /// Number of slots, including empty ones.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if the registry has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterate over registered tools, skipping empty slots.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Tool>> {
        self.slots.iter().filter_map(ToolSlot::tool)
    }

    /// Remove every tool and select the null tool.
    pub fn clear(&mut self) {
        self.slots.clear();
        *self.current.get_mut() = Arc::clone(&self.null_tool);
    }

    fn out_of_range(&self, index: i32) -> Error {
        Error::Tool(ToolError::OutOfRange {
            index,
            len: self.slots.len(),
        })
    }
}
