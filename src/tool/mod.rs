//! Tool module for machine-model.
//!
//! Provides tool definitions and the registry that tracks the current tool.

mod model;
mod registry;

pub use model::{Tool, MAX_TOOL_NAME, UNASSIGNED_INDEX};
pub use registry::{ToolRegistry, ToolSlot, MAX_TOOLS};
