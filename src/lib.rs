//! # machine-model
//!
//! Configuration model for multi-axis motion-control machines (CNC mills,
//! 3D printers).
//!
//! ## Features
//!
//! - **Axis set**: which of X/Y/Z/A/B exist, with length, feedrate, steps/mm and endstops
//! - **Unit conversion**: millimeters to whole steps and back, never dividing by zero
//! - **Tool selection**: a current tool shared across threads, never absent
//! - **Tolerant loading**: malformed attributes fall back to defaults, loading never aborts
//! - **TOML descriptors**: single machines or `[[machine]]` catalogs
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use machine_model::{load_descriptor, AxisId, MachineModel, Position};
//!
//! let mut machine = MachineModel::new();
//! let report = machine.load_configuration(load_descriptor("cupcake.toml")?);
//! for diagnostic in report.iter() {
//!     eprintln!("{diagnostic}");
//! }
//!
//! let steps = machine.millimeters_to_steps(&Position::new(10.0, 5.0, 0.0, 0.0, 0.0));
//! machine.select_tool(0)?;
//! println!("X: {} steps, tool: {}", steps[AxisId::X], machine.current_tool().name);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod axis;
pub mod clamp;
pub mod config;
pub mod error;
pub mod machine;
pub mod tool;

// Re-exports for ergonomic API
pub use axis::{AxisAttributes, AxisFlags, AxisId, AxisSet, Endstops};
pub use clamp::{Clamp, ClampRegistry};
pub use config::{
    load_catalog, load_descriptor, parse_catalog, parse_descriptor, Diagnostic, LoadReport,
    MachineCatalog, MachineDescriptor, Node,
};
pub use error::{ClampError, ConfigError, Error, Result, ToolError};
pub use machine::{BuildVolume, MachineModel};
pub use tool::{Tool, ToolRegistry, ToolSlot};

// Unit types
pub use config::units::{Position, StepPosition, StepsPerMm};
