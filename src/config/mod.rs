//! Configuration module for machine-model.
//!
//! Provides the machine descriptor read from TOML files, the loader, the unit
//! types shared by the model, and the diagnostics produced while loading.

mod descriptor;
mod loader;
mod report;
pub mod units;

pub use descriptor::{
    attribute_text, Attributes, ClampsSection, GeometrySection, MachineDescriptor, MalformedSection,
    Node, ToolsSection,
};
pub use loader::{load_catalog, load_descriptor, parse_catalog, parse_descriptor, MachineCatalog};
pub use report::{Diagnostic, LoadReport};

pub(crate) use descriptor::bounded_name;

// Re-export unit types at config level
pub use units::{Position, StepPosition, StepsPerMm};
