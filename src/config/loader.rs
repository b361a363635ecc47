//! Descriptor loading from TOML files.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Error, Result};

use super::MachineDescriptor;

/// A file holding several machine descriptors as `[[machine]]` entries.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MachineCatalog {
    /// Machine descriptors in file order.
    #[serde(default, rename = "machine")]
    pub machines: Vec<MachineDescriptor>,
}

impl MachineCatalog {
    /// Get a machine descriptor by name.
    pub fn machine(&self, name: &str) -> Option<&MachineDescriptor> {
        self.machines
            .iter()
            .find(|m| m.name.as_deref() == Some(name))
    }

    /// Like [`machine`](Self::machine) but takes the descriptor out of the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MachineNotFound` if no machine has that name.
    pub fn take_machine(mut self, name: &str) -> Result<MachineDescriptor> {
        let position = self
            .machines
            .iter()
            .position(|m| m.name.as_deref() == Some(name))
            .ok_or_else(|| ConfigError::MachineNotFound(name.to_owned()))?;
        Ok(self.machines.swap_remove(position))
    }

    /// List all machine names.
    pub fn machine_names(&self) -> impl Iterator<Item = &str> {
        self.machines.iter().filter_map(|m| m.name.as_deref())
    }
}

/// Load a single machine descriptor from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use machine_model::{load_descriptor, MachineModel};
///
/// let mut machine = MachineModel::new();
/// machine.load_configuration(load_descriptor("cupcake.toml")?);
/// ```
pub fn load_descriptor<P: AsRef<Path>>(path: P) -> Result<MachineDescriptor> {
    parse_descriptor(&read(path.as_ref())?)
}

/// Parse a single machine descriptor from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid.
pub fn parse_descriptor(content: &str) -> Result<MachineDescriptor> {
    toml::from_str(content).map_err(parse_error)
}

/// Load a catalog of machine descriptors from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<MachineCatalog> {
    parse_catalog(&read(path.as_ref())?)
}

/// Parse a catalog of machine descriptors from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid.
pub fn parse_catalog(content: &str) -> Result<MachineCatalog> {
    toml::from_str(content).map_err(parse_error)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        let message = format!("{}: {}", path.display(), e);
        Error::Config(ConfigError::Io(message))
    })
}

fn parse_error(e: toml::de::Error) -> Error {
    Error::Config(ConfigError::Parse(e.message().to_owned()))
}
