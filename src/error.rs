//! Error types for machine-model.
//!
//! Loading a machine never fails: malformed attributes are recovered where they
//! occur and reported as [`Diagnostic`](crate::config::Diagnostic)s. The errors
//! below cover descriptor I/O and out-of-range tool or clamp access.

use thiserror::Error;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all machine-model operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Descriptor loading error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    /// Tool lookup or selection error
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
    /// Clamp lookup error
    #[error("Clamp error: {0}")]
    Clamp(#[from] ClampError),
}

/// Descriptor loading errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Failed to parse TOML descriptor
    #[error("Parse error: {0}")]
    Parse(String),
    /// File I/O error
    #[error("I/O error: {0}")]
    Io(String),
    /// Machine name not found in a catalog
    #[error("Machine '{0}' not found")]
    MachineNotFound(String),
}

/// Tool access errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    /// Index outside the registry
    #[error("No such tool #{index} (registry holds {len})")]
    OutOfRange {
        /// Requested index
        index: i32,
        /// Registry size at the time of the request
        len: usize,
    },
    /// Index inside the registry but never filled
    #[error("Tool slot #{0} is empty")]
    EmptySlot(i32),
    /// Registration would grow the registry past its slot limit
    #[error("Tool index {index} exceeds the {max}-slot limit")]
    IndexTooLarge {
        /// Index the tool would have occupied
        index: usize,
        /// Slot limit
        max: usize,
    },
}

/// Clamp access errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClampError {
    /// Index outside the registry
    #[error("No such clamp #{index} (registry holds {len})")]
    OutOfRange {
        /// Requested index
        index: i32,
        /// Registry size at the time of the request
        len: usize,
    },
}
