//! Non-fatal conditions found while loading a machine descriptor.

use thiserror::Error;

use crate::axis::AxisId;

/// A recovered loading condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Diagnostic {
    /// Axis node whose `id` is missing or not a known axis. The node is skipped.
    #[error("Unrecognized axis {0:?} found in machine descriptor")]
    UnrecognizedAxis(Option<String>),

    /// Endstop token not in the known set. The axis uses `Endstops::None`.
    #[error("Unrecognized endstop value {value:?} for axis {axis}")]
    UnrecognizedEndstops {
        /// Axis the token was read for
        axis: AxisId,
        /// Raw token
        value: String,
    },

    /// Steps per millimeter that parsed but cannot be used as a divisor.
    #[error("Unusable steps per mm {value} for axis {axis}, using 1.0")]
    InvalidStepsPerMm {
        /// Axis the value was read for
        axis: AxisId,
        /// Rejected value
        value: f64,
    },

    /// Tool node the registry could not hold. The tool is skipped.
    #[error("Tool {name:?} ignored: {reason}")]
    RejectedTool {
        /// Tool name
        name: String,
        /// Why registration failed
        reason: String,
    },

    /// Descriptor entry of the wrong shape. Its section still loads what it can.
    #[error("Malformed {section} in machine descriptor: {reason}")]
    MalformedSection {
        /// Dotted path of the dropped entry
        section: String,
        /// What was expected and what was found
        reason: String,
    },
}

/// Diagnostics collected by one `load_configuration` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    diagnostics: Vec<Diagnostic>,
}

impl LoadReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log and record a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// True when nothing had to be recovered.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Number of recorded diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Check if the report is empty.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate over recorded diagnostics in the order they occurred.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}
