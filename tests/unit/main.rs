//! Unit test harness for machine-model.
//!
//! This module organizes unit tests for each component of the library.

mod config_parsing;
mod conversion;
