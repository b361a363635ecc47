//! Axis module for machine-model.
//!
//! Provides axis identity, the per-machine axis set and unit conversion.

mod id;
mod set;

pub use id::{AxisFlags, AxisId, Endstops, UnknownAxis, UnknownEndstops};
pub use set::{AxisAttributes, AxisSet};
