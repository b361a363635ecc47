//! Machine module for machine-model.
//!
//! Provides the aggregate machine model and its build volume.

mod build_volume;
mod model;

pub use build_volume::{BuildVolume, DEFAULT_DIMENSION_MM};
pub use model::MachineModel;
