//! Machine model facade.
//!
//! Aggregates axes, build volume, tools and clamps for a single machine and
//! holds its drive and gear state.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use crate::axis::{AxisFlags, AxisId, AxisSet, Endstops};
use crate::clamp::{Clamp, ClampRegistry};
use crate::config::{Diagnostic, LoadReport, MachineDescriptor, Position, StepPosition};
use crate::error::{Error, Result, ToolError};
use crate::tool::{Tool, ToolRegistry};

use super::BuildVolume;

/// Configuration of one machine, shared between command and status threads.
///
/// Built unconfigured by [`new`](Self::new) and populated once by
/// [`load_configuration`](Self::load_configuration). Afterwards it is read
/// through `&self`; only tool selection and drive/gear state change.
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use machine_model::{parse_descriptor, AxisId, MachineModel, Position};
///
/// let mut machine = MachineModel::new();
/// machine.load_configuration(parse_descriptor(MACHINE_TOML)?);
/// let machine = Arc::new(machine);
///
/// machine.select_tool(1)?;
/// let steps = machine.millimeters_to_steps(&Position::new(10.0, 0.0, 0.0, 0.0, 0.0));
/// println!("{} steps on X with {}", steps[AxisId::X], machine.current_tool().name);
/// ```
#[derive(Debug)]
pub struct MachineModel {
    descriptor: Option<MachineDescriptor>,
    configured: bool,
    axes: AxisSet,
    build_volume: BuildVolume,
    tools: ToolRegistry,
    clamps: ClampRegistry,
    drives_enabled: AtomicBool,
    gear_ratio: AtomicI32,
}

impl Default for MachineModel {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineModel {
    /// Create an unconfigured machine.
    pub fn new() -> Self {
        Self {
            descriptor: None,
            configured: false,
            axes: AxisSet::new(),
            build_volume: BuildVolume::default(),
            tools: ToolRegistry::new(),
            clamps: ClampRegistry::new(),
            drives_enabled: AtomicBool::new(true),
            gear_ratio: AtomicI32::new(0),
        }
    }

    /// Populate the model from a descriptor.
    ///
    /// Any previous configuration is discarded first. Axes, clamps, tools and
    /// build volume load in that order; a missing section leaves only its own
    /// component at defaults. Nothing here fails, recovered conditions are
    /// returned in the report.
    pub fn load_configuration(&mut self, descriptor: MachineDescriptor) -> LoadReport {
        let mut report = LoadReport::new();

        self.axes = AxisSet::new();
        self.build_volume = BuildVolume::default();
        self.tools.clear();
        self.clamps.clear();

        for entry in &descriptor.malformed {
            report.push(Diagnostic::MalformedSection {
                section: entry.section.clone(),
                reason: entry.reason.clone(),
            });
        }

        if let Some(geometry) = &descriptor.geometry {
            self.axes.load(geometry, &mut report);
        }
        if let Some(clamps) = &descriptor.clamps {
            self.clamps.load(clamps);
        }
        if let Some(tools) = &descriptor.tools {
            self.tools.load(tools, &mut report);
        }
        if let Some(geometry) = &descriptor.geometry {
            self.build_volume.load(geometry);
        }

        tracing::info!(
            machine = descriptor.name.as_deref().unwrap_or("<unnamed>"),
            axes = self.axes.available_axes().bits(),
            tools = self.tools.len(),
            clamps = self.clamps.len(),
            diagnostics = report.len(),
            "machine configuration loaded"
        );

        self.descriptor = Some(descriptor);
        self.configured = true;
        report
    }

    /// Check if a configuration has been loaded.
    pub fn is_configured(&self) -> bool {
        self.configured
    }

    /// The descriptor the machine was loaded from.
    pub fn descriptor(&self) -> Option<&MachineDescriptor> {
        self.descriptor.as_ref()
    }

    /// Machine name from the descriptor.
    pub fn name(&self) -> Option<&str> {
        self.descriptor.as_ref()?.name.as_deref()
    }

    // ---------------------------------------------------------------------
    // Axes
    // ---------------------------------------------------------------------

    /// The axis set.
    pub fn axes(&self) -> &AxisSet {
        &self.axes
    }

    /// Check if the machine has an axis.
    pub fn has_axis(&self, id: AxisId) -> bool {
        self.axes.has_axis(id)
    }

    /// The set of present axes.
    pub fn available_axes(&self) -> AxisFlags {
        self.axes.available_axes()
    }

    /// Convert millimeters to whole steps.
    pub fn millimeters_to_steps(&self, mm: &Position) -> StepPosition {
        self.axes.millimeters_to_steps(mm)
    }

    /// Convert steps to millimeters.
    pub fn steps_to_millimeters(&self, steps: &StepPosition) -> Position {
        self.axes.steps_to_millimeters(steps)
    }

    /// Maximum feedrates of all axes in millimeters per minute.
    pub fn maximum_feedrates(&self) -> Position {
        self.axes.maximum_feedrates()
    }

    /// Endstop wiring of an axis.
    pub fn endstops(&self, id: AxisId) -> Endstops {
        self.axes.endstops(id)
    }

    // ---------------------------------------------------------------------
    // Drives and gearing
    // ---------------------------------------------------------------------

    /// Mark drives enabled.
    pub fn enable_drives(&self) {
        self.drives_enabled.store(true, Ordering::SeqCst);
    }

    /// Mark drives disabled.
    pub fn disable_drives(&self) {
        self.drives_enabled.store(false, Ordering::SeqCst);
    }

    /// Check the drive flag.
    pub fn are_drives_enabled(&self) -> bool {
        self.drives_enabled.load(Ordering::SeqCst)
    }

    /// Store a gear ratio index. Not checked against any ratio table.
    pub fn change_gear_ratio(&self, index: i32) {
        self.gear_ratio.store(index, Ordering::SeqCst);
    }

    /// The stored gear ratio index.
    pub fn gear_ratio(&self) -> i32 {
        self.gear_ratio.load(Ordering::SeqCst)
    }

    // ---------------------------------------------------------------------
    // Tools
    // ---------------------------------------------------------------------

    /// Make the tool at `index` current.
    ///
    /// On failure the null tool becomes current. An out-of-range index on a
    /// machine that was never configured is expected (placeholder machines
    /// have no tools) and returns `Ok`.
    ///
    /// # Errors
    ///
    /// Returns a `ToolError` if a configured machine has no tool at `index`,
    /// or if the slot at `index` is empty.
    pub fn select_tool(&self, index: i32) -> Result<()> {
        match self.tools.select(index) {
            Ok(tool) => {
                tracing::debug!(index, tool = %tool.name, "selected tool");
                Ok(())
            }
            Err(Error::Tool(ToolError::OutOfRange { .. })) if !self.configured => Ok(()),
            Err(e) => {
                tracing::warn!(index, error = %e, "cannot select non-existent tool");
                Err(e)
            }
        }
    }

    /// The current tool, or the null tool if none is selected.
    pub fn current_tool(&self) -> Arc<Tool> {
        self.tools.current()
    }

    /// Get the tool at `index`.
    ///
    /// # Errors
    ///
    /// Returns a `ToolError` if there is no tool at `index`.
    pub fn tool(&self, index: i32) -> Result<Arc<Tool>> {
        self.tools.get(index).map_err(|e| {
            tracing::warn!(index, error = %e, "cannot get non-existent tool");
            e
        })
    }

    /// Replace the tool at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ToolError::OutOfRange` if `index` is not inside the registry.
    pub fn set_tool(&mut self, index: i32, tool: Tool) -> Result<()> {
        self.tools.set(index, tool).map_err(|e| {
            tracing::warn!(index, error = %e, "cannot set non-existent tool");
            e
        })
    }

    /// Append a tool.
    pub fn add_tool(&mut self, tool: Tool) {
        self.tools.add(tool);
    }

    /// The tool registry.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    // ---------------------------------------------------------------------
    // Clamps
    // ---------------------------------------------------------------------

    /// Get the clamp at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ClampError::OutOfRange` if there is no clamp at `index`.
    pub fn clamp(&self, index: i32) -> Result<&Clamp> {
        self.clamps.get(index).map_err(|e| {
            tracing::warn!(index, error = %e, "cannot get non-existent clamp");
            e
        })
    }

    /// The clamp registry.
    pub fn clamps(&self) -> &ClampRegistry {
        &self.clamps
    }

    // ---------------------------------------------------------------------
    // Build volume
    // ---------------------------------------------------------------------

    /// The build volume.
    pub fn build_volume(&self) -> &BuildVolume {
        &self.build_volume
    }

    /// Mutable access to the build volume.
    pub fn build_volume_mut(&mut self) -> &mut BuildVolume {
        &mut self.build_volume
    }
}
