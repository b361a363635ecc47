//! Machine status example
//!
//! Loads a machine descriptor, prints its axes and tools, and converts a
//! point to steps. Run with `RUST_LOG=debug` to see loading diagnostics.
//!
//! ```sh
//! cargo run --example machine_status
//! cargo run --example machine_status -- path/to/machine.toml
//! ```

use machine_model::{load_descriptor, parse_descriptor, AxisId, MachineModel, Position};
use tracing_subscriber::EnvFilter;

const CUPCAKE: &str = include_str!("cupcake.toml");

fn main() -> machine_model::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let descriptor = match std::env::args().nth(1) {
        Some(path) => load_descriptor(path)?,
        None => parse_descriptor(CUPCAKE)?,
    };

    let mut machine = MachineModel::new();
    let report = machine.load_configuration(descriptor);

    println!("=== {} ===", machine.name().unwrap_or("unnamed machine"));

    for id in machine.available_axes().axes() {
        let attrs = machine.axes().attributes(id);
        println!(
            "  {}: {:>7.1} mm  {:>7.1} mm/min  {:>10.4} steps/mm  endstops {:?}",
            id,
            attrs.length,
            attrs.max_feedrate,
            attrs.steps_per_mm.value(),
            attrs.endstops
        );
    }

    let volume = machine.build_volume();
    println!(
        "  build volume: {} x {} x {} mm",
        volume.x(),
        volume.y(),
        volume.z()
    );

    for tool in machine.tools().iter() {
        let kind = tool.kind.as_deref().unwrap_or("?");
        println!("  tool #{}: {} ({})", tool.index, tool.name, kind);
    }
    println!("  current tool: {}", machine.current_tool().name);

    if !report.is_clean() {
        println!("  {} diagnostic(s):", report.len());
        for diagnostic in report.iter() {
            println!("    - {}", diagnostic);
        }
    }

    let target = Position::new(50.0, 25.0, 10.0, 0.0, 0.0);
    let steps = machine.millimeters_to_steps(&target);
    println!(
        "  (50, 25, 10) mm -> X {} Y {} Z {} steps",
        steps[AxisId::X],
        steps[AxisId::Y],
        steps[AxisId::Z]
    );

    Ok(())
}
