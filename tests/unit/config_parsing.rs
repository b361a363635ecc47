//! Unit tests for TOML descriptor parsing.

use machine_model::config::{parse_catalog, parse_descriptor, MachineDescriptor};
use machine_model::tool::{MAX_TOOLS, UNASSIGNED_INDEX};
use machine_model::{AxisId, Diagnostic, MachineModel};

/// Test parsing a descriptor with every section.
#[test]
fn test_parse_all_sections() {
    let toml_str = r#"
name = "Thing-O-Matic"

[[geometry.axis]]
id = "x"
length = 106
stepspermm = 47.069852

[[clamps.clamp]]
name = "platform"

[[tools.tool]]
index = 0
name = "Mk7"
type = "extruder"
motor_steps = 200
"#;

    let descriptor: MachineDescriptor = parse_descriptor(toml_str).expect("Failed to parse TOML");
    assert_eq!(descriptor.name.as_deref(), Some("Thing-O-Matic"));

    let axis = &descriptor.geometry.as_ref().unwrap().axes[0];
    assert_eq!(axis.attribute("id").as_deref(), Some("x"));
    assert_eq!(axis.attribute_f64("stepspermm"), Some(47.069852));

    let clamps = descriptor.clamps.as_ref().unwrap();
    let clamp = &clamps.clamps[0];
    assert_eq!(clamp.attribute("name").as_deref(), Some("platform"));

    let tool = &descriptor.tools.as_ref().unwrap().tools[0];
    assert_eq!(tool.attribute_i32("index"), Some(0));
    assert_eq!(tool.attribute("motor_steps").as_deref(), Some("200"));
}

/// Test that sections are optional.
#[test]
fn test_parse_empty_descriptor() {
    let descriptor = parse_descriptor("").expect("Empty descriptor should parse");
    assert_eq!(descriptor, MachineDescriptor::default());
}

/// Test that a malformed attribute value does not reject the document.
#[test]
fn test_wrong_attribute_types_still_parse() {
    let toml_str = r#"
[[geometry.axis]]
id = "x"
length = { nested = true }
maxfeedrate = "fast"
stepspermm = 80
"#;

    let mut machine = MachineModel::new();
    let report = machine.load_configuration(parse_descriptor(toml_str).unwrap());

    assert!(report.is_clean());
    assert!(machine.has_axis(AxisId::X));
    assert_eq!(machine.axes().length(AxisId::X), 0.0);
    assert_eq!(machine.axes().max_feedrate(AxisId::X), 0.0);
    assert_eq!(machine.axes().steps_per_mm(AxisId::X).value(), 80.0);
}

/// Test tool indices that are missing, unparsable or explicit.
#[test]
fn test_tool_indices_from_toml() {
    let toml_str = r#"
[[tools.tool]]
name = "auto"

[[tools.tool]]
index = 4
name = "sparse"

[[tools.tool]]
index = "second"
name = "garbage index"
"#;

    let mut machine = MachineModel::new();
    machine.load_configuration(parse_descriptor(toml_str).unwrap());

    let tools = machine.tools();
    assert_eq!(tools.len(), 6);
    assert_eq!(tools.get(0).unwrap().name.as_str(), "auto");
    assert!(tools.slot(1).unwrap().is_empty());
    assert_eq!(tools.get(4).unwrap().name.as_str(), "sparse");
    assert_eq!(tools.get(5).unwrap().name.as_str(), "garbage index");
    assert_ne!(tools.get(5).unwrap().index, UNASSIGNED_INDEX);
    assert_eq!(machine.current_tool().name.as_str(), "auto");
}

/// Test that unknown top-level sections are ignored.
#[test]
fn test_unknown_sections_ignored() {
    let toml_str = r#"
[bookend]
start = "M104 S220"

[[geometry.axis]]
id = "z"
"#;

    let descriptor = parse_descriptor(toml_str).expect("Unknown sections should be ignored");
    assert_eq!(descriptor.geometry.unwrap().axes.len(), 1);
}

/// Test that a section of the wrong type does not reject the document.
#[test]
fn test_broken_tools_section_keeps_geometry() {
    let toml_str = r#"
[[geometry.axis]]
id = "x"
length = 200

[tools]
tool = 5
"#;

    let descriptor = parse_descriptor(toml_str).expect("Broken section should not reject");
    let mut machine = MachineModel::new();
    let report = machine.load_configuration(descriptor);

    assert_eq!(machine.build_volume().x(), 200);
    assert!(machine.has_axis(AxisId::X));
    assert!(machine.tools().is_empty());
    assert!(machine.tools().is_null_selected());

    let diagnostics: Vec<_> = report.iter().cloned().collect();
    assert_eq!(
        diagnostics,
        vec![Diagnostic::MalformedSection {
            section: "tools.tool".into(),
            reason: "expected an array of tables, found integer".into(),
        }]
    );
}

/// Test that a broken section inside a catalog entry only affects that entry.
#[test]
fn test_broken_section_in_catalog() {
    let toml_str = r#"
[[machine]]
name = "Broken"
geometry = "none"

[[machine]]
name = "Fine"

[[machine.geometry.axis]]
id = "y"
length = 75
"#;

    let catalog = parse_catalog(toml_str).expect("Catalog should parse");
    assert_eq!(catalog.machine_names().count(), 2);

    let broken = catalog.machine("Broken").unwrap();
    assert_eq!(broken.geometry, None);
    assert_eq!(broken.malformed.len(), 1);

    let mut machine = MachineModel::new();
    machine.load_configuration(catalog.take_machine("Fine").unwrap());
    assert_eq!(machine.build_volume().y(), 75);
}

/// Test that a huge tool index is rejected instead of growing the registry.
#[test]
fn test_tool_index_past_limit_is_rejected() {
    let toml_str = r#"
[[tools.tool]]
index = 0
name = "Extruder"

[[tools.tool]]
index = 2147483647
name = "runaway"
"#;

    let mut machine = MachineModel::new();
    let report = machine.load_configuration(parse_descriptor(toml_str).unwrap());

    assert_eq!(machine.tools().len(), 1);
    assert!(machine.tools().len() <= MAX_TOOLS);
    assert_eq!(machine.current_tool().name.as_str(), "Extruder");
    assert!(matches!(
        report.iter().next(),
        Some(Diagnostic::RejectedTool { name, .. }) if name == "runaway"
    ));
}
