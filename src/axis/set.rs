//! Present axes, their attributes, and step/millimeter conversion.

use crate::config::{
    Diagnostic, GeometrySection, LoadReport, Node, Position, StepPosition, StepsPerMm,
};

use super::{AxisFlags, AxisId, Endstops};

/// Attributes of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisAttributes {
    /// Travel length in millimeters.
    pub length: f64,
    /// Maximum feedrate in millimeters per minute.
    pub max_feedrate: f64,
    /// Controller steps per millimeter.
    pub steps_per_mm: StepsPerMm,
    /// Limit switch wiring.
    pub endstops: Endstops,
}

impl AxisAttributes {
    /// Parse attributes from an axis node.
    ///
    /// Each attribute falls back to its default on its own. `stepspermm`
    /// falls back to the legacy `scale` name when absent.
    pub fn from_node(id: AxisId, node: &Node, report: &mut LoadReport) -> Self {
        let mut attrs = Self::default();

        if let Some(length) = node.attribute_f64("length") {
            attrs.length = length;
        }
        if let Some(feedrate) = node.attribute_f64("maxfeedrate") {
            attrs.max_feedrate = feedrate;
        }

        let raw_scale = if node.attributes.contains_key("stepspermm") {
            node.attribute_f64("stepspermm")
        } else {
            node.attribute_f64("scale")
        };
        if let Some(value) = raw_scale {
            match StepsPerMm::new(value) {
                Some(scale) => attrs.steps_per_mm = scale,
                None => report.push(Diagnostic::InvalidStepsPerMm { axis: id, value }),
            }
        }

        if let Some(token) = node.attribute("endstops") {
            match token.parse() {
                Ok(endstops) => attrs.endstops = endstops,
                Err(_) => report.push(Diagnostic::UnrecognizedEndstops {
                    axis: id,
                    value: token,
                }),
            }
        }

        attrs
    }
}

/// The axes a machine has and their per-axis configuration.
///
/// Attributes of absent axes keep their defaults and are not meaningful.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AxisSet {
    present: AxisFlags,
    lengths: Position,
    max_feedrates: Position,
    steps_per_mm: [StepsPerMm; AxisId::COUNT],
    endstops: [Endstops; AxisId::COUNT],
}

impl AxisSet {
    /// Create an empty set with default attributes on every axis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate axes from a geometry section.
    ///
    /// Nodes with a missing or unknown `id` are skipped with a diagnostic.
    pub fn load(&mut self, geometry: &GeometrySection, report: &mut LoadReport) {
        for node in &geometry.axes {
            let raw_id = node.attribute("id");
            let Some(id) = raw_id.as_deref().and_then(|s| s.parse::<AxisId>().ok()) else {
                report.push(Diagnostic::UnrecognizedAxis(raw_id));
                continue;
            };

            let attrs = AxisAttributes::from_node(id, node, report);
            tracing::debug!(
                axis = %id,
                length_mm = attrs.length,
                max_feedrate_mm_per_min = attrs.max_feedrate,
                steps_per_mm = attrs.steps_per_mm.value(),
                endstops = ?attrs.endstops,
                "loaded axis"
            );
            self.set_axis(id, attrs);
        }
    }

    /// Mark an axis present and store its attributes.
    pub fn set_axis(&mut self, id: AxisId, attrs: AxisAttributes) {
        self.present |= AxisFlags::from(id);
        self.lengths[id] = attrs.length;
        self.max_feedrates[id] = attrs.max_feedrate;
        self.steps_per_mm[id.index()] = attrs.steps_per_mm;
        self.endstops[id.index()] = attrs.endstops;
    }

    /// Check if the machine has an axis.
    #[inline]
    pub fn has_axis(&self, id: AxisId) -> bool {
        self.present.contains_axis(id)
    }

    /// The set of present axes, by value.
    #[inline]
    pub fn available_axes(&self) -> AxisFlags {
        self.present
    }

    /// All attributes of one axis.
    pub fn attributes(&self, id: AxisId) -> AxisAttributes {
        AxisAttributes {
            length: self.lengths[id],
            max_feedrate: self.max_feedrates[id],
            steps_per_mm: self.steps_per_mm[id.index()],
            endstops: self.endstops[id.index()],
        }
    }

    /// Travel length in millimeters.
    pub fn length(&self, id: AxisId) -> f64 {
        self.lengths[id]
    }

    /// Maximum feedrate in millimeters per minute.
    pub fn max_feedrate(&self, id: AxisId) -> f64 {
        self.max_feedrates[id]
    }

    /// Steps per millimeter.
    pub fn steps_per_mm(&self, id: AxisId) -> StepsPerMm {
        self.steps_per_mm[id.index()]
    }

    /// Endstop wiring.
    pub fn endstops(&self, id: AxisId) -> Endstops {
        self.endstops[id.index()]
    }

    /// Travel lengths of all axes.
    pub fn maximum(&self) -> Position {
        self.lengths
    }

    /// Maximum feedrates of all axes.
    pub fn maximum_feedrates(&self) -> Position {
        self.max_feedrates
    }

    /// Convert millimeters to whole steps.
    ///
    /// Rounds half away from zero; results outside `i64` saturate.
    pub fn millimeters_to_steps(&self, mm: &Position) -> StepPosition {
        StepPosition::from_fn(|id| {
            let steps = mm[id] * self.steps_per_mm(id).value();
            steps.round() as i64
        })
    }

    /// Convert steps to millimeters.
    pub fn steps_to_millimeters(&self, steps: &StepPosition) -> Position {
        Position::from_fn(|id| steps[id] as f64 / self.steps_per_mm(id).value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(id: &str) -> Node {
        Node::new().with("id", id)
    }

    fn load(nodes: Vec<Node>) -> (AxisSet, LoadReport) {
        let mut axes = AxisSet::new();
        let mut report = LoadReport::new();
        axes.load(&GeometrySection { axes: nodes }, &mut report);
        (axes, report)
    }

    #[test]
    fn test_full_axis_node() {
        let node = axis("x")
            .with("length", "200")
            .with("maxfeedrate", "5000")
            .with("stepspermm", "80")
            .with("endstops", "min");
        let (axes, report) = load(vec![node]);

        assert!(report.is_clean());
        assert!(axes.has_axis(AxisId::X));
        assert!(!axes.has_axis(AxisId::Y));
        let attrs = axes.attributes(AxisId::X);
        assert_eq!(attrs.length, 200.0);
        assert_eq!(attrs.max_feedrate, 5000.0);
        assert_eq!(attrs.steps_per_mm.value(), 80.0);
        assert_eq!(attrs.endstops, Endstops::Min);
    }

    #[test]
    fn test_maximum_collects_axis_lengths() {
        let (axes, _) = load(vec![
            axis("x").with("length", "200"),
            axis("z").with("length", "120.5"),
        ]);

        let maximum = axes.maximum();
        assert_eq!(maximum, Position::new(200.0, 0.0, 120.5, 0.0, 0.0));
        assert_eq!(maximum[AxisId::X], axes.length(AxisId::X));
    }

    #[test]
    fn test_legacy_scale_attribute() {
        let (axes, _) = load(vec![axis("z").with("scale", "320")]);
        assert_eq!(axes.steps_per_mm(AxisId::Z).value(), 320.0);
    }

    #[test]
    fn test_stepspermm_wins_over_scale() {
        let node = axis("z").with("stepspermm", "400").with("scale", "320");
        let (axes, _) = load(vec![node]);
        assert_eq!(axes.steps_per_mm(AxisId::Z).value(), 400.0);
    }

    #[test]
    fn test_malformed_attributes_default_independently() {
        let node = axis("y")
            .with("length", "long")
            .with("maxfeedrate", "3000")
            .with("stepspermm", "??");
        let (axes, report) = load(vec![node]);

        assert!(axes.has_axis(AxisId::Y));
        assert_eq!(axes.length(AxisId::Y), 0.0);
        assert_eq!(axes.max_feedrate(AxisId::Y), 3000.0);
        assert_eq!(axes.steps_per_mm(AxisId::Y).value(), 1.0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_zero_steps_per_mm_is_rejected() {
        let (axes, report) = load(vec![axis("x").with("stepspermm", "0")]);
        assert_eq!(axes.steps_per_mm(AxisId::X).value(), 1.0);
        assert_eq!(
            report.iter().next(),
            Some(&Diagnostic::InvalidStepsPerMm {
                axis: AxisId::X,
                value: 0.0,
            })
        );
    }

    #[test]
    fn test_unknown_axis_is_skipped() {
        let (axes, report) = load(vec![axis("w").with("length", "10"), axis("x")]);
        assert_eq!(axes.available_axes(), AxisFlags::X);
        assert_eq!(
            report.iter().next(),
            Some(&Diagnostic::UnrecognizedAxis(Some("w".into())))
        );
    }

    #[test]
    fn test_missing_id_is_skipped() {
        let (axes, report) = load(vec![Node::new().with("length", "10")]);
        assert!(axes.available_axes().is_empty());
        assert_eq!(report.len(), 1);
    }

    #[test]
    fn test_unknown_endstops_default_to_none() {
        let (axes, report) = load(vec![axis("x").with("endstops", "sideways")]);
        assert_eq!(axes.endstops(AxisId::X), Endstops::None);
        assert!(matches!(
            report.iter().next(),
            Some(Diagnostic::UnrecognizedEndstops {
                axis: AxisId::X,
                ..
            })
        ));
    }

    #[test]
    fn test_conversion_uses_per_axis_scale() {
        let mut axes = AxisSet::new();
        axes.set_axis(
            AxisId::X,
            AxisAttributes {
                steps_per_mm: StepsPerMm::new(80.0).unwrap(),
                ..Default::default()
            },
        );

        let steps = axes.millimeters_to_steps(&Position::new(10.0, 10.0, 0.0, 0.0, 0.0));
        assert_eq!(steps[AxisId::X], 800);
        // Unconfigured axes convert 1:1.
        assert_eq!(steps[AxisId::Y], 10);

        let mm = axes.steps_to_millimeters(&StepPosition::new(40, 3, 0, 0, 0));
        assert_eq!(mm[AxisId::X], 0.5);
        assert_eq!(mm[AxisId::Y], 3.0);
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        let axes = AxisSet::new();
        let steps = axes.millimeters_to_steps(&Position::new(0.5, -0.5, 1.49, 2.5, -2.5));
        assert_eq!(steps, StepPosition::new(1, -1, 1, 3, -3));
    }
}
