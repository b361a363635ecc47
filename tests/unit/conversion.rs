//! Property tests for step/millimeter conversion.

use machine_model::{AxisAttributes, AxisId, AxisSet, Position, StepPosition, StepsPerMm};
use proptest::prelude::*;

fn axis_set(scales: &[f64; AxisId::COUNT]) -> AxisSet {
    let mut axes = AxisSet::new();
    for id in AxisId::ALL {
        axes.set_axis(
            id,
            AxisAttributes {
                steps_per_mm: StepsPerMm::new(scales[id.index()]).unwrap(),
                ..Default::default()
            },
        );
    }
    axes
}

fn scale() -> impl Strategy<Value = f64> {
    prop_oneof![1.0f64..3200.0, -3200.0f64..-1.0]
}

proptest! {
    #[test]
    fn round_trip_within_one_step(
        scales in prop::array::uniform5(scale()),
        coords in prop::array::uniform5(-1000.0f64..1000.0),
    ) {
        let axes = axis_set(&scales);
        let p = Position::from_fn(|id| coords[id.index()]);

        let back = axes.steps_to_millimeters(&axes.millimeters_to_steps(&p));
        for id in AxisId::ALL {
            let step_mm = 1.0 / axes.steps_per_mm(id).value().abs();
            prop_assert!((back[id] - p[id]).abs() <= step_mm * 0.5 + 1e-9);
        }
    }

    #[test]
    fn whole_steps_survive_round_trip(
        scales in prop::array::uniform5(prop::sample::select(vec![1.0, 2.0, 16.0, 80.0, 400.0])),
        counts in prop::array::uniform5(-1_000_000i64..1_000_000),
    ) {
        let axes = axis_set(&scales);
        let steps = StepPosition::from_fn(|id| counts[id.index()]);

        let again = axes.millimeters_to_steps(&axes.steps_to_millimeters(&steps));
        prop_assert_eq!(again, steps);
    }

    #[test]
    fn unconfigured_axes_convert_one_to_one(mm in -10_000.0f64..10_000.0) {
        let axes = AxisSet::new();
        let steps = axes.millimeters_to_steps(&Position::new(mm, mm, mm, mm, mm));
        for id in AxisId::ALL {
            prop_assert_eq!(steps[id], mm.round() as i64);
        }
    }
}
