use approx::assert_relative_eq;
use coons::prelude::*;
use nalgebra::{Point3, Vector3};
use rand::{rngs::StdRng, SeedableRng};

fn assert_same_geometry(a: &CoonsSurface<f64>, b: &CoonsSurface<f64>) {
    for id in CoonsSurface::<f64>::control_point_ids() {
        assert_relative_eq!(*a.control_point(id), *b.control_point(id), epsilon = 1e-12);
    }
}

#[test]
fn test_edit_session() {
    let mut surface = CoonsSurface::<f64>::default();
    assert_eq!(surface.patch(0., 0.), *surface.curve(Boundary::U0).start());
    assert_eq!(surface.grid().resolution(), 26);

    // select the u1/v1 corner and lift it
    surface.activate_controls();
    surface.set_active_control_point_index(6);
    let corner = ControlPointId::new(Boundary::V1, Slot::P3);
    assert_eq!(surface.active_control_point(), Some(*surface.control_point(corner)));

    let lifted = Point3::new(0.5, 0.5, 0.3);
    surface.set_active_control_point(lifted, Some(Axis::Z));
    assert_eq!(surface.selected_axis(), Some(Axis::Z));
    assert_eq!(*surface.curve(Boundary::U1).end(), lifted);
    assert_eq!(*surface.curve(Boundary::V1).end(), lifted);
    assert_relative_eq!(surface.patch(1., 1.), lifted, epsilon = 1e-12);

    // the grid follows every edit
    let last = surface.grid().resolution() - 1;
    assert_relative_eq!(*surface.grid().point(last, last).unwrap(), lifted, epsilon = 1e-12);

    surface.nudge_active_control_point(Axis::X, -2.);
    assert_relative_eq!(surface.patch(1., 1.).x, 0.49, epsilon = 1e-12);

    surface.deactivate_controls();
    assert!(surface.control_polygon().is_empty());
    assert_eq!(surface.active_control_point(), None);
    surface.activate_controls();
    assert_eq!(surface.active_control_point_index(), Some(6));
    assert_eq!(surface.control_polygon().len(), 8);
}

#[test]
fn test_randomize_then_restore() {
    let mut surface = CoonsSurface::<f64>::default();
    surface.rotate(&Vector3::new(0., 1., 1.), 0.8);

    let mut engine = MorphEngine::default();
    let mut rng = StdRng::seed_from_u64(11);
    engine.randomize(&surface, &mut rng, 10, None, None).unwrap();
    assert_eq!(engine.run_to_completion(&mut surface), 11);
    assert!(surface.is_resolved(0.));

    // the same seed produces the same target
    let mut replay = CoonsSurface::<f64>::default();
    replay.rotate(&Vector3::new(0., 1., 1.), 0.8);
    let mut rng = StdRng::seed_from_u64(11);
    engine.randomize(&replay, &mut rng, 4, None, None).unwrap();
    engine.run_to_completion(&mut replay);
    assert_same_geometry(&surface, &replay);

    engine
        .restore(&surface, DEFAULT_MORPH_DURATION, None, None)
        .unwrap();
    assert_eq!(
        engine.run_to_completion(&mut surface),
        DEFAULT_MORPH_DURATION + 1
    );
    assert_same_geometry(&surface, &CoonsSurface::default());
}

#[test]
fn test_interrupted_morph() {
    let mut surface = CoonsSurface::<f64>::default();
    let mut target = surface.clone();
    target.rotate(&Vector3::x(), std::f64::consts::FRAC_PI_2);

    let mut engine = MorphEngine::default();
    engine.morph(&surface, target.clone(), 30, None, None).unwrap();
    for _ in 0..10 {
        assert!(matches!(engine.step(&mut surface), MorphStatus::Running(_)));
    }
    assert!(engine.stop());

    // a new morph starts from wherever the surface was left
    engine.morph(&surface, target.clone(), 5, None, None).unwrap();
    engine.run_to_completion(&mut surface);
    assert_same_geometry(&surface, &target);
    assert_relative_eq!(surface.patch(0., 1.), Point3::new(-0.5, 0., 0.5), epsilon = 1e-12);
}
