use planetsim::simulation::states::{Body, NVec2, SimulationState};
use planetsim::simulation::params::Parameters;
use planetsim::simulation::forces::{AccelSet, NewtonianGravity};
use planetsim::simulation::integrator::{clamped_accelerations, damped_euler_step};
use planetsim::{Error, Phase, ScenarioConfig, SimulationConfig, SimulationEngine, SingularityPolicy};

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Build a simple 2-body state separated along the x-axis
pub fn two_body_system(dist: f64, m1: f64, m2: f64) -> SimulationState {
    SimulationState::from_bodies(vec![
        Body::at_rest(NVec2::new(-dist / 2.0, 0.0), m1).unwrap(),
        Body::at_rest(NVec2::new(dist / 2.0, 0.0), m2).unwrap(),
    ])
    .unwrap()
}

/// Reference physics parameters for tests
pub fn test_params() -> Parameters {
    Parameters {
        g: 100.0,
        friction: 0.9,
        max_acc: 30.0,
        singularity: SingularityPolicy::Fail,
    }
}

/// Build a gravity term + AccelSet
pub fn gravity_set(p: &Parameters) -> AccelSet {
    AccelSet::new().with(NewtonianGravity {
        g: p.g,
        singularity: p.singularity,
    })
}

/// Seeded engine over `cfg`, already initialized
fn running_engine(cfg: SimulationConfig, seed: u64) -> SimulationEngine {
    let scenario = ScenarioConfig {
        simulation: cfg,
        ..ScenarioConfig::default()
    };
    let mut engine = SimulationEngine::with_rng(scenario, StdRng::seed_from_u64(seed)).unwrap();
    engine.initialize().unwrap();
    engine
}

fn assert_in_ranges(state: &SimulationState, cfg: &SimulationConfig) {
    assert_eq!(state.len(), cfg.particle_count);
    for b in state.bodies() {
        assert!(b.mass() >= 1.0 && b.mass() < cfg.max_mass, "mass {} out of range", b.mass());
        assert!(b.position().x >= 0.0 && b.position().x < cfg.spatial_extent[0]);
        assert!(b.position().y >= 0.0 && b.position().y < cfg.spatial_extent[1]);
        assert_eq!(b.velocity(), NVec2::zeros());
    }
}

// ==================================================================================
// Gravity tests
// ==================================================================================

#[test]
fn gravity_newton_third_law() {
    let sys = two_body_system(40.0, 2.0, 3.0);
    let gravity = NewtonianGravity { g: 100.0, singularity: SingularityPolicy::Fail };

    let mut force = vec![NVec2::zeros(); 2];
    gravity.net_forces(&sys, &mut force).unwrap();

    // G m1 m2 / d^2 = 100 * 6 / 1600
    assert!((force[0].x - 0.375).abs() < 1e-12);
    assert!((force[0] + force[1]).norm() < 1e-12, "forces not opposite: {:?}", force);
}

#[test]
fn gravity_points_toward_other_body() {
    let sys = two_body_system(20.0, 1.0, 1.0);
    let p = test_params();

    let mut acc = vec![NVec2::zeros(); 2];
    gravity_set(&p).accumulate_accels(&sys, &mut acc).unwrap();

    let dx = sys.bodies()[1].position() - sys.bodies()[0].position();
    assert!(acc[0].dot(&dx) > 0.0, "Acceleration is not toward second body");
    assert!(acc[1].dot(&dx) < 0.0, "Acceleration is not toward first body");
}

#[test]
fn gravity_inverse_square_law() {
    let sys_r = two_body_system(50.0, 1.0, 1.0);
    let sys_2r = two_body_system(100.0, 1.0, 1.0);
    let forces = gravity_set(&test_params());

    let mut acc_r = vec![NVec2::zeros(); 2];
    let mut acc_2r = vec![NVec2::zeros(); 2];
    forces.accumulate_accels(&sys_r, &mut acc_r).unwrap();
    forces.accumulate_accels(&sys_2r, &mut acc_2r).unwrap();

    let ratio = acc_r[0].norm() / acc_2r[0].norm();
    assert!((ratio - 4.0).abs() < 1e-9, "Expected 4x, got {}", ratio);
}

#[test]
fn acceleration_is_force_over_own_mass() {
    let sys = two_body_system(10.0, 2.0, 8.0);
    let mut acc = vec![NVec2::zeros(); 2];
    gravity_set(&test_params()).accumulate_accels(&sys, &mut acc).unwrap();

    // |F| = 100 * 16 / 100 = 16
    assert!((acc[0].x - 8.0).abs() < 1e-12);
    assert!((acc[1].x + 2.0).abs() < 1e-12);
}

// ==================================================================================
// Clamping tests
// ==================================================================================

#[test]
fn close_heavy_pair_is_clamped_exactly() {
    // raw acceleration 100 * 100 / 1 = 1e4 per unit mass, far above 30
    let sys = two_body_system(1.0, 100.0, 100.0);
    let p = test_params();

    let acc = clamped_accelerations(&sys, &gravity_set(&p), &p).unwrap();
    assert_eq!(acc[0], NVec2::new(30.0, 0.0));
    assert_eq!(acc[1], NVec2::new(-30.0, 0.0));

    let mut stepped = sys.clone();
    damped_euler_step(&mut stepped, &gravity_set(&p), &p).unwrap();
    assert!((stepped.bodies()[0].velocity().x - 27.0).abs() < 1e-12);
    assert!((stepped.bodies()[1].velocity().x + 27.0).abs() < 1e-12);
}

#[test]
fn diagonal_clamp_exceeds_max_in_norm() {
    let sys = SimulationState::from_bodies(vec![
        Body::at_rest(NVec2::new(0.0, 0.0), 100.0).unwrap(),
        Body::at_rest(NVec2::new(1.0, 1.0), 100.0).unwrap(),
    ])
    .unwrap();
    let p = test_params();

    let acc = clamped_accelerations(&sys, &gravity_set(&p), &p).unwrap();
    assert_eq!(acc[0], NVec2::new(30.0, 30.0));
    assert!((acc[0].norm() - 30.0 * 2f64.sqrt()).abs() < 1e-12);
}

#[test]
fn weak_pull_is_not_clamped() {
    let sys = two_body_system(100.0, 1.0, 1.0);
    let p = test_params();

    let acc = clamped_accelerations(&sys, &gravity_set(&p), &p).unwrap();
    assert!((acc[0].x - 0.01).abs() < 1e-15);
}

// ==================================================================================
// Integrator tests
// ==================================================================================

#[test]
fn lone_body_decays_by_friction_only() {
    let p = test_params();
    let forces = gravity_set(&p);
    let mut sys = SimulationState::from_bodies(vec![
        Body::new(NVec2::new(0.0, 0.0), NVec2::new(2.0, 0.0), 50.0).unwrap(),
    ])
    .unwrap();

    let mut expected_x = 0.0;
    let mut expected_v = 2.0;
    for _ in 0..3 {
        damped_euler_step(&mut sys, &forces, &p).unwrap();
        expected_v *= 0.9;
        expected_x += expected_v;
    }

    let b = &sys.bodies()[0];
    assert!((b.velocity().x - 1.458).abs() < 1e-12);
    assert_eq!(b.velocity().y, 0.0);
    assert!((b.position().x - expected_x).abs() < 1e-12);
    assert_eq!(sys.tick(), 3);
}

#[test]
fn step_is_order_independent() {
    let mut engine = running_engine(SimulationConfig { particle_count: 7, ..Default::default() }, 3);
    for _ in 0..5 {
        engine.step().unwrap();
    }
    let start = engine.state().unwrap().clone();
    let p = test_params();
    let forces = gravity_set(&p);

    // permutation and its inverse
    let perm = [4usize, 0, 6, 2, 5, 1, 3];
    let permuted_bodies: Vec<Body> = perm.iter().map(|&k| start.bodies()[k].clone()).collect();
    let mut permuted = SimulationState::from_bodies(permuted_bodies).unwrap();

    let mut reference = start.clone();
    damped_euler_step(&mut reference, &forces, &p).unwrap();
    damped_euler_step(&mut permuted, &forces, &p).unwrap();

    for (slot, &k) in perm.iter().enumerate() {
        let a = &permuted.bodies()[slot];
        let b = &reference.bodies()[k];
        assert!((a.position() - b.position()).norm() < 1e-9);
        assert!((a.velocity() - b.velocity()).norm() < 1e-9);
        assert_eq!(a.mass(), b.mass());
    }
}

#[test]
fn coincident_pair_fails_by_default() {
    let p = test_params();
    let mut sys = SimulationState::from_bodies(vec![
        Body::at_rest(NVec2::new(3.0, 3.0), 10.0).unwrap(),
        Body::at_rest(NVec2::new(3.0, 3.0), 20.0).unwrap(),
    ])
    .unwrap();
    let before = sys.clone();

    let err = damped_euler_step(&mut sys, &gravity_set(&p), &p).unwrap_err();
    assert_eq!(err, Error::NumericSingularity { i: 0, j: 1 });
    assert_eq!(sys, before);
}

#[test]
fn coincident_pair_propagates_nan_when_asked() {
    let p = Parameters { singularity: SingularityPolicy::Propagate, ..test_params() };
    let mut sys = SimulationState::from_bodies(vec![
        Body::at_rest(NVec2::new(3.0, 3.0), 10.0).unwrap(),
        Body::at_rest(NVec2::new(3.0, 3.0), 20.0).unwrap(),
        Body::at_rest(NVec2::new(300.0, 300.0), 20.0).unwrap(),
    ])
    .unwrap();

    damped_euler_step(&mut sys, &gravity_set(&p), &p).unwrap();

    // 0 * inf / 0 is NaN, and the clamp keeps NaN
    assert!(sys.bodies()[0].position().x.is_nan());
    assert!(sys.bodies()[1].position().x.is_nan());
    assert!(sys.bodies()[2].position().x.is_finite());
}

// ==================================================================================
// Engine tests
// ==================================================================================

#[test]
fn step_before_initialize_is_rejected() {
    let mut engine = SimulationEngine::with_rng(ScenarioConfig::default(), StdRng::seed_from_u64(1)).unwrap();
    assert_eq!(engine.phase(), Phase::Uninitialized);
    assert!(matches!(engine.step(), Err(Error::CallOutOfSequence(_))));
    assert!(matches!(engine.accelerations(), Err(Error::CallOutOfSequence(_))));
    assert!(engine.state().is_none());
}

#[test]
fn invalid_configuration_rejected_up_front() {
    let mut cfg = ScenarioConfig::default();
    cfg.simulation.max_mass = 0.5;
    assert!(matches!(SimulationEngine::new(cfg), Err(Error::InvalidConfiguration(_))));

    let mut cfg = ScenarioConfig::default();
    cfg.simulation.particle_count = 0;
    assert!(matches!(SimulationEngine::new(cfg), Err(Error::InvalidConfiguration(_))));
}

#[test]
fn count_and_mass_hold_across_steps() {
    let cfg = SimulationConfig { particle_count: 12, ..Default::default() };
    let mut engine = running_engine(cfg.clone(), 9);
    let masses = engine.state().unwrap().masses();

    for _ in 0..200 {
        let state = engine.step().unwrap();
        assert_eq!(state.len(), 12);
    }

    let state = engine.state().unwrap();
    assert_eq!(state.masses(), masses);
    assert!(state.masses().iter().all(|&m| m > 0.0));
    assert_eq!(state.tick(), 200);
    assert_eq!(engine.phase(), Phase::Running);
}

#[test]
fn reset_draws_new_valid_configuration() {
    let cfg = SimulationConfig::default();
    let mut engine = running_engine(cfg.clone(), 21);
    let first = engine.state().unwrap().clone();
    assert_in_ranges(&first, &cfg);

    engine.step().unwrap();
    let second = engine.reset().unwrap().clone();
    assert_in_ranges(&second, &cfg);

    assert_eq!(second.tick(), 0);
    assert_ne!(first.positions(), second.positions());
    assert_ne!(first.masses(), second.masses());
}

#[test]
fn same_seed_same_start() {
    let cfg = SimulationConfig { seed: Some(1234), ..Default::default() };
    let scenario = ScenarioConfig { simulation: cfg, ..ScenarioConfig::default() };

    let mut a = SimulationEngine::new(scenario.clone()).unwrap();
    let mut b = SimulationEngine::new(scenario).unwrap();
    assert_eq!(a.initialize().unwrap(), b.initialize().unwrap());

    for _ in 0..10 {
        a.step().unwrap();
        b.step().unwrap();
    }
    assert_eq!(a.state(), b.state());
}

#[test]
fn explicit_bodies_survive_reset() {
    let yaml = "bodies:\n  - x: [100.0, 100.0]\n    v: [1.0, 0.0]\n    m: 5.0\n  - x: [200.0, 100.0]\n    m: 9.0\n";
    let scenario = ScenarioConfig::from_yaml_str(yaml).unwrap();
    let mut engine = SimulationEngine::with_rng(scenario, StdRng::seed_from_u64(0)).unwrap();

    let start = engine.initialize().unwrap().clone();
    assert_eq!(start.len(), 2);
    assert_eq!(start.velocities()[0], NVec2::new(1.0, 0.0));
    assert_eq!(start.masses(), vec![5.0, 9.0]);

    engine.step().unwrap();
    assert_eq!(engine.reset().unwrap(), &start);
}

#[test]
fn accelerations_match_next_step() {
    let mut engine = running_engine(SimulationConfig { particle_count: 5, ..Default::default() }, 77);
    let before = engine.state().unwrap().clone();
    let acc = engine.accelerations().unwrap();
    let after = engine.step().unwrap();

    for i in 0..5 {
        let expected = (before.velocities()[i] + acc[i]) * 0.9;
        assert!((after.velocities()[i] - expected).norm() < 1e-12);
        assert!(acc[i].x.abs() <= 30.0 && acc[i].y.abs() <= 30.0);
    }
}
