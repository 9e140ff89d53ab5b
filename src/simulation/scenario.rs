//! Build fully-initialized simulation states from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and a random source and produces a
//! `SimulationState` at tick 0, either sampled or from the listed bodies.

use log::info;
use rand::Rng;

use crate::configuration::config::{BodyConfig, ScenarioConfig, SimulationConfig};
use crate::error::Result;
use crate::simulation::states::{Body, NVec2, SimulationState};

/// Produce a fresh state for `cfg`.
/// Explicit `bodies` win over random sampling; otherwise every field is drawn
/// from `rng`, so a seeded generator gives a reproducible start.
pub fn initialize<R: Rng>(cfg: &ScenarioConfig, rng: &mut R) -> Result<SimulationState> {
    cfg.validate()?;

    if cfg.bodies.is_empty() {
        random_state(&cfg.simulation, rng)
    } else {
        explicit_state(&cfg.bodies)
    }
}

/// Sample `particle_count` bodies at rest:
/// mass in [1, max_mass), position in [0, W) x [0, H).
pub fn random_state<R: Rng>(cfg: &SimulationConfig, rng: &mut R) -> Result<SimulationState> {
    cfg.validate()?;

    let [w, h] = cfg.spatial_extent;
    let mut state = SimulationState::zeroed(cfg.particle_count)?;

    for b in state.bodies_mut().iter_mut() {
        let m = 1.0 + (cfg.max_mass - 1.0) * rng.random::<f64>();
        let x = NVec2::new(rng.random::<f64>() * w, rng.random::<f64>() * h);
        *b = Body::at_rest(x, m)?;
    }

    info!("sampled {} bodies in a {w} x {h} region", state.len());
    Ok(state)
}

/// Map `BodyConfig` -> runtime `Body`
pub fn explicit_state(bodies: &[BodyConfig]) -> Result<SimulationState> {
    let bodies = bodies
        .iter()
        .map(|bc| Body::new(NVec2::from(bc.x), NVec2::from(bc.v), bc.m))
        .collect::<Result<Vec<_>>>()?;

    info!("loaded {} explicit bodies", bodies.len());
    SimulationState::from_bodies(bodies)
}
