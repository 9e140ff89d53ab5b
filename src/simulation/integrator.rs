//! Fixed-step integrator for the damped system
//!
//! One tick is a semi-implicit Euler step with an implicit dt of 1:
//! accelerations come from the pre-step snapshot, velocities are kicked,
//! damped by friction, and only then are positions drifted.

use log::debug;

use super::forces::{clamp_per_axis, AccelSet};
use super::params::Parameters;
use super::states::{NVec2, SimulationState};
use crate::error::Result;

/// Net acceleration per body from the current positions, each axis clamped
/// to `params.max_acc`.
pub fn clamped_accelerations(state: &SimulationState, forces: &AccelSet, params: &Parameters) -> Result<Vec<NVec2>> {
    let mut acc = vec![NVec2::zeros(); state.len()];
    forces.accumulate_accels(state, &mut acc)?;

    for a in acc.iter_mut() {
        *a = clamp_per_axis(*a, params.max_acc);
    }
    Ok(acc)
}

/// Advance the system by one tick.
/// On error nothing has been written: every acceleration is known before the
/// first body moves.
pub fn damped_euler_step(state: &mut SimulationState, forces: &AccelSet, params: &Parameters) -> Result<()> {
    // a_n from x_n, for every body, before anything moves
    let acc = clamped_accelerations(state, forces, params)?;

    // Kick and damp: v_n+1 = (v_n + a_n) * friction
    for (b, a) in state.bodies_mut().iter_mut().zip(acc.iter()) {
        b.v += *a;
        b.v *= params.friction;
    }

    // Drift with the finished velocities: x_n+1 = x_n + v_n+1
    for b in state.bodies_mut().iter_mut() {
        b.x += b.v;
    }

    state.advance_tick();
    debug!("tick {} done, kinetic energy {:.6}", state.tick(), state.kinetic_energy());
    Ok(())
}
