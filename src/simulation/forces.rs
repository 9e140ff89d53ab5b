//! Force / acceleration contributors for the engine
//!
//! Defines the 2D acceleration trait, the set that sums contributors, and
//! direct (unsoftened) Newtonian gravity.

use log::warn;

use crate::configuration::config::SingularityPolicy;
use crate::error::{Error, Result};
use crate::simulation::states::{NVec2, SimulationState};

/// Collection of acceleration terms.
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    /// Compute total (unclamped) accelerations for all bodies in `state`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, state: &SimulationState, out: &mut [NVec2]) -> Result<()> {
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(state, out)?;
        }
        Ok(())
    }
}

/// Acceleration source operating on a [`SimulationState`].
/// Implementations add their contribution into `out[i]` for each body and
/// must only read `state`.
pub trait Acceleration {
    fn acceleration(&self, state: &SimulationState, out: &mut [NVec2]) -> Result<()>;
}

/// Pairwise inverse-square attraction, no softening
pub struct NewtonianGravity {
    pub g: f64, // gravitational constant
    pub singularity: SingularityPolicy, // what to do when d^2 == 0
}

impl NewtonianGravity {
    /// Net force on every body, summed over all ordered pairs (i, j), i != j.
    pub fn net_forces(&self, state: &SimulationState, out: &mut [NVec2]) -> Result<()> {
        let bodies = state.bodies();

        for (i, bi) in bodies.iter().enumerate() {
            let mut force = NVec2::zeros();

            for (j, bj) in bodies.iter().enumerate() {
                if i == j {
                    continue;
                }

                // points from i toward j
                let r = bj.position() - bi.position();
                let d2 = r.norm_squared();

                if d2 == 0.0 {
                    match self.singularity {
                        SingularityPolicy::Fail => {
                            return Err(Error::NumericSingularity { i, j });
                        }
                        SingularityPolicy::Propagate => {
                            warn!("particles {i} and {j} coincide; force is not finite");
                        }
                    }
                }

                let d = d2.sqrt();
                let magnitude = self.g * bi.mass() * bj.mass() / d2;

                // magnitude / d normalizes r; inverse square in the raw distance
                force += r * magnitude / d;
            }

            out[i] += force;
        }
        Ok(())
    }
}

impl Acceleration for NewtonianGravity {
    fn acceleration(&self, state: &SimulationState, out: &mut [NVec2]) -> Result<()> {
        let mut forces = vec![NVec2::zeros(); state.len()];
        self.net_forces(state, &mut forces)?;

        for ((a, f), b) in out.iter_mut().zip(forces.iter()).zip(state.bodies()) {
            *a += *f / b.mass();
        }
        Ok(())
    }
}

/// Clamp each axis independently to [-max_acc, max_acc].
/// A diagonal vector may keep a norm up to sqrt(2) * max_acc.
#[inline]
pub fn clamp_per_axis(a: NVec2, max_acc: f64) -> NVec2 {
    a.map(|c| c.clamp(-max_acc, max_acc))
}
