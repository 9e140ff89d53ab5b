//! Runtime parameters for the force law and the integrator
//!
//! `Parameters` is the validated, engine-facing subset of `SimulationConfig`:
//! gravitational constant, friction, the per-axis acceleration clamp and the
//! singularity policy.

use crate::configuration::config::{SimulationConfig, SingularityPolicy};
use crate::error::Result;

#[derive(Debug, Clone, PartialEq)]
pub struct Parameters {
    pub g: f64, // gravitational constant
    pub friction: f64, // velocity multiplier per tick
    pub max_acc: f64, // per-axis acceleration clamp
    pub singularity: SingularityPolicy, // coincident-particle handling
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            g: 100.0,
            friction: 0.9,
            max_acc: 30.0,
            singularity: SingularityPolicy::Fail,
        }
    }
}

impl Parameters {
    pub fn from_config(cfg: &SimulationConfig) -> Result<Self> {
        cfg.validate()?;
        Ok(Self {
            g: cfg.gravitational_constant,
            friction: cfg.friction,
            max_acc: cfg.max_acceleration,
            singularity: cfg.singularity,
        })
    }
}
