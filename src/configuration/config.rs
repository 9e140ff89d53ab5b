//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`SimulationConfig`] – physical constants, particle count and seeding
//! - [`DriverConfig`]     – cadence and screen scaling used by the viewer / headless runner
//! - [`BodyConfig`]       – optional explicit initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Every field has a default, so an empty document is the reference setup
//! (10 random bodies in a 500 x 500 region):
//!
//! ```yaml
//! simulation:
//!   particle_count: 10            # ignored when `bodies` is non-empty
//!   max_mass: 100.0               # masses drawn from [1, max_mass)
//!   spatial_extent: [500.0, 500.0]
//!   gravitational_constant: 100.0
//!   friction: 0.9                 # velocity multiplier applied every tick
//!   max_acceleration: 30.0        # per-axis clamp
//!   seed: 42                      # omit for a fresh random run
//!   singularity: fail             # or "propagate"
//!
//! driver:
//!   fps: 20.0
//!   scale: 1.0                    # screen pixels per simulation unit
//!
//! bodies:
//!   - x: [ 200.0, 250.0 ]
//!     v: [   0.0,   1.0 ]
//!     m: 40.0
//! ```

use serde::Deserialize;

use crate::error::{Error, Result};

/// What to do when two particles sit at exactly zero separation
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SingularityPolicy {
    #[default]
    #[serde(rename = "fail")] // reject the step with `Error::NumericSingularity`, state untouched
    Fail,

    #[serde(rename = "propagate")] // unguarded division; the non-finite result flows into the state
    Propagate,
}

/// Physical and sampling parameters for the core
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    pub particle_count: usize, // number of bodies sampled at initialization
    pub max_mass: f64, // upper (exclusive) bound of the mass range, lower bound is 1
    pub spatial_extent: [f64; 2], // width, height of the sampling region
    pub gravitational_constant: f64, // G
    pub friction: f64, // damping factor in (0, 1)
    pub max_acceleration: f64, // per-axis clamp
    pub seed: Option<u64>, // deterministic seed to make runs reproducible
    pub singularity: SingularityPolicy,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            particle_count: 10,
            max_mass: 100.0,
            spatial_extent: [500.0, 500.0],
            gravitational_constant: 100.0,
            friction: 0.9,
            max_acceleration: 30.0,
            seed: None,
            singularity: SingularityPolicy::Fail,
        }
    }
}

impl SimulationConfig {
    /// Check every range; nothing is built from a config that fails here.
    pub fn validate(&self) -> Result<()> {
        if self.particle_count == 0 {
            return invalid("particle_count must be > 0");
        }
        if !self.max_mass.is_finite() || self.max_mass <= 1.0 {
            return invalid(format!("max_mass must be finite and > 1, got {}", self.max_mass));
        }
        if !self.spatial_extent.iter().all(|&l| l.is_finite() && l > 0.0) {
            return invalid("spatial_extent components must be finite and > 0");
        }
        if !self.gravitational_constant.is_finite() || self.gravitational_constant <= 0.0 {
            return invalid("gravitational_constant must be finite and > 0");
        }
        if !(self.friction > 0.0 && self.friction < 1.0) {
            return invalid(format!("friction must be in (0, 1), got {}", self.friction));
        }
        if !self.max_acceleration.is_finite() || self.max_acceleration <= 0.0 {
            return invalid("max_acceleration must be finite and > 0");
        }
        Ok(())
    }
}

/// Settings for whoever drives `step`
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct DriverConfig {
    pub fps: f64, // steps per second
    pub scale: f32, // screen pixels per simulation unit
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self { fps: 20.0, scale: 1.0 }
    }
}

impl DriverConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.fps.is_finite() || self.fps <= 0.0 {
            return invalid(format!("fps must be finite and > 0, got {}", self.fps));
        }
        if !self.scale.is_finite() || self.scale <= 0.0 {
            return invalid("scale must be finite and > 0");
        }
        Ok(())
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct BodyConfig {
    pub x: [f64; 2], // initial position
    #[serde(default)]
    pub v: [f64; 2], // initial velocity, at rest when omitted
    pub m: f64, // mass, > 0
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    pub simulation: SimulationConfig,
    pub driver: DriverConfig,
    pub bodies: Vec<BodyConfig>, // explicit bodies replace random sampling when non-empty
}

impl ScenarioConfig {
    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // serde_yaml maps an empty document to unit, not to an empty mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        self.driver.validate()
    }
}

fn invalid<T>(msg: impl Into<String>) -> Result<T> {
    Err(Error::InvalidConfiguration(msg.into()))
}
