//! The simulation engine: owns the scenario, the random source, the force set
//! and (once initialized) the state.
//!
//! Two externally visible phases:
//! - `Uninitialized`: only `initialize` is valid, `step` fails
//! - `Running`: `step` advances indefinitely, `initialize` / `reset` start over

use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::configuration::config::ScenarioConfig;
use crate::error::{Error, Result};
use crate::simulation::forces::{AccelSet, NewtonianGravity};
use crate::simulation::integrator::{clamped_accelerations, damped_euler_step};
use crate::simulation::params::Parameters;
use crate::simulation::scenario;
use crate::simulation::states::{NVec2, SimulationState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Running,
}

pub struct SimulationEngine {
    config: ScenarioConfig,
    parameters: Parameters,
    forces: AccelSet,
    rng: StdRng,
    state: Option<SimulationState>,
}

impl SimulationEngine {
    /// Validate `config` and build an uninitialized engine. The generator is
    /// seeded from `simulation.seed` when present, from OS entropy otherwise.
    pub fn new(config: ScenarioConfig) -> Result<Self> {
        let rng = match config.simulation.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::seed_from_u64(rand::rng().random()),
        };
        Self::with_rng(config, rng)
    }

    /// Same as [`SimulationEngine::new`] with a caller-supplied generator.
    pub fn with_rng(config: ScenarioConfig, rng: StdRng) -> Result<Self> {
        config.validate()?;
        let parameters = Parameters::from_config(&config.simulation)?;

        // Newtonian gravity is the only registered term
        let forces = AccelSet::new().with(NewtonianGravity {
            g: parameters.g,
            singularity: parameters.singularity,
        });

        Ok(Self {
            config,
            parameters,
            forces,
            rng,
            state: None,
        })
    }

    /// Replace any previous state with a freshly built one.
    /// On error the previous state (if any) is kept.
    pub fn initialize(&mut self) -> Result<&SimulationState> {
        let fresh = scenario::initialize(&self.config, &mut self.rng)?;
        info!("initialized {} bodies", fresh.len());
        Ok(&*self.state.insert(fresh))
    }

    /// Discard the current state and draw a new one from the same scenario.
    pub fn reset(&mut self) -> Result<&SimulationState> {
        if let Some(old) = &self.state {
            info!("reset requested at tick {}", old.tick());
        }
        self.initialize()
    }

    /// Advance one tick.
    pub fn step(&mut self) -> Result<&SimulationState> {
        let state = self
            .state
            .as_mut()
            .ok_or(Error::CallOutOfSequence("step called before initialize"))?;
        damped_euler_step(state, &self.forces, &self.parameters)?;
        Ok(&*state)
    }

    /// Clamped accelerations the next `step` would apply.
    pub fn accelerations(&self) -> Result<Vec<NVec2>> {
        let state = self
            .state
            .as_ref()
            .ok_or(Error::CallOutOfSequence("accelerations requested before initialize"))?;
        clamped_accelerations(state, &self.forces, &self.parameters)
    }

    pub fn phase(&self) -> Phase {
        match self.state {
            Some(_) => Phase::Running,
            None => Phase::Uninitialized,
        }
    }

    pub fn state(&self) -> Option<&SimulationState> {
        self.state.as_ref()
    }

    pub fn config(&self) -> &ScenarioConfig {
        &self.config
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }
}
