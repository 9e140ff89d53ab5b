pub mod error;
pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use error::{Error, Result};

pub use simulation::states::{Body, SimulationState, NVec2};
pub use simulation::forces::{Acceleration, AccelSet, NewtonianGravity, clamp_per_axis};
pub use simulation::integrator::{damped_euler_step, clamped_accelerations};
pub use simulation::engine::{SimulationEngine, Phase};
pub use simulation::params::Parameters;
pub use simulation::scenario::initialize;

pub use configuration::config::{ScenarioConfig, SimulationConfig, DriverConfig, BodyConfig, SingularityPolicy};

pub use visualization::{planetsim_vis2d::run_2d, planetsim_headless::run_headless};

pub use benchmark::benchmark::bench_step_curve;
