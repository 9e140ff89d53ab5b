//! Core state types for the simulation.
//!
//! - `Body`            a point mass with position and velocity (`NVec2`)
//! - `SimulationState` the ordered, fixed-size collection of bodies plus a tick counter
//!
//! Fields are private: masses never change after construction and positions /
//! velocities are only written by the integrator.

use nalgebra::Vector2;

use crate::error::{Error, Result};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub(crate) x: NVec2, // position
    pub(crate) v: NVec2, // velocity
    m: f64, // mass, > 0
}

impl Body {
    /// Create a body after validating mass and finiteness.
    pub fn new(x: NVec2, v: NVec2, m: f64) -> Result<Self> {
        if !m.is_finite() || m <= 0.0 {
            return Err(Error::InvalidConfiguration(format!(
                "body mass must be finite and > 0, got {m}"
            )));
        }
        if !x.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidConfiguration("body position must be finite".into()));
        }
        if !v.iter().all(|c| c.is_finite()) {
            return Err(Error::InvalidConfiguration("body velocity must be finite".into()));
        }
        Ok(Self { x, v, m })
    }

    /// Body at rest.
    pub fn at_rest(x: NVec2, m: f64) -> Result<Self> {
        Self::new(x, NVec2::zeros(), m)
    }

    #[inline]
    pub fn position(&self) -> NVec2 {
        self.x
    }

    #[inline]
    pub fn velocity(&self) -> NVec2 {
        self.v
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.m
    }

    /// 1/2 m |v|^2
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.m * self.v.norm_squared()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    bodies: Vec<Body>, // fixed length, stable indices
    tick: u64, // steps applied since initialization
}

impl SimulationState {
    /// Allocate `n` zeroed bodies. Only the scenario builder sees this
    /// placeholder; it overwrites every field before handing the state out.
    pub(crate) fn zeroed(n: usize) -> Result<Self> {
        if n == 0 {
            return Err(Error::InvalidConfiguration("particle_count must be > 0".into()));
        }
        let blank = Body {
            x: NVec2::zeros(),
            v: NVec2::zeros(),
            m: 0.0,
        };
        Ok(Self {
            bodies: vec![blank; n],
            tick: 0,
        })
    }

    /// Build a state from explicit bodies (already validated by `Body::new`).
    pub fn from_bodies(bodies: Vec<Body>) -> Result<Self> {
        if bodies.is_empty() {
            return Err(Error::InvalidConfiguration(
                "a state needs at least one body".into(),
            ));
        }
        Ok(Self { bodies, tick: 0 })
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, i: usize) -> Option<&Body> {
        self.bodies.get(i)
    }

    pub fn positions(&self) -> Vec<NVec2> {
        self.bodies.iter().map(|b| b.x).collect()
    }

    pub fn velocities(&self) -> Vec<NVec2> {
        self.bodies.iter().map(|b| b.v).collect()
    }

    pub fn masses(&self) -> Vec<f64> {
        self.bodies.iter().map(|b| b.m).collect()
    }

    /// Total kinetic energy. Diagnostic only; friction drains it every step.
    pub fn kinetic_energy(&self) -> f64 {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }
}
