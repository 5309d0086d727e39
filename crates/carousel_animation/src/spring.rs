//! Damped spring integrator
//!
//! Each step computes `a = -k·(x - target) - c·v`, then advances velocity
//! before position (semi-implicit Euler), which stays stable for the
//! stiffness/damping ranges used by interactive widgets at display rates.

use serde::{Deserialize, Serialize};

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringConfig {
    /// Restoring force per unit of displacement
    pub stiffness: f32,
    /// Resisting force per unit of velocity
    pub damping: f32,
    /// Settled when displacement is below this
    pub rest_displacement: f32,
    /// Settled when speed is below this
    pub rest_velocity: f32,
}

impl SpringConfig {
    /// Create a spring config with default rest thresholds
    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            rest_displacement: 0.001,
            rest_velocity: 0.01,
        }
    }

    /// Override the rest thresholds
    pub const fn with_rest(mut self, displacement: f32, velocity: f32) -> Self {
        self.rest_displacement = displacement;
        self.rest_velocity = velocity;
        self
    }

    /// Near-critically damped spring for slot snapping
    pub const fn snappy() -> Self {
        Self::new(170.0, 26.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::snappy()
    }
}

/// A one-dimensional damped spring
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    /// Create a spring at rest on `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Start with an initial velocity (inherited from an interrupted motion)
    pub fn with_velocity(mut self, velocity: f32) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn config(&self) -> &SpringConfig {
        &self.config
    }

    /// Advance by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let displacement = self.value - self.target;
        let acceleration =
            -self.config.stiffness * displacement - self.config.damping * self.velocity;
        self.velocity += acceleration * dt;
        self.value += self.velocity * dt;
    }

    /// Both displacement and speed are under the rest thresholds
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.config.rest_displacement
            && self.velocity.abs() < self.config.rest_velocity
    }

    /// Move value and target by `-delta`, keeping velocity
    ///
    /// Used when the coordinate origin is rebased (a whole slot committed
    /// while the spring is running).
    pub fn rebase(&mut self, delta: f32) {
        self.value -= delta;
        self.target -= delta;
    }
}
