//! Exponential velocity decay (inertial coasting)
//!
//! The damping ratio is expressed per reference frame and scaled by the
//! actual elapsed time, so the same gesture coasts the same distance at any
//! display rate.

use serde::{Deserialize, Serialize};

/// Decay parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecayConfig {
    /// Fraction of velocity kept per reference frame (0.0-1.0)
    pub damping_ratio: f32,
    /// Reference frame interval in seconds
    pub reference_frame: f32,
    /// Coasting ends at or below this speed
    pub rest_velocity: f32,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            damping_ratio: 0.92,
            reference_frame: 1.0 / 60.0,
            rest_velocity: 0.5,
        }
    }
}

/// A coasting velocity
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decay {
    config: DecayConfig,
    velocity: f32,
}

impl Decay {
    pub fn new(config: DecayConfig, velocity: f32) -> Self {
        Self { config, velocity }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn config(&self) -> &DecayConfig {
        &self.config
    }

    /// Add a velocity increment to the live motion
    pub fn add_impulse(&mut self, impulse: f32) {
        self.velocity += impulse;
    }

    /// Speed is at or below the rest threshold
    pub fn is_resting(&self) -> bool {
        self.velocity.abs() <= self.config.rest_velocity
    }

    /// Decay velocity over `dt` seconds and return the displacement covered
    pub fn step(&mut self, dt: f32) -> f32 {
        if dt <= 0.0 {
            return 0.0;
        }
        let frames = dt / self.config.reference_frame.max(f32::EPSILON);
        self.velocity *= self.config.damping_ratio.powf(frames);
        self.velocity * dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_reference_frame() {
        let config = DecayConfig::default();
        let mut decay = Decay::new(config, 10.0);
        let moved = decay.step(config.reference_frame);

        assert!((decay.velocity() - 9.2).abs() < 1e-4);
        assert!((moved - 9.2 / 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_frame_rate_independent() {
        let config = DecayConfig::default();
        let mut at_60 = Decay::new(config, 6.0);
        let mut at_120 = Decay::new(config, 6.0);

        for _ in 0..60 {
            at_60.step(1.0 / 60.0);
        }
        for _ in 0..120 {
            at_120.step(1.0 / 120.0);
        }

        assert!((at_60.velocity() - at_120.velocity()).abs() < 1e-3);
    }

    #[test]
    fn test_resting_threshold_inclusive() {
        let config = DecayConfig::default();
        assert!(Decay::new(config, config.rest_velocity).is_resting());
        assert!(Decay::new(config, -config.rest_velocity).is_resting());
        assert!(!Decay::new(config, config.rest_velocity + 0.01).is_resting());
    }

    #[test]
    fn test_impulse_adds_to_live_velocity() {
        let mut decay = Decay::new(DecayConfig::default(), 2.0);
        decay.add_impulse(4.0);
        assert_eq!(decay.velocity(), 6.0);
    }

    #[test]
    fn test_zero_dt() {
        let mut decay = Decay::new(DecayConfig::default(), 3.0);
        assert_eq!(decay.step(0.0), 0.0);
        assert_eq!(decay.velocity(), 3.0);
    }
}
