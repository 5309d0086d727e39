//! Slider configuration
//!
//! Physics constants and window size, loadable from TOML. Every field has a
//! default, so a config file only needs the values it overrides:
//!
//! ```toml
//! window_size = 5
//!
//! [physics]
//! stiffness = 170.0
//! button_impulse = 4.0
//! ```

use std::fs;
use std::path::Path;

use carousel_animation::{DecayConfig, SpringConfig};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Physics constants driving inertia and snapping
///
/// Progress is measured in slots and velocities in slots per second.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConstants {
    /// Multiplier applied to the release velocity of a drag
    pub velocity_scale: f32,
    /// Cap on the magnitude of a release velocity
    pub max_velocity: f32,
    /// Fraction of velocity kept per reference frame while coasting
    pub damping_ratio: f32,
    /// Reference frame interval for `damping_ratio`, in seconds
    pub reference_frame: f32,
    /// Coasting hands off to snapping at or below this speed
    pub min_velocity: f32,
    /// Velocity added by a prev/next button press
    pub button_impulse: f32,
    /// Snap spring stiffness
    pub stiffness: f32,
    /// Snap spring damping
    pub damping: f32,
    /// Snap settles below this distance from the target slot
    pub rest_displacement: f32,
    /// Snap settles below this speed
    pub rest_velocity: f32,
    /// Longest frame interval integrated in one step, in seconds
    pub max_frame_delta: f32,
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            velocity_scale: 1.0,
            max_velocity: 12.0,
            damping_ratio: 0.92,
            reference_frame: 1.0 / 60.0,
            min_velocity: 0.5,
            button_impulse: 4.0,
            // Close to critical damping (2 * sqrt(170) ≈ 26.08)
            stiffness: 170.0,
            damping: 26.0,
            rest_displacement: 0.001,
            rest_velocity: 0.01,
            // Larger steps destabilize the explicit spring step
            max_frame_delta: 0.05,
        }
    }
}

impl PhysicsConstants {
    /// Spring config for the snap loop
    pub fn spring_config(&self) -> SpringConfig {
        SpringConfig::new(self.stiffness, self.damping)
            .with_rest(self.rest_displacement, self.rest_velocity)
    }

    /// Decay config for the inertia loop
    pub fn decay_config(&self) -> DecayConfig {
        DecayConfig {
            damping_ratio: self.damping_ratio,
            reference_frame: self.reference_frame,
            rest_velocity: self.min_velocity,
        }
    }

    /// Map a pointer release velocity to a progress velocity
    ///
    /// Content moves opposite to the pointer, like drag progress.
    pub fn release_velocity(&self, pointer_velocity: f32) -> f32 {
        let max = self.max_velocity.abs();
        (-pointer_velocity * self.velocity_scale).clamp(-max, max)
    }

    /// Check every constant is in its valid range
    pub fn validate(&self) -> Result<()> {
        positive("physics.velocity_scale", self.velocity_scale)?;
        positive("physics.max_velocity", self.max_velocity)?;
        positive("physics.reference_frame", self.reference_frame)?;
        positive("physics.min_velocity", self.min_velocity)?;
        positive("physics.button_impulse", self.button_impulse)?;
        positive("physics.stiffness", self.stiffness)?;
        positive("physics.damping", self.damping)?;
        positive("physics.rest_displacement", self.rest_displacement)?;
        positive("physics.rest_velocity", self.rest_velocity)?;
        positive("physics.max_frame_delta", self.max_frame_delta)?;

        if !(self.damping_ratio > 0.0 && self.damping_ratio < 1.0) {
            return Err(ConfigError::Invalid {
                field: "physics.damping_ratio",
                reason: format!("must be between 0 and 1, got {}", self.damping_ratio),
            });
        }
        if self.max_velocity < self.min_velocity {
            return Err(ConfigError::Invalid {
                field: "physics.max_velocity",
                reason: format!(
                    "must not be below min_velocity ({} < {})",
                    self.max_velocity, self.min_velocity
                ),
            });
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

/// Slider configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    /// Requested number of visible items (defaults to the whole list)
    pub window_size: Option<usize>,
    pub physics: PhysicsConstants,
}

impl SliderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the requested window size
    pub fn with_window_size(mut self, size: usize) -> Self {
        self.window_size = Some(size);
        self
    }

    /// Set the physics constants
    pub fn with_physics(mut self, physics: PhysicsConstants) -> Self {
        self.physics = physics;
        self
    }

    /// Parse and validate a TOML config
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: SliderConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.window_size == Some(0) {
            return Err(ConfigError::Invalid {
                field: "window_size",
                reason: "must be at least 1".to_string(),
            });
        }
        self.physics.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SliderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = SliderConfig::from_toml_str(
            r#"
            window_size = 3

            [physics]
            stiffness = 200.0
            button_impulse = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.window_size, Some(3));
        assert_eq!(config.physics.stiffness, 200.0);
        assert_eq!(config.physics.button_impulse, 5.0);
        assert_eq!(config.physics.damping, PhysicsConstants::default().damping);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = SliderConfig::from_toml_str("").unwrap();
        assert_eq!(config, SliderConfig::default());
    }

    #[test]
    fn test_invalid_damping_ratio() {
        let err = SliderConfig::from_toml_str("[physics]\ndamping_ratio = 1.5\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "physics.damping_ratio",
                ..
            }
        ));
    }

    #[test]
    fn test_invalid_zero_window() {
        let err = SliderConfig::from_toml_str("window_size = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "window_size",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_stiffness_rejected() {
        let physics = PhysicsConstants {
            stiffness: -1.0,
            ..Default::default()
        };
        let err = physics.validate().unwrap_err();
        assert!(err.to_string().contains("physics.stiffness"));
    }

    #[test]
    fn test_parse_error() {
        let err = SliderConfig::from_toml_str("window_size = \"five\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_overrides() {
        let config = SliderConfig::new().with_window_size(4);
        let text = config.to_toml().unwrap();
        assert_eq!(SliderConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_release_velocity_is_inverted_and_clamped() {
        let physics = PhysicsConstants::default();
        assert_eq!(physics.release_velocity(2.0), -2.0);
        assert_eq!(physics.release_velocity(-100.0), physics.max_velocity);
        assert_eq!(physics.release_velocity(100.0), -physics.max_velocity);
    }

    #[test]
    fn test_derived_animation_configs() {
        let physics = PhysicsConstants::default();
        let spring = physics.spring_config();
        assert_eq!(spring.stiffness, 170.0);
        assert_eq!(spring.rest_velocity, 0.01);
        assert_eq!(physics.decay_config().rest_velocity, physics.min_velocity);
    }
}
