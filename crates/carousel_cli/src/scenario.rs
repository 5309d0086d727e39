//! Gesture scenarios for headless slider runs.

use std::path::Path;

use anyhow::{Context, Result};
use carousel_core::events::GestureEvent;
use carousel_core::Direction;
use serde::Deserialize;

/// Sequence of scenario steps.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).context("invalid scenario JSON")
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("in scenario {}", path.display()))
    }
}

fn default_pixels_per_step() -> f32 {
    100.0
}

fn default_settle_frames() -> usize {
    600
}

/// One scenario step.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    PointerDown,
    Drag {
        movement: f32,
        #[serde(default = "default_pixels_per_step")]
        pixels_per_step: f32,
        #[serde(default)]
        off_axis: f32,
    },
    PointerUp {
        #[serde(default)]
        velocity: f32,
    },
    Button {
        direction: Direction,
    },
    Tick {
        frames: u32,
    },
    Settle {
        #[serde(default = "default_settle_frames")]
        max_frames: usize,
    },
    SetIndex {
        index: isize,
    },
}

impl ScenarioStep {
    /// The gesture event this step sends, if it is one
    pub fn gesture(&self) -> Option<GestureEvent> {
        match *self {
            ScenarioStep::PointerDown => Some(GestureEvent::PointerDown),
            ScenarioStep::Drag {
                movement,
                pixels_per_step,
                off_axis,
            } => Some(GestureEvent::DragMove {
                movement,
                pixels_per_step,
                off_axis,
            }),
            ScenarioStep::PointerUp { velocity } => Some(GestureEvent::PointerUp { velocity }),
            ScenarioStep::Button { direction } => Some(GestureEvent::ButtonPress(direction)),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::PointerDown => "pointer_down",
            ScenarioStep::Drag { .. } => "drag",
            ScenarioStep::PointerUp { .. } => "pointer_up",
            ScenarioStep::Button { .. } => "button",
            ScenarioStep::Tick { .. } => "tick",
            ScenarioStep::Settle { .. } => "settle",
            ScenarioStep::SetIndex { .. } => "set_index",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_steps() {
        let scenario = Scenario::from_json(
            r#"{ "steps": [
                { "type": "pointer_down" },
                { "type": "drag", "movement": -130.0, "pixels_per_step": 100.0, "off_axis": 0.0 },
                { "type": "pointer_up", "velocity": 0.0 },
                { "type": "button", "direction": "next" },
                { "type": "tick", "frames": 60 },
                { "type": "settle", "max_frames": 600 },
                { "type": "set_index", "index": -1 }
            ] }"#,
        )
        .unwrap();

        assert_eq!(scenario.steps.len(), 7);
        assert_eq!(
            scenario.steps[3],
            ScenarioStep::Button {
                direction: Direction::Next
            }
        );
        assert_eq!(scenario.steps[6], ScenarioStep::SetIndex { index: -1 });
    }

    #[test]
    fn test_step_defaults() {
        let scenario = Scenario::from_json(
            r#"{ "steps": [
                { "type": "drag", "movement": 40.0 },
                { "type": "settle" }
            ] }"#,
        )
        .unwrap();

        assert_eq!(
            scenario.steps[0].gesture(),
            Some(GestureEvent::DragMove {
                movement: 40.0,
                pixels_per_step: 100.0,
                off_axis: 0.0,
            })
        );
        assert_eq!(scenario.steps[1], ScenarioStep::Settle { max_frames: 600 });
        assert_eq!(scenario.steps[1].gesture(), None);
    }

    #[test]
    fn test_unknown_step_rejected() {
        assert!(Scenario::from_json(r#"{ "steps": [{ "type": "fly" }] }"#).is_err());
    }
}
