//! Report output for headless slider runs.

use carousel_animation::{FrameClock, ManualClock};
use carousel_core::fsm::StateKind;
use carousel_slider::{Item, SliderMachine};
use serde::Serialize;

/// One rendered slot.
#[derive(Debug, Clone, Serialize)]
pub struct SlotReport {
    pub key: String,
    pub logical_index: usize,
    pub opacity: f32,
    pub scale: f32,
    pub z: i32,
}

/// Machine-readable result of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub item_count: usize,
    pub active_index: usize,
    pub state: &'static str,
    pub pointer_active: bool,
    pub progress: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<f32>,
    pub frames: u64,
    pub elapsed_ms: f64,
    pub window: Vec<SlotReport>,
}

impl SimulationReport {
    pub fn capture<T>(slider: &SliderMachine<T, ManualClock>) -> Self
    where
        T: Item,
        T::Id: std::fmt::Display,
    {
        let state = slider.state();
        Self {
            item_count: slider.source_items().len(),
            active_index: slider.active_index(),
            state: state.name(),
            pointer_active: state.is_pointer_active(),
            progress: slider.progress(),
            target: state.target(),
            frames: slider.clock().frames(),
            elapsed_ms: slider.clock().now(),
            window: slider
                .items()
                .iter()
                .map(|slot| SlotReport {
                    key: slot.key.to_string(),
                    logical_index: slot.logical_index,
                    opacity: slot.style.opacity,
                    scale: slot.style.scale,
                    z: slot.style.z_order(),
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carousel_slider::SliderConfig;

    #[test]
    fn test_capture_idle() {
        let slider = SliderMachine::new(
            (0..3u32).collect(),
            SliderConfig::new(),
            ManualClock::new(),
        );
        let report = SimulationReport::capture(&slider);

        assert_eq!(report.state, "idle");
        assert_eq!(report.window.len(), 5);
        assert_eq!(report.window[0].key, "leading:2");
        assert_eq!(report.window[1].key, "0");
        assert_eq!(report.window[1].opacity, 1.0);
        assert_eq!(report.target, None);
        assert_eq!(report.item_count, 3);
        assert!(!report.pointer_active);

        let json = report.to_json().unwrap();
        assert!(json.contains("\"active_index\": 0"));
        assert!(!json.contains("target"));
    }
}
