//! Scenario replay against a headless slider.

use anyhow::{bail, Result};
use carousel_animation::ManualClock;
use carousel_core::fsm::StateKind;
use carousel_slider::{Item, SliderMachine, SliderState};

use crate::scenario::{Scenario, ScenarioStep};

/// Replay options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReplayOptions {
    /// Fail on steps that leave the slider untouched
    pub strict: bool,
}

#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    state: SliderState,
    active_index: usize,
}

impl Snapshot {
    fn of<T: Item>(slider: &SliderMachine<T, ManualClock>) -> Self {
        Self {
            state: *slider.state(),
            active_index: slider.active_index(),
        }
    }
}

/// Run every step of `scenario` in order
pub fn replay<T: Item>(
    slider: &mut SliderMachine<T, ManualClock>,
    scenario: &Scenario,
    options: ReplayOptions,
) -> Result<()> {
    for (index, step) in scenario.steps.iter().enumerate() {
        let before = Snapshot::of(slider);
        run_step(slider, index, step)?;

        if step.gesture().is_some() && Snapshot::of(slider) == before {
            if options.strict {
                bail!("step {} ({}) had no effect", index, step.name());
            }
            tracing::warn!("step {} ({}) had no effect", index, step.name());
        }
    }
    Ok(())
}

fn run_step<T: Item>(
    slider: &mut SliderMachine<T, ManualClock>,
    index: usize,
    step: &ScenarioStep,
) -> Result<()> {
    tracing::debug!("step {}: {:?}", index, step);

    if let Some(event) = step.gesture() {
        slider.send(event);
        return Ok(());
    }

    match *step {
        ScenarioStep::Tick { frames } => {
            for _ in 0..frames {
                slider.advance_frame();
            }
        }
        ScenarioStep::Settle { max_frames } => match slider.run_until_idle(max_frames) {
            Some(frames) => tracing::info!("settled after {} frame(s)", frames),
            None => bail!(
                "step {} (settle): still {} after {} frames",
                index,
                slider.state().name(),
                max_frames
            ),
        },
        ScenarioStep::SetIndex { index: target } => slider.set_active_index(target),
        _ => {}
    }
    Ok(())
}
