//! Slider interaction state
//!
//! One enum value owns everything that varies per phase, including the frame
//! handle of the running animation loop. Only `Inertia` and `Snapping` hold a
//! handle, so at most one loop can be live at a time.

use carousel_animation::{Decay, FrameHandle, Spring};
use carousel_core::fsm::{StateId, StateKind};

/// State kind ids, for hooks and transition history
pub mod states {
    use carousel_core::fsm::StateId;

    pub const IDLE: StateId = 0;
    pub const PRESSED: StateId = 1;
    pub const DRAGGING: StateId = 2;
    pub const INERTIA: StateId = 3;
    pub const SNAPPING: StateId = 4;
}

/// Interaction state of a slider
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SliderState {
    /// No gesture, no running loop
    #[default]
    Idle,
    /// Pointer down, waiting for a horizontal move
    Pressed {
        /// Progress latched when the pointer went down
        frozen_progress: f32,
    },
    /// Pointer moving
    Dragging {
        /// Sub-slot offset from the committed index, in (-1, 1)
        progress: f32,
        /// Whole slots already committed during this drag
        step_offset: i32,
        /// Progress when the drag started
        base_offset: f32,
    },
    /// Coasting after release or a button press
    Inertia {
        decay: Decay,
        progress: f32,
        handle: FrameHandle,
        /// Clock time of the previous tick (or loop start), in ms
        last_timestamp: f64,
    },
    /// Spring converging on the nearest slot
    Snapping {
        /// Spring position is the progress, its target the slot
        spring: Spring,
        handle: FrameHandle,
        /// Clock time of the previous tick (or loop start), in ms
        last_timestamp: f64,
    },
}

impl SliderState {
    /// Current sub-slot progress
    pub fn progress(&self) -> f32 {
        match self {
            SliderState::Idle => 0.0,
            SliderState::Pressed { frozen_progress } => *frozen_progress,
            SliderState::Dragging { progress, .. } | SliderState::Inertia { progress, .. } => {
                *progress
            }
            SliderState::Snapping { spring, .. } => spring.value(),
        }
    }

    /// Velocity of the running loop (zero otherwise)
    pub fn velocity(&self) -> f32 {
        match self {
            SliderState::Inertia { decay, .. } => decay.velocity(),
            SliderState::Snapping { spring, .. } => spring.velocity(),
            _ => 0.0,
        }
    }

    /// Slot the spring is converging on
    pub fn target(&self) -> Option<f32> {
        match self {
            SliderState::Snapping { spring, .. } => Some(spring.target()),
            _ => None,
        }
    }

    /// Handle of the live animation loop
    pub fn loop_handle(&self) -> Option<FrameHandle> {
        match self {
            SliderState::Inertia { handle, .. } | SliderState::Snapping { handle, .. } => {
                Some(*handle)
            }
            _ => None,
        }
    }

    /// An animation loop is running
    pub fn is_animating(&self) -> bool {
        self.loop_handle().is_some()
    }

    /// A pointer is down
    pub fn is_pointer_active(&self) -> bool {
        matches!(
            self,
            SliderState::Pressed { .. } | SliderState::Dragging { .. }
        )
    }
}

impl StateKind for SliderState {
    fn state_id(&self) -> StateId {
        match self {
            SliderState::Idle => states::IDLE,
            SliderState::Pressed { .. } => states::PRESSED,
            SliderState::Dragging { .. } => states::DRAGGING,
            SliderState::Inertia { .. } => states::INERTIA,
            SliderState::Snapping { .. } => states::SNAPPING,
        }
    }

    fn name(&self) -> &'static str {
        state_name(self.state_id())
    }
}

/// Name of a state kind id
pub fn state_name(id: StateId) -> &'static str {
    match id {
        states::IDLE => "idle",
        states::PRESSED => "pressed",
        states::DRAGGING => "dragging",
        states::INERTIA => "inertia",
        states::SNAPPING => "snapping",
        _ => "unknown",
    }
}
