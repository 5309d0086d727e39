//! Gesture event model
//!
//! Normalized pointer lifecycle events. A gesture recognizer upstream turns
//! raw pointer/touch input into these; widgets only consume them.

use serde::{Deserialize, Serialize};

/// Event type identifier
pub type EventType = u32;

/// Event type ids used in transition history
pub mod event_types {
    use super::EventType;

    pub const POINTER_DOWN: EventType = 1;
    pub const POINTER_UP: EventType = 2;
    /// Drag update carrying cumulative movement since press
    pub const DRAG_MOVE: EventType = 6;
    /// Discrete navigation (prev/next buttons)
    pub const BUTTON_PRESS: EventType = 8;
    /// Display frame delivered by the clock
    pub const FRAME: EventType = 90;
    /// Host-side reset (items replaced, index written externally)
    pub const RESET: EventType = 91;

    /// Human readable name for an event id
    pub fn name(event: EventType) -> &'static str {
        match event {
            POINTER_DOWN => "pointer_down",
            POINTER_UP => "pointer_up",
            DRAG_MOVE => "drag_move",
            BUTTON_PRESS => "button_press",
            FRAME => "frame",
            RESET => "reset",
            _ => "unknown",
        }
    }
}

/// Navigation direction along the carousel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards the previous item (active index decreases)
    Prev,
    /// Towards the next item (active index increases)
    Next,
}

impl Direction {
    /// Signed unit for this direction
    pub fn sign(self) -> f32 {
        match self {
            Direction::Prev => -1.0,
            Direction::Next => 1.0,
        }
    }
}

/// A normalized gesture event
///
/// Movement and velocity are measured along the carousel axis. `DragMove`
/// carries the cumulative movement since the pointer went down, not a
/// per-event delta.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// Pointer pressed on the carousel
    PointerDown,
    /// Pointer moved while pressed
    DragMove {
        /// Cumulative movement along the axis, in pixels
        movement: f32,
        /// Pixels that correspond to one slot
        pixels_per_step: f32,
        /// Off-axis share of the movement (0.0 = purely horizontal)
        off_axis: f32,
    },
    /// Pointer released
    PointerUp {
        /// Release velocity along the axis, in slots per second
        velocity: f32,
    },
    /// Prev/next button
    ButtonPress(Direction),
}

impl GestureEvent {
    /// Event type id for history and logging
    pub fn event_type(&self) -> EventType {
        match self {
            GestureEvent::PointerDown => event_types::POINTER_DOWN,
            GestureEvent::DragMove { .. } => event_types::DRAG_MOVE,
            GestureEvent::PointerUp { .. } => event_types::POINTER_UP,
            GestureEvent::ButtonPress(_) => event_types::BUTTON_PRESS,
        }
    }

    /// Human readable event name
    pub fn name(&self) -> &'static str {
        event_types::name(self.event_type())
    }
}
