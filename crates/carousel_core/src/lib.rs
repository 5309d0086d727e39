//! Carousel Core
//!
//! Foundational primitives shared by the carousel crates:
//!
//! - **Gesture Events**: normalized pointer lifecycle events and navigation
//!   directions, as delivered by an external gesture recognizer
//! - **State Machine Support**: transition history and entry/exit hooks for
//!   enum-based widget state machines
//!
//! # Example
//!
//! ```rust
//! use carousel_core::events::{event_types, Direction, GestureEvent};
//! use carousel_core::fsm::TransitionLog;
//!
//! const IDLE: u32 = 0;
//! const PRESSED: u32 = 1;
//!
//! let mut log = TransitionLog::new();
//! let event = GestureEvent::PointerDown;
//! assert_eq!(event.event_type(), event_types::POINTER_DOWN);
//!
//! assert!(log.record(IDLE, event.event_type(), PRESSED));
//! assert_eq!(log.history().len(), 1);
//! assert_eq!(Direction::Next.sign(), 1.0);
//! ```

pub mod events;
pub mod fsm;

pub use events::{Direction, EventType, GestureEvent};
pub use fsm::{EventId, Hook, StateId, StateKind, TransitionLog, TransitionRecord};
