//! Carousel Slider
//!
//! An infinite, physically animated carousel. A finite item list is shown as a
//! circular window of visible slots framed by two hidden sentinels; gestures
//! and prev/next buttons move it through a state machine that coasts with
//! exponential decay and settles with a damped spring.
//!
//! # Features
//!
//! - **Circular Windowing**: wrap-around windows with stable display keys,
//!   even for duplicate item ids
//! - **Slot Styles**: continuous interpolation of opacity, rotation, depth,
//!   scale and blur across slot positions
//! - **Gesture FSM**: idle, pressed, dragging, inertia and snapping phases
//!   with a single cancellable animation loop
//! - **TOML Config**: every physics constant overridable
//!
//! # Example
//!
//! ```rust
//! use carousel_animation::ManualClock;
//! use carousel_slider::{SliderConfig, SliderMachine, SliderState};
//!
//! let items: Vec<u32> = (0..5).collect();
//! let mut slider = SliderMachine::new(items, SliderConfig::new(), ManualClock::new());
//!
//! slider.next();
//! slider.run_until_idle(600);
//!
//! assert_eq!(slider.active_index(), 1);
//! assert_eq!(slider.state(), &SliderState::Idle);
//! ```

pub mod config;
pub mod error;
pub mod item;
pub mod machine;
pub mod state;
pub mod style;
pub mod window;

pub use config::{PhysicsConstants, SliderConfig};
pub use error::{ConfigError, Result};
pub use item::{DisplayKey, Item, SliderItem};
pub use machine::{SliderMachine, AXIS_LOCK_THRESHOLD};
pub use state::{states, SliderState};
pub use style::{apply_styles, style_at, VisualParams};
pub use window::{build_window, effective_window_size, normalize_index, MIN_WINDOW_SIZE};
