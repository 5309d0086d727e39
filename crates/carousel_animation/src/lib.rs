//! Carousel Animation Primitives
//!
//! Continuous-time integrators and frame scheduling for physically animated
//! widgets.
//!
//! # Features
//!
//! - **Spring Physics**: damped spring solved with semi-implicit Euler, with
//!   displacement/velocity rest thresholds
//! - **Velocity Decay**: frame-rate independent exponential coasting
//! - **Frame Clock**: request/cancel seam for display-frame callbacks, plus a
//!   deterministic manual clock for headless runs and tests

pub mod decay;
pub mod scheduler;
pub mod spring;

pub use decay::{Decay, DecayConfig};
pub use scheduler::{FrameClock, FrameHandle, ManualClock};
pub use spring::{Spring, SpringConfig};
