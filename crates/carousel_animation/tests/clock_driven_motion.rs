//! Integration tests for integrators driven by the manual frame clock
//!
//! These tests verify that:
//! - Frame deltas taken from clock timestamps advance the integrators
//! - A decay hand-off into a spring converges on the nearest whole unit
//! - Cancelled frames never reach the animation

use carousel_animation::{Decay, DecayConfig, FrameClock, ManualClock, Spring, SpringConfig};

/// Coast with decay until resting, then spring to the nearest integer
#[test]
fn test_decay_then_spring() {
    let mut clock = ManualClock::new();
    let mut decay = Decay::new(DecayConfig::default(), 4.0);
    let mut position = 0.0f32;

    let mut handle = clock.request_frame();
    let mut last = clock.now();
    while !decay.is_resting() {
        let due = clock.advance();
        assert_eq!(due, vec![handle]);
        let dt = ((clock.now() - last) / 1000.0) as f32;
        last = clock.now();
        position += decay.step(dt);
        handle = clock.request_frame();
    }
    clock.cancel_frame(handle);

    assert!(position > 0.5 && position < 1.0);

    let mut spring = Spring::new(SpringConfig::default(), position).with_velocity(decay.velocity());
    spring.set_target(position.round());
    for _ in 0..600 {
        if spring.is_settled() {
            break;
        }
        spring.step(1.0 / 60.0);
    }

    assert!(spring.is_settled());
    assert!((spring.value() - 1.0).abs() < 0.001);
}

/// Frame rate does not change how far a decay coasts
#[test]
fn test_decay_frame_rate_independent() {
    let coast = |frame_ms: f64| {
        let mut clock = ManualClock::with_frame_interval(frame_ms);
        let mut decay = Decay::new(DecayConfig::default(), 6.0);
        let mut distance = 0.0f32;
        while clock.now() < 2000.0 {
            clock.advance();
            distance += decay.step((frame_ms / 1000.0) as f32);
        }
        distance
    };

    let at_60 = coast(1000.0 / 60.0);
    let at_120 = coast(1000.0 / 120.0);
    // Sampling differs by half a frame of motion at most
    assert!((at_60 - at_120).abs() < 0.1, "{at_60} vs {at_120}");
}

/// A replaced request is never delivered
#[test]
fn test_replaced_request_not_delivered() {
    let mut clock = ManualClock::new();
    let stale = clock.request_frame();
    clock.cancel_frame(stale);
    let live = clock.request_frame();

    let due = clock.advance();
    assert_eq!(due, vec![live]);
    assert!(!due.contains(&stale));
}
