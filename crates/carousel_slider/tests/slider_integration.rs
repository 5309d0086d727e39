//! Integration tests for the slider state machine driven by a frame clock
//!
//! These tests verify that:
//! - Full gesture sequences end on the expected item
//! - Only one animation loop is ever pending
//! - The rendered window stays consistent while animating
//! - A shared clock sees every loop cancelled on teardown

use std::cell::RefCell;
use std::rc::Rc;

use carousel_animation::{FrameClock, ManualClock};
use carousel_core::events::GestureEvent;
use carousel_core::Direction;
use carousel_slider::{states, SliderConfig, SliderMachine, SliderState};

fn drag(movement: f32) -> GestureEvent {
    GestureEvent::DragMove {
        movement,
        pixels_per_step: 120.0,
        off_axis: 0.1,
    }
}

/// A fling far to the left coasts across several slots before snapping
#[test]
fn test_fling_coasts_several_slots() {
    let mut slider = SliderMachine::new(
        (0..10u32).collect(),
        SliderConfig::new().with_window_size(4),
        ManualClock::new(),
    );

    slider.send(GestureEvent::PointerDown);
    slider.send(drag(-30.0));
    slider.send(drag(-60.0));
    slider.send(GestureEvent::PointerUp { velocity: -8.0 });
    assert!(matches!(slider.state(), SliderState::Inertia { .. }));

    let mut saw_snapping = false;
    for _ in 0..600 {
        if !slider.advance_frame() {
            break;
        }
        assert!(slider.clock().pending_count() <= 1);
        assert!(slider.progress().abs() < 1.0);
        assert_eq!(slider.items().len(), 6);
        saw_snapping |= matches!(slider.state(), SliderState::Snapping { .. });
    }

    assert!(saw_snapping);
    assert_eq!(slider.state(), &SliderState::Idle);
    // 8 slots/s decaying at 0.92 per frame coasts about 1.4 slots past 0.5
    assert!((2..=4).contains(&slider.active_index()));
}

/// Repeated button presses accumulate and always land on a whole slot
#[test]
fn test_button_sequence_lands_on_slot() {
    let mut slider = SliderMachine::new(
        vec!["a", "b", "c", "d", "e"]
            .into_iter()
            .map(String::from)
            .collect(),
        SliderConfig::new(),
        ManualClock::new(),
    );

    slider.next();
    slider.advance_frame();
    slider.next();
    slider.advance_frame();
    slider.send(GestureEvent::ButtonPress(Direction::Prev));

    assert!(slider.run_until_idle(1200).is_some());
    assert_eq!(slider.progress(), 0.0);
    assert_eq!(slider.items()[1].logical_index, slider.active_index());
}

/// Grabbing a coasting carousel and letting go snaps from where it was caught
#[test]
fn test_catch_and_release() {
    let mut slider = SliderMachine::new((0..6u32).collect(), SliderConfig::new(), ManualClock::new());

    slider.next();
    for _ in 0..5 {
        slider.advance_frame();
    }
    slider.send(GestureEvent::PointerDown);
    let caught = slider.progress();
    assert!(caught > 0.0 && caught < 1.0);

    slider.send(GestureEvent::PointerUp { velocity: 0.0 });
    assert_eq!(slider.state().target(), Some(caught.round()));
    assert!(slider.run_until_idle(600).is_some());
    assert_eq!(slider.active_index(), caught.round() as usize);
}

/// Frames delivered by a shared clock reach the slider through `on_frame`
#[test]
fn test_shared_clock_delivery() {
    let clock = Rc::new(RefCell::new(ManualClock::with_frame_interval(16.0)));
    let mut slider = SliderMachine::new((0..4u32).collect(), SliderConfig::new(), clock.clone());

    slider.prev();
    let mut frames = 0;
    while slider.is_animating() && frames < 600 {
        let due = clock.borrow_mut().advance();
        let now = clock.now();
        for handle in due {
            slider.on_frame(handle, now);
        }
        frames += 1;
    }

    assert!(!slider.is_animating());
    assert_eq!(slider.active_index(), 3);
    assert_eq!(clock.borrow().pending_count(), 0);
}

/// Replacing items mid-animation leaves nothing scheduled
#[test]
fn test_replace_items_mid_animation() {
    let clock = Rc::new(RefCell::new(ManualClock::new()));
    let mut slider = SliderMachine::new((0..4u32).collect(), SliderConfig::new(), clock.clone());

    slider.next();
    slider.set_items((100..103u32).collect());
    assert_eq!(clock.borrow().pending_count(), 0);
    assert_eq!(slider.state(), &SliderState::Idle);

    let last = slider.history().last().copied();
    assert_eq!(last.map(|r| (r.from, r.to)), Some((states::INERTIA, states::IDLE)));

    drop(slider);
    assert_eq!(clock.borrow().pending_count(), 0);
}
