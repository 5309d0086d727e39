//! Slider state machine
//!
//! Drives the carousel through its interaction lifecycle:
//!
//! ```text
//! Idle --down--> Pressed --move--> Dragging --up--> Inertia --slow--> Snapping --settled--> Idle
//!                   |                  |               ^  |                ^
//!                   +------up----------+---(slow up)---+--+----------------+
//! ```
//!
//! Gesture events arrive through [`SliderMachine::send`], display frames
//! through [`SliderMachine::on_frame`]. Each call performs at most one state
//! transition and leaves the rendered window consistent with the new state
//! before returning.
//!
//! Progress below one slot only restyles the rendered items. Crossing a whole
//! slot commits it to the active index and rebuilds the window.

use carousel_animation::{Decay, FrameClock, FrameHandle, ManualClock, Spring};
use carousel_core::events::{event_types, GestureEvent};
use carousel_core::fsm::{EventId, StateId, StateKind, TransitionLog, TransitionRecord};
use carousel_core::Direction;

use crate::config::{PhysicsConstants, SliderConfig};
use crate::item::{Item, SliderItem};
use crate::state::SliderState;
use crate::style::apply_styles;
use crate::window::{build_window, effective_window_size, normalize_index};

/// Drags whose off-axis share reaches this are treated as vertical scrolls
pub const AXIS_LOCK_THRESHOLD: f32 = 0.35;

/// Minimum number of items for the slider to react to input
const MIN_INTERACTIVE_ITEMS: usize = 2;

/// Infinite carousel controller
pub struct SliderMachine<T: Item, C: FrameClock> {
    items: Vec<T>,
    rendered: Vec<SliderItem<T>>,
    active_index: usize,
    window_size: usize,
    state: SliderState,
    config: SliderConfig,
    clock: C,
    log: TransitionLog,
}

impl<T: Item, C: FrameClock> SliderMachine<T, C> {
    /// Create a slider over `items`, rendered at progress 0 on index 0
    pub fn new(items: Vec<T>, config: SliderConfig, clock: C) -> Self {
        let window_size = effective_window_size(config.window_size, items.len());
        let mut machine = Self {
            items,
            rendered: Vec::new(),
            active_index: 0,
            window_size,
            state: SliderState::Idle,
            config,
            clock,
            log: TransitionLog::new(),
        };
        machine.rebuild(0.0);
        machine
    }

    // =========================================================================
    // Read-only views
    // =========================================================================

    pub fn state(&self) -> &SliderState {
        &self.state
    }

    /// Rendered window, sentinels included, with resolved styles
    pub fn items(&self) -> &[SliderItem<T>] {
        &self.rendered
    }

    /// The logical item list
    pub fn source_items(&self) -> &[T] {
        &self.items
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Effective number of visible items
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Current sub-slot progress
    pub fn progress(&self) -> f32 {
        self.state.progress()
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating()
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Recent state changes, oldest first
    pub fn history(&self) -> impl Iterator<Item = &TransitionRecord> {
        self.log.history().iter()
    }

    /// Run `hook` whenever the slider enters `state` (see [`crate::state::states`])
    pub fn on_enter<F: FnMut() + Send + 'static>(&mut self, state: StateId, hook: F) {
        self.log.on_enter(state, hook);
    }

    /// Run `hook` whenever the slider leaves `state`
    pub fn on_exit<F: FnMut() + Send + 'static>(&mut self, state: StateId, hook: F) {
        self.log.on_exit(state, hook);
    }

    fn physics(&self) -> &PhysicsConstants {
        &self.config.physics
    }

    fn interactive(&self) -> bool {
        self.items.len() >= MIN_INTERACTIVE_ITEMS
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Navigate to the next item
    pub fn next(&mut self) {
        self.send(GestureEvent::ButtonPress(Direction::Next));
    }

    /// Navigate to the previous item
    pub fn prev(&mut self) {
        self.send(GestureEvent::ButtonPress(Direction::Prev));
    }

    /// Consume one gesture event
    pub fn send(&mut self, event: GestureEvent) {
        let event_id = event.event_type();

        match (self.state, event) {
            (SliderState::Idle, GestureEvent::PointerDown) if self.interactive() => {
                self.transition(
                    event_id,
                    SliderState::Pressed {
                        frozen_progress: 0.0,
                    },
                );
            }

            (SliderState::Idle, GestureEvent::ButtonPress(direction)) if self.interactive() => {
                let velocity = direction.sign() * self.physics().button_impulse;
                self.start_inertia(event_id, velocity, 0.0);
            }

            (
                SliderState::Pressed { frozen_progress },
                GestureEvent::DragMove {
                    movement,
                    pixels_per_step,
                    off_axis,
                },
            ) => {
                // NaN counts as off-axis
                if !(off_axis < AXIS_LOCK_THRESHOLD) {
                    tracing::trace!("slider: off-axis drag ignored (off_axis={:.2})", off_axis);
                    return;
                }
                self.drag(event_id, frozen_progress, 0, movement, pixels_per_step);
            }

            (SliderState::Pressed { frozen_progress }, GestureEvent::PointerUp { .. }) => {
                self.start_snapping(event_id, frozen_progress, 0.0);
            }

            (
                SliderState::Dragging {
                    step_offset,
                    base_offset,
                    ..
                },
                GestureEvent::DragMove {
                    movement,
                    pixels_per_step,
                    ..
                },
            ) => {
                self.drag(event_id, base_offset, step_offset, movement, pixels_per_step);
            }

            (SliderState::Dragging { progress, .. }, GestureEvent::PointerUp { velocity }) => {
                let velocity = self.physics().release_velocity(velocity);
                if velocity.abs() > self.physics().min_velocity {
                    self.start_inertia(event_id, velocity, progress);
                } else {
                    self.start_snapping(event_id, progress, 0.0);
                }
            }

            (
                SliderState::Inertia {
                    mut decay,
                    progress,
                    handle,
                    last_timestamp,
                },
                GestureEvent::ButtonPress(direction),
            ) => {
                decay.add_impulse(direction.sign() * self.physics().button_impulse);
                tracing::trace!("slider: impulse, velocity={:.3}", decay.velocity());
                self.state = SliderState::Inertia {
                    decay,
                    progress,
                    handle,
                    last_timestamp,
                };
            }

            (
                SliderState::Inertia { .. } | SliderState::Snapping { .. },
                GestureEvent::PointerDown,
            ) if self.interactive() => {
                let frozen_progress = self.state.progress();
                self.cancel_loop();
                self.transition(event_id, SliderState::Pressed { frozen_progress });
            }

            (state, event) => {
                tracing::trace!("slider: {} ignored in {}", event.name(), state.name());
            }
        }
    }

    /// Deliver a display frame
    ///
    /// Frames whose handle is not the live loop handle (a cancelled or
    /// replaced loop) are ignored.
    pub fn on_frame(&mut self, handle: FrameHandle, timestamp: f64) {
        if self.state.loop_handle() != Some(handle) {
            tracing::trace!("slider: stale frame ignored in {}", self.state.name());
            return;
        }

        match self.state {
            SliderState::Inertia {
                decay,
                progress,
                last_timestamp,
                ..
            } => self.tick_inertia(decay, progress, last_timestamp, timestamp),
            SliderState::Snapping {
                spring,
                last_timestamp,
                ..
            } => self.tick_snapping(spring, last_timestamp, timestamp),
            _ => {}
        }
    }

    // =========================================================================
    // Host updates
    // =========================================================================

    /// Replace the item list
    ///
    /// Any running loop is cancelled and the window is rebuilt at progress 0.
    pub fn set_items(&mut self, items: Vec<T>) {
        self.reset();
        self.items = items;
        self.window_size = effective_window_size(self.config.window_size, self.items.len());
        self.active_index = normalize_index(self.active_index as isize, self.items.len());
        self.rebuild(0.0);
    }

    /// Change the requested window size, keeping the current progress
    pub fn set_window_size(&mut self, requested: Option<usize>) {
        self.config.window_size = requested;
        self.window_size = effective_window_size(requested, self.items.len());
        let progress = self.state.progress();
        self.rebuild(progress);
    }

    /// Select an item from outside
    ///
    /// Any running loop is cancelled and the window is rebuilt at progress 0.
    pub fn set_active_index(&mut self, index: isize) {
        self.reset();
        self.active_index = normalize_index(index, self.items.len());
        self.rebuild(0.0);
    }

    /// Cancel any running loop (for host teardown)
    pub fn teardown(&mut self) {
        self.cancel_loop();
        if self.state.is_animating() {
            self.transition(event_types::RESET, SliderState::Idle);
        }
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    fn transition(&mut self, event: EventId, next: SliderState) {
        let from = self.state.state_id();
        self.state = next;
        if self.log.record(from, event, next.state_id()) {
            tracing::debug!(
                "slider: {} -> {} on {} (progress={:.3})",
                crate::state::state_name(from),
                next.name(),
                event_types::name(event),
                next.progress()
            );
        }
    }

    fn reset(&mut self) {
        self.cancel_loop();
        self.transition(event_types::RESET, SliderState::Idle);
    }

    fn cancel_loop(&mut self) {
        if let Some(handle) = self.state.loop_handle() {
            self.clock.cancel_frame(handle);
        }
    }

    fn drag(
        &mut self,
        event: EventId,
        base_offset: f32,
        committed: i32,
        movement: f32,
        pixels_per_step: f32,
    ) {
        let pixels_per_step = if pixels_per_step > 0.0 {
            pixels_per_step
        } else {
            1.0
        };
        let raw = base_offset - movement / pixels_per_step;
        if !raw.is_finite() {
            return;
        }

        // Truncation keeps |progress| < 1 on both sides of zero. Offsets
        // beyond i32 saturate; the sub-slot part comes from the float.
        let step_offset = raw.trunc().clamp(i32::MIN as f32, i32::MAX as f32) as i32;
        let progress = raw.fract();

        let steps = step_offset.saturating_sub(committed);
        if steps != 0 {
            self.commit_steps(steps);
            self.rebuild(progress);
        } else {
            self.restyle(progress);
        }

        self.transition(
            event,
            SliderState::Dragging {
                progress,
                step_offset,
                base_offset,
            },
        );
    }

    fn start_inertia(&mut self, event: EventId, velocity: f32, progress: f32) {
        self.cancel_loop();
        let decay = Decay::new(self.physics().decay_config(), velocity);
        let handle = self.clock.request_frame();
        let last_timestamp = self.clock.now();
        self.transition(
            event,
            SliderState::Inertia {
                decay,
                progress,
                handle,
                last_timestamp,
            },
        );
    }

    fn start_snapping(&mut self, event: EventId, progress: f32, velocity: f32) {
        self.cancel_loop();
        let mut spring = Spring::new(self.physics().spring_config(), progress).with_velocity(velocity);
        spring.set_target(progress.round());
        let handle = self.clock.request_frame();
        let last_timestamp = self.clock.now();
        self.transition(
            event,
            SliderState::Snapping {
                spring,
                handle,
                last_timestamp,
            },
        );
    }

    /// Elapsed seconds since `last`, clamped to the integrable range
    fn frame_delta(&self, last: f64, now: f64) -> f32 {
        let max = f64::from(self.physics().max_frame_delta);
        ((now - last) / 1000.0).clamp(0.0, max) as f32
    }

    fn tick_inertia(&mut self, mut decay: Decay, progress: f32, last: f64, now: f64) {
        if decay.is_resting() {
            self.start_snapping(event_types::FRAME, progress, decay.velocity());
            return;
        }

        let dt = self.frame_delta(last, now);
        let progress = self.settle_progress(progress + decay.step(dt));
        tracing::trace!(
            "slider: inertia dt={:.4} velocity={:.3} progress={:.3}",
            dt,
            decay.velocity(),
            progress
        );

        let handle = self.clock.request_frame();
        self.state = SliderState::Inertia {
            decay,
            progress,
            handle,
            last_timestamp: now,
        };
    }

    fn tick_snapping(&mut self, mut spring: Spring, last: f64, now: f64) {
        let dt = self.frame_delta(last, now);
        spring.step(dt);

        if spring.is_settled() {
            let target = spring.target().round() as i32;
            if target != 0 {
                self.commit_steps(target);
            }
            self.cancel_loop();
            self.rebuild(0.0);
            self.transition(event_types::FRAME, SliderState::Idle);
            return;
        }

        let value = spring.value();
        if value.abs() >= 1.0 {
            let steps = value.trunc();
            spring.rebase(steps);
            self.commit_steps(steps as i32);
            self.rebuild(spring.value());
        } else {
            self.restyle(value);
        }
        tracing::trace!(
            "slider: snap dt={:.4} value={:.4} velocity={:.4} target={}",
            dt,
            spring.value(),
            spring.velocity(),
            spring.target()
        );

        let handle = self.clock.request_frame();
        self.state = SliderState::Snapping {
            spring,
            handle,
            last_timestamp: now,
        };
    }

    // =========================================================================
    // Window maintenance
    // =========================================================================

    /// Commit whole slots out of `progress`, returning the sub-slot remainder
    fn settle_progress(&mut self, progress: f32) -> f32 {
        if progress.abs() >= 1.0 {
            let steps = progress.trunc();
            let remainder = progress - steps;
            self.commit_steps(steps as i32);
            self.rebuild(remainder);
            remainder
        } else {
            self.restyle(progress);
            progress
        }
    }

    fn commit_steps(&mut self, steps: i32) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        self.active_index = normalize_index(self.active_index as isize + steps as isize, len);
        tracing::debug!(
            "slider: committed {:+} slot(s), active index {}",
            steps,
            self.active_index
        );
    }

    fn rebuild(&mut self, progress: f32) {
        self.rendered = build_window(&self.items, self.active_index as isize, self.window_size);
        apply_styles(&mut self.rendered, self.window_size, progress);
        tracing::trace!(
            "slider: window rebuilt at index {} ({} slots)",
            self.active_index,
            self.rendered.len()
        );
    }

    fn restyle(&mut self, progress: f32) {
        apply_styles(&mut self.rendered, self.window_size, progress);
    }
}

impl<T: Item> SliderMachine<T, ManualClock> {
    /// Advance the manual clock one frame and deliver the due frames
    ///
    /// Returns whether a loop is still running.
    pub fn advance_frame(&mut self) -> bool {
        let due = self.clock.advance();
        let now = self.clock.now();
        for handle in due {
            self.on_frame(handle, now);
        }
        self.is_animating()
    }

    /// Advance until no loop is running
    ///
    /// Returns the number of frames taken, or `None` if still animating after
    /// `max_frames`.
    pub fn run_until_idle(&mut self, max_frames: usize) -> Option<usize> {
        for frame in 0..max_frames {
            if !self.is_animating() {
                return Some(frame);
            }
            self.advance_frame();
        }
        (!self.is_animating()).then_some(max_frames)
    }
}

impl<T: Item, C: FrameClock> Drop for SliderMachine<T, C> {
    fn drop(&mut self) {
        self.cancel_loop();
    }
}

impl<T: Item, C: FrameClock> std::fmt::Debug for SliderMachine<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderMachine")
            .field("items", &self.items.len())
            .field("active_index", &self.active_index)
            .field("window_size", &self.window_size)
            .field("state", &self.state)
            .finish()
    }
}
