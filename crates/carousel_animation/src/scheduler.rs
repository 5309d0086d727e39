//! Frame scheduling
//!
//! Animation loops request one display frame at a time and receive a
//! [`FrameHandle`] for it. A loop that is replaced or torn down cancels its
//! handle; the owner compares the handle of every delivered frame against the
//! one it currently holds, so a frame from a discarded loop is ignored.

use std::cell::RefCell;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle of a pending frame request
    pub struct FrameHandle;
}

/// Source of display-frame callbacks
pub trait FrameClock {
    /// Current time in milliseconds (monotonic)
    fn now(&self) -> f64;

    /// Request delivery of the next frame
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a pending request (no-op if already delivered or cancelled)
    fn cancel_frame(&mut self, handle: FrameHandle);

    /// Whether `handle` is still waiting for delivery
    fn is_pending(&self, handle: FrameHandle) -> bool;
}

impl<C: FrameClock> FrameClock for Rc<RefCell<C>> {
    fn now(&self) -> f64 {
        self.borrow().now()
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.borrow_mut().request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.borrow_mut().cancel_frame(handle)
    }

    fn is_pending(&self, handle: FrameHandle) -> bool {
        self.borrow().is_pending(handle)
    }
}

/// Deterministic clock driven by the caller
///
/// Time only moves when [`ManualClock::advance`] is called. Each advance
/// delivers (drains) every request pending at that moment, like a display
/// frame callback.
pub struct ManualClock {
    pending: SlotMap<FrameHandle, ()>,
    now_ms: f64,
    frame_ms: f64,
    frames: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            pending: SlotMap::with_key(),
            now_ms: 0.0,
            frame_ms: 1000.0 / 60.0,
            frames: 0,
        }
    }

    /// Create a clock with a fixed frame interval in milliseconds
    pub fn with_frame_interval(frame_ms: f64) -> Self {
        let mut clock = Self::new();
        clock.set_frame_interval(frame_ms);
        clock
    }

    pub fn set_frame_interval(&mut self, frame_ms: f64) {
        self.frame_ms = if frame_ms > 0.0 { frame_ms } else { 1.0 };
    }

    pub fn frame_interval(&self) -> f64 {
        self.frame_ms
    }

    /// Advance by one frame interval and take the due requests
    pub fn advance(&mut self) -> Vec<FrameHandle> {
        self.advance_by(self.frame_ms)
    }

    /// Advance by `ms` and take the due requests
    pub fn advance_by(&mut self, ms: f64) -> Vec<FrameHandle> {
        self.now_ms += ms.max(0.0);
        self.frames += 1;
        let due: Vec<FrameHandle> = self.pending.drain().map(|(handle, _)| handle).collect();
        tracing::trace!(
            "clock: frame {} at {:.2}ms, {} due",
            self.frames,
            self.now_ms,
            due.len()
        );
        due
    }

    /// Number of requests waiting for the next frame
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Frames advanced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl FrameClock for ManualClock {
    fn now(&self) -> f64 {
        self.now_ms
    }

    fn request_frame(&mut self) -> FrameHandle {
        self.pending.insert(())
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.remove(handle);
    }

    fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains_key(handle)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ManualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManualClock")
            .field("now_ms", &self.now_ms)
            .field("frame_ms", &self.frame_ms)
            .field("pending", &self.pending.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_and_deliver() {
        let mut clock = ManualClock::with_frame_interval(16.0);
        let handle = clock.request_frame();
        assert!(clock.is_pending(handle));
        assert_eq!(clock.pending_count(), 1);

        let due = clock.advance();
        assert_eq!(due, vec![handle]);
        assert_eq!(clock.now(), 16.0);
        assert!(!clock.is_pending(handle));
        assert_eq!(clock.pending_count(), 0);
    }

    #[test]
    fn test_cancelled_request_not_delivered() {
        let mut clock = ManualClock::new();
        let handle = clock.request_frame();
        clock.cancel_frame(handle);

        assert!(clock.advance().is_empty());
        // Cancelling twice is harmless
        clock.cancel_frame(handle);
    }

    #[test]
    fn test_handles_are_not_reused() {
        let mut clock = ManualClock::new();
        let first = clock.request_frame();
        clock.cancel_frame(first);
        let second = clock.request_frame();
        assert_ne!(first, second);
    }

    #[test]
    fn test_shared_clock() {
        let shared = Rc::new(RefCell::new(ManualClock::with_frame_interval(10.0)));
        let mut handle_side = shared.clone();

        let handle = handle_side.request_frame();
        assert!(shared.borrow().is_pending(handle));

        let due = shared.borrow_mut().advance();
        assert_eq!(due, vec![handle]);
        assert_eq!(handle_side.now(), 10.0);
    }

    #[test]
    fn test_non_positive_interval_is_floored() {
        let clock = ManualClock::with_frame_interval(0.0);
        assert_eq!(clock.frame_interval(), 1.0);
    }
}
