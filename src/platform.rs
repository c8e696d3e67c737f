//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Frame scheduling (the host's "call me next frame" primitive)
//! - Collaborator failures (audio device gone, render surface lost)

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Failure reported by an external collaborator
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    /// Device or context missing
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    /// Handle was released or lost
    #[error("collaborator handle lost: {0}")]
    Lost(String),
}

/// Token for one scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host frame scheduling primitive. The host must eventually call
/// [`crate::Game::on_frame`] with every handle it hands out and not cancelled.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    fn cancel_frame(&mut self, handle: FrameHandle);
}

impl<T: FrameScheduler> FrameScheduler for Rc<RefCell<T>> {
    fn request_frame(&mut self) -> FrameHandle {
        self.borrow_mut().request_frame()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.borrow_mut().cancel_frame(handle);
    }
}

/// In-process frame queue for headless hosts and tests.
///
/// Handles are fired oldest first via [`FrameQueue::next_due`].
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    cancelled: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the next frame to fire
    pub fn next_due(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of frames cancelled before firing
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|h| *h != handle);
        if self.pending.len() < before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_fires_in_order() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        let b = queue.request_frame();
        assert_ne!(a, b);
        assert_eq!(queue.next_due(), Some(a));
        assert_eq!(queue.next_due(), Some(b));
        assert_eq!(queue.next_due(), None);
    }

    #[test]
    fn test_cancel_removes_pending() {
        let mut queue = FrameQueue::new();
        let a = queue.request_frame();
        queue.cancel_frame(a);
        queue.cancel_frame(a);
        assert_eq!(queue.pending(), 0);
        assert_eq!(queue.cancelled(), 1);
    }
}
