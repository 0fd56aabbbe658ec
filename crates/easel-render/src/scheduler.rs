//! Manually driven frame scheduler.

use std::cell::RefCell;
use std::rc::Rc;

use easel_core::frame::{FrameHandle, FrameScheduler};

#[derive(Debug, Default)]
struct Inner {
    next: u64,
    pending: Vec<FrameHandle>,
    cancelled: u64,
}

/// A frame scheduler the test (or debugging host) advances by hand.
///
/// Clones share state: move one clone into the space and keep another to
/// observe outstanding requests and fire ticks.
#[derive(Debug, Clone, Default)]
pub struct ManualScheduler {
    inner: Rc<RefCell<Inner>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of outstanding frame requests.
    pub fn pending(&self) -> usize {
        self.inner.borrow().pending.len()
    }

    /// Number of requests withdrawn via cancellation.
    pub fn cancelled(&self) -> u64 {
        self.inner.borrow().cancelled
    }

    /// Drain the outstanding requests, as a host would before invoking the
    /// space's frame callback for each.
    pub fn take_pending(&self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.inner.borrow_mut().pending)
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        let mut inner = self.inner.borrow_mut();
        inner.next += 1;
        let handle = FrameHandle(inner.next);
        inner.pending.push(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let mut inner = self.inner.borrow_mut();
        let before = inner.pending.len();
        inner.pending.retain(|pending| *pending != handle);
        if inner.pending.len() != before {
            inner.cancelled += 1;
        }
    }
}
