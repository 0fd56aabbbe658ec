//! The frame-scheduling port and the paint-rate gate.

/// A monotonic timestamp in milliseconds, as supplied by the host's frame
/// callback.
pub type Timestamp = f64;

/// Handle to an outstanding frame request, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(pub u64);

/// Host primitive for running a callback once before the next repaint.
///
/// [`Space::render`](crate::space::Space::render) requests frames through
/// this port and the host calls
/// [`Space::on_frame`](crate::space::Space::on_frame) with the timestamp
/// when each request fires. A request is one-shot; the space re-requests
/// from inside `on_frame` while its loop is running.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameHandle;
    /// Withdraw an outstanding request. Unknown handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Drops ticks that arrive sooner than a minimum interval.
///
/// The gate keeps only the last accepted timestamp; rejected ticks are
/// discarded rather than accumulated, so a burst of fast ticks never
/// causes catch-up paints.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Throttle {
    min_interval: Option<f64>,
    last: Option<Timestamp>,
}

impl Throttle {
    /// Gate to at most `fps` paints per second; `None` disables gating.
    pub fn from_fps(fps: Option<f64>) -> Self {
        Self {
            min_interval: fps.filter(|f| *f > 0.0).map(|f| 1000.0 / f),
            last: None,
        }
    }

    /// Whether a tick at `now` should run. Accepting a tick records it.
    pub fn ready(&mut self, now: Timestamp) -> bool {
        if let (Some(min), Some(last)) = (self.min_interval, self.last) {
            if now - last < min {
                return false;
            }
        }
        self.last = Some(now);
        true
    }

    /// Forget the last accepted tick, so the next one always runs.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncapped_accepts_everything() {
        let mut gate = Throttle::from_fps(None);
        for i in 0..5 {
            assert!(gate.ready(f64::from(i)));
        }
    }

    #[test]
    fn test_cap_30_over_60hz_ticks_paints_every_other() {
        let mut gate = Throttle::from_fps(Some(30.0));
        let mut painted = Vec::new();
        let mut now = 0.0;
        for tick in 0..10 {
            if gate.ready(now) {
                painted.push(tick);
            }
            now += 16.7;
        }
        assert_eq!(painted, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn test_rejected_ticks_do_not_accumulate() {
        let mut gate = Throttle::from_fps(Some(10.0));
        assert!(gate.ready(0.0));
        // A burst of fast ticks is dropped entirely.
        for i in 1..10 {
            assert!(!gate.ready(f64::from(i)));
        }
        assert!(gate.ready(100.0));
        assert!(!gate.ready(150.0));
    }

    #[test]
    fn test_reset_reopens_gate() {
        let mut gate = Throttle::from_fps(Some(1.0));
        assert!(gate.ready(0.0));
        assert!(!gate.ready(1.0));
        gate.reset();
        assert!(gate.ready(1.0));
    }
}
