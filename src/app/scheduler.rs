// app/scheduler.rs
// Frame scheduling primitives: "run this before the next repaint"

use crate::config::DEFAULT_FRAME_RATE;
use crossbeam::channel::{self, Receiver};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Handle for one scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(u64);

impl FrameRequest {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Host hook for frame callbacks. A request fires at most once; a cancelled
/// request never fires.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameRequest;
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// Frames fire only when the host pulls them, in request order.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queued: VecDeque<FrameRequest>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest outstanding request, as the host does at repaint time.
    pub fn next_due(&mut self) -> Option<FrameRequest> {
        self.queued.pop_front()
    }

    pub fn outstanding(&self) -> usize {
        self.queued.len()
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        self.queued.push_back(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.queued.retain(|r| *r != request);
    }
}

/// Paces frames from a single repeating timer. At most one request is armed
/// at a time; the next tick fires it.
pub struct IntervalScheduler {
    ticker: Receiver<Instant>,
    interval: Duration,
    next_id: u64,
    armed: Option<FrameRequest>,
}

impl IntervalScheduler {
    pub fn new(frame_rate: f32) -> Self {
        let rate = if frame_rate.is_finite() && frame_rate > 0.0 {
            frame_rate
        } else {
            log::warn!("invalid frame rate {frame_rate}; pacing at {DEFAULT_FRAME_RATE} fps");
            DEFAULT_FRAME_RATE
        };
        let interval = Duration::from_secs_f32(1.0 / rate);
        Self {
            ticker: channel::tick(interval),
            interval,
            next_id: 0,
            armed: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Block until the next tick and hand out the armed request. Returns
    /// `None` without waiting when nothing is armed.
    pub fn wait_frame(&mut self) -> Option<FrameRequest> {
        if self.armed.is_none() {
            return None;
        }
        if self.ticker.recv().is_err() {
            log::warn!("frame ticker disconnected");
            return None;
        }
        self.armed.take()
    }
}

impl FrameScheduler for IntervalScheduler {
    fn request_frame(&mut self) -> FrameRequest {
        self.next_id += 1;
        let request = FrameRequest(self.next_id);
        if let Some(previous) = self.armed.replace(request) {
            log::trace!("frame request {} superseded", previous.id());
        }
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.armed == Some(request) {
            self.armed = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_requests_fire_in_order() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        let b = s.request_frame();
        assert_ne!(a, b);
        assert_eq!(s.next_due(), Some(a));
        assert_eq!(s.next_due(), Some(b));
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn manual_cancel_removes_request() {
        let mut s = ManualScheduler::new();
        let a = s.request_frame();
        s.cancel_frame(a);
        s.cancel_frame(a);
        assert_eq!(s.outstanding(), 0);
        assert_eq!(s.next_due(), None);
    }

    #[test]
    fn interval_fires_armed_request() {
        let mut s = IntervalScheduler::new(500.0);
        assert_eq!(s.wait_frame(), None);
        let a = s.request_frame();
        assert_eq!(s.wait_frame(), Some(a));
        assert_eq!(s.wait_frame(), None);
    }

    #[test]
    fn interval_keeps_slow_rates() {
        assert_eq!(IntervalScheduler::new(0.5).interval(), Duration::from_secs(2));
        assert_eq!(IntervalScheduler::new(50.0).interval(), Duration::from_millis(20));
        assert_eq!(
            IntervalScheduler::new(0.0).interval(),
            Duration::from_secs_f32(1.0 / DEFAULT_FRAME_RATE)
        );
    }

    #[test]
    fn interval_cancel_disarms() {
        let mut s = IntervalScheduler::new(500.0);
        let a = s.request_frame();
        s.cancel_frame(a);
        assert_eq!(s.wait_frame(), None);
    }
}
