//! Logical timers driven by caller-supplied timestamps
//!
//! Nothing here reads a wall clock. The host feeds timestamps in (from a
//! display frame callback, a test, or a fixed-rate loop) and asks what is due.
//! Every registration gets a fresh handle, so a tick that belongs to a
//! cancelled registration can be recognized and dropped.

use serde::{Deserialize, Serialize};

/// Identifies one registration of a timer or frame request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn epoch(&self) -> u64 {
        self.0
    }
}

/// A repeating timer (`every(period)` / `cancel(handle)`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalTimer {
    period_ms: f64,
    /// Active registration and its next due time
    active: Option<(TimerHandle, f64)>,
    next_epoch: u64,
}

impl IntervalTimer {
    pub fn new(period_ms: f64) -> Self {
        Self {
            period_ms: period_ms.max(1.0),
            active: None,
            next_epoch: 1,
        }
    }

    pub fn period_ms(&self) -> f64 {
        self.period_ms
    }

    /// Start firing every period, first at `now + period`. Replaces any
    /// existing registration.
    pub fn every(&mut self, now_ms: f64) -> TimerHandle {
        let handle = TimerHandle(self.next_epoch);
        self.next_epoch += 1;
        self.active = Some((handle, now_ms + self.period_ms));
        handle
    }

    /// Cancel `handle` if it is the live registration. Returns whether anything stopped.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        match self.active {
            Some((live, _)) if live == handle => {
                self.active = None;
                true
            }
            _ => false,
        }
    }

    pub fn handle(&self) -> Option<TimerHandle> {
        self.active.map(|(h, _)| h)
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Whether `handle` is the live registration
    pub fn is_current(&self, handle: TimerHandle) -> bool {
        self.handle() == Some(handle)
    }

    /// Next due time, if running
    pub fn next_due_ms(&self) -> Option<f64> {
        self.active.map(|(_, due)| due)
    }

    /// Yield one due tick, if any, and schedule the following one.
    ///
    /// Call in a loop to catch up after a long gap; each call yields at most
    /// one tick.
    pub fn poll(&mut self, now_ms: f64) -> Option<TimerHandle> {
        let (handle, due) = self.active?;
        // NaN timestamps never make anything due
        if !(now_ms >= due) {
            return None;
        }
        self.active = Some((handle, due + self.period_ms));
        Some(handle)
    }
}

/// A single pending "call me on the next display frame" request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameRequest {
    pending: Option<TimerHandle>,
    next_epoch: u64,
}

impl FrameRequest {
    /// Ask for the next frame. At most one request is ever outstanding.
    pub fn request(&mut self) -> TimerHandle {
        if let Some(handle) = self.pending {
            return handle;
        }
        self.next_epoch += 1;
        let handle = TimerHandle(self.next_epoch);
        self.pending = Some(handle);
        handle
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the outstanding request; false if there was none
    pub fn take(&mut self) -> bool {
        self.pending.take().is_some()
    }
}
