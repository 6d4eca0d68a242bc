//! Throttled scroll sampling

/// Lets an event through at most once per window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Throttle {
    window_ms: f64,
    last_ran: Option<f64>,
}

impl Throttle {
    pub fn new(window_ms: f64) -> Self {
        Self {
            window_ms: window_ms.max(0.0),
            last_ran: None,
        }
    }

    /// True if an event at `now_ms` may run; records it when it does.
    /// A clock that went backwards is treated as a fresh start.
    pub fn ready(&mut self, now_ms: f64) -> bool {
        let ok = match self.last_ran {
            None => true,
            Some(last) => now_ms < last || now_ms - last >= self.window_ms,
        };
        if ok {
            self.last_ran = Some(now_ms);
        }
        ok
    }
}

/// Vertical scroll offset, sampled through a [`Throttle`]
///
/// A reading that arrives inside the throttle window is held back and can be
/// delivered later with [`flush`](Self::flush), so the final resting
/// position of a fast scroll is never lost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollSampler {
    throttle: Throttle,
    offset: u32,
    pending: Option<u32>,
}

impl ScrollSampler {
    pub fn new(window_ms: f64) -> Self {
        Self {
            throttle: Throttle::new(window_ms),
            offset: 0,
            pending: None,
        }
    }

    /// Feed a raw `scrollY` reading. Returns the new offset when accepted.
    pub fn sample(&mut self, now_ms: f64, scroll_y: f64) -> Option<u32> {
        let value = to_offset(scroll_y);
        if self.throttle.ready(now_ms) {
            self.pending = None;
            self.offset = value;
            Some(value)
        } else {
            self.pending = Some(value);
            None
        }
    }

    /// Deliver a held-back reading once the window has passed
    pub fn flush(&mut self, now_ms: f64) -> Option<u32> {
        let value = self.pending?;
        if self.throttle.ready(now_ms) {
            self.pending = None;
            self.offset = value;
            Some(value)
        } else {
            None
        }
    }

    /// Last accepted offset
    pub fn offset(&self) -> u32 {
        self.offset
    }
}

/// Negative readings (overscroll bounce) clamp to zero
fn to_offset(scroll_y: f64) -> u32 {
    if scroll_y.is_finite() && scroll_y > 0.0 {
        scroll_y.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}
