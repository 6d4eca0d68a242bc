//! Critically-damped springs ("smooth damp")
//!
//! Each channel carries its own velocity so that a target change mid-flight
//! blends smoothly instead of restarting the motion. The integration uses the
//! usual rational approximation of `exp(-omega * dt)`, which keeps the result
//! stable for large frame deltas and independent of the frame rate.

use std::f32::consts::{PI, TAU};

/// Distance below which a channel snaps onto its target
pub const SNAP_EPSILON: f32 = 0.001;

/// Smallest accepted smooth time, avoids dividing by zero
const MIN_SMOOTH_TIME: f32 = 0.0001;

/// Advance `current` toward `target`. `smooth_time` is roughly the time to
/// reach the target; `delta` is the frame time in seconds.
pub fn smooth_damp(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, delta: f32) -> f32 {
    if delta <= 0.0 {
        return current;
    }
    if (current - target).abs() <= SNAP_EPSILON {
        *velocity = 0.0;
        return target;
    }

    let smooth_time = smooth_time.max(MIN_SMOOTH_TIME);
    let omega = 2.0 / smooth_time;
    let x = omega * delta;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * delta;
    *velocity = (*velocity - omega * temp) * exp;
    let output = target + (change + temp) * exp;

    // Never overshoot
    if (target - current > 0.0) == (output > target) {
        *velocity = 0.0;
        return target;
    }
    output
}

/// Signed shortest difference `to - from`, wrapped into (-PI, PI]
pub fn delta_angle(from: f32, to: f32) -> f32 {
    let mut d = (to - from) % TAU;
    if d > PI {
        d -= TAU;
    } else if d <= -PI {
        d += TAU;
    }
    d
}

/// Like [`smooth_damp`] but takes the shortest way around the circle
pub fn smooth_damp_angle(current: f32, target: f32, velocity: &mut f32, smooth_time: f32, delta: f32) -> f32 {
    let target = current + delta_angle(current, target);
    smooth_damp(current, target, velocity, smooth_time, delta)
}

/// A single damped value
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spring {
    pub value: f32,
    pub velocity: f32,
}

impl Spring {
    pub fn new(value: f32) -> Self {
        Self { value, velocity: 0.0 }
    }

    pub fn step(&mut self, target: f32, smooth_time: f32, delta: f32) -> f32 {
        self.value = smooth_damp(self.value, target, &mut self.velocity, smooth_time, delta);
        self.value
    }

    pub fn step_angle(&mut self, target: f32, smooth_time: f32, delta: f32) -> f32 {
        self.value = smooth_damp_angle(self.value, target, &mut self.velocity, smooth_time, delta);
        self.value
    }

    pub fn is_settled(&self, target: f32) -> bool {
        (self.value - target).abs() <= SNAP_EPSILON && self.velocity == 0.0
    }
}

/// Three independent damped channels (a position or a set of Euler angles)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spring3 {
    channels: [Spring; 3],
}

impl Spring3 {
    pub fn new(value: [f32; 3]) -> Self {
        Self {
            channels: value.map(Spring::new),
        }
    }

    pub fn value(&self) -> [f32; 3] {
        self.channels.map(|c| c.value)
    }

    pub fn velocity(&self) -> [f32; 3] {
        self.channels.map(|c| c.velocity)
    }

    pub fn step(&mut self, target: [f32; 3], smooth_time: f32, delta: f32) -> [f32; 3] {
        for (channel, t) in self.channels.iter_mut().zip(target) {
            channel.step(t, smooth_time, delta);
        }
        self.value()
    }

    /// Step each channel as an angle in radians
    pub fn step_angles(&mut self, target: [f32; 3], smooth_time: f32, delta: f32) -> [f32; 3] {
        for (channel, t) in self.channels.iter_mut().zip(target) {
            channel.step_angle(t, smooth_time, delta);
        }
        self.value()
    }

    pub fn is_settled(&self, target: [f32; 3]) -> bool {
        self.channels
            .iter()
            .zip(target)
            .all(|(c, t)| c.is_settled(t))
    }
}
