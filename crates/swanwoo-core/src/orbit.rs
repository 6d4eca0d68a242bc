//! Orbit camera state
//!
//! The camera sits on a sphere around a target point (Y up). Azimuth is
//! measured around +Y starting from +Z, polar from +Y. The state captured at
//! construction (or by [`OrbitCamera::save_state`]) is what
//! [`OrbitCamera::reset`] returns to.

use std::f32::consts::PI;

/// Keeps the polar angle off the poles
const POLAR_EPSILON: f32 = 1e-4;

/// User interaction switches and distance bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLimits {
    pub enable_rotate: bool,
    pub enable_zoom: bool,
    pub enable_pan: bool,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for OrbitLimits {
    /// Product viewers: no direct manipulation, distance kept in [2.5, 3.5]
    fn default() -> Self {
        Self {
            enable_rotate: false,
            enable_zoom: false,
            enable_pan: false,
            min_distance: 2.5,
            max_distance: 3.5,
        }
    }
}

impl OrbitLimits {
    pub fn interactive() -> Self {
        Self {
            enable_rotate: true,
            enable_zoom: true,
            enable_pan: true,
            ..Self::default()
        }
    }

    fn clamp_distance(&self, distance: f32) -> f32 {
        distance.clamp(self.min_distance, self.max_distance.max(self.min_distance))
    }
}

/// Spherical camera placement around a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub target: [f32; 3],
    pub azimuth: f32,
    pub polar: f32,
    pub distance: f32,
}

impl OrbitState {
    pub fn from_eye(eye: [f32; 3], target: [f32; 3]) -> Self {
        let offset = sub(eye, target);
        let distance = length(offset);
        if distance <= f32::EPSILON {
            return Self {
                target,
                azimuth: 0.0,
                polar: PI / 2.0,
                distance: 0.0,
            };
        }
        Self {
            target,
            azimuth: offset[0].atan2(offset[2]),
            polar: (offset[1] / distance).clamp(-1.0, 1.0).acos(),
            distance,
        }
    }

    /// Camera position in world space
    pub fn eye(&self) -> [f32; 3] {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        add(
            self.target,
            [
                self.distance * sin_p * sin_a,
                self.distance * cos_p,
                self.distance * sin_p * cos_a,
            ],
        )
    }

    /// Camera right and up vectors
    fn basis(&self) -> ([f32; 3], [f32; 3]) {
        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuth.sin_cos();
        let right = [cos_a, 0.0, -sin_a];
        let back = [sin_p * sin_a, cos_p, sin_p * cos_a];
        (right, cross(back, right))
    }
}

/// Orbit camera with a restorable initial state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    current: OrbitState,
    saved: OrbitState,
    limits: OrbitLimits,
}

impl OrbitCamera {
    /// Place the camera at `eye` looking at `target`. The distance is clamped
    /// into the limits right away, and the clamped state becomes the reset
    /// state.
    pub fn new(eye: [f32; 3], target: [f32; 3], limits: OrbitLimits) -> Self {
        let mut state = OrbitState::from_eye(eye, target);
        state.distance = limits.clamp_distance(state.distance);
        state.polar = state.polar.clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        Self {
            current: state,
            saved: state,
            limits,
        }
    }

    pub fn state(&self) -> &OrbitState {
        &self.current
    }

    pub fn saved_state(&self) -> &OrbitState {
        &self.saved
    }

    pub fn limits(&self) -> &OrbitLimits {
        &self.limits
    }

    pub fn eye(&self) -> [f32; 3] {
        self.current.eye()
    }

    pub fn target(&self) -> [f32; 3] {
        self.current.target
    }

    /// Orbit by the given angles (radians). Returns false when rotation is disabled.
    pub fn rotate(&mut self, d_azimuth: f32, d_polar: f32) -> bool {
        if !self.limits.enable_rotate {
            return false;
        }
        self.current.azimuth += d_azimuth;
        self.current.polar = (self.current.polar + d_polar).clamp(POLAR_EPSILON, PI - POLAR_EPSILON);
        true
    }

    /// Multiply the distance by `factor` (< 1 moves closer)
    pub fn zoom(&mut self, factor: f32) -> bool {
        if !self.limits.enable_zoom || factor <= 0.0 {
            return false;
        }
        self.current.distance = self.limits.clamp_distance(self.current.distance * factor);
        true
    }

    /// Move the target in the view plane; offsets are fractions of the distance
    pub fn pan(&mut self, dx: f32, dy: f32) -> bool {
        if !self.limits.enable_pan {
            return false;
        }
        let (right, up) = self.current.basis();
        let scale = self.current.distance;
        let shift = add(mul(right, -dx * scale), mul(up, dy * scale));
        self.current.target = add(self.current.target, shift);
        true
    }

    /// Make the current placement the one [`reset`](Self::reset) restores
    pub fn save_state(&mut self) {
        self.saved = self.current;
    }

    /// Restore the saved placement, discarding any pan/zoom/rotate
    pub fn reset(&mut self) {
        self.current = self.saved;
    }

    pub fn is_at_saved(&self) -> bool {
        self.current == self.saved
    }
}

fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn sub(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn mul(a: [f32; 3], s: f32) -> [f32; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn length(a: [f32; 3]) -> f32 {
    (a[0] * a[0] + a[1] * a[1] + a[2] * a[2]).sqrt()
}
