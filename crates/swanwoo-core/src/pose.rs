//! Hover-driven pose of a product model and its spotlight

use crate::damping::Spring3;
use std::f32::consts::PI;

/// Smooth times (seconds) for each animated channel
pub const ROTATION_SMOOTH: f32 = 0.3;
pub const HOVER_POSITION_SMOOTH: f32 = 1.0;
pub const REST_POSITION_SMOOTH: f32 = 0.3;
pub const LIGHT_SMOOTH: f32 = 0.2;

/// Spotlight position while the pointer is away
pub const REST_LIGHT: [f32; 3] = [0.0, 4.0, 2.0];

/// Extra forward tilt applied while hovered (radians)
const HOVER_TILT: f32 = 0.4;

/// Pointer position in normalized device coordinates of a canvas:
/// x grows to the right, y grows upward, both in [-1, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pointer {
    pub x: f32,
    pub y: f32,
}

impl Pointer {
    pub const CENTER: Pointer = Pointer { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.clamp(-1.0, 1.0),
            y: y.clamp(-1.0, 1.0),
        }
    }

    /// Convert a cursor position (origin top-left, y down) inside a surface
    /// of the given size. Degenerate sizes map to the center.
    pub fn from_cursor(cursor_x: f32, cursor_y: f32, width: f32, height: f32) -> Self {
        if width <= 0.0 || height <= 0.0 {
            return Self::CENTER;
        }
        Self::new(cursor_x / width * 2.0 - 1.0, -(cursor_y / height) * 2.0 + 1.0)
    }
}

/// Target values the springs are pulled toward in a given frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseTargets {
    pub rotation: [f32; 3],
    pub position: [f32; 3],
    pub light: [f32; 3],
    pub position_smooth: f32,
}

impl PoseTargets {
    /// Model turns toward the pointer and leans back as it nears the center
    pub fn hovered(pointer: Pointer) -> Self {
        Self {
            rotation: [pointer.y * (PI / 3.0) + HOVER_TILT, -pointer.x * PI / 3.0, 0.0],
            position: [0.0, 0.0, -(1.0 - pointer.x.abs()) / 2.0],
            light: [pointer.x * 3.0, 2.5, -pointer.y + 1.0],
            position_smooth: HOVER_POSITION_SMOOTH,
        }
    }

    pub fn neutral() -> Self {
        Self {
            rotation: [0.0; 3],
            position: [0.0; 3],
            light: REST_LIGHT,
            position_smooth: REST_POSITION_SMOOTH,
        }
    }

    pub fn for_input(hovered: bool, pointer: Pointer) -> Self {
        if hovered {
            Self::hovered(pointer)
        } else {
            Self::neutral()
        }
    }
}

/// Damped rotation/position of the model group plus its spotlight position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPose {
    rotation: Spring3,
    position: Spring3,
    light: Spring3,
}

impl Default for ModelPose {
    fn default() -> Self {
        Self::neutral()
    }
}

impl ModelPose {
    pub fn neutral() -> Self {
        Self {
            rotation: Spring3::new([0.0; 3]),
            position: Spring3::new([0.0; 3]),
            light: Spring3::new(REST_LIGHT),
        }
    }

    /// Advance one frame of `delta` seconds
    pub fn advance(&mut self, hovered: bool, pointer: Pointer, delta: f32) {
        let targets = PoseTargets::for_input(hovered, pointer);
        self.rotation.step_angles(targets.rotation, ROTATION_SMOOTH, delta);
        self.position.step(targets.position, targets.position_smooth, delta);
        self.light.step(targets.light, LIGHT_SMOOTH, delta);
    }

    /// Euler angles (XYZ order) in radians
    pub fn rotation(&self) -> [f32; 3] {
        self.rotation.value()
    }

    pub fn position(&self) -> [f32; 3] {
        self.position.value()
    }

    pub fn light(&self) -> [f32; 3] {
        self.light.value()
    }

    /// True once rotation, position and light rest exactly at neutral
    pub fn is_neutral(&self) -> bool {
        let neutral = PoseTargets::neutral();
        self.rotation.is_settled(neutral.rotation)
            && self.position.is_settled(neutral.position)
            && self.light.is_settled(neutral.light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y) * (x - y))
            .sum::<f32>()
            .sqrt()
    }

    #[test]
    fn test_pointer_from_cursor() {
        assert_eq!(Pointer::from_cursor(0.0, 0.0, 400.0, 500.0), Pointer::new(-1.0, 1.0));
        assert_eq!(Pointer::from_cursor(400.0, 500.0, 400.0, 500.0), Pointer::new(1.0, -1.0));
        assert_eq!(Pointer::from_cursor(200.0, 250.0, 400.0, 500.0), Pointer::CENTER);
        assert_eq!(Pointer::from_cursor(10.0, 10.0, 0.0, 500.0), Pointer::CENTER);
        // Outside the surface clamps to the edge
        assert_eq!(Pointer::from_cursor(-50.0, 900.0, 400.0, 500.0), Pointer::new(-1.0, -1.0));
    }

    #[test]
    fn test_hover_targets() {
        let t = PoseTargets::hovered(Pointer::new(0.5, -0.5));
        assert!((t.rotation[0] - (-0.5 * PI / 3.0 + 0.4)).abs() < 1e-6);
        assert!((t.rotation[1] - (-0.5 * PI / 3.0)).abs() < 1e-6);
        assert_eq!(t.position, [0.0, 0.0, -0.25]);
        assert_eq!(t.light, [1.5, 2.5, 1.5]);
    }

    #[test]
    fn test_hover_moves_toward_pointer() {
        let mut pose = ModelPose::neutral();
        let pointer = Pointer::new(1.0, 1.0);
        for _ in 0..120 {
            pose.advance(true, pointer, DT);
        }
        let target = PoseTargets::hovered(pointer);
        assert!(distance(pose.rotation(), target.rotation) < 0.01);
        assert!(distance(pose.light(), target.light) < 0.01);
        assert!(!pose.is_neutral());
    }

    #[test]
    fn test_hover_off_relaxes_to_neutral_from_any_pose() {
        for (px, py) in [(1.0, 1.0), (-1.0, 0.3), (0.0, -1.0), (0.2, 0.9)] {
            let mut pose = ModelPose::neutral();
            let pointer = Pointer::new(px, py);
            for _ in 0..45 {
                pose.advance(true, pointer, DT);
            }

            let neutral = PoseTargets::neutral();
            let start_rotation = distance(pose.rotation(), neutral.rotation);
            let start_position = distance(pose.position(), neutral.position);
            for frame in 1..=600 {
                pose.advance(false, pointer, DT);
                if frame == 60 {
                    // Residual hover velocity may carry a little further at first,
                    // but after a second the pose is well on its way back.
                    assert!(distance(pose.rotation(), neutral.rotation) < start_rotation * 0.5 + 1e-3);
                    assert!(distance(pose.position(), neutral.position) < start_position * 0.5 + 1e-3);
                }
            }
            assert!(pose.is_neutral(), "pose did not settle for pointer ({}, {})", px, py);
        }
    }

    #[test]
    fn test_zero_delta_keeps_pose() {
        let mut pose = ModelPose::neutral();
        for _ in 0..10 {
            pose.advance(true, Pointer::new(0.4, 0.4), DT);
        }
        let before = pose;
        pose.advance(false, Pointer::CENTER, 0.0);
        assert_eq!(pose, before);
    }
}
