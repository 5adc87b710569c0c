//! Clamped look-at for a single bone.
//!
//! The bone's +Z axis is turned toward the target with world +Y as up, the result is
//! expressed relative to the parent, decomposed as XYZ Euler angles and the X and Y
//! angles are clamped. Nothing is carried between frames.

use glam::{EulerRot, Mat3, Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::inputs::BoneFrame;

const DEGENERATE_EPS: f32 = 1e-8;

/// Angular range (radians) allowed on the constrained X and Y axes.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookAtLimits {
    pub min: f32,
    pub max: f32,
}

impl Default for LookAtLimits {
    fn default() -> Self {
        Self {
            min: -0.5,
            max: 0.5,
        }
    }
}

impl LookAtLimits {
    #[inline]
    pub fn clamp(&self, angle: f32) -> f32 {
        angle.clamp(self.min, self.max)
    }
}

/// Parent-local orientation after clamping.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LookAtSolution {
    /// XYZ Euler angles; `euler[0]` and `euler[1]` lie within the limits.
    pub euler: [f32; 3],
    pub rotation: Quat,
}

/// World rotation whose +Z points from `eye` toward `target`.
fn object_look_rotation(eye: Vec3, target: Vec3, up: Vec3) -> Option<Quat> {
    let mut z = target - eye;
    if z.length_squared() < DEGENERATE_EPS {
        return None;
    }
    z = z.normalize();
    let mut x = up.cross(z);
    if x.length_squared() < DEGENERATE_EPS {
        // up and forward are parallel; nudge forward off the up axis
        if up.z.abs() >= 1.0 - 1e-6 {
            z.x += 1e-4;
        } else {
            z.z += 1e-4;
        }
        z = z.normalize();
        x = up.cross(z);
    }
    x = x.normalize();
    let y = z.cross(x);
    Some(Quat::from_mat3(&Mat3::from_cols(x, y, z)).normalize())
}

/// Orient `bone` toward `target` and clamp X/Y. `None` when the target sits on the bone.
pub fn solve_look_at(bone: &BoneFrame, target: Vec3, limits: &LookAtLimits) -> Option<LookAtSolution> {
    let world = object_look_rotation(bone.world_position, target, Vec3::Y)?;
    let local = bone.parent_world_rotation.inverse() * world;
    let (x, y, z) = local.to_euler(EulerRot::XYZ);
    let euler = [limits.clamp(x), limits.clamp(y), z];
    Some(LookAtSolution {
        euler,
        rotation: Quat::from_euler(EulerRot::XYZ, euler[0], euler[1], euler[2]),
    })
}

/// Torso target from normalized pointer coordinates: `(x * scale, y * scale, depth)`.
pub fn pointer_target(pointer: Vec2, scale: f32, depth: f32) -> Vec3 {
    Vec3::new(pointer.x * scale, pointer.y * scale, depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_ahead_is_identity() {
        let bone = BoneFrame::at(Vec3::ZERO);
        let s = solve_look_at(&bone, Vec3::new(0.0, 0.0, 5.0), &LookAtLimits::default()).unwrap();
        for a in s.euler {
            assert!(a.abs() < 1e-5);
        }
    }

    #[test]
    fn small_turn_is_not_clamped() {
        let bone = BoneFrame::at(Vec3::ZERO);
        let target = Vec3::new(0.2f32.tan(), 0.0, 1.0);
        let s = solve_look_at(&bone, target, &LookAtLimits::default()).unwrap();
        assert!((s.euler[1] - 0.2).abs() < 1e-4, "yaw {}", s.euler[1]);
    }

    #[test]
    fn target_behind_is_clamped() {
        let bone = BoneFrame::at(Vec3::ZERO);
        let s = solve_look_at(&bone, Vec3::new(-3.0, 50.0, -10.0), &LookAtLimits::default()).unwrap();
        assert!(s.euler[0] >= -0.5 && s.euler[0] <= 0.5);
        assert!(s.euler[1] >= -0.5 && s.euler[1] <= 0.5);
    }

    #[test]
    fn degenerate_target_is_skipped() {
        let bone = BoneFrame::at(Vec3::ONE);
        assert!(solve_look_at(&bone, Vec3::ONE, &LookAtLimits::default()).is_none());
    }

    #[test]
    fn pointer_maps_to_target_plane() {
        let t = pointer_target(Vec2::new(0.5, -1.0), 2.0, 1.0);
        assert_eq!(t, Vec3::new(1.0, -2.0, 1.0));
    }
}
