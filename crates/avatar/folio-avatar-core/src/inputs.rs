//! Input contracts for the avatar.
//!
//! Props change rarely and go through `Avatar::set_props`; frame inputs are rebuilt by
//! the host every rendered frame and passed to `Avatar::update`.

use glam::{Quat, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::ids::Domain;

fn default_animation() -> String {
    "Standing".to_string()
}

/// Component-level inputs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AvatarProps {
    /// Requested clip name; names outside the known set are ignored.
    #[serde(default = "default_animation")]
    pub animation: String,
    #[serde(default)]
    pub wireframe: bool,
    #[serde(default)]
    pub domain: Option<Domain>,
}

impl Default for AvatarProps {
    fn default() -> Self {
        Self {
            animation: default_animation(),
            wireframe: false,
            domain: None,
        }
    }
}

/// Which look-at behaviours run this frame. Both, either or neither.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowConfig {
    /// Head faces the camera.
    #[serde(default)]
    pub head_follow: bool,
    /// Torso faces a point derived from the pointer.
    #[serde(default)]
    pub cursor_follow: bool,
}

/// Where a bone is this frame, as seen by the host's scene graph.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneFrame {
    pub world_position: Vec3,
    /// World rotation of the bone's parent; look-at results are expressed relative to it.
    pub parent_world_rotation: Quat,
}

impl BoneFrame {
    pub fn at(world_position: Vec3) -> Self {
        Self {
            world_position,
            parent_world_rotation: Quat::IDENTITY,
        }
    }
}

/// Per-frame inputs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInputs {
    pub follow: FollowConfig,
    pub camera_position: Vec3,
    /// Normalized device coordinates of the pointer, each in [-1, 1], y up.
    pub pointer: Vec2,
    pub head: Option<BoneFrame>,
    pub torso: Option<BoneFrame>,
}
