//! Core configuration for folio-avatar-core.

use serde::{Deserialize, Serialize};

use crate::bones::BoneRole;
use crate::look_at::LookAtLimits;
use crate::retarget::PostureCorrection;

/// Tunables for transitions, posture correction and look-at. Every field has a default,
/// so partial JSON (or `{}`) deserializes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds for fade-in, cross-fade and unmount fade-out.
    pub fade_duration: f32,
    pub posture: PostureCorrection,
    pub look_at: LookAtLimits,
    /// Normalized pointer coordinates are multiplied by this for the torso target.
    pub pointer_scale: f32,
    /// Z of the torso target.
    pub pointer_depth: f32,
    /// Node name resolved to [`BoneRole::Head`].
    pub head_bone: String,
    /// Node name resolved to [`BoneRole::Torso`].
    pub torso_bone: String,
    /// Clip requested when props do not name one.
    pub default_animation: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fade_duration: 0.5,
            posture: PostureCorrection::default(),
            look_at: LookAtLimits::default(),
            pointer_scale: 2.0,
            pointer_depth: 1.0,
            head_bone: BoneRole::Head.default_node_name().to_string(),
            torso_bone: BoneRole::Torso.default_node_name().to_string(),
            default_animation: "Standing".to_string(),
        }
    }
}

impl Config {
    pub fn bone_name(&self, role: BoneRole) -> &str {
        match role {
            BoneRole::Head => &self.head_bone,
            BoneRole::Torso => &self.torso_bone,
        }
    }
}
