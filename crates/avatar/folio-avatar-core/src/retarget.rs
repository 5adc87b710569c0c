//! One-time posture correction for clips authored on a donor rig.

use serde::{Deserialize, Serialize};

use crate::data::{ClipData, TrackKind};
use crate::ids::ClipName;

/// Scales the rotational part of selected quaternion curves of one clip.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostureCorrection {
    pub clip: ClipName,
    pub factor: f32,
    /// Substrings matched against track names.
    pub bone_markers: Vec<String>,
}

impl Default for PostureCorrection {
    fn default() -> Self {
        Self {
            clip: ClipName::Typing,
            factor: 0.7,
            bone_markers: vec!["Spine".to_string(), "Neck".to_string()],
        }
    }
}

impl PostureCorrection {
    pub fn applies_to(&self, clip_name: &str) -> bool {
        clip_name == self.clip.as_str()
    }

    fn matches(&self, track_name: &str) -> bool {
        self.bone_markers.iter().any(|m| track_name.contains(m.as_str()))
    }
}

/// Multiply x, y, z of every key of matching quaternion tracks by `factor`; w is left as is
/// and the result is not renormalized here (sampling normalizes). Returns the number of
/// tracks touched; zero when the clip is not the corrected one.
pub fn apply_posture_correction(clip: &mut ClipData, correction: &PostureCorrection) -> usize {
    if !correction.applies_to(&clip.name) {
        return 0;
    }
    let mut touched = 0;
    for track in clip
        .tracks
        .iter_mut()
        .filter(|t| t.kind == TrackKind::Quaternion)
    {
        if !correction.matches(&track.name) {
            continue;
        }
        for key in track.values.chunks_exact_mut(4) {
            key[0] *= correction.factor;
            key[1] *= correction.factor;
            key[2] *= correction.factor;
        }
        touched += 1;
    }
    log::debug!(
        "posture correction x{} applied to {touched} track(s) of '{}'",
        correction.factor,
        clip.name
    );
    touched
}
