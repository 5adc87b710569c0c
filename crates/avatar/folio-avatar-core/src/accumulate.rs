//! Accumulation of per-channel contributions across actions and blending into a Pose.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::interp::functions::{dot4, normalize_quat};
use crate::sampling::Sample;

const IDENTITY_ROTATION: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

/// Final local transform values for one bone. Channels no action drives stay `None`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BonePose {
    pub rotation: Option<[f32; 4]>,
    pub translation: Option<[f32; 3]>,
    pub scale: Option<[f32; 3]>,
}

/// Blended output of one mixer tick, keyed by bone (node) name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Pose {
    pub bones: HashMap<String, BonePose>,
    /// Non-transform number tracks keyed by full track name.
    pub scalars: HashMap<String, f32>,
}

impl Pose {
    pub fn bone(&self, name: &str) -> Option<&BonePose> {
        self.bones.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty() && self.scalars.is_empty()
    }
}

/// Bind-pose values the mixer falls back to while total weight is below one
/// (fade-in from nothing, fade-out to nothing).
pub type RestPose = HashMap<String, BonePose>;

/// Which field of a bone a track drives, from the track's property name.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
enum Channel {
    Rotation,
    Translation,
    Scale,
    Scalar,
}

impl Channel {
    fn from_property(prop: &str) -> Self {
        match prop {
            "quaternion" | "rotation" => Channel::Rotation,
            "position" | "translation" => Channel::Translation,
            "scale" => Channel::Scale,
            _ => Channel::Scalar,
        }
    }
}

/// Weighted sums per channel kind. Quaternions are sign-aligned with the first
/// contribution and normalized at finalize.
#[derive(Clone, Debug)]
enum AccumEntry {
    Quat { sum: [f32; 4], w: f32 },
    Vec3 { sum: [f32; 3], w: f32 },
    Scalar { sum: f32, w: f32 },
}

impl AccumEntry {
    fn from_sample(s: &Sample, w: f32) -> Self {
        match *s {
            Sample::Quat(q) => AccumEntry::Quat {
                sum: [q[0] * w, q[1] * w, q[2] * w, q[3] * w],
                w,
            },
            Sample::Vec3(v) => AccumEntry::Vec3 {
                sum: [v[0] * w, v[1] * w, v[2] * w],
                w,
            },
            Sample::Number(x) => AccumEntry::Scalar { sum: x * w, w },
        }
    }

    fn add(&mut self, s: &Sample, w: f32) {
        match (self, s) {
            (AccumEntry::Quat { sum, w: ww }, Sample::Quat(q)) => {
                let sign = if dot4(*sum, *q) < 0.0 { -1.0 } else { 1.0 };
                for i in 0..4 {
                    sum[i] += q[i] * w * sign;
                }
                *ww += w;
            }
            (AccumEntry::Vec3 { sum, w: ww }, Sample::Vec3(v)) => {
                for i in 0..3 {
                    sum[i] += v[i] * w;
                }
                *ww += w;
            }
            (AccumEntry::Scalar { sum, w: ww }, Sample::Number(x)) => {
                *sum += x * w;
                *ww += w;
            }
            _ => {
                // Mismatched kind for the same track name; keep the first kind.
            }
        }
    }

    fn weight(&self) -> f32 {
        match self {
            AccumEntry::Quat { w, .. } | AccumEntry::Vec3 { w, .. } | AccumEntry::Scalar { w, .. } => *w,
        }
    }
}

/// Accumulates per-track contributions across actions.
#[derive(Default)]
pub struct Accumulator {
    map: HashMap<(String, String), (Channel, AccumEntry)>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one weighted sample for `bone`.`property`. Non-positive weights are ignored.
    pub fn add(&mut self, bone: &str, property: &str, sample: &Sample, weight: f32) {
        if weight <= 0.0 {
            return;
        }
        self.map
            .entry((bone.to_string(), property.to_string()))
            .and_modify(|(_, entry)| entry.add(sample, weight))
            .or_insert_with(|| {
                (
                    Channel::from_property(property),
                    AccumEntry::from_sample(sample, weight),
                )
            });
    }

    /// Resolve sums into a Pose. While a channel's total weight is below one the
    /// remaining weight goes to the rest value, or to the identity transform when the
    /// rest pose does not carry that channel, so a clip fading in starts from rest.
    pub fn finalize(self, rest: Option<&RestPose>) -> Pose {
        let mut pose = Pose::default();
        for ((bone, property), (channel, mut entry)) in self.map.into_iter() {
            let w = entry.weight();
            if w < 1.0 {
                let rest_bone = rest.and_then(|r| r.get(&bone));
                let remaining = 1.0 - w;
                let fill = match channel {
                    Channel::Rotation => Some(Sample::Quat(
                        rest_bone
                            .and_then(|b| b.rotation)
                            .unwrap_or(IDENTITY_ROTATION),
                    )),
                    Channel::Translation => Some(Sample::Vec3(
                        rest_bone.and_then(|b| b.translation).unwrap_or([0.0; 3]),
                    )),
                    Channel::Scale => Some(Sample::Vec3(
                        rest_bone.and_then(|b| b.scale).unwrap_or([1.0; 3]),
                    )),
                    // number tracks have no rest value and keep their weighted average
                    Channel::Scalar => None,
                };
                if let Some(fill) = fill {
                    entry.add(&fill, remaining);
                }
            }

            match (channel, entry) {
                (Channel::Scalar, AccumEntry::Scalar { sum, w }) => {
                    pose.scalars.insert(format!("{bone}.{property}"), sum / w);
                }
                (Channel::Rotation, AccumEntry::Quat { sum, w }) => {
                    let q = normalize_quat([sum[0] / w, sum[1] / w, sum[2] / w, sum[3] / w]);
                    pose.bones.entry(bone).or_default().rotation = Some(q);
                }
                (Channel::Translation, AccumEntry::Vec3 { sum, w }) => {
                    pose.bones.entry(bone).or_default().translation =
                        Some([sum[0] / w, sum[1] / w, sum[2] / w]);
                }
                (Channel::Scale, AccumEntry::Vec3 { sum, w }) => {
                    pose.bones.entry(bone).or_default().scale =
                        Some([sum[0] / w, sum[1] / w, sum[2] / w]);
                }
                _ => {
                    // property name and value layout disagree (e.g. a number track named
                    // "position"); such tracks are dropped
                }
            }
        }
        pose
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_weight_blends_toward_rest() {
        let mut rest = RestPose::new();
        rest.insert(
            "Hips".into(),
            BonePose {
                translation: Some([0.0, 0.0, 0.0]),
                ..Default::default()
            },
        );
        let mut acc = Accumulator::new();
        acc.add("Hips", "position", &Sample::Vec3([2.0, 0.0, 0.0]), 0.25);
        let pose = acc.finalize(Some(&rest));
        assert_eq!(pose.bone("Hips").unwrap().translation, Some([0.5, 0.0, 0.0]));
    }

    #[test]
    fn without_rest_partial_weight_blends_toward_identity() {
        let mut acc = Accumulator::new();
        acc.add("Hips", "position", &Sample::Vec3([2.0, 0.0, 0.0]), 0.25);
        acc.add("Hips", "scale", &Sample::Vec3([3.0, 3.0, 3.0]), 0.5);
        let half_turn = glam::Quat::from_rotation_y(1.0).to_array();
        acc.add("Spine", "quaternion", &Sample::Quat(half_turn), 0.5);
        let pose = acc.finalize(None);

        let hips = pose.bone("Hips").unwrap();
        assert_eq!(hips.translation, Some([0.5, 0.0, 0.0]));
        assert_eq!(hips.scale, Some([2.0, 2.0, 2.0]));
        let q = glam::Quat::from_array(pose.bone("Spine").unwrap().rotation.unwrap());
        let (_, angle) = q.to_axis_angle();
        assert!((angle - 0.5).abs() < 1e-3, "angle {angle}");
    }

    #[test]
    fn opposite_sign_quats_do_not_cancel() {
        let mut acc = Accumulator::new();
        acc.add("Spine", "quaternion", &Sample::Quat([0.0, 0.0, 0.0, 1.0]), 0.5);
        acc.add("Spine", "quaternion", &Sample::Quat([0.0, 0.0, 0.0, -1.0]), 0.5);
        let q = acc.finalize(None).bone("Spine").unwrap().rotation.unwrap();
        assert!((q[3].abs() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn zero_weight_is_ignored() {
        let mut acc = Accumulator::new();
        acc.add("Spine", "quaternion", &Sample::Quat([0.0, 0.0, 0.0, 1.0]), 0.0);
        assert!(acc.finalize(None).is_empty());
    }
}
