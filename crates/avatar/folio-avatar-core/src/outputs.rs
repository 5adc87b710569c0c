//! Output contracts from the avatar.
//!
//! Outputs carry the bone transforms to write this frame, the materials whose wireframe
//! flag must be re-uploaded, and a list of semantic events. Hosts (Bevy/wasm) apply the
//! writes and may forward the events.

use serde::{Deserialize, Serialize};

use crate::accumulate::BonePose;
use crate::bones::BoneRole;
use crate::controller::Transition;
use crate::ids::{ClipName, Domain};

/// Local transform values for one bone, keyed by node name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoneWrite {
    pub bone: String,
    #[serde(flatten)]
    pub pose: BonePose,
}

/// Discrete signals emitted by `set_props`, `update` and `unmount`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
#[non_exhaustive]
pub enum AvatarEvent {
    /// The gate opened (first domain) or the dress changed.
    DomainSelected { domain: Domain, first: bool },
    TransitionStarted { transition: Transition },
    /// A request that did not start a transition because the name is not a loaded clip.
    TransitionSkipped { requested: String },
    WireframeChanged { wireframe: bool, materials: usize },
    /// A look-at role was enabled but its bone is not bound or not placed this frame.
    LookAtSkipped { role: BoneRole },
    Unmounted { faded_out: Option<ClipName> },
}

/// Outputs returned by `Avatar::set_props`, `Avatar::update` and `Avatar::unmount`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub writes: Vec<BoneWrite>,
    /// (material name, wireframe) pairs that need re-upload.
    #[serde(default)]
    pub material_updates: Vec<(String, bool)>,
    #[serde(default)]
    pub events: Vec<AvatarEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.writes.clear();
        self.material_updates.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_event(&mut self, event: AvatarEvent) {
        self.events.push(event);
    }

    /// Write for `bone`, if any.
    pub fn write(&self, bone: &str) -> Option<&BoneWrite> {
        self.writes.iter().find(|w| w.bone == bone)
    }

    /// Mutable access to the write for `bone`, creating an empty one when absent.
    pub(crate) fn write_mut(&mut self, bone: &str) -> &mut BoneWrite {
        let idx = match self.writes.iter().position(|w| w.bone == bone) {
            Some(idx) => idx,
            None => {
                self.writes.push(BoneWrite {
                    bone: bone.to_string(),
                    pose: BonePose::default(),
                });
                self.writes.len() - 1
            }
        };
        &mut self.writes[idx]
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.material_updates.is_empty() && self.events.is_empty()
    }
}
