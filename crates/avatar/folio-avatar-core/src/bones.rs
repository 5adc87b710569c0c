//! Bone roles resolved once at load time.
//!
//! Hosts hand over every node of the model as `(name, handle)`; the roles the avatar
//! cares about are picked out once and looked up by role afterwards. A role whose node is
//! missing from a model variant simply stays unresolved.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum BoneRole {
    /// Turns toward the camera.
    Head,
    /// Turns toward the pointer.
    Torso,
}

impl BoneRole {
    pub const ALL: [BoneRole; 2] = [BoneRole::Head, BoneRole::Torso];

    pub fn default_node_name(self) -> &'static str {
        match self {
            BoneRole::Head => "Wolf3D_Head",
            BoneRole::Torso => "Spine2",
        }
    }
}

/// Role → host handle (entity, node index, ...).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoneMap<H> {
    head: Option<H>,
    torso: Option<H>,
}

impl<H> Default for BoneMap<H> {
    fn default() -> Self {
        Self {
            head: None,
            torso: None,
        }
    }
}

impl<H> BoneMap<H> {
    /// Pick role nodes out of `nodes` by exact name. The first match wins.
    pub fn resolve<'a, I>(nodes: I, head_name: &str, torso_name: &str) -> Self
    where
        I: IntoIterator<Item = (&'a str, H)>,
    {
        let mut map = Self::default();
        for (name, handle) in nodes {
            if map.head.is_none() && name == head_name {
                map.head = Some(handle);
            } else if map.torso.is_none() && name == torso_name {
                map.torso = Some(handle);
            }
        }
        for role in BoneRole::ALL {
            if map.get(role).is_none() {
                log::debug!("bone role {role:?} not found in model; look-at disabled for it");
            }
        }
        map
    }

    pub fn get(&self, role: BoneRole) -> Option<&H> {
        match role {
            BoneRole::Head => self.head.as_ref(),
            BoneRole::Torso => self.torso.as_ref(),
        }
    }

    pub fn is_resolved(&self, role: BoneRole) -> bool {
        self.get(role).is_some()
    }
}
