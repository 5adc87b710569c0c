use bevy::prelude::*;
use folio_avatar_core::{
    Avatar, AvatarEvent, AvatarProps, BoneMap, BoneWrite, FollowConfig, Outputs,
};
use hashbrown::HashMap;

#[derive(Resource)]
pub struct AvatarResource(pub Avatar);

/// Props as set by the app. Changes are forwarded to the avatar once per frame.
#[derive(Resource, Default, Clone, Debug)]
pub struct AvatarPropsRes(pub AvatarProps);

/// Which look-at behaviours run; read every frame.
#[derive(Resource, Default, Clone, Copy, Debug)]
pub struct FollowSettings(pub FollowConfig);

/// Node name → entity under the avatar root, plus the resolved look-at roles.
/// Rebuilt whenever the number of named descendants changes (scene finished spawning,
/// dress swapped).
#[derive(Resource, Default)]
pub struct BoneIndex {
    pub nodes: HashMap<String, Entity>,
    /// Mesh entities by name; their wireframe flag follows the avatar's material set.
    pub meshes: HashMap<String, Entity>,
    pub roles: BoneMap<Entity>,
    pub(crate) seen: usize,
}

/// Outputs staged between compute and apply systems (Compute -> Apply).
#[derive(Resource, Default)]
pub struct PendingOutputs {
    pub writes: Vec<BoneWrite>,
    pub material_updates: Vec<(String, bool)>,
}

impl PendingOutputs {
    pub(crate) fn stage(&mut self, out: &Outputs) {
        self.writes.extend(out.writes.iter().cloned());
        self.material_updates
            .extend(out.material_updates.iter().cloned());
    }
}

/// Avatar events re-emitted into the ECS.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AvatarEventFired(pub AvatarEvent);
