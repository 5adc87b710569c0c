//! Bevy host for the Folio avatar.
//!
//! Add [`FolioAvatarPlugin`], spawn an entity with [`AvatarRoot`], load clips into
//! [`AvatarResource`] and drive it through [`AvatarPropsRes`] and [`FollowSettings`].

use bevy::prelude::*;
use folio_avatar_core::{Avatar, Config};

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{AvatarModel, AvatarRoot};
pub use resources::{
    AvatarEventFired, AvatarPropsRes, AvatarResource, BoneIndex, FollowSettings, PendingOutputs,
};

#[derive(Default)]
pub struct FolioAvatarPlugin {
    pub config: Config,
}

impl Plugin for FolioAvatarPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AvatarResource(Avatar::new(self.config.clone())))
            .init_resource::<AvatarPropsRes>()
            .init_resource::<FollowSettings>()
            .init_resource::<BoneIndex>()
            .init_resource::<PendingOutputs>()
            .add_event::<AvatarEventFired>()
            .add_systems(
                Update,
                (
                    systems::sync_props,
                    systems::spawn_domain_scene,
                    systems::bind_bones,
                    systems::tick_avatar,
                    systems::apply_pose,
                    systems::apply_wireframe,
                    systems::unmount_on_root_removed,
                )
                    .chain(),
            );
    }
}
