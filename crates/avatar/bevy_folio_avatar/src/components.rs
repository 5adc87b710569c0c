use bevy::prelude::*;
use folio_avatar_core::Domain;

/// Marker for the entity the avatar model is spawned under. Bone binding walks the
/// descendants of every entity carrying it.
#[derive(Component, Debug, Default)]
pub struct AvatarRoot;

/// The spawned model (one per root), tagged with the dress it shows.
#[derive(Component, Debug, Clone, Copy)]
pub struct AvatarModel {
    pub domain: Domain,
}
