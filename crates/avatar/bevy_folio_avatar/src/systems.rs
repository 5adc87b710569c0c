use bevy::pbr::wireframe::Wireframe;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use folio_avatar_core::{model_path, BoneFrame, BoneMap, BonePose, BoneRole, FrameInputs, Outputs, RestPose};

use crate::components::{AvatarModel, AvatarRoot};
use crate::resources::{
    AvatarEventFired, AvatarPropsRes, AvatarResource, BoneIndex, FollowSettings, PendingOutputs,
};

fn forward_events(out: &Outputs, events: &mut EventWriter<AvatarEventFired>) {
    events.send_batch(out.events.iter().cloned().map(AvatarEventFired));
}

/// Cursor position in window pixels (origin top-left) → normalized coordinates in
/// [-1, 1] with y up.
pub fn normalized_pointer(cursor: Vec2, window_size: Vec2) -> Vec2 {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return Vec2::ZERO;
    }
    Vec2::new(
        cursor.x / window_size.x * 2.0 - 1.0,
        -(cursor.y / window_size.y * 2.0 - 1.0),
    )
}

/// Forward changed props to the avatar (domain gate, transition, wireframe).
pub fn sync_props(
    props: Res<AvatarPropsRes>,
    mut avatar: ResMut<AvatarResource>,
    mut pending: ResMut<PendingOutputs>,
    mut events: EventWriter<AvatarEventFired>,
) {
    if !props.is_changed() {
        return;
    }
    let out = avatar.0.set_props(&props.0);
    pending.stage(out);
    forward_events(out, &mut events);
}

/// Spawn the model for the selected domain under each root, replacing a model of another
/// dress. Nothing is spawned while no domain is selected.
pub fn spawn_domain_scene(
    mut commands: Commands,
    avatar: Res<AvatarResource>,
    asset_server: Option<Res<AssetServer>>,
    roots: Query<(Entity, Option<&Children>), With<AvatarRoot>>,
    models: Query<&AvatarModel>,
) {
    let Some(domain) = avatar.0.domain() else {
        return;
    };
    for (root, children) in roots.iter() {
        let mut present = false;
        for &child in children.into_iter().flat_map(|c| c.iter()) {
            match models.get(child) {
                Ok(model) if model.domain == domain => present = true,
                Ok(_) => commands.entity(child).despawn_recursive(),
                Err(_) => {}
            }
        }
        if present {
            continue;
        }

        let model = AvatarModel { domain };
        let path = model_path(Some(domain));
        let child = match asset_server.as_deref() {
            Some(server) => commands
                .spawn((
                    model,
                    SceneBundle {
                        scene: server.load(format!("{path}#Scene0")),
                        ..default()
                    },
                ))
                .id(),
            // headless: an empty model node keeps the hierarchy shape
            None => commands.spawn((model, SpatialBundle::default())).id(),
        };
        commands.entity(root).add_child(child);
        log::debug!("spawned {path} under avatar root {root:?}");
    }
}

/// Walk descendants of every root and (re)bind bones, meshes and the rest pose when the
/// set of nodes changed.
pub fn bind_bones(
    roots: Query<Entity, With<AvatarRoot>>,
    children: Query<&Children>,
    nodes: Query<(Option<&Name>, Option<&Transform>, Has<Handle<Mesh>>)>,
    mut index: ResMut<BoneIndex>,
    mut avatar: ResMut<AvatarResource>,
) {
    struct Found {
        name: String,
        entity: Entity,
        local: Option<Transform>,
        mesh: bool,
    }

    fn walk(
        e: Entity,
        found: &mut Vec<Found>,
        nodes: &Query<(Option<&Name>, Option<&Transform>, Has<Handle<Mesh>>)>,
        children: &Query<&Children>,
    ) {
        if let Ok((name, tf, mesh)) = nodes.get(e) {
            if name.is_some() || mesh {
                found.push(Found {
                    name: name
                        .map(|n| n.as_str().to_string())
                        .unwrap_or_else(|| format!("mesh-{}", e.index())),
                    entity: e,
                    local: tf.copied(),
                    mesh,
                });
            }
        }
        if let Ok(cs) = children.get(e) {
            for &c in cs.iter() {
                walk(c, found, nodes, children);
            }
        }
    }

    let mut found = Vec::new();
    for root in roots.iter() {
        walk(root, &mut found, &nodes, &children);
    }
    if found.len() == index.seen {
        return;
    }

    let cfg = avatar.0.config().clone();
    index.seen = found.len();
    index.nodes = found.iter().map(|f| (f.name.clone(), f.entity)).collect();
    index.meshes = found
        .iter()
        .filter(|f| f.mesh)
        .map(|f| (f.name.clone(), f.entity))
        .collect();
    index.roles = BoneMap::resolve(
        found.iter().map(|f| (f.name.as_str(), f.entity)),
        cfg.bone_name(BoneRole::Head),
        cfg.bone_name(BoneRole::Torso),
    );

    let rest: RestPose = found
        .iter()
        .filter_map(|f| {
            let t = f.local?;
            Some((
                f.name.clone(),
                BonePose {
                    rotation: Some(t.rotation.to_array()),
                    translation: Some(t.translation.to_array()),
                    scale: Some(t.scale.to_array()),
                },
            ))
        })
        .collect();

    let avatar = &mut avatar.0;
    avatar.bind_bones(found.iter().map(|f| f.name.as_str()));
    avatar.register_materials(index.meshes.keys().cloned());
    avatar.set_rest_pose(rest);
    log::debug!(
        "bound {} nodes ({} meshes) under avatar roots",
        index.nodes.len(),
        index.meshes.len()
    );
}

/// Build this frame's inputs from camera, cursor and bone placement and tick the avatar.
#[allow(clippy::too_many_arguments)]
pub fn tick_avatar(
    time: Res<Time>,
    follow: Res<FollowSettings>,
    index: Res<BoneIndex>,
    cameras: Query<&GlobalTransform, With<Camera3d>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    globals: Query<&GlobalTransform>,
    parents: Query<&Parent>,
    mut avatar: ResMut<AvatarResource>,
    mut pending: ResMut<PendingOutputs>,
    mut events: EventWriter<AvatarEventFired>,
) {
    let bone_frame = |role: BoneRole| -> Option<BoneFrame> {
        let entity = *index.roles.get(role)?;
        let world = globals.get(entity).ok()?;
        let parent_world_rotation = parents
            .get(entity)
            .ok()
            .and_then(|p| globals.get(p.get()).ok())
            .map(|g| g.compute_transform().rotation)
            .unwrap_or(Quat::IDENTITY);
        Some(BoneFrame {
            world_position: world.translation(),
            parent_world_rotation,
        })
    };

    let pointer = windows
        .get_single()
        .ok()
        .and_then(|w| {
            w.cursor_position()
                .map(|c| normalized_pointer(c, Vec2::new(w.width(), w.height())))
        })
        .unwrap_or(Vec2::ZERO);

    let frame = FrameInputs {
        follow: follow.0,
        camera_position: cameras
            .iter()
            .next()
            .map(GlobalTransform::translation)
            .unwrap_or(Vec3::ZERO),
        pointer,
        head: bone_frame(BoneRole::Head),
        torso: bone_frame(BoneRole::Torso),
    };

    let out = avatar.0.update(time.delta_seconds(), &frame);
    pending.stage(out);
    forward_events(out, &mut events);
}

/// Write staged bone values into `Transform`s.
pub fn apply_pose(
    index: Res<BoneIndex>,
    mut pending: ResMut<PendingOutputs>,
    mut transforms: Query<&mut Transform>,
) {
    for write in pending.writes.drain(..) {
        let Some(&entity) = index.nodes.get(&write.bone) else {
            continue;
        };
        let Ok(mut tf) = transforms.get_mut(entity) else {
            continue;
        };
        if let Some(r) = write.pose.rotation {
            tf.rotation = Quat::from_array(r).normalize();
        }
        if let Some(t) = write.pose.translation {
            tf.translation = Vec3::from_array(t);
        }
        if let Some(s) = write.pose.scale {
            tf.scale = Vec3::from_array(s);
        }
    }
}

/// Mirror the avatar's material wireframe flags onto mesh entities. Rendering the flag
/// needs `WireframePlugin` in the app.
pub fn apply_wireframe(
    mut commands: Commands,
    index: Res<BoneIndex>,
    mut pending: ResMut<PendingOutputs>,
) {
    for (name, on) in pending.material_updates.drain(..) {
        let Some(&entity) = index.meshes.get(&name) else {
            continue;
        };
        if on {
            commands.entity(entity).insert(Wireframe);
        } else {
            commands.entity(entity).remove::<Wireframe>();
        }
    }
}

/// Once the last root is gone, run the avatar's cleanup and forget the bindings.
pub fn unmount_on_root_removed(
    mut removed: RemovedComponents<AvatarRoot>,
    roots: Query<(), With<AvatarRoot>>,
    mut avatar: ResMut<AvatarResource>,
    mut index: ResMut<BoneIndex>,
    mut events: EventWriter<AvatarEventFired>,
) {
    if removed.read().count() == 0 || !roots.is_empty() {
        return;
    }
    let out = avatar.0.unmount();
    forward_events(out, &mut events);
    *index = BoneIndex::default();
}
