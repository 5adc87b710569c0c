//! The avatar: one character's clips, transitions, look-at and materials behind a
//! props-in / outputs-out surface.
//!
//! `set_props` runs the prop effects in a fixed order (domain gate, animation transition,
//! wireframe); `update` ticks the mixer and then layers the clamped look-at rotations on
//! top of the sampled pose.

use glam::Vec3;

use crate::accumulate::RestPose;
use crate::bones::{BoneMap, BoneRole};
use crate::clip_json::parse_clip_json;
use crate::config::Config;
use crate::controller::{Advance, AnimationController};
use crate::data::ClipData;
use crate::error::ClipError;
use crate::ids::{ClipName, Domain};
use crate::inputs::{AvatarProps, BoneFrame, FrameInputs};
use crate::look_at::{pointer_target, solve_look_at};
use crate::materials::MaterialSet;
use crate::mixer::{ClipLibrary, Mixer};
use crate::outputs::{AvatarEvent, BoneWrite, Outputs};

#[derive(Debug)]
pub struct Avatar {
    cfg: Config,
    controller: AnimationController,
    mixer: Mixer,
    materials: MaterialSet,
    bones: BoneMap<String>,
    outputs: Outputs,
    /// Events raised outside a props/update call, handed out with the next Outputs.
    queued: Vec<AvatarEvent>,
}

impl Avatar {
    pub fn new(cfg: Config) -> Self {
        let controller = AnimationController::new(cfg.fade_duration, cfg.default_animation.clone());
        let mixer = Mixer::new(ClipLibrary::new(cfg.posture.clone()));
        Self {
            cfg,
            controller,
            mixer,
            materials: MaterialSet::new(),
            bones: BoneMap::default(),
            outputs: Outputs::default(),
            queued: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Store a decoded clip under `name`. The posture correction is applied here, once.
    ///
    /// A request that was skipped because its clip had not arrived yet is retried here;
    /// the resulting `TransitionStarted` is reported with the next Outputs.
    pub fn load_clip(&mut self, name: ClipName, data: ClipData) -> Result<(), ClipError> {
        self.mixer.library_mut().insert(name, data)?;
        log::debug!("clip {name} loaded");
        if let Advance::Started(transition) = self.controller.advance(&mut self.mixer) {
            self.queued
                .push(AvatarEvent::TransitionStarted { transition });
        }
        Ok(())
    }

    pub fn load_clip_json(&mut self, name: ClipName, json: &str) -> Result<(), ClipError> {
        let data = parse_clip_json(json)?;
        self.load_clip(name, data)
    }

    /// Resolve the look-at bones from the model's node names.
    pub fn bind_bones<'a, I>(&mut self, node_names: I) -> &BoneMap<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.bones = BoneMap::resolve(
            node_names.into_iter().map(|n| (n, n.to_string())),
            &self.cfg.head_bone,
            &self.cfg.torso_bone,
        );
        &self.bones
    }

    pub fn bones(&self) -> &BoneMap<String> {
        &self.bones
    }

    pub fn register_materials<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.materials.register(names);
        log::debug!("{} materials registered", self.materials.len());
    }

    pub fn materials(&self) -> &MaterialSet {
        &self.materials
    }

    pub fn set_rest_pose(&mut self, rest: RestPose) {
        self.mixer.set_rest_pose(rest);
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    /// Apply props. Domain first, so a request arriving together with the first domain
    /// starts playing immediately.
    pub fn set_props(&mut self, props: &AvatarProps) -> &Outputs {
        self.begin_outputs();

        if let Some((domain, first)) = self.controller.set_domain(props.domain) {
            self.outputs
                .push_event(AvatarEvent::DomainSelected { domain, first });
        }

        self.controller.request(&props.animation);
        match self.controller.advance(&mut self.mixer) {
            Advance::Started(transition) => self
                .outputs
                .push_event(AvatarEvent::TransitionStarted { transition }),
            Advance::Skipped { requested } => self
                .outputs
                .push_event(AvatarEvent::TransitionSkipped { requested }),
            Advance::Gated | Advance::Unchanged => {}
        }

        if props.wireframe != self.materials.wireframe() {
            let materials = self.materials.set_wireframe(props.wireframe);
            self.outputs.push_event(AvatarEvent::WireframeChanged {
                wireframe: props.wireframe,
                materials,
            });
        }
        self.outputs.material_updates = self.materials.take_updates();

        &self.outputs
    }

    /// Advance by `dt` seconds and produce this frame's bone writes.
    pub fn update(&mut self, dt: f32, frame: &FrameInputs) -> &Outputs {
        self.begin_outputs();

        let pose = self.mixer.update(dt);
        let mut writes: Vec<BoneWrite> = pose
            .bones
            .into_iter()
            .map(|(bone, pose)| BoneWrite { bone, pose })
            .collect();
        writes.sort_by(|a, b| a.bone.cmp(&b.bone));
        self.outputs.writes = writes;

        // nothing is mounted before the gate opens
        if self.scene_visible() {
            if frame.follow.head_follow {
                self.apply_look_at(BoneRole::Head, frame.head.as_ref(), frame.camera_position);
            }
            if frame.follow.cursor_follow {
                let target =
                    pointer_target(frame.pointer, self.cfg.pointer_scale, self.cfg.pointer_depth);
                self.apply_look_at(BoneRole::Torso, frame.torso.as_ref(), target);
            }
        }

        self.outputs.material_updates = self.materials.take_updates();
        &self.outputs
    }

    fn begin_outputs(&mut self) {
        self.outputs.clear();
        self.outputs.events.append(&mut self.queued);
    }

    fn apply_look_at(&mut self, role: BoneRole, frame: Option<&BoneFrame>, target: Vec3) {
        let (Some(bone), Some(frame)) = (self.bones.get(role), frame) else {
            log::trace!("look-at for {role:?} skipped: bone not bound or not placed");
            self.outputs.push_event(AvatarEvent::LookAtSkipped { role });
            return;
        };
        let Some(solution) = solve_look_at(frame, target, &self.cfg.look_at) else {
            log::trace!("look-at for {role:?} skipped: target at bone origin");
            return;
        };
        let q = solution.rotation;
        let bone = bone.clone();
        self.outputs.write_mut(&bone).pose.rotation = Some([q.x, q.y, q.z, q.w]);
    }

    /// Cleanup: fade out whatever is playing.
    pub fn unmount(&mut self) -> &Outputs {
        self.begin_outputs();
        let faded_out = self.controller.unmount(&mut self.mixer);
        self.outputs
            .push_event(AvatarEvent::Unmounted { faded_out });
        &self.outputs
    }

    /// The model is shown only once a domain was selected.
    pub fn scene_visible(&self) -> bool {
        self.controller.is_gate_open()
    }

    pub fn domain(&self) -> Option<Domain> {
        self.controller.domain()
    }

    /// Model key of the selected domain.
    pub fn dress(&self) -> Option<&'static str> {
        self.domain().map(Domain::model_key)
    }

    pub fn current_clip(&self) -> Option<ClipName> {
        self.controller.current()
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }
}

impl Default for Avatar {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
