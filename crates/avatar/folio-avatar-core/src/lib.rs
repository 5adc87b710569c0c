//! Folio Avatar Core (engine-agnostic)
//!
//! Owns everything the portfolio avatar does that is not rendering: clip data and
//! the one-time posture correction, a small mixer with fades and cross-fades, the
//! domain-gated transition controller, clamped look-at for head and torso, and the
//! wireframe material set. Hosts (Bevy, wasm) feed props and per-frame inputs in and
//! apply the returned [`Outputs`].

pub mod accumulate;
pub mod assets;
pub mod avatar;
pub mod bones;
pub mod clip_json;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod look_at;
pub mod materials;
pub mod mixer;
pub mod outputs;
pub mod retarget;
pub mod sampling;

// Re-exports for consumers (adapters)
pub use accumulate::{Accumulator, BonePose, Pose, RestPose};
pub use assets::{clip_path, model_path, preload_manifest};
pub use avatar::Avatar;
pub use bones::{BoneMap, BoneRole};
pub use clip_json::parse_clip_json;
pub use config::Config;
pub use controller::{Advance, AnimationController, ControllerState, Transition};
pub use data::{ClipData, Track, TrackKind};
pub use error::ClipError;
pub use ids::{ActionId, ClipName, Domain};
pub use inputs::{AvatarProps, BoneFrame, FollowConfig, FrameInputs};
pub use look_at::{solve_look_at, LookAtLimits, LookAtSolution};
pub use materials::MaterialSet;
pub use mixer::{ClipLibrary, Mixer};
pub use outputs::{AvatarEvent, BoneWrite, Outputs};
pub use retarget::{apply_posture_correction, PostureCorrection};
