//! Interpolation helpers shared by sampling and blending.

pub mod functions;

pub use functions::{lerp_f32, lerp_vec3, normalize_quat, slerp_quat};
