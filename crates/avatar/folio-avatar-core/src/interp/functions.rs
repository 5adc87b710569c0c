//! Keyframe blending between two neighbouring samples.
//!
//! Vectors and scalars lerp per component; quaternions slerp along the short arc,
//! which is what the exported clips were authored against.

use glam::Quat;

#[inline]
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: [f32; 3], b: [f32; 3], t: f32) -> [f32; 3] {
    std::array::from_fn(|i| lerp_f32(a[i], b[i], t))
}

#[inline]
pub(crate) fn dot4(a: [f32; 4], b: [f32; 4]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

/// Unit-length copy of (x, y, z, w). Degenerate input becomes identity.
#[inline]
pub fn normalize_quat(q: [f32; 4]) -> [f32; 4] {
    let len2 = dot4(q, q);
    if len2 <= f32::EPSILON || !len2.is_finite() {
        return [0.0, 0.0, 0.0, 1.0];
    }
    let inv = len2.sqrt().recip();
    q.map(|c| c * inv)
}

/// Spherical interpolation of two (x, y, z, w) rotations.
#[inline]
pub fn slerp_quat(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let qa = Quat::from_array(normalize_quat(a));
    let qb = Quat::from_array(normalize_quat(b));
    normalize_quat(qa.slerp(qb, t).to_array())
}
