//! Track sampling at clip-local time.
//!
//! Model:
//! - Keys are (time, value) with non-decreasing times in seconds.
//! - Before the first key the first value holds; after the last key the last value holds.
//! - Vectors and numbers interpolate linearly; quaternions slerp along the short arc and
//!   always come out normalized, which also absorbs posture-corrected (non-unit) keys.

use crate::data::{Track, TrackKind};
use crate::interp::functions::{lerp_f32, lerp_vec3, normalize_quat, slerp_quat};

/// One sampled channel value.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Sample {
    Quat([f32; 4]),
    Vec3([f32; 3]),
    Number(f32),
}

/// Find the segment [i, i+1] containing `t`, returning (i, i+1, local_t).
/// Edge cases return (k, k, 0.0) and callers read key k.
fn find_segment(times: &[f32], t: f32) -> (usize, usize, f32) {
    let n = times.len();
    if n <= 1 || t <= times[0] {
        return (0, 0, 0.0);
    }
    if t >= times[n - 1] {
        return (n - 1, n - 1, 0.0);
    }
    // first index with time > t; guaranteed in 1..n by the checks above
    let hi = times.partition_point(|&k| k <= t);
    let lo = hi - 1;
    let denom = (times[hi] - times[lo]).max(f32::EPSILON);
    (lo, hi, ((t - times[lo]) / denom).clamp(0.0, 1.0))
}

fn read(track: &Track, i: usize) -> Sample {
    let k = track.key(i);
    match track.kind {
        TrackKind::Quaternion => Sample::Quat(normalize_quat([k[0], k[1], k[2], k[3]])),
        TrackKind::Vector => Sample::Vec3([k[0], k[1], k[2]]),
        TrackKind::Number => Sample::Number(k[0]),
    }
}

/// Sample a single track at clip-local time `t` (seconds). Empty tracks yield `None`.
pub fn sample_track(track: &Track, t: f32) -> Option<Sample> {
    if track.key_count() == 0 {
        return None;
    }
    let (i0, i1, lt) = find_segment(&track.times, t);
    if i0 == i1 {
        return Some(read(track, i0));
    }
    let out = match (read(track, i0), read(track, i1)) {
        (Sample::Quat(a), Sample::Quat(b)) => Sample::Quat(slerp_quat(a, b, lt)),
        (Sample::Vec3(a), Sample::Vec3(b)) => Sample::Vec3(lerp_vec3(a, b, lt)),
        (Sample::Number(a), Sample::Number(b)) => Sample::Number(lerp_f32(a, b, lt)),
        // both keys come from the same track, so kinds always agree
        (left, _) => left,
    };
    Some(out)
}
