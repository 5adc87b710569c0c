use serde::Deserialize;

use crate::data::{ClipData, Track, TrackKind};
use crate::error::ClipError;

/// Public API: parse a clip serialized the way three.js `AnimationClip.toJSON()` writes
/// it into the canonical [`ClipData`].
///
/// Notes:
/// - `duration` of `-1` (or missing) is recomputed from the last key time.
/// - Track types other than quaternion/vector/number (bool, string, color) are dropped;
///   the avatar only blends transforms.
/// - Extra fields (`uuid`, `blendMode`, per-track `interpolation`) are ignored.
pub fn parse_clip_json(s: &str) -> Result<ClipData, ClipError> {
    let raw: RawClip = serde_json::from_str(s)?;
    clip_from_raw(raw)
}

/// Same as [`parse_clip_json`] for an already parsed JSON value.
pub fn clip_from_json_value(v: serde_json::Value) -> Result<ClipData, ClipError> {
    let raw: RawClip = serde_json::from_value(v)?;
    clip_from_raw(raw)
}

fn clip_from_raw(raw: RawClip) -> Result<ClipData, ClipError> {
    let mut tracks = Vec::with_capacity(raw.tracks.len());
    for rt in raw.tracks {
        let kind = match rt.kind.as_str() {
            "quaternion" => TrackKind::Quaternion,
            "vector" => TrackKind::Vector,
            "number" => TrackKind::Number,
            other => {
                log::debug!("dropping track '{}' of unsupported type '{other}'", rt.name);
                continue;
            }
        };
        let values = match rt.values {
            RawValues::Numbers(v) => v,
            RawValues::Other(_) => return Err(ClipError::NonNumeric(rt.name)),
        };
        tracks.push(Track {
            name: rt.name,
            kind,
            times: rt.times,
            values,
        });
    }

    let mut data = ClipData {
        name: raw.name,
        duration: raw.duration.unwrap_or(-1.0),
        tracks,
    };
    if data.duration < 0.0 {
        data.duration = data.keyed_duration();
    }
    data.validate()?;
    Ok(data)
}

// ----- JSON schema (serde) -----

#[derive(Debug, Deserialize)]
struct RawClip {
    pub name: String,
    #[serde(default)]
    pub duration: Option<f32>,
    pub tracks: Vec<RawTrack>,
}

#[derive(Debug, Deserialize)]
struct RawTrack {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub times: Vec<f32>,
    pub values: RawValues,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawValues {
    Numbers(Vec<f32>),
    // bool/string tracks; only acceptable for dropped track types
    Other(serde::de::IgnoredAny),
}
