//! Clip data model: named keyframe tracks per bone channel.

use serde::{Deserialize, Serialize};

use crate::error::ClipError;

/// Value layout of a track.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    /// (x, y, z, w) per key.
    Quaternion,
    /// (x, y, z) per key; positions and scales.
    Vector,
    Number,
}

impl TrackKind {
    #[inline]
    pub fn stride(self) -> usize {
        match self {
            TrackKind::Quaternion => 4,
            TrackKind::Vector => 3,
            TrackKind::Number => 1,
        }
    }
}

/// A keyframe curve for one bone channel, e.g. `Spine.quaternion`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Track {
    pub name: String,
    pub kind: TrackKind,
    /// Key times in seconds, non-decreasing.
    pub times: Vec<f32>,
    /// Flat values, `times.len() * kind.stride()` long.
    pub values: Vec<f32>,
}

impl Track {
    /// Bone (node) part of the track name.
    pub fn bone(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((bone, _)) => bone,
            None => &self.name,
        }
    }

    /// Property part of the track name (`quaternion`, `position`, `scale`, ...).
    pub fn property(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((_, prop)) => prop,
            None => "",
        }
    }

    #[inline]
    pub fn key_count(&self) -> usize {
        self.times.len()
    }

    /// Values of key `i`.
    #[inline]
    pub fn key(&self, i: usize) -> &[f32] {
        let s = self.kind.stride();
        &self.values[i * s..(i + 1) * s]
    }

    pub fn last_time(&self) -> f32 {
        self.times.last().copied().unwrap_or(0.0)
    }

    fn validate(&self) -> Result<(), ClipError> {
        let stride = self.kind.stride();
        if self.values.len() != self.times.len() * stride {
            return Err(ClipError::ValueCount {
                track: self.name.clone(),
                keys: self.times.len(),
                values: self.values.len(),
                stride,
            });
        }
        let mut last = f32::NEG_INFINITY;
        for t in &self.times {
            if !t.is_finite() || *t < last {
                return Err(ClipError::KeyTimes(self.name.clone()));
            }
            last = *t;
        }
        Ok(())
    }
}

/// A named, time-indexed set of per-bone curves.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ClipData {
    pub name: String,
    /// Seconds.
    pub duration: f32,
    pub tracks: Vec<Track>,
}

impl ClipData {
    pub fn validate(&self) -> Result<(), ClipError> {
        if !self.duration.is_finite() || self.duration < 0.0 {
            return Err(ClipError::Duration(self.name.clone()));
        }
        for track in &self.tracks {
            track.validate()?;
        }
        Ok(())
    }

    /// Duration implied by the keys (used when the source omits it).
    pub fn keyed_duration(&self) -> f32 {
        self.tracks
            .iter()
            .map(Track::last_time)
            .fold(0.0f32, f32::max)
    }

    pub fn track(&self, name: &str) -> Option<&Track> {
        self.tracks.iter().find(|t| t.name == name)
    }
}
