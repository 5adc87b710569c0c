//! Mixer: clip library ownership, per-clip actions with weight fades and time-scale
//! warps, and the per-tick sample → accumulate → blend pass.
//!
//! Actions follow the usual mixer contract:
//! - `fade_in(d)` ramps the effective weight 0 → 1 over `d` seconds of mixer time.
//! - `fade_out(d)` ramps 1 → 0 and disables the action when it lands on zero.
//! - `cross_fade(from, to, d, warp)` does both at once; with `warp` the time scales
//!   ramp so the outgoing and incoming cycle lengths meet at the end of the fade.
//! - `reset()` re-enables, rewinds and cancels any fade or warp in flight.

use hashbrown::HashMap;

use crate::accumulate::{Accumulator, Pose, RestPose};
use crate::data::ClipData;
use crate::error::ClipError;
use crate::ids::{ActionId, ClipName, IdAllocator};
use crate::interp::functions::lerp_f32;
use crate::retarget::{apply_posture_correction, PostureCorrection};
use crate::sampling::sample_track;

/// Loaded clips keyed by name. Each clip is corrected once on insert and never mutated
/// afterwards.
#[derive(Debug, Default)]
pub struct ClipLibrary {
    clips: HashMap<ClipName, ClipData>,
    correction: PostureCorrection,
}

impl ClipLibrary {
    pub fn new(correction: PostureCorrection) -> Self {
        Self {
            clips: HashMap::new(),
            correction,
        }
    }

    /// Store `data` under `name` (the clip is renamed to it), applying the posture
    /// correction when `name` is the corrected clip. A second load of the same name is
    /// rejected so the correction can never be applied twice.
    pub fn insert(&mut self, name: ClipName, mut data: ClipData) -> Result<(), ClipError> {
        if self.clips.contains_key(&name) {
            return Err(ClipError::AlreadyLoaded(name.as_str().to_string()));
        }
        data.validate()?;
        data.name = name.as_str().to_string();
        apply_posture_correction(&mut data, &self.correction);
        self.clips.insert(name, data);
        Ok(())
    }

    pub fn get(&self, name: ClipName) -> Option<&ClipData> {
        self.clips.get(&name)
    }

    pub fn contains(&self, name: ClipName) -> bool {
        self.clips.contains_key(&name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }
}

/// Linear ramp over mixer time.
#[derive(Copy, Clone, Debug, PartialEq)]
struct Interpolant {
    start: f64,
    duration: f32,
    from: f32,
    to: f32,
}

impl Interpolant {
    /// (value, finished)
    fn eval(&self, now: f64) -> (f32, bool) {
        if self.duration <= 0.0 {
            return (self.to, true);
        }
        let u = ((now - self.start) / f64::from(self.duration)) as f32;
        if u >= 1.0 {
            (self.to, true)
        } else {
            (lerp_f32(self.from, self.to, u.max(0.0)), false)
        }
    }
}

/// Playback state of one clip.
#[derive(Debug)]
pub struct Action {
    pub id: ActionId,
    pub clip: ClipName,
    /// Clip-local time in seconds.
    pub time: f32,
    pub time_scale: f32,
    pub weight: f32,
    pub enabled: bool,
    running: bool,
    fade: Option<Interpolant>,
    warp: Option<Interpolant>,
    effective_weight: f32,
    effective_time_scale: f32,
}

impl Action {
    fn new(id: ActionId, clip: ClipName) -> Self {
        Self {
            id,
            clip,
            time: 0.0,
            time_scale: 1.0,
            weight: 1.0,
            enabled: true,
            running: false,
            fade: None,
            warp: None,
            effective_weight: 1.0,
            effective_time_scale: 1.0,
        }
    }

    fn reset(&mut self) {
        self.enabled = true;
        self.time = 0.0;
        self.fade = None;
        self.warp = None;
    }

    fn schedule_fade(&mut self, now: f64, duration: f32, from: f32, to: f32) {
        self.fade = Some(Interpolant {
            start: now,
            duration,
            from,
            to,
        });
    }

    fn schedule_warp(&mut self, now: f64, duration: f32, from: f32, to: f32) {
        let base = if self.time_scale != 0.0 {
            self.time_scale
        } else {
            1.0
        };
        self.warp = Some(Interpolant {
            start: now,
            duration,
            from: from / base,
            to: to / base,
        });
    }

    fn update_weight(&mut self, now: f64) -> f32 {
        let mut weight = 0.0;
        if self.enabled {
            weight = self.weight;
            if let Some(fade) = self.fade {
                let (v, done) = fade.eval(now);
                weight *= v;
                if done {
                    self.fade = None;
                    if v == 0.0 {
                        self.enabled = false;
                    }
                }
            }
        }
        self.effective_weight = weight;
        weight
    }

    fn update_time_scale(&mut self, now: f64) -> f32 {
        let mut ts = self.time_scale;
        if let Some(warp) = self.warp {
            let (v, done) = warp.eval(now);
            ts *= v;
            if done {
                self.warp = None;
                self.time_scale = ts;
            }
        }
        self.effective_time_scale = ts;
        ts
    }

    fn advance(&mut self, dt: f32, duration: f32) {
        if duration > 0.0 {
            self.time = (self.time + dt).rem_euclid(duration);
        } else {
            self.time = 0.0;
        }
    }
}

/// Owns the clip library and one action per clip; produces a blended Pose per tick.
#[derive(Debug)]
pub struct Mixer {
    /// Seconds since creation. Kept in f64 so fade timing holds over long sessions.
    time: f64,
    ids: IdAllocator,
    library: ClipLibrary,
    actions: Vec<Action>,
    rest: Option<RestPose>,
}

impl Mixer {
    pub fn new(library: ClipLibrary) -> Self {
        Self {
            time: 0.0,
            ids: IdAllocator::new(),
            library,
            actions: Vec::new(),
            rest: None,
        }
    }

    pub fn library(&self) -> &ClipLibrary {
        &self.library
    }

    pub fn library_mut(&mut self) -> &mut ClipLibrary {
        &mut self.library
    }

    /// Bind-pose values used to fill missing weight.
    pub fn set_rest_pose(&mut self, rest: RestPose) {
        self.rest = Some(rest);
    }

    /// Mixer clock in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn has_clip(&self, clip: ClipName) -> bool {
        self.library.contains(clip)
    }

    /// Existing action for `clip`, created on first use. `None` when the clip is not loaded.
    fn action_mut(&mut self, clip: ClipName) -> Option<&mut Action> {
        if !self.library.contains(clip) {
            return None;
        }
        let idx = match self.actions.iter().position(|a| a.clip == clip) {
            Some(idx) => idx,
            None => {
                let id = self.ids.alloc_action();
                self.actions.push(Action::new(id, clip));
                self.actions.len() - 1
            }
        };
        self.actions.get_mut(idx)
    }

    pub fn action(&self, clip: ClipName) -> Option<&Action> {
        self.actions.iter().find(|a| a.clip == clip)
    }

    pub fn play(&mut self, clip: ClipName) {
        if let Some(a) = self.action_mut(clip) {
            a.running = true;
        }
    }

    pub fn stop(&mut self, clip: ClipName) {
        if let Some(a) = self.action_mut(clip) {
            a.running = false;
            a.reset();
        }
    }

    pub fn reset(&mut self, clip: ClipName) {
        if let Some(a) = self.action_mut(clip) {
            a.reset();
        }
    }

    pub fn fade_in(&mut self, clip: ClipName, duration: f32) {
        let now = self.time;
        if let Some(a) = self.action_mut(clip) {
            a.schedule_fade(now, duration, 0.0, 1.0);
        }
    }

    pub fn fade_out(&mut self, clip: ClipName, duration: f32) {
        let now = self.time;
        if let Some(a) = self.action_mut(clip) {
            a.schedule_fade(now, duration, 1.0, 0.0);
        }
    }

    /// Set the base weight and cancel any fade.
    pub fn set_effective_weight(&mut self, clip: ClipName, weight: f32) {
        if let Some(a) = self.action_mut(clip) {
            a.weight = weight;
            a.effective_weight = if a.enabled { weight } else { 0.0 };
            a.fade = None;
        }
    }

    /// Set the base time scale and cancel any warp.
    pub fn set_effective_time_scale(&mut self, clip: ClipName, time_scale: f32) {
        if let Some(a) = self.action_mut(clip) {
            a.time_scale = time_scale;
            a.effective_time_scale = time_scale;
            a.warp = None;
        }
    }

    /// Fade `from` out and `to` in over the same duration. With `warp`, the outgoing
    /// clip's speed ramps toward the incoming clip's cycle length and vice versa.
    pub fn cross_fade(&mut self, from: ClipName, to: ClipName, duration: f32, warp: bool) {
        self.fade_out(from, duration);
        self.fade_in(to, duration);
        if !warp {
            return;
        }
        let (Some(out_clip), Some(in_clip)) = (self.library.get(from), self.library.get(to))
        else {
            return;
        };
        let (out_len, in_len) = (out_clip.duration, in_clip.duration);
        if out_len <= 0.0 || in_len <= 0.0 {
            return;
        }
        let start_end = out_len / in_len;
        let end_start = in_len / out_len;
        let now = self.time;
        if let Some(a) = self.action_mut(from) {
            a.schedule_warp(now, duration, 1.0, start_end);
        }
        if let Some(a) = self.action_mut(to) {
            a.schedule_warp(now, duration, end_start, 1.0);
        }
    }

    /// Current blend weight of `clip`'s action (0 when it never played).
    pub fn effective_weight(&self, clip: ClipName) -> f32 {
        self.action(clip).map(|a| a.effective_weight).unwrap_or(0.0)
    }

    pub fn effective_time_scale(&self, clip: ClipName) -> f32 {
        self.action(clip)
            .map(|a| a.effective_time_scale)
            .unwrap_or(1.0)
    }

    pub fn is_running(&self, clip: ClipName) -> bool {
        self.action(clip).map(|a| a.running).unwrap_or(false)
    }

    /// True while `clip` has a weight fade in flight.
    pub fn is_fading(&self, clip: ClipName) -> bool {
        self.action(clip).map(|a| a.fade.is_some()).unwrap_or(false)
    }

    /// Advance the clock by `dt`, update fades/warps, sample every contributing action and
    /// blend into a Pose.
    pub fn update(&mut self, dt: f32) -> Pose {
        self.time += f64::from(dt);
        let now = self.time;
        let mut accum = Accumulator::new();

        for action in self.actions.iter_mut().filter(|a| a.running) {
            if !action.enabled {
                action.update_weight(now);
                continue;
            }
            let Some(clip) = self.library.get(action.clip) else {
                continue;
            };
            // time scale, then clip time, then weight
            let ts = action.update_time_scale(now);
            action.advance(dt * ts, clip.duration);
            let weight = action.update_weight(now);
            if weight <= 0.0 {
                continue;
            }
            for track in &clip.tracks {
                if let Some(sample) = sample_track(track, action.time) {
                    accum.add(track.bone(), track.property(), &sample, weight);
                }
            }
        }

        accum.finalize(self.rest.as_ref())
    }
}
