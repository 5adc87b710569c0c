//! Domain-gated transition controller.
//!
//! Holds the current and requested clip and drives the mixer through an explicit
//! [`AnimationController::advance`] call whenever the requested state changes.
//!
//! States: `Unselected` → `Playing(x)` once, with a fade-in, after the domain gate opens;
//! `Playing(x)` → `Playing(y)` by a single cross-fade for every distinct request;
//! `Playing(x)` with request `x` is a no-op. The gate never closes again.

use serde::{Deserialize, Serialize};

use crate::ids::{ClipName, Domain};
use crate::mixer::Mixer;

/// Clip entered through a warped cross-fade; every other target uses a plain one.
pub const WARPED_TARGET: ClipName = ClipName::Typing;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    Unselected,
    Playing(ClipName),
}

/// A transition started by `advance`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// First clip: fade in from zero weight, nothing to fade out.
    FadeIn { to: ClipName, duration: f32 },
    CrossFade {
        from: ClipName,
        to: ClipName,
        duration: f32,
        warp: bool,
    },
}

impl Transition {
    pub fn target(&self) -> ClipName {
        match *self {
            Transition::FadeIn { to, .. } | Transition::CrossFade { to, .. } => to,
        }
    }
}

/// Result of one `advance` call.
#[derive(Clone, Debug, PartialEq)]
pub enum Advance {
    /// No domain yet; nothing plays.
    Gated,
    /// Requested clip is already current.
    Unchanged,
    /// Requested name is not a loaded clip; the current clip continues.
    Skipped { requested: String },
    Started(Transition),
}

impl Advance {
    pub fn transition(&self) -> Option<Transition> {
        match self {
            Advance::Started(t) => Some(*t),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct AnimationController {
    state: ControllerState,
    domain: Option<Domain>,
    requested: String,
    fade_duration: f32,
}

impl AnimationController {
    pub fn new(fade_duration: f32, initial_request: impl Into<String>) -> Self {
        Self {
            state: ControllerState::Unselected,
            domain: None,
            requested: initial_request.into(),
            fade_duration,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn current(&self) -> Option<ClipName> {
        match self.state {
            ControllerState::Unselected => None,
            ControllerState::Playing(c) => Some(c),
        }
    }

    pub fn domain(&self) -> Option<Domain> {
        self.domain
    }

    /// The gate opens on the first domain and stays open.
    pub fn is_gate_open(&self) -> bool {
        self.domain.is_some()
    }

    pub fn requested(&self) -> &str {
        &self.requested
    }

    /// Record the domain. `None` never closes an open gate. Returns `(domain, first)`
    /// when the stored domain changed.
    pub fn set_domain(&mut self, domain: Option<Domain>) -> Option<(Domain, bool)> {
        let next = domain?;
        if self.domain == Some(next) {
            return None;
        }
        let first = self.domain.is_none();
        self.domain = Some(next);
        log::debug!("domain set to {next:?} (first: {first})");
        Some((next, first))
    }

    pub fn request(&mut self, name: &str) {
        if self.requested != name {
            self.requested = name.to_string();
        }
    }

    /// Bring the mixer in line with the requested clip.
    pub fn advance(&mut self, mixer: &mut Mixer) -> Advance {
        if !self.is_gate_open() {
            return Advance::Gated;
        }
        let Some(next) = ClipName::parse(&self.requested).filter(|c| mixer.has_clip(*c)) else {
            log::debug!("no loaded clip named '{}'; transition skipped", self.requested);
            return Advance::Skipped {
                requested: self.requested.clone(),
            };
        };
        let duration = self.fade_duration;

        let transition = match self.state {
            ControllerState::Playing(current) if current == next => return Advance::Unchanged,
            ControllerState::Unselected => {
                mixer.reset(next);
                mixer.fade_in(next, duration);
                mixer.play(next);
                Transition::FadeIn { to: next, duration }
            }
            ControllerState::Playing(current) => {
                let warp = next == WARPED_TARGET;
                mixer.reset(next);
                if warp {
                    mixer.set_effective_time_scale(next, 1.0);
                    mixer.set_effective_weight(next, 1.0);
                }
                mixer.cross_fade(current, next, duration, warp);
                mixer.play(next);
                Transition::CrossFade {
                    from: current,
                    to: next,
                    duration,
                    warp,
                }
            }
        };

        self.state = ControllerState::Playing(next);
        log::debug!("transition started: {transition:?}");
        Advance::Started(transition)
    }

    /// Cleanup on unmount: fade the current clip out and forget it.
    pub fn unmount(&mut self, mixer: &mut Mixer) -> Option<ClipName> {
        let current = self.current()?;
        mixer.fade_out(current, self.fade_duration);
        self.state = ControllerState::Unselected;
        Some(current)
    }
}
