//! Identifiers: the closed clip and domain sets plus a monotonic action allocator.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three clips the avatar knows about. Anything else is not an animation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ClipName {
    Standing,
    Typing,
    Falling,
}

impl ClipName {
    /// Preload order of the clip files.
    pub const ALL: [ClipName; 3] = [ClipName::Typing, ClipName::Standing, ClipName::Falling];

    /// Exact, case-sensitive lookup.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "Standing" => Some(ClipName::Standing),
            "Typing" => Some(ClipName::Typing),
            "Falling" => Some(ClipName::Falling),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClipName::Standing => "Standing",
            ClipName::Typing => "Typing",
            ClipName::Falling => "Falling",
        }
    }
}

impl fmt::Display for ClipName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse application mode; picks the character's dress.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    App,
    Web,
}

impl Domain {
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "app" => Some(Domain::App),
            "web" => Some(Domain::Web),
            _ => None,
        }
    }

    /// Key used in the model path convention.
    pub fn model_key(self) -> &'static str {
        match self {
            Domain::App => "app",
            Domain::Web => "web",
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub u32);

/// Monotonic allocator for ActionId.
#[derive(Default, Debug)]
pub struct IdAllocator {
    next_action: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc_action(&mut self) -> ActionId {
        let id = ActionId(self.next_action);
        self.next_action = self.next_action.wrapping_add(1);
        id
    }
}
