//! Slide-out navigation menu.
//!
//! The open flag belongs to the page; the menu flips it, reports how the toggle icon and
//! the panel should look for a given flag, and turns button presses into
//! [`MenuAction`]s dispatched to a [`Navigator`]. Dispatch is fire-and-forget.

use serde::{Deserialize, Serialize};

use crate::config::{PanelConfig, SiteConfig};
use crate::error::SiteError;

/// Page sections, in scroll order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Section {
    About = 0,
    Skills = 1,
    Projects = 2,
    Contact = 3,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::About,
        Section::Skills,
        Section::Projects,
        Section::Contact,
    ];

    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn from_index(i: u8) -> Option<Self> {
        Self::ALL.get(usize::from(i)).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Section::About => "About",
            Section::Skills => "Skills",
            Section::Projects => "Projects",
            Section::Contact => "Contact",
        }
    }
}

/// A text button in the panel that jumps to its section.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuButton {
    pub section: Section,
}

impl MenuButton {
    /// The four section buttons, top to bottom.
    pub fn all() -> [MenuButton; 4] {
        Section::ALL.map(|section| MenuButton { section })
    }

    pub fn label(&self) -> &'static str {
        self.section.label()
    }

    pub fn action(&self) -> MenuAction {
        MenuAction::JumpTo(self.section)
    }
}

/// Icon buttons under the section list.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SocialLink {
    Github,
    Linkedin,
    Mail,
    Resume,
    Share,
}

impl SocialLink {
    pub const ALL: [SocialLink; 5] = [
        SocialLink::Github,
        SocialLink::Linkedin,
        SocialLink::Mail,
        SocialLink::Resume,
        SocialLink::Share,
    ];

    /// Hover label. The LinkedIn spelling is the one shown on the live site.
    pub fn tooltip(self) -> &'static str {
        match self {
            SocialLink::Github => "Github",
            SocialLink::Linkedin => "Linkdin",
            SocialLink::Mail => "Mail",
            SocialLink::Resume => "Resume",
            SocialLink::Share => "Share",
        }
    }

    /// Style hook for the icon (brand colour on hover).
    pub fn platform(self) -> &'static str {
        match self {
            SocialLink::Github => "Github",
            SocialLink::Linkedin => "Linkdin",
            SocialLink::Mail => "Mail",
            SocialLink::Resume => "CV",
            SocialLink::Share => "Whatsapp",
        }
    }

    /// Mail scrolls to the contact section; every other link opens in a new tab.
    pub fn action(self, cfg: &SiteConfig) -> MenuAction {
        let url = match self {
            SocialLink::Mail => return MenuAction::JumpTo(Section::Contact),
            SocialLink::Github => &cfg.github_url,
            SocialLink::Linkedin => &cfg.linkedin_url,
            SocialLink::Resume => &cfg.resume_url,
            SocialLink::Share => &cfg.share_url,
        };
        MenuAction::open_in_new_tab(url)
    }
}

pub const NEW_TAB: &str = "_blank";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum MenuAction {
    JumpTo(Section),
    OpenExternal { url: String, target: String },
}

impl MenuAction {
    pub fn open_in_new_tab(url: &str) -> Self {
        MenuAction::OpenExternal {
            url: url.to_string(),
            target: NEW_TAB.to_string(),
        }
    }
}

/// Receives menu dispatches: section scrolling and new-window navigation.
pub trait Navigator {
    fn jump_to_section(&mut self, index: u8);
    fn open_external(&mut self, url: &str, target: &str);
}

pub fn dispatch(action: &MenuAction, nav: &mut dyn Navigator) {
    log::debug!("menu dispatch: {action:?}");
    match action {
        MenuAction::JumpTo(section) => nav.jump_to_section(section.index()),
        MenuAction::OpenExternal { url, target } => nav.open_external(url, target),
    }
}

/// Anything pressable in the menu, addressed by a stable lowercase id.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuControl {
    Section(Section),
    Social(SocialLink),
}

impl MenuControl {
    /// Ids: `about`, `skills`, `projects`, `contact`, `github`, `linkedin`, `mail`,
    /// `resume`, `share`.
    pub fn parse(id: &str) -> Result<Self, SiteError> {
        Ok(match id {
            "about" => MenuControl::Section(Section::About),
            "skills" => MenuControl::Section(Section::Skills),
            "projects" => MenuControl::Section(Section::Projects),
            "contact" => MenuControl::Section(Section::Contact),
            "github" => MenuControl::Social(SocialLink::Github),
            "linkedin" => MenuControl::Social(SocialLink::Linkedin),
            "mail" => MenuControl::Social(SocialLink::Mail),
            "resume" => MenuControl::Social(SocialLink::Resume),
            "share" => MenuControl::Social(SocialLink::Share),
            other => return Err(SiteError::UnknownControl(other.to_string())),
        })
    }

    pub fn action(self, cfg: &SiteConfig) -> MenuAction {
        match self {
            MenuControl::Section(section) => MenuButton { section }.action(),
            MenuControl::Social(link) => link.action(cfg),
        }
    }
}

/// Flip the page-owned open flag. Returns the new value.
pub fn toggle(opened: &mut bool) -> bool {
    *opened = !*opened;
    *opened
}

/// Three-bar toggle icon. Open: top bar rotated 45° and nudged down, middle hidden,
/// bottom bar rotated -45°, forming an X.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuIcon {
    pub top_rotation_deg: f32,
    pub top_offset_px: f32,
    pub middle_visible: bool,
    pub bottom_rotation_deg: f32,
}

impl MenuIcon {
    pub fn for_state(opened: bool) -> Self {
        if opened {
            Self {
                top_rotation_deg: 45.0,
                top_offset_px: 2.0,
                middle_visible: false,
                bottom_rotation_deg: -45.0,
            }
        } else {
            Self {
                top_rotation_deg: 0.0,
                top_offset_px: 0.0,
                middle_visible: true,
                bottom_rotation_deg: 0.0,
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelLayout {
    pub breakpoint_px: f32,
    pub open_width_px: f32,
}

impl Default for PanelLayout {
    fn default() -> Self {
        Self::from(&PanelConfig::default())
    }
}

impl From<&PanelConfig> for PanelLayout {
    fn from(cfg: &PanelConfig) -> Self {
        Self {
            breakpoint_px: cfg.breakpoint_px,
            open_width_px: cfg.open_width_px,
        }
    }
}

impl PanelLayout {
    /// Target panel width: collapsed is 0, open spans the viewport on narrow screens and
    /// is a fixed column otherwise.
    pub fn width(&self, opened: bool, viewport_px: f32) -> f32 {
        if !opened {
            0.0
        } else if viewport_px < self.breakpoint_px {
            viewport_px.max(0.0)
        } else {
            self.open_width_px
        }
    }
}

/// CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    /// `cubic-bezier(0.4, 0, 0.2, 1)`
    pub const STANDARD: CubicBezier = CubicBezier {
        x1: 0.4,
        y1: 0.0,
        x2: 0.2,
        y2: 1.0,
    };

    fn coord(t: f32, p1: f32, p2: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    fn slope(t: f32, p1: f32, p2: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * p1 + 6.0 * u * t * (p2 - p1) + 3.0 * t * t * (1.0 - p2)
    }

    /// Eased progress for linear progress `x` in [0, 1].
    pub fn ease(&self, x: f32) -> f32 {
        if x <= 0.0 {
            return 0.0;
        }
        if x >= 1.0 {
            return 1.0;
        }
        // Newton first, bisection when the slope flattens out
        let mut t = x;
        for _ in 0..8 {
            let err = Self::coord(t, self.x1, self.x2) - x;
            if err.abs() < 1e-6 {
                return Self::coord(t, self.y1, self.y2);
            }
            let d = Self::slope(t, self.x1, self.x2);
            if d.abs() < 1e-6 {
                break;
            }
            t = (t - err / d).clamp(0.0, 1.0);
        }
        let (mut lo, mut hi) = (0.0f32, 1.0f32);
        t = x;
        for _ in 0..32 {
            let v = Self::coord(t, self.x1, self.x2);
            if (v - x).abs() < 1e-6 {
                break;
            }
            if v < x {
                lo = t;
            } else {
                hi = t;
            }
            t = 0.5 * (lo + hi);
        }
        Self::coord(t, self.y1, self.y2)
    }
}

/// Animated panel width. Retargeting mid-flight starts from the current width.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PanelTransition {
    from: f32,
    to: f32,
    elapsed_ms: f32,
    duration_ms: f32,
    curve: CubicBezier,
}

impl PanelTransition {
    /// Settled at `width`.
    pub fn new(width: f32, duration_ms: f32) -> Self {
        Self {
            from: width,
            to: width,
            elapsed_ms: duration_ms,
            duration_ms,
            curve: CubicBezier::STANDARD,
        }
    }

    fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            1.0
        } else {
            (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        }
    }

    pub fn width(&self) -> f32 {
        self.from + (self.to - self.from) * self.curve.ease(self.progress())
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn retarget(&mut self, target: f32) {
        if target == self.to {
            return;
        }
        self.from = self.width();
        self.to = target;
        self.elapsed_ms = 0.0;
    }

    pub fn tick(&mut self, dt_ms: f32) -> f32 {
        self.elapsed_ms = (self.elapsed_ms + dt_ms.max(0.0)).min(self.duration_ms.max(0.0));
        self.width()
    }

    pub fn is_settled(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Convenience holder for hosts that keep the open flag next to the panel animation.
#[derive(Clone, Debug)]
pub struct MenuState {
    pub opened: bool,
    layout: PanelLayout,
    transition: PanelTransition,
}

impl MenuState {
    pub fn new(cfg: &SiteConfig) -> Self {
        Self {
            opened: false,
            layout: PanelLayout::from(&cfg.panel),
            transition: PanelTransition::new(0.0, cfg.panel.transition_ms),
        }
    }

    pub fn toggle(&mut self) -> bool {
        toggle(&mut self.opened)
    }

    pub fn icon(&self) -> MenuIcon {
        MenuIcon::for_state(self.opened)
    }

    /// Target width for the current flag.
    pub fn target_width(&self, viewport_px: f32) -> f32 {
        self.layout.width(self.opened, viewport_px)
    }

    /// Advance the panel animation and return the width to render.
    pub fn tick(&mut self, dt_ms: f32, viewport_px: f32) -> f32 {
        self.transition.retarget(self.target_width(viewport_px));
        self.transition.tick(dt_ms)
    }

    pub fn panel_width(&self) -> f32 {
        self.transition.width()
    }

    /// Resolve `id` and dispatch its action.
    pub fn press(
        &self,
        id: &str,
        cfg: &SiteConfig,
        nav: &mut dyn Navigator,
    ) -> Result<MenuAction, SiteError> {
        let action = MenuControl::parse(id)?.action(cfg);
        dispatch(&action, nav);
        Ok(action)
    }
}
