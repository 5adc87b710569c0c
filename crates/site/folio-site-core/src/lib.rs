//! Folio site shell (framework-agnostic)
//!
//! The navigation menu model and the resume viewer. Rendering and routing stay with the
//! host page; this crate decides what the controls mean and how the panel moves.

pub mod config;
pub mod error;
pub mod menu;
pub mod resume;

pub use config::{PanelConfig, SiteConfig};
pub use error::SiteError;
pub use menu::{
    dispatch, toggle, CubicBezier, MenuAction, MenuButton, MenuControl, MenuIcon, MenuState,
    Navigator, PanelLayout, PanelTransition, Section, SocialLink,
};
pub use resume::{EmbedFrame, FrameContainer, ResumeViewer};
