//! Static resume viewer: one embedded document filling a padded, centered container.

use serde::{Deserialize, Serialize};

use crate::config::SiteConfig;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedFrame {
    pub src: String,
    pub width: String,
    pub height: String,
    pub border: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameContainer {
    pub height: String,
    pub padding: String,
    /// Center the frame on both axes.
    pub centered: bool,
}

impl Default for FrameContainer {
    fn default() -> Self {
        Self {
            height: "100vh".into(),
            padding: "20px".into(),
            centered: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeViewer {
    pub container: FrameContainer,
    pub frame: EmbedFrame,
}

impl ResumeViewer {
    pub fn new(cfg: &SiteConfig) -> Self {
        Self {
            container: FrameContainer::default(),
            frame: EmbedFrame {
                src: cfg.resume_document.clone(),
                width: "100%".into(),
                height: "100%".into(),
                border: "none".into(),
            },
        }
    }

    /// Markup for hosts that inject HTML directly.
    pub fn to_html(&self) -> String {
        let c = &self.container;
        let f = &self.frame;
        let align = if c.centered {
            "display: flex; justify-content: center; align-items: center; "
        } else {
            ""
        };
        format!(
            r#"<div style="height: {}; padding: {}; {align}box-sizing: border-box;"><iframe src="{}" width="{}" height="{}" style="border: {};"></iframe></div>"#,
            escape_html(&c.height),
            escape_html(&c.padding),
            escape_html(&f.src),
            escape_html(&f.width),
            escape_html(&f.height),
            escape_html(&f.border),
        )
    }
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
