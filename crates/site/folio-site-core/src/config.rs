//! Site configuration: outbound links, the resume document and menu panel geometry.

use serde::{Deserialize, Serialize};

use crate::error::SiteError;

/// Panel geometry and timing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Viewports narrower than this get a full-width panel.
    pub breakpoint_px: f32,
    /// Panel width at or above the breakpoint.
    pub open_width_px: f32,
    pub transition_ms: f32,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: 768.0,
            open_width_px: 320.0,
            transition_ms: 150.0,
        }
    }
}

/// Every field has a default, so `{}` (or any subset) parses.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub github_url: String,
    pub linkedin_url: String,
    /// Shareable resume link opened by the Resume button.
    pub resume_url: String,
    /// Prefilled share message link opened by the Share button.
    pub share_url: String,
    /// Path of the resume document embedded by the viewer.
    pub resume_document: String,
    pub panel: PanelConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            github_url: "https://github.com/Rohan-Raidani".into(),
            linkedin_url: "https://www.linkedin.com/in/rohan-raidani-59b57923b/".into(),
            resume_url:
                "https://drive.google.com/file/d/1uoOpliWPYC3TQtXX249qBAg_2zah2HPb/view?usp=sharing"
                    .into(),
            share_url: "https://api.whatsapp.com/send?text=I%20just%20came%20across%20Rohan%20Raidani%27s%20portfolio.%20If%20you%20appreciate%20great%20design%2C%20you%27re%20going%20to%20love%20this!%0ALink%20=>%20https%3A%2F%2Frohan-raidani-ten.vercel.app%2F".into(),
            resume_document: "/resume/Rohan-Raidani.pdf".into(),
            panel: PanelConfig::default(),
        }
    }
}

impl SiteConfig {
    pub fn from_json(s: &str) -> Result<Self, SiteError> {
        Ok(serde_json::from_str(s)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        assert_eq!(SiteConfig::from_json("{}").unwrap(), SiteConfig::default());
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            SiteConfig::from_json("{ github_url: "),
            Err(SiteError::Config(_))
        ));
    }
}
