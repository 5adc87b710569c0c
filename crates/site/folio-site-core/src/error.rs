use thiserror::Error;

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("site config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("unknown menu control '{0}'")]
    UnknownControl(String),
}
