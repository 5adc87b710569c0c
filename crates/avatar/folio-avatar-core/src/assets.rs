//! Relative asset path conventions shared by every host.

use crate::ids::{ClipName, Domain};

/// Dress used while no domain has been chosen yet.
pub const FALLBACK_DOMAIN: Domain = Domain::App;

/// `models/<key>.glb`; an unset domain wears the app dress.
pub fn model_path(domain: Option<Domain>) -> String {
    let key = domain.unwrap_or(FALLBACK_DOMAIN).model_key();
    format!("models/{key}.glb")
}

/// `animations/<Name>.fbx`
pub fn clip_path(clip: ClipName) -> String {
    format!("animations/{}.fbx", clip.as_str())
}

/// Everything a host should fetch eagerly: all clips (regardless of domain) and both models.
pub fn preload_manifest() -> Vec<String> {
    let mut out: Vec<String> = ClipName::ALL.iter().map(|c| clip_path(*c)).collect();
    out.push(model_path(Some(Domain::App)));
    out.push(model_path(Some(Domain::Web)));
    out
}
