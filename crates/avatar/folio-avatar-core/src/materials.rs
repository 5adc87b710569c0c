//! Wireframe state for every surface material of the model.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialState {
    pub name: String,
    pub wireframe: bool,
    /// Set whenever a render-relevant property changed; cleared by the host after re-upload.
    pub needs_update: bool,
}

/// All materials of the mounted model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MaterialSet {
    materials: Vec<MaterialState>,
    wireframe: bool,
}

impl MaterialSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the material list (new model mounted). New materials adopt the current
    /// wireframe flag and are marked for update.
    pub fn register<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let wireframe = self.wireframe;
        self.materials = names
            .into_iter()
            .map(|n| MaterialState {
                name: n.into(),
                wireframe,
                needs_update: true,
            })
            .collect();
    }

    /// Set every material's wireframe flag and mark each for update. Returns the count.
    pub fn set_wireframe(&mut self, on: bool) -> usize {
        self.wireframe = on;
        for m in &mut self.materials {
            m.wireframe = on;
            m.needs_update = true;
        }
        self.materials.len()
    }

    pub fn wireframe(&self) -> bool {
        self.wireframe
    }

    pub fn iter(&self) -> impl Iterator<Item = &MaterialState> {
        self.materials.iter()
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }

    /// Drain pending updates: returns (name, wireframe) for every dirty material and
    /// clears its flag.
    pub fn take_updates(&mut self) -> Vec<(String, bool)> {
        self.materials
            .iter_mut()
            .filter(|m| m.needs_update)
            .map(|m| {
                m.needs_update = false;
                (m.name.clone(), m.wireframe)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_marks_every_material() {
        let mut set = MaterialSet::new();
        set.register(["Wolf3D_Skin", "Wolf3D_Body", "Wolf3D_Hair"]);
        set.take_updates();

        assert_eq!(set.set_wireframe(true), 3);
        assert!(set.iter().all(|m| m.wireframe && m.needs_update));

        let updates = set.take_updates();
        assert_eq!(updates.len(), 3);
        assert!(updates.iter().all(|(_, w)| *w));
        assert!(set.iter().all(|m| !m.needs_update));

        set.set_wireframe(false);
        assert!(set.iter().all(|m| !m.wireframe && m.needs_update));
    }

    #[test]
    fn late_registration_adopts_flag() {
        let mut set = MaterialSet::new();
        set.set_wireframe(true);
        set.register(vec!["Wolf3D_Outfit_Top".to_string()]);
        assert!(set.iter().all(|m| m.wireframe));
    }
}
