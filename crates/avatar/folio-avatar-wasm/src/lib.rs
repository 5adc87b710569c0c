use js_sys::JSON;
use serde::{Deserialize, Serialize};
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use folio_avatar_core::{
    assets, parse_clip_json, Avatar, AvatarProps, BonePose, BoneRole, ClipName, Config, Domain,
    FrameInputs, Outputs, RestPose,
};

#[wasm_bindgen]
pub struct FolioAvatar {
    core: Avatar,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Plain objects rather than `Map`s, so hosts can read `write.rotation` directly.
fn outputs_to_js(out: &Outputs) -> Result<JsValue, JsError> {
    out.serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("outputs error: {e}")))
}

/// Bind transform of one node as the page reads it off the loaded model.
#[derive(Deserialize)]
struct RestEntry {
    name: String,
    #[serde(default)]
    rotation: Option<[f32; 4]>,
    #[serde(default)]
    translation: Option<[f32; 3]>,
    #[serde(default)]
    scale: Option<[f32; 3]>,
}

fn parse_clip_name(name: &str) -> Result<ClipName, JsError> {
    ClipName::parse(name).ok_or_else(|| JsError::new(&format!("unknown clip name '{name}'")))
}

#[wasm_bindgen]
impl FolioAvatar {
    /// Create an avatar. Pass a config object (any subset of fields) or undefined/null
    /// for defaults.
    /// Example:
    ///   new FolioAvatar({ fade_duration: 0.5 })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FolioAvatar, JsError> {
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        Ok(FolioAvatar {
            core: Avatar::new(cfg),
        })
    }

    /// Load a clip under `name` ("Standing" | "Typing" | "Falling"). `clip` is the output of
    /// three.js `AnimationClip.toJSON()`, either as an object or as a JSON string.
    #[wasm_bindgen(js_name = load_clip)]
    pub fn load_clip(&mut self, name: String, clip: JsValue) -> Result<(), JsError> {
        let clip_name = parse_clip_name(&name)?;
        if jsvalue_is_undefined_or_null(&clip) {
            return Err(JsError::new("load_clip: clip is null/undefined"));
        }
        let text = match clip.as_string() {
            Some(s) => s,
            None => JSON::stringify(&clip)
                .map_err(|e| JsError::new(&format!("load_clip stringify error: {:?}", e)))?
                .as_string()
                .ok_or_else(|| JsError::new("load_clip: stringify produced non-string"))?,
        };
        let data = parse_clip_json(&text)
            .map_err(|e| JsError::new(&format!("load_clip parse error: {e}")))?;
        self.core
            .load_clip(clip_name, data)
            .map_err(|e| JsError::new(&format!("load_clip error: {e}")))
    }

    /// Hand over the node names of the mounted model. Returns how many look-at roles
    /// were found (0..=2).
    #[wasm_bindgen(js_name = bind_bones)]
    pub fn bind_bones(&mut self, names: JsValue) -> Result<u32, JsError> {
        let names: Vec<String> = swb::from_value(names)
            .map_err(|e| JsError::new(&format!("bind_bones expects string[]: {e}")))?;
        let map = self.core.bind_bones(names.iter().map(String::as_str));
        Ok(BoneRole::ALL
            .iter()
            .filter(|r| map.is_resolved(**r))
            .count() as u32)
    }

    /// Hand over the bind transforms of the mounted model as
    /// `[{ name, rotation?: [x,y,z,w], translation?: [x,y,z], scale?: [x,y,z] }]`.
    /// Fades blend from these values; nodes left out blend from the identity transform.
    #[wasm_bindgen(js_name = set_rest_pose)]
    pub fn set_rest_pose(&mut self, entries: JsValue) -> Result<u32, JsError> {
        let entries: Vec<RestEntry> = swb::from_value(entries).map_err(|e| {
            JsError::new(&format!("set_rest_pose expects [{{ name, rotation?, .. }}]: {e}"))
        })?;
        let rest: RestPose = entries
            .into_iter()
            .map(|e| {
                (
                    e.name,
                    BonePose {
                        rotation: e.rotation,
                        translation: e.translation,
                        scale: e.scale,
                    },
                )
            })
            .collect();
        let count = rest.len() as u32;
        self.core.set_rest_pose(rest);
        Ok(count)
    }

    #[wasm_bindgen(js_name = register_materials)]
    pub fn register_materials(&mut self, names: JsValue) -> Result<(), JsError> {
        let names: Vec<String> = swb::from_value(names)
            .map_err(|e| JsError::new(&format!("register_materials expects string[]: {e}")))?;
        self.core.register_materials(names);
        Ok(())
    }

    /// Apply `{ animation, wireframe, domain }`. Returns Outputs (events, material updates).
    #[wasm_bindgen(js_name = set_props)]
    pub fn set_props(&mut self, props: JsValue) -> Result<JsValue, JsError> {
        let props: AvatarProps = if jsvalue_is_undefined_or_null(&props) {
            AvatarProps::default()
        } else {
            swb::from_value(props).map_err(|e| JsError::new(&format!("props error: {e}")))?
        };
        outputs_to_js(self.core.set_props(&props))
    }

    /// Advance by `dt` seconds. `frame` carries follow flags, camera position, pointer
    /// and the head/torso placement; undefined/null means "no look-at this frame".
    #[wasm_bindgen]
    pub fn update(&mut self, dt: f32, frame: JsValue) -> Result<JsValue, JsError> {
        let frame: FrameInputs = if jsvalue_is_undefined_or_null(&frame) {
            FrameInputs::default()
        } else {
            swb::from_value(frame).map_err(|e| JsError::new(&format!("frame error: {e}")))?
        };
        outputs_to_js(self.core.update(dt, &frame))
    }

    #[wasm_bindgen]
    pub fn unmount(&mut self) -> Result<JsValue, JsError> {
        outputs_to_js(self.core.unmount())
    }

    #[wasm_bindgen(js_name = scene_visible)]
    pub fn scene_visible(&self) -> bool {
        self.core.scene_visible()
    }

    /// Model key of the selected domain, or undefined.
    #[wasm_bindgen]
    pub fn dress(&self) -> Option<String> {
        self.core.dress().map(str::to_string)
    }

    #[wasm_bindgen(js_name = current_clip)]
    pub fn current_clip(&self) -> Option<String> {
        self.core.current_clip().map(|c| c.as_str().to_string())
    }
}

/// Model URL for a domain key ("app" | "web"); undefined falls back to the default dress.
#[wasm_bindgen]
pub fn model_path(domain: Option<String>) -> Result<String, JsError> {
    let domain = match domain.as_deref() {
        None => None,
        Some(key) => Some(
            Domain::parse(key).ok_or_else(|| JsError::new(&format!("unknown domain '{key}'")))?,
        ),
    };
    Ok(assets::model_path(domain))
}

/// Every asset the page should preload: the clip files and both models.
#[wasm_bindgen]
pub fn preload_paths() -> Result<JsValue, JsError> {
    swb::to_value(&assets::preload_manifest())
        .map_err(|e| JsError::new(&format!("preload error: {e}")))
}

#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
