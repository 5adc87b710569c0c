use js_sys::{Function, Reflect};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use folio_site_core::{MenuState, Navigator, ResumeViewer, SiteConfig};

#[wasm_bindgen]
pub struct FolioMenu {
    cfg: SiteConfig,
    state: MenuState,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js<T: Serialize>(v: &T, what: &str) -> Result<JsValue, JsError> {
    v.serialize(&swb::Serializer::json_compatible())
        .map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

/// Navigator backed by a JS object exposing `jumpToSection(i)` and
/// `openExternal(url, target)`. Missing methods and throwing callbacks are ignored.
struct JsNavigator {
    obj: JsValue,
}

impl JsNavigator {
    fn method(&self, name: &str) -> Option<Function> {
        Reflect::get(&self.obj, &JsValue::from_str(name))
            .ok()
            .and_then(|f| f.dyn_into::<Function>().ok())
    }
}

impl Navigator for JsNavigator {
    fn jump_to_section(&mut self, index: u8) {
        if let Some(f) = self.method("jumpToSection") {
            if let Err(e) = f.call1(&self.obj, &JsValue::from(index)) {
                log::debug!("jumpToSection threw: {e:?}");
            }
        }
    }

    fn open_external(&mut self, url: &str, target: &str) {
        if let Some(f) = self.method("openExternal") {
            if let Err(e) = f.call2(&self.obj, &JsValue::from_str(url), &JsValue::from_str(target))
            {
                log::debug!("openExternal threw: {e:?}");
            }
        }
    }
}

#[wasm_bindgen]
impl FolioMenu {
    /// Create the menu. Pass a site config object (any subset of fields) or
    /// undefined/null for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<FolioMenu, JsError> {
        console_error_panic_hook::set_once();

        let cfg: SiteConfig = if jsvalue_is_undefined_or_null(&config) {
            SiteConfig::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let state = MenuState::new(&cfg);
        Ok(FolioMenu { cfg, state })
    }

    /// Flip the open flag; returns the new value.
    #[wasm_bindgen]
    pub fn toggle(&mut self) -> bool {
        self.state.toggle()
    }

    #[wasm_bindgen(js_name = is_open)]
    pub fn is_open(&self) -> bool {
        self.state.opened
    }

    /// Target width for the current flag at `viewport` CSS pixels.
    #[wasm_bindgen(js_name = panel_width)]
    pub fn panel_width(&self, viewport: f32) -> f32 {
        self.state.target_width(viewport)
    }

    /// Advance the panel animation by `dt_ms`; returns the width to render.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt_ms: f32, viewport: f32) -> f32 {
        self.state.tick(dt_ms, viewport)
    }

    /// Toggle icon bar state: `{ top_rotation_deg, top_offset_px, middle_visible, bottom_rotation_deg }`.
    #[wasm_bindgen]
    pub fn icon(&self) -> Result<JsValue, JsError> {
        to_js(&self.state.icon(), "icon")
    }

    /// Press the control `id` (`about` .. `contact`, `github`, `linkedin`, `mail`,
    /// `resume`, `share`) and dispatch to `navigator`. Returns the dispatched action.
    #[wasm_bindgen]
    pub fn press(&self, id: &str, navigator: JsValue) -> Result<JsValue, JsError> {
        let mut nav = JsNavigator { obj: navigator };
        let action = self
            .state
            .press(id, &self.cfg, &mut nav)
            .map_err(|e| JsError::new(&e.to_string()))?;
        to_js(&action, "action")
    }

    #[wasm_bindgen(js_name = resume_html)]
    pub fn resume_html(&self) -> String {
        ResumeViewer::new(&self.cfg).to_html()
    }

    /// `{ container, frame }` description of the resume embed.
    #[wasm_bindgen(js_name = resume_embed)]
    pub fn resume_embed(&self) -> Result<JsValue, JsError> {
        to_js(&ResumeViewer::new(&self.cfg), "resume")
    }
}

#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
