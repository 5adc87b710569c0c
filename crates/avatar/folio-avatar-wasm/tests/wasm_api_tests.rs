#![cfg(target_arch = "wasm32")]
use folio_avatar_wasm::{abi_version, model_path, preload_paths, FolioAvatar};
use serde::Serialize;
use serde_json::json;
use serde_wasm_bindgen as swb;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn clip_json(duration: f32) -> JsValue {
    let clip = json!({
        "name": "mixamo.com",
        "duration": duration,
        "tracks": [
            { "name": "Hips.position", "type": "vector", "times": [0.0, duration], "values": [0, 100, 0, 0, 101, 0] },
            { "name": "Spine.quaternion", "type": "quaternion", "times": [0.0], "values": [0.2, 0.0, 0.0, 0.98] }
        ]
    });
    JsValue::from_str(&clip.to_string())
}

fn to_js(v: &serde_json::Value) -> JsValue {
    v.serialize(&swb::Serializer::json_compatible()).unwrap()
}

fn props(animation: &str, wireframe: bool, domain: Option<&str>) -> JsValue {
    let p = json!({ "animation": animation, "wireframe": wireframe, "domain": domain });
    to_js(&p)
}

fn loaded() -> FolioAvatar {
    let mut avatar = FolioAvatar::new(JsValue::UNDEFINED).unwrap();
    for (name, d) in [("Standing", 4.0), ("Typing", 2.0), ("Falling", 1.5)] {
        avatar.load_clip(name.into(), clip_json(d)).unwrap();
    }
    avatar
}

fn events(out: JsValue) -> Vec<serde_json::Value> {
    let v: serde_json::Value = swb::from_value(out).unwrap();
    v["events"].as_array().cloned().unwrap_or_default()
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_partial_config() {
    let cfg = to_js(&json!({ "fade_duration": 0.25 }));
    assert!(FolioAvatar::new(cfg).is_ok());
}

#[wasm_bindgen_test]
fn unknown_clip_name_is_an_error() {
    let mut avatar = FolioAvatar::new(JsValue::NULL).unwrap();
    assert!(avatar.load_clip("Dancing".into(), clip_json(1.0)).is_err());
}

#[wasm_bindgen_test]
fn gate_then_transition() {
    let mut avatar = loaded();
    let out = avatar.set_props(props("Standing", false, None)).unwrap();
    assert!(events(out).is_empty());
    assert!(!avatar.scene_visible());

    let out = avatar.set_props(props("Standing", false, Some("app"))).unwrap();
    let ev = events(out);
    assert_eq!(ev[0]["type"], "domain_selected");
    assert_eq!(ev[1]["transition"]["kind"], "fade_in");
    assert_eq!(avatar.dress().as_deref(), Some("app"));

    let out = avatar.set_props(props("Typing", false, Some("app"))).unwrap();
    let ev = events(out);
    assert_eq!(ev[0]["transition"]["kind"], "cross_fade");
    assert_eq!(ev[0]["transition"]["warp"], true);
    assert_eq!(avatar.current_clip().as_deref(), Some("Typing"));
}

#[wasm_bindgen_test]
fn update_returns_bone_writes() {
    let mut avatar = loaded();
    avatar.bind_bones(swb::to_value(&vec!["Hips", "Spine", "Spine2", "Wolf3D_Head"]).unwrap()).unwrap();
    avatar.set_props(props("Standing", false, Some("web"))).unwrap();
    let frame = to_js(&json!({
        "follow": { "headFollow": true, "cursorFollow": false },
        "camera_position": [0.0, 1.6, 5.0],
        "head": { "world_position": [0.0, 1.6, 0.0], "parent_world_rotation": [0.0, 0.0, 0.0, 1.0] }
    }));
    let out: serde_json::Value = swb::from_value(avatar.update(0.6, frame).unwrap()).unwrap();
    let writes = out["writes"].as_array().unwrap();
    assert!(writes.iter().any(|w| w["bone"] == "Hips"));
    assert!(writes.iter().any(|w| w["bone"] == "Wolf3D_Head"));
}

#[wasm_bindgen_test]
fn asset_paths() {
    assert_eq!(model_path(Some("web".into())).unwrap(), "models/web.glb");
    assert_eq!(model_path(None).unwrap(), "models/app.glb");
    assert!(model_path(Some("desktop".into())).is_err());
    let paths: Vec<String> = swb::from_value(preload_paths().unwrap()).unwrap();
    assert!(paths.contains(&"animations/Typing.fbx".to_string()));
}

#[wasm_bindgen_test]
fn fade_in_starts_from_the_bind_pose() {
    let mut avatar = loaded();
    let rest = to_js(&json!([
        { "name": "Hips", "translation": [0.0, 90.0, 0.0] },
        { "name": "Spine", "rotation": [0.0, 0.0, 0.0, 1.0] }
    ]));
    assert_eq!(avatar.set_rest_pose(rest).unwrap(), 2);
    assert!(avatar.set_rest_pose(to_js(&json!({ "Hips": 1 }))).is_err());
    avatar.set_props(props("Standing", false, Some("app"))).unwrap();

    // quarter of the way in: Hips sits a quarter of the way from 90 toward 100
    avatar.update(0.0, JsValue::UNDEFINED).unwrap();
    let out: serde_json::Value =
        swb::from_value(avatar.update(0.125, JsValue::UNDEFINED).unwrap()).unwrap();
    let hips = out["writes"]
        .as_array()
        .unwrap()
        .iter()
        .find(|w| w["bone"] == "Hips")
        .cloned()
        .unwrap();
    let y = hips["translation"][1].as_f64().unwrap();
    assert!((y - 92.5).abs() < 0.1, "hips y {y}");
}

#[wasm_bindgen_test]
fn clip_loaded_after_domain_plays() {
    let mut avatar = FolioAvatar::new(JsValue::UNDEFINED).unwrap();
    avatar.set_props(props("Standing", false, Some("web"))).unwrap();
    assert_eq!(avatar.current_clip(), None);
    avatar.load_clip("Standing".into(), clip_json(4.0)).unwrap();
    assert_eq!(avatar.current_clip().as_deref(), Some("Standing"));
    let ev = events(avatar.update(0.1, JsValue::UNDEFINED).unwrap());
    assert_eq!(ev[0]["transition"]["kind"], "fade_in");
}
