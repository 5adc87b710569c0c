use folio_avatar_core::{parse_clip_json, ClipName, TrackKind};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

#[test]
fn every_manifest_clip_parses() {
    let keys = folio_test_fixtures::clips::keys();
    assert_eq!(keys, vec!["Falling", "Standing", "Typing"]);
    for key in keys {
        assert!(ClipName::parse(&key).is_some(), "fixture key {key} is not a clip name");
        let json = folio_test_fixtures::clips::json(&key).expect("load clip fixture");
        let clip = parse_clip_json(&json).expect("parse clip fixture");
        assert!(clip.duration > 0.0);
        assert!(!clip.tracks.is_empty());
    }
}

#[test]
fn unsupported_tracks_are_dropped() {
    let json = folio_test_fixtures::clips::json("Typing").unwrap();
    let clip = parse_clip_json(&json).unwrap();
    assert_eq!(clip.tracks.len(), 5);
    assert!(clip.track("Wolf3D_Body.visible").is_none());
    let spine = clip.track("Spine.quaternion").unwrap();
    assert_eq!(spine.kind, TrackKind::Quaternion);
    assert_eq!(spine.bone(), "Spine");
    assert_eq!(spine.property(), "quaternion");
    assert_eq!(spine.key_count(), 3);
}

#[test]
fn missing_duration_is_recomputed() {
    let json = folio_test_fixtures::clips::json("Falling").unwrap();
    let clip = parse_clip_json(&json).unwrap();
    approx(clip.duration, 1.5, 1e-6);
}

#[test]
fn mismatched_value_count_is_rejected() {
    let json = r#"{
        "name": "broken",
        "duration": 1,
        "tracks": [
            { "name": "Spine.quaternion", "type": "quaternion", "times": [0, 1], "values": [0, 0, 0, 1] }
        ]
    }"#;
    assert!(parse_clip_json(json).is_err());
}
