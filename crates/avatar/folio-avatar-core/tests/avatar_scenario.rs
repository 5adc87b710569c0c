use folio_avatar_core::{
    Avatar, AvatarEvent, AvatarProps, ClipName, Config, Domain, FrameInputs, Transition,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn loaded() -> Avatar {
    let mut avatar = Avatar::new(Config::default());
    for name in ClipName::ALL {
        let json = folio_test_fixtures::clips::json(name.as_str()).expect("clip fixture");
        avatar.load_clip_json(name, &json).expect("load clip");
    }
    let nodes = folio_test_fixtures::clips::nodes("Typing").unwrap();
    avatar.bind_bones(nodes.iter().map(String::as_str));
    avatar.register_materials(["Wolf3D_Skin", "Wolf3D_Body", "Wolf3D_Hair"]);
    avatar
}

fn props(animation: &str, wireframe: bool, domain: Option<Domain>) -> AvatarProps {
    AvatarProps {
        animation: animation.to_string(),
        wireframe,
        domain,
    }
}

fn transitions(events: &[AvatarEvent]) -> Vec<Transition> {
    events
        .iter()
        .filter_map(|e| match e {
            AvatarEvent::TransitionStarted { transition } => Some(*transition),
            _ => None,
        })
        .collect()
}

#[test]
fn end_to_end_domain_typing_wireframe() {
    let mut avatar = loaded();
    let frame = FrameInputs::default();

    // no domain: nothing plays, no scene
    let out = avatar.set_props(&props("Standing", false, None));
    assert!(transitions(&out.events).is_empty());
    assert!(!avatar.scene_visible());
    assert!(avatar.update(0.1, &frame).writes.is_empty());

    // domain arrives: Standing fades in from zero
    let out = avatar.set_props(&props("Standing", false, Some(Domain::App)));
    assert!(out.events.contains(&AvatarEvent::DomainSelected {
        domain: Domain::App,
        first: true
    }));
    assert_eq!(
        transitions(&out.events),
        vec![Transition::FadeIn {
            to: ClipName::Standing,
            duration: 0.5
        }]
    );
    assert!(avatar.scene_visible());
    assert_eq!(avatar.dress(), Some("app"));

    avatar.update(0.0, &frame);
    assert_eq!(avatar.mixer().effective_weight(ClipName::Standing), 0.0);
    avatar.update(0.25, &frame);
    approx(avatar.mixer().effective_weight(ClipName::Standing), 0.5, 1e-5);
    avatar.update(0.25, &frame);
    approx(avatar.mixer().effective_weight(ClipName::Standing), 1.0, 1e-6);

    // Typing: one warped cross-fade
    let out = avatar.set_props(&props("Typing", false, Some(Domain::App)));
    assert_eq!(
        transitions(&out.events),
        vec![Transition::CrossFade {
            from: ClipName::Standing,
            to: ClipName::Typing,
            duration: 0.5,
            warp: true
        }]
    );
    assert_eq!(avatar.current_clip(), Some(ClipName::Typing));
    avatar.update(0.25, &frame);
    approx(avatar.mixer().effective_weight(ClipName::Standing), 0.5, 1e-5);
    approx(avatar.mixer().effective_weight(ClipName::Typing), 0.5, 1e-5);
    avatar.update(0.25, &frame);
    approx(avatar.mixer().effective_weight(ClipName::Standing), 0.0, 1e-6);
    approx(avatar.mixer().effective_weight(ClipName::Typing), 1.0, 1e-6);

    // the corrected Spine curve drives the pose
    let out = avatar.update(0.1, &frame);
    let spine = out.write("Spine").and_then(|w| w.pose.rotation).unwrap();
    let len = spine.iter().map(|c| c * c).sum::<f32>().sqrt();
    approx(len, 1.0, 1e-5);

    // wireframe: materials switch while Typing keeps playing
    let out = avatar.set_props(&props("Typing", true, Some(Domain::App)));
    assert!(transitions(&out.events).is_empty());
    assert!(out.events.contains(&AvatarEvent::WireframeChanged {
        wireframe: true,
        materials: 3
    }));
    assert_eq!(out.material_updates.len(), 3);
    assert!(out.material_updates.iter().all(|(_, on)| *on));
    assert!(avatar.materials().iter().all(|m| m.wireframe));
    assert_eq!(avatar.current_clip(), Some(ClipName::Typing));
    assert!(avatar.mixer().is_running(ClipName::Typing));
    approx(avatar.mixer().effective_weight(ClipName::Typing), 1.0, 1e-6);
}

#[test]
fn same_request_twice_is_a_noop() {
    let mut avatar = loaded();
    avatar.set_props(&props("Falling", false, Some(Domain::Web)));
    let out = avatar.set_props(&props("Falling", false, Some(Domain::Web)));
    assert!(out.events.is_empty());
    assert_eq!(avatar.current_clip(), Some(ClipName::Falling));
}

#[test]
fn unknown_animation_is_ignored() {
    let mut avatar = loaded();
    avatar.set_props(&props("Standing", false, Some(Domain::App)));
    avatar.update(0.5, &FrameInputs::default());

    for name in ["Dancing", "typing", ""] {
        let out = avatar.set_props(&props(name, false, Some(Domain::App)));
        assert!(transitions(&out.events).is_empty());
        assert!(out.events.contains(&AvatarEvent::TransitionSkipped {
            requested: name.to_string()
        }));
        assert_eq!(avatar.current_clip(), Some(ClipName::Standing));
        assert!(!avatar.mixer().is_fading(ClipName::Standing));
    }
}

#[test]
fn each_change_is_one_cross_fade() {
    let mut avatar = loaded();
    avatar.set_props(&props("Standing", false, Some(Domain::App)));
    for (from, to) in [
        (ClipName::Standing, ClipName::Falling),
        (ClipName::Falling, ClipName::Typing),
        (ClipName::Typing, ClipName::Standing),
    ] {
        avatar.update(0.2, &FrameInputs::default());
        let out = avatar.set_props(&props(to.as_str(), false, Some(Domain::App)));
        let started = transitions(&out.events);
        assert_eq!(started.len(), 1);
        assert!(matches!(
            started[0],
            Transition::CrossFade { from: f, to: t, duration, .. }
                if f == from && t == to && duration == 0.5
        ));
        assert_eq!(avatar.current_clip(), Some(to));
    }
}

#[test]
fn domain_switch_keeps_gate_open() {
    let mut avatar = loaded();
    avatar.set_props(&props("Standing", false, Some(Domain::App)));
    let out = avatar.set_props(&props("Standing", false, Some(Domain::Web)));
    assert_eq!(
        out.events,
        vec![AvatarEvent::DomainSelected {
            domain: Domain::Web,
            first: false
        }]
    );
    avatar.set_props(&props("Standing", false, None));
    assert!(avatar.scene_visible());
    assert_eq!(avatar.dress(), Some("web"));
}

#[test]
fn outputs_serialize_for_hosts() {
    let mut avatar = loaded();
    let out = avatar.set_props(&props("Standing", false, Some(Domain::App)));
    let json = serde_json::to_value(out).unwrap();
    assert_eq!(json["events"][0]["type"], "domain_selected");
    assert_eq!(json["events"][1]["transition"]["kind"], "fade_in");
}
