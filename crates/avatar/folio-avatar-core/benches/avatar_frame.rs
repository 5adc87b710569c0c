use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio_avatar_core::{
    Avatar, AvatarProps, BoneFrame, ClipName, Config, Domain, FollowConfig, FrameInputs,
};
use glam::{Vec2, Vec3};

fn loaded_avatar() -> Avatar {
    let mut avatar = Avatar::new(Config::default());
    for name in ClipName::ALL {
        let json = folio_test_fixtures::clips::json(name.as_str()).expect("clip fixture");
        avatar.load_clip_json(name, &json).expect("clip parses");
    }
    let nodes = folio_test_fixtures::clips::nodes("Typing").expect("node list");
    avatar.bind_bones(nodes.iter().map(String::as_str));
    avatar.set_props(&AvatarProps {
        animation: "Standing".into(),
        wireframe: false,
        domain: Some(Domain::App),
    });
    avatar
}

fn frame() -> FrameInputs {
    FrameInputs {
        follow: FollowConfig {
            head_follow: true,
            cursor_follow: true,
        },
        camera_position: Vec3::new(0.0, 1.6, 4.0),
        pointer: Vec2::new(0.3, -0.2),
        head: Some(BoneFrame::at(Vec3::new(0.0, 1.6, 0.0))),
        torso: Some(BoneFrame::at(Vec3::new(0.0, 1.2, 0.0))),
    }
}

fn bench_steady_frame(c: &mut Criterion) {
    let mut avatar = loaded_avatar();
    let inputs = frame();
    c.bench_function("avatar_frame_steady", |b| {
        b.iter(|| {
            let out = avatar.update(black_box(1.0 / 60.0), &inputs);
            black_box(out.writes.len());
        })
    });
}

fn bench_cross_fade_frame(c: &mut Criterion) {
    let inputs = frame();
    c.bench_function("avatar_frame_cross_fade", |b| {
        b.iter_batched(
            || {
                let mut avatar = loaded_avatar();
                avatar.set_props(&AvatarProps {
                    animation: "Typing".into(),
                    wireframe: false,
                    domain: Some(Domain::App),
                });
                avatar
            },
            |mut avatar| {
                let out = avatar.update(black_box(0.25), &inputs);
                black_box(out.writes.len());
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_steady_frame, bench_cross_fade_frame);
criterion_main!(benches);
