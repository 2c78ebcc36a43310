use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use glam::{Mat4, Quat, Vec3};
use keyrig::animation::AnimationClip;
use keyrig::scene::presets::propeller_walker;
use keyrig::scene::{Rig, TransformNode};

/// A wide rig: `roots` chains of `depth` animated nodes.
fn build_forest(roots: usize, depth: usize) -> Rig {
    let mut rig = Rig::new();
    for _ in 0..roots {
        let mut tip = rig.add_root(TransformNode::new());
        for i in 0..depth {
            let mut clip = AnimationClip::new(format!("link_{i}"));
            clip.add_keyframe(0.0, Vec3::Y, Quat::IDENTITY, Vec3::ONE).unwrap();
            clip.add_keyframe(0.5, Vec3::Y, Quat::from_rotation_z(0.3), Vec3::ONE)
                .unwrap();
            clip.add_keyframe(1.0, Vec3::Y, Quat::IDENTITY, Vec3::ONE).unwrap();
            tip = rig.add_child(tip, TransformNode::from_clip(clip)).unwrap();
        }
    }
    rig
}

fn walker_benchmark(c: &mut Criterion) {
    let mut walker = propeller_walker().unwrap();

    c.bench_function("walker_update_solve", |b| {
        b.iter(|| {
            walker.rig.update(black_box(1.0 / 60.0));
            walker.rig.solve().unwrap();
        });
    });

    c.bench_function("walker_draw", |b| {
        let mut sum = 0.0_f32;
        b.iter(|| {
            walker
                .rig
                .draw(&mut |_: &(), m: &Mat4| sum += m.w_axis.y, &())
                .ok();
            black_box(sum);
        });
    });
}

fn forest_benchmark(c: &mut Criterion) {
    let mut rig = build_forest(64, 32);

    c.bench_function("forest_update", |b| {
        b.iter(|| rig.update(black_box(1.0 / 60.0)));
    });

    c.bench_function("forest_solve", |b| {
        b.iter(|| {
            rig.update(0.0);
            rig.solve().unwrap();
        });
    });
}

criterion_group!(benches, walker_benchmark, forest_benchmark);
criterion_main!(benches);
