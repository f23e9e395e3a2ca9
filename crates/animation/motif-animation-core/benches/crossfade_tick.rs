use criterion::{black_box, criterion_group, criterion_main, Criterion};
use motif_animation_core::{
    advance, ClipIndex, ClipRef, ClipResource, ControllerConfig, CrossFadeController, FadeState,
    HeadlessGraph, HeadlessHost,
};

const DT: f32 = 1.0 / 60.0;

fn clips() -> Vec<ClipRef> {
    ["Idle", "Walk", "Run", "Jump", "Attack", "Damage", "Dead"]
        .iter()
        .map(|m| ClipResource::shared(format!("Hero_{m}"), 1.0, true))
        .collect()
}

fn bench_advance(c: &mut Criterion) {
    let (blending, _) = advance(FadeState::requested(0.25), 0.0);
    c.bench_function("advance_blending", |b| {
        b.iter(|| advance(black_box(blending), black_box(0.1)))
    });
}

fn bench_controller_tick(c: &mut Criterion) {
    let clips = clips();
    let mut host = HeadlessHost::new();
    let mut ctl: CrossFadeController<HeadlessGraph> =
        CrossFadeController::create(&mut host, "bench", "rig", ControllerConfig::default())
            .expect("create controller");
    ctl.init_play(clips[0].clone());

    let mut frame = 0usize;
    c.bench_function("controller_tick_with_periodic_play", |b| {
        b.iter(|| {
            // A new request every 30 frames keeps the fade path hot.
            if frame % 30 == 0 {
                let next = clips[(frame / 30) % clips.len()].clone();
                ctl.play_default(next);
            }
            frame += 1;
            black_box(ctl.tick(DT))
        })
    });
    ctl.shutdown();
}

fn bench_index_build(c: &mut Criterion) {
    let clips = clips();
    let identifiers = ["Idle", "Walk", "Run", "Jump", "Attack", "Damage", "Dead"];
    c.bench_function("clip_index_build", |b| {
        b.iter(|| ClipIndex::build(black_box(&clips), identifiers))
    });
}

criterion_group!(
    benches,
    bench_advance,
    bench_controller_tick,
    bench_index_build
);
criterion_main!(benches);
