//! Benchmarks for frame rendering and GIF encoding.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tempfile::tempdir;

use reliability_cube::{
    animation::AnimationRecorder,
    compute::FrameRenderer,
    schema::{AnimationConfig, SceneConfig},
};

fn bench_render_frame(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_frame");

    for (width, height) in [(480, 320), (1200, 800), (2400, 1600)] {
        let config = AnimationConfig {
            image_width: width,
            image_height: height,
            ..Default::default()
        };
        let renderer = FrameRenderer::new(SceneConfig::default(), config).unwrap();

        group.bench_with_input(
            BenchmarkId::new("size", format!("{}x{}", width, height)),
            &renderer,
            |b, renderer| b.iter(|| black_box(renderer.render_frame(black_box(4)).unwrap())),
        );
    }

    group.finish();
}

fn bench_encode_sequence(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_sequence");
    group.sample_size(10);

    for speed in [1, 10, 30] {
        let config = AnimationConfig {
            image_width: 480,
            image_height: 320,
            encoder_speed: speed,
            ..Default::default()
        };
        let renderer = FrameRenderer::new(SceneConfig::default(), config.clone()).unwrap();
        let frames: Vec<_> = renderer.frames().map(|f| f.unwrap()).collect();
        let dir = tempdir().unwrap();

        group.bench_with_input(BenchmarkId::new("speed", speed), &frames, |b, frames| {
            b.iter(|| {
                let path = dir.path().join("bench.gif");
                let mut recorder = AnimationRecorder::create(&path, &config).unwrap();
                for frame in frames {
                    recorder.record_frame(frame).unwrap();
                }
                black_box(recorder.finalize().unwrap())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_render_frame, bench_encode_sequence);
criterion_main!(benches);
