use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use viewfinder::host::{EventCapture, ForwardedSensor};
use viewfinder::input::{PointerEvent, Position, Velocity};
use viewfinder::thumbnail::{
    thumbnail_worker_loop, MediaItem, MediaKind, PlaceholderDecoder, ThumbnailCommand,
};
use viewfinder::{Controller, ControllerConfig, ControllerInput, ModeFlags, ModeHandle};

/// A seeded mix of taps, swipes, pinches and orientation samples, 20 ms apart.
fn gesture_stream(sessions: usize, seed: u64) -> Vec<(u64, ControllerInput)> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut inputs = Vec::with_capacity(sessions * 4);
    let mut now = 0u64;

    for _ in 0..sessions {
        let start = Position::new(rng.gen_range(0.0..1080.0), rng.gen_range(0.0..1920.0));
        now += 20;
        match rng.gen_range(0..4) {
            0 => {
                inputs.push((now, ControllerInput::Pointer(PointerEvent::down(start, 1, now))));
                now += 20;
                inputs.push((
                    now,
                    ControllerInput::Pointer(PointerEvent::up(start, now, Velocity::default())),
                ));
            }
            1 => {
                let dx = rng.gen_range(-400.0..400.0);
                let end = Position::new(start.x + dx, start.y + rng.gen_range(-40.0..40.0));
                inputs.push((now, ControllerInput::Pointer(PointerEvent::down(start, 1, now))));
                now += 20;
                inputs.push((
                    now,
                    ControllerInput::Pointer(PointerEvent::up(
                        end,
                        now,
                        Velocity::new(dx * 5.0, 0.0),
                    )),
                ));
            }
            2 => {
                inputs.push((now, ControllerInput::Pointer(PointerEvent::down(start, 2, now))));
                for _ in 0..4 {
                    now += 20;
                    let factor = rng.gen_range(0.9..1.1);
                    inputs.push((now, ControllerInput::Pinch { factor }));
                }
                now += 20;
                inputs.push((
                    now,
                    ControllerInput::Pointer(PointerEvent::up(start, now, Velocity::default())),
                ));
            }
            _ => {
                let angle = rng.gen_range(0.0..360.0);
                inputs.push((now, ControllerInput::OrientationSample { angle }));
            }
        }
    }
    inputs
}

fn active_controller(flags: ModeFlags) -> Controller {
    let mut controller = Controller::new(
        ControllerConfig::default(),
        ModeHandle::new(flags),
        Box::new(ForwardedSensor::default()),
        Box::new(EventCapture::default()),
    )
    .expect("default config is valid");
    controller
        .handle(
            ControllerInput::PreviewResized {
                width: 1080.0,
                height: 1920.0,
            },
            0,
        )
        .expect("resize");
    controller
        .handle(ControllerInput::Activate, 0)
        .expect("activate");
    controller
}

fn bench_gesture_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("gesture_dispatch");
    group.sample_size(20);
    group.measurement_time(Duration::from_secs(3));

    for sessions in [100usize, 1_000] {
        let stream = gesture_stream(sessions, 42);
        for (label, flags) in [
            ("camera", ModeFlags::default()),
            (
                "scanning",
                ModeFlags {
                    continuous_focus: true,
                    ..ModeFlags::default()
                },
            ),
        ] {
            group.bench_with_input(BenchmarkId::new(label, sessions), &stream, |b, stream| {
                b.iter(|| {
                    let mut controller = active_controller(flags);
                    let mut emitted = 0usize;
                    for (at, input) in stream.iter().cloned() {
                        emitted += controller.handle(input, at).map(|e| e.len()).unwrap_or(0);
                    }
                    black_box(emitted)
                })
            });
        }
    }

    group.finish();
}

fn bench_thumbnail_worker(c: &mut Criterion) {
    let rt = Runtime::new().expect("Failed to create runtime");
    let mut group = c.benchmark_group("thumbnail_worker");
    group.sample_size(10);
    group.measurement_time(Duration::from_secs(3));

    for distinct in [1usize, 32] {
        group.bench_with_input(
            BenchmarkId::new("decode_requests", distinct),
            &distinct,
            |b, &distinct| {
                b.to_async(&rt).iter(|| async move {
                    let (cmd_tx, cmd_rx) = mpsc::channel(8);
                    let (resp_tx, mut resp_rx) = mpsc::channel(8);
                    let worker = tokio::spawn(thumbnail_worker_loop(
                        cmd_rx,
                        resp_tx,
                        Arc::new(PlaceholderDecoder::default()),
                        16,
                    ));

                    for request_id in 0..64u64 {
                        let uri = format!("content://media/{}", request_id as usize % distinct);
                        cmd_tx
                            .send(ThumbnailCommand::Decode {
                                request_id,
                                item: MediaItem::new(uri, MediaKind::Image),
                                side: 96,
                            })
                            .await
                            .expect("worker alive");
                        black_box(resp_rx.recv().await);
                    }

                    let _ = cmd_tx.send(ThumbnailCommand::Shutdown).await;
                    let _ = worker.await;
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_gesture_dispatch, bench_thumbnail_worker);
criterion_main!(benches);
