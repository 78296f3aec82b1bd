use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration, Instant};

use viewfinder::focus::FocusOrigin;
use viewfinder::host::{EventCapture, SensorProvider, SensorSubscription};
use viewfinder::thumbnail::{MediaItem, MediaKind, PlaceholderDecoder};
use viewfinder::{
    run_controller, Controller, ControllerConfig, ControllerEvent, ControllerInput, ModeFlags,
    ModeHandle, Result, ViewfinderError,
};

const TIMEOUT_MS: u64 = 10_000;

/// Fails the first `failures` subscriptions.
struct FlakySensor {
    failures: usize,
}

impl SensorProvider for FlakySensor {
    fn subscribe(&mut self) -> Result<SensorSubscription> {
        if self.failures > 0 {
            self.failures -= 1;
            return Err(ViewfinderError::sensor("rotation sensor busy"));
        }
        Ok(SensorSubscription::new().0)
    }
}

struct Harness {
    inputs: mpsc::Sender<ControllerInput>,
    events: mpsc::UnboundedReceiver<ControllerEvent>,
    runtime: tokio::task::JoinHandle<Controller>,
}

impl Harness {
    fn start(flags: ModeFlags, sensor_failures: usize) -> Self {
        let controller = Controller::new(
            ControllerConfig::default(),
            ModeHandle::new(flags),
            Box::new(FlakySensor {
                failures: sensor_failures,
            }),
            Box::new(EventCapture::default()),
        )
        .expect("default config is valid");

        let (inputs, input_rx) = mpsc::channel(8);
        let (event_tx, events) = mpsc::unbounded_channel();
        let runtime = tokio::spawn(run_controller(
            controller,
            input_rx,
            event_tx,
            Arc::new(PlaceholderDecoder::default()),
        ));
        Self {
            inputs,
            events,
            runtime,
        }
    }

    async fn send(&self, input: ControllerInput) {
        self.inputs.send(input).await.expect("controller loop alive");
    }

    async fn next_event(&mut self) -> ControllerEvent {
        timeout(Duration::from_millis(TIMEOUT_MS), self.events.recv())
            .await
            .expect("controller event timed out")
            .expect("event channel closed unexpectedly")
    }

    /// Skip events until one matches.
    async fn wait_for(&mut self, matches: impl Fn(&ControllerEvent) -> bool) -> ControllerEvent {
        loop {
            let event = self.next_event().await;
            if matches(&event) {
                return event;
            }
        }
    }

    async fn stop(self) -> (Controller, Vec<ControllerEvent>) {
        let Harness {
            inputs,
            mut events,
            runtime,
        } = self;
        drop(inputs);
        let controller = timeout(Duration::from_millis(TIMEOUT_MS), runtime)
            .await
            .expect("controller loop did not stop")
            .expect("controller loop panicked");

        let mut rest = Vec::new();
        while let Ok(event) = events.try_recv() {
            rest.push(event);
        }
        (controller, rest)
    }
}

#[tokio::test(start_paused = true)]
async fn recenter_timer_fires_on_schedule() {
    let mut harness = Harness::start(
        ModeFlags {
            continuous_focus: true,
            ..ModeFlags::default()
        },
        0,
    );
    let started = Instant::now();
    harness.send(ControllerInput::Activate).await;

    let event = harness
        .wait_for(|event| matches!(event, ControllerEvent::FocusRequested { .. }))
        .await;

    assert!(matches!(
        event,
        ControllerEvent::FocusRequested {
            origin: FocusOrigin::Recenter,
            ..
        }
    ));
    assert!(started.elapsed() >= Duration::from_millis(2000));

    let (controller, _) = harness.stop().await;
    assert!(!controller.is_active());
}

#[tokio::test(start_paused = true)]
async fn thumbnail_decode_round_trips_through_worker() {
    let mut harness = Harness::start(ModeFlags::default(), 0);
    harness.send(ControllerInput::Activate).await;

    let item = MediaItem::new("content://media/42", MediaKind::Image);
    harness
        .send(ControllerInput::ShowThumbnail(Some(item.clone())))
        .await;

    assert_eq!(harness.next_event().await, ControllerEvent::ThumbnailCleared);
    let updated = harness
        .wait_for(|event| matches!(event, ControllerEvent::ThumbnailUpdated { .. }))
        .await;
    match updated {
        ControllerEvent::ThumbnailUpdated {
            item: shown,
            thumbnail,
        } => {
            assert_eq!(shown, item);
            assert_eq!((thumbnail.width, thumbnail.height), (96, 54));
        }
        other => panic!("unexpected event {other:?}"),
    }

    let (controller, _) = harness.stop().await;
    assert_eq!(controller.thumbnail().current(), Some(&item));
}

#[tokio::test(start_paused = true)]
async fn activation_failure_is_reported_and_retry_succeeds() {
    let mut harness = Harness::start(ModeFlags::default(), 1);

    harness.send(ControllerInput::Activate).await;
    match harness.next_event().await {
        ControllerEvent::ActivationFailed { reason } => {
            assert!(reason.contains("rotation sensor busy"));
        }
        other => panic!("unexpected event {other:?}"),
    }

    harness.send(ControllerInput::Activate).await;
    assert_eq!(harness.next_event().await, ControllerEvent::ThumbnailCleared);

    let (controller, _) = harness.stop().await;
    assert!(!controller.is_active());
}

#[tokio::test(start_paused = true)]
async fn closing_inputs_stops_an_active_recording() {
    let mut harness = Harness::start(
        ModeFlags {
            recording: true,
            ..ModeFlags::default()
        },
        0,
    );
    harness.send(ControllerInput::Activate).await;
    assert_eq!(harness.next_event().await, ControllerEvent::ThumbnailCleared);

    let (controller, rest) = harness.stop().await;
    assert_eq!(rest, vec![ControllerEvent::RecordingStopRequested]);
    assert_eq!(controller.next_deadline(), None);
}
