//! Tokio event loop driving a `Controller`.
//!
//! Host inputs, thumbnail-worker responses and controller timers are multiplexed on one
//! task, so every handler runs to completion before the next one starts.

use crate::app::Controller;
use crate::error::ViewfinderError;
use crate::protocol::{ControllerEvent, ControllerInput};
use crate::thumbnail::{thumbnail_worker_loop, ThumbnailCommand, ThumbnailDecoder};
use crate::time::Millis;
use log::{debug, info, warn};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError, Receiver, Sender, UnboundedSender};
use tokio::time::Instant;

/// Depth of the thumbnail worker's command and response queues.
const WORKER_QUEUE: usize = 8;

/// Drive `controller` until the input channel closes or nobody listens for events.
///
/// Activation failures are reported as `ControllerEvent::ActivationFailed` and the loop
/// keeps running so the host can retry. On exit the controller is deactivated, the
/// worker is shut down, and the controller is handed back.
pub async fn run_controller(
    mut controller: Controller,
    mut inputs: Receiver<ControllerInput>,
    events: UnboundedSender<ControllerEvent>,
    decoder: Arc<dyn ThumbnailDecoder>,
) -> Controller {
    let started = Instant::now();
    let (cmd_tx, cmd_rx) = mpsc::channel(WORKER_QUEUE);
    let (resp_tx, mut resp_rx) = mpsc::channel(WORKER_QUEUE);
    let worker = tokio::spawn(thumbnail_worker_loop(
        cmd_rx,
        resp_tx,
        decoder,
        controller.config().thumbnail_cache,
    ));
    info!("controller loop started");

    loop {
        let deadline = controller
            .next_deadline()
            .map(|ms| started + Duration::from_millis(ms));

        let batch = tokio::select! {
            input = inputs.recv() => match input {
                Some(input) => step(&mut controller, input, elapsed(started)),
                None => break,
            },
            Some(response) = resp_rx.recv() => {
                step(&mut controller, ControllerInput::ThumbnailDecoded(response), elapsed(started))
            }
            _ = sleep_until(deadline) => controller.advance(elapsed(started)),
        };

        if !dispatch(batch, &events, &cmd_tx) {
            debug!("event receiver dropped");
            break;
        }
    }

    let farewell = step(&mut controller, ControllerInput::Deactivate, elapsed(started));
    dispatch(farewell, &events, &cmd_tx);
    // Unblocks a worker stuck posting a response nobody will read
    drop(resp_rx);
    if cmd_tx.send(ThumbnailCommand::Shutdown).await.is_ok() {
        let _ = worker.await;
    }
    info!("controller loop stopped");
    controller
}

fn step(controller: &mut Controller, input: ControllerInput, now: Millis) -> Vec<ControllerEvent> {
    match controller.handle(input, now) {
        Ok(events) => events,
        Err(err) => vec![ControllerEvent::ActivationFailed {
            reason: err.to_string(),
        }],
    }
}

/// Forward events to the host, routing decode requests to the worker. Returns false
/// once the host stopped listening.
fn dispatch(
    batch: Vec<ControllerEvent>,
    events: &UnboundedSender<ControllerEvent>,
    worker: &Sender<ThumbnailCommand>,
) -> bool {
    for event in batch {
        if let ControllerEvent::ThumbnailDecodeRequested {
            request_id,
            item,
            side,
        } = &event
        {
            let command = ThumbnailCommand::Decode {
                request_id: *request_id,
                item: item.clone(),
                side: *side,
            };
            match worker.try_send(command) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!("thumbnail worker busy; dropping request #{request_id}");
                }
                Err(TrySendError::Closed(_)) => {
                    warn!(
                        "{}; dropping request #{request_id}",
                        ViewfinderError::WorkerUnavailable
                    );
                }
            }
        }
        if events.send(event).is_err() {
            return false;
        }
    }
    true
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

fn elapsed(started: Instant) -> Millis {
    Millis::try_from(started.elapsed().as_millis()).unwrap_or(Millis::MAX)
}
