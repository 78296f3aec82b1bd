//! Controller orchestration layer
//!
//! `Controller` owns every component and is the only thing the host talks to. All
//! inputs go through `Controller::handle`, which runs to completion before the next
//! input is processed; timers fire from `Controller::advance` in deadline order.

pub mod runtime;

use crate::config::ControllerConfig;
use crate::error::Result;
use crate::focus::{FocusController, FocusOrigin, FocusPoint, FocusRing, PreviewGeometry};
use crate::gesture::{GestureArbiter, GestureOutcome, GestureThresholds};
use crate::host::{CaptureBinding, SensorProvider, SensorSubscription};
use crate::input::{HardwareKey, KeyPhase, Position};
use crate::modes::{ModeFlags, ModeHandle};
use crate::orientation::{LevelIndicator, OrientationNormalizer};
use crate::protocol::{ControllerEvent, ControllerInput};
use crate::swipe::{ModeCarousel, SwipeGate, SwipeRouter};
use crate::thumbnail::ThumbnailSlot;
use crate::time::Millis;
use crate::zoom::{ZoomBounds, ZoomController};
use log::{debug, error, info};

/// Interaction controller for one preview surface.
pub struct Controller {
    config: ControllerConfig,
    modes: ModeHandle,
    /// Flags as of the last sync, for edge detection
    seen: ModeFlags,
    sensors: Box<dyn SensorProvider>,
    capture: Box<dyn CaptureBinding>,
    subscription: Option<SensorSubscription>,
    active: bool,
    preview: PreviewGeometry,
    arbiter: GestureArbiter,
    focus: FocusController,
    ring: FocusRing,
    zoom: ZoomController,
    router: SwipeRouter,
    orientation: OrientationNormalizer,
    level: LevelIndicator,
    thumbnail: ThumbnailSlot,
}

impl Controller {
    pub fn new(
        config: ControllerConfig,
        modes: ModeHandle,
        sensors: Box<dyn SensorProvider>,
        capture: Box<dyn CaptureBinding>,
    ) -> Result<Self> {
        config.validate()?;
        let seen = modes.snapshot();

        Ok(Self {
            arbiter: GestureArbiter::new(GestureThresholds::from_config(&config)),
            focus: FocusController::new(config.recenter_interval),
            ring: FocusRing::new(config.focus_ring_delay, config.focus_ring_fade),
            zoom: ZoomController::new(ZoomBounds::default()),
            router: SwipeRouter::new(ModeCarousel::new(
                config.modes.clone(),
                config.initial_mode,
            )),
            orientation: OrientationNormalizer::new(config.rotation_transition),
            level: LevelIndicator::new(),
            thumbnail: ThumbnailSlot::new(config.thumbnail_side),
            preview: PreviewGeometry::default(),
            subscription: None,
            active: false,
            config,
            modes,
            seen,
            sensors,
            capture,
        })
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn modes(&self) -> &ModeHandle {
        &self.modes
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn arbiter(&self) -> &GestureArbiter {
        &self.arbiter
    }

    pub fn focus(&self) -> &FocusController {
        &self.focus
    }

    pub fn zoom(&self) -> &ZoomController {
        &self.zoom
    }

    pub fn router(&self) -> &SwipeRouter {
        &self.router
    }

    pub fn orientation(&self) -> &OrientationNormalizer {
        &self.orientation
    }

    pub fn thumbnail(&self) -> &ThumbnailSlot {
        &self.thumbnail
    }

    /// Earliest pending timer across all components.
    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.focus.next_deadline(), self.ring.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fire every timer due at `now`.
    pub fn advance(&mut self, now: Millis) -> Vec<ControllerEvent> {
        let mut out = Vec::new();
        self.advance_into(now, &mut out);
        out
    }

    /// Single arbitration entry point for every host input.
    ///
    /// Only `Activate` can fail; everything else degrades to a no-op.
    pub fn handle(&mut self, input: ControllerInput, now: Millis) -> Result<Vec<ControllerEvent>> {
        let mut out = Vec::new();
        self.advance_into(now, &mut out);
        let flags = self.seen;

        match input {
            ControllerInput::Activate => self.activate(now, &mut out)?,
            ControllerInput::Deactivate => self.deactivate(now, &mut out),
            ControllerInput::Pointer(event) => {
                if self.active {
                    let outcome = self.arbiter.handle_pointer(event);
                    self.dispatch_outcome(outcome, &flags, now, &mut out);
                } else {
                    debug!("pointer {:?} while inactive ignored", event.phase);
                }
            }
            ControllerInput::Pinch { factor } => {
                if self.active {
                    let was_zooming = self.arbiter.is_zooming();
                    let outcome = self.arbiter.on_scale(factor);
                    if !was_zooming && self.arbiter.is_zooming() {
                        self.zoom.on_zoom_begin();
                    }
                    self.dispatch_outcome(outcome, &flags, now, &mut out);
                }
            }
            ControllerInput::OrientationSample { angle } => {
                if self.subscription.is_some() {
                    self.orientation.on_sample(angle, &flags, now, &mut out);
                }
            }
            ControllerInput::DeviceTilt { x_angle, z_angle } => {
                if self.subscription.is_some() {
                    self.level.on_tilt(x_angle, z_angle, &flags, &mut out);
                }
            }
            ControllerInput::Key { key, phase } => self.on_key(key, phase, &flags, &mut out),
            ControllerInput::PreviewResized { width, height } => {
                self.preview = PreviewGeometry::new(width, height);
            }
            ControllerInput::ZoomBoundsChanged { min, max } => {
                self.zoom.set_bounds(ZoomBounds::new(min, max));
            }
            ControllerInput::ZoomRatioReported { ratio } => self.zoom.observe_ratio(ratio),
            ControllerInput::FocusAt { point, auto_cancel } => {
                if self.active {
                    out.push(self.focus.request_focus(
                        point,
                        auto_cancel,
                        FocusOrigin::Manual,
                        now,
                    ));
                }
            }
            ControllerInput::SelectMode(index) => out.extend(self.router.select_mode(index)),
            // Already picked up by the sync in `advance_into`
            ControllerInput::ModesChanged => {}
            ControllerInput::ShowThumbnail(item) => {
                self.thumbnail.show(item, self.active, &mut out);
            }
            ControllerInput::ThumbnailDecoded(response) => {
                self.thumbnail.apply(response, self.active, &mut out);
            }
        }

        Ok(out)
    }

    fn activate(&mut self, now: Millis, out: &mut Vec<ControllerEvent>) -> Result<()> {
        if self.active {
            return Ok(());
        }

        let subscription = self.sensors.subscribe().map_err(|err| {
            error!("activation failed: {err}");
            err
        })?;
        if let Err(err) = self.capture.bind() {
            error!("activation failed: {err}");
            return Err(err);
        }

        self.subscription = Some(subscription);
        self.active = true;
        self.seen = self.modes.snapshot();
        if self.seen.continuous_focus {
            self.focus.start_auto_recenter(now);
        }
        self.thumbnail.refresh(true, out);
        info!("controller activated at {now}");
        Ok(())
    }

    fn deactivate(&mut self, now: Millis, out: &mut Vec<ControllerEvent>) {
        if !self.active {
            return;
        }

        if self.seen.recording {
            out.push(ControllerEvent::RecordingStopRequested);
        }
        self.focus.shutdown();
        out.extend(self.ring.dismiss());
        self.arbiter.reset();
        self.orientation.cancel_transitions(now);
        self.level.reset();
        self.subscription = None;
        self.capture.release();
        self.active = false;
        info!("controller deactivated at {now}");
    }

    fn advance_into(&mut self, now: Millis, out: &mut Vec<ControllerEvent>) {
        self.sync_modes(now, out);
        if !self.active {
            return;
        }

        let ring_first = match (self.ring.next_deadline(), self.focus.next_deadline()) {
            (Some(ring), Some(focus)) => ring <= focus,
            _ => true,
        };
        if ring_first {
            out.extend(self.ring.advance(now));
            self.focus.advance(now, out);
        } else {
            self.focus.advance(now, out);
            out.extend(self.ring.advance(now));
        }
    }

    /// Pick up flag changes made by collaborators since the last handler.
    fn sync_modes(&mut self, now: Millis, out: &mut Vec<ControllerEvent>) {
        let flags = self.modes.snapshot();
        let previous = std::mem::replace(&mut self.seen, flags);
        if !self.active {
            return;
        }

        match (previous.continuous_focus, flags.continuous_focus) {
            (false, true) => self.focus.start_auto_recenter(now),
            (true, false) => self.focus.cancel_auto_recenter(),
            _ => {}
        }
        if previous.recording && !flags.recording {
            self.orientation.resync(&flags, now, out);
        }
    }

    fn dispatch_outcome(
        &mut self,
        outcome: GestureOutcome,
        flags: &ModeFlags,
        now: Millis,
        out: &mut Vec<ControllerEvent>,
    ) {
        match outcome {
            GestureOutcome::ZoomDelta(factor) => out.extend(self.zoom.on_zoom_delta(factor)),
            GestureOutcome::Tap(position) => self.on_tap(position, flags, now, out),
            GestureOutcome::DoubleTap(position) => {
                debug!("double tap at {position:?} has no action");
            }
            GestureOutcome::Swipe(direction) => {
                let gate = SwipeGate::new(flags, self.arbiter.is_zooming());
                out.extend(self.router.route(direction, gate, flags));
            }
            GestureOutcome::Pending | GestureOutcome::ZoomEnded | GestureOutcome::Cancelled => {}
        }
    }

    fn on_tap(
        &mut self,
        position: Position,
        flags: &ModeFlags,
        now: Millis,
        out: &mut Vec<ControllerEvent>,
    ) {
        let point = FocusPoint::from_position(position, self.preview);
        out.push(self.ring.show(position, flags.animations_enabled, now));
        if !flags.video_mode {
            out.push(ControllerEvent::FocusSoundRequested);
        }
        out.push(self.focus.request_focus(
            point,
            self.config.focus_auto_cancel,
            FocusOrigin::Tap,
            now,
        ));
        out.push(ControllerEvent::AdjustmentPanelsShown);
    }

    fn on_key(
        &mut self,
        key: HardwareKey,
        phase: KeyPhase,
        flags: &ModeFlags,
        out: &mut Vec<ControllerEvent>,
    ) {
        if !self.active {
            return;
        }
        match (key, phase) {
            (HardwareKey::VolumeUp | HardwareKey::VolumeDown, KeyPhase::Up)
                if !flags.continuous_focus =>
            {
                out.push(ControllerEvent::CaptureRequested);
            }
            // Swallowed so the system volume bar does not appear
            _ => {}
        }
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        if self.active {
            self.focus.shutdown();
            self.subscription = None;
            self.capture.release();
        }
    }
}
