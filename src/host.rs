//! Collaborator seams that must be established on activation.
//!
//! The orientation sensor is an owned subscription rather than a process-wide listener
//! registry: dropping the `SensorSubscription` is the teardown.

use crate::error::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Live orientation-sensor registration. Unregisters on drop.
#[derive(Debug)]
pub struct SensorSubscription {
    live: Arc<AtomicBool>,
}

/// Read side of a subscription, kept by the sensor provider to know whether to deliver.
#[derive(Debug, Clone)]
pub struct SubscriptionProbe {
    live: Arc<AtomicBool>,
}

impl SensorSubscription {
    pub fn new() -> (Self, SubscriptionProbe) {
        let live = Arc::new(AtomicBool::new(true));
        (
            Self {
                live: Arc::clone(&live),
            },
            SubscriptionProbe { live },
        )
    }
}

impl Drop for SensorSubscription {
    fn drop(&mut self) {
        self.live.store(false, Ordering::SeqCst);
    }
}

impl SubscriptionProbe {
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::SeqCst)
    }
}

/// Source of orientation-sensor subscriptions.
pub trait SensorProvider: Send {
    fn subscribe(&mut self) -> Result<SensorSubscription>;
}

/// Handle to the capture pipeline that focus, zoom and rotation requests target.
pub trait CaptureBinding: Send {
    fn bind(&mut self) -> Result<()>;
    fn release(&mut self);
}

/// Provider whose samples arrive through `ControllerInput::OrientationSample`; it only
/// tracks the latest subscription.
#[derive(Debug, Default)]
pub struct ForwardedSensor {
    probe: Option<SubscriptionProbe>,
}

impl ForwardedSensor {
    pub fn is_subscribed(&self) -> bool {
        self.probe.as_ref().is_some_and(SubscriptionProbe::is_live)
    }
}

impl SensorProvider for ForwardedSensor {
    fn subscribe(&mut self) -> Result<SensorSubscription> {
        let (subscription, probe) = SensorSubscription::new();
        self.probe = Some(probe);
        Ok(subscription)
    }
}

/// Capture binding for hosts that route every request through `ControllerEvent`s.
#[derive(Debug, Default)]
pub struct EventCapture {
    bound: bool,
}

impl EventCapture {
    pub fn is_bound(&self) -> bool {
        self.bound
    }
}

impl CaptureBinding for EventCapture {
    fn bind(&mut self) -> Result<()> {
        self.bound = true;
        Ok(())
    }

    fn release(&mut self) {
        self.bound = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropping_subscription_unregisters() {
        let mut sensor = ForwardedSensor::default();
        let subscription = sensor.subscribe().unwrap();
        assert!(sensor.is_subscribed());
        drop(subscription);
        assert!(!sensor.is_subscribed());
    }
}
