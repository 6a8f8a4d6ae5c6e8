//! Test doubles for the host capabilities

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use super::animator::{AnimationSpec, TimingAnimator};
use super::metrics::MeasurableRegion;
use super::signal::OffsetSignal;
use crate::Result;

/// Region with a width the test can change between measurements
pub struct FixedRegion {
    width: Mutex<f64>,
    calls: AtomicU32,
}

impl FixedRegion {
    pub fn new(width: f64) -> Arc<Self> {
        Arc::new(Self {
            width: Mutex::new(width),
            calls: AtomicU32::new(0),
        })
    }

    pub fn shared(width: f64) -> Arc<dyn MeasurableRegion> {
        Self::new(width)
    }

    pub fn set_width(&self, width: f64) {
        *self.width.lock().unwrap() = width;
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl MeasurableRegion for FixedRegion {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn measure_width(&self) -> Result<f64> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(*self.width.lock().unwrap())
    }
}

/// Region whose host call always errors
pub struct FailingRegion;

impl FailingRegion {
    pub fn shared() -> Arc<dyn MeasurableRegion> {
        Arc::new(Self)
    }
}

#[async_trait::async_trait]
impl MeasurableRegion for FailingRegion {
    fn name(&self) -> &str {
        "failing"
    }

    async fn measure_width(&self) -> Result<f64> {
        Err(crate::Error::measurement("failing", "not laid out"))
    }
}

/// One leg requested from [`RecordingAnimator`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leg {
    pub to: f64,
    pub duration: Duration,
}

/// Animator that records every leg and completes after its duration
///
/// The target is written once at the end, only if the leg still owns the signal.
pub struct RecordingAnimator {
    legs_tx: mpsc::UnboundedSender<Leg>,
    legs: Mutex<Vec<Leg>>,
    cancels: AtomicU32,
}

impl RecordingAnimator {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<Leg>) {
        let (legs_tx, rx) = mpsc::unbounded_channel();
        let animator = Arc::new(Self {
            legs_tx,
            legs: Mutex::new(Vec::new()),
            cancels: AtomicU32::new(0),
        });
        (animator, rx)
    }

    pub fn legs(&self) -> Vec<Leg> {
        self.legs.lock().unwrap().clone()
    }

    pub fn cancels(&self) -> u32 {
        self.cancels.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TimingAnimator for RecordingAnimator {
    async fn animate(&self, signal: &OffsetSignal, to: f64, spec: AnimationSpec) -> bool {
        let claim = signal.claim();
        let leg = Leg {
            to,
            duration: spec.duration,
        };
        self.legs.lock().unwrap().push(leg);
        let _ = self.legs_tx.send(leg);

        tokio::time::sleep(spec.duration).await;
        signal.write_claimed(claim, to)
    }

    fn cancel(&self, signal: &OffsetSignal) {
        self.cancels.fetch_add(1, Ordering::SeqCst);
        signal.supersede();
    }
}
