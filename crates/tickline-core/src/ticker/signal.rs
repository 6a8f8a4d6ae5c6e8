//! L4 Atomic Layer: The offset signal observed by the presentation layer
//!
//! A `watch` channel carrying the current horizontal translation, plus an
//! ownership generation. Every direct write bumps the generation, and so does
//! every animation that claims the signal; an animation may only write while
//! its claim is still current. That is how a reset supersedes an animation
//! already in flight without aborting it.

use std::sync::Mutex;

use tokio::sync::watch;

/// Proof that an animation currently owns the signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalClaim(u64);

#[derive(Debug)]
pub struct OffsetSignal {
    tx: watch::Sender<f64>,
    generation: Mutex<u64>,
}

impl Default for OffsetSignal {
    fn default() -> Self {
        Self::new()
    }
}

impl OffsetSignal {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(0.0);
        Self {
            tx,
            generation: Mutex::new(0),
        }
    }

    /// Current offset
    #[inline]
    pub fn get(&self) -> f64 {
        *self.tx.borrow()
    }

    /// Receiver notified on every published value
    pub fn subscribe(&self) -> watch::Receiver<f64> {
        self.tx.subscribe()
    }

    /// Write a value directly, superseding any animation in flight
    pub fn set(&self, value: f64) {
        let mut generation = self.lock();
        *generation += 1;
        self.tx.send_replace(value);
    }

    /// Supersede any animation in flight without touching the value
    pub fn supersede(&self) {
        *self.lock() += 1;
    }

    /// Take ownership for a new animation, superseding the previous owner
    pub fn claim(&self) -> SignalClaim {
        let mut generation = self.lock();
        *generation += 1;
        SignalClaim(*generation)
    }

    /// Whether `claim` still owns the signal
    pub fn is_current(&self, claim: SignalClaim) -> bool {
        *self.lock() == claim.0
    }

    /// Publish `value` if `claim` still owns the signal
    ///
    /// Returns `false` when the animation has been superseded.
    pub fn write_claimed(&self, claim: SignalClaim, value: f64) -> bool {
        let generation = self.lock();
        if *generation != claim.0 {
            return false;
        }
        self.tx.send_replace(value);
        true
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, u64> {
        self.generation
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
