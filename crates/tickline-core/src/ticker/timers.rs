//! L3 Molecular Layer: Named single-occupant timer slots
//!
//! Each slot holds at most one scheduled callback. Arming a slot aborts its
//! previous occupant first, so callbacks in one slot never overlap. Cancelling
//! only removes work that has not finished yet; the callbacks themselves are
//! responsible for checking controller liveness before touching state.

use std::future::Future;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use tokio::task::AbortHandle;
use tokio::time::Instant;
use tracing::trace;

/// The controller's timer slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerSlot {
    /// Wait of `start_delay` before the next animation pass
    Settle,
    /// Layout settle before measuring in `start`
    Start,
    /// A running scroll pass
    Scroll,
    /// A running bounce pass
    Bounce,
    /// Quiet period after the last manual scroll
    ScrollDebounce,
}

impl TimerSlot {
    pub const ALL: [TimerSlot; 5] = [
        TimerSlot::Settle,
        TimerSlot::Start,
        TimerSlot::Scroll,
        TimerSlot::Bounce,
        TimerSlot::ScrollDebounce,
    ];

    #[inline]
    fn index(self) -> usize {
        match self {
            TimerSlot::Settle => 0,
            TimerSlot::Start => 1,
            TimerSlot::Scroll => 2,
            TimerSlot::Bounce => 3,
            TimerSlot::ScrollDebounce => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimerSlot::Settle => "settle",
            TimerSlot::Start => "start",
            TimerSlot::Scroll => "scroll",
            TimerSlot::Bounce => "bounce",
            TimerSlot::ScrollDebounce => "scroll_debounce",
        }
    }
}

#[derive(Debug, Default)]
pub struct TimerRegistry {
    slots: Mutex<[Option<AbortHandle>; 5]>,
}

impl TimerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay` in `slot`, cancelling the slot's previous occupant
    ///
    /// Must be called from within a tokio runtime.
    pub fn arm<F>(&self, slot: TimerSlot, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut slots = self.lock();
        if let Some(previous) = slots[slot.index()].take() {
            previous.abort();
        }

        trace!(slot = slot.as_str(), delay_ms = delay.as_millis() as u64, "Arming timer");
        let deadline = Instant::now() + delay;
        let handle = tokio::spawn(async move {
            if !delay.is_zero() {
                tokio::time::sleep_until(deadline).await;
            }
            task.await;
        });
        slots[slot.index()] = Some(handle.abort_handle());
    }

    /// Remove the slot's occupant if it has not completed yet
    pub fn cancel(&self, slot: TimerSlot) {
        if let Some(handle) = self.lock()[slot.index()].take() {
            if !handle.is_finished() {
                trace!(slot = slot.as_str(), "Cancelling timer");
            }
            handle.abort();
        }
    }

    /// Whether the slot holds a callback that has not completed
    pub fn is_pending(&self, slot: TimerSlot) -> bool {
        self.lock()[slot.index()]
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Cancel every slot
    pub fn clear_all(&self) {
        for slot in TimerSlot::ALL {
            self.cancel(slot);
        }
    }

    fn lock(&self) -> MutexGuard<'_, [Option<AbortHandle>; 5]> {
        self.slots
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Drop for TimerRegistry {
    fn drop(&mut self) {
        self.clear_all();
    }
}
