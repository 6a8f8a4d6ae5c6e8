//! L2 Organism Layer: Manual scroll interruption
//!
//! A manual scroll pauses automatic animation and rewinds the offset. Every
//! further scroll pushes the debounce deadline out; once the user has been
//! quiet for `restart_delay_ms` the ticker resumes on its own.

use std::sync::Arc;

use tracing::debug;

use super::config::TickerConfigExt;
use super::controller::{Shared, TickerEvent};
use super::timers::TimerSlot;

impl Shared {
    pub(super) fn on_user_scroll(self: &Arc<Self>) {
        if !self.is_alive() {
            return;
        }

        self.timers.cancel(TimerSlot::Settle);
        self.timers.cancel(TimerSlot::Start);

        let (restart_delay, cancel_in_flight) = {
            let mut record = self.record();
            if !record.state.is_user_scrolling {
                record.emit(TickerEvent::UserScrollStarted);
                debug!("Manual scroll interrupted the ticker");
            }
            record.state.is_user_scrolling = true;
            record.state.animating = false;
            (record.config.restart_delay(), record.config.cancel_in_flight)
        };

        if cancel_in_flight {
            self.cancel_in_flight();
        }
        self.signal.set(0.0);

        let shared = Arc::clone(self);
        self.timers.arm(TimerSlot::ScrollDebounce, restart_delay, async move {
            shared.resume_after_scroll();
        });
    }

    /// Debounce expiry: hand control back to automatic animation
    pub(super) fn resume_after_scroll(self: &Arc<Self>) {
        let delay = {
            let mut record = self.record();
            if !record.alive {
                return;
            }
            record.state.is_user_scrolling = false;
            record.emit(TickerEvent::AutoResumed);
            record.config.start_delay()
        };

        debug!("Resuming ticker after manual scroll");
        self.start(delay);
    }
}
