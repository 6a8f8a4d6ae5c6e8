//! L2 Organism Layer: Animation driver
//!
//! `start` settles layout, measures, selects a mode and launches the matching
//! pass. Passes chain through the timer slots: the settle slot waits out the
//! start delay, then the scroll or bounce slot runs one pass, whose completion
//! schedules the next one while looping.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace};

use super::animator::AnimationSpec;
use super::config::{TickerConfig, TickerConfigExt};
use super::controller::{Shared, TickerEvent};
use super::metrics::Metrics;
use super::mode::AnimationMode;
use super::timers::TimerSlot;
use super::timing::leg_duration;

/// Layout settle time between `start` and measuring
pub const SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Scroll target: the loop copy lands where the primary copy started
pub fn scroll_target(metrics: &Metrics, config: &TickerConfig) -> f64 {
    -(metrics.content_width + config.repeat_spacer)
}

/// Bounce targets: past the far edge, then slightly past the near edge
pub fn bounce_targets(metrics: &Metrics, config: &TickerConfig) -> [f64; 2] {
    [
        -(metrics.distance() + config.bounce_padding.left),
        config.bounce_padding.right,
    ]
}

/// One planned pass
#[derive(Debug)]
struct Pass {
    targets: Vec<f64>,
    spec: AnimationSpec,
}

impl Shared {
    pub(super) fn start(self: &Arc<Self>, delay: Duration) {
        {
            let mut record = self.record();
            if !record.alive {
                return;
            }
            if record.config.disabled {
                debug!("Ticker disabled, not starting");
                return;
            }
            if record.state.animating {
                return;
            }
            // The debounce restarts the ticker once manual scrolling ends
            if record.state.is_user_scrolling {
                debug!("Manual scroll in progress, not starting");
                return;
            }
            record.state.animating = true;
        }

        debug!(delay_ms = delay.as_millis() as u64, "Starting ticker");
        let shared = Arc::clone(self);
        self.timers.arm(TimerSlot::Start, SETTLE_DELAY, async move {
            shared.settle_and_launch(delay).await;
        });
    }

    async fn settle_and_launch(self: Arc<Self>, delay: Duration) {
        self.measure().await;

        let mode = {
            let mut record = self.record();
            if !record.alive {
                return;
            }
            if !record.may_animate() {
                record.state.animating = false;
                return;
            }
            if record.mode == AnimationMode::None {
                record.state.animating = false;
                debug!("Ticker content fits, nothing to animate");
                return;
            }
            let mode = record.mode;
            record.emit(TickerEvent::AnimationStarted { mode });
            mode
        };

        self.schedule_pass(mode, delay);
    }

    fn schedule_pass(self: &Arc<Self>, mode: AnimationMode, delay: Duration) {
        let shared = Arc::clone(self);
        self.timers.arm(TimerSlot::Settle, delay, async move {
            shared.launch_pass(mode);
        });
    }

    fn launch_pass(self: &Arc<Self>, mode: AnimationMode) {
        let shared = Arc::clone(self);
        match mode {
            AnimationMode::Scroll => self.timers.arm(TimerSlot::Scroll, Duration::ZERO, async move {
                shared.animate_scroll().await;
            }),
            AnimationMode::Bounce => self.timers.arm(TimerSlot::Bounce, Duration::ZERO, async move {
                shared.animate_bounce().await;
            }),
            AnimationMode::None => {}
        }
    }

    async fn animate_scroll(self: Arc<Self>) {
        let Some(pass) = self.plan_pass(AnimationMode::Scroll) else {
            return;
        };
        trace!(to = pass.targets[0], duration_ms = pass.spec.duration.as_millis() as u64, "Scroll pass");

        let finished = self
            .animator
            .animate(&self.signal, pass.targets[0], pass.spec)
            .await;
        self.finish_pass(AnimationMode::Scroll, finished);
    }

    async fn animate_bounce(self: Arc<Self>) {
        let Some(pass) = self.plan_pass(AnimationMode::Bounce) else {
            return;
        };
        trace!(targets = ?pass.targets, duration_ms = pass.spec.duration.as_millis() as u64, "Bounce pass");

        let finished = self
            .animator
            .sequence(&self.signal, &pass.targets, pass.spec)
            .await;
        self.finish_pass(AnimationMode::Bounce, finished);
    }

    /// Targets and timing for the next pass from the latest metrics
    ///
    /// Hands over to the right pass (or stops) when a re-measurement changed
    /// the mode since this pass was scheduled.
    fn plan_pass(self: &Arc<Self>, expected: AnimationMode) -> Option<Pass> {
        let record = self.record();
        if !record.may_animate() {
            return None;
        }
        let metrics = record.metrics?;

        if record.mode != expected {
            let mode = record.mode;
            drop(record);
            debug!(from = expected.as_str(), to = mode.as_str(), "Ticker mode changed between passes");
            match mode {
                AnimationMode::None => self.stop(),
                AnimationMode::Scroll => {
                    self.signal.set(0.0);
                    self.launch_pass(mode);
                }
                AnimationMode::Bounce => self.launch_pass(mode),
            }
            return None;
        }

        let config = &record.config;
        let spec = AnimationSpec {
            duration: leg_duration(config, expected, record.segments, metrics.content_width),
            easing: config.easing,
            accelerated: config.use_accelerated_animation,
        };
        let targets = match expected {
            AnimationMode::Scroll => vec![scroll_target(&metrics, config)],
            AnimationMode::Bounce => bounce_targets(&metrics, config).to_vec(),
            AnimationMode::None => return None,
        };

        Some(Pass { targets, spec })
    }

    /// Completion of one pass
    ///
    /// Superseded passes end the chain; completed ones loop or wind down.
    pub(super) fn finish_pass(self: &Arc<Self>, mode: AnimationMode, finished: bool) {
        let mut record = self.record();
        if !record.alive {
            return;
        }
        if !finished {
            debug!(mode = mode.as_str(), "Ticker pass superseded");
            return;
        }

        record.emit(TickerEvent::CycleCompleted { mode });
        if !record.may_animate() {
            return;
        }

        if !record.config.looping {
            record.state.animating = false;
            drop(record);
            self.signal.set(0.0);
            debug!(mode = mode.as_str(), "Ticker finished its only pass");
            return;
        }

        let delay = record.config.start_delay();
        let next = record.mode;
        drop(record);

        // Every scroll pass runs from 0
        if mode == AnimationMode::Scroll || next == AnimationMode::Scroll {
            self.signal.set(0.0);
        }
        match next {
            AnimationMode::None => self.stop(),
            next => self.schedule_pass(next, delay),
        }
    }

    pub(super) fn stop(self: &Arc<Self>) {
        let cancel_in_flight = {
            let mut record = self.record();
            if !record.alive {
                return;
            }
            record.state.animating = false;
            record.state.should_bounce = false;
            record.state.is_user_scrolling = false;
            record.config.cancel_in_flight
        };

        self.timers.cancel(TimerSlot::Start);
        self.timers.cancel(TimerSlot::Settle);
        // An explicit stop is not undone by a pending restart
        self.timers.cancel(TimerSlot::ScrollDebounce);
        if cancel_in_flight {
            self.cancel_in_flight();
        }
        self.signal.set(0.0);
        self.emit(TickerEvent::Stopped);
        debug!("Ticker stopped");
    }

    /// Close the supersession race through the animator's cancel hook
    pub(super) fn cancel_in_flight(&self) {
        self.animator.cancel(&self.signal);
        self.timers.cancel(TimerSlot::Scroll);
        self.timers.cancel(TimerSlot::Bounce);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BouncePadding;

    #[test]
    fn test_scroll_target() {
        let metrics = Metrics::new(100.0, 300.0);
        assert_eq!(scroll_target(&metrics, &TickerConfig::default()), -350.0);

        let config = TickerConfig {
            repeat_spacer: 0.0,
            ..Default::default()
        };
        assert_eq!(scroll_target(&metrics, &config), -300.0);
    }

    #[test]
    fn test_bounce_targets() {
        let metrics = Metrics::new(100.0, 110.0);
        assert_eq!(bounce_targets(&metrics, &TickerConfig::default()), [-20.0, 10.0]);

        let config = TickerConfig {
            bounce_padding: BouncePadding {
                left: 0.0,
                right: 4.0,
            },
            ..Default::default()
        };
        assert_eq!(bounce_targets(&metrics, &config), [-10.0, 4.0]);
    }
}
