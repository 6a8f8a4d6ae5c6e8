//! L3 Molecular Layer: Timing animators
//!
//! [`TimingAnimator`] is the host capability that interpolates the offset
//! signal. [`TickAnimator`] is a frame-based implementation on the tokio clock
//! built from the easing and timing atoms.

use std::time::Duration;

use tokio::time::{Instant, MissedTickBehavior};

use super::easing::{EasingType, EasingTypeExt};
use super::signal::OffsetSignal;
use super::timing::{lerp, progress};

/// Parameters of one animation leg
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration: Duration,
    pub easing: EasingType,
    /// Prefer the animator's low-overhead path
    pub accelerated: bool,
}

/// Host capability: interpolate the offset signal towards a target
#[async_trait::async_trait]
pub trait TimingAnimator: Send + Sync {
    /// Animate `signal` to `to`
    ///
    /// Resolves to `true` when the leg ran to completion and `false` when it
    /// was superseded by a direct write or a newer animation.
    async fn animate(&self, signal: &OffsetSignal, to: f64, spec: AnimationSpec) -> bool;

    /// Run legs back to back, stopping at the first superseded one
    async fn sequence(&self, signal: &OffsetSignal, targets: &[f64], spec: AnimationSpec) -> bool {
        for &to in targets {
            if !self.animate(signal, to, spec).await {
                return false;
            }
        }
        true
    }

    /// Hook invoked before stopping when `cancel_in_flight` is configured
    ///
    /// The default relies on supersession alone.
    fn cancel(&self, signal: &OffsetSignal) {
        let _ = signal;
    }
}

/// Offset changes smaller than this are not published on the accelerated path
const SUBPIXEL_STEP: f64 = 0.5;

/// Frame-based animator driven by `tokio::time::interval`
#[derive(Debug, Clone)]
pub struct TickAnimator {
    frame: Duration,
}

impl Default for TickAnimator {
    fn default() -> Self {
        Self::new(60)
    }
}

impl TickAnimator {
    pub fn new(fps: u32) -> Self {
        let frame = if fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / fps as u64).max(1))
        };
        Self { frame }
    }

    pub fn frame_duration(&self) -> Duration {
        self.frame
    }
}

#[async_trait::async_trait]
impl TimingAnimator for TickAnimator {
    async fn animate(&self, signal: &OffsetSignal, to: f64, spec: AnimationSpec) -> bool {
        let claim = signal.claim();
        let from = signal.get();

        if spec.duration.is_zero() {
            return signal.write_claimed(claim, to);
        }

        let start = Instant::now();
        let mut frames = tokio::time::interval(self.frame);
        frames.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let mut published = from;

        loop {
            frames.tick().await;

            let t = progress(start, spec.duration);
            let done = t >= 1.0;
            let value = if done {
                to
            } else {
                lerp(from, to, spec.easing.apply(t))
            };

            let skip = spec.accelerated && !done && (value - published).abs() < SUBPIXEL_STEP;
            if skip {
                if !signal.is_current(claim) {
                    return false;
                }
            } else {
                if !signal.write_claimed(claim, value) {
                    return false;
                }
                published = value;
            }

            if done {
                return true;
            }
        }
    }

    fn cancel(&self, signal: &OffsetSignal) {
        signal.supersede();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn spec(ms: u64) -> AnimationSpec {
        AnimationSpec {
            duration: Duration::from_millis(ms),
            easing: EasingType::Linear,
            accelerated: false,
        }
    }

    #[test]
    fn test_frame_duration() {
        assert_eq!(TickAnimator::new(60).frame_duration(), Duration::from_millis(16));
        assert_eq!(TickAnimator::new(0).frame_duration(), Duration::from_millis(16));
        assert_eq!(TickAnimator::new(10).frame_duration(), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_animation_reaches_target() {
        let animator = TickAnimator::new(60);
        let signal = OffsetSignal::new();

        let start = Instant::now();
        assert!(animator.animate(&signal, -100.0, spec(200)).await);
        assert_eq!(signal.get(), -100.0);
        assert!(start.elapsed() >= Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_duration_jumps() {
        let animator = TickAnimator::new(60);
        let signal = OffsetSignal::new();
        assert!(animator.animate(&signal, 10.0, spec(0)).await);
        assert_eq!(signal.get(), 10.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_direct_write_supersedes_animation() {
        let animator = Arc::new(TickAnimator::new(60));
        let signal = Arc::new(OffsetSignal::new());

        let task = {
            let animator = Arc::clone(&animator);
            let signal = Arc::clone(&signal);
            tokio::spawn(async move { animator.animate(&signal, -300.0, spec(1000)).await })
        };

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(signal.get() < 0.0);
        signal.set(0.0);

        assert!(!task.await.unwrap());
        assert_eq!(signal.get(), 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequence_runs_legs_in_order() {
        let animator = TickAnimator::new(60);
        let signal = OffsetSignal::new();
        let mut rx = signal.subscribe();

        assert!(animator.sequence(&signal, &[-20.0, 10.0], spec(100)).await);
        assert_eq!(signal.get(), 10.0);
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), 10.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_hook_supersedes() {
        let animator = Arc::new(TickAnimator::new(60));
        let signal = Arc::new(OffsetSignal::new());

        let task = {
            let animator = Arc::clone(&animator);
            let signal = Arc::clone(&signal);
            tokio::spawn(async move { animator.animate(&signal, -300.0, spec(1000)).await })
        };

        tokio::time::sleep(Duration::from_millis(100)).await;
        animator.cancel(&signal);
        assert!(!task.await.unwrap());
        assert!(signal.get() > -300.0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_accelerated_path_still_lands_on_target() {
        let animator = TickAnimator::new(60);
        let signal = OffsetSignal::new();
        let spec = AnimationSpec {
            accelerated: true,
            ..spec(500)
        };
        assert!(animator.animate(&signal, -3.0, spec).await);
        assert_eq!(signal.get(), -3.0);
    }
}
