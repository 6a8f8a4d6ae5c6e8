//! L4 Atomic Layer: Time calculation utilities for ticker animations
//!
//! Pure functions for animation progress, interpolation and the default
//! leg-duration heuristic.

use std::time::Duration;

use tokio::time::Instant;

use super::config::{DurationPolicy, TickerConfig, TickerConfigExt};
use super::mode::AnimationMode;

/// Calculate animation progress (0.0 to 1.0) from start time and duration
///
/// Uses the tokio clock so paused-time tests advance it deterministically.
#[inline]
pub fn progress(start: Instant, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = start.elapsed();
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Linear interpolation between two values
///
/// # Arguments
/// * `from` - Start value
/// * `to` - End value
/// * `t` - Interpolation factor [0.0, 1.0]
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Duration of one animation leg for `mode`.
///
/// An explicit `duration_ms` always wins. Otherwise the configured policy
/// scales with a coarse proxy for content length: the segment count, or the
/// measured content width for [`DurationPolicy::PerPixel`].
pub fn leg_duration(
    config: &TickerConfig,
    mode: AnimationMode,
    segments: usize,
    content_width: f64,
) -> Duration {
    if let Some(duration) = config.explicit_duration() {
        return duration;
    }

    match (config.duration_policy, mode) {
        (DurationPolicy::PerSegment { scroll_ms, .. }, AnimationMode::Scroll) => {
            Duration::from_millis(scroll_ms.saturating_mul(segments as u64))
        }
        (DurationPolicy::PerSegment { bounce_ms, .. }, AnimationMode::Bounce) => {
            Duration::from_millis(bounce_ms.saturating_mul(segments as u64))
        }
        (DurationPolicy::PerPixel { scroll_ms, .. }, AnimationMode::Scroll) => {
            per_pixel(scroll_ms, content_width)
        }
        (DurationPolicy::PerPixel { bounce_ms, .. }, AnimationMode::Bounce) => {
            per_pixel(bounce_ms, content_width)
        }
        (_, AnimationMode::None) => Duration::ZERO,
    }
}

fn per_pixel(ms_per_px: f64, width: f64) -> Duration {
    let micros = (ms_per_px * width * 1000.0).round();
    if micros.is_finite() && micros > 0.0 {
        Duration::from_micros(micros as u64)
    } else {
        Duration::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp() {
        assert!((lerp(0.0, 100.0, 0.0) - 0.0).abs() < 0.001);
        assert!((lerp(0.0, 100.0, 0.5) - 50.0).abs() < 0.001);
        assert!((lerp(0.0, -350.0, 1.0) + 350.0).abs() < 0.001);
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_follows_clock() {
        let start = Instant::now();
        assert!((progress(start, Duration::ZERO) - 1.0).abs() < 0.001);

        tokio::time::advance(Duration::from_millis(250)).await;
        assert!((progress(start, Duration::from_millis(1000)) - 0.25).abs() < 0.001);

        tokio::time::advance(Duration::from_millis(1000)).await;
        assert_eq!(progress(start, Duration::from_millis(1000)), 1.0);
    }

    #[test]
    fn test_segment_heuristic() {
        let config = TickerConfig::default();
        assert_eq!(
            leg_duration(&config, AnimationMode::Scroll, 20, 300.0),
            Duration::from_millis(3000)
        );
        assert_eq!(
            leg_duration(&config, AnimationMode::Bounce, 20, 300.0),
            Duration::from_millis(1000)
        );
        assert_eq!(leg_duration(&config, AnimationMode::None, 20, 300.0), Duration::ZERO);
    }

    #[test]
    fn test_explicit_duration_wins() {
        let config = TickerConfig {
            duration_ms: Some(800),
            ..Default::default()
        };
        assert_eq!(
            leg_duration(&config, AnimationMode::Scroll, 20, 300.0),
            Duration::from_millis(800)
        );
        assert_eq!(
            leg_duration(&config, AnimationMode::Bounce, 3, 300.0),
            Duration::from_millis(800)
        );
    }

    #[test]
    fn test_per_pixel_policy() {
        let config = TickerConfig {
            duration_policy: DurationPolicy::PerPixel {
                scroll_ms: 10.0,
                bounce_ms: 2.0,
            },
            ..Default::default()
        };
        assert_eq!(
            leg_duration(&config, AnimationMode::Scroll, 1, 300.0),
            Duration::from_millis(3000)
        );
        assert_eq!(
            leg_duration(&config, AnimationMode::Bounce, 1, 300.0),
            Duration::from_millis(600)
        );
    }
}
