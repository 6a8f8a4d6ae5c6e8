//! L4 Atomic Layer: Configuration helpers for the ticker
//!
//! Re-exports configuration from the crate root and adds `Duration` conversions.

use std::time::Duration;

pub use crate::config::{AnimationType, BouncePadding, DurationPolicy, TickerConfig};

/// Restart delay used when `restart_delay_ms` is not configured
pub const DEFAULT_RESTART_DELAY: Duration = Duration::from_millis(3000);

/// Extension trait for TickerConfig with utility methods
pub trait TickerConfigExt {
    /// Wait before each animation pass
    fn start_delay(&self) -> Duration;

    /// Debounce window after the last manual scroll
    fn restart_delay(&self) -> Duration;

    /// Explicit leg duration, if configured
    fn explicit_duration(&self) -> Option<Duration>;
}

impl TickerConfigExt for TickerConfig {
    #[inline]
    fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    #[inline]
    fn restart_delay(&self) -> Duration {
        self.restart_delay_ms
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_RESTART_DELAY)
    }

    #[inline]
    fn explicit_duration(&self) -> Option<Duration> {
        self.duration_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restart_delay_default() {
        let config = TickerConfig::default();
        assert_eq!(config.restart_delay(), Duration::from_millis(3000));

        let config = TickerConfig {
            restart_delay_ms: Some(250),
            ..Default::default()
        };
        assert_eq!(config.restart_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_explicit_duration() {
        assert_eq!(TickerConfig::default().explicit_duration(), None);
        let config = TickerConfig {
            duration_ms: Some(4000),
            ..Default::default()
        };
        assert_eq!(config.explicit_duration(), Some(Duration::from_secs(4)));
    }
}
