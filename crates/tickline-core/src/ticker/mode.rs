//! L4 Atomic Layer: Animation mode selection
//!
//! Pure decision functions mapping measured overflow to an animation mode.

use super::config::AnimationType;

/// Overflow at or below this many pixels counts as "fits" (sub-pixel rounding)
pub const FIT_TOLERANCE: f64 = 1.0;

/// Overflow below `container_width / BOUNCE_DIVISOR` favours bouncing
pub const BOUNCE_DIVISOR: f64 = 8.0;

/// What the ticker does with its content
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AnimationMode {
    /// Content fits (or has not been measured); render it static
    #[default]
    None,
    /// Ping-pong between the two overflow edges
    Bounce,
    /// Scroll the content out and loop it back in behind a spacer
    Scroll,
}

impl AnimationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationMode::None => "none",
            AnimationMode::Bounce => "bounce",
            AnimationMode::Scroll => "scroll",
        }
    }
}

#[inline]
pub fn content_fits(distance: f64) -> bool {
    distance <= FIT_TOLERANCE
}

#[inline]
pub fn should_bounce(distance: f64, container_width: f64) -> bool {
    !content_fits(distance) && distance < container_width / BOUNCE_DIVISOR
}

/// Choose a mode from measured overflow.
pub fn select(distance: f64, container_width: f64, bounce_enabled: bool) -> AnimationMode {
    if content_fits(distance) {
        AnimationMode::None
    } else if bounce_enabled && should_bounce(distance, container_width) {
        AnimationMode::Bounce
    } else {
        AnimationMode::Scroll
    }
}

/// [`select`] with an explicit override applied once the content overflows.
pub fn select_with(
    distance: f64,
    container_width: f64,
    bounce_enabled: bool,
    animation_type: AnimationType,
) -> AnimationMode {
    match animation_type {
        _ if content_fits(distance) => AnimationMode::None,
        AnimationType::Auto => select(distance, container_width, bounce_enabled),
        AnimationType::Scroll => AnimationMode::Scroll,
        AnimationType::Bounce => AnimationMode::Bounce,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitting_content_is_static() {
        for distance in [-200.0, -1.0, 0.0, 0.5, 1.0] {
            assert_eq!(select(distance, 100.0, true), AnimationMode::None);
            assert_eq!(select(distance, 100.0, false), AnimationMode::None);
            assert!(content_fits(distance));
            assert!(!should_bounce(distance, 100.0));
        }
    }

    #[test]
    fn test_small_overflow_bounces() {
        for distance in [1.01, 5.0, 10.0, 12.49] {
            assert_eq!(select(distance, 100.0, true), AnimationMode::Bounce);
        }
    }

    #[test]
    fn test_large_overflow_or_bounce_disabled_scrolls() {
        for distance in [12.5, 50.0, 200.0] {
            assert_eq!(select(distance, 100.0, true), AnimationMode::Scroll);
        }
        assert_eq!(select(10.0, 100.0, false), AnimationMode::Scroll);
    }

    #[test]
    fn test_override_only_applies_when_overflowing() {
        assert_eq!(
            select_with(0.5, 100.0, true, AnimationType::Bounce),
            AnimationMode::None
        );
        assert_eq!(
            select_with(200.0, 100.0, true, AnimationType::Bounce),
            AnimationMode::Bounce
        );
        assert_eq!(
            select_with(10.0, 100.0, true, AnimationType::Scroll),
            AnimationMode::Scroll
        );
        assert_eq!(
            select_with(10.0, 100.0, true, AnimationType::Auto),
            AnimationMode::Bounce
        );
    }
}
