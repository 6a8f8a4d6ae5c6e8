//! Overflow ticker for single-line content
//!
//! When a line is wider than the region showing it, the ticker animates it
//! horizontally: small overflows bounce back and forth, larger ones scroll
//! continuously with a trailing copy. Manual scrolling pauses the animation
//! until the user has been quiet for a while.
//!
//! # Architecture (atomic layers)
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions
//! - `timing` - Progress, interpolation and leg durations
//! - `mode` - Fit tolerance and animation mode selection
//! - `signal` - Offset value with claim-based supersession
//! - `config` - Configuration types and defaults (re-exported from the crate root)
//!
//! ## L3 Molecular Layer
//! - `timers` - Named single-occupant timer slots
//! - `metrics` - Host measurement capability and metrics probe
//! - `animator` - Timing animator capability and the frame-ticking default
//!
//! ## L2 Organism Layer
//! - `controller` - Lifecycle, state and the public handle
//! - `driver` - Start, pass chaining and stop
//! - `interrupt` - Manual scroll debounce
//!
//! # Usage
//!
//! ```ignore
//! use tickline_core::ticker::{TickAnimator, TickerController};
//!
//! let ticker = TickerController::new(config, container, content, Arc::new(TickAnimator::new(60)));
//! ticker.activate();
//!
//! // Render loop
//! let offset = ticker.offset();
//!
//! // Host callbacks
//! ticker.on_user_scroll();
//! ticker.content_size_changed().await;
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod mode;
pub mod signal;
pub mod timing;

// L3 Molecular Layer
pub mod animator;
pub mod metrics;
pub mod timers;

// L2 Organism Layer
pub mod controller;
mod driver;
mod interrupt;

#[cfg(test)]
mod testing;

// Re-exports for convenient access
pub use animator::{AnimationSpec, TickAnimator, TimingAnimator};
pub use config::{TickerConfig, TickerConfigExt, DEFAULT_RESTART_DELAY};
pub use controller::{TickerController, TickerEvent, TickerState};
pub use driver::{bounce_targets, scroll_target, SETTLE_DELAY};
pub use easing::{EasingType, EasingTypeExt};
pub use metrics::{MeasurableRegion, Metrics, MetricsProbe};
pub use mode::AnimationMode;
pub use signal::OffsetSignal;
pub use timers::{TimerRegistry, TimerSlot};
