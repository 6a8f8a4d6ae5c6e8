pub mod config;
pub mod error;
pub mod ticker;

pub use config::{AnimationType, AppConfig, BouncePadding, DurationPolicy, EasingType, TickerConfig};
pub use error::{Error, Result};
pub use ticker::{
    AnimationMode, MeasurableRegion, Metrics, TickAnimator, TickerController, TickerEvent,
    TickerState, TimingAnimator,
};
