use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub ticker: TickerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Input poll rate in milliseconds while idle
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Frame rate used by the default animator
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Easing curve applied to every ticker animation leg
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump straight to the target at the end of the leg
    None,
    Linear,
    Cubic,
    Quintic,
    EaseOut,
    #[default]
    EaseInOut,
}

/// Which animation to run once the content is known to overflow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnimationType {
    /// Bounce for small overflow, scroll otherwise
    #[default]
    Auto,
    Scroll,
    Bounce,
}

/// Overshoot applied to the two bounce legs, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BouncePadding {
    #[serde(default = "default_bounce_padding")]
    pub left: f64,
    #[serde(default = "default_bounce_padding")]
    pub right: f64,
}

impl Default for BouncePadding {
    fn default() -> Self {
        Self {
            left: default_bounce_padding(),
            right: default_bounce_padding(),
        }
    }
}

/// How a leg duration is derived when `duration_ms` is not set
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DurationPolicy {
    /// Milliseconds per content segment (characters or child nodes)
    PerSegment {
        #[serde(default = "default_scroll_ms_per_segment")]
        scroll_ms: u64,
        #[serde(default = "default_bounce_ms_per_segment")]
        bounce_ms: u64,
    },
    /// Milliseconds per measured pixel of content
    PerPixel { scroll_ms: f64, bounce_ms: f64 },
}

impl Default for DurationPolicy {
    fn default() -> Self {
        Self::PerSegment {
            scroll_ms: default_scroll_ms_per_segment(),
            bounce_ms: default_bounce_ms_per_segment(),
        }
    }
}

/// Ticker behaviour. Snapshotted by the controller on every activation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickerConfig {
    /// Explicit leg duration; falls back to `duration_policy` when unset
    #[serde(default)]
    pub duration_ms: Option<u64>,
    /// Repeat the animation forever
    #[serde(default = "default_true", rename = "loop")]
    pub looping: bool,
    /// Allow bouncing when the overflow is small
    #[serde(default = "default_true")]
    pub bounce: bool,
    /// Allow the user to scroll the text manually when it overflows
    #[serde(default = "default_true")]
    pub scroll: bool,
    /// Start animating as soon as the ticker is activated
    #[serde(default = "default_true")]
    pub auto_start: bool,
    /// Wait before each animation pass begins
    #[serde(default)]
    pub start_delay_ms: u64,
    /// Prefer the animator's low-overhead path
    #[serde(default = "default_true")]
    pub use_accelerated_animation: bool,
    /// Gap between the primary copy and the loop copy while scrolling
    #[serde(default = "default_repeat_spacer")]
    pub repeat_spacer: f64,
    #[serde(default)]
    pub easing: EasingType,
    /// Quiet period after the last manual scroll before animation resumes
    #[serde(default)]
    pub restart_delay_ms: Option<u64>,
    /// Never start automatically or on request
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub animation_type: AnimationType,
    #[serde(default)]
    pub bounce_padding: BouncePadding,
    #[serde(default)]
    pub duration_policy: DurationPolicy,
    /// Ask the animator to cancel in-flight legs instead of superseding them
    #[serde(default)]
    pub cancel_in_flight: bool,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            duration_ms: None,
            looping: default_true(),
            bounce: default_true(),
            scroll: default_true(),
            auto_start: default_true(),
            start_delay_ms: 0,
            use_accelerated_animation: default_true(),
            repeat_spacer: default_repeat_spacer(),
            easing: EasingType::default(),
            restart_delay_ms: None,
            disabled: false,
            animation_type: AnimationType::default(),
            bounce_padding: BouncePadding::default(),
            duration_policy: DurationPolicy::default(),
            cancel_in_flight: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_tick_rate() -> u64 {
    100
}

fn default_animation_fps() -> u32 {
    60
}

fn default_repeat_spacer() -> f64 {
    50.0
}

fn default_bounce_padding() -> f64 {
    10.0
}

fn default_scroll_ms_per_segment() -> u64 {
    150
}

fn default_bounce_ms_per_segment() -> u64 {
    50
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/tickline/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("tickline")
            .join("config.toml")
    }

    /// Directory for the log file written by the interactive ticker
    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("tickline")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticker_defaults() {
        let config = TickerConfig::default();
        assert_eq!(config.duration_ms, None);
        assert!(config.looping);
        assert!(config.bounce);
        assert!(config.scroll);
        assert!(config.auto_start);
        assert_eq!(config.start_delay_ms, 0);
        assert!(config.use_accelerated_animation);
        assert_eq!(config.repeat_spacer, 50.0);
        assert_eq!(config.easing, EasingType::EaseInOut);
        assert_eq!(config.restart_delay_ms, None);
        assert_eq!(
            config.duration_policy,
            DurationPolicy::PerSegment {
                scroll_ms: 150,
                bounce_ms: 50
            }
        );
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ticker, TickerConfig::default());
        assert_eq!(config.ui.animation_fps, 60);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_partial_ticker_section() {
        let config = AppConfig::from_toml(
            r#"
            [ticker]
            loop = false
            repeat_spacer = 20.0
            easing = "linear"
            animation_type = "bounce"
            restart_delay_ms = 1500
            bounce_padding = { left = 4.0 }
            duration_policy = { kind = "per_pixel", scroll_ms = 8.0, bounce_ms = 4.0 }
            "#,
        )
        .unwrap();

        let ticker = config.ticker;
        assert!(!ticker.looping);
        assert!(ticker.bounce);
        assert_eq!(ticker.repeat_spacer, 20.0);
        assert_eq!(ticker.easing, EasingType::Linear);
        assert_eq!(ticker.animation_type, AnimationType::Bounce);
        assert_eq!(ticker.restart_delay_ms, Some(1500));
        assert_eq!(ticker.bounce_padding.left, 4.0);
        assert_eq!(ticker.bounce_padding.right, 10.0);
        assert_eq!(
            ticker.duration_policy,
            DurationPolicy::PerPixel {
                scroll_ms: 8.0,
                bounce_ms: 4.0
            }
        );
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml("[ticker]\nloop = \"yes\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_toml_roundtrip_keeps_loop_key() {
        let text = AppConfig::default().to_toml().unwrap();
        assert!(text.contains("loop = true"));
        let parsed = AppConfig::from_toml(&text).unwrap();
        assert_eq!(parsed.ticker, TickerConfig::default());
    }
}
