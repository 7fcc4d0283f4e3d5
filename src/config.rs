use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub gesture: GestureSettings,
    #[serde(default)]
    pub deck: DeckSettings,
    #[serde(default)]
    pub quota: QuotaSettings,
    #[serde(default)]
    pub matching: MatchSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            gesture: GestureSettings::default(),
            deck: DeckSettings::default(),
            quota: QuotaSettings::default(),
            matching: MatchSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Drag physics and commit thresholds
#[derive(Debug, Clone, Deserialize)]
pub struct GestureSettings {
    /// Minimum horizontal distance for a release to commit, in px
    #[serde(default = "default_threshold_px")]
    pub threshold_px: f64,
    /// Below this |dx| both directional indicators stay hidden
    #[serde(default = "default_dead_zone_px")]
    pub dead_zone_px: f64,
    /// Rotation reached when the card crosses the full viewport width
    #[serde(default = "default_max_rotation_deg")]
    pub max_rotation_deg: f64,
    /// Exit translation as a multiple of viewport width
    #[serde(default = "default_exit_factor")]
    pub exit_factor: f64,
    /// Settle delay before the completion hook fires after a drag commit
    #[serde(default = "default_drag_settle_ms")]
    pub drag_settle_ms: u64,
    /// Settle delay for button-triggered (forced) commits
    #[serde(default = "default_forced_settle_ms")]
    pub forced_settle_ms: u64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            threshold_px: default_threshold_px(),
            dead_zone_px: default_dead_zone_px(),
            max_rotation_deg: default_max_rotation_deg(),
            exit_factor: default_exit_factor(),
            drag_settle_ms: default_drag_settle_ms(),
            forced_settle_ms: default_forced_settle_ms(),
        }
    }
}

fn default_threshold_px() -> f64 { 100.0 }
fn default_dead_zone_px() -> f64 { 20.0 }
fn default_max_rotation_deg() -> f64 { 15.0 }
fn default_exit_factor() -> f64 { 1.5 }
fn default_drag_settle_ms() -> u64 { 300 }
fn default_forced_settle_ms() -> u64 { 400 }

/// Deck window and demo source sizing
#[derive(Debug, Clone, Deserialize)]
pub struct DeckSettings {
    /// Number of cards rendered at once; only the first is interactive
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default = "default_demo_profiles")]
    pub demo_profiles: usize,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            window_size: default_window_size(),
            demo_profiles: default_demo_profiles(),
        }
    }
}

fn default_window_size() -> usize { 3 }
fn default_demo_profiles() -> usize { 10 }

/// Session budgets for paid actions
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaSettings {
    #[serde(default = "default_likes")]
    pub likes: u32,
    #[serde(default = "default_super_likes")]
    pub super_likes: u32,
}

impl Default for QuotaSettings {
    fn default() -> Self {
        Self {
            likes: default_likes(),
            super_likes: default_super_likes(),
        }
    }
}

fn default_likes() -> u32 { 10 }
fn default_super_likes() -> u32 { 1 }

/// Probabilistic match celebration
#[derive(Debug, Clone, Deserialize)]
pub struct MatchSettings {
    /// Chance that a committed like/superlike produces a mutual match
    #[serde(default = "default_match_probability")]
    pub probability: f64,
    /// Delay before the celebration fires after a matched action
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            probability: default_match_probability(),
            reveal_delay_ms: default_reveal_delay_ms(),
        }
    }
}

fn default_match_probability() -> f64 { 0.3 }
fn default_reveal_delay_ms() -> u64 { 500 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml, then config/local.toml)
    /// 3. Environment variables (prefixed with FLIRTLY__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FLIRTLY__GESTURE__THRESHOLD_PX -> gesture.threshold_px
            .add_source(
                Environment::with_prefix("FLIRTLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FLIRTLY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
