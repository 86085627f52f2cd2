use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub slider: SliderConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
    #[serde(default)]
    pub counter: CounterConfig,
    #[serde(default)]
    pub forms: FormsConfig,
    #[serde(default)]
    pub particles: ParticlesConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub bootstrap: BootstrapConfig,
    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (preferences, logs)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Optional page layout file; the built-in landing page is used when unset
    #[serde(default)]
    pub layout: Option<PathBuf>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            layout: None,
        }
    }
}

/// What `go_to` does with an index outside the deck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutOfRangePolicy {
    /// Pin to the nearest valid index
    #[default]
    Clamp,
    /// Reduce modulo the slide count
    Wrap,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SliderConfig {
    /// Auto-advance period in milliseconds (0 = no auto-advance)
    #[serde(default = "default_slide_interval")]
    pub interval_ms: u64,
    /// Restart the auto-advance period after manual navigation
    #[serde(default = "default_true")]
    pub reset_on_manual: bool,
    #[serde(default)]
    pub out_of_range: OutOfRangePolicy,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_slide_interval(),
            reset_on_manual: default_true(),
            out_of_range: OutOfRangePolicy::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Delay between consecutive grid items
    #[serde(default = "default_stagger")]
    pub stagger_ms: u64,
    /// Fraction of a target that must be inside the viewport
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Pixels trimmed off the bottom of the viewport
    #[serde(default = "default_bottom_margin")]
    pub bottom_margin_px: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            stagger_ms: default_stagger(),
            threshold: default_threshold(),
            bottom_margin_px: default_bottom_margin(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterConfig {
    #[serde(default = "default_counter_duration")]
    pub duration_ms: u64,
}

impl Default for CounterConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_counter_duration(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Simulated send time for the contact form
    #[serde(default = "default_contact_delay")]
    pub contact_delay_ms: u64,
    /// Simulated send time for the newsletter form
    #[serde(default = "default_newsletter_delay")]
    pub newsletter_delay_ms: u64,
    /// How long the success label stays before reverting
    #[serde(default = "default_revert")]
    pub revert_ms: u64,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            contact_delay_ms: default_contact_delay(),
            newsletter_delay_ms: default_newsletter_delay(),
            revert_ms: default_revert(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticlesConfig {
    #[serde(default = "default_particle_count")]
    pub count: usize,
    /// Fixed generator seed, random per page load when unset
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for ParticlesConfig {
    fn default() -> Self {
        Self {
            count: default_particle_count(),
            seed: None,
        }
    }
}

/// Easing curve used by smooth-scroll navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the animation
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Minimum spacing between scroll reactions (~60fps)
    #[serde(default = "default_throttle")]
    pub throttle_ms: u64,
    /// Scroll offset past which the header is raised
    #[serde(default = "default_header_threshold")]
    pub header_threshold_px: f64,
    /// Animate anchor navigation instead of jumping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            throttle_ms: default_throttle(),
            header_threshold_px: default_header_threshold(),
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Delay before the hero gets its entrance class
    #[serde(default = "default_hero_delay")]
    pub hero_delay_ms: u64,
    /// Delay before the loading bar fades
    #[serde(default = "default_loading_fade")]
    pub loading_fade_ms: u64,
    /// Delay between the fade and the removal of the loading bar
    #[serde(default = "default_loading_remove")]
    pub loading_remove_ms: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            hero_delay_ms: default_hero_delay(),
            loading_fade_ms: default_loading_fade(),
            loading_remove_ms: default_loading_remove(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// Key the preference is stored under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Page pixels per terminal row
    #[serde(default = "default_line_px")]
    pub line_px: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            line_px: default_line_px(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("vitrine")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_slide_interval() -> u64 {
    5000
}

fn default_stagger() -> u64 {
    150
}

fn default_threshold() -> f64 {
    0.1
}

fn default_bottom_margin() -> f64 {
    50.0
}

fn default_counter_duration() -> u64 {
    2000
}

fn default_contact_delay() -> u64 {
    2000
}

fn default_newsletter_delay() -> u64 {
    1500
}

fn default_revert() -> u64 {
    3000
}

fn default_particle_count() -> usize {
    50
}

fn default_throttle() -> u64 {
    16 // ~60fps
}

fn default_header_threshold() -> f64 {
    100.0
}

fn default_scroll_duration() -> u64 {
    400
}

fn default_animation_fps() -> u32 {
    60
}

fn default_hero_delay() -> u64 {
    500
}

fn default_loading_fade() -> u64 {
    2000
}

fn default_loading_remove() -> u64 {
    300
}

fn default_storage_key() -> String {
    "theme".to_string()
}

fn default_tick_rate() -> u64 {
    50
}

fn default_line_px() -> f64 {
    20.0
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/vitrine/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("vitrine")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Get the persisted preferences file path
    pub fn preferences_path(&self) -> PathBuf {
        self.data_dir().join("preferences.toml")
    }

    /// Get the log file path used by the terminal preview
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("vitrine.log")
    }

    /// Get the layout file path (with tilde expansion)
    pub fn layout_path(&self) -> Option<PathBuf> {
        self.general.layout.as_deref().map(expand_tilde)
    }
}
