//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and handed to the
//! orchestrator task.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::form::{AnimationKind, FormMode, GenerationOptions, Language, Resolution, VideoStyle, Voice};

// ---------------------------------------------------------------------------
// ServiceConfig
// ---------------------------------------------------------------------------

/// Where the generation service lives.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Base address of the service.  Also the prefix for root-relative
    /// media locators returned by it.
    pub base_url: String,
    /// Path of the simple (free) generation endpoint.
    pub simple_path: String,
    /// Path of the extended generation endpoint (options object).
    pub extended_path: String,
    /// Path of the health endpoint.
    pub health_path: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".into(),
            simple_path: "/api/generate-free-ai-video".into(),
            extended_path: "/api/generate-ai-video".into(),
            health_path: "/api/health".into(),
        }
    }
}

impl ServiceConfig {
    /// Join `base_url` and `path` without doubling the slash.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

// ---------------------------------------------------------------------------
// FormDefaults
// ---------------------------------------------------------------------------

/// Initial picker values for the form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    pub mode: FormMode,
    pub animation: AnimationKind,
    pub language: Language,
    pub style: VideoStyle,
    /// Not user-selectable in the form; sent as-is on the extended flow.
    pub resolution: Resolution,
    /// Not user-selectable in the form; sent as-is on the extended flow.
    pub voice: Voice,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            mode: FormMode::Simple,
            animation: AnimationKind::Combined,
            language: Language::De,
            style: VideoStyle::Explainer,
            resolution: Resolution::FullHd,
            voice: Voice::Anna,
        }
    }
}

impl FormDefaults {
    pub fn options(&self) -> GenerationOptions {
        GenerationOptions {
            language: self.language,
            style: self.style,
            resolution: self.resolution,
            voice: self.voice,
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial inner size of the window `(width, height)`.
    pub window_size: (f32, f32),
    /// Keep the window above all other windows.
    pub always_on_top: bool,
    /// Show the example-text buttons under the text field.
    pub show_examples: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: (720.0, 820.0),
            always_on_top: false,
            show_examples: true,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// ```rust,no_run
/// use text_to_video::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
/// println!("{}", config.service.base_url);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceConfig,
    pub defaults: FormDefaults,
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns `true` when no `settings.toml` file exists yet.
    pub fn is_first_run() -> bool {
        !AppPaths::new().settings_file.exists()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
