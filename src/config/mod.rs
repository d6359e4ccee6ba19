//! Configuration module for the text-to-video client.
//!
//! Provides `AppConfig` (top-level settings), its sections, `AppPaths` for the
//! platform config directory, and TOML persistence via `AppConfig::load` /
//! `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, FormDefaults, ServiceConfig, UiConfig};
