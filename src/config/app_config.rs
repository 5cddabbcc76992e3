//! Application settings
//!
//! This module handles tunable settings stored in settings.json.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::Paths;
use crate::core::SamplingOptions;

/// Application configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Products returned by a visual search
    #[serde(default = "default_visual_search_limit")]
    pub visual_search_limit: usize,

    /// Dominant colors reported by the color endpoint when none are requested
    #[serde(default = "default_dominant_colors")]
    pub dominant_colors: usize,

    /// Longest image edge after downscaling
    #[serde(default = "default_max_image_edge")]
    pub max_image_edge: u32,

    /// Classify one pixel out of this many
    #[serde(default = "default_sample_stride")]
    pub sample_stride: usize,

    /// Timeout for fetching remote images
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Directory that storefront asset paths such as /products/x.jpg resolve against
    #[serde(default)]
    pub asset_dir: Option<PathBuf>,

    /// Catalog file loaded instead of the built-in seed catalog
    #[serde(default)]
    pub catalog_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            visual_search_limit: default_visual_search_limit(),
            dominant_colors: default_dominant_colors(),
            max_image_edge: default_max_image_edge(),
            sample_stride: default_sample_stride(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            asset_dir: None,
            catalog_path: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings file in the config directory
    pub fn load() -> Result<Self> {
        let paths = Paths::get()?;
        Self::load_from(&paths.settings_path())
    }

    /// Load configuration from a file, writing defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content =
                std::fs::read_to_string(path).context("Failed to read settings file")?;
            let config: AppConfig =
                serde_json::from_str(&content).context("Failed to parse settings file")?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        std::fs::write(path, content).context("Failed to write settings file")?;

        Ok(())
    }

    /// Image sampling parameters for color extraction
    pub fn sampling(&self) -> SamplingOptions {
        SamplingOptions {
            max_edge: self.max_image_edge,
            stride: self.sample_stride.max(1),
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

// Default value functions for serde

fn default_visual_search_limit() -> usize {
    6
}

fn default_dominant_colors() -> usize {
    2
}

fn default_max_image_edge() -> u32 {
    300
}

fn default_sample_stride() -> usize {
    10
}

fn default_fetch_timeout_secs() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.visual_search_limit, 6);
        assert_eq!(config.dominant_colors, 2);
        assert_eq!(config.sampling(), SamplingOptions::default());
        assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
        assert!(config.catalog_path.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"visualSearchLimit": 12, "sampleStride": 0}"#).unwrap();
        assert_eq!(config.visual_search_limit, 12);
        assert_eq!(config.max_image_edge, 300);
        // a zero stride would never advance
        assert_eq!(config.sampling().stride, 1);
    }

    #[test]
    fn test_load_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());

        let mut changed = config.clone();
        changed.visual_search_limit = 9;
        changed.save_to(&path).unwrap();
        assert_eq!(AppConfig::load_from(&path).unwrap().visual_search_limit, 9);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
