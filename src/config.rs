use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};

use crate::types::PageContext;

/// RGB color representation for config
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// One commentable page of the site, the unit a thread view opens on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageEntry {
    /// Page identifier on the comment service
    pub id: String,

    /// Human-readable title, shown in the page list and sent on submit
    pub title: String,

    /// Canonical URL of the page, sent on submit
    pub url: String,
}

/// Display settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplaySettings {
    /// Number of lines jumped by half-page scrolling in the thread view
    pub scroll_lines: usize,

    /// Accent color used for highlights, selection, avatar markers
    pub accent: RgbColor,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            scroll_lines: 10,
            accent: RgbColor::new(106, 50, 159),
        }
    }
}

/// Application configuration (~/.config/kaiwa/config.toml)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the comment service, e.g. "https://comments.example.com"
    pub host: String,

    /// Site/application identifier on the comment service
    pub app_id: String,

    /// Avatar service host used for identity-hash resolution
    pub avatar_host: String,

    /// Requested avatar size in pixels
    pub avatar_size: u16,

    /// Pages whose comment threads this site exposes
    #[serde(default)]
    pub pages: Vec<PageEntry>,

    /// Display settings
    #[serde(default)]
    pub display: DisplaySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::new(),
            app_id: String::new(),
            avatar_host: "secure.gravatar.com".to_string(),
            avatar_size: 40,
            pages: Vec::new(),
            display: DisplaySettings::default(),
        }
    }
}

impl Config {
    /// Get the config file path (~/.config/kaiwa/config.toml)
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("kaiwa").join("config.toml"))
    }

    /// Load configuration from file, or return default if not found
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Some(p) => p,
            None => return Self::default(),
        };

        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => toml::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Check that the loaded config can talk to a comment service at all.
    /// Run once at startup, before any network call.
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(anyhow!(
                "No comment service host configured. Set `host` in {}",
                Self::config_path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| "~/.config/kaiwa/config.toml".to_string())
            ));
        }

        crate::api::parse_service_host(&self.host)?;

        if self.app_id.trim().is_empty() {
            return Err(anyhow!("No `app_id` configured for the comment service"));
        }

        Ok(())
    }

    /// Build the immutable page context for a configured page id
    pub fn page_context(&self, page_id: &str) -> Option<PageContext> {
        self.pages.iter().find(|p| p.id == page_id).map(|p| PageContext {
            host: self.host.trim_end_matches('/').to_string(),
            app_id: self.app_id.clone(),
            page_id: p.id.clone(),
            page_title: p.title.clone(),
            page_url: p.url.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.host.is_empty());
        assert_eq!(config.avatar_host, "secure.gravatar.com");
        assert_eq!(config.avatar_size, 40);
        assert!(config.pages.is_empty());
    }

    #[test]
    fn test_display_settings_defaults() {
        let config = Config::default();
        assert_eq!(config.display.scroll_lines, 10);
        assert_eq!(config.display.accent.r, 106);
    }

    #[test]
    fn test_parse_toml() {
        let toml_str = r#"
host = "https://comments.example.com"
app_id = "e5e9acdd"

[[pages]]
id = "clinometer"
title = "Clinometer"
url = "https://example.com/products/clinometer/"

[[pages]]
id = "scale"
title = "Scale"
url = "https://example.com/products/scale/"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "https://comments.example.com");
        assert_eq!(config.pages.len(), 2);
        assert_eq!(config.pages[1].id, "scale");
        // Missing sections fall back to defaults
        assert_eq!(config.avatar_host, "secure.gravatar.com");
        assert_eq!(config.display.scroll_lines, 10);
    }

    #[test]
    fn test_parse_toml_with_display_settings() {
        let toml_str = r#"
[display]
scroll_lines = 20
accent = { r = 0, g = 120, b = 215 }
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.display.scroll_lines, 20);
        assert_eq!(config.display.accent.g, 120);
    }

    fn configured() -> Config {
        toml::from_str(
            r#"
host = "https://comments.example.com/"
app_id = "app-1"

[[pages]]
id = "clinometer"
title = "Clinometer"
url = "https://example.com/products/clinometer/"
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_page_context_lookup() {
        let config = configured();
        let page = config.page_context("clinometer").unwrap();
        assert_eq!(page.page_title, "Clinometer");
        assert_eq!(page.app_id, "app-1");
        // Host is normalized without a trailing slash
        assert_eq!(page.host, "https://comments.example.com");
    }

    #[test]
    fn test_page_context_unknown_id() {
        assert!(configured().page_context("nope").is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_validate_missing_host() {
        let config = Config::default();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_host() {
        let mut config = configured();
        config.host = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_missing_app_id() {
        let mut config = configured();
        config.app_id = String::new();
        assert!(config.validate().is_err());
    }
}
