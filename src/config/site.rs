//! Site configuration (_config.yml)

use anyhow::Result;
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use crate::theme::Theme;

const DEFAULT_PER_PAGE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

const DEFAULT_WORDS_PER_MINUTE: NonZeroUsize = match NonZeroUsize::new(200) {
    Some(n) => n,
    None => unreachable!(),
};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    /// Author assigned to posts that do not name one
    pub author: String,

    // Content
    /// Post directory, relative to the site directory
    pub content_dir: String,
    pub per_page: NonZeroUsize,
    pub words_per_minute: NonZeroUsize,
    /// Zone used for front-matter dates without an offset
    #[serde(
        serialize_with = "serialize_tz",
        deserialize_with = "deserialize_tz"
    )]
    pub timezone: Tz,

    // Presentation
    /// Theme used when no preference has been saved
    pub theme: Theme,
    #[serde(default)]
    pub highlight: HighlightConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Herman Teng".to_string(),
            author: "Herman Teng".to_string(),

            content_dir: "content/posts".to_string(),
            per_page: DEFAULT_PER_PAGE,
            words_per_minute: DEFAULT_WORDS_PER_MINUTE,
            timezone: Tz::UTC,

            theme: Theme::Light,
            highlight: HighlightConfig::default(),

            server: ServerConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        tracing::debug!("Loaded site config from {:?}", path.as_ref());
        Ok(config)
    }
}

fn serialize_tz<S: Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tz.name())
}

fn deserialize_tz<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Tz, D::Error> {
    let name = String::deserialize(deserializer)?;
    name.parse::<Tz>()
        .map_err(|_| serde::de::Error::custom(format!("unknown timezone: {}", name)))
}

/// Syntax highlighting themes, one per site theme
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub light_theme: String,
    pub dark_theme: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            light_theme: "InspiredGitHub".to_string(),
            dark_theme: "base16-ocean.dark".to_string(),
        }
    }
}

impl HighlightConfig {
    /// Syntect theme name for a site theme
    pub fn theme_for(&self, theme: Theme) -> &str {
        match theme {
            Theme::Light => &self.light_theme,
            Theme::Dark => &self.dark_theme,
        }
    }
}

/// Development server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "127.0.0.1".to_string(),
            port: 4000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.author, "Herman Teng");
        assert_eq!(config.content_dir, "content/posts");
        assert_eq!(config.per_page.get(), 10);
        assert_eq!(config.words_per_minute.get(), 200);
        assert_eq!(config.timezone, Tz::UTC);
        assert_eq!(config.theme, Theme::Light);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: My Blog
author: Test User
per_page: 5
timezone: Asia/Singapore
theme: dark
highlight:
  dark_theme: Solarized (dark)
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "My Blog");
        assert_eq!(config.author, "Test User");
        assert_eq!(config.per_page.get(), 5);
        assert_eq!(config.timezone, chrono_tz::Asia::Singapore);
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.highlight.theme_for(Theme::Dark), "Solarized (dark)");
        assert_eq!(config.highlight.theme_for(Theme::Light), "InspiredGitHub");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_rejects_unknown_timezone() {
        let result = serde_yaml::from_str::<SiteConfig>("timezone: Mars/Olympus\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_rejects_zero_per_page() {
        let result = serde_yaml::from_str::<SiteConfig>("per_page: 0\n");
        assert!(result.is_err());
    }
}
