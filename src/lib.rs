//! folio-rs: a file-backed markdown blog engine for a personal portfolio site
//!
//! Posts are plain markdown files with YAML front-matter. Every query re-reads
//! the content directory, so there is no cache to invalidate.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod server;
pub mod theme;

use anyhow::Result;
use std::path::Path;

use content::{PostLoader, PostRepository};
use theme::{FileThemeStore, Theme, ThemeStore};

/// The main application handle
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Directory holding one `{slug}.md` file per post
    pub content_dir: std::path::PathBuf,
}

impl Folio {
    /// Create a new instance from a site directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Build a post repository over the content directory
    pub fn repository(&self) -> PostRepository {
        let loader = PostLoader::new(&self.content_dir, &self.config);
        PostRepository::new(loader, self.config.timezone)
    }

    /// Persisted theme preference store for this site
    pub fn theme_store(&self) -> FileThemeStore {
        FileThemeStore::new(&self.base_dir)
    }

    /// The saved theme, else the system preference if known, else the
    /// configured one
    pub fn current_theme(&self, prefers_dark: Option<bool>) -> Theme {
        Theme::resolve(self.theme_store().load(), prefers_dark, self.config.theme)
    }
}
