//! Post loader - turns one `{slug}.md` file into a [`Post`]

use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use super::post::reading_time;
use super::{ContentError, FrontMatter, MarkdownRenderer, Post};
use crate::config::SiteConfig;

/// Markdown extension of post files
pub const POST_EXTENSION: &str = "md";

/// Loads single posts from the content directory
pub struct PostLoader {
    content_dir: PathBuf,
    renderer: MarkdownRenderer,
    default_author: String,
    words_per_minute: NonZeroUsize,
}

impl PostLoader {
    /// Create a new loader over `content_dir`
    pub fn new<P: AsRef<Path>>(content_dir: P, config: &SiteConfig) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            renderer: MarkdownRenderer::with_options(&config.highlight),
            default_author: config.author.clone(),
            words_per_minute: config.words_per_minute,
        }
    }

    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    pub fn renderer(&self) -> &MarkdownRenderer {
        &self.renderer
    }

    /// Load a post by slug. Any failure is logged and reported as `None`.
    pub fn load_post(&self, slug: &str) -> Option<Post> {
        match self.try_load(slug) {
            Ok(post) => Some(post),
            Err(ContentError::MissingFile(_)) => {
                tracing::debug!("No post file for slug {:?}", slug);
                None
            }
            Err(e) => {
                tracing::warn!("Skipping post {:?}: {}", slug, e);
                None
            }
        }
    }

    /// Load a post by slug, keeping the reason for a failure
    pub fn try_load(&self, slug: &str) -> Result<Post, ContentError> {
        let path = self.post_path(slug)?;
        if !path.is_file() {
            return Err(ContentError::MissingFile(slug.to_string()));
        }

        let raw = fs::read_to_string(&path)?;
        let (fm, body) = FrontMatter::parse(&raw);

        let title = required("title", fm.title)?;
        let date = required("date", fm.date)?;
        let excerpt = required("excerpt", fm.excerpt)?;

        let content = self.renderer.render(body)?;

        tracing::debug!("Loaded post {:?} from {:?}", slug, path);

        Ok(Post {
            slug: slug.to_string(),
            title,
            date,
            excerpt,
            content,
            tags: fm.tags,
            reading_time: reading_time(body, self.words_per_minute),
            image: fm.image,
            author: fm.author.unwrap_or_else(|| self.default_author.clone()),
            featured: fm.featured,
        })
    }

    /// Path of the file backing `slug`. Slugs are bare file names; anything
    /// that could step outside the content directory is rejected.
    pub fn post_path(&self, slug: &str) -> Result<PathBuf, ContentError> {
        let plain = !slug.is_empty()
            && slug != "."
            && slug != ".."
            && !slug.contains(['/', '\\', '\0']);
        if !plain {
            return Err(ContentError::InvalidSlug(slug.to_string()));
        }
        Ok(self
            .content_dir
            .join(format!("{}.{}", slug, POST_EXTENSION)))
    }
}

/// A required front-matter field, present and not blank
fn required(field: &'static str, value: Option<String>) -> Result<String, ContentError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ContentError::MissingField { field })
}
