//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::FrontMatter;
use crate::Folio;

/// Scaffold `{slug}.md` in the content directory and return its path.
///
/// The excerpt is left empty, so the post stays hidden until it is written.
pub fn create_post(
    folio: &Folio,
    title: &str,
    slug: Option<&str>,
    tags: Vec<String>,
) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };

    let repo = folio.repository();
    let file_path = repo.loader().post_path(&slug)?;

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let front_matter = FrontMatter {
        title: Some(title.to_string()),
        date: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
        excerpt: Some(String::new()),
        tags,
        image: None,
        author: Some(folio.config.author.clone()),
        featured: false,
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&front_matter)?);

    fs::create_dir_all(&folio.content_dir)?;
    fs::write(&file_path, content)?;
    tracing::info!("Created post {:?}", slug);

    Ok(file_path)
}
