//! Show a single post

use anyhow::Result;

use crate::helpers::full_date;
use crate::Folio;

/// Print a post's metadata followed by its rendered HTML
pub fn run(folio: &Folio, slug: &str) -> Result<()> {
    let repo = folio.repository();
    let post = repo
        .loader()
        .try_load(slug)
        .map_err(|e| anyhow::anyhow!("Cannot show {:?}: {}", slug, e))?;

    let date = post
        .published_at(folio.config.timezone)
        .map(|d| full_date(&d))
        .unwrap_or_else(|| post.date.clone());

    println!("{}", post.title);
    println!("  {} · {} · {}", date, post.author, post.reading_time);
    if !post.tags.is_empty() {
        println!("  Tags: {}", post.tags.join(", "));
    }
    if let Some(image) = &post.image {
        println!("  Image: {}", image);
    }
    println!("  {}", post.excerpt);
    println!();
    println!("{}", post.content);

    Ok(())
}
