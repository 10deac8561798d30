//! List site content

use anyhow::Result;

use crate::content::Post;
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    let repo = folio.repository();

    match content_type {
        "post" | "posts" => {
            let posts = repo.list_all_posts();
            println!("Posts ({}):", posts.len());
            print_posts(&posts);
        }
        "featured" => {
            let posts = repo.featured_posts();
            println!("Featured posts ({}):", posts.len());
            print_posts(&posts);
        }
        "tag" | "tags" => {
            let tags = repo.tag_counts();
            println!("Tags ({}):", tags.len());
            for (tag, count) in tags {
                println!("  {} ({})", tag, count);
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, featured, tag",
                content_type
            );
        }
    }

    Ok(())
}

pub(crate) fn print_posts(posts: &[Post]) {
    for post in posts {
        let marker = if post.featured { " *" } else { "" };
        println!(
            "  {} - {}{} [{}] ({})",
            post.date, post.title, marker, post.slug, post.reading_time
        );
    }
}
