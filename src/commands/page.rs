//! Show one page of the post listing

use anyhow::Result;
use std::num::NonZeroUsize;

use super::list::print_posts;
use crate::Folio;

/// Print page `page` of the listing, `per_page` posts at a time
pub fn run(folio: &Folio, page: usize, per_page: Option<NonZeroUsize>) -> Result<()> {
    let per_page = per_page.unwrap_or(folio.config.per_page);
    let result = folio.repository().paginate(page, per_page);

    if result.is_out_of_range() {
        anyhow::bail!(
            "Page {} not found ({} pages)",
            page,
            result.metadata.total_pages
        );
    }

    let meta = result.metadata;
    println!(
        "Page {} of {} ({} posts, {} per page):",
        meta.current_page, meta.total_pages, meta.total_posts, meta.posts_per_page
    );
    print_posts(&result.posts);

    Ok(())
}
