//! Fixed-size pages over a sorted post list

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use super::Post;

/// Pagination metadata for one page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total_posts: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub posts_per_page: usize,
}

/// One page of posts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedResult {
    pub posts: Vec<Post>,
    pub metadata: Pagination,
}

impl PaginatedResult {
    /// Whether the requested page lies outside `1..=total_pages`
    pub fn is_out_of_range(&self) -> bool {
        self.metadata.current_page == 0 || self.metadata.current_page > self.metadata.total_pages
    }
}

/// Slice `posts` into page `page` (1-based). Pages past the end, and page 0,
/// come back empty with the metadata still filled in.
pub fn paginate(posts: Vec<Post>, page: usize, per_page: NonZeroUsize) -> PaginatedResult {
    let per_page = per_page.get();
    let total_posts = posts.len();
    let total_pages = total_posts.div_ceil(per_page);

    let page_posts = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(per_page).min(total_posts);
            let end = start.saturating_add(per_page).min(total_posts);
            posts.into_iter().skip(start).take(end - start).collect()
        }
        None => Vec::new(),
    };

    PaginatedResult {
        posts: page_posts,
        metadata: Pagination {
            total_posts,
            total_pages,
            current_page: page,
            posts_per_page: per_page,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| Post {
                slug: format!("post-{}", i),
                title: format!("Post {}", i),
                date: "2024-01-01".to_string(),
                excerpt: String::new(),
                content: String::new(),
                tags: Vec::new(),
                reading_time: "1 min read".to_string(),
                image: None,
                author: "Herman Teng".to_string(),
                featured: false,
            })
            .collect()
    }

    fn ten() -> NonZeroUsize {
        NonZeroUsize::new(10).unwrap()
    }

    #[test]
    fn test_first_page() {
        let result = paginate(sample_posts(25), 1, ten());
        assert_eq!(result.posts.len(), 10);
        assert_eq!(result.posts[0].slug, "post-0");
        assert_eq!(
            result.metadata,
            Pagination {
                total_posts: 25,
                total_pages: 3,
                current_page: 1,
                posts_per_page: 10,
            }
        );
        assert!(!result.is_out_of_range());
    }

    #[test]
    fn test_last_partial_page() {
        let result = paginate(sample_posts(25), 3, ten());
        assert_eq!(result.posts.len(), 5);
        assert_eq!(result.posts[0].slug, "post-20");
        assert_eq!(result.posts[4].slug, "post-24");
    }

    #[test]
    fn test_page_past_end() {
        let result = paginate(sample_posts(25), 4, ten());
        assert!(result.posts.is_empty());
        assert_eq!(result.metadata.total_pages, 3);
        assert_eq!(result.metadata.current_page, 4);
        assert!(result.is_out_of_range());
    }

    #[test]
    fn test_page_zero() {
        let result = paginate(sample_posts(5), 0, ten());
        assert!(result.posts.is_empty());
        assert_eq!(result.metadata.total_posts, 5);
        assert!(result.is_out_of_range());
    }

    #[test]
    fn test_empty_collection() {
        let result = paginate(Vec::new(), 1, ten());
        assert!(result.posts.is_empty());
        assert_eq!(result.metadata.total_posts, 0);
        assert_eq!(result.metadata.total_pages, 0);
    }

    #[test]
    fn test_exact_multiple() {
        let result = paginate(sample_posts(20), 2, ten());
        assert_eq!(result.posts.len(), 10);
        assert_eq!(result.metadata.total_pages, 2);
    }

    #[test]
    fn test_huge_page_number() {
        let result = paginate(sample_posts(3), usize::MAX, ten());
        assert!(result.posts.is_empty());
    }

    #[test]
    fn test_metadata_json() {
        let result = paginate(sample_posts(1), 1, ten());
        let json = serde_json::to_value(result.metadata).unwrap();
        assert_eq!(json["totalPosts"], 1);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["currentPage"], 1);
        assert_eq!(json["postsPerPage"], 10);
    }
}
