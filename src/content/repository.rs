//! Post repository - a stateless re-scan of the content directory
//!
//! Nothing is cached: every query lists the directory and reloads every post,
//! so edits on disk show up on the next call. A post that fails to load is
//! dropped from the result without affecting the others.

use chrono_tz::Tz;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::num::NonZeroUsize;
use walkdir::WalkDir;

use super::loader::POST_EXTENSION;
use super::pagination::{paginate, PaginatedResult};
use super::{Post, PostLoader};

pub struct PostRepository {
    loader: PostLoader,
    timezone: Tz,
}

impl PostRepository {
    pub fn new(loader: PostLoader, timezone: Tz) -> Self {
        Self { loader, timezone }
    }

    pub fn loader(&self) -> &PostLoader {
        &self.loader
    }

    /// Slugs of the markdown files directly inside the content directory,
    /// in directory enumeration order
    pub fn list_all_slugs(&self) -> Vec<String> {
        let content_dir = self.loader.content_dir();
        if !content_dir.is_dir() {
            tracing::debug!("Content directory {:?} does not exist", content_dir);
            return Vec::new();
        }

        let suffix = format!(".{}", POST_EXTENSION);
        WalkDir::new(content_dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                e.file_name()
                    .to_str()
                    .and_then(|name| name.strip_suffix(&suffix))
                    .map(str::to_string)
            })
            .collect()
    }

    /// Load a single post
    pub fn post(&self, slug: &str) -> Option<Post> {
        self.loader.load_post(slug)
    }

    /// Every loadable post, newest first. Equal dates keep enumeration order;
    /// posts with unparseable dates go last.
    pub fn list_all_posts(&self) -> Vec<Post> {
        let slugs = self.list_all_slugs();
        let mut posts: Vec<_> = slugs
            .iter()
            .filter_map(|slug| self.loader.load_post(slug))
            .map(|post| (post.published_at(self.timezone), post))
            .collect();

        // Sort by date descending (newest first)
        posts.sort_by(|(a, _), (b, _)| match (a, b) {
            (Some(a), Some(b)) => b.cmp(a),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        tracing::debug!("Loaded {} of {} posts", posts.len(), slugs.len());
        posts.into_iter().map(|(_, post)| post).collect()
    }

    /// The newest post
    pub fn latest_post(&self) -> Option<Post> {
        self.list_all_posts().into_iter().next()
    }

    /// Posts carrying exactly `tag` (case-sensitive)
    pub fn posts_by_tag(&self, tag: &str) -> Vec<Post> {
        self.list_all_posts()
            .into_iter()
            .filter(|post| post.has_tag(tag))
            .collect()
    }

    /// Posts marked `featured: true`
    pub fn featured_posts(&self) -> Vec<Post> {
        self.list_all_posts()
            .into_iter()
            .filter(|post| post.featured)
            .collect()
    }

    /// Distinct tags across all posts, in byte order
    pub fn all_tags(&self) -> Vec<String> {
        let tags: BTreeSet<String> = self
            .list_all_posts()
            .into_iter()
            .flat_map(|post| post.tags)
            .collect();
        tags.into_iter().collect()
    }

    /// Each tag with the number of posts carrying it, most used first
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for post in self.list_all_posts() {
            let tags: BTreeSet<String> = post.tags.into_iter().collect();
            for tag in tags {
                *counts.entry(tag).or_insert(0) += 1;
            }
        }

        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }

    /// One page of the sorted post list
    pub fn paginate(&self, page: usize, per_page: NonZeroUsize) -> PaginatedResult {
        paginate(self.list_all_posts(), page, per_page)
    }
}
