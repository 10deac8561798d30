//! Post model

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::helpers::parse_date;

/// A blog post, one markdown file on disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// File name without the `.md` extension
    pub slug: String,

    pub title: String,

    /// Publication date as written in the front-matter
    pub date: String,

    pub excerpt: String,

    /// Rendered HTML content
    pub content: String,

    /// Tags in authored order
    pub tags: Vec<String>,

    /// Estimated reading time, e.g. "3 min read"
    pub reading_time: String,

    /// Cover image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,

    pub author: String,

    pub featured: bool,
}

impl Post {
    /// Publication date as an instant, if the front-matter date is parseable
    pub fn published_at(&self, tz: Tz) -> Option<DateTime<Tz>> {
        parse_date(&self.date, tz)
    }

    /// Whether the post carries exactly this tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Reading time of an unrendered body, rounded up to whole minutes (at
/// least one)
pub fn reading_time(body: &str, words_per_minute: NonZeroUsize) -> String {
    let words = body.split_whitespace().count();
    let minutes = words.div_ceil(words_per_minute.get()).max(1);
    format!("{} min read", minutes)
}
