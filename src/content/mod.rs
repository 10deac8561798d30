//! Content module - loads, renders, sorts and paginates posts

mod error;
mod frontmatter;
pub mod loader;
mod markdown;
pub mod pagination;
mod post;
pub mod repository;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use loader::PostLoader;
pub use markdown::MarkdownRenderer;
pub use pagination::{PaginatedResult, Pagination};
pub use post::{reading_time, Post};
pub use repository::PostRepository;
