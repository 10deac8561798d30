//! Errors raised while loading a single post

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read post: {0}")]
    Io(#[from] std::io::Error),

    #[error("no post file for slug {0:?}")]
    MissingFile(String),

    #[error("slug {0:?} is not a plain file name")]
    InvalidSlug(String),

    #[error("front-matter is missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("failed to render markdown: {0}")]
    Render(String),
}

impl From<syntect::Error> for ContentError {
    fn from(e: syntect::Error) -> Self {
        ContentError::Render(e.to_string())
    }
}
