//! Helper functions shared by the content pipeline and the CLI

mod date;

pub use date::*;
