//! CLI subcommands

pub mod list;
pub mod new;
pub mod page;
pub mod show;
pub mod theme;
