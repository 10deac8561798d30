//! Show or change the saved theme

use anyhow::Result;

use crate::theme::{Theme, ThemeStore};
use crate::Folio;

/// With no argument print the current theme; otherwise save `light`, `dark`,
/// or the opposite of the current one for `toggle`. `prefers_dark` stands in
/// for the system color scheme when nothing is saved.
pub fn run(folio: &Folio, choice: Option<&str>, prefers_dark: bool) -> Result<Theme> {
    let current = folio.current_theme(prefers_dark.then_some(true));

    let next = match choice {
        None => {
            println!("{}", current);
            return Ok(current);
        }
        Some("toggle") => current.toggled(),
        Some(name) => name.parse()?,
    };

    folio.theme_store().save(next)?;
    println!("Theme set to {}", next);
    Ok(next)
}
