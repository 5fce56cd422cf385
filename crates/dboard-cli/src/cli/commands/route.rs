use anyhow::{Context, Result};
use dboard_ui::Route;

/// Prints the canonical `#fragment` for `fragment`.
pub fn run(fragment: &str) -> Result<()> {
    let route = Route::parse(fragment).with_context(|| format!("parse location '{fragment}'"))?;
    println!("{route}");
    Ok(())
}
