//! Init command implementation.

use anyhow::{bail, Context, Result};
use mdlint_core::Settings;
use std::path::Path;

const DEFAULT_STYLE: &str = "all

rule 'MD007', :indent => 4 # Unordered list indentation

exclude_rule 'MD001' # Header levels should only increment by one level at a time
exclude_rule 'MD012' # Multiple consecutive blank lines
exclude_rule 'MD014' # Dollar signs used before commands without showing output
exclude_rule 'MD033' # Inline HTML
exclude_rule 'MD036' # Emphasis used instead of a header
";

const STYLE_NAME: &str = ".mdlstyle.rb";
const SETTINGS_NAME: &str = "mdlint.toml";

/// Runs the init command in `dir`.
pub fn run(dir: &Path, force: bool, with_settings: bool) -> Result<()> {
    write_new(&dir.join(STYLE_NAME), DEFAULT_STYLE, force)?;
    println!("Created {STYLE_NAME}");

    if with_settings {
        let settings = toml::to_string_pretty(&Settings::default())
            .context("Failed to render default settings")?;
        write_new(&dir.join(SETTINGS_NAME), &settings, force)?;
        println!("Created {SETTINGS_NAME}");
    }

    println!("\nNext steps:");
    println!("  1. Edit {STYLE_NAME} to enable, exclude, or tune rules");
    println!("  2. Run: mdlint check");
    Ok(())
}

fn write_new(path: &Path, content: &str, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}
