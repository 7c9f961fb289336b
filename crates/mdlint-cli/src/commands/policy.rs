//! Policy command implementation.

use anyhow::Result;
use mdlint_rules::registry;
use std::path::Path;

use crate::config_resolver::{self, Explicit};

/// Runs the policy command.
///
/// Prints the resolved policy as a style file: one line per rule with
/// every parameter spelled out.
pub fn run(explicit: &Explicit<'_>, lenient: bool, json: bool) -> Result<()> {
    let project = Path::new(".");
    let mut loaded = config_resolver::load_settings(project, explicit.settings)?;
    loaded.settings.lenient |= lenient;

    let policy = config_resolver::load_policy(registry(), project, explicit.style, &loaded)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&policy)?);
    } else {
        print!("{}", policy.to_directives());
    }
    Ok(())
}
