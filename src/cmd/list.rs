//! The `list` command: enumerate configured services.

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

pub fn run(config: Option<&Path>, quiet: bool) -> Result<()> {
    let registry = super::load_registry(config)?;

    for definition in registry.services() {
        if quiet {
            println!("{}", definition.name);
            continue;
        }

        let predicate = if definition.has_custom_predicate() {
            "custom".yellow()
        } else {
            "default".dimmed()
        };
        println!(
            "{:<16} {:>6} {}  [{}]",
            definition.name.cyan(),
            definition.request.method,
            definition.request.url,
            predicate
        );
    }

    Ok(())
}
