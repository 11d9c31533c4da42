//! Command handlers for the keyprobe CLI.

pub mod check;
pub mod list;
pub mod util;

use anyhow::{Context, Result};
use std::path::Path;

use keyprobe::predicate::attach_builtins;
use keyprobe::Registry;

/// The default service map, embedded at compile time.
const EMBEDDED_SERVICES: &str = include_str!("../../services.yml");

/// Load the service map, attach built-in predicates, and seal the
/// registry. Every command goes through here, so by the time any check
/// runs the write phase is over.
pub fn load_registry(config: Option<&Path>) -> Result<Registry> {
    let mut registry = match config {
        Some(path) => Registry::from_yaml_file(path)
            .with_context(|| format!("failed to load service map from {}", path.display()))?,
        None => {
            Registry::from_yaml(EMBEDDED_SERVICES).context("embedded service map is invalid")?
        }
    };

    attach_builtins(&mut registry)?;
    registry.seal();
    Ok(registry)
}
