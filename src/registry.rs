//! The service registry: load once, attach predicates, seal, then read.
//!
//! The registry has a two-phase lifecycle. During startup it is a plain
//! owned value that startup code populates from YAML and decorates with
//! custom predicates; [`Registry::seal`] ends the write phase. After
//! sealing, any further attachment is an error rather than undefined
//! behavior, and the registry can be shared freely across threads: all
//! remaining access is read-only, which `&self` methods plus Rust's
//! aliasing rules make safe without locking.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::error::{BoxedError, CheckError};
use crate::service::ServiceDefinition;
use crate::transport::ProbeResponse;

/// Startup-populated, then-immutable map from service name to definition.
#[derive(Debug)]
pub struct Registry {
    services: BTreeMap<String, ServiceDefinition>,
    sealed: bool,
}

impl Registry {
    /// Parse a service map from YAML.
    ///
    /// Each top-level key is a service name; its `name` field must match
    /// the key, since the CLI layer relies on that binding. An empty
    /// document yields an empty registry.
    pub fn from_yaml(yaml: &str) -> Result<Self, CheckError> {
        if yaml.trim().is_empty() {
            return Ok(Registry {
                services: BTreeMap::new(),
                sealed: false,
            });
        }

        let services: BTreeMap<String, ServiceDefinition> = serde_yaml::from_str(yaml)
            .map_err(|err| CheckError::Config(format!("failed to parse service map: {err}")))?;

        for (key, definition) in &services {
            if definition.name != *key {
                return Err(CheckError::Config(format!(
                    "service key \"{key}\" does not match its name \"{}\"",
                    definition.name
                )));
            }
        }

        Ok(Registry {
            services,
            sealed: false,
        })
    }

    /// Load a service map from a YAML file on disk.
    pub fn from_yaml_file(path: &Path) -> Result<Self, CheckError> {
        let content = std::fs::read_to_string(path).map_err(|err| {
            CheckError::Config(format!("failed to read {}: {err}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Look up a service definition by name.
    pub fn lookup(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services.get(name)
    }

    /// Attach a custom success predicate to a configured service.
    ///
    /// Write-phase only: fails with [`CheckError::RegistrySealed`] once
    /// [`seal`](Registry::seal) has run, with [`CheckError::UnknownService`]
    /// for names the map does not carry, and with a config error if the
    /// service already has a predicate (attachment happens exactly once).
    pub fn attach_predicate<F>(&mut self, name: &str, predicate: F) -> Result<(), CheckError>
    where
        F: Fn(&ProbeResponse) -> Result<bool, BoxedError> + Send + Sync + 'static,
    {
        if self.sealed {
            return Err(CheckError::RegistrySealed(name.to_string()));
        }

        let definition = self
            .services
            .get_mut(name)
            .ok_or_else(|| CheckError::UnknownService(name.to_string()))?;

        if definition.predicate.is_some() {
            return Err(CheckError::Config(format!(
                "service \"{name}\" already has a predicate attached"
            )));
        }

        let predicate: Arc<crate::predicate::PredicateFn> = Arc::new(predicate);
        definition.predicate = Some(predicate);
        Ok(())
    }

    /// End the write phase. Idempotent.
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// Iterate over definitions in name order.
    pub fn services(&self) -> impl Iterator<Item = &ServiceDefinition> {
        self.services.values()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
