//! The validation engine: one token, one request, one verdict.

use crate::error::CheckError;
use crate::predicate::default_predicate;
use crate::registry::Registry;
use crate::transport::{HttpTransport, Transport};

/// Ties a sealed [`Registry`] to a [`Transport`] and runs checks.
///
/// `check` is synchronous and makes exactly one attempt; callers wanting
/// parallel validation fan out their own calls, which is safe because the
/// checker holds no mutable state.
pub struct Checker<T: Transport = HttpTransport> {
    registry: Registry,
    transport: T,
}

impl Checker<HttpTransport> {
    /// Build a checker over the real HTTP transport.
    pub fn new(registry: Registry) -> Self {
        Checker::with_transport(registry, HttpTransport::new())
    }
}

impl<T: Transport> Checker<T> {
    /// Build a checker over a caller-supplied transport (tests use this to
    /// stay off the network).
    pub fn with_transport(registry: Registry, transport: T) -> Self {
        Checker {
            registry,
            transport,
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validate `token` against the named service.
    ///
    /// `Ok(true)` means the credential is live, `Ok(false)` means the
    /// service rejected it. Any `Err` means validity could not be
    /// determined; the variant says at which stage and for which service.
    pub fn check(&self, service: &str, token: &str) -> Result<bool, CheckError> {
        let definition = self
            .registry
            .lookup(service)
            .ok_or_else(|| CheckError::UnknownService(service.to_string()))?;

        let request = definition.render(token)?;

        let response =
            self.transport
                .send(&request)
                .map_err(|source| CheckError::Transport {
                    service: service.to_string(),
                    source,
                })?;

        // Predicate resolution happens per call: an attached predicate
        // wins, otherwise the infallible default applies.
        match &definition.predicate {
            Some(predicate) => {
                (predicate.as_ref())(&response).map_err(|source| CheckError::Predicate {
                    service: service.to_string(),
                    source,
                })
            }
            None => Ok(default_predicate(&response)),
        }
    }
}
