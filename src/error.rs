//! Error taxonomy for the validation engine.
//!
//! Every stage of a check can fail for a different reason, and callers need
//! to tell "token is invalid" apart from "we could not find out". Each
//! variant carries the service name so a failure in a batch run is
//! attributable without extra bookkeeping.

use thiserror::Error;

/// Boxed error type predicates and transports report their causes with.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Failure modes of a single credential check.
///
/// `Transport` and `Predicate` are "could not determine validity" outcomes;
/// a clean `Ok(false)` from the engine is the only way to say "determined
/// invalid".
#[derive(Debug, Error)]
pub enum CheckError {
    /// The requested service has no registry entry. Surfaced before any
    /// network activity.
    #[error("service \"{0}\" is not configured")]
    UnknownService(String),

    /// A predicate attachment arrived after the registry was sealed.
    #[error("registry is sealed; cannot attach a predicate for \"{0}\"")]
    RegistrySealed(String),

    /// The service map itself is unusable (parse failure, name/key
    /// mismatch, missing fields).
    #[error("invalid service configuration: {0}")]
    Config(String),

    /// The definition rendered into a request we refuse to send.
    #[error("bad request template for service \"{service}\": {reason}")]
    Template { service: String, reason: String },

    /// The request never produced a response: connection failure, timeout,
    /// TLS trouble. Distinct from an unauthenticated HTTP status, which is
    /// a response like any other.
    #[error("request to service \"{service}\" failed")]
    Transport {
        service: String,
        #[source]
        source: TransportError,
    },

    /// A custom predicate could not interpret the response.
    #[error("predicate for service \"{service}\" failed")]
    Predicate {
        service: String,
        #[source]
        source: BoxedError,
    },
}

/// A transport-level failure, independent of any particular HTTP client so
/// mock transports in tests don't need to fabricate `ureq` errors.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<BoxedError>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        TransportError {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxedError>) -> Self {
        TransportError {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}
