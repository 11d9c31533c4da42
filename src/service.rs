//! Service definitions and request templating.
//!
//! A [`ServiceDefinition`] is the declarative description of one probe: an
//! HTTP method, a URL template, and header templates, each of which may
//! contain the `%s` token marker. Rendering substitutes a candidate token
//! into a fresh copy of the templates; the stored definition is shared,
//! read-only configuration state and is never mutated.
//!
//! Substitution is deliberately raw: the token is spliced in verbatim, with
//! no escaping or percent-encoding. Several services rely on this (tokens
//! placed in URL userinfo, `client_id:client_secret` pairs), so hardening
//! it would silently break existing service maps.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::error::CheckError;
use crate::predicate::PredicateFn;

/// The substitution marker recognized in URL and header templates.
pub const TOKEN_MARKER: &str = "%s";

/// The request shape for one service, straight from configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RequestSpec {
    /// HTTP verb, used verbatim.
    pub method: String,
    /// URL template; at most one marker is honored.
    pub url: String,
    /// Header name -> value template. BTreeMap keeps iteration order
    /// deterministic so rendered output is testable.
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
}

/// Validator settings carried from configuration.
///
/// `custom` announces that startup code will attach a predicate; `status`
/// is informational and only matters to predicates that read it. The
/// engine itself never interprets either field.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ValidatorSpec {
    #[serde(default)]
    pub custom: bool,
    #[serde(default)]
    pub status: Option<u16>,
}

/// One service's probe description plus its optional predicate binding.
#[derive(Clone, Deserialize)]
pub struct ServiceDefinition {
    pub name: String,
    pub request: RequestSpec,
    #[serde(default)]
    pub validator: ValidatorSpec,
    /// Runtime predicate slot, attached by trusted startup code through
    /// the registry. Never populated from configuration.
    #[serde(skip)]
    pub(crate) predicate: Option<Arc<PredicateFn>>,
}

impl ServiceDefinition {
    /// Render this definition with a candidate token.
    ///
    /// Each call produces an independent [`RenderedRequest`]; nothing in
    /// `self` changes, so concurrent renders against the same definition
    /// are safe. An empty token, or a token equal to the marker itself,
    /// substitutes like any other string.
    pub fn render(&self, token: &str) -> Result<RenderedRequest, CheckError> {
        if self.request.method.is_empty() {
            return Err(self.template_error("empty HTTP method"));
        }

        let url = fill(&self.request.url, token);
        // The rendered URL may embed the token, so the error reports the
        // template, not the result.
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(self.template_error(format!(
                "url template {:?} does not render to an http(s) URL",
                self.request.url
            )));
        }

        let headers = self
            .request
            .headers
            .iter()
            .map(|(name, value)| (name.clone(), fill(value, token)))
            .collect();

        Ok(RenderedRequest {
            method: self.request.method.clone(),
            url,
            headers,
        })
    }

    /// Whether a custom predicate has been attached.
    pub fn has_custom_predicate(&self) -> bool {
        self.predicate.is_some()
    }

    fn template_error(&self, reason: impl Into<String>) -> CheckError {
        CheckError::Template {
            service: self.name.clone(),
            reason: reason.into(),
        }
    }
}

impl fmt::Debug for ServiceDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceDefinition")
            .field("name", &self.name)
            .field("request", &self.request)
            .field("validator", &self.validator)
            .field(
                "predicate",
                &if self.predicate.is_some() {
                    "custom"
                } else {
                    "default"
                },
            )
            .finish()
    }
}

/// A concrete request, ready for a transport. Owns all of its strings;
/// holds no reference back to the definition it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

/// Substitute the first marker occurrence, if any. Strings without a
/// marker pass through verbatim.
fn fill(template: &str, token: &str) -> String {
    template.replacen(TOKEN_MARKER, token, 1)
}
