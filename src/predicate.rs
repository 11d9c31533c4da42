//! Success predicates: deciding "live credential" from a response.
//!
//! Most services signal authentication with a plain 200, which the default
//! predicate covers. Services with odd success signals get a custom
//! predicate attached at startup through
//! [`Registry::attach_predicate`](crate::registry::Registry::attach_predicate).

use crate::error::BoxedError;
use crate::registry::Registry;
use crate::transport::ProbeResponse;

/// A custom success predicate. Pure over the response; a returned error
/// means "could not interpret the response", not "token invalid".
pub type PredicateFn = dyn Fn(&ProbeResponse) -> Result<bool, BoxedError> + Send + Sync;

/// The default predicate: status 200 means the credential is live.
/// Infallible by design; anything other than 200 is simply "invalid".
pub fn default_predicate(response: &ProbeResponse) -> bool {
    response.status == 200
}

/// Attach the built-in custom predicates to a freshly loaded registry.
///
/// Call this after loading the service map and before sealing. Services
/// absent from the map (a user-supplied config may carry a subset) are
/// skipped; other attachment failures propagate.
pub fn attach_builtins(registry: &mut Registry) -> Result<(), crate::error::CheckError> {
    use crate::error::CheckError;

    // Slack answers auth.test with 200 whether or not the token is good;
    // a live token is signaled by the X-Oauth-Scopes response header.
    match registry.attach_predicate("slack-token", |response| {
        Ok(response.has_header("X-Oauth-Scopes"))
    }) {
        Ok(()) | Err(CheckError::UnknownService(_)) => Ok(()),
        Err(err) => Err(err),
    }
}
