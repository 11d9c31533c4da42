//! # keyprobe
//!
//! Validates whether a candidate string (API token, OAuth pair, webhook
//! secret) is a live credential for a named external service. Each service
//! is described declaratively — an HTTP method, a URL template, and header
//! templates — and a check renders the templates with the token, issues the
//! request once, and judges the response with a success predicate.
//!
//! ## Modules
//!
//! - [`registry`] - Startup-populated, then-sealed map of service definitions
//! - [`service`] - Service definitions and request templating
//! - [`transport`] - HTTP transport seam with a fixed deadline
//! - [`predicate`] - Default and custom success predicates
//! - [`check`] - The engine tying the pieces together
//! - [`error`] - Error taxonomy for the whole pipeline
//!
//! ## Example
//!
//! ```no_run
//! use keyprobe::{Checker, Registry};
//!
//! # fn main() -> Result<(), keyprobe::CheckError> {
//! let mut registry = Registry::from_yaml(r#"
//! github-token:
//!   name: github-token
//!   request:
//!     method: GET
//!     url: 'https://api.github.com/user'
//!     headers:
//!       Authorization: "token %s"
//! "#)?;
//! registry.seal();
//!
//! let checker = Checker::new(registry);
//! let live = checker.check("github-token", "ghp_example")?;
//! # let _ = live;
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod error;
pub mod predicate;
pub mod registry;
pub mod service;
pub mod transport;

pub use check::Checker;
pub use error::CheckError;
pub use registry::Registry;
