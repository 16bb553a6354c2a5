//! urlcanon: canonical URL normalization for threat-feed matching.
//!
//! Converts arbitrary, possibly malformed URL strings into one canonical
//! form so that exact-match lookups against URL-based threat databases
//! (malicious URLs, phishing, botnet C&C) do not miss hits on trivial
//! formatting variation. Equivalent spellings of the same resource —
//! differing case, numeric host bases, duplicate slashes, dot segments,
//! escaped characters — all land on one identical string.
//!
//! ```
//! use urlcanon::normalize;
//!
//! assert_eq!(
//!     normalize("https://WWW.Example.com:443/a/../b%41?x=1").unwrap(),
//!     "example.com/ba?x=1"
//! );
//! ```
//!
//! The canonical form carries no scheme, no port and no fragment; see
//! [`normalize`] for the full pipeline.

/// Error types and error handling
pub mod error;

/// IP literal canonicalization
pub mod ip;

/// Logging and tracing infrastructure
pub mod logging;

/// The normalization pipeline
pub mod normalize;

/// IANA scheme registry
pub mod schemes;

pub use error::{CanonError, Result};
pub use normalize::{normalize, HostPort};
