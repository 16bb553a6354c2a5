//! Registry of IANA-registered URI scheme labels.
//!
//! The registry backs scheme inference: an input whose prefix (up to the
//! first `:`) is a registered label keeps that scheme, anything else gets
//! [`DEFAULT_SCHEME`] prepended before parsing. The label list is embedded
//! at build time and never mutated.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Scheme assumed for inputs that do not carry a registered one.
pub const DEFAULT_SCHEME: &str = "http";

static IANA_SCHEMES: Lazy<HashSet<&'static str>> =
    Lazy::new(|| include_str!("iana.txt").lines().collect());

/// True when `scheme` is a registered IANA scheme label.
///
/// Lookup is case-sensitive over lowercase labels; callers are expected to
/// lowercase before querying.
pub fn is_valid(scheme: &str) -> bool {
    IANA_SCHEMES.contains(scheme)
}

/// Number of labels in the registry.
pub fn count() -> usize {
    IANA_SCHEMES.len()
}
