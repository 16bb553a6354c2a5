//! IPv6 literal canonicalization.

use std::net::Ipv6Addr;

use crate::error::{CanonError, Result};

/// Canonicalize an IPv6 literal into its compressed lowercase form.
///
/// The literal may be wrapped in `[...]`; whichever brackets were present
/// on input are reapplied to the output, so `[2001:DB8::1` comes back as
/// `[2001:db8::1`.
pub fn normalize_ipv6(s: &str) -> Result<String> {
    let has_open = s.starts_with('[');
    let has_close = s.ends_with(']');

    let inner = s.trim_matches(|c| c == '[' || c == ']');
    if inner.is_empty() {
        return Err(CanonError::EmptyValue);
    }

    let addr: Ipv6Addr = inner.parse().map_err(|_| CanonError::InvalidIpv6)?;

    let mut out = String::new();
    if has_open {
        out.push('[');
    }
    out.push_str(&addr.to_string());
    if has_close {
        out.push(']');
    }
    Ok(out)
}
