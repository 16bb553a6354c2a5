//! IP literal canonicalization.
//!
//! Hosts in a threat feed frequently encode the same address many ways:
//! packed decimal, hex or octal IPv4 segments, uncompressed IPv6. These
//! modules reduce every accepted form to one canonical spelling.

mod ipv4;
mod ipv6;

pub use ipv4::normalize_ipv4;
pub use ipv6::normalize_ipv6;
