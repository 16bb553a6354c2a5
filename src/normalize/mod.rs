//! URL normalization pipeline.
//!
//! Reduces every syntactic variant of a URL to one canonical string so that
//! exact-match lookups against a feed of known-bad URLs do not miss on
//! formatting differences. The canonical form carries no scheme, no port
//! and no fragment: `https://WWW.Example.com:443/A/` and `example.com/a`
//! land on the same string.
//!
//! Pipeline: scheme inference -> generic URL parse -> host, path and
//! query normalized independently -> assembly -> post-fix-up.

mod clean;
mod collapse;
mod parser;

pub use parser::ParsedUrl;

use serde::{Deserialize, Serialize};

use crate::error::{CanonError, Result};
use crate::ip::{normalize_ipv4, normalize_ipv6};
use crate::schemes::{self, DEFAULT_SCHEME};
use clean::clean;
use collapse::collapse;
use percent_encoding::percent_decode_str;

/// A normalized authority.
///
/// The port is split off and kept for inspection but is never re-emitted;
/// canonical URLs carry no port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostPort {
    /// Canonical host text.
    pub host: String,
    /// Decimal port string, possibly empty.
    pub port: String,
    /// True when the host canonicalized as an IP literal.
    pub is_ip: bool,
}

/// Normalize `raw` into its canonical form.
///
/// Pure function of the input and the embedded scheme registry. Any error
/// aborts the input; no partial output is produced.
pub fn normalize(raw: &str) -> Result<String> {
    let prepared = prepare(raw);

    let parsed = parser::parse_url(&prepared)?;

    let hp = normalize_host(&parsed.host)?;
    let path = normalize_path(&parsed.path)?;
    let query = normalize_query(&parsed.raw_query);

    let mut buf = String::new();
    buf.push_str(&hp.host);

    if !hp.host.is_empty() && !path.is_empty() && !path.starts_with('/') {
        buf.push('/');
    }
    buf.push_str(&path);

    // A query after a directory-ish path keeps the path's closing slash.
    let need_suffix_slash = (!parsed.raw_query.is_empty() || prepared.ends_with('?'))
        && (parsed.path.ends_with('/') || parsed.path.ends_with('.'));
    if need_suffix_slash && !path.ends_with('/') {
        buf.push('/');
    }

    if !query.is_empty() {
        buf.push('?');
        buf.push_str(&query);
    } else if parsed.force_query {
        buf.push('?');
    }

    // Post-normalization
    let mut res = collapse(&buf, '/', false);

    if res.ends_with("/?")
        && query.len() < 2
        && (!parsed.fragment.is_empty() || !parsed.scheme.is_empty())
    {
        res.truncate(res.len() - 2);
    }

    if res.ends_with("/.") {
        res.truncate(res.len() - 2);
    }

    Ok(res)
}

/// Prepare a raw string for URL parsing.
///
/// Strips leading spaces and forces a scheme: a recognized prefix before
/// the first `:` is kept (with any leading slashes after it dropped),
/// anything else gets [`DEFAULT_SCHEME`] prepended. Feed rows frequently
/// arrive without a scheme or with mangled leading slashes; this makes
/// them acceptable to a standard parser.
fn prepare(raw: &str) -> String {
    let raw = raw.trim_start_matches(' ');

    let (scheme, rest) = match raw.split_once(':') {
        Some((scheme, rest)) => (scheme, rest),
        None => (raw, ""),
    };
    let scheme = scheme.to_lowercase();

    if schemes::is_valid(&scheme) {
        return format!("{}://{}", scheme, rest.trim_start_matches('/'));
    }

    format!("{}://{}", DEFAULT_SCHEME, raw.trim_start_matches('/'))
}

/// Normalize the authority text into a [`HostPort`].
///
/// More than one `:` means an IPv6 literal and delegates to the IPv6
/// normalizer; its failure is the only host error. A host that fails IPv4
/// parsing simply stays textual.
pub fn normalize_host(raw: &str) -> Result<HostPort> {
    if raw.is_empty() {
        return Ok(HostPort::default());
    }

    let lower = raw.to_lowercase();
    let parts: Vec<&str> = lower.split(':').collect();

    if parts.len() > 2 {
        let nip = normalize_ipv6(raw).map_err(|e| CanonError::InvalidHost(Box::new(e)))?;
        return Ok(HostPort {
            host: nip,
            port: String::new(),
            is_ip: true,
        });
    }

    let port = if parts.len() == 2 { parts[1] } else { "" };

    let host = collapse(parts[0], '.', true);
    let host = host.strip_prefix('.').unwrap_or(&host);
    let host = host.strip_prefix("www.").unwrap_or(host);

    let mut hp = HostPort {
        host: host.to_string(),
        port: port.to_string(),
        is_ip: false,
    };

    if let Ok(nip) = normalize_ipv4(host) {
        hp.host = nip;
        hp.is_ip = true;
    }

    Ok(hp)
}

/// Normalize the escaped path: lexical cleanup, one percent-decode per
/// segment, case folding. A path of exactly `*` becomes empty.
fn normalize_path(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let p = clean(raw);
    let p = p.strip_prefix('/').unwrap_or(&p);
    let p = p.replace('\\', "/");
    let p = collapse(&p, '/', true);

    let segments = p
        .split('/')
        .map(|seg| {
            percent_decode_str(seg)
                .decode_utf8()
                .map(|dec| dec.to_lowercase())
                .map_err(CanonError::InvalidPath)
        })
        .collect::<Result<Vec<_>>>()?;
    let p = segments.join("/");

    if p == "*" {
        return Ok(String::new());
    }

    Ok(p)
}

/// Normalize the raw query.
///
/// `+` is protected as `%2B` before decoding so that a literal plus never
/// collapses into a space; `%00` sequences are dropped; a decode that
/// fails or empties the string leaves the escaped form in place.
fn normalize_query(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let q = raw.replace('+', "%2B").replace("%00", "");

    let q = match percent_decode_str(&q).decode_utf8() {
        Ok(dec) if !dec.is_empty() => dec.into_owned(),
        _ => q,
    };

    collapse(&q, '/', false).to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_known_scheme_kept() {
        assert_eq!(prepare("https://example.com"), "https://example.com");
        assert_eq!(prepare("HTTPS:////example.com"), "https://example.com");
        assert_eq!(prepare("ftp:example.com"), "ftp://example.com");
    }

    #[test]
    fn test_prepare_default_scheme() {
        assert_eq!(prepare("example.com"), "http://example.com");
        assert_eq!(prepare("//example.com/a"), "http://example.com/a");
        assert_eq!(prepare("  example.com"), "http://example.com");
        // the colon is a separator only when the prefix is a real scheme
        assert_eq!(
            prepare("example.com/a:b"),
            "http://example.com/a:b"
        );
    }

    #[test]
    fn test_host_case_and_dots() {
        let hp = normalize_host("WWW.Example.COM").unwrap();
        assert_eq!(hp.host, "example.com");
        assert_eq!(hp.port, "");
        assert!(!hp.is_ip);

        let hp = normalize_host("..foo..bar..").unwrap();
        assert_eq!(hp.host, "foo.bar");
    }

    #[test]
    fn test_host_port_split_not_emitted() {
        let hp = normalize_host("Example.com:8080").unwrap();
        assert_eq!(hp.host, "example.com");
        assert_eq!(hp.port, "8080");
    }

    #[test]
    fn test_host_ipv4_forms() {
        let hp = normalize_host("www.0xa.0x40.0x30.0xb").unwrap();
        assert_eq!(hp.host, "10.64.48.11");
        assert!(hp.is_ip);

        // failed IPv4 parse leaves the host textual
        let hp = normalize_host("256.1.2.3").unwrap();
        assert_eq!(hp.host, "256.1.2.3");
        assert!(!hp.is_ip);
    }

    #[test]
    fn test_host_ipv6() {
        let hp = normalize_host("[2001:DB8::1]").unwrap();
        assert_eq!(hp.host, "[2001:db8::1]");
        assert!(hp.is_ip);

        assert!(matches!(
            normalize_host("[::1]:8080"),
            Err(CanonError::InvalidHost(_))
        ));
    }

    #[test]
    fn test_empty_host() {
        assert_eq!(normalize_host("").unwrap(), HostPort::default());
    }

    #[test]
    fn test_path_cleanup() {
        assert_eq!(normalize_path("").unwrap(), "");
        assert_eq!(normalize_path("/A//B/./C/../D/").unwrap(), "a/b/d");
        assert_eq!(normalize_path("/a\\b").unwrap(), "a/b");
        assert_eq!(normalize_path("/x/%41").unwrap(), "x/a");
        assert_eq!(normalize_path("/*").unwrap(), "");
    }

    #[test]
    fn test_path_decode_failure() {
        assert!(matches!(
            normalize_path("/%ff"),
            Err(CanonError::InvalidPath(_))
        ));
    }

    #[test]
    fn test_query_rules() {
        assert_eq!(normalize_query(""), "");
        assert_eq!(normalize_query("A=B%20C"), "a=b c");
        assert_eq!(normalize_query("k=1+2"), "k=1+2");
        assert_eq!(normalize_query("a%00b=c"), "ab=c");
        assert_eq!(normalize_query("p=a//b"), "p=a/b");
        // undecodable bytes keep their escaped spelling
        assert_eq!(normalize_query("k=%FF"), "k=%ff");
    }

    #[test]
    fn test_normalize_end_to_end_smoke() {
        assert_eq!(normalize("https://example.com").unwrap(), "example.com");
        assert_eq!(
            normalize("https://example.com:443/path?q=hello%20world").unwrap(),
            "example.com/path?q=hello world"
        );
        assert_eq!(normalize("example.com").unwrap(), "example.com");
    }

    #[test]
    fn test_trailing_question_mark() {
        // a bare '?' after a directory path goes away together with the
        // slash the tie rule just added
        assert_eq!(normalize("https://example.com/a/?").unwrap(), "example.com/a");
        // after a file-ish path it stays
        assert_eq!(normalize("https://example.com/a?").unwrap(), "example.com/a?");
    }

    #[test]
    fn test_hostport_serde_round_trip() {
        let hp = HostPort {
            host: "10.64.48.11".to_string(),
            port: "8080".to_string(),
            is_ip: true,
        };
        let json = serde_json::to_string(&hp).unwrap();
        assert_eq!(serde_json::from_str::<HostPort>(&json).unwrap(), hp);
    }
}
