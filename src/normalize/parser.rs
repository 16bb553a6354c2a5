//! Adapter over the generic URL parser.
//!
//! Feed rows regularly carry a literal `%` that is not the start of an
//! escape sequence. The wrapped parser may reject such rows; the adapter
//! re-escapes every `%` as `%25` and retries once, which turns the stray
//! byte into a literal that the rest of the pipeline decodes back.

use url::Url;

use crate::error::Result;

/// Intermediate parse result.
///
/// `path` is kept in its escaped form; the normalizer decodes each segment
/// exactly once. `host` is the authority text with the port still attached
/// when the input carried a non-default one.
#[derive(Debug, Clone)]
pub struct ParsedUrl {
    pub scheme: String,
    pub host: String,
    pub path: String,
    pub raw_query: String,
    pub fragment: String,
    /// The input ended in `?` with nothing after it.
    pub force_query: bool,
}

impl ParsedUrl {
    fn from_url(u: &Url, raw: &str) -> Self {
        let mut host = u.host_str().unwrap_or("").to_string();
        if let Some(port) = u.port() {
            host.push(':');
            host.push_str(&port.to_string());
        }

        // The parser reports "/" for a URL with no path at all; the
        // trailing-slash tie rule needs the distinction kept.
        let path = if u.path() == "/" && !has_explicit_path(raw) {
            String::new()
        } else {
            u.path().to_string()
        };

        ParsedUrl {
            scheme: u.scheme().to_string(),
            host,
            path,
            raw_query: u.query().unwrap_or("").to_string(),
            fragment: u.fragment().unwrap_or("").to_string(),
            force_query: u.query() == Some(""),
        }
    }
}

/// Parse `raw` into the intermediate record.
///
/// When the parse fails and the input contains a malformed percent-escape,
/// every `%` is rewritten to `%25` and the parse is retried once. Any
/// other failure, or a failure of the retry, propagates.
pub fn parse_url(raw: &str) -> Result<ParsedUrl> {
    let url = match Url::parse(raw) {
        Ok(u) => u,
        Err(err) => {
            if !has_malformed_escape(raw) {
                return Err(err.into());
            }
            Url::parse(&raw.replace('%', "%25"))?
        }
    };
    Ok(ParsedUrl::from_url(&url, raw))
}

/// True when the text after the authority starts with `/`.
fn has_explicit_path(raw: &str) -> bool {
    let after = match raw.find("://") {
        Some(i) => &raw[i + 3..],
        None => raw,
    };
    match after.find(['/', '?', '#']) {
        Some(i) => after.as_bytes()[i] == b'/',
        None => false,
    }
}

/// True when `s` contains a `%` not followed by two hex digits.
fn has_malformed_escape(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let hex = bytes.get(i + 1).map_or(false, u8::is_ascii_hexdigit)
                && bytes.get(i + 2).map_or(false, u8::is_ascii_hexdigit);
            if !hex {
                return true;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    false
}
