//! Error types for the urlcanon normalization engine.
//!
//! All fallible operations in the crate surface a [`CanonError`] through the
//! crate-wide [`Result`] alias. Normalization is all-or-nothing: any error
//! aborts the input it belongs to and no partial output is produced.

use thiserror::Error;

/// Main error type for urlcanon operations.
#[derive(Debug, Error)]
pub enum CanonError {
    /// An IP normalizer received an empty string.
    #[error("value is empty")]
    EmptyValue,

    /// Too many segments, a segment exceeds its allowed width, or a
    /// segment's digits are invalid for the detected base.
    #[error("invalid IPv4 format")]
    InvalidIpv4,

    /// The inner literal is not parseable as an IPv6 address.
    #[error("not an IPv6 address")]
    InvalidIpv6,

    /// Host normalization failed.
    #[error("invalid url host")]
    InvalidHost(#[source] Box<CanonError>),

    /// Percent-decoding a path segment did not yield valid UTF-8.
    #[error("invalid url path")]
    InvalidPath(#[source] std::str::Utf8Error),

    /// The URL parser rejected the input, even after the escape retry.
    #[error("url parse error: {0}")]
    Parse(#[from] url::ParseError),

    /// File I/O errors (driver only).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for urlcanon operations.
pub type Result<T> = std::result::Result<T, CanonError>;
