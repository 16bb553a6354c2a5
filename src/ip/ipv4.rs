//! Multi-base numeric IPv4 parsing and canonicalization.

use crate::error::{CanonError, Result};

/// Canonicalize a numeric IPv4 host into dotted-decimal form.
///
/// Accepts 1 to 4 dot-separated segments, each decimal, octal (leading
/// zero) or hex (leading `0x`). Every segment but the last must fit one
/// byte; the last expands big-endian into the remaining bytes, so
/// `30.31.8225` and `30.2039841` both canonicalize to `30.31.32.33`.
pub fn normalize_ipv4(s: &str) -> Result<String> {
    let s = s.trim();
    if s.is_empty() {
        return Err(CanonError::EmptyValue);
    }

    let segments: Vec<&str> = s.split('.').collect();
    if segments.len() > 4 {
        return Err(CanonError::InvalidIpv4);
    }

    let mut out = String::new();
    for seg in &segments[..segments.len() - 1] {
        let num = parse_segment(seg, 1)?;
        out.push_str(&num.to_string());
        out.push('.');
    }

    let tail = parse_segment(segments[segments.len() - 1], 5 - segments.len())?;
    out.push_str(&expand_tail(tail, segments.len() - 1));
    Ok(out)
}

/// Parse one segment in its detected base and enforce the width bound.
///
/// The bound for a `width`-byte segment is `0xFF * 0xFF^(width-1)`, not
/// `0x100^width - 1`; downstream feed matching depends on this exact
/// acceptance set.
fn parse_segment(seg: &str, width: usize) -> Result<u32> {
    let num = if let Some(hex) = seg.strip_prefix("0x") {
        parse_u32(hex, 16)
    } else if seg.len() > 1 && seg.starts_with('0') {
        parse_u32(&seg[1..], 8)
    } else {
        parse_u32(seg, 10)
    }?;

    let mut max: u64 = 0xFF;
    for _ in 1..width {
        max *= 0xFF;
    }
    if u64::from(num) > max {
        return Err(CanonError::InvalidIpv4);
    }
    Ok(num)
}

fn parse_u32(digits: &str, radix: u32) -> Result<u32> {
    // from_str_radix tolerates a leading '+', which is not a valid host byte
    if digits.starts_with('+') {
        return Err(CanonError::InvalidIpv4);
    }
    u32::from_str_radix(digits, radix).map_err(|_| CanonError::InvalidIpv4)
}

/// Expand `value` big-endian into dotted bytes, skipping the bytes already
/// emitted as leading segments.
fn expand_tail(value: u32, skip: usize) -> String {
    value.to_be_bytes()[skip..]
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(".")
}
