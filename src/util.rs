//! Byte-level helpers for HTML sources that arrive undecoded.

use std::borrow::Cow;

use memchr::memmem;

/// Decode bytes to a string, handling various encodings.
///
/// This function:
/// 1. First tries UTF-8 (handles BOM automatically via encoding_rs)
/// 2. If malformed, tries the hint encoding (from `<meta charset>` or an XML declaration)
/// 3. Falls back to Windows-1252 (common in legacy CMS exports)
///
/// Uses `Cow<str>` to avoid allocation when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    // Fallback: Windows-1252 (superset of ISO-8859-1)
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find a declared encoding near the start of an HTML source.
///
/// Checks `<meta charset="...">`, `<meta http-equiv content="...; charset=...">`
/// and `<?xml encoding="..."?>` within the first 1024 bytes, the window
/// browsers use for prescanning.
pub fn sniff_encoding(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];
    find_charset(prefix).or_else(|| extract_xml_encoding(prefix))
}

/// Value following the first `charset=` (ASCII case-insensitive).
fn find_charset(bytes: &[u8]) -> Option<&str> {
    let lower = bytes.to_ascii_lowercase();
    let pos = memmem::find(&lower, b"charset=")?;
    let rest = &bytes[pos + b"charset=".len()..];

    let (rest, quote) = match rest.first() {
        Some(&q @ (b'"' | b'\'')) => (&rest[1..], Some(q)),
        _ => (rest, None),
    };
    let end = rest
        .iter()
        .position(|&b| match quote {
            Some(q) => b == q,
            None => b.is_ascii_whitespace() || matches!(b, b'"' | b'\'' | b';' | b'>' | b'/'),
        })
        .unwrap_or(rest.len());

    let value = std::str::from_utf8(&rest[..end]).ok()?.trim();
    (!value.is_empty()).then_some(value)
}

/// Extract encoding from an XML declaration.
///
/// Parses `<?xml version="1.0" encoding="windows-1252"?>` and returns the
/// encoding name if found.
pub fn extract_xml_encoding(bytes: &[u8]) -> Option<&str> {
    let check_len = bytes.len().min(100);
    let prefix = &bytes[..check_len];

    let xml_start = memmem::find(prefix, b"<?xml")?;
    let after_xml = &prefix[xml_start..];

    let enc_pos = after_xml
        .windows(9)
        .position(|w| w.eq_ignore_ascii_case(b"encoding="))?;
    let after_enc = &after_xml[enc_pos + 9..];

    let quote = *after_enc.first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }

    let value_end = after_enc[1..].iter().position(|&b| b == quote)? + 1;
    std::str::from_utf8(&after_enc[1..value_end]).ok()
}
