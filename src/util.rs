//! Input decoding.

use std::borrow::Cow;

/// How far into the document to look for a charset declaration.
const SNIFF_LEN: usize = 1024;

/// Decode a saved HTML page to a string.
///
/// 1. UTF-8 (a BOM is honored and stripped)
/// 2. The charset declared by a `<meta>` tag near the top of the page
/// 3. Windows-1252, which browsers assume for legacy pages
///
/// Valid UTF-8 input is borrowed, not copied.
pub fn decode_text(bytes: &[u8]) -> Cow<'_, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);
    if !malformed {
        return result;
    }

    // A UTF-16 declaration in ASCII-compatible markup means UTF-8.
    if let Some(label) = sniff_charset(bytes)
        && let Some(encoding) = encoding_rs::Encoding::for_label(label)
    {
        let encoding = encoding.output_encoding();
        tracing::debug!(encoding = encoding.name(), "decoding with declared charset");
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    tracing::debug!("input is not UTF-8; decoding as windows-1252");
    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Find the value of the first `charset=` in the head of the document.
///
/// Covers both `<meta charset="...">` and the `http-equiv` form
/// `content="text/html; charset=..."`.
fn sniff_charset(bytes: &[u8]) -> Option<&[u8]> {
    const NEEDLE: &[u8] = b"charset=";

    let head = &bytes[..bytes.len().min(SNIFF_LEN)];
    let start = head
        .windows(NEEDLE.len())
        .position(|w| w.eq_ignore_ascii_case(NEEDLE))?
        + NEEDLE.len();

    let rest = &head[start..];
    let rest = rest.strip_prefix(b"\"").or_else(|| rest.strip_prefix(b"'")).unwrap_or(rest);
    let end = rest
        .iter()
        .position(|&b| matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace())
        .unwrap_or(rest.len());

    (end > 0).then(|| &rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_is_borrowed() {
        let text = decode_text("Exer and Hold – 10".as_bytes());
        assert!(matches!(text, Cow::Borrowed(_)));
        assert_eq!(text, "Exer and Hold – 10");
    }

    #[test]
    fn test_bom_is_stripped() {
        assert_eq!(decode_text(b"\xEF\xBB\xBF<html>"), "<html>");
    }

    #[test]
    fn test_declared_charset() {
        let page = b"<meta http-equiv=\"Content-Type\" content=\"text/html; charset=iso-8859-15\">\xA4";
        assert!(decode_text(page).ends_with('€'));
    }

    #[test]
    fn test_declared_utf16_is_read_as_utf8() {
        let page = b"<meta charset=\"utf-16\"><p>caf\xC3\xA9 \xFF</p>";
        assert_eq!(decode_text(page), "<meta charset=\"utf-16\"><p>caf\u{E9} \u{FFFD}</p>");
    }

    #[test]
    fn test_windows_1252_fallback() {
        let page = b"<p>\x93quoted\x94</p>";
        assert_eq!(decode_text(page), "<p>\u{201C}quoted\u{201D}</p>");
    }

    #[test]
    fn test_sniff_charset_forms() {
        assert_eq!(sniff_charset(b"<meta charset=\"utf-8\">"), Some(&b"utf-8"[..]));
        assert_eq!(sniff_charset(b"<META CHARSET=latin1>"), Some(&b"latin1"[..]));
        assert_eq!(
            sniff_charset(b"content='text/html; charset=windows-1252'"),
            Some(&b"windows-1252"[..])
        );
        assert_eq!(sniff_charset(b"<meta charset=\"\">"), None);
        assert_eq!(sniff_charset(b"<html>"), None);
    }
}
