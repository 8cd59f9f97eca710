//! Escaping utilities.
//!
//! Two directions are covered: markdown backslash escapes (read by the inline
//! scanner, written back by the markdown serializer) and HTML escaping for the
//! renderer.

/// Lookup table for characters a backslash may escape.
/// Index by byte value, true if `\` followed by it yields the literal byte.
const ESCAPABLE_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    let chars = b"()[]\\_*.!-`";
    let mut i = 0;
    while i < chars.len() {
        table[chars[i] as usize] = true;
        i += 1;
    }
    table
};

/// Lookup table for bytes that end a plain-text run in the inline scanner.
const INLINE_SPECIAL_TABLE: [bool; 256] = {
    let mut table = [false; 256];
    table[b'\\' as usize] = true;
    table[b'`' as usize] = true;
    table[b'*' as usize] = true;
    table[b'_' as usize] = true;
    table[b'~' as usize] = true;
    table[b'[' as usize] = true;
    table[b'!' as usize] = true;
    table
};

/// True if a backslash before `b` makes `b` literal.
#[inline]
pub fn is_escapable(b: u8) -> bool {
    ESCAPABLE_TABLE[b as usize]
}

/// True if `b` may start inline markup.
#[inline]
pub fn is_inline_special(b: u8) -> bool {
    INLINE_SPECIAL_TABLE[b as usize]
}

/// Offset of the first inline-special byte, if any.
#[inline]
pub fn find_inline_special(input: &[u8]) -> Option<usize> {
    input.iter().position(|&b| is_inline_special(b))
}

/// Append `text` to `out`, putting a backslash before every escapable byte.
///
/// # Example
/// ```
/// use mdscan::escape::escape_markdown_into;
///
/// let mut out = String::new();
/// escape_markdown_into(&mut out, "1. *not* a list");
/// assert_eq!(out, "1\\. \\*not\\* a list");
/// ```
pub fn escape_markdown_into(out: &mut String, text: &str) {
    let bytes = text.as_bytes();
    let mut start = 0;
    for (i, &b) in bytes.iter().enumerate() {
        if is_escapable(b) {
            // Escapable bytes are ASCII, so `i` is a char boundary.
            out.push_str(&text[start..i]);
            out.push('\\');
            start = i;
        }
    }
    out.push_str(&text[start..]);
}

/// Append HTML-escaped text content.
#[inline]
pub fn escape_html_into(out: &mut String, text: &str) {
    out.push_str(&html_escape::encode_text(text));
}

/// Append an HTML-escaped double-quoted attribute value.
#[inline]
pub fn escape_attr_into(out: &mut String, text: &str) {
    out.push_str(&html_escape::encode_double_quoted_attribute(text));
}

/// Append a link destination for an `href`/`src` attribute.
///
/// Bytes that are not valid in a URL are percent-encoded; `&`, `<`, `>` and
/// `'` are HTML-escaped.
pub fn escape_url_into(out: &mut String, url: &str) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    for &b in url.as_bytes() {
        match b {
            b'&' => out.push_str("&amp;"),
            b'<' => out.push_str("&lt;"),
            b'>' => out.push_str("&gt;"),
            b'\'' => out.push_str("&#39;"),
            b'"' => out.push_str("%22"),
            b'\\' => out.push_str("%5C"),
            0x00..=0x20 | 0x7F..=0xFF => {
                out.push('%');
                out.push(HEX[(b >> 4) as usize] as char);
                out.push(HEX[(b & 0xF) as usize] as char);
            }
            _ => out.push(b as char),
        }
    }
}
