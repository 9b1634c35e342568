//! Lowercase hexadecimal rendering of digests.

/// Render `hash` as lowercase hex into `out`, followed by a NUL terminator.
///
/// `out` must hold at least `2 * hash.len() + 1` bytes. On success the
/// visible `2 * hash.len()` characters are returned. On failure (empty
/// `hash` or short `out`) a non-empty `out` is cleared to an empty C string
/// by zeroing its first byte, and `None` is returned. Nothing is ever
/// written past `out.len()`.
pub fn format_hex<'a>(hash: &[u8], out: &'a mut [u8]) -> Option<&'a str> {
    let text_len = hash.len() * 2;
    if hash.is_empty() || out.len() < text_len + 1 {
        if let Some(first) = out.first_mut() {
            *first = 0;
        }
        return None;
    }

    let (text, rest) = out.split_at_mut(text_len);
    hex::encode_to_slice(hash, text).ok()?;
    rest[0] = 0;
    std::str::from_utf8(text).ok()
}

/// Owned, length-delimited form of [`format_hex`].
pub fn to_hex(hash: &[u8]) -> String { hex::encode(hash) }
