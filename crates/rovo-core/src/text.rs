//! Text helpers for log fields.

/// Truncate `s` to at most `max_chars` characters, appending `…` when cut.
///
/// Always cuts on a char boundary, so it is safe on arbitrary frame text.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => format!("{}…", &s[..byte_idx]),
        None => s.to_owned(),
    }
}
