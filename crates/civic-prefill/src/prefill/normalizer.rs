use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonical comparison key for a caller-supplied field id.
///
/// Lower-cases, strips diacritics, and collapses every run of characters
/// outside `[a-z0-9_]` (underscores included) into one underscore, trimmed
/// at both ends. The output is a fixed point of this function.
pub fn normalize_field_id(value: &str) -> String {
    let mut normalized = String::with_capacity(value.len());
    let mut pending_separator = false;

    for ch in value.to_lowercase().nfd().filter(|ch| !is_combining_mark(*ch)) {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_separator && !normalized.is_empty() {
                normalized.push('_');
            }
            pending_separator = false;
            normalized.push(ch);
        } else {
            pending_separator = true;
        }
    }

    normalized
}
