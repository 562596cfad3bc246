//! Length section - minimum length in UTF-16 code units.

/// Length of `value` as a browser input reports it: UTF-16 code units, so a
/// character outside the BMP counts twice.
pub fn text_length(value: &str) -> usize {
    value.encode_utf16().count()
}

/// Checks the value has a [`text_length`] of at least `min`.
pub fn has_min_length(value: &str, min: usize) -> bool {
    text_length(value) >= min
}
