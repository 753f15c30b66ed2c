//! Description normalization for accent- and case-insensitive matching.

use unicode_normalization::UnicodeNormalization;

/// Normalize a description: strip diacritics, uppercase, map everything
/// outside `[A-Z0-9 ]` to a space, collapse spaces and trim.
///
/// Characters with no ASCII decomposition are dropped.
pub fn normalize(text: &str) -> String {
    let mapped: String = text
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| {
            let c = c.to_ascii_uppercase();
            if c.is_ascii_uppercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();

    mapped.split_whitespace().collect::<Vec<_>>().join(" ")
}
