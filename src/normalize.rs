//! Name normalization: accent stripping and case folding.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Canonicalize a raw name so comparisons ignore accents and case.
///
/// The name is decomposed (NFD) so base letters and their combining marks
/// are separate characters, every combining mark is dropped, and what is
/// left is lowercased. Total over all strings; the result is idempotent.
pub fn normalize_name(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}
