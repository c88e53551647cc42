//! Text Normalization Service
//!
//! Pure domain logic for turning raw database text into UTF-8 strings.
//! This service has NO external dependencies - it's pure Rust.

use crate::domain::value_objects::RawText;

/// Converts raw database text to UTF-8.
///
/// Text that is already valid UTF-8 is returned unchanged. Anything else is
/// treated as ISO-8859-1, where every byte maps to the Unicode code point
/// of the same value.
pub struct TextNormalizer;

impl TextNormalizer {
    /// Normalize one raw value.
    ///
    /// # Example
    /// ```
    /// use geoip_provider::domain::services::TextNormalizer;
    /// use geoip_provider::domain::value_objects::RawText;
    ///
    /// let latin1 = RawText::from_bytes(vec![0x53, 0xE3, 0x6F]);
    /// assert_eq!(TextNormalizer::normalize(&latin1), "São");
    /// ```
    pub fn normalize(raw: &RawText) -> String {
        match std::str::from_utf8(raw.as_bytes()) {
            Ok(s) => s.to_string(),
            Err(_) => raw.as_bytes().iter().map(|&b| char::from(b)).collect(),
        }
    }

    /// Normalize an optional value, keeping absence as-is.
    pub fn normalize_opt(raw: Option<&RawText>) -> Option<String> {
        raw.map(Self::normalize)
    }

    /// Normalize a value that only counts when non-empty.
    ///
    /// Empty text is folded into absence.
    pub fn normalize_non_empty(raw: Option<&RawText>) -> Option<String> {
        raw.filter(|t| !t.is_empty()).map(Self::normalize)
    }
}
