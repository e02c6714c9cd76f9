//! Language code attached to an identity.
//!
//! Codes are not validated here: whichever set of codes is valid belongs to
//! the translation service. The only interpretation made is that blank input
//! means the language is unknown.

use serde::{Serialize, Serializer};
use std::fmt;

/// An ISO 639-1-style language code, or the unknown marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LanguageCode {
    /// Trimmed, lowercased code as supplied (e.g. "fr", "zh-cn")
    Known(String),
    /// No language was declared
    #[default]
    Unknown,
}

impl LanguageCode {
    /// Parse user input leniently.
    ///
    /// Surrounding whitespace is ignored and the code is lowercased.
    ///
    /// # Arguments
    /// * `input` - Raw language field as typed (e.g., " FR ", "zh-CN", "")
    ///
    /// # Returns
    /// * `LanguageCode::Known` with the lowercased code
    /// * `LanguageCode::Unknown` if the input is blank
    pub fn parse(input: &str) -> LanguageCode {
        let code = input.trim();
        if code.is_empty() {
            LanguageCode::Unknown
        } else {
            LanguageCode::Known(code.to_lowercase())
        }
    }

    /// The code, if known.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            LanguageCode::Known(code) => Some(code),
            LanguageCode::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, LanguageCode::Known(_))
    }
}

impl From<&str> for LanguageCode {
    fn from(input: &str) -> Self {
        LanguageCode::parse(input)
    }
}

impl From<Option<&str>> for LanguageCode {
    fn from(input: Option<&str>) -> Self {
        input.map(LanguageCode::parse).unwrap_or_default()
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageCode::Known(code) => write!(f, "{}", code),
            LanguageCode::Unknown => write!(f, "unknown"),
        }
    }
}

impl Serialize for LanguageCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(code) => serializer.serialize_some(code),
            None => serializer.serialize_none(),
        }
    }
}
