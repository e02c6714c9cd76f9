use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Why a translation attempt produced no usable text.
///
/// Every variant is recoverable: the comparator falls back to the
/// untranslated name and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    #[error("translation timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("unsupported language pair: {from} -> {to}")]
    UnsupportedLanguage { from: String, to: String },

    #[error("translation API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("translation response was empty")]
    EmptyResponse,

    #[error("malformed translation response: {0}")]
    Malformed(String),

    #[error("no translation service configured")]
    NotConfigured,
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            // reqwest does not expose the configured duration
            TranslationError::Network(format!("request timed out: {}", error))
        } else if error.is_decode() {
            TranslationError::Malformed(error.to_string())
        } else {
            TranslationError::Network(error.to_string())
        }
    }
}

/// Which of the two identities a field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySlot {
    First,
    Second,
}

impl fmt::Display for IdentitySlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentitySlot::First => write!(f, "1"),
            IdentitySlot::Second => write!(f, "2"),
        }
    }
}

/// Rejections surfaced to the caller of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompareError {
    #[error("identity {identity}: missing required field `{field}`")]
    MissingField {
        identity: IdentitySlot,
        field: &'static str,
    },
}
