//! Sanity checks on text returned by a translation service.
//!
//! A name translation should be a short, single-line name. Language models
//! in particular like to wrap the answer in quotes, end it with a period,
//! or explain themselves; the first two are cleaned up, the last is rejected.

use crate::error::TranslationError;
use regex::Regex;
use std::sync::OnceLock;

/// Validator for translated names.
pub struct TranslationValidator;

// Leading and trailing quote characters, with any spaces inside them
static WRAPPING_QUOTES_REGEX: OnceLock<Regex> = OnceLock::new();

/// Translations longer than this many characters per input character are chatter
const MAX_GROWTH_FACTOR: usize = 4;

/// Slack added to the growth limit so very short names can still expand
const GROWTH_SLACK: usize = 24;

impl TranslationValidator {
    /// Clean a raw translation of `original` and check it still looks like a name.
    ///
    /// # Arguments
    /// * `original` - The normalized name that was sent for translation
    /// * `translated` - The text the service returned
    ///
    /// # Returns
    /// * `Ok(String)` with the cleaned translation
    /// * `Err(EmptyResponse)` if nothing is left after cleaning
    /// * `Err(Malformed)` if the text spans several lines or is far longer than the input
    pub fn clean(original: &str, translated: &str) -> Result<String, TranslationError> {
        let quotes = WRAPPING_QUOTES_REGEX.get_or_init(|| {
            Regex::new(r#"^["'«“‘`\s]+|["'»”’`\s]+$"#).expect("Invalid quotes regex")
        });

        let mut cleaned = quotes.replace_all(translated.trim(), "").into_owned();

        if cleaned.ends_with('.') && !original.trim_end().ends_with('.') {
            cleaned.pop();
            cleaned = cleaned.trim_end().to_string();
        }

        if cleaned.is_empty() {
            return Err(TranslationError::EmptyResponse);
        }

        if cleaned.contains('\n') || cleaned.contains('\r') {
            return Err(TranslationError::Malformed(
                "translation spans several lines".to_string(),
            ));
        }

        let limit = original.chars().count() * MAX_GROWTH_FACTOR + GROWTH_SLACK;
        let length = cleaned.chars().count();
        if length > limit {
            return Err(TranslationError::Malformed(format!(
                "translation is {} characters long for a {}-character name",
                length,
                original.chars().count()
            )));
        }

        Ok(cleaned)
    }
}
