//! Identity comparison pipeline.
//!
//! Both identities are normalized, the second identity's names are brought
//! into the first identity's language when possible, each name field is
//! scored, and the two scores are averaged into a percentage.
//!
//! Translation is best-effort. A failed, refused, slow, or unusable
//! translation only means that field is compared as written; `compare`
//! itself cannot fail.

use crate::error::{CompareError, IdentitySlot, TranslationError};
use crate::i18n::LanguageCode;
use crate::normalize::normalize_name;
use crate::similarity::similarity;
use crate::translation::{DisabledTranslator, TranslationMetrics, TranslationValidator, Translator};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Upper bound on a single translation attempt.
pub const DEFAULT_TRANSLATION_TIMEOUT: Duration = Duration::from_secs(5);

// ==================== Identities ====================

/// One recorded identity. Constructed per comparison and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Identity {
    pub surname: String,
    pub given_name: String,
    pub language: LanguageCode,
}

impl Identity {
    pub fn new(
        surname: impl Into<String>,
        given_name: impl Into<String>,
        language: impl Into<LanguageCode>,
    ) -> Self {
        Self {
            surname: surname.into(),
            given_name: given_name.into(),
            language: language.into(),
        }
    }
}

/// One submission from a form or prompt: six fields, any of which may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdentityForm {
    pub surname1: Option<String>,
    pub given_name1: Option<String>,
    pub language1: Option<String>,
    pub surname2: Option<String>,
    pub given_name2: Option<String>,
    pub language2: Option<String>,
}

impl IdentityForm {
    /// Build both identities.
    ///
    /// An absent surname or given name is rejected; an empty one is a valid
    /// zero-length name. An absent language means the language is unknown.
    pub fn into_identities(self) -> Result<(Identity, Identity), CompareError> {
        let first = build_identity(
            IdentitySlot::First,
            self.surname1,
            self.given_name1,
            self.language1,
        )?;
        let second = build_identity(
            IdentitySlot::Second,
            self.surname2,
            self.given_name2,
            self.language2,
        )?;
        Ok((first, second))
    }
}

fn build_identity(
    slot: IdentitySlot,
    surname: Option<String>,
    given_name: Option<String>,
    language: Option<String>,
) -> Result<Identity, CompareError> {
    let surname = surname.ok_or(CompareError::MissingField {
        identity: slot,
        field: NameField::Surname.as_str(),
    })?;
    let given_name = given_name.ok_or(CompareError::MissingField {
        identity: slot,
        field: NameField::GivenName.as_str(),
    })?;
    Ok(Identity::new(
        surname,
        given_name,
        LanguageCode::from(language.as_deref()),
    ))
}

// ==================== Results ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NameField {
    Surname,
    GivenName,
}

impl NameField {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameField::Surname => "surname",
            NameField::GivenName => "given_name",
        }
    }
}

impl fmt::Display for NameField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field was compared without asking the translation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// At least one identity declares no language
    UnknownLanguage,
    /// Both identities declare the same language
    SameLanguage,
    /// Nothing to translate
    EmptyName,
}

/// What happened to the second identity's value of a field before scoring.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TranslationStatus {
    Translated { from: String, to: String },
    Skipped { reason: SkipReason },
    FellBack { reason: String },
}

/// Score of one name field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldComparison {
    pub field: NameField,
    /// First identity's normalized value
    pub reference: String,
    /// Second identity's normalized value, translated when possible
    pub candidate: String,
    /// Similarity in `[0.0, 1.0]`
    pub score: f64,
    pub translation: TranslationStatus,
}

/// Outcome of one comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Mean of the field scores as a percentage, rounded to two decimals
    pub percentage: f64,
    pub surname: FieldComparison,
    pub given_name: FieldComparison,
}

impl ComparisonResult {
    pub fn fields(&self) -> [&FieldComparison; 2] {
        [&self.surname, &self.given_name]
    }

    /// Whether any field had to be compared without a wanted translation.
    pub fn translation_fell_back(&self) -> bool {
        self.fields()
            .iter()
            .any(|field| matches!(field.translation, TranslationStatus::FellBack { .. }))
    }
}

/// `round(score * 100, 2)`
fn to_percentage(score: f64) -> f64 {
    (score * 10_000.0).round() / 100.0
}

// ==================== Comparator ====================

/// Compares identities through a translation service.
///
/// Holds no per-comparison state, so one comparator may serve any number of
/// concurrent comparisons as long as its translator is `Sync` (which the
/// trait requires).
pub struct IdentityComparator {
    translator: Arc<dyn Translator>,
    timeout: Duration,
    metrics: TranslationMetrics,
}

impl IdentityComparator {
    pub fn new(translator: Arc<dyn Translator>) -> Self {
        Self {
            translator,
            timeout: DEFAULT_TRANSLATION_TIMEOUT,
            metrics: TranslationMetrics::new(),
        }
    }

    /// A comparator that scores names exactly as written.
    pub fn without_translation() -> Self {
        Self::new(Arc::new(DisabledTranslator))
    }

    /// Set the bound on each translation attempt.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn metrics(&self) -> &TranslationMetrics {
        &self.metrics
    }

    /// Estimate how likely `first` and `second` are the same person.
    pub async fn compare(&self, first: &Identity, second: &Identity) -> ComparisonResult {
        let reference_surname = normalize_name(&first.surname);
        let reference_given = normalize_name(&first.given_name);
        let surname = normalize_name(&second.surname);
        let given_name = normalize_name(&second.given_name);

        // The two fields are independent; translate them concurrently
        let (surname_candidate, given_candidate) = tokio::join!(
            self.align(NameField::Surname, &surname, &second.language, &first.language),
            self.align(NameField::GivenName, &given_name, &second.language, &first.language),
        );

        let surname = score_field(NameField::Surname, reference_surname, surname_candidate);
        let given_name = score_field(NameField::GivenName, reference_given, given_candidate);

        let overall = (surname.score + given_name.score) / 2.0;
        let percentage = to_percentage(overall);

        debug!(
            "Compared identities: surname {:.4}, given name {:.4}, overall {}%",
            surname.score, given_name.score, percentage
        );

        ComparisonResult {
            percentage,
            surname,
            given_name,
        }
    }

    /// The programmatic entry point: six raw fields in, one percentage out.
    pub async fn compare_identities(
        &self,
        surname1: &str,
        given_name1: &str,
        language1: &str,
        surname2: &str,
        given_name2: &str,
        language2: &str,
    ) -> f64 {
        let first = Identity::new(surname1, given_name1, language1);
        let second = Identity::new(surname2, given_name2, language2);
        self.compare(&first, &second).await.percentage
    }

    /// Bring a normalized name into the target language, or keep it as is.
    async fn align(
        &self,
        field: NameField,
        name: &str,
        source: &LanguageCode,
        target: &LanguageCode,
    ) -> (String, TranslationStatus) {
        let (source, target) = match (source.as_str(), target.as_str()) {
            (Some(source), Some(target)) => (source, target),
            _ => return self.skip(field, name, SkipReason::UnknownLanguage),
        };
        if source == target {
            return self.skip(field, name, SkipReason::SameLanguage);
        }
        if name.is_empty() {
            return self.skip(field, name, SkipReason::EmptyName);
        }

        self.metrics.record_attempt();
        match self.translate_once(name, source, target).await {
            Ok(translated) => {
                self.metrics.record_success();
                debug!("Translated {} {} -> {}", field, source, target);
                (
                    normalize_name(&translated),
                    TranslationStatus::Translated {
                        from: source.to_string(),
                        to: target.to_string(),
                    },
                )
            }
            Err(error) => {
                self.metrics.record_failure();
                warn!(
                    "Translation of {} ({} -> {}) via {} failed: {}. Comparing without translation, the result may be affected",
                    field,
                    source,
                    target,
                    self.translator.name(),
                    error
                );
                (
                    name.to_string(),
                    TranslationStatus::FellBack {
                        reason: error.to_string(),
                    },
                )
            }
        }
    }

    /// One bounded attempt, with the answer cleaned up and checked.
    async fn translate_once(
        &self,
        name: &str,
        source: &str,
        target: &str,
    ) -> Result<String, TranslationError> {
        let raw = tokio::time::timeout(
            self.timeout,
            self.translator.translate(name, source, target),
        )
        .await
        .map_err(|_| TranslationError::Timeout(self.timeout))??;

        TranslationValidator::clean(name, &raw)
    }

    fn skip(&self, field: NameField, name: &str, reason: SkipReason) -> (String, TranslationStatus) {
        self.metrics.record_skip();
        debug!("Not translating {}: {:?}", field, reason);
        (name.to_string(), TranslationStatus::Skipped { reason })
    }
}

impl Default for IdentityComparator {
    fn default() -> Self {
        Self::without_translation()
    }
}

fn score_field(
    field: NameField,
    reference: String,
    (candidate, translation): (String, TranslationStatus),
) -> FieldComparison {
    let score = similarity(&reference, &candidate);
    FieldComparison {
        field,
        reference,
        candidate,
        score,
        translation,
    }
}

/// Compare six raw fields with a one-off comparator.
pub async fn compare_identities(
    translator: Arc<dyn Translator>,
    surname1: &str,
    given_name1: &str,
    language1: &str,
    surname2: &str,
    given_name2: &str,
    language2: &str,
) -> f64 {
    IdentityComparator::new(translator)
        .compare_identities(surname1, given_name1, language1, surname2, given_name2, language2)
        .await
}
