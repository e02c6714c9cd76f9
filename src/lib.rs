//! Estimate the probability that two recorded identities refer to the same
//! person by normalizing their names, translating one identity's names into
//! the other's language when a translation service is available, and scoring
//! the textual similarity of each name field.

pub mod comparator;
pub mod config;
pub mod error;
pub mod i18n;
pub mod normalize;
pub mod similarity;
pub mod translation;

pub use comparator::{
    compare_identities, ComparisonResult, FieldComparison, Identity, IdentityComparator,
    IdentityForm, NameField, SkipReason, TranslationStatus,
};
pub use error::{CompareError, TranslationError};
pub use normalize::normalize_name;
pub use similarity::similarity;
pub use translation::Translator;
