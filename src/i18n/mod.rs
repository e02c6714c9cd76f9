//! Language handling: identity language codes, the catalogue of languages
//! the translation service accepts, and the shell's localized messages.
//!
//! - `language`: `LanguageCode`, the lenient, pass-through code attached to an identity
//! - `registry`: Single source of truth for translatable languages and their names
//! - `strings`: Localized user-facing strings for the command-line shell
//!
//! # Example
//!
//! ```rust,ignore
//! use identity_compare::i18n::{LanguageCode, LanguageRegistry};
//!
//! let french = LanguageCode::parse("FR");
//! assert_eq!(french.as_str(), Some("fr"));
//!
//! let supported = LanguageRegistry::get().is_supported("fr");
//! ```

mod language;
mod registry;
mod strings;

pub use language::LanguageCode;
pub use registry::{LanguageInfo, LanguageRegistry};
pub use strings::LanguageStrings;
