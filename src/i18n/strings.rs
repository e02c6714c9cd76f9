use crate::i18n::LanguageCode;

/// All localized user-facing strings of the command-line shell
#[derive(Debug, Clone)]
pub struct LanguageStrings {
    // ==================== Results ====================
    /// Title shown above a successful comparison
    pub result_title: &'static str,

    /// Sentence announcing the score
    /// Placeholders: {percentage}
    pub result_message: &'static str,

    /// Notice shown when a field was compared without translation
    /// Placeholders: {field}
    pub translation_fallback_notice: &'static str,

    // ==================== Errors ====================
    /// Title shown above an error
    pub error_title: &'static str,

    /// Message shown when a required name is missing
    /// Placeholders: {identity}, {field}
    pub missing_field: &'static str,

    /// Message shown for any other failure
    /// Placeholders: {error}
    pub unexpected_error: &'static str,

    // ==================== Prompts ====================
    pub prompt_surname: &'static str,
    pub prompt_given_name: &'static str,
    pub prompt_language: &'static str,

    // ==================== Field Names ====================
    pub field_surname: &'static str,
    pub field_given_name: &'static str,
}

impl LanguageStrings {
    /// Strings for a display language, falling back to English.
    ///
    /// # Arguments
    /// * `language` - The configured display language
    ///
    /// # Returns
    /// French strings for "fr", English strings for anything else.
    pub fn for_language(language: &LanguageCode) -> &'static LanguageStrings {
        match language.as_str() {
            Some("fr") => &FRENCH_STRINGS,
            _ => &ENGLISH_STRINGS,
        }
    }

    pub fn format_result(&self, percentage: f64) -> String {
        self.result_message
            .replace("{percentage}", &format!("{:.2}", percentage))
    }

    pub fn format_fallback_notice(&self, field: &str) -> String {
        self.translation_fallback_notice.replace("{field}", field)
    }

    pub fn format_missing_field(&self, identity: &str, field: &str) -> String {
        self.missing_field
            .replace("{identity}", identity)
            .replace("{field}", field)
    }

    pub fn format_unexpected_error(&self, error: &str) -> String {
        self.unexpected_error.replace("{error}", error)
    }

    /// Localized name of a field (`surname` or `given_name`).
    pub fn field_name(&self, field: &str) -> &'static str {
        match field {
            "surname" => self.field_surname,
            _ => self.field_given_name,
        }
    }
}

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: LanguageStrings = LanguageStrings {
    result_title: "Result",
    result_message:
        "The probability that both identities belong to the same person is {percentage} %",
    translation_fallback_notice:
        "Translation unavailable for the {field}: compared without translation, the result may be affected",

    error_title: "Error",
    missing_field: "Identity {identity}: please enter the {field}",
    unexpected_error: "An error occurred: {error}",

    prompt_surname: "Surname",
    prompt_given_name: "Given name",
    prompt_language: "Language",

    field_surname: "surname",
    field_given_name: "given name",
};

// ==================== French Strings ====================

pub const FRENCH_STRINGS: LanguageStrings = LanguageStrings {
    result_title: "Résultat",
    result_message:
        "La probabilité que les deux identités appartiennent à la même personne est de {percentage} %",
    translation_fallback_notice:
        "Traduction indisponible pour le {field} : comparaison sans traduction, le résultat peut être affecté",

    error_title: "Erreur",
    missing_field: "Identité {identity} : veuillez saisir le {field}",
    unexpected_error: "Une erreur s'est produite : {error}",

    prompt_surname: "Nom",
    prompt_given_name: "Prénom",
    prompt_language: "Langue",

    field_surname: "nom",
    field_given_name: "prénom",
};

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Selection Tests ====================

    #[test]
    fn test_for_language_french() {
        let strings = LanguageStrings::for_language(&LanguageCode::parse("fr"));
        assert_eq!(strings.result_title, "Résultat");
    }

    #[test]
    fn test_for_language_falls_back_to_english() {
        for code in ["en", "de", ""] {
            let strings = LanguageStrings::for_language(&LanguageCode::parse(code));
            assert_eq!(strings.result_title, "Result");
        }
    }

    // ==================== Placeholder Tests ====================

    #[test]
    fn test_result_messages_have_placeholder() {
        assert!(ENGLISH_STRINGS.result_message.contains("{percentage}"));
        assert!(FRENCH_STRINGS.result_message.contains("{percentage}"));
    }

    #[test]
    fn test_format_result_two_decimals() {
        let message = FRENCH_STRINGS.format_result(90.0);
        assert!(message.ends_with("est de 90.00 %"));
    }

    #[test]
    fn test_format_missing_field() {
        let message = ENGLISH_STRINGS.format_missing_field("2", ENGLISH_STRINGS.field_surname);
        assert_eq!(message, "Identity 2: please enter the surname");
    }

    #[test]
    fn test_format_fallback_notice() {
        let notice = FRENCH_STRINGS.format_fallback_notice(FRENCH_STRINGS.field_given_name);
        assert!(notice.contains("prénom"));
        assert!(!notice.contains("{field}"));
    }

    #[test]
    fn test_field_name_lookup() {
        assert_eq!(FRENCH_STRINGS.field_name("surname"), "nom");
        assert_eq!(FRENCH_STRINGS.field_name("given_name"), "prénom");
    }
}
