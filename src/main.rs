//! Command-line shell around the identity comparator.
//!
//! Usage:
//!   identity-compare SURNAME1 GIVEN1 LANG1 SURNAME2 GIVEN2 LANG2
//!   identity-compare --json SURNAME1 GIVEN1 LANG1 SURNAME2 GIVEN2 LANG2
//!   identity-compare                 # prompt for the six fields
//!   identity-compare --languages     # list language codes
//!
//! Optional environment variables:
//! - TRANSLATOR (google, openai or none; defaults to google)
//! - OPENAI_API_KEY (required with TRANSLATOR=openai)
//! - TRANSLATION_TIMEOUT_SECS (defaults to 5)
//! - DISPLAY_LANGUAGE (en or fr; defaults to en)

use anyhow::{bail, Context, Result};
use identity_compare::config::Config;
use identity_compare::i18n::{LanguageRegistry, LanguageStrings};
use identity_compare::translation::build_translator;
use identity_compare::{CompareError, IdentityComparator, IdentityForm, TranslationStatus};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries only the result
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("identity_compare=info".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--languages") {
        for lang in LanguageRegistry::get().list_all() {
            println!("{}\t{}", lang.code, lang.name);
        }
        return Ok(ExitCode::SUCCESS);
    }

    let (as_json, fields) = split_flags(args);

    let config = Config::from_env()?;
    let strings = LanguageStrings::for_language(&config.display_language);

    let form = match fields.len() {
        0 => prompt_form(strings)?,
        6 => form_from_args(fields),
        n => bail!(
            "Expected 6 fields (SURNAME1 GIVEN1 LANG1 SURNAME2 GIVEN2 LANG2), got {}",
            n
        ),
    };

    let (first, second) = match form.into_identities() {
        Ok(identities) => identities,
        Err(e) => {
            eprintln!("{}", missing_field_message(strings, &e));
            return Ok(ExitCode::from(2));
        }
    };

    let translator = match build_translator(&config) {
        Ok(translator) => translator,
        Err(e) => {
            eprintln!(
                "{}: {}",
                strings.error_title,
                strings.format_unexpected_error(&format!("{:#}", e))
            );
            return Ok(ExitCode::FAILURE);
        }
    };
    let comparator = IdentityComparator::new(Arc::from(translator))
        .with_timeout(config.translation_timeout);

    info!("Comparing identities");
    let result = comparator.compare(&first, &second).await;
    debug!("Translation metrics: {:?}", comparator.metrics().report());

    if as_json {
        let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
        println!("{}", json);
        return Ok(ExitCode::SUCCESS);
    }

    for field in result.fields() {
        if matches!(field.translation, TranslationStatus::FellBack { .. }) {
            eprintln!(
                "{}",
                strings.format_fallback_notice(strings.field_name(field.field.as_str()))
            );
        }
    }
    println!(
        "{}: {}",
        strings.result_title,
        strings.format_result(result.percentage)
    );

    Ok(ExitCode::SUCCESS)
}

/// Separate the `--json` flag from the positional fields.
fn split_flags(args: Vec<String>) -> (bool, Vec<String>) {
    let as_json = args.iter().any(|arg| arg == "--json");
    let fields = args.into_iter().filter(|arg| arg != "--json").collect();
    (as_json, fields)
}

fn missing_field_message(strings: &LanguageStrings, error: &CompareError) -> String {
    match error {
        CompareError::MissingField { identity, field } => format!(
            "{}: {}",
            strings.error_title,
            strings.format_missing_field(&identity.to_string(), strings.field_name(field))
        ),
    }
}

fn form_from_args(fields: Vec<String>) -> IdentityForm {
    let mut fields = fields.into_iter().map(Some);
    IdentityForm {
        surname1: fields.next().flatten(),
        given_name1: fields.next().flatten(),
        language1: fields.next().flatten(),
        surname2: fields.next().flatten(),
        given_name2: fields.next().flatten(),
        language2: fields.next().flatten(),
    }
}

/// Ask for the six fields on stdin. End of input leaves a field absent.
fn prompt_form(strings: &LanguageStrings) -> Result<IdentityForm> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let mut ask = |label: &str, slot: u8| -> Result<Option<String>> {
        print!("{} {}: ", label, slot);
        io::stdout().flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    };

    Ok(IdentityForm {
        surname1: ask(strings.prompt_surname, 1)?,
        given_name1: ask(strings.prompt_given_name, 1)?,
        language1: ask(strings.prompt_language, 1)?,
        surname2: ask(strings.prompt_surname, 2)?,
        given_name2: ask(strings.prompt_given_name, 2)?,
        language2: ask(strings.prompt_language, 2)?,
    })
}
