use std::path::PathBuf;

use serde_json::{Value, json};

use magpie_core::error::{ParseError, ProfileStoreError, SearchError, WizardError};
use magpie_core::settings::OutputMode;

pub fn client() -> reqwest::Client {
    reqwest::Client::new()
}

/// Print a structured cli_error object to stderr.
pub fn cli_error(message: &str, docs_hint: Option<&str>) {
    let mut err = json!({
        "error": "cli_error",
        "message": message
    });
    if let Some(hint) = docs_hint {
        err["docs_hint"] = json!(hint);
    }
    eprintln!("{}", serde_json::to_string_pretty(&err).unwrap_or_default());
}

/// Report a usage problem (bad flag value, malformed input) and return the
/// usage exit code.
pub fn usage_error(message: &str, docs_hint: Option<&str>) -> i32 {
    cli_error(message, docs_hint);
    4
}

/// Map a wizard failure to the CLI's exit codes and print it.
///
/// Exit codes: 0=success, 1=client/validation, 2=server error,
///             3=connection error, 4=usage error
pub fn fail(error: &WizardError) -> i32 {
    let code = exit_code(error);
    cli_error(&error.to_string(), hint_for(error, code));
    code
}

fn exit_code(error: &WizardError) -> i32 {
    match error {
        WizardError::Profile(ProfileStoreError::Connection(_))
        | WizardError::Parse(ParseError::Connection(_))
        | WizardError::Search(SearchError::Connection(_)) => 3,
        WizardError::Profile(ProfileStoreError::Rejected { status, .. })
        | WizardError::Parse(ParseError::Rejected { status, .. })
        | WizardError::Search(SearchError::Rejected { status, .. })
            if *status >= 500 =>
        {
            2
        }
        _ => 1,
    }
}

fn hint_for(error: &WizardError, code: i32) -> Option<&'static str> {
    if code == 3 {
        return Some("Is the API server running? Check MAGPIE_API_URL.");
    }
    match error {
        WizardError::StepAccessDenied { .. } => {
            Some("Finish the earlier steps with `magpie onboard next` first.")
        }
        WizardError::UnknownField { .. } => {
            Some("Run `magpie onboard show` to see the draft's field names.")
        }
        _ => None,
    }
}

/// Bearer token for API requests, when one is configured.
pub fn resolve_token() -> Option<String> {
    std::env::var("MAGPIE_API_KEY").ok()
}

pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("magpie")
}

/// Where the in-progress draft snapshot lives between sessions.
pub fn draft_path() -> PathBuf {
    data_dir().join("draft.json")
}

pub fn settings_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("magpie")
        .join("settings.json")
}

/// Print a JSON value to stdout, honoring the user's output setting.
pub fn print_json(value: &Value) {
    let settings = crate::store::SettingsStore::new(settings_path()).load();
    let formatted = match settings.output {
        OutputMode::Compact => serde_json::to_string(value),
        OutputMode::Pretty => serde_json::to_string_pretty(value),
    };
    println!("{}", formatted.unwrap_or_else(|_| value.to_string()));
}
