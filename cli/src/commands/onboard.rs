//! The linear wizard over the locally persisted draft.
//!
//! Every invocation rebuilds the controller, rehydrates the saved session,
//! applies one operation, and lets the controller's own persistence write
//! the result back. The draft file under the user data dir is the session.

use std::path::Path;
use std::sync::Arc;

use clap::Subcommand;
use serde_json::{Value, json};

use magpie_core::controller::{DraftController, WizardMode};
use magpie_core::fields::FieldEdit;
use magpie_core::ports::SearchKind;
use magpie_core::steps::{STEP_ORDER, WizardStep};

use crate::api::ApiClient;
use crate::store::FileSnapshotStore;
use crate::util;

#[derive(Subcommand)]
pub enum OnboardCommands {
    /// Begin a new draft, or resume the saved one
    Start,
    /// Show step progress and any blocking error
    Status,
    /// Print the current draft
    Show,
    /// Set a draft field
    Set {
        /// Field name (creator_name, creator_type, primary_niche, ...)
        field: String,
        /// New value
        value: String,
    },
    /// Add an entry to a multi-choice field (or remove it with --remove)
    Toggle {
        /// Field name (regions, content_formats, platforms, goals)
        field: String,
        /// Entry to add or remove
        value: String,
        /// Remove the entry instead of adding it
        #[arg(long)]
        remove: bool,
    },
    /// Assign a platform's tone ("none" clears it)
    Tone {
        /// Platform name
        platform: String,
        /// Tone style
        style: String,
    },
    /// Validate the current step and move forward
    Next,
    /// Go back one step
    Back,
    /// Jump to a step by name or index
    Goto {
        /// Step name (basics, audience, ...) or 0-based index
        step: String,
    },
    /// Parse a document (media kit, press page) into the draft
    Import {
        /// Path to the document
        file: String,
    },
    /// Enrich the draft from a smart-search lookup
    Search {
        /// Search query (a handle, a name, a site)
        query: String,
        /// Subject kind: creator or brand
        #[arg(long, default_value = "creator")]
        kind: String,
    },
    /// Submit the draft as a new profile
    Submit,
    /// Discard the draft and start over
    Reset,
}

pub async fn run(api_url: &str, command: OnboardCommands) -> i32 {
    let client = match ApiClient::new(api_url, util::resolve_token()) {
        Ok(client) => Arc::new(client),
        Err(message) => return util::usage_error(&message, Some("Check MAGPIE_API_URL.")),
    };
    let snapshots = Arc::new(FileSnapshotStore::new(util::draft_path()));
    let mut controller = DraftController::new(
        WizardMode::Create,
        client.clone(),
        client.clone(),
        client,
        snapshots,
    );
    if let Err(error) = controller.rehydrate() {
        return util::fail(&error);
    }

    match command {
        OnboardCommands::Start | OnboardCommands::Status => {
            util::print_json(&status(&controller));
            0
        }
        OnboardCommands::Show => {
            util::print_json(&draft_json(&controller));
            0
        }
        OnboardCommands::Set { field, value } => {
            apply_edit(&mut controller, FieldEdit::parse(&field, &value, true))
        }
        OnboardCommands::Toggle {
            field,
            value,
            remove,
        } => apply_edit(&mut controller, FieldEdit::parse(&field, &value, !remove)),
        OnboardCommands::Tone { platform, style } => {
            apply_edit(&mut controller, FieldEdit::parse_tone(&platform, &style))
        }
        OnboardCommands::Next => match controller.advance() {
            Ok(_) => {
                util::print_json(&status(&controller));
                0
            }
            Err(error) => util::fail(&error),
        },
        OnboardCommands::Back => {
            controller.retreat();
            util::print_json(&status(&controller));
            0
        }
        OnboardCommands::Goto { step } => {
            let step = match parse_step(&step) {
                Ok(step) => step,
                Err(message) => return util::usage_error(&message, None),
            };
            match controller.jump_to(step) {
                Ok(_) => {
                    util::print_json(&status(&controller));
                    0
                }
                Err(error) => util::fail(&error),
            }
        }
        OnboardCommands::Import { file } => {
            let bytes = match std::fs::read(&file) {
                Ok(bytes) => bytes,
                Err(error) => {
                    return util::usage_error(
                        &format!("failed to read '{file}': {error}"),
                        Some("Pass the path of the document to parse."),
                    );
                }
            };
            let filename = Path::new(&file)
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or(file.as_str());
            match controller.import_document(&bytes, filename).await {
                Ok(partial) => {
                    util::print_json(&json!({
                        "imported": partial,
                        "draft": draft_json(&controller),
                    }));
                    0
                }
                Err(error) => util::fail(&error),
            }
        }
        OnboardCommands::Search { query, kind } => {
            let kind = match kind.parse::<SearchKind>() {
                Ok(kind) => kind,
                Err(message) => return util::usage_error(&message, None),
            };
            match controller.search_profile(&query, kind).await {
                Ok(Some(partial)) => {
                    util::print_json(&json!({
                        "found": partial,
                        "draft": draft_json(&controller),
                    }));
                    0
                }
                Ok(None) => {
                    util::print_json(&json!({"found": Value::Null}));
                    0
                }
                Err(error) => util::fail(&error),
            }
        }
        OnboardCommands::Submit => match controller.submit().await {
            Ok(profile) => {
                util::print_json(&json!({"profile": profile}));
                0
            }
            Err(error) => util::fail(&error),
        },
        OnboardCommands::Reset => {
            controller.reset();
            util::print_json(&status(&controller));
            0
        }
    }
}

fn apply_edit(
    controller: &mut DraftController,
    edit: Result<FieldEdit, magpie_core::error::WizardError>,
) -> i32 {
    match edit {
        Ok(edit) => {
            controller.set_field(edit);
            util::print_json(&draft_json(controller));
            0
        }
        Err(error) => util::fail(&error),
    }
}

fn draft_json(controller: &DraftController) -> Value {
    serde_json::to_value(controller.draft()).unwrap_or_default()
}

fn status(controller: &DraftController) -> Value {
    json!({
        "current_step": controller.current_step().label(),
        "steps": STEP_ORDER
            .iter()
            .map(|step| json!({
                "step": step.label(),
                "completed": controller.is_step_completed(*step),
                "current": *step == controller.current_step(),
            }))
            .collect::<Vec<_>>(),
        "blocking_error": controller.blocking_error(),
    })
}

/// Resolve a step argument: a name ("basics") or a 0-based index.
fn parse_step(text: &str) -> Result<WizardStep, String> {
    let needle = text.trim();
    if let Ok(index) = needle.parse::<usize>() {
        return WizardStep::from_index(index).ok_or_else(|| {
            format!(
                "step index {index} is out of range (0-{})",
                WizardStep::COUNT - 1
            )
        });
    }
    STEP_ORDER
        .iter()
        .copied()
        .find(|step| step.label().eq_ignore_ascii_case(needle))
        .ok_or_else(|| {
            let options = STEP_ORDER
                .iter()
                .map(|step| step.label())
                .collect::<Vec<_>>()
                .join(", ");
            format!("unknown step '{needle}' (use one of: {options})")
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn steps_parse_by_name_and_index() {
        assert_eq!(parse_step("basics").unwrap(), WizardStep::Basics);
        assert_eq!(parse_step("Review").unwrap(), WizardStep::Review);
        assert_eq!(parse_step("3").unwrap(), WizardStep::Platforms);
        assert!(parse_step("6").is_err());
        assert!(parse_step("checkout").is_err());
    }
}
