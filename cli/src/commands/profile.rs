//! The random-access edit flow against the stored profile.
//!
//! No local snapshot is involved: the draft is seeded from the backend,
//! edits apply in place, and submit sends the update.

use std::sync::Arc;

use clap::Subcommand;
use serde_json::json;

use magpie_core::controller::{DraftController, WizardMode};
use magpie_core::fields::FieldEdit;
use magpie_core::ports::ProfileStore;

use crate::api::ApiClient;
use crate::store::FileSnapshotStore;
use crate::util;

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Fetch and print the stored profile
    Show,
    /// Apply field edits to the stored profile
    Edit {
        /// FIELD=VALUE assignment (repeatable)
        #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
        sets: Vec<String>,
    },
}

pub async fn run(api_url: &str, command: ProfileCommands) -> i32 {
    let client = match ApiClient::new(api_url, util::resolve_token()) {
        Ok(client) => Arc::new(client),
        Err(message) => return util::usage_error(&message, Some("Check MAGPIE_API_URL.")),
    };
    match command {
        ProfileCommands::Show => show(client).await,
        ProfileCommands::Edit { sets } => edit(client, &sets).await,
    }
}

async fn show(client: Arc<ApiClient>) -> i32 {
    match client.fetch().await {
        Ok(Some(profile)) => {
            util::print_json(&json!({"profile": profile}));
            0
        }
        Ok(None) => {
            util::cli_error(
                "no stored profile yet",
                Some("Create one with `magpie onboard`."),
            );
            1
        }
        Err(error) => util::fail(&error.into()),
    }
}

async fn edit(client: Arc<ApiClient>, sets: &[String]) -> i32 {
    let mut edits = Vec::with_capacity(sets.len());
    for raw in sets {
        let (field, value) = match split_assignment(raw) {
            Ok(pair) => pair,
            Err(message) => {
                return util::usage_error(&message, Some("Pass edits as --set field=value."));
            }
        };
        match FieldEdit::parse(field, value, true) {
            Ok(edit) => edits.push(edit),
            Err(error) => return util::fail(&error),
        }
    }

    let snapshots = Arc::new(FileSnapshotStore::new(util::draft_path()));
    let mut controller = DraftController::new(
        WizardMode::Edit,
        client.clone(),
        client.clone(),
        client,
        snapshots,
    );
    if let Err(error) = controller.rehydrate() {
        return util::fail(&error);
    }
    match controller.load_remote().await {
        Ok(Some(_)) => {}
        Ok(None) => {
            util::cli_error(
                "no stored profile to edit",
                Some("Create one with `magpie onboard`."),
            );
            return 1;
        }
        Err(error) => return util::fail(&error),
    }

    for edit in edits {
        controller.set_field(edit);
    }
    match controller.submit().await {
        Ok(profile) => {
            util::print_json(&json!({"profile": profile}));
            0
        }
        Err(error) => util::fail(&error),
    }
}

fn split_assignment(raw: &str) -> Result<(&str, &str), String> {
    match raw.split_once('=') {
        Some((field, value)) if !field.trim().is_empty() => Ok((field.trim(), value)),
        _ => Err(format!("expected FIELD=VALUE, got '{raw}'")),
    }
}
