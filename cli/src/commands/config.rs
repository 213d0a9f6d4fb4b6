//! User settings. Changes are published on the settings channel; a
//! subscriber owns the file write, the command handler only publishes.

use std::sync::{Arc, Mutex};

use clap::Subcommand;
use serde_json::json;

use magpie_core::settings::{OutputMode, SettingsChannel, SettingsEvent, Theme};

use crate::store::SettingsStore;
use crate::util;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current settings
    Get,
    /// Change a setting
    Set {
        /// Setting key: theme or output
        key: String,
        /// New value (theme: light/dark/system, output: pretty/compact)
        value: String,
    },
}

pub fn run(command: ConfigCommands) -> i32 {
    let store = SettingsStore::new(util::settings_path());
    match command {
        ConfigCommands::Get => {
            util::print_json(&json!(store.load()));
            0
        }
        ConfigCommands::Set { key, value } => set(store, &key, &value),
    }
}

fn set(store: SettingsStore, key: &str, value: &str) -> i32 {
    let event = match parse_event(key, value) {
        Ok(event) => event,
        Err(message) => return util::usage_error(&message, None),
    };

    let state = Arc::new(Mutex::new((store.load(), Ok::<(), String>(()))));
    let channel = SettingsChannel::new();
    let sink = state.clone();
    channel.subscribe(move |event| {
        let mut guard = match sink.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        guard.0.apply(event);
        guard.1 = store.save(&guard.0);
    });
    channel.publish(&event);

    let guard = match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    if let Err(message) = &guard.1 {
        util::cli_error(message, None);
        return 1;
    }
    util::print_json(&json!(guard.0));
    0
}

fn parse_event(key: &str, value: &str) -> Result<SettingsEvent, String> {
    match key.trim().to_lowercase().as_str() {
        "theme" => value.parse::<Theme>().map(SettingsEvent::ThemeChanged),
        "output" => value.parse::<OutputMode>().map(SettingsEvent::OutputChanged),
        other => Err(format!("unknown setting '{other}' (use theme or output)")),
    }
}
