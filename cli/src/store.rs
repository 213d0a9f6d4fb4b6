//! File-backed persistence under the user directories: the draft snapshot
//! the wizard resumes from, and the settings file the config command edits.

use std::path::PathBuf;

use serde_json::Value;

use magpie_core::error::SnapshotError;
use magpie_core::ports::SnapshotStore;
use magpie_core::settings::UserSettings;
use magpie_core::snapshot::DraftSnapshot;

/// Draft snapshot as a JSON file. A file that is not even JSON reads as
/// absent; anything parseable goes through the core's lenient decoder.
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> Result<Option<Value>, SnapshotError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(SnapshotError(format!(
                    "failed to read {}: {error}",
                    self.path.display()
                )));
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(error) => {
                tracing::warn!(path = %self.path.display(), %error, "snapshot file is not JSON; ignoring it");
                Ok(None)
            }
        }
    }

    fn save(&self, snapshot: &DraftSnapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|error| {
                SnapshotError(format!("failed to create {}: {error}", parent.display()))
            })?;
        }
        let data = serde_json::to_string_pretty(snapshot)
            .map_err(|error| SnapshotError(error.to_string()))?;
        std::fs::write(&self.path, data).map_err(|error| {
            SnapshotError(format!("failed to write {}: {error}", self.path.display()))
        })
    }

    fn clear(&self) -> Result<(), SnapshotError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(error) => Err(SnapshotError(format!(
                "failed to remove {}: {error}",
                self.path.display()
            ))),
        }
    }
}

/// User settings as a JSON file. Loads are tolerant — a missing or damaged
/// file yields the defaults.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> UserSettings {
        let Ok(raw) = std::fs::read_to_string(&self.path) else {
            return UserSettings::default();
        };
        serde_json::from_str(&raw).unwrap_or_else(|error| {
            tracing::warn!(path = %self.path.display(), %error, "settings file unreadable; using defaults");
            UserSettings::default()
        })
    }

    pub fn save(&self, settings: &UserSettings) -> Result<(), String> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|error| format!("failed to create {}: {error}", parent.display()))?;
        }
        let data = serde_json::to_string_pretty(settings).map_err(|error| error.to_string())?;
        std::fs::write(&self.path, data)
            .map_err(|error| format!("failed to write {}: {error}", self.path.display()))
    }
}
