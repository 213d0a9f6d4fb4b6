//! User settings and the typed channel that keeps every surface in sync.
//!
//! Cross-component sync (the dashboard's dark-mode toggle, the CLI's output
//! preference) goes through an explicit publish/subscribe channel instead
//! of ad hoc global event listeners: publishers announce a change, and each
//! subscriber decides what to do with it.

use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(format!("unknown theme '{other}' (use light, dark, or system)")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    #[default]
    Pretty,
    Compact,
}

impl std::str::FromStr for OutputMode {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown output mode '{other}' (use pretty or compact)")),
        }
    }
}

/// Per-user presentation settings, persisted wherever the host keeps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    pub theme: Theme,
    pub output: OutputMode,
}

impl UserSettings {
    /// Fold a published change into this settings value.
    pub fn apply(&mut self, event: &SettingsEvent) {
        match event {
            SettingsEvent::ThemeChanged(theme) => self.theme = *theme,
            SettingsEvent::OutputChanged(output) => self.output = *output,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsEvent {
    ThemeChanged(Theme),
    OutputChanged(OutputMode),
}

/// Handle returned by [`SettingsChannel::subscribe`]; pass it back to
/// [`SettingsChannel::unsubscribe`] to stop receiving events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Listener = Box<dyn Fn(&SettingsEvent) + Send + Sync>;

/// Typed publish/subscribe channel for settings changes. Delivery is
/// synchronous and in subscription order.
#[derive(Default)]
pub struct SettingsChannel {
    listeners: Mutex<Vec<(u64, Listener)>>,
    next_id: AtomicU64,
}

impl SettingsChannel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &self,
        listener: impl Fn(&SettingsEvent) + Send + Sync + 'static,
    ) -> SubscriberId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.lock().push((id, Box::new(listener)));
        SubscriberId(id)
    }

    pub fn unsubscribe(&self, subscriber: SubscriberId) {
        self.lock().retain(|(id, _)| *id != subscriber.0);
    }

    pub fn publish(&self, event: &SettingsEvent) {
        let listeners = self.lock();
        for (_, listener) in listeners.iter() {
            listener(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(u64, Listener)>> {
        match self.listeners.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
