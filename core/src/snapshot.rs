//! Local draft snapshots: what survives a reload, and how a damaged
//! snapshot is recovered.
//!
//! Decoding is deliberately lenient, field by field: one stored value with
//! the wrong shape falls back to its default instead of discarding the
//! whole snapshot.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::choice::Choice;
use crate::draft::{AgeRange, Draft};
use crate::fields::name;
use crate::steps::WizardStep;
use crate::vocab::{AudienceGender, Platform, PostingFrequency, ToneStyle};

pub const SNAPSHOT_VERSION: u32 = 1;

/// The persisted wizard state: draft plus position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftSnapshot {
    pub version: u32,
    pub draft: Draft,
    pub current_step: WizardStep,
    pub completed: BTreeSet<WizardStep>,
    pub saved_at: DateTime<Utc>,
}

impl DraftSnapshot {
    pub fn capture(draft: Draft, current_step: WizardStep, completed: BTreeSet<WizardStep>) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            draft,
            current_step,
            completed,
            saved_at: Utc::now(),
        }
    }

    /// Decode a stored snapshot, coercing malformed fields to safe
    /// defaults rather than failing.
    pub fn decode(value: &Value) -> Self {
        let empty = serde_json::Map::new();
        let object = value.as_object().unwrap_or(&empty);

        let draft = object.get("draft").map(decode_draft).unwrap_or_default();
        let current_step = object
            .get("current_step")
            .and_then(decode_step)
            .unwrap_or(WizardStep::Basics);
        let completed = object
            .get("completed")
            .and_then(Value::as_array)
            .map(|entries| entries.iter().filter_map(decode_step).collect())
            .unwrap_or_default();
        let saved_at = object
            .get("saved_at")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_else(Utc::now);

        Self {
            version: SNAPSHOT_VERSION,
            draft,
            current_step,
            completed,
            saved_at,
        }
    }
}

fn decode_step(value: &Value) -> Option<WizardStep> {
    if let Ok(step) = serde_json::from_value::<WizardStep>(value.clone()) {
        return Some(step);
    }
    // Older snapshots stored indices; out-of-range ones clamp to the end.
    value
        .as_u64()
        .map(|index| (index as usize).min(WizardStep::COUNT - 1))
        .and_then(WizardStep::from_index)
}

fn decode_draft(value: &Value) -> Draft {
    let mut draft = Draft::default();
    let Some(object) = value.as_object() else {
        tracing::warn!("stored draft is not an object; starting fresh");
        return draft;
    };

    if let Some(text) = object.get(name::CREATOR_NAME).and_then(Value::as_str) {
        draft.creator_name = text.to_string();
    }
    if let Some(text) = object.get(name::PRIMARY_NICHE).and_then(Value::as_str) {
        draft.primary_niche = text.to_string();
    }
    if let Some(text) = object.get(name::BIO).and_then(Value::as_str) {
        draft.bio = text.to_string();
    }
    if let Some(text) = object.get(name::CREATOR_TYPE).and_then(Value::as_str) {
        if !text.trim().is_empty() {
            draft.creator_type = Some(Choice::from_answer(text));
        }
    }
    if let Some(gender) = object
        .get(name::AUDIENCE_GENDER)
        .and_then(|v| serde_json::from_value::<AudienceGender>(v.clone()).ok())
    {
        draft.audience_gender = gender;
    }
    if let Some(range) = object.get(name::AGE_RANGE).and_then(Value::as_object) {
        let min = range.get("min").and_then(Value::as_u64);
        let max = range.get("max").and_then(Value::as_u64);
        if let (Some(min), Some(max)) = (min, max) {
            draft.age_range = AgeRange::new(min.min(u8::MAX as u64) as u8, max.min(u8::MAX as u64) as u8);
        }
    }
    if let Some(frequency) = object
        .get(name::POSTING_FREQUENCY)
        .and_then(|v| serde_json::from_value::<PostingFrequency>(v.clone()).ok())
    {
        draft.posting_frequency = Some(frequency);
    }

    // Sequence fields: a non-array value coerces to the empty sequence, and
    // entries that fail to decode are dropped rather than poisoning the rest.
    draft.regions = string_sequence(object.get(name::REGIONS));
    draft.content_formats = choice_sequence(object.get(name::CONTENT_FORMATS));
    draft.goals = choice_sequence(object.get(name::GOALS));
    draft.platforms = typed_sequence::<Platform>(object.get(name::PLATFORMS));
    draft.platform_tones = tone_map(object.get(name::PLATFORM_TONES));

    draft
}

fn string_sequence(value: Option<&Value>) -> Vec<String> {
    match value.and_then(Value::as_array) {
        Some(entries) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_string)
            .collect(),
        None => Vec::new(),
    }
}

fn choice_sequence<T: crate::choice::Vocabulary>(value: Option<&Value>) -> Vec<Choice<T>> {
    match value.and_then(Value::as_array) {
        Some(entries) => entries
            .iter()
            .filter_map(Value::as_str)
            .map(Choice::from_answer)
            .collect(),
        None => Vec::new(),
    }
}

fn typed_sequence<T: serde::de::DeserializeOwned>(value: Option<&Value>) -> Vec<T> {
    match value.and_then(Value::as_array) {
        Some(entries) => entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect(),
        None => Vec::new(),
    }
}

fn tone_map(value: Option<&Value>) -> BTreeMap<Platform, ToneStyle> {
    let mut tones = BTreeMap::new();
    if let Some(object) = value.and_then(Value::as_object) {
        for (key, entry) in object {
            let platform = serde_json::from_value::<Platform>(Value::String(key.clone())).ok();
            let style = serde_json::from_value::<ToneStyle>(entry.clone()).ok();
            if let (Some(platform), Some(style)) = (platform, style) {
                tones.insert(platform, style);
            }
        }
    }
    tones
}
