//! Controlled-vocabulary selections with a typed "Other" escape hatch.
//!
//! Every enumerated field on the draft resolves through a [`Vocabulary`]:
//! a fixed set of entries, each with a canonical label and the lowercase
//! keywords that identify it in free text. [`Choice`] wraps a vocabulary
//! entry or carries the creator's own wording — the free text lives inside
//! the value instead of a side-table keyed by field name.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Label rendered for an "Other" selection whose free text is still blank,
/// and the bucket unmatched external values collapse into.
pub const OTHER_CATEGORY: &str = "Other / Unique Category";

/// Jaro-Winkler floor for treating free text as a near-miss spelling of a
/// vocabulary entry ("instagramm", "fittness").
pub const NEAR_MISS_THRESHOLD: f64 = 0.90;

/// A fixed vocabulary behind a single- or multi-choice draft field.
pub trait Vocabulary: Copy + Eq + Sized + 'static {
    /// Every entry, in the order the product presents them.
    const ALL: &'static [Self];

    /// Canonical label — also the wire representation.
    fn label(&self) -> &'static str;

    /// Lowercase fragments that identify this entry in free text.
    fn keywords(&self) -> &'static [&'static str];

    /// Exact (case-insensitive) label lookup.
    fn from_label(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|entry| entry.label().eq_ignore_ascii_case(text))
    }

    /// Resolve free text to an entry: exact label first, then
    /// case-insensitive substring against keywords, then a Jaro-Winkler
    /// pass for near-miss spellings. Returns `None` when nothing clears
    /// the bar — callers decide whether that falls back to "Other".
    fn match_text(text: &str) -> Option<Self> {
        let needle = text.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        if let Some(entry) = Self::from_label(&needle) {
            return Some(entry);
        }
        for entry in Self::ALL {
            for keyword in entry.keywords() {
                if needle.contains(keyword) || keyword.contains(needle.as_str()) {
                    return Some(*entry);
                }
            }
        }
        let mut best: Option<(Self, f64)> = None;
        for entry in Self::ALL {
            let candidates = std::iter::once(entry.label().to_lowercase())
                .chain(entry.keywords().iter().map(|k| (*k).to_string()));
            for candidate in candidates {
                let score = strsim::jaro_winkler(&needle, &candidate);
                if score >= NEAR_MISS_THRESHOLD && best.is_none_or(|(_, b)| score > b) {
                    best = Some((*entry, score));
                }
            }
        }
        best.map(|(entry, _)| entry)
    }
}

/// A selection from a controlled vocabulary, or the creator's own answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice<T> {
    Known(T),
    Other(String),
}

impl<T: Vocabulary> Choice<T> {
    /// Resolve free text (external data, fuzzy input) to a vocabulary
    /// entry, falling back to `Other` with the raw text.
    pub fn from_text(text: &str) -> Self {
        match T::match_text(text) {
            Some(entry) => Choice::Known(entry),
            None => Choice::Other(text.trim().to_string()),
        }
    }

    /// Parse a deliberate answer: a canonical label, the literal
    /// [`OTHER_CATEGORY`] sentinel (an "Other" pick with no text yet), or
    /// anything else as the creator's own wording.
    pub fn from_answer(text: &str) -> Self {
        match T::from_label(text) {
            Some(entry) => Choice::Known(entry),
            None if text.trim().eq_ignore_ascii_case(OTHER_CATEGORY) => {
                Choice::Other(String::new())
            }
            None => Choice::Other(text.trim().to_string()),
        }
    }

    /// What this selection reads as — the canonical label, the free text,
    /// or the sentinel when an "Other" pick has no text yet.
    pub fn label(&self) -> &str {
        match self {
            Choice::Known(entry) => entry.label(),
            Choice::Other(text) if text.is_empty() => OTHER_CATEGORY,
            Choice::Other(text) => text,
        }
    }

    /// An "Other" selection only counts as answered once its free text is
    /// filled in.
    pub fn is_answered(&self) -> bool {
        match self {
            Choice::Known(_) => true,
            Choice::Other(text) => !text.trim().is_empty(),
        }
    }
}

impl<T: Vocabulary> Serialize for Choice<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de, T: Vocabulary> Deserialize<'de> for Choice<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(Choice::from_answer(&text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::CreatorType;

    #[test]
    fn from_text_matches_substring_case_insensitive() {
        assert_eq!(
            Choice::<CreatorType>::from_text("Fitness Coaching"),
            Choice::Known(CreatorType::FitnessSports)
        );
        assert_eq!(
            Choice::<CreatorType>::from_text("FITNESS coaching"),
            Choice::Known(CreatorType::FitnessSports)
        );
    }

    #[test]
    fn from_text_matches_near_miss_spelling() {
        assert_eq!(
            Choice::<CreatorType>::from_text("fittness"),
            Choice::Known(CreatorType::FitnessSports)
        );
    }

    #[test]
    fn from_text_falls_back_to_other() {
        let choice = Choice::<CreatorType>::from_text("quantum basket weaving");
        assert_eq!(choice, Choice::Other("quantum basket weaving".to_string()));
        assert_eq!(choice.label(), "quantum basket weaving");
    }

    #[test]
    fn from_answer_keeps_exact_labels_known() {
        assert_eq!(
            Choice::<CreatorType>::from_answer("Fitness & Sports"),
            Choice::Known(CreatorType::FitnessSports)
        );
    }

    #[test]
    fn from_answer_sentinel_is_unanswered_other() {
        let choice = Choice::<CreatorType>::from_answer(OTHER_CATEGORY);
        assert_eq!(choice, Choice::Other(String::new()));
        assert_eq!(choice.label(), OTHER_CATEGORY);
        assert!(!choice.is_answered());
    }

    #[test]
    fn other_with_text_is_answered() {
        assert!(Choice::<CreatorType>::Other("pet portraits".into()).is_answered());
        assert!(!Choice::<CreatorType>::Other("   ".into()).is_answered());
    }

    #[test]
    fn serde_round_trips_through_labels() {
        let known = Choice::Known(CreatorType::TechGaming);
        let json = serde_json::to_string(&known).unwrap();
        assert_eq!(json, "\"Tech & Gaming\"");
        let back: Choice<CreatorType> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, known);

        let other = Choice::<CreatorType>::Other("pet portraits".into());
        let json = serde_json::to_string(&other).unwrap();
        let back: Choice<CreatorType> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, other);
    }
}
