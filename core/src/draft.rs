//! The in-progress, unsubmitted onboarding form state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::choice::Choice;
use crate::fields::FieldEdit;
use crate::vocab::{
    AudienceGender, ContentFormat, CreatorGoal, CreatorType, Platform, PostingFrequency, ToneStyle,
};

/// Youngest audience age the product supports.
pub const AGE_DOMAIN_MIN: u8 = 16;
/// Oldest audience age the product supports.
pub const AGE_DOMAIN_MAX: u8 = 90;

/// Target audience age bounds. Always ordered and inside the domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgeRange {
    pub min: u8,
    pub max: u8,
}

impl AgeRange {
    /// Build an ordered, domain-clamped range from raw bounds.
    pub fn new(a: u8, b: u8) -> Self {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        Self {
            min: lo.clamp(AGE_DOMAIN_MIN, AGE_DOMAIN_MAX),
            max: hi.clamp(AGE_DOMAIN_MIN, AGE_DOMAIN_MAX),
        }
    }

    /// The untouched range spans the whole domain; merge treats it as an
    /// empty field.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

impl Default for AgeRange {
    fn default() -> Self {
        Self {
            min: AGE_DOMAIN_MIN,
            max: AGE_DOMAIN_MAX,
        }
    }
}

/// One creator's onboarding answers. Multi fields are always present as
/// sequences (empty when unanswered), never null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Draft {
    pub creator_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_type: Option<Choice<CreatorType>>,
    pub primary_niche: String,
    pub bio: String,
    pub audience_gender: AudienceGender,
    pub age_range: AgeRange,
    pub regions: Vec<String>,
    pub content_formats: Vec<Choice<ContentFormat>>,
    pub platforms: Vec<Platform>,
    pub platform_tones: BTreeMap<Platform, ToneStyle>,
    pub goals: Vec<Choice<CreatorGoal>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_frequency: Option<PostingFrequency>,
}

impl Draft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one typed edit. Toggle edits never introduce duplicates and
    /// keep insertion order; a removed platform loses its tone entry too.
    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::CreatorName(value) => self.creator_name = value,
            FieldEdit::CreatorType(choice) => self.creator_type = Some(choice),
            FieldEdit::PrimaryNiche(value) => self.primary_niche = value,
            FieldEdit::Bio(value) => self.bio = value,
            FieldEdit::AudienceGender(gender) => self.audience_gender = gender,
            FieldEdit::AgeMin(min) => self.age_range = AgeRange::new(min, self.age_range.max),
            FieldEdit::AgeMax(max) => self.age_range = AgeRange::new(self.age_range.min, max),
            FieldEdit::PostingFrequency(frequency) => self.posting_frequency = Some(frequency),
            FieldEdit::ToggleRegion { value, included } => {
                let existing = self
                    .regions
                    .iter()
                    .position(|region| region.eq_ignore_ascii_case(&value));
                match (included, existing) {
                    (true, None) => self.regions.push(value),
                    (false, Some(index)) => {
                        self.regions.remove(index);
                    }
                    _ => {}
                }
            }
            FieldEdit::ToggleFormat { value, included } => {
                toggle_choice(&mut self.content_formats, value, included);
            }
            FieldEdit::ToggleGoal { value, included } => {
                toggle_choice(&mut self.goals, value, included);
            }
            FieldEdit::TogglePlatform { platform, included } => {
                if included {
                    if !self.platforms.contains(&platform) {
                        self.platforms.push(platform);
                    }
                } else {
                    self.platforms.retain(|p| *p != platform);
                    self.platform_tones.remove(&platform);
                }
            }
            FieldEdit::SetTone { platform, style } => match style {
                Some(style) => {
                    // A tone implies the platform is in play.
                    if !self.platforms.contains(&platform) {
                        self.platforms.push(platform);
                    }
                    self.platform_tones.insert(platform, style);
                }
                None => {
                    self.platform_tones.remove(&platform);
                }
            },
        }
    }
}

fn toggle_choice<T: crate::choice::Vocabulary>(
    sequence: &mut Vec<Choice<T>>,
    value: Choice<T>,
    included: bool,
) {
    let existing = sequence
        .iter()
        .position(|entry| entry.label().eq_ignore_ascii_case(value.label()));
    match (included, existing) {
        (true, None) => sequence.push(value),
        (false, Some(index)) => {
            sequence.remove(index);
        }
        _ => {}
    }
}
