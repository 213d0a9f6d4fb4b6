//! Field names, the backend allowlist, and the typed edit boundary.
//!
//! The dashboard and CLI address draft fields by name; `FieldEdit::parse`
//! is where that stringly surface turns into typed edits (or fails with
//! `UnknownField` / `InvalidValue`).

use crate::choice::{Choice, Vocabulary};
use crate::error::WizardError;
use crate::vocab::{
    AudienceGender, ContentFormat, CreatorGoal, CreatorType, Platform, PostingFrequency, ToneStyle,
};

/// Canonical draft field names as they appear on the wire and in the CLI.
pub mod name {
    pub const CREATOR_NAME: &str = "creator_name";
    pub const CREATOR_TYPE: &str = "creator_type";
    pub const PRIMARY_NICHE: &str = "primary_niche";
    pub const BIO: &str = "bio";
    pub const AUDIENCE_GENDER: &str = "audience_gender";
    pub const AGE_MIN: &str = "age_min";
    pub const AGE_MAX: &str = "age_max";
    pub const AGE_RANGE: &str = "age_range";
    pub const REGIONS: &str = "regions";
    pub const CONTENT_FORMATS: &str = "content_formats";
    pub const PLATFORMS: &str = "platforms";
    pub const PLATFORM_TONES: &str = "platform_tones";
    pub const GOALS: &str = "goals";
    pub const POSTING_FREQUENCY: &str = "posting_frequency";
}

/// The only keys `submit` will send. Anything else in a serialized draft is
/// dropped silently so old clients stay compatible with a narrower backend.
pub const ALLOWED_FIELDS: &[&str] = &[
    name::CREATOR_NAME,
    name::CREATOR_TYPE,
    name::PRIMARY_NICHE,
    name::BIO,
    name::AUDIENCE_GENDER,
    name::AGE_RANGE,
    name::REGIONS,
    name::CONTENT_FORMATS,
    name::PLATFORMS,
    name::PLATFORM_TONES,
    name::GOALS,
    name::POSTING_FREQUENCY,
];

/// One typed mutation of the draft.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEdit {
    CreatorName(String),
    CreatorType(Choice<CreatorType>),
    PrimaryNiche(String),
    Bio(String),
    AudienceGender(AudienceGender),
    AgeMin(u8),
    AgeMax(u8),
    PostingFrequency(PostingFrequency),
    ToggleRegion { value: String, included: bool },
    ToggleFormat { value: Choice<ContentFormat>, included: bool },
    ToggleGoal { value: Choice<CreatorGoal>, included: bool },
    TogglePlatform { platform: Platform, included: bool },
    SetTone { platform: Platform, style: Option<ToneStyle> },
}

impl FieldEdit {
    /// The field this edit touches, for error bookkeeping.
    pub fn field(&self) -> &'static str {
        match self {
            FieldEdit::CreatorName(_) => name::CREATOR_NAME,
            FieldEdit::CreatorType(_) => name::CREATOR_TYPE,
            FieldEdit::PrimaryNiche(_) => name::PRIMARY_NICHE,
            FieldEdit::Bio(_) => name::BIO,
            FieldEdit::AudienceGender(_) => name::AUDIENCE_GENDER,
            FieldEdit::AgeMin(_) => name::AGE_MIN,
            FieldEdit::AgeMax(_) => name::AGE_MAX,
            FieldEdit::PostingFrequency(_) => name::POSTING_FREQUENCY,
            FieldEdit::ToggleRegion { .. } => name::REGIONS,
            FieldEdit::ToggleFormat { .. } => name::CONTENT_FORMATS,
            FieldEdit::ToggleGoal { .. } => name::GOALS,
            FieldEdit::TogglePlatform { .. } => name::PLATFORMS,
            FieldEdit::SetTone { .. } => name::PLATFORM_TONES,
        }
    }

    /// Parse a named edit. `included` only matters for multi fields (add
    /// vs remove); scalar fields ignore it.
    pub fn parse(field: &str, value: &str, included: bool) -> Result<Self, WizardError> {
        let field_key = field.trim().to_lowercase();
        match field_key.as_str() {
            name::CREATOR_NAME => Ok(Self::CreatorName(value.trim().to_string())),
            name::CREATOR_TYPE => Ok(Self::CreatorType(Choice::from_answer(value))),
            name::PRIMARY_NICHE => Ok(Self::PrimaryNiche(value.trim().to_string())),
            name::BIO => Ok(Self::Bio(value.trim().to_string())),
            name::AUDIENCE_GENDER => AudienceGender::match_text(value)
                .map(Self::AudienceGender)
                .ok_or_else(|| invalid(name::AUDIENCE_GENDER, value, AudienceGender::ALL)),
            name::AGE_MIN => parse_age(name::AGE_MIN, value).map(Self::AgeMin),
            name::AGE_MAX => parse_age(name::AGE_MAX, value).map(Self::AgeMax),
            name::POSTING_FREQUENCY => PostingFrequency::match_text(value)
                .map(Self::PostingFrequency)
                .ok_or_else(|| invalid(name::POSTING_FREQUENCY, value, PostingFrequency::ALL)),
            name::REGIONS => Ok(Self::ToggleRegion {
                value: value.trim().to_string(),
                included,
            }),
            name::CONTENT_FORMATS => Ok(Self::ToggleFormat {
                value: Choice::from_answer(value),
                included,
            }),
            name::GOALS => Ok(Self::ToggleGoal {
                value: Choice::from_answer(value),
                included,
            }),
            name::PLATFORMS => Platform::match_text(value)
                .map(|platform| Self::TogglePlatform { platform, included })
                .ok_or_else(|| invalid(name::PLATFORMS, value, Platform::ALL)),
            _ => Err(WizardError::UnknownField {
                name: field.trim().to_string(),
            }),
        }
    }

    /// Parse a tone assignment (`style` empty or "none" clears the entry).
    pub fn parse_tone(platform: &str, style: &str) -> Result<Self, WizardError> {
        let platform = Platform::match_text(platform)
            .ok_or_else(|| invalid(name::PLATFORM_TONES, platform, Platform::ALL))?;
        let style = style.trim();
        if style.is_empty() || style.eq_ignore_ascii_case("none") {
            return Ok(Self::SetTone {
                platform,
                style: None,
            });
        }
        let style = ToneStyle::match_text(style)
            .ok_or_else(|| invalid(name::PLATFORM_TONES, style, ToneStyle::ALL))?;
        Ok(Self::SetTone {
            platform,
            style: Some(style),
        })
    }
}

fn parse_age(field: &'static str, value: &str) -> Result<u8, WizardError> {
    value
        .trim()
        .parse::<u8>()
        .map_err(|_| WizardError::InvalidValue {
            field,
            message: format!("'{}' is not an age", value.trim()),
        })
}

fn invalid<T: Vocabulary>(field: &'static str, value: &str, entries: &[T]) -> WizardError {
    let options = entries
        .iter()
        .map(|entry| entry.label())
        .collect::<Vec<_>>()
        .join(", ");
    WizardError::InvalidValue {
        field,
        message: format!("'{}' did not match any of: {options}", value.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_and_toggle_edits() {
        assert_eq!(
            FieldEdit::parse("creator_name", "Jane", true).unwrap(),
            FieldEdit::CreatorName("Jane".to_string())
        );
        assert_eq!(
            FieldEdit::parse("creator_type", "Fitness & Sports", true).unwrap(),
            FieldEdit::CreatorType(Choice::Known(CreatorType::FitnessSports))
        );
        assert_eq!(
            FieldEdit::parse("platforms", "tiktok", false).unwrap(),
            FieldEdit::TogglePlatform {
                platform: Platform::TikTok,
                included: false
            }
        );
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = FieldEdit::parse("favorite_color", "teal", true).unwrap_err();
        assert!(matches!(err, WizardError::UnknownField { name } if name == "favorite_color"));
    }

    #[test]
    fn bad_enum_value_names_the_options() {
        let err = FieldEdit::parse("audience_gender", "robots", true).unwrap_err();
        match err {
            WizardError::InvalidValue { field, message } => {
                assert_eq!(field, name::AUDIENCE_GENDER);
                assert!(message.contains("All genders"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn bad_age_is_rejected() {
        assert!(FieldEdit::parse("age_min", "abc", true).is_err());
        assert!(FieldEdit::parse("age_max", "-4", true).is_err());
        assert_eq!(
            FieldEdit::parse("age_min", " 21 ", true).unwrap(),
            FieldEdit::AgeMin(21)
        );
    }

    #[test]
    fn tone_parsing_resolves_platform_and_style() {
        assert_eq!(
            FieldEdit::parse_tone("insta", "playful").unwrap(),
            FieldEdit::SetTone {
                platform: Platform::Instagram,
                style: Some(ToneStyle::Playful)
            }
        );
        assert_eq!(
            FieldEdit::parse_tone("Instagram", "none").unwrap(),
            FieldEdit::SetTone {
                platform: Platform::Instagram,
                style: None
            }
        );
        assert!(FieldEdit::parse_tone("myspace", "playful").is_err());
    }

    #[test]
    fn free_text_creator_type_becomes_other() {
        let edit = FieldEdit::parse("creator_type", "Miniature Railways", true).unwrap();
        assert_eq!(
            edit,
            FieldEdit::CreatorType(Choice::Other("Miniature Railways".to_string()))
        );
    }
}
