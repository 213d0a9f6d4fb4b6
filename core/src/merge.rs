//! Reconciliation of externally-sourced fields into the draft.
//!
//! Document parsing and smart search both produce a [`PartialProfile`]; the
//! merge folds it into the draft without clobbering anything the creator
//! already answered. Scalars overwrite only when empty; sequences take the
//! additive union; the age range is the envelope of the source ranges,
//! clamped to the supported domain.

use serde::{Deserialize, Serialize};

use crate::choice::{Choice, Vocabulary};
use crate::draft::{AgeRange, Draft};
use crate::vocab::{AudienceGender, Platform, PostingFrequency};

/// Sparse field-map produced by the document parser or profile search.
/// Everything is optional; strings are free text to be resolved against the
/// controlled vocabularies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Free-text industry descriptions ("fitness coaching").
    pub industries: Vec<String>,
    pub platforms: Vec<String>,
    pub content_formats: Vec<String>,
    pub regions: Vec<String>,
    pub goals: Vec<String>,
    /// Audience sub-ranges as found in the source, pre-clamp.
    pub age_ranges: Vec<AgeRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience_gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posting_frequency: Option<String>,
}

impl PartialProfile {
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.bio.is_none()
            && self.industries.is_empty()
            && self.platforms.is_empty()
            && self.content_formats.is_empty()
            && self.regions.is_empty()
            && self.goals.is_empty()
            && self.age_ranges.is_empty()
            && self.audience_gender.is_none()
            && self.posting_frequency.is_none()
    }
}

/// Fold `partial` into `draft` and return the result. The input draft is
/// untouched so callers can diff before/after, and so the operation stays
/// referentially transparent for testing.
pub fn merge_external(draft: &Draft, partial: &PartialProfile) -> Draft {
    let mut next = draft.clone();

    if next.creator_name.trim().is_empty() {
        if let Some(display_name) = non_empty(partial.display_name.as_deref()) {
            next.creator_name = display_name;
        }
    }
    if next.bio.trim().is_empty() {
        if let Some(bio) = non_empty(partial.bio.as_deref()) {
            next.bio = bio;
        }
    }

    let first_industry = partial
        .industries
        .iter()
        .find(|industry| !industry.trim().is_empty());
    if let Some(industry) = first_industry {
        if next.creator_type.is_none() {
            next.creator_type = Some(Choice::from_text(industry));
        }
        if next.primary_niche.trim().is_empty() {
            next.primary_niche = industry.trim().to_string();
        }
    }

    for raw in &partial.platforms {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        match Platform::match_text(raw) {
            Some(platform) if !next.platforms.contains(&platform) => {
                next.platforms.push(platform);
            }
            Some(_) => {}
            // Closed axis: automation only supports known networks.
            None => tracing::debug!(value = raw, "unmatched platform skipped during merge"),
        }
    }

    union_choices(&mut next.content_formats, &partial.content_formats);
    union_choices(&mut next.goals, &partial.goals);

    for raw in &partial.regions {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        if !next
            .regions
            .iter()
            .any(|region| region.eq_ignore_ascii_case(raw))
        {
            next.regions.push(raw.to_string());
        }
    }

    if next.age_range.is_default() {
        let min = partial.age_ranges.iter().map(|range| range.min).min();
        let max = partial.age_ranges.iter().map(|range| range.max).max();
        if let (Some(min), Some(max)) = (min, max) {
            next.age_range = AgeRange::new(min, max);
        }
    }

    if next.audience_gender == AudienceGender::default() {
        if let Some(gender) = partial
            .audience_gender
            .as_deref()
            .and_then(AudienceGender::match_text)
        {
            next.audience_gender = gender;
        }
    }

    if next.posting_frequency.is_none() {
        if let Some(frequency) = partial
            .posting_frequency
            .as_deref()
            .and_then(PostingFrequency::match_text)
        {
            next.posting_frequency = Some(frequency);
        }
    }

    next
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Additive union: resolve each source string through the vocabulary,
/// falling back to an "Other" entry carrying the raw text; never add a
/// (case-insensitive) duplicate.
fn union_choices<T: Vocabulary>(sequence: &mut Vec<Choice<T>>, sources: &[String]) {
    for raw in sources {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        let candidate = Choice::<T>::from_text(raw);
        if !sequence
            .iter()
            .any(|entry| entry.label().eq_ignore_ascii_case(candidate.label()))
        {
            sequence.push(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::FieldEdit;
    use crate::vocab::{ContentFormat, CreatorType};

    fn partial_with_industry(industry: &str) -> PartialProfile {
        PartialProfile {
            industries: vec![industry.to_string()],
            ..PartialProfile::default()
        }
    }

    #[test]
    fn industry_fills_empty_type_and_niche() {
        let draft = Draft::new();
        let merged = merge_external(&draft, &partial_with_industry("fitness coaching"));
        assert_eq!(
            merged.creator_type,
            Some(Choice::Known(CreatorType::FitnessSports))
        );
        assert_eq!(merged.primary_niche, "fitness coaching");
    }

    #[test]
    fn never_overwrites_populated_fields() {
        let mut draft = Draft::new();
        draft.apply(FieldEdit::CreatorName("Jane".to_string()));
        draft.apply(FieldEdit::PrimaryNiche("Yoga".to_string()));
        draft.apply(FieldEdit::CreatorType(Choice::Known(CreatorType::ArtDesign)));

        let partial = PartialProfile {
            display_name: Some("Janet".to_string()),
            ..partial_with_industry("fitness coaching")
        };
        let merged = merge_external(&draft, &partial);
        assert_eq!(merged.creator_name, "Jane");
        assert_eq!(merged.primary_niche, "Yoga");
        assert_eq!(merged.creator_type, Some(Choice::Known(CreatorType::ArtDesign)));
    }

    #[test]
    fn unmatched_industry_falls_back_to_other() {
        let merged = merge_external(&Draft::new(), &partial_with_industry("competitive beekeeping"));
        assert_eq!(
            merged.creator_type,
            Some(Choice::Other("competitive beekeeping".to_string()))
        );
    }

    #[test]
    fn sequences_merge_additively_without_duplicates() {
        let mut draft = Draft::new();
        draft.apply(FieldEdit::ToggleFormat {
            value: Choice::Known(ContentFormat::ShortVideo),
            included: true,
        });

        let partial = PartialProfile {
            content_formats: vec![
                "reels".to_string(),
                "short video".to_string(),
                "interpretive dance notation".to_string(),
            ],
            platforms: vec!["instagram".to_string(), "carrier pigeon".to_string()],
            ..PartialProfile::default()
        };
        let merged = merge_external(&draft, &partial);

        assert_eq!(
            merged.content_formats,
            vec![
                Choice::Known(ContentFormat::ShortVideo),
                Choice::Other("interpretive dance notation".to_string()),
            ]
        );
        assert_eq!(merged.platforms, vec![Platform::Instagram]);
    }

    #[test]
    fn age_envelope_clamps_to_domain() {
        let partial = PartialProfile {
            age_ranges: vec![AgeRange { min: 10, max: 24 }, AgeRange { min: 30, max: 95 }],
            ..PartialProfile::default()
        };
        let merged = merge_external(&Draft::new(), &partial);
        assert_eq!(merged.age_range, AgeRange { min: 16, max: 90 });
    }

    #[test]
    fn age_left_alone_when_already_set() {
        let mut draft = Draft::new();
        draft.apply(FieldEdit::AgeMin(25));
        draft.apply(FieldEdit::AgeMax(34));
        let partial = PartialProfile {
            age_ranges: vec![AgeRange { min: 18, max: 65 }],
            ..PartialProfile::default()
        };
        let merged = merge_external(&draft, &partial);
        assert_eq!(merged.age_range, AgeRange { min: 25, max: 34 });
    }

    #[test]
    fn merge_does_not_mutate_the_input() {
        let draft = Draft::new();
        let _ = merge_external(&draft, &partial_with_industry("fitness coaching"));
        assert_eq!(draft, Draft::new());
    }

    #[test]
    fn empty_partial_is_a_no_op() {
        let mut draft = Draft::new();
        draft.apply(FieldEdit::CreatorName("Jane".to_string()));
        let merged = merge_external(&draft, &PartialProfile::default());
        assert_eq!(merged, draft);
        assert!(PartialProfile::default().is_empty());
    }
}
