//! Wizard steps, their validators, and completion-set helpers.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::draft::{AGE_DOMAIN_MAX, AGE_DOMAIN_MIN, Draft};
use crate::error::FieldError;
use crate::fields::name;

/// The six pages of the onboarding wizard, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Basics,
    Audience,
    Content,
    Platforms,
    Insights,
    Review,
}

/// Steps in wizard order.
pub const STEP_ORDER: [WizardStep; WizardStep::COUNT] = [
    WizardStep::Basics,
    WizardStep::Audience,
    WizardStep::Content,
    WizardStep::Platforms,
    WizardStep::Insights,
    WizardStep::Review,
];

impl WizardStep {
    pub const COUNT: usize = 6;

    pub fn index(self) -> usize {
        match self {
            Self::Basics => 0,
            Self::Audience => 1,
            Self::Content => 2,
            Self::Platforms => 3,
            Self::Insights => 4,
            Self::Review => 5,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        STEP_ORDER.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Basics => "Basics",
            Self::Audience => "Audience",
            Self::Content => "Content",
            Self::Platforms => "Platforms",
            Self::Insights => "Insights",
            Self::Review => "Review",
        }
    }

    /// Next step, clamped at the terminal review step.
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1).unwrap_or(Self::Review)
    }

    /// Previous step, clamped at the first step.
    pub fn previous(self) -> Self {
        match self.index() {
            0 => Self::Basics,
            index => Self::from_index(index - 1).unwrap_or(Self::Basics),
        }
    }

    pub fn is_review(self) -> bool {
        self == Self::Review
    }

    /// Side-effect-free validator: what this step still needs from the
    /// draft. Empty means the step passes.
    ///
    /// Platforms and Insights carry no hard requirements, and the review
    /// step always passes.
    pub fn validate(self, draft: &Draft) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match self {
            Self::Basics => {
                if draft.creator_name.trim().is_empty() {
                    errors.push(FieldError::new(name::CREATOR_NAME, "creator name is required"));
                }
                match &draft.creator_type {
                    None => errors.push(FieldError::new(name::CREATOR_TYPE, "select a creator type")),
                    Some(choice) if !choice.is_answered() => errors.push(FieldError::new(
                        name::CREATOR_TYPE,
                        "describe your creator type",
                    )),
                    Some(_) => {}
                }
            }
            Self::Audience => {
                // The typed setters keep these invariants; the validator is
                // still the contract a hand-built draft is held to.
                let range = draft.age_range;
                if range.min > range.max
                    || range.min < AGE_DOMAIN_MIN
                    || range.max > AGE_DOMAIN_MAX
                {
                    errors.push(FieldError::new(
                        name::AGE_RANGE,
                        format!(
                            "audience age must stay within {AGE_DOMAIN_MIN}-{AGE_DOMAIN_MAX}"
                        ),
                    ));
                }
            }
            Self::Content => {
                if draft.primary_niche.trim().is_empty() {
                    errors.push(FieldError::new(
                        name::PRIMARY_NICHE,
                        "tell us your primary niche",
                    ));
                }
            }
            Self::Platforms | Self::Insights | Self::Review => {}
        }
        errors
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// First step whose validator has not passed yet this session.
pub fn first_incomplete(completed: &BTreeSet<WizardStep>) -> WizardStep {
    STEP_ORDER
        .iter()
        .copied()
        .find(|step| !completed.contains(step))
        .unwrap_or(WizardStep::Review)
}

/// Furthest step reachable in linear mode: one past the highest completed
/// step, or the first step on a fresh draft.
pub fn max_reachable(completed: &BTreeSet<WizardStep>) -> WizardStep {
    match completed.iter().next_back() {
        Some(step) => step.next(),
        None => WizardStep::Basics,
    }
}
