//! The product's controlled vocabularies.
//!
//! Labels are the wire representation (the dashboard and API exchange the
//! display strings); keywords drive free-text resolution during merge.

use serde::{Deserialize, Serialize};

use crate::choice::Vocabulary;

/// Broad creator category, picked on the Basics step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreatorType {
    #[serde(rename = "Fitness & Sports")]
    FitnessSports,
    #[serde(rename = "Beauty & Fashion")]
    BeautyFashion,
    #[serde(rename = "Food & Cooking")]
    FoodCooking,
    #[serde(rename = "Travel & Outdoors")]
    TravelOutdoors,
    #[serde(rename = "Tech & Gaming")]
    TechGaming,
    #[serde(rename = "Music & Performance")]
    MusicPerformance,
    #[serde(rename = "Education & Courses")]
    EducationCourses,
    #[serde(rename = "Business & Finance")]
    BusinessFinance,
    #[serde(rename = "Art & Design")]
    ArtDesign,
    #[serde(rename = "Comedy & Entertainment")]
    ComedyEntertainment,
    #[serde(rename = "Lifestyle & Family")]
    LifestyleFamily,
}

impl Vocabulary for CreatorType {
    const ALL: &'static [Self] = &[
        Self::FitnessSports,
        Self::BeautyFashion,
        Self::FoodCooking,
        Self::TravelOutdoors,
        Self::TechGaming,
        Self::MusicPerformance,
        Self::EducationCourses,
        Self::BusinessFinance,
        Self::ArtDesign,
        Self::ComedyEntertainment,
        Self::LifestyleFamily,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::FitnessSports => "Fitness & Sports",
            Self::BeautyFashion => "Beauty & Fashion",
            Self::FoodCooking => "Food & Cooking",
            Self::TravelOutdoors => "Travel & Outdoors",
            Self::TechGaming => "Tech & Gaming",
            Self::MusicPerformance => "Music & Performance",
            Self::EducationCourses => "Education & Courses",
            Self::BusinessFinance => "Business & Finance",
            Self::ArtDesign => "Art & Design",
            Self::ComedyEntertainment => "Comedy & Entertainment",
            Self::LifestyleFamily => "Lifestyle & Family",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::FitnessSports => &["fitness", "sport", "gym", "yoga", "athlete", "wellness"],
            Self::BeautyFashion => &["beauty", "fashion", "makeup", "skincare", "style"],
            Self::FoodCooking => &["food", "cooking", "recipe", "chef", "baking"],
            Self::TravelOutdoors => &["travel", "outdoor", "adventure", "hiking"],
            Self::TechGaming => &["tech", "gaming", "game", "software", "gadget", "esports"],
            Self::MusicPerformance => &["music", "musician", "dance", "singer", "dj"],
            Self::EducationCourses => &["education", "teacher", "tutor", "course", "lecture"],
            Self::BusinessFinance => &["business", "finance", "entrepreneur", "investing"],
            Self::ArtDesign => &["art", "design", "illustration", "photography"],
            Self::ComedyEntertainment => &["comedy", "entertainment", "humor", "memes"],
            Self::LifestyleFamily => &["lifestyle", "family", "parenting", "home"],
        }
    }
}

/// Content formats the creator produces, multi-choice on the Content step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentFormat {
    #[serde(rename = "Short Video")]
    ShortVideo,
    #[serde(rename = "Long Video")]
    LongVideo,
    #[serde(rename = "Photo Posts")]
    PhotoPosts,
    #[serde(rename = "Stories")]
    Stories,
    #[serde(rename = "Live Streams")]
    LiveStreams,
    #[serde(rename = "Articles & Newsletters")]
    Articles,
    #[serde(rename = "Podcasts")]
    Podcasts,
}

impl Vocabulary for ContentFormat {
    const ALL: &'static [Self] = &[
        Self::ShortVideo,
        Self::LongVideo,
        Self::PhotoPosts,
        Self::Stories,
        Self::LiveStreams,
        Self::Articles,
        Self::Podcasts,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::ShortVideo => "Short Video",
            Self::LongVideo => "Long Video",
            Self::PhotoPosts => "Photo Posts",
            Self::Stories => "Stories",
            Self::LiveStreams => "Live Streams",
            Self::Articles => "Articles & Newsletters",
            Self::Podcasts => "Podcasts",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::ShortVideo => &["short video", "reels", "shorts", "clips"],
            Self::LongVideo => &["long video", "vlog", "documentary"],
            Self::PhotoPosts => &["photo", "image", "carousel"],
            Self::Stories => &["story", "stories"],
            Self::LiveStreams => &["live", "stream"],
            Self::Articles => &["article", "blog", "newsletter", "writing"],
            Self::Podcasts => &["podcast", "audio show"],
        }
    }
}

/// Networks Magpie can automate. Closed set — `platform_tones` is keyed by
/// this, so there is no "Other" platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Platform {
    #[serde(rename = "Instagram")]
    Instagram,
    #[serde(rename = "TikTok")]
    TikTok,
    #[serde(rename = "YouTube")]
    YouTube,
    #[serde(rename = "X (Twitter)")]
    Twitter,
    #[serde(rename = "LinkedIn")]
    LinkedIn,
    #[serde(rename = "Facebook")]
    Facebook,
    #[serde(rename = "Pinterest")]
    Pinterest,
    #[serde(rename = "Twitch")]
    Twitch,
}

impl Vocabulary for Platform {
    const ALL: &'static [Self] = &[
        Self::Instagram,
        Self::TikTok,
        Self::YouTube,
        Self::Twitter,
        Self::LinkedIn,
        Self::Facebook,
        Self::Pinterest,
        Self::Twitch,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::TikTok => "TikTok",
            Self::YouTube => "YouTube",
            Self::Twitter => "X (Twitter)",
            Self::LinkedIn => "LinkedIn",
            Self::Facebook => "Facebook",
            Self::Pinterest => "Pinterest",
            Self::Twitch => "Twitch",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Instagram => &["instagram", "insta"],
            Self::TikTok => &["tiktok", "tik tok"],
            Self::YouTube => &["youtube"],
            Self::Twitter => &["twitter", "x (twitter)", "x.com"],
            Self::LinkedIn => &["linkedin"],
            Self::Facebook => &["facebook", "fb"],
            Self::Pinterest => &["pinterest"],
            Self::Twitch => &["twitch"],
        }
    }
}

/// Per-platform writing voice for generated posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ToneStyle {
    #[serde(rename = "Professional")]
    Professional,
    #[serde(rename = "Casual")]
    Casual,
    #[serde(rename = "Playful")]
    Playful,
    #[serde(rename = "Inspirational")]
    Inspirational,
    #[serde(rename = "Educational")]
    Educational,
    #[serde(rename = "Bold")]
    Bold,
}

impl Vocabulary for ToneStyle {
    const ALL: &'static [Self] = &[
        Self::Professional,
        Self::Casual,
        Self::Playful,
        Self::Inspirational,
        Self::Educational,
        Self::Bold,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Professional => "Professional",
            Self::Casual => "Casual",
            Self::Playful => "Playful",
            Self::Inspirational => "Inspirational",
            Self::Educational => "Educational",
            Self::Bold => "Bold",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Professional => &["professional", "formal", "corporate"],
            Self::Casual => &["casual", "friendly", "relaxed"],
            Self::Playful => &["playful", "fun", "witty"],
            Self::Inspirational => &["inspirational", "motivational", "uplifting"],
            Self::Educational => &["educational", "informative", "explainer"],
            Self::Bold => &["bold", "edgy", "provocative"],
        }
    }
}

/// What the creator wants out of automation, multi-choice on Insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreatorGoal {
    #[serde(rename = "Grow Audience")]
    GrowAudience,
    #[serde(rename = "Drive Sales")]
    DriveSales,
    #[serde(rename = "Build Community")]
    BuildCommunity,
    #[serde(rename = "Land Brand Deals")]
    BrandDeals,
    #[serde(rename = "Thought Leadership")]
    ThoughtLeadership,
    #[serde(rename = "Post Consistently")]
    PostConsistently,
}

impl Vocabulary for CreatorGoal {
    const ALL: &'static [Self] = &[
        Self::GrowAudience,
        Self::DriveSales,
        Self::BuildCommunity,
        Self::BrandDeals,
        Self::ThoughtLeadership,
        Self::PostConsistently,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::GrowAudience => "Grow Audience",
            Self::DriveSales => "Drive Sales",
            Self::BuildCommunity => "Build Community",
            Self::BrandDeals => "Land Brand Deals",
            Self::ThoughtLeadership => "Thought Leadership",
            Self::PostConsistently => "Post Consistently",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::GrowAudience => &["grow", "followers", "audience", "reach"],
            Self::DriveSales => &["sales", "sell", "revenue", "conversions"],
            Self::BuildCommunity => &["community", "engagement"],
            Self::BrandDeals => &["brand deal", "sponsorship", "partnership"],
            Self::ThoughtLeadership => &["thought leadership", "authority", "credibility"],
            Self::PostConsistently => &["consistent", "schedule", "cadence"],
        }
    }
}

/// Target audience gender mix. Exactly one is always selected; `AllGenders`
/// is the default and what an untouched draft reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum AudienceGender {
    #[default]
    #[serde(rename = "All genders")]
    AllGenders,
    #[serde(rename = "Mostly women")]
    MostlyWomen,
    #[serde(rename = "Mostly men")]
    MostlyMen,
}

impl Vocabulary for AudienceGender {
    const ALL: &'static [Self] = &[Self::AllGenders, Self::MostlyWomen, Self::MostlyMen];

    fn label(&self) -> &'static str {
        match self {
            Self::AllGenders => "All genders",
            Self::MostlyWomen => "Mostly women",
            Self::MostlyMen => "Mostly men",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::AllGenders => &["all genders", "everyone", "mixed"],
            Self::MostlyWomen => &["women", "female"],
            Self::MostlyMen => &["men", "male"],
        }
    }
}

/// How often the creator intends to publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PostingFrequency {
    #[serde(rename = "Daily")]
    Daily,
    #[serde(rename = "Several times a week")]
    SeveralPerWeek,
    #[serde(rename = "Weekly")]
    Weekly,
    #[serde(rename = "A few times a month")]
    FewPerMonth,
}

impl Vocabulary for PostingFrequency {
    const ALL: &'static [Self] = &[
        Self::Daily,
        Self::SeveralPerWeek,
        Self::Weekly,
        Self::FewPerMonth,
    ];

    fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::SeveralPerWeek => "Several times a week",
            Self::Weekly => "Weekly",
            Self::FewPerMonth => "A few times a month",
        }
    }

    fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Daily => &["daily", "every day"],
            Self::SeveralPerWeek => &["several times a week", "most days"],
            Self::Weekly => &["weekly", "once a week"],
            Self::FewPerMonth => &["few times a month", "monthly", "occasionally"],
        }
    }
}
