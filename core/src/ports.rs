//! Collaborator interfaces the wizard depends on.
//!
//! The controller never talks to the network, the filesystem, or browser
//! storage directly — everything external comes in through these traits so
//! the state machine stays testable and host-agnostic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::draft::Draft;
use crate::error::{ParseError, ProfileStoreError, SearchError, SnapshotError};
use crate::merge::PartialProfile;
use crate::snapshot::DraftSnapshot;

/// A creator profile as the backend stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredProfile {
    pub id: Uuid,
    #[serde(flatten)]
    pub draft: Draft,
    pub updated_at: DateTime<Utc>,
}

/// What kind of subject a smart-search lookup targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Creator,
    Brand,
}

impl SearchKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Brand => "brand",
        }
    }
}

impl std::str::FromStr for SearchKind {
    type Err = String;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        match text.trim().to_lowercase().as_str() {
            "creator" => Ok(Self::Creator),
            "brand" => Ok(Self::Brand),
            other => Err(format!("unknown search kind '{other}' (use creator or brand)")),
        }
    }
}

/// The profile backend. `create`/`update` take the already-filtered submit
/// payload; what comes back is the stored row.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch the caller's stored profile, if one exists.
    async fn fetch(&self) -> Result<Option<StoredProfile>, ProfileStoreError>;
    async fn create(&self, payload: &Value) -> Result<StoredProfile, ProfileStoreError>;
    async fn update(&self, payload: &Value) -> Result<StoredProfile, ProfileStoreError>;
}

/// Document-parsing service: media kits, press pages, rate cards in, a
/// sparse field-map out.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn parse(&self, bytes: &[u8], filename: &str) -> Result<PartialProfile, ParseError>;
}

/// Smart-search enrichment. `Ok(None)` means the lookup found nothing —
/// that is an outcome, not a failure.
#[async_trait]
pub trait ProfileSearch: Send + Sync {
    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
    ) -> Result<Option<PartialProfile>, SearchError>;
}

/// Local snapshot persistence. Loads hand back raw JSON so a stale or
/// damaged snapshot can still go through the lenient decoder.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<Value>, SnapshotError>;
    fn save(&self, snapshot: &DraftSnapshot) -> Result<(), SnapshotError>;
    fn clear(&self) -> Result<(), SnapshotError>;
}
