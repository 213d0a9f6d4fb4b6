//! The draft controller: one creator's wizard session.
//!
//! Owns the draft, the step position, and the completion set; everything
//! external (backend, parser, search, local snapshots) is an injected port.
//! All mutations are synchronous; only submit, import, and search are
//! async, and each is guarded by an in-flight flag that rejects duplicate
//! triggers instead of queueing them.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::draft::Draft;
use crate::error::{FieldError, WizardError};
use crate::fields::{ALLOWED_FIELDS, FieldEdit};
use crate::merge::{self, PartialProfile};
use crate::ports::{
    DocumentParser, ProfileSearch, ProfileStore, SearchKind, SnapshotStore, StoredProfile,
};
use crate::snapshot::DraftSnapshot;
use crate::steps::{self, STEP_ORDER, WizardStep};

/// Linear first-time flow vs random-access editing of a stored profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardMode {
    Create,
    Edit,
}

type StepCallback = Box<dyn Fn(WizardStep) + Send + Sync>;

pub struct DraftController {
    mode: WizardMode,
    draft: Draft,
    current_step: WizardStep,
    completed: BTreeSet<WizardStep>,
    /// Gates persistence: nothing is written until the initial load is
    /// done, so an empty boot state can never clobber a saved draft.
    rehydrated: bool,
    blocking_error: Option<String>,
    field_errors: BTreeMap<&'static str, String>,
    submitting: bool,
    importing: bool,
    searching: bool,
    profiles: Arc<dyn ProfileStore>,
    parser: Arc<dyn DocumentParser>,
    search: Arc<dyn ProfileSearch>,
    snapshots: Arc<dyn SnapshotStore>,
    on_step_completed: Option<StepCallback>,
}

impl DraftController {
    pub fn new(
        mode: WizardMode,
        profiles: Arc<dyn ProfileStore>,
        parser: Arc<dyn DocumentParser>,
        search: Arc<dyn ProfileSearch>,
        snapshots: Arc<dyn SnapshotStore>,
    ) -> Self {
        Self {
            mode,
            draft: Draft::new(),
            current_step: WizardStep::Basics,
            completed: BTreeSet::new(),
            rehydrated: false,
            blocking_error: None,
            field_errors: BTreeMap::new(),
            submitting: false,
            importing: false,
            searching: false,
            profiles,
            parser,
            search,
            snapshots,
            on_step_completed: None,
        }
    }

    /// Invoked every time a step's validator passes during `advance`.
    pub fn set_on_step_completed(
        &mut self,
        callback: impl Fn(WizardStep) + Send + Sync + 'static,
    ) {
        self.on_step_completed = Some(Box::new(callback));
    }

    pub fn mode(&self) -> WizardMode {
        self.mode
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn completed(&self) -> &BTreeSet<WizardStep> {
        &self.completed
    }

    pub fn blocking_error(&self) -> Option<&str> {
        self.blocking_error.as_deref()
    }

    pub fn field_errors(&self) -> &BTreeMap<&'static str, String> {
        &self.field_errors
    }

    pub fn is_rehydrated(&self) -> bool {
        self.rehydrated
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_importing(&self) -> bool {
        self.importing
    }

    pub fn is_searching(&self) -> bool {
        self.searching
    }

    /// The review step reads as complete whenever the wizard is on it,
    /// whether or not `advance` ever recorded it.
    pub fn is_step_completed(&self, step: WizardStep) -> bool {
        self.completed.contains(&step) || (step.is_review() && self.current_step.is_review())
    }

    /// Restore the locally saved session. Create mode only — in edit mode
    /// the draft comes from the backend, so this just opens the
    /// persistence gate. Sets `rehydrated` as its last act.
    pub fn rehydrate(&mut self) -> Result<(), WizardError> {
        if self.mode == WizardMode::Create {
            if let Some(value) = self.snapshots.load()? {
                let snapshot = DraftSnapshot::decode(&value);
                self.draft = snapshot.draft;
                self.current_step = snapshot.current_step;
                self.completed = snapshot.completed;
                tracing::debug!(step = %self.current_step, "restored draft snapshot");
            }
        }
        self.rehydrated = true;
        Ok(())
    }

    /// Edit mode: seed the draft from the stored profile. A stored profile
    /// means the wizard was finished once, so every step reads complete.
    pub async fn load_remote(&mut self) -> Result<Option<Uuid>, WizardError> {
        let fetched = self.profiles.fetch().await?;
        match fetched {
            Some(profile) => {
                self.draft = profile.draft;
                self.completed = STEP_ORDER.iter().copied().collect();
                Ok(Some(profile.id))
            }
            None => Ok(None),
        }
    }

    /// Snapshot the session through the port. No-op until rehydration has
    /// completed, and always a no-op in edit mode.
    pub fn persist(&self) -> Result<(), WizardError> {
        if !self.rehydrated || self.mode == WizardMode::Edit {
            return Ok(());
        }
        let snapshot = DraftSnapshot::capture(
            self.draft.clone(),
            self.current_step,
            self.completed.clone(),
        );
        self.snapshots.save(&snapshot)?;
        Ok(())
    }

    // Editing must not stall on a failing local write; there is no
    // durability promise beyond the last successful snapshot.
    fn persist_after_mutation(&self) {
        if let Err(error) = self.persist() {
            tracing::warn!(%error, "draft snapshot write failed");
        }
    }

    /// Apply one field edit. Clears that field's recorded error and any
    /// blocking message; validation waits for the next step transition.
    pub fn set_field(&mut self, edit: FieldEdit) {
        let field = edit.field();
        self.draft.apply(edit);
        self.field_errors.remove(field);
        self.blocking_error = None;
        self.persist_after_mutation();
    }

    /// Pure step check — no state is touched.
    pub fn validate_step(&self, step: WizardStep) -> Vec<FieldError> {
        step.validate(&self.draft)
    }

    /// Validate the current step and move forward. On failure the step
    /// does not change and the errors become the blocking message.
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let step = self.current_step;
        let errors = self.validate_step(step);
        if !errors.is_empty() {
            let summary = errors
                .iter()
                .map(|error| error.message.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            self.blocking_error = Some(summary.clone());
            for error in &errors {
                self.field_errors
                    .insert(error.field, error.message.clone());
            }
            return Err(WizardError::Validation {
                step,
                summary,
                errors,
            });
        }

        self.blocking_error = None;
        self.completed.insert(step);
        if let Some(callback) = &self.on_step_completed {
            callback(step);
        }
        self.current_step = step.next();
        self.persist_after_mutation();
        Ok(self.current_step)
    }

    /// Backward navigation is always allowed and clears any errors.
    pub fn retreat(&mut self) -> WizardStep {
        self.current_step = self.current_step.previous();
        self.blocking_error = None;
        self.field_errors.clear();
        self.persist_after_mutation();
        self.current_step
    }

    /// Jump to an arbitrary step. Unconditional in edit mode; in the
    /// linear flow, never past the first incomplete step.
    pub fn jump_to(&mut self, step: WizardStep) -> Result<WizardStep, WizardError> {
        if self.mode == WizardMode::Create && step != WizardStep::Basics {
            let reachable = steps::max_reachable(&self.completed);
            if step.index() > reachable.index() {
                let required = steps::first_incomplete(&self.completed);
                self.blocking_error =
                    Some(format!("complete the '{required}' step first"));
                return Err(WizardError::StepAccessDenied {
                    requested: step,
                    required,
                });
            }
        }
        self.current_step = step;
        self.blocking_error = None;
        self.persist_after_mutation();
        Ok(step)
    }

    /// Fold externally-sourced fields into the draft. Populated fields are
    /// never overwritten; see [`merge::merge_external`].
    pub fn merge_external(&mut self, partial: &PartialProfile) {
        let merged = merge::merge_external(&self.draft, partial);
        if merged != self.draft {
            self.draft = merged;
            self.persist_after_mutation();
        }
    }

    /// Parse an uploaded document and merge what it yields. Rejected while
    /// a previous import is still in flight.
    pub async fn import_document(
        &mut self,
        bytes: &[u8],
        filename: &str,
    ) -> Result<PartialProfile, WizardError> {
        if self.importing {
            return Err(WizardError::Busy {
                operation: "import",
            });
        }
        self.importing = true;
        let result = self.parser.parse(bytes, filename).await;
        self.importing = false;

        let partial = result?;
        tracing::info!(filename, "document parsed into draft fields");
        self.merge_external(&partial);
        Ok(partial)
    }

    /// Run a smart-search lookup and merge the hit, if any. `Ok(None)`
    /// means nothing was found; the draft is untouched.
    pub async fn search_profile(
        &mut self,
        query: &str,
        kind: SearchKind,
    ) -> Result<Option<PartialProfile>, WizardError> {
        if self.searching {
            return Err(WizardError::Busy {
                operation: "search",
            });
        }
        self.searching = true;
        let result = self.search.search(query, kind).await;
        self.searching = false;

        let found = result?;
        if let Some(partial) = &found {
            tracing::info!(query, kind = kind.as_str(), "search hit merged into draft");
            self.merge_external(partial);
        }
        Ok(found)
    }

    /// The backend payload: allowlisted fields only. Empty scalars are
    /// dropped; sequences and maps go out even when empty so the server
    /// can clear previously-set values.
    pub fn submit_payload(&self) -> Value {
        let serialized = serde_json::to_value(&self.draft).unwrap_or_default();
        let Value::Object(fields) = serialized else {
            return Value::Object(Map::new());
        };
        let mut payload = Map::new();
        for (key, value) in fields {
            if !ALLOWED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            let keep = match &value {
                Value::Null => false,
                Value::String(text) => !text.trim().is_empty(),
                _ => true,
            };
            if keep {
                payload.insert(key, value);
            }
        }
        Value::Object(payload)
    }

    /// Send the draft to the backend. Create mode clears the local
    /// snapshot on success; failures surface the collaborator's message
    /// verbatim with the draft left as it was.
    pub async fn submit(&mut self) -> Result<StoredProfile, WizardError> {
        if self.submitting {
            return Err(WizardError::Busy {
                operation: "submit",
            });
        }
        self.submitting = true;
        let payload = self.submit_payload();
        let result = match self.mode {
            WizardMode::Create => self.profiles.create(&payload).await,
            WizardMode::Edit => self.profiles.update(&payload).await,
        };
        self.submitting = false;

        let profile = result?;
        tracing::info!(profile_id = %profile.id, mode = ?self.mode, "profile submitted");
        if self.mode == WizardMode::Create {
            if let Err(error) = self.snapshots.clear() {
                tracing::warn!(%error, "failed to clear draft snapshot after submit");
            }
        }
        Ok(profile)
    }

    /// Throw the session away: empty draft, first step, snapshot gone.
    pub fn reset(&mut self) {
        self.draft = Draft::new();
        self.current_step = WizardStep::Basics;
        self.completed.clear();
        self.blocking_error = None;
        self.field_errors.clear();
        if let Err(error) = self.snapshots.clear() {
            tracing::warn!(%error, "failed to clear draft snapshot on reset");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::Choice;
    use crate::error::{ParseError, ProfileStoreError, SearchError, SnapshotError};
    use crate::fields::name;
    use crate::vocab::CreatorType;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct FakeBackend {
        stored: Mutex<Option<StoredProfile>>,
        last_payload: Mutex<Option<Value>>,
        fail_with: Mutex<Option<String>>,
    }

    impl FakeBackend {
        fn respond(&self, payload: &Value) -> Result<StoredProfile, ProfileStoreError> {
            if let Some(message) = self.fail_with.lock().unwrap().clone() {
                return Err(ProfileStoreError::Rejected {
                    status: 422,
                    message,
                });
            }
            *self.last_payload.lock().unwrap() = Some(payload.clone());
            Ok(StoredProfile {
                id: Uuid::now_v7(),
                draft: serde_json::from_value(payload.clone()).unwrap(),
                updated_at: Utc::now(),
            })
        }
    }

    #[async_trait]
    impl ProfileStore for FakeBackend {
        async fn fetch(&self) -> Result<Option<StoredProfile>, ProfileStoreError> {
            Ok(self.stored.lock().unwrap().clone())
        }

        async fn create(&self, payload: &Value) -> Result<StoredProfile, ProfileStoreError> {
            self.respond(payload)
        }

        async fn update(&self, payload: &Value) -> Result<StoredProfile, ProfileStoreError> {
            self.respond(payload)
        }
    }

    struct FakeParser(Result<PartialProfile, String>);

    #[async_trait]
    impl DocumentParser for FakeParser {
        async fn parse(&self, _bytes: &[u8], _filename: &str) -> Result<PartialProfile, ParseError> {
            self.0.clone().map_err(|message| ParseError::Rejected {
                status: 415,
                message,
            })
        }
    }

    struct FakeSearch(Option<PartialProfile>);

    #[async_trait]
    impl ProfileSearch for FakeSearch {
        async fn search(
            &self,
            _query: &str,
            _kind: SearchKind,
        ) -> Result<Option<PartialProfile>, SearchError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct MemorySnapshots {
        value: Mutex<Option<Value>>,
        saves: AtomicUsize,
    }

    impl SnapshotStore for MemorySnapshots {
        fn load(&self) -> Result<Option<Value>, SnapshotError> {
            Ok(self.value.lock().unwrap().clone())
        }

        fn save(&self, snapshot: &DraftSnapshot) -> Result<(), SnapshotError> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            *self.value.lock().unwrap() =
                Some(serde_json::to_value(snapshot).map_err(|e| SnapshotError(e.to_string()))?);
            Ok(())
        }

        fn clear(&self) -> Result<(), SnapshotError> {
            *self.value.lock().unwrap() = None;
            Ok(())
        }
    }

    struct Harness {
        backend: Arc<FakeBackend>,
        snapshots: Arc<MemorySnapshots>,
    }

    fn controller(mode: WizardMode) -> (DraftController, Harness) {
        controller_with(mode, FakeParser(Ok(PartialProfile::default())), FakeSearch(None))
    }

    fn controller_with(
        mode: WizardMode,
        parser: FakeParser,
        search: FakeSearch,
    ) -> (DraftController, Harness) {
        let backend = Arc::new(FakeBackend::default());
        let snapshots = Arc::new(MemorySnapshots::default());
        let controller = DraftController::new(
            mode,
            backend.clone(),
            Arc::new(parser),
            Arc::new(search),
            snapshots.clone(),
        );
        (controller, Harness { backend, snapshots })
    }

    fn fill_basics(controller: &mut DraftController) {
        controller.set_field(FieldEdit::CreatorName("Jane".to_string()));
        controller.set_field(FieldEdit::CreatorType(Choice::Known(
            CreatorType::FitnessSports,
        )));
        controller.set_field(FieldEdit::PrimaryNiche("Yoga".to_string()));
    }

    #[test]
    fn first_advance_completes_basics() {
        let (mut controller, _harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();
        fill_basics(&mut controller);

        let next = controller.advance().unwrap();
        assert_eq!(next, WizardStep::Audience);
        assert_eq!(controller.current_step(), WizardStep::Audience);
        assert!(controller.is_step_completed(WizardStep::Basics));
        assert_eq!(controller.completed().len(), 1);
    }

    #[test]
    fn failed_advance_blocks_and_records_field_errors() {
        let (mut controller, _harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();

        let error = controller.advance().unwrap_err();
        assert!(matches!(error, WizardError::Validation { .. }));
        assert_eq!(controller.current_step(), WizardStep::Basics);
        assert!(controller.completed().is_empty());
        assert!(controller.blocking_error().is_some());
        assert!(controller.field_errors().contains_key(name::CREATOR_NAME));

        // Editing the offending field clears its error and the block.
        controller.set_field(FieldEdit::CreatorName("Jane".to_string()));
        assert!(!controller.field_errors().contains_key(name::CREATOR_NAME));
        assert!(controller.blocking_error().is_none());
    }

    #[test]
    fn completion_callback_fires_on_advance() {
        let (mut controller, _harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        controller.set_on_step_completed(move |step| sink.lock().unwrap().push(step));

        fill_basics(&mut controller);
        controller.advance().unwrap();
        assert_eq!(*seen.lock().unwrap(), vec![WizardStep::Basics]);
    }

    #[test]
    fn retreat_clamps_and_clears_errors() {
        let (mut controller, _harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();
        let _ = controller.advance(); // leaves a blocking error
        assert!(controller.blocking_error().is_some());

        assert_eq!(controller.retreat(), WizardStep::Basics);
        assert!(controller.blocking_error().is_none());
        assert!(controller.field_errors().is_empty());
    }

    #[test]
    fn linear_mode_blocks_jumps_past_first_incomplete_step() {
        let (mut controller, _harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();
        fill_basics(&mut controller);
        controller.advance().unwrap(); // completed = {Basics}, now on Audience

        let error = controller.jump_to(WizardStep::Platforms).unwrap_err();
        match error {
            WizardError::StepAccessDenied {
                requested,
                required,
            } => {
                assert_eq!(requested, WizardStep::Platforms);
                assert_eq!(required, WizardStep::Audience);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(controller.current_step(), WizardStep::Audience);

        controller.advance().unwrap(); // Audience
        controller.advance().unwrap(); // Content
        assert_eq!(
            controller.jump_to(WizardStep::Platforms).unwrap(),
            WizardStep::Platforms
        );
        // Back to the start is always allowed.
        assert_eq!(
            controller.jump_to(WizardStep::Basics).unwrap(),
            WizardStep::Basics
        );
    }

    #[test]
    fn edit_mode_jumps_anywhere() {
        let (mut controller, _harness) = controller(WizardMode::Edit);
        controller.rehydrate().unwrap();
        assert_eq!(
            controller.jump_to(WizardStep::Insights).unwrap(),
            WizardStep::Insights
        );
    }

    #[test]
    fn review_step_reads_complete_once_reached() {
        let (mut controller, _harness) = controller(WizardMode::Edit);
        controller.rehydrate().unwrap();
        assert!(!controller.is_step_completed(WizardStep::Review));
        controller.jump_to(WizardStep::Review).unwrap();
        assert!(controller.is_step_completed(WizardStep::Review));
    }

    #[test]
    fn persistence_waits_for_rehydration() {
        let (mut controller, harness) = controller(WizardMode::Create);
        controller.set_field(FieldEdit::CreatorName("Jane".to_string()));
        assert_eq!(harness.snapshots.saves.load(Ordering::SeqCst), 0);

        controller.rehydrate().unwrap();
        controller.set_field(FieldEdit::Bio("Flow and breathwork".to_string()));
        assert_eq!(harness.snapshots.saves.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn edit_mode_never_writes_snapshots() {
        let (mut controller, harness) = controller(WizardMode::Edit);
        controller.rehydrate().unwrap();
        controller.set_field(FieldEdit::CreatorName("Jane".to_string()));
        assert_eq!(harness.snapshots.saves.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn session_round_trips_through_the_snapshot_store() {
        let backend = Arc::new(FakeBackend::default());
        let snapshots = Arc::new(MemorySnapshots::default());
        let parser = Arc::new(FakeParser(Ok(PartialProfile::default())));
        let search = Arc::new(FakeSearch(None));

        let mut first = DraftController::new(
            WizardMode::Create,
            backend.clone(),
            parser.clone(),
            search.clone(),
            snapshots.clone(),
        );
        first.rehydrate().unwrap();
        fill_basics(&mut first);
        first.advance().unwrap();
        let saved_draft = first.draft().clone();
        drop(first);

        let mut second =
            DraftController::new(WizardMode::Create, backend, parser, search, snapshots);
        second.rehydrate().unwrap();
        assert_eq!(second.draft(), &saved_draft);
        assert_eq!(second.current_step(), WizardStep::Audience);
        assert!(second.is_step_completed(WizardStep::Basics));
    }

    #[tokio::test]
    async fn import_merges_without_overwriting() {
        let partial = PartialProfile {
            display_name: Some("Janet".to_string()),
            industries: vec!["fitness coaching".to_string()],
            ..PartialProfile::default()
        };
        let (mut controller, _harness) =
            controller_with(WizardMode::Create, FakeParser(Ok(partial)), FakeSearch(None));
        controller.rehydrate().unwrap();
        controller.set_field(FieldEdit::CreatorName("Jane".to_string()));

        controller.import_document(b"%PDF-", "media-kit.pdf").await.unwrap();
        assert_eq!(controller.draft().creator_name, "Jane");
        assert_eq!(controller.draft().primary_niche, "fitness coaching");
        assert_eq!(
            controller.draft().creator_type,
            Some(Choice::Known(CreatorType::FitnessSports))
        );
        assert!(!controller.is_importing());
    }

    #[tokio::test]
    async fn parse_failure_surfaces_verbatim_and_clears_the_flag() {
        let (mut controller, _harness) = controller_with(
            WizardMode::Create,
            FakeParser(Err("unsupported file format".to_string())),
            FakeSearch(None),
        );
        controller.rehydrate().unwrap();

        let error = controller.import_document(b"GIF89a", "logo.gif").await.unwrap_err();
        assert_eq!(error.to_string(), "unsupported file format");
        assert_eq!(controller.draft(), &Draft::new());
        assert!(!controller.is_importing());
    }

    #[tokio::test]
    async fn busy_operations_reject_duplicates() {
        let (mut controller, _harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();

        controller.submitting = true;
        let error = controller.submit().await.unwrap_err();
        assert!(matches!(error, WizardError::Busy { operation: "submit" }));

        controller.importing = true;
        let error = controller.import_document(b"", "kit.pdf").await.unwrap_err();
        assert!(matches!(error, WizardError::Busy { operation: "import" }));

        controller.searching = true;
        let error = controller
            .search_profile("jane", SearchKind::Creator)
            .await
            .unwrap_err();
        assert!(matches!(error, WizardError::Busy { operation: "search" }));
    }

    #[tokio::test]
    async fn search_miss_leaves_the_draft_alone() {
        let (mut controller, _harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();
        let found = controller
            .search_profile("jane doe", SearchKind::Creator)
            .await
            .unwrap();
        assert!(found.is_none());
        assert_eq!(controller.draft(), &Draft::new());
        assert!(!controller.is_searching());
    }

    #[test]
    fn submit_payload_filters_empty_scalars_but_keeps_sequences() {
        let (mut controller, _harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();
        controller.set_field(FieldEdit::CreatorName("Jane".to_string()));
        controller.set_field(FieldEdit::CreatorType(Choice::Other(
            "Pet portraits".to_string(),
        )));

        let payload = controller.submit_payload();
        assert_eq!(payload["creator_name"], "Jane");
        // "Other" answers submit their free text.
        assert_eq!(payload["creator_type"], "Pet portraits");
        // Empty scalars are dropped entirely.
        assert!(payload.get("primary_niche").is_none());
        assert!(payload.get("bio").is_none());
        // Sequences and maps survive even when empty.
        assert!(payload["regions"].as_array().unwrap().is_empty());
        assert!(payload["platform_tones"].as_object().unwrap().is_empty());
        // Everything sent is on the allowlist.
        for key in payload.as_object().unwrap().keys() {
            assert!(ALLOWED_FIELDS.contains(&key.as_str()), "unexpected key {key}");
        }
    }

    #[tokio::test]
    async fn create_submit_clears_the_snapshot() {
        let (mut controller, harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();
        fill_basics(&mut controller);
        assert!(harness.snapshots.value.lock().unwrap().is_some());

        let profile = controller.submit().await.unwrap();
        assert_eq!(profile.draft.creator_name, "Jane");
        assert!(harness.snapshots.value.lock().unwrap().is_none());
        assert!(harness.backend.last_payload.lock().unwrap().is_some());
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn failed_submit_keeps_draft_and_snapshot() {
        let (mut controller, harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();
        fill_basics(&mut controller);
        *harness.backend.fail_with.lock().unwrap() =
            Some("creator_name already taken".to_string());

        let error = controller.submit().await.unwrap_err();
        assert_eq!(error.to_string(), "creator_name already taken");
        assert_eq!(controller.draft().creator_name, "Jane");
        assert!(harness.snapshots.value.lock().unwrap().is_some());
        assert!(!controller.is_submitting());
    }

    #[tokio::test]
    async fn edit_mode_loads_remote_and_updates() {
        let (mut controller, harness) = controller(WizardMode::Edit);
        let mut stored_draft = Draft::new();
        stored_draft.creator_name = "Jane".to_string();
        *harness.backend.stored.lock().unwrap() = Some(StoredProfile {
            id: Uuid::now_v7(),
            draft: stored_draft,
            updated_at: Utc::now(),
        });

        controller.rehydrate().unwrap();
        let id = controller.load_remote().await.unwrap();
        assert!(id.is_some());
        assert_eq!(controller.draft().creator_name, "Jane");
        assert!(controller.is_step_completed(WizardStep::Insights));

        controller.set_field(FieldEdit::PrimaryNiche("Yoga".to_string()));
        controller.submit().await.unwrap();
        let payload = harness.backend.last_payload.lock().unwrap().clone().unwrap();
        assert_eq!(payload["primary_niche"], "Yoga");
    }

    #[test]
    fn reset_returns_to_a_fresh_session() {
        let (mut controller, harness) = controller(WizardMode::Create);
        controller.rehydrate().unwrap();
        fill_basics(&mut controller);
        controller.advance().unwrap();

        controller.reset();
        assert_eq!(controller.draft(), &Draft::new());
        assert_eq!(controller.current_step(), WizardStep::Basics);
        assert!(controller.completed().is_empty());
        assert!(harness.snapshots.value.lock().unwrap().is_none());
    }
}
