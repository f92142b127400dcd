//! # Roster Controller
//!
//! Owns the in-memory collection and orchestrates validation, persistence
//! and the course directory. Every successful mutation is followed by an
//! explicit full save; failed operations change nothing.
//!
//! The controller starts in `Loading` and rejects mutations until
//! `hydrate` has pulled the persisted collection into memory, so an early
//! save can never overwrite stored records with an empty list.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::config::RosterConfig;
use crate::directory::{DirectoryClient, DirectoryResult, DirectoryState, MockCourseSource};
use crate::observability::{log_event, Event, MetricsSnapshot, RosterMetrics};
use crate::record::{RecordId, StudentDraft, StudentRecord, DEFAULT_PLACEHOLDER_IMAGE};
use crate::store::{LocalBackend, RecordStore};
use crate::validation::{DraftForm, DraftValidator, ValidationErrorSet};

use super::errors::{RosterError, RosterResult};

/// Whether the initial load has completed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterPhase {
    Loading,
    Ready,
}

#[derive(Debug)]
pub struct RosterController {
    store: RecordStore,
    directory: DirectoryClient,
    validator: DraftValidator,
    records: Vec<StudentRecord>,
    phase: RosterPhase,
    search_term: String,
    placeholder_image: String,
    submission_delay: Duration,
    metrics: Arc<RosterMetrics>,
}

impl RosterController {
    /// Create an unhydrated controller.
    ///
    /// Counters are recorded in the store's metrics registry.
    pub fn new(store: RecordStore, directory: DirectoryClient) -> Self {
        let metrics = Arc::clone(store.metrics());
        Self {
            store,
            directory,
            validator: DraftValidator::default(),
            records: Vec::new(),
            phase: RosterPhase::Loading,
            search_term: String::new(),
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            submission_delay: Duration::ZERO,
            metrics,
        }
    }

    /// Create and immediately hydrate a controller
    pub fn open(store: RecordStore, directory: DirectoryClient) -> Self {
        let mut controller = Self::new(store, directory);
        controller.hydrate();
        controller
    }

    /// Build an unhydrated controller over the file backend and the
    /// simulated course service described by `config`
    pub fn from_config(config: &RosterConfig) -> Self {
        let metrics = Arc::new(RosterMetrics::new());

        let store = RecordStore::with_metrics(
            Box::new(LocalBackend::new(config.data_dir.clone())),
            config.blob_name.clone(),
            Arc::clone(&metrics),
        );
        let source = MockCourseSource::with_default_courses()
            .with_latency(config.directory.latency())
            .with_failure_rate(config.directory.failure_rate);
        let directory = DirectoryClient::with_metrics(Box::new(source), Arc::clone(&metrics));

        Self::new(store, directory)
            .with_validator(DraftValidator::new(config.enforce_course_membership))
            .with_placeholder_image(config.placeholder_image_url.clone())
            .with_submission_delay(config.submission_delay())
    }

    pub fn with_validator(mut self, validator: DraftValidator) -> Self {
        self.validator = validator;
        self
    }

    pub fn with_placeholder_image(mut self, url: impl Into<String>) -> Self {
        self.placeholder_image = url.into();
        self
    }

    /// Latency awaited by `submit_add` / `submit_update` before committing
    pub fn with_submission_delay(mut self, delay: Duration) -> Self {
        self.submission_delay = delay;
        self
    }

    // ==================
    // Hydration
    // ==================

    /// Load the persisted collection into memory.
    ///
    /// Runs once; later calls are no-ops. Never saves.
    pub fn hydrate(&mut self) -> usize {
        if self.phase == RosterPhase::Ready {
            return self.records.len();
        }

        let blob = self.store.blob_name().to_string();
        log_event(Event::HydrateStart, &[("blob", blob.as_str())]);

        self.records = self.store.load();
        self.phase = RosterPhase::Ready;

        let count = self.records.len().to_string();
        log_event(
            Event::HydrateComplete,
            &[("blob", blob.as_str()), ("records", count.as_str())],
        );
        self.records.len()
    }

    pub fn phase(&self) -> RosterPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == RosterPhase::Loading
    }

    fn ensure_ready(&self) -> RosterResult<()> {
        match self.phase {
            RosterPhase::Ready => Ok(()),
            RosterPhase::Loading => Err(RosterError::NotHydrated),
        }
    }

    // ==================
    // Course directory
    // ==================

    pub fn directory(&self) -> &DirectoryClient {
        &self.directory
    }

    /// Fetch the course list
    pub async fn load_courses(&self) -> DirectoryState {
        self.directory.fetch().await
    }

    /// Re-fetch the course list after a failure
    pub async fn retry_courses(&self) -> DirectoryResult<DirectoryState> {
        self.directory.retry().await
    }

    // ==================
    // Validation
    // ==================

    /// Validate a draft against the current directory snapshot
    pub fn validate(&self, draft: &StudentDraft) -> ValidationErrorSet {
        self.validator.validate(draft, &self.directory.course_names())
    }

    /// Recompute a form's errors. Returns true if it is valid.
    pub fn validate_form(&self, form: &mut DraftForm) -> bool {
        form.validate(&self.validator, &self.directory.course_names())
    }

    fn check(&self, draft: &StudentDraft) -> RosterResult<()> {
        let errors = self.validate(draft);
        if errors.is_valid() {
            return Ok(());
        }

        self.metrics.increment_rejected();
        let fields = errors.fields().map(|f| f.as_str()).collect::<Vec<_>>().join(",");
        log_event(Event::RecordRejected, &[("fields", fields.as_str())]);
        Err(RosterError::Invalid(errors))
    }

    // ==================
    // Mutations
    // ==================

    /// Validate `draft` and append it as a new record.
    ///
    /// Any id on the draft is ignored; a fresh one is assigned along with
    /// the enrollment date.
    pub fn add_record(&mut self, draft: &StudentDraft) -> RosterResult<StudentRecord> {
        self.ensure_ready()?;
        self.check(draft)?;

        let record = StudentRecord::from_draft(
            draft,
            self.fresh_id(),
            Utc::now(),
            &self.placeholder_image,
        );
        self.records.push(record.clone());
        self.store.save(&self.records);

        self.metrics.increment_added();
        log_event(Event::RecordAdded, &[("id", record.id.as_str())]);
        Ok(record)
    }

    /// Validate `draft` and replace the record with the draft's id in place.
    ///
    /// The record keeps its id, position and enrollment date.
    pub fn update_record(&mut self, draft: &StudentDraft) -> RosterResult<StudentRecord> {
        self.ensure_ready()?;
        let id = draft.id.clone().ok_or(RosterError::MissingId)?;
        self.check(draft)?;

        let index = self.position(&id)?;
        let updated = self.records[index].with_draft(draft, &self.placeholder_image);
        self.records[index] = updated.clone();
        self.store.save(&self.records);

        self.metrics.increment_updated();
        log_event(Event::RecordUpdated, &[("id", id.as_str())]);
        Ok(updated)
    }

    /// Remove a record
    pub fn remove_record(&mut self, id: &RecordId) -> RosterResult<StudentRecord> {
        self.ensure_ready()?;

        let index = self.position(id)?;
        let removed = self.records.remove(index);
        self.store.save(&self.records);

        self.metrics.increment_removed();
        log_event(Event::RecordRemoved, &[("id", id.as_str())]);
        Ok(removed)
    }

    /// Validate, wait out the submission delay, then add.
    ///
    /// An invalid draft is rejected before the delay. The draft is
    /// validated again at commit time against the snapshot current then.
    pub async fn submit_add(&mut self, draft: &StudentDraft) -> RosterResult<StudentRecord> {
        self.ensure_ready()?;
        self.check(draft)?;
        self.simulate_submission().await;
        self.add_record(draft)
    }

    /// Validate, wait out the submission delay, then update
    pub async fn submit_update(&mut self, draft: &StudentDraft) -> RosterResult<StudentRecord> {
        self.ensure_ready()?;
        if draft.id.is_none() {
            return Err(RosterError::MissingId);
        }
        self.check(draft)?;
        self.simulate_submission().await;
        self.update_record(draft)
    }

    /// Submit a form as an add or an update depending on whether it is
    /// editing a record.
    ///
    /// Validation failures are written back into the form; success resets it.
    pub async fn submit_form(&mut self, form: &mut DraftForm) -> RosterResult<StudentRecord> {
        let result = if form.editing().is_some() {
            self.submit_update(form.draft()).await
        } else {
            self.submit_add(form.draft()).await
        };

        match &result {
            Ok(_) => form.reset(),
            Err(RosterError::Invalid(errors)) => form.set_errors(errors.clone()),
            Err(_) => {}
        }
        result
    }

    async fn simulate_submission(&self) {
        if !self.submission_delay.is_zero() {
            tokio::time::sleep(self.submission_delay).await;
        }
    }

    fn position(&self, id: &RecordId) -> RosterResult<usize> {
        self.records
            .iter()
            .position(|r| &r.id == id)
            .ok_or_else(|| RosterError::NotFound(id.clone()))
    }

    fn fresh_id(&self) -> RecordId {
        loop {
            let id = RecordId::generate();
            if !self.records.iter().any(|r| r.id == id) {
                return id;
            }
        }
    }

    // ==================
    // Queries
    // ==================

    /// Every record, in insertion order
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&StudentRecord> {
        self.records.iter().find(|r| &r.id == id)
    }

    /// Form pre-populated for editing `id`
    pub fn begin_edit(&self, id: &RecordId) -> RosterResult<DraftForm> {
        self.get(id)
            .map(DraftForm::edit)
            .ok_or_else(|| RosterError::NotFound(id.clone()))
    }

    /// Case-insensitive substring match on name, email or course.
    ///
    /// A blank term matches everything. Results keep collection order.
    pub fn search(&self, term: &str) -> Vec<&StudentRecord> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.records.iter().collect();
        }
        self.records.iter().filter(|r| r.matches(&needle)).collect()
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Records matching the current search term
    pub fn visible_records(&self) -> Vec<&StudentRecord> {
        self.search(&self.search_term)
    }

    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }
}
