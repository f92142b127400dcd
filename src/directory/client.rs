//! # Course Directory Client
//!
//! ```text
//! Idle ──fetch──▶ Loading ──▶ Ready(courses)
//!                    ▲    └──▶ Failed(message) ──retry──┐
//!                    └──────────────────────────────────┘
//! ```
//!
//! The snapshot is empty while Idle, Loading or Failed. Each fetch takes a
//! generation number; a result that arrives after a newer fetch started is
//! discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use crate::observability::{log_event, Event, RosterMetrics};
use crate::record::Course;

use super::errors::{DirectoryError, DirectoryResult};
use super::source::CourseSource;

/// Directory state as seen by the controller and the presentation layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectoryState {
    Idle,
    Loading,
    Ready(Vec<Course>),
    Failed(String),
}

impl DirectoryState {
    pub fn name(&self) -> &'static str {
        match self {
            DirectoryState::Idle => "idle",
            DirectoryState::Loading => "loading",
            DirectoryState::Ready(_) => "ready",
            DirectoryState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug)]
pub struct DirectoryClient {
    source: Box<dyn CourseSource>,
    state: RwLock<DirectoryState>,
    generation: AtomicU64,
    metrics: Arc<RosterMetrics>,
}

impl DirectoryClient {
    pub fn new(source: Box<dyn CourseSource>) -> Self {
        Self::with_metrics(source, Arc::new(RosterMetrics::new()))
    }

    pub fn with_metrics(source: Box<dyn CourseSource>, metrics: Arc<RosterMetrics>) -> Self {
        Self {
            source,
            state: RwLock::new(DirectoryState::Idle),
            generation: AtomicU64::new(0),
            metrics,
        }
    }

    /// Current state
    pub fn state(&self) -> DirectoryState {
        self.state.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_state(&self, next: DirectoryState) {
        *self.state.write().unwrap_or_else(|e| e.into_inner()) = next;
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state(), DirectoryState::Ready(_))
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state(), DirectoryState::Loading)
    }

    /// Failure message while in `Failed`
    pub fn error_message(&self) -> Option<String> {
        match self.state() {
            DirectoryState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Courses in the current snapshot; empty unless Ready
    pub fn courses(&self) -> Vec<Course> {
        match &*self.state.read().unwrap_or_else(|e| e.into_inner()) {
            DirectoryState::Ready(courses) => courses.clone(),
            _ => Vec::new(),
        }
    }

    /// Names of the courses in the current snapshot; empty unless Ready
    pub fn course_names(&self) -> Vec<String> {
        match &*self.state.read().unwrap_or_else(|e| e.into_inner()) {
            DirectoryState::Ready(courses) => courses.iter().map(|c| c.name.clone()).collect(),
            _ => Vec::new(),
        }
    }

    /// Start a fresh round trip and wait for it.
    ///
    /// Returns the state after this fetch resolved. If a newer fetch began
    /// in the meantime, this fetch's result is dropped and the state is
    /// left to the newer one.
    pub async fn fetch(&self) -> DirectoryState {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.set_state(DirectoryState::Loading);
        self.metrics.increment_directory_fetches();

        let generation_field = generation.to_string();
        log_event(
            Event::DirectoryFetchStart,
            &[("generation", generation_field.as_str())],
        );

        let result = self.source.fetch_courses().await;

        if self.generation.load(Ordering::SeqCst) != generation {
            log_event(
                Event::DirectoryFetchStale,
                &[("generation", generation_field.as_str())],
            );
            return self.state();
        }

        let next = match result {
            Ok(courses) => {
                let count = courses.len().to_string();
                log_event(
                    Event::DirectoryFetchComplete,
                    &[("courses", count.as_str()), ("generation", generation_field.as_str())],
                );
                DirectoryState::Ready(courses)
            }
            Err(err) => {
                self.metrics.increment_directory_failures();
                let message = match err {
                    DirectoryError::Unavailable(reason) => reason,
                    other => other.to_string(),
                };
                log_event(
                    Event::DirectoryFetchFailed,
                    &[("generation", generation_field.as_str()), ("reason", message.as_str())],
                );
                DirectoryState::Failed(message)
            }
        };

        self.set_state(next.clone());
        next
    }

    /// Re-fetch after a failure
    pub async fn retry(&self) -> DirectoryResult<DirectoryState> {
        let current = self.state();
        if !matches!(current, DirectoryState::Failed(_)) {
            return Err(DirectoryError::RetryNotApplicable(current.name()));
        }
        Ok(self.fetch().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::MockCourseSource;
    use std::time::Duration;

    fn reliable() -> DirectoryClient {
        DirectoryClient::new(Box::new(MockCourseSource::with_default_courses()))
    }

    fn failing() -> DirectoryClient {
        DirectoryClient::new(Box::new(
            MockCourseSource::with_default_courses().with_failure_rate(1.0),
        ))
    }

    #[tokio::test]
    async fn test_starts_idle_with_empty_snapshot() {
        let client = reliable();
        assert_eq!(client.state(), DirectoryState::Idle);
        assert!(client.course_names().is_empty());
    }

    #[tokio::test]
    async fn test_fetch_reaches_ready() {
        let client = reliable();
        let state = client.fetch().await;

        assert!(matches!(state, DirectoryState::Ready(_)));
        assert!(client.is_ready());
        assert!(client.course_names().contains(&"Physics".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_failure_is_recoverable_state() {
        let client = failing();
        let state = client.fetch().await;

        assert_eq!(state.name(), "failed");
        assert!(client.error_message().is_some());
        assert!(client.courses().is_empty());
    }

    #[tokio::test]
    async fn test_retry_only_from_failed() {
        let client = reliable();
        assert_eq!(
            client.retry().await,
            Err(DirectoryError::RetryNotApplicable("idle"))
        );

        client.fetch().await;
        assert_eq!(
            client.retry().await,
            Err(DirectoryError::RetryNotApplicable("ready"))
        );
    }

    #[tokio::test]
    async fn test_retry_after_failure_refetches() {
        let client = failing();
        client.fetch().await;

        let state = client.retry().await.unwrap();
        assert_eq!(state.name(), "failed");

        let metrics = client.metrics.snapshot();
        assert_eq!(metrics.directory_fetches, 2);
        assert_eq!(metrics.directory_failures, 2);
    }

    #[tokio::test]
    async fn test_loading_is_observable_during_fetch() {
        let client = DirectoryClient::new(Box::new(
            MockCourseSource::with_default_courses().with_latency(Duration::from_millis(20)),
        ));

        let observe = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            (client.is_loading(), client.course_names().len())
        };
        let (state, (was_loading, names_while_loading)) = tokio::join!(client.fetch(), observe);

        assert!(was_loading);
        assert_eq!(names_while_loading, 0);
        assert!(matches!(state, DirectoryState::Ready(_)));
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_discarded() {
        let client = DirectoryClient::new(Box::new(
            MockCourseSource::with_default_courses().with_latency(Duration::from_millis(30)),
        ));

        let first = client.fetch();
        let second = async {
            tokio::time::sleep(Duration::from_millis(5)).await;
            client.fetch().await
        };
        let (first_state, second_state) = tokio::join!(first, second);

        // The first result arrived while the second fetch was still loading.
        assert_eq!(first_state, DirectoryState::Loading);
        assert!(matches!(second_state, DirectoryState::Ready(_)));
        assert!(client.is_ready());
    }
}
