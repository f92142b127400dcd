//! # Course Sources
//!
//! Where the directory gets its course list from. The bundled
//! `MockCourseSource` simulates a remote service with latency and a
//! configurable failure rate.

use std::fmt;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::record::Course;

use super::errors::{DirectoryError, DirectoryResult};

/// An asynchronous, parameterless course list provider
#[async_trait]
pub trait CourseSource: Send + Sync + fmt::Debug {
    /// Fetch the full course list; each call is a fresh round trip
    async fn fetch_courses(&self) -> DirectoryResult<Vec<Course>>;
}

/// Courses served by `MockCourseSource::with_default_courses`
pub fn default_courses() -> Vec<Course> {
    [
        "Computer Science",
        "Mathematics",
        "Physics",
        "Chemistry",
        "Biology",
        "English Literature",
        "History",
        "Economics",
    ]
    .into_iter()
    .enumerate()
    .map(|(i, name)| Course::new(i as u32 + 1, name))
    .collect()
}

/// Simulated remote course service
pub struct MockCourseSource {
    courses: Vec<Course>,
    latency: Duration,
    failure_rate: f64,
    rng: Mutex<StdRng>,
}

impl MockCourseSource {
    /// Serve `courses` instantly and never fail
    pub fn new(courses: Vec<Course>) -> Self {
        Self {
            courses,
            latency: Duration::ZERO,
            failure_rate: 0.0,
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn with_default_courses() -> Self {
        Self::new(default_courses())
    }

    /// Delay every response by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Fail each fetch with probability `rate`, clamped to 0.0..=1.0.
    /// NaN means never fail.
    pub fn with_failure_rate(mut self, rate: f64) -> Self {
        self.failure_rate = if rate.is_nan() { 0.0 } else { rate.clamp(0.0, 1.0) };
        self
    }

    /// Use a deterministic random sequence
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    fn roll_failure(&self) -> bool {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_bool(self.failure_rate)
    }
}

impl fmt::Debug for MockCourseSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockCourseSource")
            .field("courses", &self.courses.len())
            .field("latency", &self.latency)
            .field("failure_rate", &self.failure_rate)
            .finish()
    }
}

#[async_trait]
impl CourseSource for MockCourseSource {
    async fn fetch_courses(&self) -> DirectoryResult<Vec<Course>> {
        let fail = self.roll_failure();

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if fail {
            return Err(DirectoryError::Unavailable(
                "course service did not respond".to_string(),
            ));
        }
        Ok(self.courses.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reliable_source_returns_courses() {
        let source = MockCourseSource::with_default_courses();
        let courses = source.fetch_courses().await.unwrap();

        assert_eq!(courses.len(), 8);
        assert_eq!(courses[0], Course::new(1, "Computer Science"));
    }

    #[tokio::test]
    async fn test_always_failing_source() {
        let source = MockCourseSource::with_default_courses().with_failure_rate(1.0);
        let result = source.fetch_courses().await;

        assert!(matches!(result, Err(DirectoryError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_seeded_failures_are_reproducible() {
        let outcomes = |seed| async move {
            let source = MockCourseSource::with_default_courses()
                .with_failure_rate(0.5)
                .with_seed(seed);
            let mut out = Vec::new();
            for _ in 0..16 {
                out.push(source.fetch_courses().await.is_ok());
            }
            out
        };

        assert_eq!(outcomes(7).await, outcomes(7).await);
    }

    #[tokio::test]
    async fn test_nan_failure_rate_never_fails() {
        let source = MockCourseSource::with_default_courses().with_failure_rate(f64::NAN);

        for _ in 0..8 {
            assert!(source.fetch_courses().await.is_ok());
        }
    }

    #[test]
    fn test_failure_rate_is_clamped() {
        let source = MockCourseSource::with_default_courses().with_failure_rate(3.0);
        assert!(source.roll_failure());
    }
}
