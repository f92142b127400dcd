//! Roster Property Tests
//!
//! Behavioural guarantees of the roster controller:
//! - Validation flags short names and malformed emails
//! - Added records get a fresh id and an enrollment date from the call
//! - Updates never move the enrollment date
//! - Search is case-insensitive across name, email and course
//! - A failed course directory blocks record creation

use chrono::Utc;
use roster::directory::{DirectoryClient, DirectoryState, MockCourseSource};
use roster::record::{RecordId, StudentDraft};
use roster::store::{MemoryBackend, RecordStore};
use roster::validation::{validate, Field, Issue};
use roster::{RosterController, RosterError};

// =============================================================================
// Helper Functions
// =============================================================================

const COURSES: &[&str] = &["Physics", "History", "Mathematics"];

fn memory_store() -> RecordStore {
    RecordStore::new(Box::new(MemoryBackend::new()), "students")
}

async fn ready_roster() -> RosterController {
    let directory = DirectoryClient::new(Box::new(MockCourseSource::with_default_courses()));
    let roster = RosterController::open(memory_store(), directory);
    roster.load_courses().await;
    roster
}

fn draft(name: &str, email: &str, course: &str) -> StudentDraft {
    StudentDraft::new(name, email, course)
}

// =============================================================================
// Validation
// =============================================================================

/// Any blank name is flagged; any name of two or more characters is not.
#[test]
fn test_name_validation_property() {
    for name in ["", " ", "\t\n", "    "] {
        let errors = validate(&draft(name, "a@b.com", "Physics"), COURSES);
        assert!(errors.contains(Field::Name), "blank name {:?}", name);
    }

    for name in ["Al", "Ann", " Jo ", "María José", "李雷"] {
        let errors = validate(&draft(name, "a@b.com", "Physics"), COURSES);
        assert!(!errors.contains(Field::Name), "name {:?}", name);
    }
}

/// Strings without an '@' or without a dot in the domain are invalid.
#[test]
fn test_email_validation_property() {
    for email in ["ab.com", "a.b.c", "a@bcom", "a@localhost", "user at host.com"] {
        let errors = validate(&draft("Ann", email, "Physics"), COURSES);
        assert_eq!(errors.get(Field::Email), Some(Issue::InvalidFormat), "email {:?}", email);
    }

    let errors = validate(&draft("Ann", "a@b.com", "Physics"), COURSES);
    assert!(errors.is_valid());
}

/// Every rule runs even when an earlier one fails.
#[test]
fn test_validation_does_not_short_circuit() {
    let errors = validate(&draft("", "", ""), COURSES);
    assert_eq!(errors.len(), 3);
}

// =============================================================================
// Add / Update
// =============================================================================

/// A new record appears in the unfiltered view with a fresh id and an
/// enrollment date inside the call window.
#[tokio::test]
async fn test_add_then_search_all() {
    let mut roster = ready_roster().await;

    let start = Utc::now();
    let record = roster.add_record(&draft("Ann Lee", "ann@x.com", "Physics")).unwrap();
    let end = Utc::now();

    let all = roster.search("");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], &record);
    assert!(record.enrollment_date >= start);
    assert!(record.enrollment_date <= end);
}

/// Ids stay unique across many adds.
#[tokio::test]
async fn test_ids_unique() {
    let mut roster = ready_roster().await;
    for i in 0..200 {
        roster
            .add_record(&draft(&format!("Student {}", i), &format!("s{}@x.com", i), "Physics"))
            .unwrap();
    }

    let mut ids: Vec<_> = roster.records().iter().map(|r| r.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

/// No update input, valid or not, moves the enrollment date.
#[tokio::test]
async fn test_update_never_changes_enrollment_date() {
    let mut roster = ready_roster().await;
    let original = roster.add_record(&draft("Ann Lee", "ann@x.com", "Physics")).unwrap();

    let edits = [
        draft("Ann Lee", "ann@x.com", "History"),
        draft("Annabel Lee", "ANNABEL@X.COM", "Mathematics"),
        draft("", "broken", ""),
        draft("Ann", "ann@y.org", "Physics").with_profile_image("https://img.example/a.png"),
    ];

    for edit in edits {
        let _ = roster.update_record(&edit.for_record(original.id.clone()));
        let current = roster.get(&original.id).unwrap();
        assert_eq!(current.enrollment_date, original.enrollment_date);
        assert_eq!(current.id, original.id);
    }
}

/// An invalid update leaves the stored record exactly as it was.
#[tokio::test]
async fn test_invalid_update_is_all_or_nothing() {
    let mut roster = ready_roster().await;
    let original = roster.add_record(&draft("Ann Lee", "ann@x.com", "Physics")).unwrap();

    let bad = draft("Ann Lee", "not-an-email", "History").for_record(original.id.clone());
    assert!(matches!(roster.update_record(&bad), Err(RosterError::Invalid(_))));
    assert_eq!(roster.get(&original.id), Some(&original));
}

#[tokio::test]
async fn test_update_missing_record() {
    let mut roster = ready_roster().await;
    let ghost = draft("Ann Lee", "ann@x.com", "Physics").for_record(RecordId::from("ghost"));

    assert!(matches!(roster.update_record(&ghost), Err(RosterError::NotFound(_))));
}

// =============================================================================
// Search
// =============================================================================

/// Given [{name: Ann}, {email: x@bob.com}], "bob" matches only the second.
#[tokio::test]
async fn test_search_matches_any_field() {
    let mut roster = ready_roster().await;
    roster.add_record(&draft("Ann", "ann@example.com", "Physics")).unwrap();
    let second = roster.add_record(&draft("Xi", "x@bob.com", "History")).unwrap();

    let found = roster.search("bob");
    assert_eq!(found, vec![&second]);
    assert_eq!(roster.search("BoB"), vec![&second]);
    assert_eq!(roster.search("hist"), vec![&second]);
}

// =============================================================================
// Course Directory
// =============================================================================

/// While the directory is Failed, even an otherwise-valid draft is rejected.
#[tokio::test]
async fn test_failed_directory_blocks_add() {
    let directory = DirectoryClient::new(Box::new(
        MockCourseSource::with_default_courses().with_failure_rate(1.0),
    ));
    let mut roster = RosterController::open(memory_store(), directory);

    let state = roster.load_courses().await;
    assert!(matches!(state, DirectoryState::Failed(_)));

    let result = roster.add_record(&draft("Ann Lee", "ann@x.com", "Physics"));
    let errors = result.unwrap_err().validation_errors().cloned().unwrap();
    assert_eq!(errors.get(Field::EnrolledCourse), Some(Issue::UnknownCourse));
    assert!(roster.is_empty());
}

/// Before the first fetch the directory is Idle and nothing can be added.
#[tokio::test]
async fn test_idle_directory_blocks_add() {
    let directory = DirectoryClient::new(Box::new(MockCourseSource::with_default_courses()));
    let mut roster = RosterController::open(memory_store(), directory);

    assert_eq!(roster.directory().state(), DirectoryState::Idle);
    assert!(roster.add_record(&draft("Ann Lee", "ann@x.com", "Physics")).is_err());
}

/// Retry after a failure reaches Ready once the source recovers.
#[tokio::test]
async fn test_retry_recovers() {
    let directory = DirectoryClient::new(Box::new(
        MockCourseSource::with_default_courses()
            .with_failure_rate(0.5)
            .with_seed(11),
    ));
    let roster = RosterController::open(memory_store(), directory);

    let mut state = roster.load_courses().await;
    let mut attempts = 1;
    while matches!(state, DirectoryState::Failed(_)) && attempts < 64 {
        state = roster.retry_courses().await.unwrap();
        attempts += 1;
    }

    assert!(matches!(state, DirectoryState::Ready(_)));
    assert!(!roster.directory().course_names().is_empty());
}
