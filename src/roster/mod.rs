//! # Roster Controller
//!
//! The entry point for the presentation layer: add, update, remove and
//! search student records, backed by the record store, the validation
//! engine and the course directory.

mod controller;
mod errors;

pub use controller::{RosterController, RosterPhase};
pub use errors::{RosterError, RosterResult};
