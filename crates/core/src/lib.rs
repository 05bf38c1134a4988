//! # CMR Core
//!
//! Core business logic for the clinic meeting registry.
//!
//! This crate contains pure in-memory data operations:
//! - Patient, doctor, and consultation records with a shared person shape
//! - The [`Registry`] aggregate: identity assignment, counters, and queries
//! - Read-time resolution of consultation back-references
//!
//! **No I/O concerns**: prompts, menus, and credential checks belong in the
//! `cmr-cli` shell. Everything here is synchronous, single-threaded, and
//! scoped to one program run.

pub mod records;
pub mod registry;

pub use records::{Consultation, ConsultationView, Describe, Doctor, Patient, Person};
pub use registry::{ConsultationSplit, Registry};
