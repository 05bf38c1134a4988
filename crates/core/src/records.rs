//! Record types and their rendering capability.
//!
//! Patients and doctors embed the shared [`Person`] shape by value; there is
//! no inheritance hierarchy. Consultations hold back-references to their
//! patient and doctor as stable identifiers rather than pointers, and are
//! resolved through the registry at read time.

use cmr_types::{ClinicDate, DoctorId, NonEmptyText, PatientId};
use serde::{Deserialize, Serialize};

/// Renders a record as user-facing text.
///
/// Each record type renders its own fields plus the shared person fields in
/// a fixed format: subtype tag and id, then name and age, then the
/// subtype-specific field.
pub trait Describe {
    fn describe(&self) -> String;
}

/// The attributes shared by every person in the registry.
///
/// Immutable after creation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    /// Full name, used for exact-match name queries.
    pub name: NonEmptyText,
    /// Age in years.
    pub age: u32,
}

/// A patient record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Registry-assigned identifier, unique within the patient namespace.
    pub id: PatientId,
    /// Shared person attributes.
    #[serde(flatten)]
    pub person: Person,
    /// Condition the patient is being seen for.
    pub disease: NonEmptyText,
}

/// A doctor record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Registry-assigned identifier, unique within the doctor namespace.
    pub id: DoctorId,
    /// Shared person attributes.
    #[serde(flatten)]
    pub person: Person,
    /// Medical specialization.
    pub specialization: NonEmptyText,
}

/// A scheduled meeting between one patient and one doctor.
///
/// Consultations are append-only: created once, never edited or removed.
/// The patient and doctor fields are non-owning back-references; use
/// [`crate::Registry::view`] to resolve them for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Consultation {
    /// Identifier of the patient this consultation is for.
    pub patient: PatientId,
    /// Identifier of the attending doctor.
    pub doctor: DoctorId,
    /// Date of the meeting. See [`ClinicDate`] for the ordering contract.
    pub date: ClinicDate,
    /// Free-text notes.
    pub notes: String,
}

/// A consultation together with its resolved patient and doctor records.
///
/// Resolution can miss if a caller recorded a consultation against an
/// identifier the registry never assigned; the rendering contract covers
/// that with an explicit unknown marker.
#[derive(Clone, Debug)]
pub struct ConsultationView<'a> {
    pub consultation: &'a Consultation,
    pub patient: Option<&'a Patient>,
    pub doctor: Option<&'a Doctor>,
}

impl Describe for Patient {
    fn describe(&self) -> String {
        format!(
            "Patient[ID: {}] - Name: {}, Age: {}\nDisease: {}",
            self.id, self.person.name, self.person.age, self.disease
        )
    }
}

impl Describe for Doctor {
    fn describe(&self) -> String {
        format!(
            "Doctor[ID: {}] - Name: {}, Age: {}\nSpecialization: {}",
            self.id, self.person.name, self.person.age, self.specialization
        )
    }
}

impl Describe for ConsultationView<'_> {
    fn describe(&self) -> String {
        let patient = match self.patient {
            Some(p) => p.describe(),
            None => "Unknown patient".to_string(),
        };
        let doctor = match self.doctor {
            Some(d) => d.describe(),
            None => "Unknown doctor".to_string(),
        };
        format!(
            "Consultation - Date: {}, Notes: {}\n  Patient Info: {}\n  Doctor Info: {}",
            self.consultation.date, self.consultation.notes, patient, doctor
        )
    }
}
