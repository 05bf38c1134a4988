//! The registry aggregate.
//!
//! [`Registry`] is the sole owner of all patient, doctor, and consultation
//! records and the single source of truth for identity assignment. All
//! queries are linear scans in creation order; at one in-memory session of
//! clinic scale an index would change nothing observable.

use crate::records::{Consultation, ConsultationView, Doctor, Patient, Person};
use cmr_types::{ClinicDate, DoctorId, NonEmptyText, PatientId};

/// Consultations for one identity, partitioned around a reference date.
///
/// A consultation is upcoming iff its date compares `>=` the reference date
/// (string comparison, so a consultation on the reference date itself is
/// upcoming). Encounter order is preserved within each partition; no other
/// sorting is applied.
#[derive(Debug, Default)]
pub struct ConsultationSplit<'a> {
    pub upcoming: Vec<&'a Consultation>,
    pub past: Vec<&'a Consultation>,
}

/// The owning aggregate for all clinic records.
///
/// Patient and doctor identifiers are assigned here, each from its own
/// namespace counting from 1, and are never reused. The display counters
/// track records ever created; since removal is unsupported they always
/// equal the collection lengths.
///
/// Not thread-safe: the registry expects the sequential, single-threaded
/// call pattern of the interaction shell.
#[derive(Debug)]
pub struct Registry {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    consultations: Vec<Consultation>,
    next_patient_id: u32,
    next_doctor_id: u32,
    patient_count: u32,
    doctor_count: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry. Identifier assignment starts at 1 in each
    /// namespace.
    pub fn new() -> Self {
        Self {
            patients: Vec::new(),
            doctors: Vec::new(),
            consultations: Vec::new(),
            next_patient_id: 1,
            next_doctor_id: 1,
            patient_count: 0,
            doctor_count: 0,
        }
    }

    /// Adds a patient record and returns a reference to it.
    ///
    /// The identifier is taken from the patient namespace cursor and the
    /// patient counter is bumped. Inputs are pre-validated by the caller;
    /// this operation cannot fail.
    pub fn add_patient(&mut self, name: NonEmptyText, age: u32, disease: NonEmptyText) -> &Patient {
        let id = PatientId::new(self.next_patient_id);
        self.next_patient_id += 1;
        self.patient_count += 1;
        tracing::debug!(%id, name = %name, "patient added");
        let index = self.patients.len();
        self.patients.push(Patient {
            id,
            person: Person { name, age },
            disease,
        });
        &self.patients[index]
    }

    /// Adds a doctor record and returns a reference to it.
    ///
    /// Symmetric to [`Registry::add_patient`] with the doctor namespace and
    /// counter.
    pub fn add_doctor(
        &mut self,
        name: NonEmptyText,
        age: u32,
        specialization: NonEmptyText,
    ) -> &Doctor {
        let id = DoctorId::new(self.next_doctor_id);
        self.next_doctor_id += 1;
        self.doctor_count += 1;
        tracing::debug!(%id, name = %name, "doctor added");
        let index = self.doctors.len();
        self.doctors.push(Doctor {
            id,
            person: Person { name, age },
            specialization,
        });
        &self.doctors[index]
    }

    /// Records a consultation between an existing patient and doctor.
    ///
    /// The caller resolves both records beforehand; referential existence is
    /// not re-checked here. Consultations are append-only.
    pub fn add_consultation(
        &mut self,
        patient: PatientId,
        doctor: DoctorId,
        date: ClinicDate,
        notes: String,
    ) {
        tracing::debug!(%patient, %doctor, date = %date, "consultation added");
        self.consultations.push(Consultation {
            patient,
            doctor,
            date,
            notes,
        });
    }

    /// Looks up a patient by identifier. `None` is a normal outcome, not a
    /// fault.
    pub fn find_patient_by_id(&self, id: PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Looks up a doctor by identifier.
    pub fn find_doctor_by_id(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    /// Returns all patients whose name exactly equals the query, in creation
    /// order. An empty result is a normal outcome.
    pub fn patients_by_name(&self, name: &str) -> Vec<&Patient> {
        self.patients
            .iter()
            .filter(|p| p.person.name.as_str() == name)
            .collect()
    }

    /// Returns all doctors whose name exactly equals the query, in creation
    /// order.
    pub fn doctors_by_name(&self, name: &str) -> Vec<&Doctor> {
        self.doctors
            .iter()
            .filter(|d| d.person.name.as_str() == name)
            .collect()
    }

    /// Partitions the patient's consultations into upcoming and past
    /// relative to `reference`.
    pub fn consultations_for_patient(
        &self,
        patient: PatientId,
        reference: &ClinicDate,
    ) -> ConsultationSplit<'_> {
        self.partition(reference, |c| c.patient == patient)
    }

    /// Partitions the doctor's consultations into upcoming and past relative
    /// to `reference`.
    pub fn consultations_for_doctor(
        &self,
        doctor: DoctorId,
        reference: &ClinicDate,
    ) -> ConsultationSplit<'_> {
        self.partition(reference, |c| c.doctor == doctor)
    }

    fn partition<'a>(
        &'a self,
        reference: &ClinicDate,
        matches: impl Fn(&Consultation) -> bool,
    ) -> ConsultationSplit<'a> {
        let mut split = ConsultationSplit::default();
        for consultation in self.consultations.iter().filter(|c| matches(c)) {
            if consultation.date >= *reference {
                split.upcoming.push(consultation);
            } else {
                split.past.push(consultation);
            }
        }
        split
    }

    /// Returns the patient's consultations falling exactly on `date`.
    pub fn patient_consultations_on(
        &self,
        patient: PatientId,
        date: &ClinicDate,
    ) -> Vec<&Consultation> {
        self.consultations
            .iter()
            .filter(|c| c.patient == patient && c.date == *date)
            .collect()
    }

    /// Returns the doctor's consultations falling exactly on `date`.
    pub fn doctor_consultations_on(
        &self,
        doctor: DoctorId,
        date: &ClinicDate,
    ) -> Vec<&Consultation> {
        self.consultations
            .iter()
            .filter(|c| c.doctor == doctor && c.date == *date)
            .collect()
    }

    /// Returns every consultation falling exactly on `date`, regardless of
    /// participant.
    pub fn consultations_on(&self, date: &ClinicDate) -> Vec<&Consultation> {
        self.consultations
            .iter()
            .filter(|c| c.date == *date)
            .collect()
    }

    /// Read-only view of all patients in creation order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    /// Read-only view of all doctors in creation order.
    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Read-only view of all consultations in creation order.
    pub fn consultations(&self) -> &[Consultation] {
        &self.consultations
    }

    /// Number of patients ever created. Display only; identity comes from
    /// the namespace cursor.
    pub fn patient_count(&self) -> u32 {
        self.patient_count
    }

    /// Number of doctors ever created.
    pub fn doctor_count(&self) -> u32 {
        self.doctor_count
    }

    /// Resolves a consultation's back-references for display.
    pub fn view<'a>(&'a self, consultation: &'a Consultation) -> ConsultationView<'a> {
        ConsultationView {
            consultation,
            patient: self.find_patient_by_id(consultation.patient),
            doctor: self.find_doctor_by_id(consultation.doctor),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Describe;

    fn text(s: &str) -> NonEmptyText {
        NonEmptyText::new(s).expect("valid text")
    }

    fn registry_with_ann_and_lee() -> Registry {
        let mut registry = Registry::new();
        registry.add_patient(text("Ann"), 30, text("flu"));
        registry.add_doctor(text("Dr. Lee"), 45, text("GP"));
        registry.add_consultation(
            PatientId::new(1),
            DoctorId::new(1),
            ClinicDate::new("2024-01-10"),
            "checkup".to_string(),
        );
        registry
    }

    #[test]
    fn patient_ids_are_dense_from_one() {
        let mut registry = Registry::new();
        for i in 1..=5u32 {
            let patient = registry.add_patient(text("P"), 20 + i, text("cold"));
            assert_eq!(patient.id, PatientId::new(i));
        }
        assert_eq!(registry.patient_count(), 5);
        assert_eq!(registry.patients().len(), 5);
    }

    #[test]
    fn doctor_ids_use_their_own_namespace() {
        let mut registry = Registry::new();
        registry.add_patient(text("Ann"), 30, text("flu"));
        registry.add_patient(text("Bob"), 40, text("cold"));
        let doctor = registry.add_doctor(text("Dr. Lee"), 45, text("GP"));
        // Two patients already exist, yet the first doctor still gets id 1.
        assert_eq!(doctor.id, DoctorId::new(1));
        assert_eq!(registry.doctor_count(), 1);
        assert_eq!(registry.patient_count(), 2);
    }

    #[test]
    fn find_by_id_returns_the_matching_record() {
        let mut registry = Registry::new();
        registry.add_patient(text("Ann"), 30, text("flu"));
        registry.add_patient(text("Bob"), 40, text("cold"));
        let found = registry
            .find_patient_by_id(PatientId::new(2))
            .expect("patient 2 exists");
        assert_eq!(found.person.name.as_str(), "Bob");
        assert!(registry.find_patient_by_id(PatientId::new(3)).is_none());
        assert!(registry.find_doctor_by_id(DoctorId::new(1)).is_none());
    }

    #[test]
    fn name_search_is_exact_and_in_creation_order() {
        let mut registry = Registry::new();
        registry.add_patient(text("Alice"), 30, text("flu"));
        registry.add_patient(text("Bob"), 40, text("cold"));
        registry.add_patient(text("Alice"), 52, text("asthma"));

        let matches = registry.patients_by_name("Alice");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].id, PatientId::new(1));
        assert_eq!(matches[1].id, PatientId::new(3));

        assert!(registry.patients_by_name("alice").is_empty());
        assert!(registry.doctors_by_name("Alice").is_empty());
    }

    #[test]
    fn consultation_before_reference_is_upcoming() {
        let registry = registry_with_ann_and_lee();
        let split =
            registry.consultations_for_patient(PatientId::new(1), &ClinicDate::new("2024-01-01"));
        assert_eq!(split.upcoming.len(), 1);
        assert!(split.past.is_empty());
        assert_eq!(split.upcoming[0].notes, "checkup");
    }

    #[test]
    fn consultation_after_reference_is_past() {
        let registry = registry_with_ann_and_lee();
        let split =
            registry.consultations_for_patient(PatientId::new(1), &ClinicDate::new("2024-02-01"));
        assert!(split.upcoming.is_empty());
        assert_eq!(split.past.len(), 1);
    }

    #[test]
    fn consultation_on_the_reference_date_counts_as_upcoming() {
        let registry = registry_with_ann_and_lee();
        let split =
            registry.consultations_for_patient(PatientId::new(1), &ClinicDate::new("2024-01-10"));
        assert_eq!(split.upcoming.len(), 1);
        assert!(split.past.is_empty());
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let mut registry = Registry::new();
        registry.add_patient(text("Ann"), 30, text("flu"));
        registry.add_doctor(text("Dr. Lee"), 45, text("GP"));
        let dates = ["2024-01-05", "2024-03-01", "2024-02-14", "2023-12-31"];
        for date in dates {
            registry.add_consultation(
                PatientId::new(1),
                DoctorId::new(1),
                ClinicDate::new(date),
                String::new(),
            );
        }

        let split =
            registry.consultations_for_patient(PatientId::new(1), &ClinicDate::new("2024-02-14"));
        assert_eq!(split.upcoming.len() + split.past.len(), dates.len());
        // Encounter order within each partition.
        let upcoming: Vec<&str> = split.upcoming.iter().map(|c| c.date.as_str()).collect();
        let past: Vec<&str> = split.past.iter().map(|c| c.date.as_str()).collect();
        assert_eq!(upcoming, vec!["2024-03-01", "2024-02-14"]);
        assert_eq!(past, vec!["2024-01-05", "2023-12-31"]);
    }

    #[test]
    fn doctor_partition_matches_on_doctor_id() {
        let mut registry = Registry::new();
        registry.add_patient(text("Ann"), 30, text("flu"));
        registry.add_doctor(text("Dr. Lee"), 45, text("GP"));
        registry.add_doctor(text("Dr. Wu"), 50, text("ENT"));
        registry.add_consultation(
            PatientId::new(1),
            DoctorId::new(2),
            ClinicDate::new("2024-01-10"),
            "hearing".to_string(),
        );

        let for_lee =
            registry.consultations_for_doctor(DoctorId::new(1), &ClinicDate::new("2024-01-01"));
        assert!(for_lee.upcoming.is_empty() && for_lee.past.is_empty());
        let for_wu =
            registry.consultations_for_doctor(DoctorId::new(2), &ClinicDate::new("2024-01-01"));
        assert_eq!(for_wu.upcoming.len(), 1);
    }

    #[test]
    fn exact_date_queries_filter_by_identity_and_date() {
        let mut registry = Registry::new();
        registry.add_patient(text("Ann"), 30, text("flu"));
        registry.add_patient(text("Bob"), 40, text("cold"));
        registry.add_doctor(text("Dr. Lee"), 45, text("GP"));
        let date = ClinicDate::new("2024-01-10");
        registry.add_consultation(PatientId::new(1), DoctorId::new(1), date.clone(), "a".into());
        registry.add_consultation(PatientId::new(2), DoctorId::new(1), date.clone(), "b".into());
        registry.add_consultation(
            PatientId::new(1),
            DoctorId::new(1),
            ClinicDate::new("2024-01-11"),
            "c".into(),
        );

        assert_eq!(registry.patient_consultations_on(PatientId::new(1), &date).len(), 1);
        assert_eq!(registry.doctor_consultations_on(DoctorId::new(1), &date).len(), 2);
        assert_eq!(registry.consultations_on(&date).len(), 2);
        assert!(registry
            .consultations_on(&ClinicDate::new("2030-01-01"))
            .is_empty());
    }

    #[test]
    fn view_resolves_references_through_the_registry() {
        let registry = registry_with_ann_and_lee();
        let consultation = &registry.consultations()[0];
        let rendered = registry.view(consultation).describe();
        assert!(rendered.contains("Name: Ann"));
        assert!(rendered.contains("Name: Dr. Lee"));
    }

    #[test]
    fn view_of_unassigned_id_yields_unknown_marker() {
        let mut registry = Registry::new();
        // Referential existence is the caller's responsibility; the registry
        // accepts the record and the render contract covers the miss.
        registry.add_consultation(
            PatientId::new(7),
            DoctorId::new(7),
            ClinicDate::new("2024-01-10"),
            "stale".to_string(),
        );
        let rendered = registry.view(&registry.consultations()[0]).describe();
        assert!(rendered.contains("Unknown patient"));
        assert!(rendered.contains("Unknown doctor"));
    }
}
