//! The interactive menu shell.
//!
//! The shell is the only collaborator of the registry: it authenticates a
//! role, validates and bounds every input in a retry loop, and maps menu
//! actions 1:1 onto registry operations. It is generic over its input and
//! output streams so tests can script entire sessions.

use std::io::{self, BufRead, Write};

use cmr_core::{Describe, Registry};
use cmr_types::{ClinicDate, DoctorId, NonEmptyText, PatientId};

use crate::config::ShellConfig;

/// Upper bound for identifiers typed at the login prompts.
const MAX_ID_INPUT: u32 = 1_000_000;

/// Menu-driven front end over a [`Registry`].
pub struct Shell<R, W> {
    registry: Registry,
    config: ShellConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Creates a shell over the given registry, credentials, and streams.
    pub fn new(registry: Registry, config: ShellConfig, input: R, output: W) -> Self {
        Self {
            registry,
            config,
            input,
            output,
        }
    }

    /// Runs the role-selection loop until the user chooses to exit.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "\n--- Welcome to the Clinic Management System ---")?;
            writeln!(self.output, "1. Patient\n2. Doctor\n3. Admin/Other\n4. Exit")?;
            self.prompt("Enter your role: ")?;
            match self.read_choice(1, 4)? {
                1 => self.patient_flow()?,
                2 => self.doctor_flow()?,
                3 => self.admin_flow()?,
                _ => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
            }
        }
    }

    // ---- role flows ----

    fn patient_flow(&mut self) -> io::Result<()> {
        self.prompt("Are you registered? (Y/N): ")?;
        if matches!(self.read_first_char()?, Some('N' | 'n')) {
            writeln!(self.output, "Please contact admin to register.")?;
            return Ok(());
        }
        self.prompt("Enter your ID: ")?;
        let id = self.read_patient_id()?;
        if self.registry.find_patient_by_id(id).is_none() {
            writeln!(self.output, "No patient found with this ID.")?;
            return Ok(());
        }

        let today = self.read_date("Enter today's date (YYYY-MM-DD, blank for today): ")?;
        let (upcoming, past) = {
            let split = self.registry.consultations_for_patient(id, &today);
            (render_all(&self.registry, &split.upcoming), render_all(&self.registry, &split.past))
        };
        self.write_partition(&upcoming, &past)?;

        self.prompt("\nWould you like to see consultations on a specific date? (Y/N): ")?;
        if matches!(self.read_first_char()?, Some('Y' | 'y')) {
            let date = self.read_date("Enter date (YYYY-MM-DD, blank for today): ")?;
            let rendered = render_all(
                &self.registry,
                &self.registry.patient_consultations_on(id, &date),
            );
            self.write_date_matches(&rendered)?;
        }
        Ok(())
    }

    fn doctor_flow(&mut self) -> io::Result<()> {
        self.prompt("Enter doctor password: ")?;
        let password = self.read_line()?;
        if password != self.config.doctor_password {
            writeln!(self.output, "Incorrect password. Access denied.")?;
            return Ok(());
        }
        self.prompt("Are you registered? (Y/N): ")?;
        if matches!(self.read_first_char()?, Some('N' | 'n')) {
            writeln!(self.output, "Please contact admin to register.")?;
            return Ok(());
        }
        self.prompt("Enter your ID: ")?;
        let id = self.read_doctor_id()?;
        if self.registry.find_doctor_by_id(id).is_none() {
            writeln!(self.output, "No doctor found with this ID.")?;
            return Ok(());
        }

        let today = self.read_date("Enter today's date (YYYY-MM-DD, blank for today): ")?;
        let (upcoming, past) = {
            let split = self.registry.consultations_for_doctor(id, &today);
            (render_all(&self.registry, &split.upcoming), render_all(&self.registry, &split.past))
        };
        self.write_partition(&upcoming, &past)?;

        self.prompt("\nWould you like to see consultations on a specific date? (Y/N): ")?;
        if matches!(self.read_first_char()?, Some('Y' | 'y')) {
            let date = self.read_date("Enter date (YYYY-MM-DD, blank for today): ")?;
            let rendered = render_all(
                &self.registry,
                &self.registry.doctor_consultations_on(id, &date),
            );
            self.write_date_matches(&rendered)?;
        }
        Ok(())
    }

    fn admin_flow(&mut self) -> io::Result<()> {
        self.prompt("Enter admin password: ")?;
        let password = self.read_line()?;
        if password != self.config.admin_password {
            writeln!(self.output, "Incorrect password. Access denied.")?;
            return Ok(());
        }
        loop {
            writeln!(self.output, "\n--- Admin Menu ---")?;
            writeln!(self.output, "1. Add Patient")?;
            writeln!(self.output, "2. Add Doctor")?;
            writeln!(self.output, "3. Display All")?;
            writeln!(self.output, "4. Add Consultation")?;
            writeln!(self.output, "5. Show Consultations")?;
            writeln!(self.output, "6. Show Consultations by Date")?;
            writeln!(self.output, "7. Find Patient by Name")?;
            writeln!(self.output, "8. Find Doctor by Name")?;
            writeln!(self.output, "9. Back")?;
            self.prompt("Enter your choice: ")?;
            match self.read_choice(1, 9)? {
                1 => self.admin_add_patient()?,
                2 => self.admin_add_doctor()?,
                3 => self.admin_display_all()?,
                4 => self.admin_add_consultation()?,
                5 => self.admin_show_consultations()?,
                6 => self.admin_show_consultations_by_date()?,
                7 => self.admin_find_patients_by_name()?,
                8 => self.admin_find_doctors_by_name()?,
                _ => return Ok(()),
            }
        }
    }

    // ---- admin actions ----

    fn admin_add_patient(&mut self) -> io::Result<()> {
        let name = self.read_non_empty("Enter patient name: ")?;
        self.prompt("Enter patient age: ")?;
        let age = self.read_choice(0, 150)? as u32;
        let disease = self.read_non_empty("Enter disease: ")?;
        self.registry.add_patient(name, age, disease);
        writeln!(self.output, "Patient added!")
    }

    fn admin_add_doctor(&mut self) -> io::Result<()> {
        let name = self.read_non_empty("Enter doctor name: ")?;
        self.prompt("Enter doctor age: ")?;
        let age = self.read_choice(0, 150)? as u32;
        let specialization = self.read_non_empty("Enter specialization: ")?;
        self.registry.add_doctor(name, age, specialization);
        writeln!(self.output, "Doctor added!")
    }

    fn admin_display_all(&mut self) -> io::Result<()> {
        writeln!(
            self.output,
            "\n--- Patients (Total: {}) ---",
            self.registry.patient_count()
        )?;
        for patient in self.registry.patients() {
            writeln!(self.output, "{}", patient.describe())?;
        }
        writeln!(
            self.output,
            "\n--- Doctors (Total: {}) ---",
            self.registry.doctor_count()
        )?;
        for doctor in self.registry.doctors() {
            writeln!(self.output, "{}", doctor.describe())?;
        }
        Ok(())
    }

    fn admin_add_consultation(&mut self) -> io::Result<()> {
        if self.registry.patients().is_empty() || self.registry.doctors().is_empty() {
            writeln!(self.output, "Add at least one patient and one doctor first!")?;
            return Ok(());
        }

        writeln!(self.output, "Select patient:")?;
        let patient_lines: Vec<String> = self
            .registry
            .patients()
            .iter()
            .map(|p| p.describe())
            .collect();
        for (i, line) in patient_lines.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, line)?;
        }
        self.prompt("Enter patient number: ")?;
        let patient_index = self.read_choice(1, patient_lines.len() as i64)? as usize - 1;

        writeln!(self.output, "Select doctor:")?;
        let doctor_lines: Vec<String> = self
            .registry
            .doctors()
            .iter()
            .map(|d| d.describe())
            .collect();
        for (i, line) in doctor_lines.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, line)?;
        }
        self.prompt("Enter doctor number: ")?;
        let doctor_index = self.read_choice(1, doctor_lines.len() as i64)? as usize - 1;

        let date = self.read_date("Enter date (YYYY-MM-DD, blank for today): ")?;
        self.prompt("Enter notes: ")?;
        let notes = self.read_line()?;

        let patient_id = self.registry.patients()[patient_index].id;
        let doctor_id = self.registry.doctors()[doctor_index].id;
        self.registry.add_consultation(patient_id, doctor_id, date, notes);
        writeln!(self.output, "Consultation added!")
    }

    fn admin_show_consultations(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n--- Consultations ---")?;
        if self.registry.consultations().is_empty() {
            writeln!(self.output, "No consultations recorded.")?;
            return Ok(());
        }
        let rendered: Vec<String> = self
            .registry
            .consultations()
            .iter()
            .map(|c| self.registry.view(c).describe())
            .collect();
        for line in rendered {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn admin_show_consultations_by_date(&mut self) -> io::Result<()> {
        let date = self.read_date("Enter date (YYYY-MM-DD, blank for today): ")?;
        writeln!(self.output, "\nConsultations on {date}:")?;
        let rendered = render_all(&self.registry, &self.registry.consultations_on(&date));
        self.write_date_matches(&rendered)
    }

    fn admin_find_patients_by_name(&mut self) -> io::Result<()> {
        self.prompt("Enter patient name to search: ")?;
        let name = self.read_line()?;
        let matches: Vec<String> = self
            .registry
            .patients_by_name(name.trim())
            .iter()
            .map(|p| p.describe())
            .collect();
        if matches.is_empty() {
            writeln!(
                self.output,
                "No patient found with the name '{}'.",
                name.trim()
            )?;
            return Ok(());
        }
        for line in matches {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn admin_find_doctors_by_name(&mut self) -> io::Result<()> {
        self.prompt("Enter doctor name to search: ")?;
        let name = self.read_line()?;
        let matches: Vec<String> = self
            .registry
            .doctors_by_name(name.trim())
            .iter()
            .map(|d| d.describe())
            .collect();
        if matches.is_empty() {
            writeln!(
                self.output,
                "No doctor found with the name '{}'.",
                name.trim()
            )?;
            return Ok(());
        }
        for line in matches {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    // ---- rendering helpers ----

    fn write_partition(&mut self, upcoming: &[String], past: &[String]) -> io::Result<()> {
        writeln!(self.output, "\nUpcoming Consultations:")?;
        if upcoming.is_empty() {
            writeln!(self.output, "None")?;
        }
        for line in upcoming {
            writeln!(self.output, "{line}")?;
        }
        writeln!(self.output, "\nPast Consultations:")?;
        if past.is_empty() {
            writeln!(self.output, "None")?;
        }
        for line in past {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    fn write_date_matches(&mut self, rendered: &[String]) -> io::Result<()> {
        if rendered.is_empty() {
            writeln!(self.output, "No consultations found on this date.")?;
            return Ok(());
        }
        for line in rendered {
            writeln!(self.output, "{line}")?;
        }
        Ok(())
    }

    // ---- input helpers ----

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn read_first_char(&mut self) -> io::Result<Option<char>> {
        Ok(self.read_line()?.trim().chars().next())
    }

    /// Reads a number within `min..=max`, re-prompting until the input is a
    /// valid in-range integer.
    fn read_choice(&mut self, min: i64, max: i64) -> io::Result<i64> {
        loop {
            let line = self.read_line()?;
            match line.trim().parse::<i64>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                _ => self.prompt(&format!(
                    "Invalid input. Please enter a number between {min} and {max}: "
                ))?,
            }
        }
    }

    fn read_patient_id(&mut self) -> io::Result<PatientId> {
        loop {
            let line = self.read_line()?;
            match line.parse::<PatientId>() {
                Ok(id) if id.value() <= MAX_ID_INPUT => return Ok(id),
                _ => self.prompt(&format!(
                    "Invalid input. Please enter a number between 1 and {MAX_ID_INPUT}: "
                ))?,
            }
        }
    }

    fn read_doctor_id(&mut self) -> io::Result<DoctorId> {
        loop {
            let line = self.read_line()?;
            match line.parse::<DoctorId>() {
                Ok(id) if id.value() <= MAX_ID_INPUT => return Ok(id),
                _ => self.prompt(&format!(
                    "Invalid input. Please enter a number between 1 and {MAX_ID_INPUT}: "
                ))?,
            }
        }
    }

    fn read_non_empty(&mut self, prompt_text: &str) -> io::Result<NonEmptyText> {
        self.prompt(prompt_text)?;
        loop {
            let line = self.read_line()?;
            match NonEmptyText::new(&line) {
                Ok(text) => return Ok(text),
                Err(err) => self.prompt(&format!("{err}. {prompt_text}"))?,
            }
        }
    }

    /// Reads a date string; a blank line selects today's date. The core
    /// compares dates as plain strings, so the value is passed through
    /// verbatim otherwise.
    fn read_date(&mut self, prompt_text: &str) -> io::Result<ClinicDate> {
        self.prompt(prompt_text)?;
        let line = self.read_line()?;
        if line.trim().is_empty() {
            let today = chrono::Local::now().format("%Y-%m-%d").to_string();
            return Ok(ClinicDate::new(today));
        }
        Ok(ClinicDate::new(line))
    }
}

fn render_all(registry: &Registry, consultations: &[&cmr_core::Consultation]) -> Vec<String> {
    consultations
        .iter()
        .map(|c| registry.view(c).describe())
        .collect()
}
