//!
//! The interactive menu.
//!
//! Reads one answer per line. Every failed operation prints an `ERROR:` line and the menu
//! comes back. End of input leaves the shell as if Exit had been chosen.
//!
pub mod display;

use crate::error::Error;
use crate::log::SHELL;
use crate::model::{DoctorId, PatientId};
use crate::service::Clinic;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use tracing::debug;

const MENU_RULE: &str = "  ========================================";

/// Why the shell stops reading
enum Interrupt {
    EndOfInput,
    Io(io::Error),
}

impl From<io::Error> for Interrupt {
    fn from(err: io::Error) -> Self {
        Interrupt::Io(err)
    }
}

type Step<T = ()> = Result<T, Interrupt>;

pub struct Shell<'a, R, W> {
    clinic: &'a mut Clinic,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(clinic: &'a mut Clinic, input: R, output: W) -> Self {
        Shell {
            clinic,
            input,
            output,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        display::banner(&mut self.output)?;

        match self.main_menu() {
            Ok(()) | Err(Interrupt::EndOfInput) => {}
            Err(Interrupt::Io(err)) => return Err(err),
        }

        writeln!(self.output)?;
        writeln!(self.output, "  Goodbye! Thank you for using the system.")?;
        self.output.flush()
    }

    fn main_menu(&mut self) -> Step {
        loop {
            self.menu(
                "             MAIN MENU",
                &[
                    "Register as Patient",
                    "Patient Login",
                    "Register as Doctor",
                    "Doctor Login",
                    "View All Doctors",
                    "Exit",
                ],
            )?;

            let choice = self.prompt("  Choice: ")?;
            debug!(target: SHELL, msg = "Main menu", choice);

            match choice.as_str() {
                "1" => self.register_patient()?,
                "2" => {
                    if let Some(id) = self.login_patient()? {
                        self.patient_menu(id)?;
                    }
                }
                "3" => self.register_doctor()?,
                "4" => {
                    if let Some(id) = self.login_doctor()? {
                        self.doctor_menu(id)?;
                    }
                }
                "5" => display::doctors(&mut self.output, self.clinic.doctors())?,
                "6" => return Ok(()),
                _ => self.say("Please enter 1-6.")?,
            }
        }
    }

    fn patient_menu(&mut self, patient_id: PatientId) -> Step {
        loop {
            let name = self
                .clinic
                .patient(patient_id)
                .map(|p| p.name.clone())
                .unwrap_or_default();

            self.menu(
                &format!("PATIENT MENU -- {name}"),
                &[
                    "View Doctors & Available Slots",
                    "Book an Appointment",
                    "My Appointment History",
                    "Cancel an Appointment",
                    "Logout",
                ],
            )?;

            let choice = self.prompt("  Choice: ")?;
            debug!(target: SHELL, msg = "Patient menu", patient = patient_id, choice);

            match choice.as_str() {
                "1" => display::doctors(&mut self.output, self.clinic.doctors())?,
                "2" => self.book(patient_id)?,
                "3" => self.history(patient_id, &name)?,
                "4" => self.cancel(patient_id, &name)?,
                "5" => return self.say("Logged out."),
                _ => self.say("Please enter 1-5.")?,
            }
        }
    }

    fn doctor_menu(&mut self, doctor_id: DoctorId) -> Step {
        loop {
            let name = self
                .clinic
                .doctor(doctor_id)
                .map(|d| d.name.clone())
                .unwrap_or_default();

            self.menu(
                &format!("DOCTOR MENU -- Dr. {name}"),
                &[
                    "View My Schedule",
                    "View My Available Slots",
                    "Add a Slot",
                    "Remove a Slot",
                    "Complete an Appointment",
                    "Logout",
                ],
            )?;

            let choice = self.prompt("  Choice: ")?;
            debug!(target: SHELL, msg = "Doctor menu", doctor = doctor_id, choice);

            match choice.as_str() {
                "1" => self.schedule(doctor_id, &name)?,
                "2" => {
                    self.slots(doctor_id, &name)?;
                }
                "3" => self.add_slot(doctor_id)?,
                "4" => self.remove_slot(doctor_id, &name)?,
                "5" => self.complete(doctor_id, &name)?,
                "6" => return self.say("Logged out."),
                _ => self.say("Please enter 1-6.")?,
            }
        }
    }

    fn register_patient(&mut self) -> Step {
        self.section("PATIENT REGISTER")?;
        let name = self.prompt("  Full Name       : ")?;
        let age = self.prompt_number::<u32>("  Age             : ")?;
        let contact = self.prompt("  Contact Number  : ")?;
        let username = self.prompt("  Username        : ")?;
        let password = self.prompt("  Password        : ")?;

        let result = self
            .clinic
            .register_patient(&name, age, &contact, &username, &password)
            .map(|patient| format!("Registered! Your patient ID is {}.", patient.id));
        self.report(result)
    }

    fn register_doctor(&mut self) -> Step {
        self.section("DOCTOR REGISTER")?;
        let name = self.prompt("  Full Name        : ")?;
        let specialization = self.prompt("  Specialization   : ")?;
        let contact = self.prompt("  Contact Number   : ")?;
        let username = self.prompt("  Username         : ")?;
        let password = self.prompt("  Password         : ")?;

        let result = self
            .clinic
            .register_doctor(&name, &specialization, &contact, &username, &password)
            .map(|doctor| format!("Doctor registered! Welcome, Dr. {}.", doctor.name));
        self.report(result)
    }

    fn login_patient(&mut self) -> Step<Option<PatientId>> {
        self.section("PATIENT LOGIN")?;
        let username = self.prompt("  Username : ")?;
        let password = self.prompt("  Password : ")?;

        let login = self
            .clinic
            .login_patient(&username, &password)
            .map(|p| (p.id, format!("Welcome back, {}!", p.name)));
        self.logged_in(login)
    }

    fn login_doctor(&mut self) -> Step<Option<DoctorId>> {
        self.section("DOCTOR LOGIN")?;
        let username = self.prompt("  Username : ")?;
        let password = self.prompt("  Password : ")?;

        let login = self
            .clinic
            .login_doctor(&username, &password)
            .map(|d| (d.id, format!("Welcome, Dr. {}!", d.name)));
        self.logged_in(login)
    }

    fn book(&mut self, patient_id: PatientId) -> Step {
        self.section("BOOK APPOINTMENT")?;
        display::doctors(&mut self.output, self.clinic.doctors())?;

        writeln!(self.output)?;
        let doctor_id = self.prompt_number::<DoctorId>("  Enter Doctor ID : ")?;

        let Some(doctor) = self.clinic.doctor(doctor_id) else {
            return self.error("Doctor not found.");
        };
        let slots = doctor.available_slots().to_vec();
        if slots.is_empty() {
            return self.error("No available slots.");
        }

        writeln!(self.output)?;
        writeln!(self.output, "  Slots for Dr. {}:", doctor.name)?;
        display::numbered_slots(&mut self.output, &slots)?;

        writeln!(self.output)?;
        let Some(slot) = self.select(&slots, "  Select slot number : ")? else {
            return self.error("Invalid selection.");
        };
        let reason = self.prompt("  Reason for visit   : ")?;

        match self.clinic.book(patient_id, doctor_id, &slot, &reason) {
            Ok(appointment) => {
                self.success("Appointment booked!")?;
                display::appointments(&mut self.output, "BOOKING CONFIRMED", &[&appointment], "")?;
                Ok(())
            }
            Err(err) => self.failure(err),
        }
    }

    fn history(&mut self, patient_id: PatientId, name: &str) -> Step {
        let history = self.clinic.history_for_patient(patient_id);
        display::appointments(
            &mut self.output,
            &format!("APPOINTMENT HISTORY -- {name}"),
            &history,
            "No appointments found.",
        )?;
        Ok(())
    }

    fn cancel(&mut self, patient_id: PatientId, name: &str) -> Step {
        self.section("CANCEL APPOINTMENT")?;
        self.history(patient_id, name)?;

        if self.clinic.scheduled_for_patient(patient_id).is_empty() {
            return self.say("No active appointments to cancel.");
        }

        writeln!(self.output)?;
        let id = self.prompt_number("  Enter Appointment ID to cancel : ")?;

        let result = self
            .clinic
            .cancel(patient_id, id)
            .map(|()| format!("Appointment #{id} cancelled. Slot restored."));
        self.report(result)
    }

    fn schedule(&mut self, doctor_id: DoctorId, name: &str) -> Step {
        let schedule = self.clinic.schedule_for_doctor(doctor_id);
        display::appointments(
            &mut self.output,
            &format!("SCHEDULE -- Dr. {name}"),
            &schedule,
            "No upcoming appointments.",
        )?;
        Ok(())
    }

    fn slots(&mut self, doctor_id: DoctorId, name: &str) -> Step<Vec<String>> {
        let slots = self
            .clinic
            .doctor(doctor_id)
            .map(|d| d.available_slots().to_vec())
            .unwrap_or_default();

        writeln!(self.output)?;
        writeln!(self.output, "  --- AVAILABLE SLOTS -- Dr. {name} ---")?;
        if slots.is_empty() {
            writeln!(self.output, "  No available slots.")?;
        } else {
            display::numbered_slots(&mut self.output, &slots)?;
        }
        Ok(slots)
    }

    fn add_slot(&mut self, doctor_id: DoctorId) -> Step {
        self.section("ADD SLOT")?;
        writeln!(self.output, "  Format: YYYY-MM-DD HH:mm  (e.g. 2030-07-15 10:00)")?;
        let slot = self.prompt("  New slot : ")?;

        if slot.is_empty() {
            return self.error("Slot cannot be empty.");
        }

        let result = self
            .clinic
            .add_slot(doctor_id, &slot)
            .map(|()| format!("Slot '{slot}' added and saved."));
        self.report(result)
    }

    fn remove_slot(&mut self, doctor_id: DoctorId, name: &str) -> Step {
        let slots = self.slots(doctor_id, name)?;
        if slots.is_empty() {
            return Ok(());
        }

        writeln!(self.output)?;
        let Some(slot) = self.select(&slots, "  Select slot number to remove : ")? else {
            return self.error("Invalid selection.");
        };

        let result = self
            .clinic
            .remove_slot(doctor_id, &slot)
            .map(|()| format!("Slot '{slot}' removed and saved."));
        self.report(result)
    }

    fn complete(&mut self, doctor_id: DoctorId, name: &str) -> Step {
        self.schedule(doctor_id, name)?;

        if self.clinic.schedule_for_doctor(doctor_id).is_empty() {
            return Ok(());
        }

        writeln!(self.output)?;
        let id = self.prompt_number("  Enter Appointment ID to complete : ")?;

        let result = self
            .clinic
            .complete(doctor_id, id)
            .map(|()| format!("Appointment #{id} marked as completed."));
        self.report(result)
    }

    fn logged_in<Id>(&mut self, login: Result<(Id, String), Error>) -> Step<Option<Id>> {
        match login {
            Ok((id, welcome)) => {
                self.success(&welcome)?;
                Ok(Some(id))
            }
            Err(err) => {
                self.failure(err)?;
                Ok(None)
            }
        }
    }

    fn report(&mut self, result: Result<String, Error>) -> Step {
        match result {
            Ok(message) => self.success(&message),
            Err(err) => self.failure(err),
        }
    }

    fn failure(&mut self, err: Error) -> Step {
        debug!(target: SHELL, msg = "Operation failed", error = err.to_string());
        self.error(&err.to_string())
    }

    fn success(&mut self, message: &str) -> Step {
        self.say(&format!("SUCCESS: {message}"))
    }

    fn error(&mut self, message: &str) -> Step {
        self.say(&format!("ERROR: {message}"))
    }

    fn say(&mut self, message: &str) -> Step {
        writeln!(self.output)?;
        writeln!(self.output, "  {message}")?;
        Ok(())
    }

    fn section(&mut self, title: &str) -> Step {
        writeln!(self.output)?;
        writeln!(self.output, "  --- {title} {}", "-".repeat(44 - title.len().min(44)))?;
        Ok(())
    }

    fn menu(&mut self, title: &str, options: &[&str]) -> Step {
        writeln!(self.output)?;
        writeln!(self.output, "{MENU_RULE}")?;
        writeln!(self.output, "  {title}")?;
        writeln!(self.output, "{MENU_RULE}")?;
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}. {option}", index + 1)?;
        }
        writeln!(self.output, "{MENU_RULE}")?;
        Ok(())
    }

    /// Picks one of `options` by its 1-based number
    fn select(&mut self, options: &[String], label: &str) -> Step<Option<String>> {
        let choice = self.prompt_number::<usize>(label)?;
        Ok(choice
            .checked_sub(1)
            .and_then(|index| options.get(index))
            .cloned())
    }

    fn prompt(&mut self, label: &str) -> Step<String> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Asks again until the answer parses
    fn prompt_number<N: FromStr>(&mut self, label: &str) -> Step<N> {
        let mut answer = self.prompt(label)?;
        loop {
            match answer.parse() {
                Ok(number) => return Ok(number),
                Err(_) => answer = self.prompt("  Enter a valid number: ")?,
            }
        }
    }

    fn read_line(&mut self) -> Step<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(Interrupt::EndOfInput);
        }
        Ok(line.trim().to_string())
    }
}
