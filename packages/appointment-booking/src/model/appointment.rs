use super::{AppointmentId, DoctorId, PatientId};
use crate::error::BookingError;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Cancelled,
    Completed,
}

impl Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AppointmentStatus::Scheduled => "SCHEDULED",
            AppointmentStatus::Cancelled => "CANCELLED",
            AppointmentStatus::Completed => "COMPLETED",
        };
        write!(f, "{s}")
    }
}

impl FromStr for AppointmentStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SCHEDULED" => Ok(AppointmentStatus::Scheduled),
            "CANCELLED" => Ok(AppointmentStatus::Cancelled),
            "COMPLETED" => Ok(AppointmentStatus::Completed),
            _ => Err(()),
        }
    }
}

///
/// A booking between a patient and a doctor.
///
/// Patient and doctor names are copied at booking time and never re-resolved,
/// so the appointment history stays as it was when booked.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Appointment {
    pub id: AppointmentId,
    pub patient_id: PatientId,
    pub patient_name: String,
    pub doctor_id: DoctorId,
    pub doctor_name: String,
    pub slot: String,
    pub reason: String,
    status: AppointmentStatus,
}

impl Appointment {
    pub fn new(
        id: AppointmentId,
        patient_id: PatientId,
        patient_name: &str,
        doctor_id: DoctorId,
        doctor_name: &str,
        slot: &str,
        reason: &str,
    ) -> Self {
        Self {
            id,
            patient_id,
            patient_name: patient_name.to_string(),
            doctor_id,
            doctor_name: doctor_name.to_string(),
            slot: slot.to_string(),
            reason: reason.to_string(),
            status: AppointmentStatus::Scheduled,
        }
    }

    /// Restores a stored appointment with whatever status was persisted
    pub fn with_status(mut self, status: AppointmentStatus) -> Self {
        self.status = status;
        self
    }

    pub fn status(&self) -> AppointmentStatus {
        self.status
    }

    pub fn is_scheduled(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }

    pub fn cancel(&mut self) -> Result<(), BookingError> {
        self.transition(AppointmentStatus::Cancelled)
    }

    pub fn complete(&mut self) -> Result<(), BookingError> {
        self.transition(AppointmentStatus::Completed)
    }

    // Only SCHEDULED appointments move, and only once.
    fn transition(&mut self, to: AppointmentStatus) -> Result<(), BookingError> {
        if !self.is_scheduled() {
            return Err(BookingError::InvalidState {
                id: self.id,
                status: self.status,
            });
        }
        self.status = to;
        Ok(())
    }
}

impl Display for Appointment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "+---------------------------------------------+")?;
        writeln!(f, "| Appointment ID : {:<27}|", self.id)?;
        writeln!(f, "| Patient        : {:<27}|", self.patient_name)?;
        writeln!(f, "| Doctor         : Dr. {:<23}|", self.doctor_name)?;
        writeln!(f, "| Slot           : {:<27}|", self.slot)?;
        writeln!(f, "| Reason         : {:<27}|", self.reason)?;
        writeln!(f, "| Status         : {:<27}|", self.status.to_string())?;
        write!(f, "+---------------------------------------------+")
    }
}
