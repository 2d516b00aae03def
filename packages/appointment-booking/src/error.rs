use crate::model::{AppointmentId, AppointmentStatus, DoctorId, PatientId};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value {value} for configuration field {name}")]
    InvalidParameter { name: String, value: String },

    #[error("Missing field {name} from configuration file or environment")]
    MissingParameter { name: String },

    #[error(transparent)]
    FileOrEnvironment(#[from] config::ConfigError),
}

#[derive(Error, Debug, PartialEq)]
pub enum BookingError {
    #[error("No appointment ids left")]
    IdsExhausted,

    #[error("{field} must not be empty, contain '|' or begin or end with spaces")]
    InvalidField { field: &'static str },

    #[error("Slot {slot} is not valid: {reason}")]
    InvalidSlot { slot: String, reason: SlotProblem },

    #[error("Appointment #{id} is {status} and can no longer change")]
    InvalidState {
        id: AppointmentId,
        status: AppointmentStatus,
    },

    #[error("Appointment #{id} not found")]
    NotFound { id: AppointmentId },

    #[error("Appointment #{id} belongs to someone else")]
    NotOwner { id: AppointmentId },

    #[error("You already have an appointment at {slot}")]
    PatientConflict { slot: String },

    #[error("Dr. {doctor} is not available at {slot}")]
    SlotUnavailable { doctor: String, slot: String },

    #[error("Doctor #{id} not found")]
    UnknownDoctor { id: DoctorId },

    #[error("Patient #{id} not found")]
    UnknownPatient { id: PatientId },
}

#[derive(Error, Debug, PartialEq)]
pub enum RegistryError {
    #[error("Username '{username}' is already taken")]
    DuplicateUsername { username: String },

    #[error("No {kind} ids left")]
    IdsExhausted { kind: &'static str },

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{field} must not be empty, contain '|' or begin or end with spaces")]
    InvalidField { field: &'static str },

    #[error("Slot {slot} is not valid: {reason}")]
    InvalidSlot { slot: String, reason: SlotProblem },

    #[error("Slot {slot} is already listed")]
    SlotAlreadyListed { slot: String },

    #[error("Slot {slot} is held by a scheduled appointment")]
    SlotBooked { slot: String },

    #[error("Slot {slot} is not listed")]
    SlotNotListed { slot: String },
}

/// Why a slot string was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotProblem {
    #[error("use YYYY-MM-DD HH:mm (e.g. 2025-07-15 10:00)")]
    Format,

    #[error("slot is in the past")]
    Past,
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl From<config::ConfigError> for Error {
    fn from(e: config::ConfigError) -> Self {
        Error::Config(e.into())
    }
}
