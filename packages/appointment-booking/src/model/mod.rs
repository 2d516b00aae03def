mod appointment;
mod doctor;
mod patient;
pub mod slot;

pub use appointment::{Appointment, AppointmentStatus};
pub use doctor::Doctor;
pub use patient::Patient;
pub use slot::{Clock, FixedClock, SystemClock};

pub type AppointmentId = u32;
pub type DoctorId = u32;
pub type PatientId = u32;
