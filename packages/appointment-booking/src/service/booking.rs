use super::{AppointmentLedger, DoctorLookup};
use crate::error::{BookingError, SlotProblem};
use crate::log::BOOKING;
use crate::model::slot::validate_bookable;
use crate::model::{Appointment, AppointmentId, Clock, Doctor, Patient, PatientId};
use crate::store::{is_storable, SLOT_SEPARATOR};
use tracing::{info, warn};

///
/// Books, cancels and completes appointments.
///
/// Every check of an operation runs before anything is changed, so a failed
/// operation leaves the patient, the doctor and the ledger as they were.
///
pub struct AppointmentService {
    ledger: AppointmentLedger,
    clock: Box<dyn Clock>,
    validate_dates: bool,
}

impl AppointmentService {
    pub fn new(ledger: AppointmentLedger, clock: Box<dyn Clock>, validate_dates: bool) -> Self {
        AppointmentService {
            ledger,
            clock,
            validate_dates,
        }
    }

    pub fn ledger(&self) -> &AppointmentLedger {
        &self.ledger
    }

    ///
    /// Books `slot` with `doctor` for `patient`.
    ///
    /// Checks, first failure wins:
    ///   1. the slot is well-formed and not in the past (when dates are validated)
    ///   2. the doctor lists the slot
    ///   3. the patient holds no other scheduled appointment at the same slot
    ///
    /// On success the slot leaves the doctor's list and the appointment id joins the patient's.
    ///
    pub fn book(
        &mut self,
        patient: &mut Patient,
        doctor: &mut Doctor,
        slot: &str,
        reason: &str,
    ) -> Result<Appointment, BookingError> {
        if self.validate_dates {
            self.check_slot(slot)?;
        }

        if !doctor.is_slot_available(slot) {
            return Err(BookingError::SlotUnavailable {
                doctor: doctor.name.clone(),
                slot: slot.to_string(),
            });
        }

        if self.ledger.patient_has_conflict(patient.id, slot) {
            return Err(BookingError::PatientConflict {
                slot: slot.to_string(),
            });
        }

        if !is_storable(reason) {
            return Err(BookingError::InvalidField { field: "Reason" });
        }

        let appointment = self.ledger.create(patient, doctor, slot, reason)?.clone();
        doctor.remove_slot(slot);
        patient.add_appointment_id(appointment.id);

        info!(
            target: BOOKING,
            msg = "Booked appointment",
            id = appointment.id,
            patient = patient.id,
            doctor = doctor.id,
            slot
        );

        Ok(appointment)
    }

    ///
    /// Cancels a patient's own scheduled appointment and puts the slot back on the doctor's list.
    ///
    /// A doctor who no longer exists does not block the cancellation.
    ///
    pub fn cancel(
        &mut self,
        id: AppointmentId,
        patient: &mut Patient,
        doctors: &mut dyn DoctorLookup,
    ) -> Result<(), BookingError> {
        let appointment = self
            .ledger
            .find_mut(id)
            .ok_or(BookingError::NotFound { id })?;

        if appointment.patient_id != patient.id {
            return Err(BookingError::NotOwner { id });
        }

        appointment.cancel()?;

        match doctors.doctor_mut(appointment.doctor_id) {
            Some(doctor) => {
                doctor.add_available_slot(&appointment.slot);
            }
            None => {
                warn!(
                    target: BOOKING,
                    msg = "Doctor not found, slot not restored",
                    id,
                    doctor = appointment.doctor_id
                );
            }
        }

        patient.remove_appointment_id(id);
        self.ledger.persist();

        info!(target: BOOKING, msg = "Cancelled appointment", id, patient = patient.id);
        Ok(())
    }

    ///
    /// Marks a doctor's scheduled appointment as seen.
    /// The slot stays taken. Returns the patient whose appointment it was.
    ///
    pub fn complete(
        &mut self,
        id: AppointmentId,
        doctor: &Doctor,
    ) -> Result<PatientId, BookingError> {
        let appointment = self
            .ledger
            .find_mut(id)
            .ok_or(BookingError::NotFound { id })?;

        if appointment.doctor_id != doctor.id {
            return Err(BookingError::NotOwner { id });
        }

        appointment.complete()?;
        let patient_id = appointment.patient_id;
        self.ledger.persist();

        info!(target: BOOKING, msg = "Completed appointment", id, doctor = doctor.id);
        Ok(patient_id)
    }

    fn check_slot(&self, slot: &str) -> Result<(), BookingError> {
        let invalid = |reason: SlotProblem| BookingError::InvalidSlot {
            slot: slot.to_string(),
            reason,
        };

        if slot.contains(SLOT_SEPARATOR) {
            return Err(invalid(SlotProblem::Format));
        }

        validate_bookable(slot, self.clock.as_ref()).map_err(invalid)?;
        Ok(())
    }
}
