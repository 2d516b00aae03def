use super::{load_or_empty, next_id, save_or_warn};
use crate::error::BookingError;
use crate::log::BOOKING;
use crate::model::{Appointment, AppointmentId, Doctor, DoctorId, Patient, PatientId};
use crate::store::Repository;
use tracing::debug;

///
/// Every appointment ever booked, in id order, with queries over them.
///
pub struct AppointmentLedger {
    appointments: Vec<Appointment>,
    repository: Box<dyn Repository<Appointment>>,
}

impl AppointmentLedger {
    pub fn load(repository: Box<dyn Repository<Appointment>>) -> Self {
        let appointments = load_or_empty(repository.as_ref());
        debug!(target: BOOKING, msg = "Loaded appointments", count = appointments.len());

        AppointmentLedger {
            appointments,
            repository,
        }
    }

    ///
    /// Records a new SCHEDULED appointment with the next id and saves the ledger.
    /// Names are copied from `patient` and `doctor` as they are now.
    ///
    pub fn create(
        &mut self,
        patient: &Patient,
        doctor: &Doctor,
        slot: &str,
        reason: &str,
    ) -> Result<&Appointment, BookingError> {
        let id = next_id(self.appointments.iter().map(|a| a.id))
            .ok_or(BookingError::IdsExhausted)?;

        self.appointments.push(Appointment::new(
            id,
            patient.id,
            &patient.name,
            doctor.id,
            &doctor.name,
            slot,
            reason,
        ));
        self.persist();

        let index = self.appointments.len() - 1;
        Ok(&self.appointments[index])
    }

    pub fn find(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    pub fn find_mut(&mut self, id: AppointmentId) -> Option<&mut Appointment> {
        self.appointments.iter_mut().find(|a| a.id == id)
    }

    /// A patient's full history, any status
    pub fn by_patient(&self, patient_id: PatientId) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id == patient_id)
            .collect()
    }

    pub fn scheduled_for_patient(&self, patient_id: PatientId) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id == patient_id && a.is_scheduled())
            .collect()
    }

    /// Upcoming appointments only
    pub fn schedule_for_doctor(&self, doctor_id: DoctorId) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.doctor_id == doctor_id && a.is_scheduled())
            .collect()
    }

    pub fn patient_has_conflict(&self, patient_id: PatientId, slot: &str) -> bool {
        self.appointments
            .iter()
            .any(|a| a.patient_id == patient_id && a.slot == slot && a.is_scheduled())
    }

    pub fn doctor_holds_slot(&self, doctor_id: DoctorId, slot: &str) -> bool {
        self.appointments
            .iter()
            .any(|a| a.doctor_id == doctor_id && a.slot == slot && a.is_scheduled())
    }

    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn persist(&self) {
        save_or_warn(self.repository.as_ref(), &self.appointments);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AppointmentStatus;
    use crate::store::MemoryRepository;

    fn people() -> (Patient, Patient, Doctor, Doctor) {
        (
            Patient::new(1, "Jabelo Pitso", 24, "082", "jabelo", "pw"),
            Patient::new(2, "Lerato Mokoena", 31, "083", "lerato", "pw"),
            Doctor::new(1, "Sarah Johnson", "Cardiologist", "011", "sarah", "pw"),
            Doctor::new(2, "Michael Dlamini", "GP", "012", "michael", "pw"),
        )
    }

    #[test]
    fn create_numbers_from_the_largest_loaded_id() {
        let repository = MemoryRepository::with_lines([
            "5|1|Jabelo Pitso|1|Sarah Johnson|2099-07-01 10:00|Checkup|CANCELLED",
        ]);
        let mut ledger = AppointmentLedger::load(Box::new(repository.clone()));
        let (patient, _, doctor, _) = people();

        let created = ledger
            .create(&patient, &doctor, "2099-07-02 10:00", "Follow up")
            .unwrap();

        assert_eq!(created.id, 6);
        assert_eq!(created.status(), AppointmentStatus::Scheduled);
        assert_eq!(created.doctor_name, "Sarah Johnson");
        assert_eq!(repository.lines().len(), 2);
    }

    #[test]
    fn create_fails_without_changes_when_ids_run_out() {
        let repository = MemoryRepository::with_lines([
            "4294967295|1|Jabelo Pitso|1|Sarah Johnson|2099-07-01 10:00|Checkup|SCHEDULED",
        ]);
        let mut ledger = AppointmentLedger::load(Box::new(repository.clone()));
        let (patient, _, doctor, _) = people();

        let result = ledger.create(&patient, &doctor, "2099-07-02 10:00", "Follow up");

        assert_eq!(result.err(), Some(BookingError::IdsExhausted));
        assert_eq!(ledger.all().len(), 1);
        assert_eq!(repository.lines().len(), 1);
    }

    #[test]
    fn queries_filter_by_owner_and_status() {
        let mut ledger = AppointmentLedger::load(Box::new(MemoryRepository::new()));
        let (jabelo, lerato, sarah, michael) = people();

        ledger.create(&jabelo, &sarah, "2099-07-01 10:00", "Checkup").unwrap();
        ledger.create(&jabelo, &michael, "2099-07-02 10:00", "Cough").unwrap();
        ledger.create(&lerato, &sarah, "2099-07-03 10:00", "Rash").unwrap();
        ledger.find_mut(1).unwrap().cancel().unwrap();

        assert_eq!(ledger.by_patient(1).len(), 2);
        assert_eq!(ledger.scheduled_for_patient(1).len(), 1);
        assert_eq!(ledger.scheduled_for_patient(1)[0].id, 2);

        let schedule = ledger.schedule_for_doctor(1);
        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].patient_name, "Lerato Mokoena");
    }

    #[test]
    fn conflicts_only_count_scheduled_appointments() {
        let mut ledger = AppointmentLedger::load(Box::new(MemoryRepository::new()));
        let (jabelo, _, sarah, _) = people();

        ledger.create(&jabelo, &sarah, "2099-07-01 10:00", "Checkup").unwrap();
        assert!(ledger.patient_has_conflict(1, "2099-07-01 10:00"));
        assert!(ledger.doctor_holds_slot(1, "2099-07-01 10:00"));
        assert!(!ledger.patient_has_conflict(2, "2099-07-01 10:00"));
        assert!(!ledger.doctor_holds_slot(2, "2099-07-01 10:00"));

        ledger.find_mut(1).unwrap().complete().unwrap();
        assert!(!ledger.patient_has_conflict(1, "2099-07-01 10:00"));
        assert!(!ledger.doctor_holds_slot(1, "2099-07-01 10:00"));
    }
}
