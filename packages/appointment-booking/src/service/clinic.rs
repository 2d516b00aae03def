use super::{AppointmentLedger, AppointmentService, DoctorRegistry, PatientRegistry};
use crate::config::{BookingConfig, ClinicConfig};
use crate::credentials::PlaintextCredentials;
use crate::error::{BookingError, Error};
use crate::log::{BOOKING, REGISTRY};
use crate::model::{
    Appointment, AppointmentId, Clock, Doctor, DoctorId, Patient, PatientId, SystemClock,
};
use crate::store::{FileRepository, Repository};
use tracing::{debug, info};

///
/// The doctors, patients and appointments of one clinic.
///
/// Each operation saves every collection it changed before returning.
///
pub struct Clinic {
    doctors: DoctorRegistry,
    patients: PatientRegistry,
    appointments: AppointmentService,
}

impl Clinic {
    ///
    /// Opens the clinic stored under the configured data directory
    ///
    pub fn from_config(config: &ClinicConfig) -> Clinic {
        let storage = &config.storage;
        info!(target: REGISTRY, msg = "Opening clinic", data_dir = ?storage.data_dir);

        Clinic::open(
            Box::new(FileRepository::new(storage.doctors_path())),
            Box::new(FileRepository::new(storage.patients_path())),
            Box::new(FileRepository::new(storage.appointments_path())),
            Box::new(SystemClock),
            &config.booking,
        )
    }

    pub fn open(
        doctors: Box<dyn Repository<Doctor>>,
        patients: Box<dyn Repository<Patient>>,
        appointments: Box<dyn Repository<Appointment>>,
        clock: Box<dyn Clock>,
        booking: &BookingConfig,
    ) -> Clinic {
        let ledger = AppointmentLedger::load(appointments);
        let mut doctors = DoctorRegistry::load(doctors, Box::new(PlaintextCredentials));
        if booking.seed_default_doctors {
            doctors.seed_defaults(clock.as_ref(), &ledger);
        }
        let patients = PatientRegistry::load(patients, Box::new(PlaintextCredentials));

        let mut clinic = Clinic {
            doctors,
            patients,
            appointments: AppointmentService::new(ledger, clock, booking.validate_dates),
        };
        clinic.rehydrate();
        clinic
    }

    // The patient store has no appointment ids, they come back from the ledger.
    fn rehydrate(&mut self) {
        let ledger = self.appointments.ledger();
        let mut restored = 0;

        for appointment in ledger.all().iter().filter(|a| a.is_scheduled()) {
            if let Some(patient) = self.patients.find_mut(appointment.patient_id) {
                patient.add_appointment_id(appointment.id);
                restored += 1;
            }
        }

        debug!(target: BOOKING, msg = "Restored patient appointments", count = restored);
    }

    pub fn register_patient(
        &mut self,
        name: &str,
        age: u32,
        contact: &str,
        username: &str,
        password: &str,
    ) -> Result<&Patient, Error> {
        Ok(self
            .patients
            .register(name, age, contact, username, password)?)
    }

    pub fn login_patient(&self, username: &str, password: &str) -> Result<&Patient, Error> {
        Ok(self.patients.login(username, password)?)
    }

    pub fn register_doctor(
        &mut self,
        name: &str,
        specialization: &str,
        contact: &str,
        username: &str,
        password: &str,
    ) -> Result<&Doctor, Error> {
        Ok(self
            .doctors
            .register(name, specialization, contact, username, password)?)
    }

    pub fn login_doctor(&self, username: &str, password: &str) -> Result<&Doctor, Error> {
        Ok(self.doctors.login(username, password)?)
    }

    pub fn doctors(&self) -> &[Doctor] {
        self.doctors.all()
    }

    pub fn doctor(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.find_by_id(id)
    }

    pub fn patient(&self, id: PatientId) -> Option<&Patient> {
        self.patients.find_by_id(id)
    }

    pub fn appointments(&self) -> &[Appointment] {
        self.appointments.ledger().all()
    }

    pub fn appointment(&self, id: AppointmentId) -> Option<&Appointment> {
        self.appointments.ledger().find(id)
    }

    pub fn history_for_patient(&self, id: PatientId) -> Vec<&Appointment> {
        self.appointments.ledger().by_patient(id)
    }

    pub fn scheduled_for_patient(&self, id: PatientId) -> Vec<&Appointment> {
        self.appointments.ledger().scheduled_for_patient(id)
    }

    pub fn schedule_for_doctor(&self, id: DoctorId) -> Vec<&Appointment> {
        self.appointments.ledger().schedule_for_doctor(id)
    }

    pub fn book(
        &mut self,
        patient_id: PatientId,
        doctor_id: DoctorId,
        slot: &str,
        reason: &str,
    ) -> Result<Appointment, Error> {
        let patient = self
            .patients
            .find_mut(patient_id)
            .ok_or(BookingError::UnknownPatient { id: patient_id })?;
        let doctor = self
            .doctors
            .find_mut(doctor_id)
            .ok_or(BookingError::UnknownDoctor { id: doctor_id })?;

        let appointment = self.appointments.book(patient, doctor, slot, reason)?;
        self.doctors.persist();

        Ok(appointment)
    }

    pub fn cancel(&mut self, patient_id: PatientId, id: AppointmentId) -> Result<(), Error> {
        let patient = self
            .patients
            .find_mut(patient_id)
            .ok_or(BookingError::UnknownPatient { id: patient_id })?;

        self.appointments.cancel(id, patient, &mut self.doctors)?;
        self.doctors.persist();

        Ok(())
    }

    pub fn complete(&mut self, doctor_id: DoctorId, id: AppointmentId) -> Result<(), Error> {
        let doctor = self
            .doctors
            .find_by_id(doctor_id)
            .ok_or(BookingError::UnknownDoctor { id: doctor_id })?;

        let patient_id = self.appointments.complete(id, doctor)?;
        if let Some(patient) = self.patients.find_mut(patient_id) {
            patient.remove_appointment_id(id);
        }

        Ok(())
    }

    pub fn add_slot(&mut self, doctor_id: DoctorId, slot: &str) -> Result<(), Error> {
        self.doctors
            .add_slot(doctor_id, slot, self.appointments.ledger())
    }

    pub fn remove_slot(&mut self, doctor_id: DoctorId, slot: &str) -> Result<(), Error> {
        self.doctors.remove_slot(doctor_id, slot)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::BookingConfig;
    use crate::error::{BookingError, Error, RegistryError};
    use crate::model::AppointmentStatus;
    use crate::test_helpers::{empty_clinic, TestStores};

    #[test]
    fn book_and_cancel_persist_every_collection() {
        let (mut clinic, stores) = empty_clinic();
        clinic.register_doctor("John Smith", "GP", "011", "john", "pw").unwrap();
        clinic.add_slot(1, "2099-07-01 10:00").unwrap();
        let patient = clinic
            .register_patient("Jabelo Pitso", 24, "082", "jabelo", "pw")
            .unwrap()
            .id;

        let appointment = clinic.book(patient, 1, "2099-07-01 10:00", "Checkup").unwrap();
        assert_eq!(stores.doctors.lines(), ["1|John Smith|GP|011|john|pw|"]);
        assert_eq!(
            stores.appointments.lines(),
            ["1|1|Jabelo Pitso|1|John Smith|2099-07-01 10:00|Checkup|SCHEDULED"]
        );
        assert!(clinic.patient(patient).unwrap().holds(appointment.id));

        clinic.cancel(patient, appointment.id).unwrap();
        assert_eq!(
            stores.doctors.lines(),
            ["1|John Smith|GP|011|john|pw|2099-07-01 10:00"]
        );
        assert!(stores.appointments.lines()[0].ends_with("|CANCELLED"));
        assert!(clinic.patient(patient).unwrap().appointment_ids.is_empty());
    }

    #[test]
    fn unknown_ids_are_reported() {
        let (mut clinic, _stores) = empty_clinic();

        assert!(matches!(
            clinic.book(7, 1, "2099-07-01 10:00", "Checkup"),
            Err(Error::Booking(BookingError::UnknownPatient { id: 7 }))
        ));

        clinic.register_patient("Jabelo Pitso", 24, "082", "jabelo", "pw").unwrap();
        assert!(matches!(
            clinic.book(1, 3, "2099-07-01 10:00", "Checkup"),
            Err(Error::Booking(BookingError::UnknownDoctor { id: 3 }))
        ));
        assert!(matches!(
            clinic.complete(3, 1),
            Err(Error::Booking(BookingError::UnknownDoctor { id: 3 }))
        ));
    }

    #[test]
    fn completing_releases_the_patient_but_not_the_slot() {
        let (mut clinic, stores) = empty_clinic();
        clinic.register_doctor("John Smith", "GP", "011", "john", "pw").unwrap();
        clinic.add_slot(1, "2099-07-01 10:00").unwrap();
        clinic.register_patient("Jabelo Pitso", 24, "082", "jabelo", "pw").unwrap();
        clinic.book(1, 1, "2099-07-01 10:00", "Checkup").unwrap();

        clinic.complete(1, 1).unwrap();

        assert_eq!(clinic.appointment(1).unwrap().status(), AppointmentStatus::Completed);
        assert!(clinic.patient(1).unwrap().appointment_ids.is_empty());
        assert!(clinic.doctor(1).unwrap().available_slots().is_empty());
        assert!(clinic.schedule_for_doctor(1).is_empty());
        assert_eq!(clinic.history_for_patient(1).len(), 1);
        assert!(stores.appointments.lines()[0].ends_with("|COMPLETED"));

        // the slot is free to list again once nothing scheduled holds it
        clinic.add_slot(1, "2099-07-01 10:00").unwrap();
    }

    #[test]
    fn reopening_restores_patient_appointments() {
        let (mut clinic, stores) = empty_clinic();
        clinic.register_doctor("John Smith", "GP", "011", "john", "pw").unwrap();
        clinic.add_slot(1, "2099-07-01 10:00").unwrap();
        clinic.add_slot(1, "2099-07-02 10:00").unwrap();
        clinic.register_patient("Jabelo Pitso", 24, "082", "jabelo", "pw").unwrap();
        clinic.book(1, 1, "2099-07-01 10:00", "Checkup").unwrap();
        clinic.book(1, 1, "2099-07-02 10:00", "Follow up").unwrap();
        clinic.cancel(1, 1).unwrap();
        drop(clinic);

        let reopened = stores.open(BookingConfig {
            validate_dates: true,
            seed_default_doctors: false,
        });

        let patient = reopened.patient(1).unwrap();
        assert_eq!(patient.appointment_ids.iter().copied().collect::<Vec<_>>(), [2]);
        assert_eq!(reopened.scheduled_for_patient(1).len(), 1);
        assert_eq!(reopened.history_for_patient(1).len(), 2);
    }

    #[test]
    fn seeding_follows_the_booking_config() {
        let stores = TestStores::empty();
        let clinic = stores.open(BookingConfig::default());

        assert_eq!(clinic.doctors().len(), 3);
        assert_eq!(clinic.login_doctor("SARAH", "sarah123").unwrap().id, 1);
        assert!(matches!(
            clinic.login_doctor("sarah", "wrong"),
            Err(Error::Registry(RegistryError::InvalidCredentials))
        ));
    }
}
