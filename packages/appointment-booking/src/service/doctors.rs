use super::{is_required, load_or_empty, next_id, save_or_warn, AppointmentLedger};
use crate::credentials::{same_username, CredentialScheme};
use crate::error::{BookingError, Error, RegistryError, SlotProblem};
use crate::log::{AUTHENTICATION, REGISTRY};
use crate::model::slot::{parse as parse_slot, SLOT_FORMAT};
use crate::model::{Clock, Doctor, DoctorId};
use crate::store::{is_storable, Repository, SLOT_SEPARATOR};
use chrono::{Days, NaiveDate};
use tracing::{debug, info};

///
/// Finds the doctor owning an appointment when its slot has to go back on the list.
///
pub trait DoctorLookup {
    fn doctor_mut(&mut self, id: DoctorId) -> Option<&mut Doctor>;
}

/// Seeded slot: (days after today, hour)
type SeedSlot = (u64, u32);

///
/// The doctors seeded into an empty store: (name, specialization, contact, username, password, slots)
///
const DEFAULT_DOCTORS: [(&str, &str, &str, &str, &str, &[SeedSlot]); 3] = [
    (
        "Sarah Johnson",
        "Cardiologist",
        "011-555-0101",
        "sarah",
        "sarah123",
        &[(1, 9), (1, 11), (2, 10)],
    ),
    (
        "Michael Dlamini",
        "General Practitioner",
        "011-555-0202",
        "michael",
        "michael123",
        &[(1, 8), (1, 14), (3, 9)],
    ),
    (
        "Priya Naidoo",
        "Dermatologist",
        "011-555-0303",
        "priya",
        "priya123",
        &[(2, 11), (4, 15)],
    ),
];

///
/// The default roster, numbered from 1, passwords sealed with `credentials`.
///
/// Slots fall on the days after `clock`'s today, so a freshly seeded clinic always has bookable slots.
///
fn default_doctors(credentials: &dyn CredentialScheme, clock: &dyn Clock) -> Vec<Doctor> {
    let today = clock.now().date();

    DEFAULT_DOCTORS
        .iter()
        .zip(1..)
        .map(|(&(name, specialization, contact, username, password, slots), id)| {
            let mut doctor = Doctor::new(
                id,
                name,
                specialization,
                contact,
                username,
                &credentials.seal(password),
            );
            for slot in slots.iter().filter_map(|&slot| seed_slot(today, slot)) {
                doctor.add_available_slot(&slot);
            }
            doctor
        })
        .collect()
}

fn seed_slot(today: NaiveDate, (days, hour): SeedSlot) -> Option<String> {
    let at = today.checked_add_days(Days::new(days))?.and_hms_opt(hour, 0, 0)?;
    Some(at.format(SLOT_FORMAT).to_string())
}

pub struct DoctorRegistry {
    doctors: Vec<Doctor>,
    repository: Box<dyn Repository<Doctor>>,
    credentials: Box<dyn CredentialScheme>,
}

impl DoctorRegistry {
    pub fn load(
        repository: Box<dyn Repository<Doctor>>,
        credentials: Box<dyn CredentialScheme>,
    ) -> Self {
        let doctors = load_or_empty(repository.as_ref());
        debug!(target: REGISTRY, msg = "Loaded doctors", count = doctors.len());

        DoctorRegistry {
            doctors,
            repository,
            credentials,
        }
    }

    ///
    /// Stores the default roster when there are no doctors yet.
    ///
    /// Appointments can outlive a deleted doctor store, so a seeded slot that a
    /// scheduled appointment in `ledger` still holds is left off the list.
    ///
    pub fn seed_defaults(&mut self, clock: &dyn Clock, ledger: &AppointmentLedger) {
        if !self.doctors.is_empty() {
            return;
        }

        self.doctors = default_doctors(self.credentials.as_ref(), clock);
        for doctor in self.doctors.iter_mut() {
            let held = doctor
                .available_slots()
                .iter()
                .filter(|slot| ledger.doctor_holds_slot(doctor.id, slot))
                .cloned()
                .collect::<Vec<_>>();
            for slot in held {
                doctor.remove_slot(&slot);
            }
        }
        self.persist();

        info!(target: REGISTRY, msg = "Seeded default doctors", count = self.doctors.len());
    }

    pub fn register(
        &mut self,
        name: &str,
        specialization: &str,
        contact: &str,
        username: &str,
        password: &str,
    ) -> Result<&Doctor, RegistryError> {
        if !is_required(name) {
            return Err(RegistryError::InvalidField { field: "Name" });
        }
        if !is_storable(specialization) {
            return Err(RegistryError::InvalidField {
                field: "Specialization",
            });
        }
        if !is_storable(contact) {
            return Err(RegistryError::InvalidField { field: "Contact" });
        }
        if !is_required(username) {
            return Err(RegistryError::InvalidField { field: "Username" });
        }
        if !is_required(password) {
            return Err(RegistryError::InvalidField { field: "Password" });
        }

        if self
            .doctors
            .iter()
            .any(|d| same_username(&d.username, username))
        {
            return Err(RegistryError::DuplicateUsername {
                username: username.to_string(),
            });
        }

        let id = next_id(self.doctors.iter().map(|d| d.id))
            .ok_or(RegistryError::IdsExhausted { kind: "doctor" })?;
        let sealed = self.credentials.seal(password);
        self.doctors.push(Doctor::new(
            id,
            name,
            specialization,
            contact,
            username,
            &sealed,
        ));
        self.persist();

        info!(target: REGISTRY, msg = "Registered doctor", id, username);

        let index = self.doctors.len() - 1;
        Ok(&self.doctors[index])
    }

    pub fn login(&self, username: &str, password: &str) -> Result<&Doctor, RegistryError> {
        let found = self.doctors.iter().find(|d| {
            same_username(&d.username, username) && self.credentials.verify(&d.password, password)
        });

        match found {
            Some(doctor) => {
                info!(target: AUTHENTICATION, msg = "Doctor logged in", id = doctor.id);
                Ok(doctor)
            }
            None => {
                info!(target: AUTHENTICATION, msg = "Doctor login failed", username);
                Err(RegistryError::InvalidCredentials)
            }
        }
    }

    ///
    /// Lists a new slot for a doctor.
    ///
    /// Only the format is checked, a doctor may list a slot in the past.
    /// A slot already held by one of the doctor's scheduled appointments cannot be listed again.
    ///
    pub fn add_slot(
        &mut self,
        id: DoctorId,
        slot: &str,
        ledger: &AppointmentLedger,
    ) -> Result<(), Error> {
        let doctor = self
            .doctors
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(BookingError::UnknownDoctor { id })?;

        if slot.contains(SLOT_SEPARATOR) {
            return Err(RegistryError::InvalidSlot {
                slot: slot.to_string(),
                reason: SlotProblem::Format,
            }
            .into());
        }
        parse_slot(slot).map_err(|reason| RegistryError::InvalidSlot {
            slot: slot.to_string(),
            reason,
        })?;

        if ledger.doctor_holds_slot(id, slot) {
            return Err(RegistryError::SlotBooked {
                slot: slot.to_string(),
            }
            .into());
        }

        if !doctor.add_available_slot(slot) {
            return Err(RegistryError::SlotAlreadyListed {
                slot: slot.to_string(),
            }
            .into());
        }

        info!(target: REGISTRY, msg = "Added slot", doctor = id, slot);
        self.persist();
        Ok(())
    }

    pub fn remove_slot(&mut self, id: DoctorId, slot: &str) -> Result<(), Error> {
        let doctor = self
            .doctors
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(BookingError::UnknownDoctor { id })?;

        if !doctor.remove_slot(slot) {
            return Err(RegistryError::SlotNotListed {
                slot: slot.to_string(),
            }
            .into());
        }

        info!(target: REGISTRY, msg = "Removed slot", doctor = id, slot);
        self.persist();
        Ok(())
    }

    pub fn find_by_id(&self, id: DoctorId) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn find_mut(&mut self, id: DoctorId) -> Option<&mut Doctor> {
        self.doctors.iter_mut().find(|d| d.id == id)
    }

    pub fn all(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn persist(&self) {
        save_or_warn(self.repository.as_ref(), &self.doctors);
    }
}

impl DoctorLookup for DoctorRegistry {
    fn doctor_mut(&mut self, id: DoctorId) -> Option<&mut Doctor> {
        self.find_mut(id)
    }
}
