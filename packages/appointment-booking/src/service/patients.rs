use super::{is_required, load_or_empty, next_id, save_or_warn};
use crate::credentials::{same_username, CredentialScheme};
use crate::error::RegistryError;
use crate::log::{AUTHENTICATION, REGISTRY};
use crate::model::{Patient, PatientId};
use crate::store::{is_storable, Repository};
use tracing::{debug, info};

pub struct PatientRegistry {
    patients: Vec<Patient>,
    repository: Box<dyn Repository<Patient>>,
    credentials: Box<dyn CredentialScheme>,
}

impl PatientRegistry {
    pub fn load(
        repository: Box<dyn Repository<Patient>>,
        credentials: Box<dyn CredentialScheme>,
    ) -> Self {
        let patients = load_or_empty(repository.as_ref());
        debug!(target: REGISTRY, msg = "Loaded patients", count = patients.len());

        PatientRegistry {
            patients,
            repository,
            credentials,
        }
    }

    pub fn register(
        &mut self,
        name: &str,
        age: u32,
        contact: &str,
        username: &str,
        password: &str,
    ) -> Result<&Patient, RegistryError> {
        check_fields(name, contact, username, password)?;

        if self
            .patients
            .iter()
            .any(|p| same_username(&p.username, username))
        {
            return Err(RegistryError::DuplicateUsername {
                username: username.to_string(),
            });
        }

        let id = next_id(self.patients.iter().map(|p| p.id))
            .ok_or(RegistryError::IdsExhausted { kind: "patient" })?;
        let sealed = self.credentials.seal(password);
        self.patients
            .push(Patient::new(id, name, age, contact, username, &sealed));
        self.persist();

        info!(target: REGISTRY, msg = "Registered patient", id, username);

        let index = self.patients.len() - 1;
        Ok(&self.patients[index])
    }

    pub fn login(&self, username: &str, password: &str) -> Result<&Patient, RegistryError> {
        let found = self.patients.iter().find(|p| {
            same_username(&p.username, username) && self.credentials.verify(&p.password, password)
        });

        match found {
            Some(patient) => {
                info!(target: AUTHENTICATION, msg = "Patient logged in", id = patient.id);
                Ok(patient)
            }
            None => {
                info!(target: AUTHENTICATION, msg = "Patient login failed", username);
                Err(RegistryError::InvalidCredentials)
            }
        }
    }

    pub fn find_by_id(&self, id: PatientId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn find_mut(&mut self, id: PatientId) -> Option<&mut Patient> {
        self.patients.iter_mut().find(|p| p.id == id)
    }

    pub fn all(&self) -> &[Patient] {
        &self.patients
    }

    pub fn persist(&self) {
        save_or_warn(self.repository.as_ref(), &self.patients);
    }
}

fn check_fields(
    name: &str,
    contact: &str,
    username: &str,
    password: &str,
) -> Result<(), RegistryError> {
    if !is_required(name) {
        return Err(RegistryError::InvalidField { field: "Name" });
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
    Ok(())
}
