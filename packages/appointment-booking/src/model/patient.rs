use super::{AppointmentId, PatientId};
use std::collections::BTreeSet;
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub age: u32,
    pub contact: String,
    pub username: String,
    /// Credential as sealed by the active `CredentialScheme`
    pub password: String,
    /// Ids of the appointments this patient currently holds.
    /// Not persisted with the patient record, rebuilt from the ledger on startup.
    pub appointment_ids: BTreeSet<AppointmentId>,
}

impl Patient {
    pub fn new(
        id: PatientId,
        name: &str,
        age: u32,
        contact: &str,
        username: &str,
        password: &str,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            age,
            contact: contact.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            appointment_ids: BTreeSet::new(),
        }
    }

    pub fn add_appointment_id(&mut self, id: AppointmentId) {
        self.appointment_ids.insert(id);
    }

    pub fn remove_appointment_id(&mut self, id: AppointmentId) -> bool {
        self.appointment_ids.remove(&id)
    }

    pub fn holds(&self, id: AppointmentId) -> bool {
        self.appointment_ids.contains(&id)
    }
}

impl Display for Patient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[ID: {}] {:<20} | Age: {:<3} | Contact: {}",
            self.id, self.name, self.age, self.contact
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_ids_behave_as_a_set() {
        let mut patient = Patient::new(1, "Jabelo Pitso", 25, "011-000-0001", "jabelo", "1234");

        patient.add_appointment_id(3);
        patient.add_appointment_id(1);
        patient.add_appointment_id(3);

        assert_eq!(patient.appointment_ids.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
        assert!(patient.remove_appointment_id(3));
        assert!(!patient.remove_appointment_id(3));
        assert!(patient.holds(1));
        assert!(!patient.holds(3));
    }
}
