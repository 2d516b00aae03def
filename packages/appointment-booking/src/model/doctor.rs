use super::DoctorId;
use std::fmt::Display;

#[derive(Clone, Debug, PartialEq)]
pub struct Doctor {
    pub id: DoctorId,
    pub name: String,
    pub specialization: String,
    pub contact: String,
    pub username: String,
    pub password: String,
    available_slots: Vec<String>,
}

impl Doctor {
    pub fn new(
        id: DoctorId,
        name: &str,
        specialization: &str,
        contact: &str,
        username: &str,
        password: &str,
    ) -> Self {
        Self {
            id,
            name: name.to_string(),
            specialization: specialization.to_string(),
            contact: contact.to_string(),
            username: username.to_string(),
            password: password.to_string(),
            available_slots: Vec::new(),
        }
    }

    ///
    /// Appends a slot, keeping insertion order.
    /// Returns false if the slot is already listed.
    ///
    pub fn add_available_slot(&mut self, slot: &str) -> bool {
        if self.is_slot_available(slot) {
            return false;
        }
        self.available_slots.push(slot.to_string());
        true
    }

    pub fn remove_slot(&mut self, slot: &str) -> bool {
        match self.available_slots.iter().position(|s| s == slot) {
            Some(index) => {
                self.available_slots.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_slot_available(&self, slot: &str) -> bool {
        self.available_slots.iter().any(|s| s == slot)
    }

    pub fn available_slots(&self) -> &[String] {
        &self.available_slots
    }
}

impl Display for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[ID: {}] Dr. {:<20} | {:<22} | Contact: {}",
            self.id, self.name, self.specialization, self.contact
        )
    }
}
