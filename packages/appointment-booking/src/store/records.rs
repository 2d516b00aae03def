use super::{split_fields, Record, FIELD_DELIMITER, SLOT_SEPARATOR};
use crate::model::{Appointment, AppointmentStatus, Doctor, Patient};

const DOCTOR_FIELDS: usize = 7;
const PATIENT_FIELDS: usize = 6;
const APPOINTMENT_FIELDS: usize = 8;

fn join<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| -> &str { field.as_ref() })
        .collect::<Vec<&str>>()
        .join(FIELD_DELIMITER)
}

// id|name|specialization|contact|username|password|slot1,slot2,...
impl Record for Doctor {
    const KIND: &'static str = "doctor";

    fn encode(&self) -> String {
        let id = self.id.to_string();
        let slots = self.available_slots().join(SLOT_SEPARATOR);
        join(&[
            &id,
            &self.name,
            &self.specialization,
            &self.contact,
            &self.username,
            &self.password,
            &slots,
        ])
    }

    fn decode(line: &str) -> Option<Self> {
        let f = split_fields(line, DOCTOR_FIELDS)?;
        let mut doctor = Doctor::new(f[0].parse().ok()?, f[1], f[2], f[3], f[4], f[5]);

        f[6].split(SLOT_SEPARATOR)
            .map(str::trim)
            .filter(|slot| !slot.is_empty())
            .for_each(|slot| {
                doctor.add_available_slot(slot);
            });

        Some(doctor)
    }
}

// id|name|age|contact|username|password
impl Record for Patient {
    const KIND: &'static str = "patient";

    fn encode(&self) -> String {
        let id = self.id.to_string();
        let age = self.age.to_string();
        join(&[
            &id,
            &self.name,
            &age,
            &self.contact,
            &self.username,
            &self.password,
        ])
    }

    fn decode(line: &str) -> Option<Self> {
        let f = split_fields(line, PATIENT_FIELDS)?;
        Some(Patient::new(
            f[0].parse().ok()?,
            f[1],
            f[2].parse().ok()?,
            f[3],
            f[4],
            f[5],
        ))
    }
}

// id|patientId|patientName|doctorId|doctorName|slot|reason|STATUS
impl Record for Appointment {
    const KIND: &'static str = "appointment";

    fn encode(&self) -> String {
        let id = self.id.to_string();
        let patient_id = self.patient_id.to_string();
        let doctor_id = self.doctor_id.to_string();
        let status = self.status().to_string();
        join(&[
            &id,
            &patient_id,
            &self.patient_name,
            &doctor_id,
            &self.doctor_name,
            &self.slot,
            &self.reason,
            &status,
        ])
    }

    fn decode(line: &str) -> Option<Self> {
        let f = split_fields(line, APPOINTMENT_FIELDS)?;
        let status: AppointmentStatus = f[7].parse().ok()?;
        let appointment = Appointment::new(
            f[0].parse().ok()?,
            f[1].parse().ok()?,
            f[2],
            f[3].parse().ok()?,
            f[4],
            f[5],
            f[6],
        );
        Some(appointment.with_status(status))
    }
}
