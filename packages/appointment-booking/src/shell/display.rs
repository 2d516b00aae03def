use crate::model::{Appointment, Doctor};
use std::io::{self, Write};

const RULE: &str = "  +======================================================+";
const DIVIDER: &str = "  ------------------------------------------------------";

pub fn banner(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "  |      DOCTOR APPOINTMENT BOOKING SYSTEM               |")?;
    writeln!(out, "{RULE}")
}

pub fn heading(out: &mut impl Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "  | {title:<53}|")?;
    writeln!(out, "{RULE}")
}

///
/// Every doctor with the slots still open
///
pub fn doctors(out: &mut impl Write, doctors: &[Doctor]) -> io::Result<()> {
    heading(out, "              AVAILABLE DOCTORS")?;

    if doctors.is_empty() {
        return writeln!(out, "  No doctors registered yet.");
    }

    for doctor in doctors {
        writeln!(out)?;
        writeln!(out, "  {doctor}")?;
        writeln!(out, "  Available Slots:")?;
        if doctor.available_slots().is_empty() {
            writeln!(out, "    -> No slots available.")?;
        } else {
            for slot in doctor.available_slots() {
                writeln!(out, "    -> {slot}")?;
            }
        }
        writeln!(out, "{DIVIDER}")?;
    }
    Ok(())
}

pub fn numbered_slots(out: &mut impl Write, slots: &[String]) -> io::Result<()> {
    for (index, slot) in slots.iter().enumerate() {
        writeln!(out, "  {}. {slot}", index + 1)?;
    }
    Ok(())
}

pub fn appointments(
    out: &mut impl Write,
    title: &str,
    appointments: &[&Appointment],
    empty: &str,
) -> io::Result<()> {
    heading(out, title)?;

    if appointments.is_empty() {
        return writeln!(out, "  {empty}");
    }

    for appointment in appointments {
        writeln!(out)?;
        for line in appointment.to_string().lines() {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn lists_doctors_with_their_slots() {
        let mut sarah = Doctor::new(
            1,
            "Sarah Johnson",
            "Cardiologist",
            "011-555-0101",
            "sarah",
            "pw",
        );
        sarah.add_available_slot("2099-07-01 10:00");
        let michael = Doctor::new(2, "Michael Dlamini", "GP", "011-555-0202", "michael", "pw");

        let text = render(|out| doctors(out, &[sarah, michael]));

        assert!(text.contains("Dr. Sarah Johnson"));
        assert!(text.contains("    -> 2099-07-01 10:00"));
        assert!(text.contains("    -> No slots available."));
        assert!(!text.contains("sarah"));
    }

    #[test]
    fn empty_lists_say_so() {
        let text = render(|out| doctors(out, &[]));
        assert!(text.contains("No doctors registered yet."));

        let text = render(|out| appointments(out, "SCHEDULE", &[], "No upcoming appointments."));
        assert!(text.contains("  No upcoming appointments."));
    }

    #[test]
    fn appointments_are_boxed() {
        let appointment = Appointment::new(
            3,
            1,
            "Jabelo Pitso",
            1,
            "Sarah Johnson",
            "2099-07-01 10:00",
            "Checkup",
        );

        let text = render(|out| appointments(out, "HISTORY", &[&appointment], "none"));

        assert!(text.contains("| Appointment ID : 3"));
        assert!(text.contains("| Doctor         : Dr. Sarah Johnson"));
        assert!(text.contains("| Status         : SCHEDULED"));
    }
}
