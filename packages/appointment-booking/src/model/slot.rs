use crate::error::SlotProblem;
use chrono::{Local, NaiveDateTime};

/// Slots are stored and compared as strings in exactly this shape.
pub const SLOT_FORMAT: &str = "%Y-%m-%d %H:%M";

pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

///
/// Parses a slot string.
///
/// chrono accepts unpadded fields such as `2099-7-1 9:00`, so the parsed value is
/// formatted again and compared to keep the format fixed width.
///
pub fn parse(slot: &str) -> Result<NaiveDateTime, SlotProblem> {
    let parsed = NaiveDateTime::parse_from_str(slot, SLOT_FORMAT).map_err(|_| SlotProblem::Format)?;

    if parsed.format(SLOT_FORMAT).to_string() != slot {
        return Err(SlotProblem::Format);
    }

    Ok(parsed)
}

///
/// A slot can be booked when it is well-formed and not before `clock.now()`.
///
pub fn validate_bookable(slot: &str, clock: &dyn Clock) -> Result<NaiveDateTime, SlotProblem> {
    let parsed = parse(slot)?;

    if parsed < clock.now() {
        return Err(SlotProblem::Past);
    }

    Ok(parsed)
}
