use std::io;
use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
/// This module contains test helpers
use tracing_subscriber::fmt::MakeWriter;

use crate::config::BookingConfig;
use crate::model::{Appointment, Doctor, FixedClock, Patient};
use crate::service::Clinic;
use crate::store::MemoryRepository;
use chrono::NaiveDate;

pub(crate) const TEST_CONFIG_FILE: &str = "tests/config/appointment-booking-test.toml";

/// Runs a function with all APPT_ environment variables unset
pub(crate) fn with_no_appt_vars<F: FnOnce() -> R, R>(f: F) -> R {
    let appt_vars = std::env::vars()
        .map(|(k, _v)| k)
        .filter(|k| k.starts_with("APPT_"))
        .collect::<Vec<_>>();

    temp_env::with_vars_unset(&appt_vars, f)
}

/// 2026-10-16 09:30
pub(crate) fn test_clock() -> FixedClock {
    let now = NaiveDate::from_ymd_opt(2026, 10, 16)
        .and_then(|d| d.and_hms_opt(9, 30, 0))
        .expect("valid test time");
    FixedClock(now)
}

/// In-memory stores behind a clinic, kept so tests can inspect what was saved
pub(crate) struct TestStores {
    pub doctors: MemoryRepository<Doctor>,
    pub patients: MemoryRepository<Patient>,
    pub appointments: MemoryRepository<Appointment>,
}

impl TestStores {
    pub(crate) fn empty() -> Self {
        TestStores {
            doctors: MemoryRepository::new(),
            patients: MemoryRepository::new(),
            appointments: MemoryRepository::new(),
        }
    }

    pub(crate) fn open(&self, booking: BookingConfig) -> Clinic {
        Clinic::open(
            Box::new(self.doctors.clone()),
            Box::new(self.patients.clone()),
            Box::new(self.appointments.clone()),
            Box::new(test_clock()),
            &booking,
        )
    }
}

/// A clinic with no seeded doctors and date validation against `test_clock`
pub(crate) fn empty_clinic() -> (Clinic, TestStores) {
    let stores = TestStores::empty();
    let clinic = stores.open(BookingConfig {
        validate_dates: true,
        seed_default_doctors: false,
    });
    (clinic, stores)
}

// Mock Writer for flexibly testing the logging behaviour, copy-pasted from
// tracing_subscriber's internal test code (with JSON functionality deleted).
// https://github.com/tokio-rs/tracing/blob/b02a700ba6850ad813f77e65144114f866074a8f/tracing-subscriber/src/fmt/mod.rs#L1247-L1314
pub(crate) struct MockWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MockWriter {
    pub(crate) fn new(buf: Arc<Mutex<Vec<u8>>>) -> Self {
        Self { buf }
    }

    pub(crate) fn map_error<Guard>(err: TryLockError<Guard>) -> io::Error {
        match err {
            TryLockError::WouldBlock => io::Error::from(io::ErrorKind::WouldBlock),
            TryLockError::Poisoned(_) => io::Error::from(io::ErrorKind::Other),
        }
    }

    pub(crate) fn buf(&self) -> io::Result<MutexGuard<'_, Vec<u8>>> {
        self.buf.try_lock().map_err(Self::map_error)
    }
}

impl io::Write for MockWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.buf()?.flush()
    }
}

#[derive(Clone, Default)]
pub(crate) struct MockMakeWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl MockMakeWriter {
    pub(crate) fn get_string(&self) -> String {
        let mut buf = self.buf.lock().expect("lock shouldn't be poisoned");
        let string = std::str::from_utf8(&buf[..])
            .expect("formatter should not have produced invalid utf-8")
            .to_owned();
        buf.clear();
        string
    }
}

impl<'a> MakeWriter<'a> for MockMakeWriter {
    type Writer = MockWriter;

    fn make_writer(&'a self) -> Self::Writer {
        MockWriter::new(self.buf.clone())
    }
}
