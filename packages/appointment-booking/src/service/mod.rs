mod booking;
mod clinic;
mod doctors;
mod ledger;
mod patients;

pub use booking::AppointmentService;
pub use clinic::Clinic;
pub use doctors::{DoctorLookup, DoctorRegistry};
pub use ledger::AppointmentLedger;
pub use patients::PatientRegistry;

use crate::log::STORAGE;
use crate::store::{is_storable, Record, Repository};
use tracing::warn;

///
/// Loads a collection, starting empty if the store cannot be read.
///
fn load_or_empty<T: Record>(repository: &dyn Repository<T>) -> Vec<T> {
    match repository.load_all() {
        Ok(records) => records,
        Err(err) => {
            warn!(target: STORAGE, msg = "Could not load records, starting empty", kind = T::KIND, error = err.to_string());
            Vec::new()
        }
    }
}

///
/// Writes a collection back. A failed save is logged and the in-memory state stands.
///
fn save_or_warn<T: Record>(repository: &dyn Repository<T>, records: &[T]) {
    if let Err(err) = repository.save_all(records) {
        warn!(target: STORAGE, msg = "Could not save records", kind = T::KIND, error = err.to_string());
    }
}

/// Next sequential id: one past the largest in use, None once `u32::MAX` is taken
fn next_id(ids: impl Iterator<Item = u32>) -> Option<u32> {
    ids.max().map_or(Some(1), |max| max.checked_add(1))
}

/// A free-text field that must also be present
fn is_required(value: &str) -> bool {
    !value.is_empty() && is_storable(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_id_follows_the_largest() {
        assert_eq!(next_id(std::iter::empty()), Some(1));
        assert_eq!(next_id([3, 1, 2].into_iter()), Some(4));
        assert_eq!(next_id([7].into_iter()), Some(8));
    }

    #[test]
    fn next_id_runs_out_at_the_largest_u32() {
        assert_eq!(next_id([u32::MAX - 1].into_iter()), Some(u32::MAX));
        assert_eq!(next_id([1, u32::MAX].into_iter()), None);
    }

    #[test]
    fn required_fields() {
        assert!(is_required("john"));
        assert!(!is_required(""));
        assert!(!is_required("   "));
        assert!(!is_required("jo|hn"));
        assert!(!is_required(" john"));
    }
}
