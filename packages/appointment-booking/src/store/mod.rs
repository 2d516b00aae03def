//!
//! Persistence for the three entity collections.
//!
//! Every collection is loaded in full at startup and written back in full after each change.
//! Records are one line each, fields separated by `|`.
//!
mod file;
mod memory;
mod records;

pub use file::FileRepository;
pub use memory::MemoryRepository;

use crate::error::StoreError;

pub const FIELD_DELIMITER: &str = "|";
pub const SLOT_SEPARATOR: &str = ",";

pub trait Repository<T> {
    /// Reads every well-formed record. A store that does not exist yet is empty.
    fn load_all(&self) -> Result<Vec<T>, StoreError>;

    /// Replaces the whole store with `records`.
    fn save_all(&self, records: &[T]) -> Result<(), StoreError>;
}

///
/// Line encoding for a stored entity.
///
pub trait Record: Sized {
    /// Name used in logs
    const KIND: &'static str;

    fn encode(&self) -> String;

    /// Returns None for malformed lines, which are skipped on load
    fn decode(line: &str) -> Option<Self>;
}

///
/// True if `value` can be written as a single field and read back unchanged.
///
/// Fields are trimmed on load, so a value with surrounding whitespace is not storable.
///
pub fn is_storable(value: &str) -> bool {
    value.trim() == value
        && !value.contains(FIELD_DELIMITER)
        && !value.contains('\n')
        && !value.contains('\r')
}

///
/// Splits a line into exactly `count` trimmed fields.
///
fn split_fields(line: &str, count: usize) -> Option<Vec<&str>> {
    let fields = line.split(FIELD_DELIMITER).map(str::trim).collect::<Vec<_>>();
    (fields.len() == count).then_some(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_fields_requires_exact_count() {
        assert_eq!(split_fields("1| a |b", 3), Some(vec!["1", "a", "b"]));
        assert_eq!(split_fields("1|a", 3), None);
        assert_eq!(split_fields("1|a|b|c", 3), None);
        assert_eq!(split_fields("1|a|", 3), Some(vec!["1", "a", ""]));
    }

    #[test]
    fn storable_values() {
        assert!(is_storable("Sarah Johnson"));
        assert!(is_storable(""));
        assert!(!is_storable("a|b"));
        assert!(!is_storable("line\nbreak"));
        assert!(!is_storable(" pw "));
        assert!(!is_storable("trailing\t"));
    }
}
