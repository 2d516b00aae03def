use super::{Record, Repository};
use crate::error::StoreError;
use std::cell::{Cell, RefCell};
use std::io;
use std::marker::PhantomData;
use std::rc::Rc;

///
/// Keeps encoded lines in memory, so records go through the same encoding as on disk.
///
/// Clones share the same lines, which lets a test keep a handle on a repository it has
/// handed to a registry.
///
pub struct MemoryRepository<T> {
    lines: Rc<RefCell<Vec<String>>>,
    fail_saves: Rc<Cell<bool>>,
    _record: PhantomData<fn() -> T>,
}

impl<T> Clone for MemoryRepository<T> {
    fn clone(&self) -> Self {
        Self {
            lines: Rc::clone(&self.lines),
            fail_saves: Rc::clone(&self.fail_saves),
            _record: PhantomData,
        }
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::with_lines(Vec::<String>::new())
    }
}

impl<T> MemoryRepository<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lines<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Self {
            lines: Rc::new(RefCell::new(lines.into_iter().map(Into::into).collect())),
            fail_saves: Rc::new(Cell::new(false)),
            _record: PhantomData,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    /// Makes every following save fail, as a full disk would
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }
}

impl<T: Record> Repository<T> for MemoryRepository<T> {
    fn load_all(&self) -> Result<Vec<T>, StoreError> {
        Ok(self
            .lines
            .borrow()
            .iter()
            .filter_map(|line| T::decode(line))
            .collect())
    }

    fn save_all(&self, records: &[T]) -> Result<(), StoreError> {
        if self.fail_saves.get() {
            return Err(StoreError::Io {
                path: format!("memory:{}", T::KIND),
                source: io::Error::new(io::ErrorKind::Other, "saves disabled"),
            });
        }

        *self.lines.borrow_mut() = records.iter().map(Record::encode).collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Patient;

    #[test]
    fn clones_share_lines() {
        let repo = MemoryRepository::<Patient>::new();
        let handle = repo.clone();

        repo.save_all(&[Patient::new(1, "A", 20, "011", "a", "pw")])
            .unwrap();

        assert_eq!(handle.lines(), vec!["1|A|20|011|a|pw".to_string()]);
        assert_eq!(handle.load_all().unwrap().len(), 1);
    }

    #[test]
    fn failing_saves_leave_lines_untouched() {
        let repo = MemoryRepository::<Patient>::with_lines(["1|A|20|011|a|pw"]);
        repo.fail_saves(true);

        assert!(repo.save_all(&[]).is_err());
        assert_eq!(repo.lines().len(), 1);
    }
}
