use super::{Record, Repository};
use crate::error::StoreError;
use crate::log::STORAGE;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::PathBuf;
use tracing::debug;

///
/// Stores one record per line in a text file.
///
/// Saving rewrites the whole file. A crash mid-write can leave a truncated file.
///
#[derive(Debug)]
pub struct FileRepository<T> {
    path: PathBuf,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> FileRepository<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _record: PhantomData,
        }
    }

    fn io_error(&self, source: io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl<T: Record> Repository<T> for FileRepository<T> {
    fn load_all(&self) -> Result<Vec<T>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(target: STORAGE, msg = "No store file yet", kind = T::KIND, path = ?self.path);
                return Ok(Vec::new());
            }
            Err(err) => return Err(self.io_error(err)),
        };

        let records = contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(index, line)| {
                let record = T::decode(line);
                if record.is_none() {
                    debug!(
                        target: STORAGE,
                        msg = "Skipping malformed record",
                        kind = T::KIND,
                        line = index + 1
                    );
                }
                record
            })
            .collect::<Vec<_>>();

        debug!(target: STORAGE, msg = "Loaded records", kind = T::KIND, count = records.len());

        Ok(records)
    }

    fn save_all(&self, records: &[T]) -> Result<(), StoreError> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| self.io_error(err))?;
        }

        let mut contents = String::new();
        for record in records {
            contents.push_str(&record.encode());
            contents.push('\n');
        }

        fs::write(&self.path, contents).map_err(|err| self.io_error(err))?;

        debug!(target: STORAGE, msg = "Saved records", kind = T::KIND, count = records.len());

        Ok(())
    }
}
