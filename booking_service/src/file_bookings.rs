//! Bookings persisted as one JSON array in a single file.
//!
//! Every reservation reads the whole file, checks for a conflict and writes the
//! whole file back while holding the instance lock. Clones share the lock, so all
//! handlers of one process must use clones of the same instance. Writes go to a
//! temporary file in the target directory which is then renamed over the target,
//! so a failed write leaves the previous collection in place.

use crate::{
    backend::{reserve_slot, BookingBackend, Reservation, StorageError},
    types::{Booking, NewBooking},
};
use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};
use tempfile::NamedTempFile;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct FileBookings {
    path: Arc<PathBuf>,
    lock: Arc<Mutex<()>>,
}

impl FileBookings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
            lock: Arc::default(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file is an empty collection.
    fn load(&self) -> Result<Vec<Booking>, StorageError> {
        match fs::read(self.path()) {
            Ok(content) => Ok(serde_json::from_slice(&content)?),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %self.path().display(), "No bookings file yet");
                Ok(vec![])
            }
            Err(err) => Err(err.into()),
        }
    }

    fn store(&self, bookings: &[Booking]) -> Result<(), StorageError> {
        let directory = match self.path().parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut file = NamedTempFile::new_in(directory)?;
        serde_json::to_writer_pretty(&mut file, bookings)?;
        file.as_file().sync_all()?;
        file.persist(self.path()).map_err(|err| err.error)?;
        Ok(())
    }
}

impl BookingBackend for FileBookings {
    fn bookings(&self) -> Result<Vec<Booking>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        self.load()
    }

    fn try_reserve(&self, candidate: NewBooking) -> Result<Reservation, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);

        let mut bookings = self.load()?;
        let reservation = reserve_slot(&mut bookings, candidate)?;
        if let Reservation::Reserved(booking) = &reservation {
            self.store(&bookings)?;
            info!(id = booking.id, selected_time = %booking.selected_time, "Slot reserved");
        }
        Ok(reservation)
    }
}
