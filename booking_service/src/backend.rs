use crate::types::{Booking, NewBooking};
use thiserror::Error;

/// Outcome of a reservation attempt that reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reservation {
    Reserved(Booking),
    SlotConflict,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to access stored bookings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode or decode stored bookings: {0}")]
    Encoding(#[from] serde_json::Error),
    #[error("no booking id left after {0}")]
    IdsExhausted(i64),
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(String),
}

/// Durable keeper of the booking collection.
///
/// `try_reserve` must treat read, conflict check and write as one unit: of two
/// concurrent calls for the same `selected_time` exactly one may return
/// [`Reservation::Reserved`].
pub trait BookingBackend: Clone + Send + Sync + 'static {
    fn bookings(&self) -> Result<Vec<Booking>, StorageError>;
    fn try_reserve(&self, candidate: NewBooking) -> Result<Reservation, StorageError>;
}

/// Appends `candidate` to `bookings` unless its slot is already taken.
///
/// Callers hold the lock guarding `bookings` for the whole call. `bookings` is
/// only modified on [`Reservation::Reserved`].
pub fn reserve_slot(
    bookings: &mut Vec<Booking>,
    candidate: NewBooking,
) -> Result<Reservation, StorageError> {
    if bookings
        .iter()
        .any(|booking| booking.selected_time == candidate.selected_time)
    {
        return Ok(Reservation::SlotConflict);
    }

    let largest_id = bookings.iter().map(|booking| booking.id).max().unwrap_or(0);
    let next_id = largest_id
        .checked_add(1)
        .ok_or(StorageError::IdsExhausted(largest_id))?;
    let booking = candidate.with_id(next_id);
    bookings.push(booking.clone());
    Ok(Reservation::Reserved(booking))
}
