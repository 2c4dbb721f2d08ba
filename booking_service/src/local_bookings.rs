use crate::{
    backend::{reserve_slot, BookingBackend, Reservation, StorageError},
    types::{Booking, NewBooking},
};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::info;

/// Non-persistent store, lost on restart.
#[derive(Debug, Clone, Default)]
pub struct LocalBookings {
    bookings: Arc<Mutex<Vec<Booking>>>,
}

impl BookingBackend for LocalBookings {
    fn bookings(&self) -> Result<Vec<Booking>, StorageError> {
        Ok(self
            .bookings
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone())
    }

    fn try_reserve(&self, candidate: NewBooking) -> Result<Reservation, StorageError> {
        let mut bookings = self.bookings.lock().unwrap_or_else(PoisonError::into_inner);
        let reservation = reserve_slot(&mut bookings, candidate)?;
        if let Reservation::Reserved(booking) = &reservation {
            info!(id = booking.id, selected_time = %booking.selected_time, "Slot reserved");
        }
        Ok(reservation)
    }
}
