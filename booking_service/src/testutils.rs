use std::{
    io,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use crate::{
    backend::{reserve_slot, BookingBackend, Reservation, StorageError},
    configuration::Configuration,
    types::{Booking, NewBooking},
};

pub struct MockBookingBackendInner {
    pub success: AtomicBool,
    pub calls_to_bookings: AtomicU64,
    pub calls_to_try_reserve: AtomicU64,
    pub bookings: Mutex<Vec<Booking>>,
}

#[derive(Clone)]
pub struct MockBookingBackend(pub Arc<MockBookingBackendInner>);

impl MockBookingBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_bookings: AtomicU64::default(),
            calls_to_try_reserve: AtomicU64::default(),
            bookings: Mutex::default(),
        }
    }
}

impl MockBookingBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockBookingBackendInner::new()))
    }

    fn result(&self) -> Result<(), StorageError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(StorageError::Io(io::Error::other("Supposed to fail"))),
        }
    }
}

impl BookingBackend for MockBookingBackend {
    fn bookings(&self) -> Result<Vec<Booking>, StorageError> {
        self.0.calls_to_bookings.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        Ok(self.0.bookings.lock().unwrap().clone())
    }

    fn try_reserve(&self, candidate: NewBooking) -> Result<Reservation, StorageError> {
        self.0.calls_to_try_reserve.fetch_add(1, Ordering::SeqCst);
        self.result()?;
        reserve_slot(&mut self.0.bookings.lock().unwrap(), candidate)
    }
}

#[derive(Clone, Default)]
pub struct TestConfiguration {
    pub notification_url: Option<String>,
}

impl Configuration for TestConfiguration {
    fn host(&self) -> String {
        "127.0.0.1".into()
    }

    fn port(&self) -> u16 {
        0
    }

    fn bookings_file(&self) -> Option<PathBuf> {
        None
    }

    fn database_url(&self) -> Option<String> {
        None
    }

    fn notification_url(&self) -> Option<String> {
        self.notification_url.clone()
    }
}
