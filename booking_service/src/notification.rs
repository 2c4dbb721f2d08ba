//! Best-effort relay of new bookings to an external webhook.
//!
//! Relaying runs detached from the request that created the booking. Its
//! failures are logged and dropped.

use crate::types::Booking;
use reqwest::Client;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Default)]
pub struct BookingNotifier {
    client: Client,
    url: Option<String>,
}

impl BookingNotifier {
    pub fn new(url: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(NOTIFICATION_TIMEOUT)
            .build()
            .unwrap_or_else(|err| {
                warn!(?err, "Failed to build notification client, falling back to defaults");
                Client::new()
            });
        Self { client, url }
    }

    /// Spawns the relay of `booking`. Returns `None` if no webhook is configured.
    pub fn notify(&self, booking: &Booking) -> Option<JoinHandle<()>> {
        let url = self.url.clone()?;
        let client = self.client.clone();
        let booking = booking.clone();

        Some(tokio::spawn(async move {
            let result = client
                .post(&url)
                .json(&booking)
                .send()
                .await
                .and_then(|response| response.error_for_status());

            match result {
                Ok(_) => info!(id = booking.id, "Booking notification delivered"),
                Err(err) => warn!(?err, id = booking.id, "Booking notification failed"),
            }
        }))
    }
}
