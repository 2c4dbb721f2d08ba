use crate::configuration::Configuration;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(version, about = "Reserve appointment slots over HTTP")]
pub struct ConfigurationHandler {
    /// Address to listen on
    #[arg(long, env = "BOOKING_HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(long, env = "BOOKING_PORT", default_value_t = 3000)]
    port: u16,

    /// JSON file holding all bookings
    #[arg(long, env = "BOOKINGS_FILE", default_value = "bookings.json")]
    bookings_file: PathBuf,

    /// Keep bookings in memory only (lost on restart)
    #[arg(long, env = "BOOKING_IN_MEMORY")]
    in_memory: bool,

    /// PostgreSQL connection URL, takes precedence over the bookings file
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Every new booking is posted as JSON to this URL
    #[arg(long, env = "NOTIFICATION_URL")]
    notification_url: Option<String>,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn host(&self) -> String {
        self.host.clone()
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn bookings_file(&self) -> Option<PathBuf> {
        (!self.in_memory).then(|| self.bookings_file.clone())
    }

    fn database_url(&self) -> Option<String> {
        self.database_url.clone()
    }

    fn notification_url(&self) -> Option<String> {
        self.notification_url.clone()
    }
}
