use crate::{
    configuration::Configuration, configuration_handler::ConfigurationHandler,
    file_bookings::FileBookings, http::create_app, local_bookings::LocalBookings,
};
use axum::Router;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod backend;
mod configuration;
mod configuration_handler;
#[cfg(feature = "postgres")]
mod database_interface;
mod error;
mod file_bookings;
mod http;
mod local_bookings;
mod notification;
#[cfg(feature = "postgres")]
mod schema;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let address = format!("{}:{}", configuration.host(), configuration.port());
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Booking service listening on {address}");

    let app = build_app(configuration).await;
    axum::serve(listener, app).await
}

#[cfg(feature = "postgres")]
async fn build_app(configuration: ConfigurationHandler) -> Router {
    use crate::database_interface::DatabaseInterface;
    use std::time::Duration;
    use tokio::time::sleep;
    use tracing::error;

    let Some(database_url) = configuration.database_url() else {
        return build_local_app(configuration);
    };

    let backend = loop {
        match DatabaseInterface::new(&database_url) {
            Ok(backend) => {
                info!("Successfully connected to database");
                break backend;
            }
            Err(err) => {
                error!(?err, "Failed to establish database connection. Retry in 1 sec. Unset DATABASE_URL to store bookings in a file instead.");
                sleep(Duration::from_secs(1)).await;
            }
        }
    };
    create_app(backend, configuration)
}

#[cfg(not(feature = "postgres"))]
async fn build_app(configuration: ConfigurationHandler) -> Router {
    if configuration.database_url().is_some() {
        warn!("DATABASE_URL is ignored, the service was built without the `postgres` feature");
    }
    build_local_app(configuration)
}

fn build_local_app(configuration: ConfigurationHandler) -> Router {
    match configuration.bookings_file() {
        Some(path) => {
            info!(path = %path.display(), "Storing bookings in file");
            create_app(FileBookings::new(path), configuration)
        }
        None => {
            warn!("Storing bookings in memory, they are lost on restart");
            create_app(LocalBookings::default(), configuration)
        }
    }
}
