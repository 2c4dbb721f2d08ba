use crate::backend::{BookingBackend, Reservation};
use crate::configuration::Configuration;
use crate::error::AppError;
use crate::notification::BookingNotifier;
use crate::types::{Booking, NewBooking};
use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{extract::State, http::StatusCode, Form, Json};
use axum::{routing::get, Router};
use serde::Deserialize;
use tokio::task::spawn_blocking;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use validator::Validate;

#[derive(Clone)]
pub struct AppState<T: BookingBackend> {
    backend: T,
    notifier: BookingNotifier,
}

/// Booking submission as sent by the client, either JSON or a form.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct BookingRequest {
    #[validate(required, length(min = 1))]
    name: Option<String>,
    #[validate(required, length(min = 1))]
    email: Option<String>,
    #[validate(required, length(min = 1))]
    selected_time: Option<String>,
}

impl TryFrom<BookingRequest> for NewBooking {
    type Error = AppError;

    fn try_from(request: BookingRequest) -> Result<Self, Self::Error> {
        request
            .validate()
            .map_err(|err| AppError::Validation(err.to_string()))?;

        let BookingRequest {
            name: Some(name),
            email: Some(email),
            selected_time: Some(selected_time),
        } = request
        else {
            return Err(AppError::Validation("missing field".into()));
        };

        Ok(NewBooking {
            name,
            email,
            selected_time,
        })
    }
}

#[async_trait]
impl<S> FromRequest<S> for BookingRequest
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = request
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(booking_request) = Form::<BookingRequest>::from_request(request, state)
                .await
                .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
            Ok(booking_request)
        } else if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(request, state)
                .await
                .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
            read_multipart(multipart).await
        } else if content_type.is_empty() {
            // Clients that omit the header still send JSON
            let body = Bytes::from_request(request, state)
                .await
                .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
            serde_json::from_slice(&body).map_err(|err| AppError::Validation(err.to_string()))
        } else {
            let Json(booking_request) = Json::<BookingRequest>::from_request(request, state)
                .await
                .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
            Ok(booking_request)
        }
    }
}

async fn read_multipart(mut multipart: Multipart) -> Result<BookingRequest, AppError> {
    let mut booking_request = BookingRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::Validation(err.body_text()))?
    {
        let value = match field.name() {
            Some("name") => &mut booking_request.name,
            Some("email") => &mut booking_request.email,
            Some("selected_time") => &mut booking_request.selected_time,
            _ => continue,
        };
        *value = Some(
            field
                .text()
                .await
                .map_err(|err| AppError::Validation(err.body_text()))?,
        );
    }
    Ok(booking_request)
}

pub fn create_app<T: BookingBackend, C: Configuration>(backend: T, configuration: C) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let state = AppState {
        backend,
        notifier: BookingNotifier::new(configuration.notification_url()),
    };

    Router::new()
        .route(
            "/api/bookings",
            get(get_bookings::<T>).post(create_booking::<T>),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

async fn get_bookings<T: BookingBackend>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<Booking>>, AppError> {
    let backend = state.backend.clone();
    let bookings = spawn_blocking(move || backend.bookings()).await??;
    Ok(Json(bookings))
}

async fn create_booking<T: BookingBackend>(
    State(state): State<AppState<T>>,
    booking_request: BookingRequest,
) -> Result<(StatusCode, Json<Booking>), AppError> {
    let candidate = NewBooking::try_from(booking_request)?;

    let backend = state.backend.clone();
    match spawn_blocking(move || backend.try_reserve(candidate)).await?? {
        Reservation::Reserved(booking) => {
            state.notifier.notify(&booking);
            Ok((StatusCode::CREATED, Json(booking)))
        }
        Reservation::SlotConflict => Err(AppError::SlotConflict),
    }
}
