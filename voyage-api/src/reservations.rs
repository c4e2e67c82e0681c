use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use tracing::info;
use voyage_booking::{BookingDraft, Quote, Reservation, ReservationRequest, ReservationStatus};
use voyage_core::CoreError;
use voyage_shared::ApiResponse;

use crate::crud;
use crate::error::{AppError, AppJson, AppPath};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/reservations", get(crud::list::<Reservation>).post(create_reservation))
        .route("/api/reservations/quote", post(quote_reservation))
        .route("/api/reservations/{id}", crud::item_methods::<Reservation>())
        .route("/api/reservations/{id}/reprice", post(reprice_reservation))
}

/// Resolves every id in the request against the collections.
async fn build_draft(state: &AppState, request: ReservationRequest) -> Result<BookingDraft, AppError> {
    let client_id = request.client_id.trim();
    if client_id.is_empty() {
        return Err(CoreError::validation("client_id is required").into());
    }
    let client = state.clients.find(client_id).await?;

    let mut draft = BookingDraft::new(client, request.travelers);
    for id in &request.flight_ids {
        draft.add_flight(state.flights.find(id).await?);
    }
    for stay in request.stays {
        let accommodation = state.accommodations.find(&stay.accommodation_id).await?;
        draft.add_stay(accommodation, stay.check_in, stay.check_out, stay.rooms);
    }
    for rental in request.rentals {
        let vehicle = state.vehicles.find(&rental.vehicle_id).await?;
        draft.add_rental(vehicle, rental.pickup_date, rental.return_date);
    }
    for booked in request.activities {
        let activity = state.activities.find(&booked.activity_id).await?;
        draft.add_activity(activity, booked.date, booked.participants);
    }
    draft.set_notes(request.notes);
    Ok(draft)
}

/// POST /api/reservations
pub async fn create_reservation(
    State(state): State<AppState>,
    AppJson(request): AppJson<ReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Reservation>>), AppError> {
    let draft = build_draft(&state, request).await?;
    let reservation = draft.into_reservation(&state.business_rules.currency)?;
    let saved = state.reservations.insert(reservation).await?;

    info!(
        reservation_id = %saved.id,
        client_id = %saved.client_id,
        total = saved.total_price_cents,
        "reservation created"
    );

    let message = format!("Reservation {} created", saved.id);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(saved).with_message(message))))
}

/// POST /api/reservations/quote
///
/// Prices a booking without storing it.
pub async fn quote_reservation(
    State(state): State<AppState>,
    AppJson(request): AppJson<ReservationRequest>,
) -> Result<Json<ApiResponse<Quote>>, AppError> {
    let draft = build_draft(&state, request).await?;
    Ok(Json(ApiResponse::ok(draft.quote()?)))
}

/// POST /api/reservations/{id}/reprice
///
/// Rebuilds the lines from the current catalog prices, keeping the booked dates.
pub async fn reprice_reservation(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<Reservation>>, AppError> {
    let mut reservation = state.reservations.find(&id).await?;
    if reservation.status == ReservationStatus::Cancelled {
        return Err(CoreError::Conflict(format!("reservation {} is cancelled", id)).into());
    }

    let draft = build_draft(&state, reservation.to_request()).await?;
    let quote = draft.quote()?;
    let previous = reservation.total_price_cents;

    reservation.lines = quote.lines;
    reservation.total_price_cents = quote.total_price_cents;
    reservation.updated_at = Utc::now();
    let saved = state.reservations.update(reservation).await?;

    info!(reservation_id = %id, previous, total = saved.total_price_cents, "reservation repriced");
    Ok(Json(ApiResponse::ok(saved).with_message(format!("Reservation {} repriced", id))))
}
