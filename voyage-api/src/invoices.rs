use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;
use voyage_booking::{GenerateRequest, Invoice, InvoiceGenerator, Reservation};
use voyage_core::CoreError;
use voyage_shared::{ApiResponse, Client};

use crate::crud;
use crate::error::{AppError, AppJson};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/factures", get(crud::list::<Invoice>).post(generate_invoice))
        .route("/api/factures/{id}", crud::item_methods::<Invoice>())
}

/// Reservation named by a generate request, with its client.
pub(crate) async fn source_reservation(
    state: &AppState,
    request: &GenerateRequest,
) -> Result<(Reservation, Client), AppError> {
    let reservation_id = request.reservation_id.trim();
    if reservation_id.is_empty() {
        return Err(CoreError::validation("reservation_id is required").into());
    }
    let reservation = state.reservations.find(reservation_id).await?;
    let client = state.clients.find(&reservation.client_id).await?;
    Ok((reservation, client))
}

/// POST /api/factures
pub async fn generate_invoice(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Invoice>>), AppError> {
    let (reservation, client) = source_reservation(&state, &request).await?;

    let rules = &state.business_rules;
    let generator = InvoiceGenerator::new(rules.tax_rate, rules.invoice_due_days, rules.currency.clone());
    let invoice = generator.generate(&reservation, &client, request.notes)?;
    let saved = state.invoices.insert(invoice).await?;

    info!(
        invoice_id = %saved.id,
        number = %saved.number,
        reservation_id = %saved.reservation_id,
        total = saved.total_cents,
        "invoice issued"
    );

    let message = format!("Invoice {} issued", saved.number);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(saved).with_message(message))))
}
