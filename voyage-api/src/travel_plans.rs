use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use tracing::info;
use voyage_booking::{build_travel_plan, GenerateRequest, TravelPlan};
use voyage_shared::ApiResponse;

use crate::crud;
use crate::error::{AppError, AppJson};
use crate::invoices::source_reservation;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/plans-voyage", get(crud::list::<TravelPlan>).post(generate_travel_plan))
        .route("/api/plans-voyage/{id}", crud::item_methods::<TravelPlan>())
}

/// POST /api/plans-voyage
pub async fn generate_travel_plan(
    State(state): State<AppState>,
    AppJson(request): AppJson<GenerateRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TravelPlan>>), AppError> {
    let (reservation, client) = source_reservation(&state, &request).await?;
    let plan = build_travel_plan(&reservation, &client, request.notes)?;
    let saved = state.travel_plans.insert(plan).await?;

    info!(plan_id = %saved.id, reservation_id = %saved.reservation_id, days = saved.days.len(), "travel plan generated");

    let message = format!("Travel plan {} generated", saved.id);
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(saved).with_message(message))))
}
