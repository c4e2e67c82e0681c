use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Utc};
use serde::Deserialize;
use voyage_booking::finance::count_by_status;
use voyage_booking::{DashboardSummary, RevenueReport};
use voyage_shared::ApiResponse;

use crate::error::{AppError, AppQuery};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/dashboard/revenue", get(revenue_report))
        .route("/api/dashboard/summary", get(summary))
}

#[derive(Debug, Deserialize)]
pub struct RevenueQuery {
    /// Defaults to the current year
    pub year: Option<i32>,
}

/// GET /api/dashboard/revenue?year=
pub async fn revenue_report(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RevenueQuery>,
) -> Result<Json<ApiResponse<RevenueReport>>, AppError> {
    let year = query.year.unwrap_or_else(|| Utc::now().year());
    let invoices = state.invoices.list().await?;
    let report = RevenueReport::build(year, &state.business_rules.currency, &invoices);
    Ok(Json(ApiResponse::ok(report)))
}

/// GET /api/dashboard/summary
pub async fn summary(State(state): State<AppState>) -> Result<Json<ApiResponse<DashboardSummary>>, AppError> {
    let reservations = state.reservations.list().await?;

    let summary = DashboardSummary {
        clients: state.clients.list().await?.len(),
        flights: state.flights.list().await?.len(),
        accommodations: state.accommodations.list().await?.len(),
        vehicles: state.vehicles.list().await?.len(),
        activities: state.activities.list().await?.len(),
        reservations: reservations.len(),
        reservations_by_status: count_by_status(&reservations),
        invoices: state.invoices.list().await?.len(),
        travel_plans: state.travel_plans.list().await?.len(),
        users: state.users.list().await?.len(),
    };
    Ok(Json(ApiResponse::ok(summary)))
}
