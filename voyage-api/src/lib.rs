use axum::{http::Method, routing::get, Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use voyage_shared::ApiResponse;

pub mod accounts;
pub mod catalog;
pub mod crud;
pub mod dashboard;
pub mod error;
pub mod invoices;
pub mod reservations;
pub mod state;
pub mod travel_plans;

pub use error::AppError;
pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // The SPA is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT]);

    Router::new()
        .route("/health", get(health))
        .merge(accounts::routes())
        .merge(catalog::routes())
        .merge(reservations::routes())
        .merge(invoices::routes())
        .merge(travel_plans::routes())
        .merge(dashboard::routes())
        .fallback(not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<ApiResponse<serde_json::Value>> {
    Json(ApiResponse::ok(json!({ "status": "ok" })))
}

async fn not_found() -> AppError {
    AppError::NotFoundError("Route not found".to_string())
}
