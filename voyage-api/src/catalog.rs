use axum::Router;
use voyage_catalog::{Accommodation, Activity, Flight, Vehicle};

use crate::crud;
use crate::state::AppState;

/// Vols, hébergements, voitures and activités.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(crud::routes::<Flight>("/api/vols"))
        .merge(crud::routes::<Accommodation>("/api/hebergements"))
        .merge(crud::routes::<Vehicle>("/api/voitures"))
        .merge(crud::routes::<Activity>("/api/activites"))
}
