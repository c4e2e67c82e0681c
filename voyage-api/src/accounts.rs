use axum::Router;
use voyage_shared::{Client, User};

use crate::crud;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    crud::routes::<Client>("/api/clients")
        // Django-style detail route kept for older front-end builds
        .route("/api/client/{pk}", crud::item_methods::<Client>())
        .merge(crud::routes::<User>("/api/users"))
}
