//! Handlers shared by every collection: list with `?search=`, fetch, create, merge-update
//! (PUT and PATCH behave the same) and delete.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, MethodRouter},
    Json, Router,
};
use serde::Deserialize;
use tracing::info;
use voyage_core::{Creatable, Entity, Patchable};
use voyage_shared::ApiResponse;

use crate::error::{AppError, AppJson, AppPath, AppQuery};
use crate::state::{AppState, HasRepository};

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
}

/// GET /api/<collection>
pub async fn list<T>(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> Result<Json<ApiResponse<Vec<T>>>, AppError>
where
    T: Entity,
    AppState: HasRepository<T>,
{
    let repo = HasRepository::<T>::repository(&state);
    let items = match query.search.as_deref().map(str::trim) {
        Some(needle) if !needle.is_empty() => repo.search(needle).await?,
        _ => repo.list().await?,
    };
    Ok(Json(ApiResponse::ok(items)))
}

/// GET /api/<collection>/{id}
pub async fn get_one<T>(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<T>>, AppError>
where
    T: Entity,
    AppState: HasRepository<T>,
{
    let item = HasRepository::<T>::repository(&state).find(&id).await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// POST /api/<collection>
pub async fn create<T>(
    State(state): State<AppState>,
    AppJson(draft): AppJson<T::Draft>,
) -> Result<(StatusCode, Json<ApiResponse<T>>), AppError>
where
    T: Creatable,
    AppState: HasRepository<T>,
{
    let entity = T::create(draft)?;
    let saved = HasRepository::<T>::repository(&state).insert(entity).await?;
    info!(kind = T::KIND, id = saved.id(), "created");

    let message = format!("{} {} created", T::KIND, saved.id());
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(saved).with_message(message))))
}

/// PUT|PATCH /api/<collection>/{id}
pub async fn update<T>(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(patch): AppJson<T::Patch>,
) -> Result<Json<ApiResponse<T>>, AppError>
where
    T: Patchable,
    AppState: HasRepository<T>,
{
    let repo = HasRepository::<T>::repository(&state);
    let mut entity = repo.find(&id).await?;
    entity.apply(patch)?;
    let saved = repo.update(entity).await?;
    info!(kind = T::KIND, id = %id, "updated");

    Ok(Json(ApiResponse::ok(saved).with_message(format!("{} {} updated", T::KIND, id))))
}

/// DELETE /api/<collection>/{id}
pub async fn remove<T>(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> Result<Json<ApiResponse<T>>, AppError>
where
    T: Entity,
    AppState: HasRepository<T>,
{
    let removed = HasRepository::<T>::repository(&state).delete(&id).await?;
    info!(kind = T::KIND, id = %id, "deleted");

    Ok(Json(ApiResponse::ok(removed).with_message(format!("{} {} deleted", T::KIND, id))))
}

/// GET, PUT, PATCH and DELETE on a single item.
pub fn item_methods<T>() -> MethodRouter<AppState>
where
    T: Patchable,
    AppState: HasRepository<T>,
{
    get(get_one::<T>)
        .put(update::<T>)
        .patch(update::<T>)
        .delete(remove::<T>)
}

/// Full CRUD for a collection mounted at `path`.
pub fn routes<T>(path: &str) -> Router<AppState>
where
    T: Creatable + Patchable,
    AppState: HasRepository<T>,
{
    Router::new()
        .route(path, get(list::<T>).post(create::<T>))
        .route(&format!("{}/{{id}}", path), item_methods::<T>())
}
