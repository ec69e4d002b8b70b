//! Handlers for the `/vuement/component` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use vuement_core::component::{Component, ComponentInput};

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::guard::{CreateComponent, DeleteComponent, Guarded, UpdateComponent};
use crate::state::AppState;

/// GET /vuement/component
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Component>>> {
    let ctx = state.request_context();
    let components = state.components.get_all(&ctx).await?;
    Ok(Json(components))
}

/// GET /vuement/component/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<Json<Component>> {
    let ctx = state.request_context();
    let component = state.components.get_by_id(&ctx, &id).await?;
    Ok(Json(component))
}

/// POST /vuement/component
///
/// Requires group `admin` and permission `vuement.create`.
pub async fn create(
    guard: Guarded<CreateComponent>,
    State(state): State<AppState>,
    AppJson(input): AppJson<ComponentInput>,
) -> AppResult<(StatusCode, Json<Component>)> {
    let ctx = state.request_context();
    let component = state.components.create(&ctx, input).await?;

    tracing::info!(
        id = %component.id,
        subject = %guard.user.subject,
        "Component created via API",
    );

    Ok((StatusCode::CREATED, Json(component)))
}

/// PATCH /vuement/component/{id}
///
/// Requires group `admin` and permission `vuement.update`.
pub async fn update(
    guard: Guarded<UpdateComponent>,
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
    AppJson(input): AppJson<ComponentInput>,
) -> AppResult<Json<Component>> {
    let ctx = state.request_context();
    let component = state.components.update(&ctx, &id, input).await?;

    tracing::info!(id = %component.id, subject = %guard.user.subject, "Component updated via API");

    Ok(Json(component))
}

/// DELETE /vuement/component/{id}
///
/// Requires group `admin` and permission `vuement.delete`.
pub async fn delete(
    guard: Guarded<DeleteComponent>,
    State(state): State<AppState>,
    AppPath(id): AppPath<String>,
) -> AppResult<StatusCode> {
    let ctx = state.request_context();
    state.components.delete(&ctx, &id).await?;

    tracing::info!(id = %id, subject = %guard.user.subject, "Component deleted via API");

    Ok(StatusCode::NO_CONTENT)
}
