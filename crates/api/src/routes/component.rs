//! Route definitions for the `/vuement/component` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::component;
use crate::state::AppState;

/// Routes mounted at `/vuement/component`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PATCH  /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(component::list).post(component::create))
        .route(
            "/{id}",
            get(component::get_by_id)
                .patch(component::update)
                .delete(component::delete),
        )
}
