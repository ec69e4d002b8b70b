pub mod component;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /vuement/component          list (public), create (admin + vuement.create)
/// /vuement/component/{id}     get (public), update (admin + vuement.update),
///                             delete (admin + vuement.delete)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/vuement/component", component::router())
}
