//! Group + permission gate for mutating routes.
//!
//! [`Guarded<G>`] wraps [`AuthUser`] and rejects the request unless the
//! caller satisfies `G::REQUIREMENT`. Because it is an extractor placed
//! before the body, a denied request never reaches the handler.
//!
//! ```ignore
//! async fn create(guard: Guarded<CreateComponent>) -> AppResult<Json<()>> {
//!     tracing::info!(subject = %guard.user.subject, "allowed");
//!     Ok(Json(()))
//! }
//! ```

use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use vuement_core::permissions::{self, authorize, Requirement};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// A route-level authorization requirement.
pub trait RouteGuard {
    const REQUIREMENT: Requirement;
}

/// `admin` + `vuement.create`.
pub struct CreateComponent;

impl RouteGuard for CreateComponent {
    const REQUIREMENT: Requirement = permissions::CREATE_COMPONENT;
}

/// `admin` + `vuement.update`.
pub struct UpdateComponent;

impl RouteGuard for UpdateComponent {
    const REQUIREMENT: Requirement = permissions::UPDATE_COMPONENT;
}

/// `admin` + `vuement.delete`.
pub struct DeleteComponent;

impl RouteGuard for DeleteComponent {
    const REQUIREMENT: Requirement = permissions::DELETE_COMPONENT;
}

/// An authenticated caller that satisfied `G`.
pub struct Guarded<G> {
    pub user: AuthUser,
    _guard: PhantomData<G>,
}

impl<G> FromRequestParts<AppState> for Guarded<G>
where
    G: RouteGuard + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;

        if let Err(e) = authorize(G::REQUIREMENT, &user.groups, &user.permissions) {
            tracing::warn!(
                subject = %user.subject,
                group = G::REQUIREMENT.group,
                permission = G::REQUIREMENT.permission,
                "Request denied by route guard",
            );
            return Err(AppError::Core(e));
        }

        Ok(Guarded {
            user,
            _guard: PhantomData,
        })
    }
}
