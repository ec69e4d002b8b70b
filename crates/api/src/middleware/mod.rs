//! Authentication and authorization extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a JWT Bearer token.
//! - [`guard::Guarded`] -- Requires a group and a permission before the
//!   handler body runs.

pub mod auth;
pub mod guard;
