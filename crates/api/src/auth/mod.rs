//! Caller identity.
//!
//! - [`jwt`] -- HS256 access-token validation (and issuance, for tooling and
//!   tests). Tokens carry the caller's groups and permissions.

pub mod jwt;
