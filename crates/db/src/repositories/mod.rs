//! Repository layer.
//!
//! Each repository wraps a `PgPool` and implements a store trait from
//! `vuement-core`.

pub mod component_repo;

pub use component_repo::PgComponentStore;
