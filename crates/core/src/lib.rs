//! Domain layer for the Vuement component service.
//!
//! Holds the component model, the validation and write-policy pipeline,
//! the document store contract and the service that ties them together.
//! Nothing in here knows about HTTP or a concrete database driver.

pub mod component;
pub mod context;
pub mod error;
pub mod permissions;
pub mod policy;
pub mod service;
pub mod store;
pub mod types;
pub mod validation;
