//! Field-level validation of submitted components.
//!
//! Rules are an explicit value ([`ValidationRules`]) injected into the
//! service, not a process-wide validator.

pub mod rules;

pub use rules::{FieldViolation, ValidationRules};
