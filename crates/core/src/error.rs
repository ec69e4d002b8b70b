use crate::validation::FieldViolation;

/// Every failure the component pipeline can surface.
///
/// The kinds stay distinct all the way to the HTTP layer, which is the only
/// place they are turned into status codes.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {}", describe_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Nothing deleted: no {entity} with id {id}")]
    NothingDeleted { entity: &'static str, id: String },

    /// The store accepted a write but the identifier it returned could not
    /// be resolved back to a document.
    #[error("Insert error: {0}")]
    InsertError(String),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Operation timed out")]
    Timeout,

    /// Transport or driver failure inside the document store.
    #[error("Store error: {0}")]
    Store(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Wrap a driver error as a store transport failure.
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Store(Box::new(err))
    }

    /// Field paths named by a validation failure, empty for other kinds.
    pub fn violated_fields(&self) -> Vec<&str> {
        match self {
            Self::Validation(violations) => violations.iter().map(|v| v.field.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

fn describe_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} ({})", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}
