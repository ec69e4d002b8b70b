//! Document store contract.
//!
//! Implementations live in `vuement-db`. The service only sees this trait,
//! so the backing store is chosen at startup.

use async_trait::async_trait;

use crate::component::Component;
use crate::context::RequestContext;
use crate::error::CoreError;
use crate::policy::CleanedDocument;

/// Entity name used in not-found style errors.
pub const COMPONENT_ENTITY: &str = "Component";

#[async_trait]
pub trait ComponentStore: Send + Sync {
    /// Persist a new document and return it as re-read from the store.
    ///
    /// Fails with [`CoreError::InsertError`] if the assigned identifier
    /// cannot be resolved back to a document.
    async fn create(
        &self,
        ctx: &RequestContext,
        document: CleanedDocument,
    ) -> Result<Component, CoreError>;

    /// Replace the top-level fields in `partial` on the stored document and
    /// return the result.
    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        partial: CleanedDocument,
    ) -> Result<Component, CoreError>;

    /// Remove a document. [`CoreError::NothingDeleted`] if none matched.
    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), CoreError>;

    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Component, CoreError>;

    /// All documents in the store's own order. Empty, never an error, when
    /// the collection is empty.
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Component>, CoreError>;

    /// Cheap liveness probe.
    async fn ping(&self, ctx: &RequestContext) -> Result<(), CoreError>;
}
