//! In-process component store.
//!
//! Documents are kept as JSON objects in insertion order, which is the
//! store's native listing order. Merge semantics match the PostgreSQL
//! store: a partial document replaces top-level keys only.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::{Map, Value};
use tokio::sync::RwLock;
use vuement_core::component::{Component, ComponentDocument};
use vuement_core::context::RequestContext;
use vuement_core::error::CoreError;
use vuement_core::policy::CleanedDocument;
use vuement_core::store::{ComponentStore, COMPONENT_ENTITY};
use vuement_core::types::{parse_id, DbId};

/// Thread-safe via interior `RwLock`; share it behind an `Arc`.
#[derive(Debug, Default)]
pub struct MemoryComponentStore {
    documents: RwLock<IndexMap<DbId, Map<String, Value>>>,
}

impl MemoryComponentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.documents.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.read().await.is_empty()
    }
}

fn materialize(id: DbId, fields: &Map<String, Value>) -> Result<Component, CoreError> {
    let document: ComponentDocument =
        serde_json::from_value(Value::Object(fields.clone())).map_err(CoreError::store)?;
    Ok(Component::new(id, document))
}

fn not_found(id: &str) -> CoreError {
    CoreError::NotFound {
        entity: COMPONENT_ENTITY,
        id: id.to_string(),
    }
}

#[async_trait]
impl ComponentStore for MemoryComponentStore {
    async fn create(
        &self,
        ctx: &RequestContext,
        document: CleanedDocument,
    ) -> Result<Component, CoreError> {
        ctx.run(async {
            let id = DbId::now_v7();
            let mut documents = self.documents.write().await;
            documents.insert(id, document.into_fields());

            let stored = documents.get(&id).ok_or_else(|| {
                CoreError::InsertError(format!("inserted id {id} could not be resolved"))
            })?;
            materialize(id, stored)
        })
        .await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        partial: CleanedDocument,
    ) -> Result<Component, CoreError> {
        let oid = parse_id(id)?;
        ctx.run(async {
            let mut documents = self.documents.write().await;
            let stored = documents.get_mut(&oid).ok_or_else(|| not_found(id))?;
            for (key, value) in partial.into_fields() {
                stored.insert(key, value);
            }
            materialize(oid, stored)
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), CoreError> {
        let oid = parse_id(id)?;
        ctx.run(async {
            match self.documents.write().await.shift_remove(&oid) {
                Some(_) => Ok(()),
                None => Err(CoreError::NothingDeleted {
                    entity: COMPONENT_ENTITY,
                    id: id.to_string(),
                }),
            }
        })
        .await
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Component, CoreError> {
        let oid = parse_id(id)?;
        ctx.run(async {
            let documents = self.documents.read().await;
            let stored = documents.get(&oid).ok_or_else(|| not_found(id))?;
            materialize(oid, stored)
        })
        .await
    }

    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Component>, CoreError> {
        ctx.run(async {
            let documents = self.documents.read().await;
            documents
                .iter()
                .map(|(id, fields)| materialize(*id, fields))
                .collect()
        })
        .await
    }

    async fn ping(&self, ctx: &RequestContext) -> Result<(), CoreError> {
        ctx.run(async { Ok(()) }).await
    }
}
