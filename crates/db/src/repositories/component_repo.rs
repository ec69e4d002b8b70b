//! Repository for the `vuement_components` table.
//!
//! Each row is one component document: the identifier in `id`, every other
//! field in the JSONB `doc` column. Updates merge the partial document into
//! `doc` with `||`, which replaces top-level keys and leaves the rest alone.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use vuement_core::component::{Component, ComponentDocument};
use vuement_core::context::RequestContext;
use vuement_core::error::CoreError;
use vuement_core::policy::CleanedDocument;
use vuement_core::store::{ComponentStore, COMPONENT_ENTITY};
use vuement_core::types::{parse_id, DbId};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, doc";

#[derive(Debug, FromRow)]
struct ComponentRow {
    id: DbId,
    doc: Json<ComponentDocument>,
}

impl From<ComponentRow> for Component {
    fn from(row: ComponentRow) -> Self {
        Component::new(row.id, row.doc.0)
    }
}

/// PostgreSQL-backed [`ComponentStore`].
#[derive(Debug, Clone)]
pub struct PgComponentStore {
    pool: PgPool,
}

impl PgComponentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find(&self, id: DbId) -> Result<Option<Component>, CoreError> {
        let query = format!("SELECT {COLUMNS} FROM vuement_components WHERE id = $1");
        let row = sqlx::query_as::<_, ComponentRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(CoreError::store)?;
        Ok(row.map(Component::from))
    }
}

#[async_trait]
impl ComponentStore for PgComponentStore {
    async fn create(
        &self,
        ctx: &RequestContext,
        document: CleanedDocument,
    ) -> Result<Component, CoreError> {
        ctx.run(async {
            let inserted: Option<DbId> =
                sqlx::query_scalar("INSERT INTO vuement_components (doc) VALUES ($1) RETURNING id")
                    .bind(Json(document.into_value()))
                    .fetch_optional(&self.pool)
                    .await
                    .map_err(CoreError::store)?;

            let id = inserted.ok_or_else(|| {
                CoreError::InsertError("insert returned no identifier".to_string())
            })?;

            self.find(id).await?.ok_or_else(|| {
                tracing::error!(%id, "Inserted component could not be read back");
                CoreError::InsertError(format!("inserted id {id} could not be resolved"))
            })
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
            let query = format!(
                "UPDATE vuement_components SET doc = doc || $2
                 WHERE id = $1
                 RETURNING {COLUMNS}"
            );
            let row = sqlx::query_as::<_, ComponentRow>(&query)
                .bind(oid)
                .bind(Json(partial.into_value()))
                .fetch_optional(&self.pool)
                .await
                .map_err(CoreError::store)?;

            row.map(Component::from).ok_or_else(|| CoreError::NotFound {
                entity: COMPONENT_ENTITY,
                id: id.to_string(),
            })
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), CoreError> {
        let oid = parse_id(id)?;
        ctx.run(async {
            let result = sqlx::query("DELETE FROM vuement_components WHERE id = $1")
                .bind(oid)
                .execute(&self.pool)
                .await
                .map_err(CoreError::store)?;

            if result.rows_affected() == 0 {
                return Err(CoreError::NothingDeleted {
                    entity: COMPONENT_ENTITY,
                    id: id.to_string(),
                });
            }
            Ok(())
        })
        .await
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Component, CoreError> {
        let oid = parse_id(id)?;
        ctx.run(async {
            self.find(oid).await?.ok_or_else(|| CoreError::NotFound {
                entity: COMPONENT_ENTITY,
                id: id.to_string(),
            })
        })
        .await
    }

    /// No `ORDER BY`: rows come back in whatever order PostgreSQL scans them.
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Component>, CoreError> {
        ctx.run(async {
            let query = format!("SELECT {COLUMNS} FROM vuement_components");
            let rows = sqlx::query_as::<_, ComponentRow>(&query)
                .fetch_all(&self.pool)
                .await
                .map_err(CoreError::store)?;
            Ok(rows.into_iter().map(Component::from).collect())
        })
        .await
    }

    async fn ping(&self, ctx: &RequestContext) -> Result<(), CoreError> {
        ctx.run(async { crate::health_check(&self.pool).await.map_err(CoreError::store) })
            .await
    }
}
