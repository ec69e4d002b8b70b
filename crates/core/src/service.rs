//! Component service: validation, cleaning, then the store.
//!
//! The service holds no state of its own. Rules, policy and store are
//! injected at construction and errors propagate unchanged.

use std::sync::Arc;

use crate::component::{Component, ComponentInput};
use crate::context::RequestContext;
use crate::error::CoreError;
use crate::policy::{Operation, WritePolicy};
use crate::store::ComponentStore;
use crate::validation::ValidationRules;

pub struct ComponentService {
    store: Arc<dyn ComponentStore>,
    rules: ValidationRules,
    policy: WritePolicy,
}

impl ComponentService {
    pub fn new(store: Arc<dyn ComponentStore>, rules: ValidationRules, policy: WritePolicy) -> Self {
        Self {
            store,
            rules,
            policy,
        }
    }

    /// Service over `store` with the default component rules and policy.
    pub fn with_defaults(store: Arc<dyn ComponentStore>) -> Self {
        Self::new(store, ValidationRules::component(), WritePolicy::component())
    }

    pub fn policy(&self) -> &WritePolicy {
        &self.policy
    }

    pub async fn create(
        &self,
        ctx: &RequestContext,
        input: ComponentInput,
    ) -> Result<Component, CoreError> {
        self.rules.validate(&input, Operation::Create)?;
        let document = self.policy.clean(&input, Operation::Create);

        let component = self.store.create(ctx, document).await?;
        tracing::info!(id = %component.id, name = %component.document.name, "Component created");
        Ok(component)
    }

    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: &str,
        input: ComponentInput,
    ) -> Result<Component, CoreError> {
        self.rules.validate(&input, Operation::Update)?;
        let partial = self.policy.clean(&input, Operation::Update);
        let written: Vec<String> = partial.fields().keys().cloned().collect();

        let component = self.store.update(ctx, id, partial).await?;
        tracing::info!(id = %component.id, fields = ?written, "Component updated");
        Ok(component)
    }

    pub async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), CoreError> {
        self.store.delete(ctx, id).await?;
        tracing::info!(id, "Component deleted");
        Ok(())
    }

    pub async fn get_by_id(&self, ctx: &RequestContext, id: &str) -> Result<Component, CoreError> {
        self.store.get_by_id(ctx, id).await
    }

    pub async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Component>, CoreError> {
        let components = self.store.get_all(ctx).await?;
        tracing::debug!(count = components.len(), "Listed components");
        Ok(components)
    }

    /// Whether the backing store answers.
    pub async fn store_healthy(&self, ctx: &RequestContext) -> bool {
        match self.store.ping(ctx).await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Store health check failed");
                false
            }
        }
    }
}
