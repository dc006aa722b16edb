//! In-memory dependency container.
//!
//! Instance bindings only: every scope sees the same shared values, plus
//! whatever the per-dispatch [`ExecutionContext`] adds on top. Close hooks
//! let tests observe which close path ran.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;
use tracing::trace;

// Layer 3: Internal module imports
use super::error::ResolveError;
use super::traits::{
    DependencyProvider, ExecutionContext, Resolver, ScopedResolver, SharedDependency,
};
use crate::util::TypeKey;

type CloseHook = Arc<dyn Fn() + Send + Sync>;

/// Builder-style in-memory dependency container.
///
/// # Example
/// ```rust,ignore
/// let container = InMemoryContainer::new()
///     .bind(EmployeeRepository::new(pool))
///     .on_scope_failure(|| tracing::warn!("dispatch rolled back"));
///
/// let executor = TaskExecutor::new(container, registry);
/// ```
#[derive(Default, Clone)]
pub struct InMemoryContainer {
    bindings: HashMap<TypeKey, SharedDependency>,
    on_success: Option<CloseHook>,
    on_failure: Option<CloseHook>,
}

impl InMemoryContainer {
    /// An empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a value under its own type.
    pub fn bind<T: Send + Sync + 'static>(mut self, value: T) -> Self {
        self.bindings.insert(TypeKey::of::<T>(), Arc::new(value));
        self
    }

    /// Bind an already shared value under its own type.
    pub fn bind_shared<T: Send + Sync + 'static>(mut self, value: Arc<T>) -> Self {
        self.bindings
            .insert(TypeKey::of::<T>(), value as SharedDependency);
        self
    }

    /// Hook invoked when a scope closes through the success path.
    pub fn on_scope_success(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_success = Some(Arc::new(hook));
        self
    }

    /// Hook invoked when a scope closes through the failure path.
    pub fn on_scope_failure(mut self, hook: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_failure = Some(Arc::new(hook));
        self
    }
}

impl Debug for InMemoryContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryContainer")
            .field("bindings", &self.bindings.keys())
            .finish()
    }
}

#[async_trait]
impl DependencyProvider for InMemoryContainer {
    async fn get_resolver(
        &self,
        context: ExecutionContext,
    ) -> Result<Box<dyn ScopedResolver>, ResolveError> {
        let mut bindings = self.bindings.clone();
        bindings.extend(context.into_bindings());
        Ok(Box::new(InMemoryScope {
            bindings,
            on_success: self.on_success.clone(),
            on_failure: self.on_failure.clone(),
        }))
    }
}

/// One open scope over the container's bindings.
struct InMemoryScope {
    bindings: HashMap<TypeKey, SharedDependency>,
    on_success: Option<CloseHook>,
    on_failure: Option<CloseHook>,
}

#[async_trait]
impl Resolver for InMemoryScope {
    async fn resolve(&self, contract: TypeKey) -> Result<SharedDependency, ResolveError> {
        trace!(%contract, "resolving dependency");
        self.bindings
            .get(&contract)
            .cloned()
            .ok_or(ResolveError::NotBound(contract))
    }
}

#[async_trait]
impl ScopedResolver for InMemoryScope {
    async fn close_success(self: Box<Self>) -> Result<(), ResolveError> {
        if let Some(hook) = &self.on_success {
            hook();
        }
        Ok(())
    }

    async fn close_failure(self: Box<Self>) -> Result<(), ResolveError> {
        if let Some(hook) = &self.on_failure {
            hook();
        }
        Ok(())
    }
}
