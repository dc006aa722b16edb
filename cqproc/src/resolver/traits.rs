// Layer 1: Standard library imports
use std::any::Any;
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use async_trait::async_trait;

// Layer 3: Internal module imports
use super::error::ResolveError;
use crate::util::TypeKey;

/// A resolved dependency, shared across invocations within one scope.
pub type SharedDependency = Arc<dyn Any + Send + Sync>;

/// Produces dependency values for declared contracts.
#[async_trait]
pub trait Resolver: Send + Sync {
    /// Resolve one dependency by its contract.
    async fn resolve(&self, contract: TypeKey) -> Result<SharedDependency, ResolveError>;
}

/// A per-dispatch resolver scope.
///
/// Exactly one close path runs per scope: [`close_success`] after a clean
/// dispatch, [`close_failure`] when the dispatch ended in an error message
/// or a dispatch fault. Implementations hang their commit/rollback
/// semantics on these.
///
/// [`close_success`]: ScopedResolver::close_success
/// [`close_failure`]: ScopedResolver::close_failure
#[async_trait]
pub trait ScopedResolver: Resolver {
    /// Close the scope after a successful dispatch.
    async fn close_success(self: Box<Self>) -> Result<(), ResolveError>;

    /// Close the scope after a failed dispatch.
    async fn close_failure(self: Box<Self>) -> Result<(), ResolveError>;
}

/// Opens resolver scopes; the container side of the contract.
#[async_trait]
pub trait DependencyProvider: Send + Sync {
    /// Open a scope, seeding it with per-dispatch extra bindings.
    async fn get_resolver(
        &self,
        context: ExecutionContext,
    ) -> Result<Box<dyn ScopedResolver>, ResolveError>;
}

/// Per-dispatch extra bindings, shadowing the container's own.
///
/// # Example
/// ```rust,ignore
/// let context = ExecutionContext::new().bind(RequestUser { id: 7 });
/// let stream = executor.run(command, Some(context)).await?;
/// ```
#[derive(Default)]
pub struct ExecutionContext {
    bindings: HashMap<TypeKey, SharedDependency>,
}

impl ExecutionContext {
    /// An empty context.
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

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the context has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub(crate) fn into_bindings(self) -> HashMap<TypeKey, SharedDependency> {
        self.bindings
    }
}

impl Debug for ExecutionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExecutionContext")
            .field("bindings", &self.bindings.keys())
            .finish()
    }
}
