//! The outermost runner: resolver scope + processor + fault wrapping.

// Layer 1: Standard library imports
use std::error::Error as _;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use serde_json::json;
use tracing::{debug, warn};

// Layer 3: Internal module imports
use super::error::ExecutorError;
use crate::dispatch::{CQProcessor, DispatchError};
use crate::message::{AnyMessage, Contract, ErrorEvent, Packet, Task};
use crate::registry::ActorRegistry;
use crate::resolver::{DependencyProvider, ExecutionContext, Resolver};

/// Converts a dispatch fault into a terminal error envelope.
pub type ErrorWrapper = Box<dyn Fn(&DispatchError) -> ErrorEvent + Send + Sync>;

/// Runs one task through the processor inside a resolver scope.
///
/// The executor owns the scope lifecycle: on a clean dispatch the scope
/// closes through its success path; when the dispatch yields an error
/// message or aborts with a fault, it closes through its failure path. A
/// configured [`ErrorWrapper`] turns faults into appended [`ErrorEvent`]
/// packets instead of surfaced errors.
///
/// # Example
/// ```rust,ignore
/// let executor = TaskExecutor::new(container, registry)
///     .with_error_wrapper(default_error_wrapper);
///
/// let stream = executor
///     .run(CreateEmployee { first_name: "John".into(), .. }, None)
///     .await?;
/// ```
pub struct TaskExecutor<P> {
    container: P,
    registry: Arc<ActorRegistry>,
    error_wrapper: Option<ErrorWrapper>,
}

impl<P: DependencyProvider> TaskExecutor<P> {
    /// Build an executor over a container and a shared registry.
    pub fn new(container: P, registry: Arc<ActorRegistry>) -> Self {
        Self {
            container,
            registry,
            error_wrapper: None,
        }
    }

    /// Configure fault wrapping; see [`default_error_wrapper`].
    pub fn with_error_wrapper(
        mut self,
        wrapper: impl Fn(&DispatchError) -> ErrorEvent + Send + Sync + 'static,
    ) -> Self {
        self.error_wrapper = Some(Box::new(wrapper));
        self
    }

    /// The shared registry.
    pub fn registry(&self) -> &Arc<ActorRegistry> {
        &self.registry
    }

    /// Drive one task to completion and collect the emitted packets.
    ///
    /// # Errors
    ///
    /// Scope open/close failures always surface. Dispatch faults surface
    /// only when no error wrapper is configured; with one, they become a
    /// final error packet in the returned stream.
    pub async fn run<T>(
        &self,
        task: T,
        execution_context: Option<ExecutionContext>,
    ) -> Result<Vec<Packet>, ExecutorError>
    where
        T: Task + Contract,
    {
        let scope = self
            .container
            .get_resolver(execution_context.unwrap_or_default())
            .await?;

        let mut stream = Vec::new();
        let mut failed = false;
        let mut fault: Option<DispatchError> = None;
        let trace_id;
        {
            let resolver: &dyn Resolver = &*scope;
            let processor = CQProcessor::with_resolver(&self.registry, resolver);
            let mut dispatch = processor.dispatch(task);
            trace_id = dispatch.trace_id();
            while let Some(item) = dispatch.next().await {
                match item {
                    Ok(packet) => {
                        let is_error = packet.is_error();
                        stream.push(packet);
                        if is_error {
                            failed = true;
                            break;
                        }
                    }
                    Err(error) => {
                        fault = Some(error);
                        failed = true;
                        break;
                    }
                }
            }
        }

        if let Some(error) = fault {
            scope.close_failure().await?;
            match &self.error_wrapper {
                Some(wrapper) => {
                    warn!(%trace_id, error = %error, "dispatch fault wrapped into error envelope");
                    let envelope: AnyMessage = Arc::new(wrapper(&error));
                    stream.push(Packet::new(envelope, trace_id));
                    return Ok(stream);
                }
                None => return Err(ExecutorError::Dispatch(error)),
            }
        }

        if failed {
            debug!(%trace_id, packets = stream.len(), "dispatch closed through failure path");
            scope.close_failure().await?;
        } else {
            debug!(%trace_id, packets = stream.len(), "dispatch closed through success path");
            scope.close_success().await?;
        }
        Ok(stream)
    }
}

impl<P: std::fmt::Debug> std::fmt::Debug for TaskExecutor<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskExecutor")
            .field("container", &self.container)
            .field("registry", &self.registry)
            .field("has_error_wrapper", &self.error_wrapper.is_some())
            .finish()
    }
}

/// The stock fault wrapper: status 500, the fault's display text, and the
/// source chain as structured details.
pub fn default_error_wrapper(fault: &DispatchError) -> ErrorEvent {
    let mut chain = Vec::new();
    let mut source = fault.source();
    while let Some(error) = source {
        chain.push(error.to_string());
        source = error.source();
    }

    let envelope = ErrorEvent::internal(fault.to_string());
    if chain.is_empty() {
        envelope
    } else {
        envelope.with_details(json!({ "chain": chain }))
    }
}
