// Layer 1: Standard library
// (none)

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::dispatch::DispatchError;
use crate::resolver::ResolveError;

/// Errors surfaced by [`TaskExecutor::run`](super::TaskExecutor::run) when
/// no error wrapper is configured.
#[derive(Error, Debug)]
pub enum ExecutorError {
    /// The dispatch aborted with a programming fault.
    #[error("dispatch failed: {0}")]
    Dispatch(#[from] DispatchError),

    /// The container failed to open or close a resolver scope.
    #[error("dependency resolution failed: {0}")]
    Resolver(#[from] ResolveError),
}
