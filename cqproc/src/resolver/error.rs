// Layer 1: Standard library
// (none)

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::util::TypeKey;

/// Errors raised by a dependency resolver.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The container holds no binding for the requested contract.
    #[error("no binding for contract `{0}`")]
    NotBound(TypeKey),

    /// A container-specific failure while producing or closing a scope.
    #[error("resolver failure: {0}")]
    Failed(String),
}
