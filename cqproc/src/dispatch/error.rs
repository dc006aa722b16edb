//! Dispatch-time errors.
//!
//! These are programming faults, not domain failures: a domain failure is
//! an error-category *message* yielded to the caller, while these errors
//! abort the dispatch from the outside. The task executor converts them
//! into error envelopes when an error wrapper is configured.

// Layer 1: Standard library
// (none)

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
use crate::registry::ActorId;
use crate::resolver::ResolveError;
use crate::util::TypeKey;

/// Errors raised while driving one dispatch.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A dependency parameter has no resolver to satisfy it and no
    /// declared default, or the resolver failed to produce it.
    #[error("cannot resolve parameter `{parameter}` of actor {actor}")]
    CannotResolveActorParameter {
        actor: ActorId,
        parameter: &'static str,
        #[source]
        source: Option<ResolveError>,
    },

    /// A job ran with a message missing from the stream. Jobs are only
    /// enqueued once every message parameter is streamed, so this marks an
    /// internal invariant breach.
    #[error("message `{contract}` is not in the dispatch stream")]
    MissingMessage { contract: TypeKey },

    /// A dependency parameter was not compiled before invocation. Same
    /// nature as [`DispatchError::MissingMessage`].
    #[error("dependency `{contract}` was not resolved before invocation")]
    MissingDependency { contract: TypeKey },

    /// An actor body unwound; the panic payload is carried as text.
    #[error("actor {actor} panicked: {detail}")]
    ActorPanicked { actor: ActorId, detail: String },
}
