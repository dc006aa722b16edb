//! Setup-time classification errors.

// Layer 1: Standard library
// (none)

// Layer 2: Third-party
use thiserror::Error;

// Layer 3: Internal
// (none)

/// Errors raised while building a registry.
///
/// All of these are fatal at setup: they surface to the site that registers
/// actors, before any dispatch runs.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Registration inputs are structurally invalid, e.g. an actor tagged
    /// as a context producer whose declared production is not a context
    /// contract.
    #[error("cannot register actor `{actor}`: {reason}")]
    CannotRegisterActor { actor: &'static str, reason: String },

    /// Neither an explicit tag nor a recognized name suffix identifies the
    /// actor's semantic kind.
    #[error("cannot derive a semantic kind for actor `{0}`")]
    CannotDeriveActorPurpose(&'static str),

    /// The actor declares no domain parameter, so no message could ever
    /// trigger it.
    #[error("actor `{0}` declares no domain parameter")]
    CannotDefineActorParameter(&'static str),
}
