//! Actor registry: classification, parameter contracts, and routing index.
//!
//! The registry is the reflective heart of the runtime, ported to
//! registration-time trait machinery: an actor function's parameter list and
//! return type are compiled into a contract record when the function is
//! [`add`](ActorRegistry::add)ed, and the routing index maps message
//! contracts to the actors consuming them.
//!
//! # Components
//!
//! - [`ActorRegistry`] - indexing, lookup, classification
//! - [`ActorDef`] / [`actor!`](crate::actor) - what the user registers
//! - [`IntoActor`] - arity-generic adapter from plain functions
//! - [`ActorParam`] / [`ActorOutput`] - the parameter/production contracts
//! - [`Dep`] / [`DepOrDefault`] - dependency parameter wrappers
//! - [`RegistryError`] - setup-time classification failures

pub mod contract;
pub mod entry;
pub mod error;
pub mod into_actor;

#[allow(clippy::module_inception)]
pub mod registry;

pub use contract::{
    ActorArgs, ActorOutput, ActorParam, Dep, DepOrDefault, DependencyMap, OutputSpec, ParamRole,
    ParamSpec,
};
pub use entry::{ActorEntry, ActorId, ActorParameters, Executable, ExecutionKind, SemanticKind, SemanticTag};
pub use error::RegistryError;
pub use into_actor::{ActorDef, ActorParts, IntoActor};
pub use registry::ActorRegistry;
