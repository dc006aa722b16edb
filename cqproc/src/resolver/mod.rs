//! Dependency resolution contracts and the in-memory reference container.
//!
//! The runtime consumes a [`Resolver`] — it never owns a container of its
//! own. A [`DependencyProvider`] opens one [`ScopedResolver`] per dispatch;
//! the scope is closed through its success path on normal completion and
//! through its failure path when the dispatch terminates with an error.
//! [`InMemoryContainer`] is the reference implementation used by the test
//! suite; production containers are external collaborators implementing
//! the same traits.

pub mod error;
pub mod in_memory;
pub mod traits;

pub use error::ResolveError;
pub use in_memory::InMemoryContainer;
pub use traits::{
    DependencyProvider, ExecutionContext, Resolver, ScopedResolver, SharedDependency,
};
