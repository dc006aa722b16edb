//! # cqproc - In-Process CQRS Message-Processing Runtime
//!
//! A seed command or query is driven through a directed graph of
//! side-effect-free "actor" functions until the job queue drains or a
//! terminal error message is emitted. Actors declare what they consume,
//! what they depend on, and what they produce through their plain Rust
//! signatures; the registry compiles those signatures into routing and
//! scheduling metadata at registration time.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cqproc::{actor, messages, ActorRegistry, InMemoryContainer, TaskExecutor};
//! use std::sync::Arc;
//!
//! // 1. Declare your message types
//! #[derive(Debug, Clone)]
//! struct CreateEmployee { first_name: String, last_name: String }
//!
//! #[derive(Debug, Clone)]
//! struct EmployeeCreated { first_name: String, last_name: String }
//!
//! messages! {
//!     command CreateEmployee;
//!     domain_event EmployeeCreated;
//! }
//!
//! // 2. Write actor functions; the name suffix declares the semantic kind
//! fn create_employee_usecase(command: CreateEmployee) -> EmployeeCreated {
//!     EmployeeCreated {
//!         first_name: command.first_name,
//!         last_name: command.last_name,
//!     }
//! }
//!
//! // 3. Build the registry once and share it
//! let mut registry = cqproc::ActorRegistry::new();
//! registry.add(actor!(create_employee_usecase))?;
//! let registry = Arc::new(registry);
//!
//! // 4. Run tasks through the executor
//! # async fn run(registry: Arc<cqproc::ActorRegistry>) -> Result<(), Box<dyn std::error::Error>> {
//! let executor = TaskExecutor::new(InMemoryContainer::new(), registry);
//! let stream = executor
//!     .run(CreateEmployee { first_name: "John".into(), last_name: "Doe".into() }, None)
//!     .await?;
//!
//! assert_eq!(stream.last().map(|p| p.name()), Some("EmployeeCreated"));
//! # Ok(())
//! # }
//! ```
//!
//! # Core Concepts
//!
//! - **Messages** belong to exactly one semantic category — command,
//!   query, context, event (business-domain, read, write, response), or
//!   error — declared once with [`messages!`]. An error-category message
//!   terminates its dispatch after being yielded.
//! - **Actors** are pure-by-convention functions. Message-typed parameters
//!   are fed from the dispatch stream, [`Dep`]-wrapped parameters from the
//!   dependency resolver. The return type declares the production:
//!   nothing, one message, an optional message, an audit union
//!   (`Result<Domain, Error>`), or a dynamic batch.
//! - **Semantic kinds** drive scheduling: context (0) before audit (1)
//!   before use-case (2) before IO (3) before response (9), FIFO within a
//!   kind. The kind comes from an explicit tag or the function name
//!   suffix (`_usecase`, `_io`, `_reader`, `_writer`, `_auditor`,
//!   `_context`, `_response`).
//! - **One dispatch** = one seed, one fresh stream (at most one message
//!   per concrete type), one cooperative single-threaded run. Audit actors
//!   replace their message in the stream instead of re-triggering
//!   consumers, which is how an audited command reaches its use-case.
//!
//! # Module Organization
//!
//! - [`message`] - taxonomy, packets, the error envelope
//! - [`registry`] - classification, parameter contracts, routing index
//! - [`dispatch`] - stream, priority loop, command/query processor
//! - [`resolver`] - dependency resolution contracts, in-memory container
//! - [`executor`] - the task executor owning the resolver scope
//! - [`util`] - packet/trace/type identity

pub mod dispatch;
pub mod executor;
pub mod message;
pub mod registry;
pub mod resolver;
pub mod util;

// Re-export commonly used types
pub use dispatch::{CQProcessor, Dispatch, DispatchError, Stream};
pub use executor::{default_error_wrapper, ErrorWrapper, ExecutorError, TaskExecutor};
pub use message::{
    AnyMessage, Category, Contract, ErrorEvent, EventKind, Message, MessageBatch, Packet, Task,
};
pub use registry::{
    ActorDef, ActorId, ActorRegistry, Dep, DepOrDefault, RegistryError, SemanticKind, SemanticTag,
};
pub use resolver::{
    DependencyProvider, ExecutionContext, InMemoryContainer, Resolver, ResolveError,
    ScopedResolver, SharedDependency,
};
pub use util::{PacketId, TraceId, TypeKey};
