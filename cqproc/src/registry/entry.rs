// Layer 1: Standard library imports
use std::any::TypeId;
use std::collections::hash_map::DefaultHasher;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};

// Layer 2: Third-party crate imports
use futures::future::BoxFuture;

// Layer 3: Internal module imports
use super::contract::{ActorArgs, OutputSpec, ParamRole, ParamSpec};
use crate::dispatch::DispatchError;
use crate::message::MessageBatch;
use crate::util::TypeKey;

/// Stable identifier of one registered actor.
///
/// Derived from the actor function's identity (its captured name and the
/// `TypeId` of the function item), so registering the same function twice
/// yields the same id and the second registration is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActorId(u64);

impl ActorId {
    pub(crate) fn derive(name: &str, function: TypeId) -> Self {
        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        function.hash(&mut hasher);
        Self(hasher.finish())
    }

    /// The raw id value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Display for ActorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Semantic kind of an actor; controls scheduling priority and indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SemanticKind {
    /// Produces a context value on demand.
    Context,
    /// Validates a task before the use-case runs; may replace it or
    /// terminate the dispatch with an error message.
    Audit,
    /// The business decision; consumes tasks, produces domain events.
    Usecase,
    /// Reads or writes the outside world.
    Io,
    /// Shapes the final answer for the caller.
    Response,
}

impl SemanticKind {
    /// Scheduling priority; lower runs earlier.
    pub const fn priority(self) -> u8 {
        match self {
            SemanticKind::Context => 0,
            SemanticKind::Audit => 1,
            SemanticKind::Usecase => 2,
            SemanticKind::Io => 3,
            SemanticKind::Response => 9,
        }
    }
}

/// Explicit registration tag, the declaration-time override of the name
/// convention. `Reader` and `Writer` both map to [`SemanticKind::Io`];
/// `Skip` excludes the actor from the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SemanticTag {
    Usecase,
    Io,
    Reader,
    Writer,
    Auditor,
    Context,
    Response,
    Skip,
}

impl SemanticTag {
    /// The semantic kind this tag maps to; `None` for `Skip`.
    pub fn kind(self) -> Option<SemanticKind> {
        match self {
            SemanticTag::Usecase => Some(SemanticKind::Usecase),
            SemanticTag::Io | SemanticTag::Reader | SemanticTag::Writer => Some(SemanticKind::Io),
            SemanticTag::Auditor => Some(SemanticKind::Audit),
            SemanticTag::Context => Some(SemanticKind::Context),
            SemanticTag::Response => Some(SemanticKind::Response),
            SemanticTag::Skip => None,
        }
    }
}

/// Whether the actor body is a plain function or a future.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionKind {
    Sync,
    Async,
}

/// Parameter contracts of one actor, split by role in source order.
#[derive(Debug, Clone)]
pub struct ActorParameters {
    /// Message-typed parameters (tasks and events).
    pub domain: Vec<ParamSpec>,

    /// Context-typed parameters.
    pub context: Vec<ParamSpec>,

    /// Everything else, resolved through the dependency resolver.
    pub dependencies: Vec<ParamSpec>,
}

impl ActorParameters {
    pub(crate) fn split(specs: Vec<ParamSpec>) -> Self {
        let mut domain = Vec::new();
        let mut context = Vec::new();
        let mut dependencies = Vec::new();
        for spec in specs {
            match spec.role {
                ParamRole::Domain => domain.push(spec),
                ParamRole::Context => context.push(spec),
                ParamRole::Dependency => dependencies.push(spec),
            }
        }
        Self {
            domain,
            context,
            dependencies,
        }
    }

    /// Contracts the scheduler must see in the stream before the actor can
    /// run: domain first, then context.
    pub fn message_contracts(&self) -> impl Iterator<Item = TypeKey> + '_ {
        self.domain
            .iter()
            .chain(self.context.iter())
            .map(|spec| spec.contract)
    }
}

/// Type-erased actor body. The variant doubles as the execution-kind tag.
pub enum Executable {
    /// A plain function; invoked directly.
    Sync(Box<dyn Fn(&ActorArgs<'_>) -> Result<MessageBatch, DispatchError> + Send + Sync>),
    /// An async function; extraction happens up front, the returned future
    /// owns its arguments.
    Async(
        Box<
            dyn Fn(&ActorArgs<'_>) -> BoxFuture<'static, Result<MessageBatch, DispatchError>>
                + Send
                + Sync,
        >,
    ),
}

impl Executable {
    /// The execution-kind tag of this body.
    pub fn kind(&self) -> ExecutionKind {
        match self {
            Executable::Sync(_) => ExecutionKind::Sync,
            Executable::Async(_) => ExecutionKind::Async,
        }
    }
}

impl Debug for Executable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Executable::Sync(_) => f.write_str("Executable::Sync"),
            Executable::Async(_) => f.write_str("Executable::Async"),
        }
    }
}

/// The registry's view of one actor function.
///
/// Entries are immutable once registered and shared with scheduled jobs.
#[derive(Debug)]
pub struct ActorEntry {
    /// Stable identifier derived from the function's identity.
    pub id: ActorId,

    /// Short function name, as captured at registration.
    pub name: &'static str,

    /// Semantic kind; controls priority and indexing.
    pub kind: SemanticKind,

    /// Parameter contracts in source order, split by role.
    pub parameters: ActorParameters,

    /// Declared production; context actors are indexed by it.
    pub output: OutputSpec,

    /// The executable body plus its sync/async tag.
    pub runtime: Executable,
}
