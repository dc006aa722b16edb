//! Parameter and production contracts.
//!
//! This is the runtime's substitute for signature reflection: every type an
//! actor can take or return implements a small contract trait that reports
//! its role and knows how to extract itself from a dispatch. Message types
//! get their impls from the [`messages!`](crate::messages) macro; dependency
//! parameters are marked explicitly with [`Dep`] or [`DepOrDefault`], so a
//! function-typed port can never be mistaken for a message.

// Layer 1: Standard library imports
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::ops::Deref;
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none for this module)

// Layer 3: Internal module imports
use crate::dispatch::{DispatchError, Stream};
use crate::message::{AnyMessage, Category, Contract, MessageBatch};
use crate::resolver::SharedDependency;
use crate::util::TypeKey;

/// Role of one declared actor parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRole {
    /// A task or event consumed from the dispatch stream.
    Domain,
    /// A context value consumed from the dispatch stream.
    Context,
    /// Everything else, resolved through the dependency resolver.
    Dependency,
}

/// Contract record of one declared actor parameter.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    /// How the parameter is satisfied at run time.
    pub role: ParamRole,

    /// The declared contract type.
    pub contract: TypeKey,

    /// Dependency parameters only: whether a default value exists when no
    /// resolver is configured.
    pub has_default: bool,
}

impl ParamSpec {
    /// Spec of a message-typed parameter; context-category messages take
    /// the context role, everything else the domain role.
    pub fn message<M: Contract>() -> Self {
        let role = if M::CATEGORY.is_context() {
            ParamRole::Context
        } else {
            ParamRole::Domain
        };
        Self {
            role,
            contract: TypeKey::of::<M>(),
            has_default: false,
        }
    }

    /// Spec of a dependency-typed parameter.
    pub fn dependency<T: 'static>(has_default: bool) -> Self {
        Self {
            role: ParamRole::Dependency,
            contract: TypeKey::of::<T>(),
            has_default,
        }
    }
}

/// Contract record of an actor's declared production.
///
/// `contract` is present for single-type productions (including the `Ok`
/// side of an audit union) and absent for `()` and dynamic batches. Context
/// actors are indexed by this contract — it names the context type they
/// produce.
#[derive(Debug, Clone, Copy)]
pub struct OutputSpec {
    /// The produced contract type, when statically known.
    pub contract: Option<TypeKey>,

    /// Category of the produced contract, when statically known.
    pub category: Option<Category>,
}

impl OutputSpec {
    /// Spec of a single-contract production.
    pub fn of<M: Contract>() -> Self {
        Self {
            contract: Some(TypeKey::of::<M>()),
            category: Some(M::CATEGORY),
        }
    }

    /// Spec of a production with no statically known contract.
    pub fn none() -> Self {
        Self {
            contract: None,
            category: None,
        }
    }
}

/// Resolved dependency values for one invocation, keyed by contract.
pub type DependencyMap = HashMap<TypeKey, SharedDependency>;

/// Per-invocation view over the dispatch stream and resolved dependencies.
///
/// Parameter values are read here when the job *runs*, not when it was
/// enqueued, so an audit replacement in the stream is what downstream
/// actors receive.
pub struct ActorArgs<'a> {
    stream: &'a Stream,
    dependencies: &'a DependencyMap,
}

impl<'a> ActorArgs<'a> {
    pub(crate) fn new(stream: &'a Stream, dependencies: &'a DependencyMap) -> Self {
        Self {
            stream,
            dependencies,
        }
    }

    /// Extract the latest message of type `M` from the stream.
    pub fn message<M: Contract>(&self) -> Result<M, DispatchError> {
        let contract = TypeKey::of::<M>();
        self.stream
            .get(contract)
            .and_then(|message| message.as_any().downcast_ref::<M>())
            .cloned()
            .ok_or(DispatchError::MissingMessage { contract })
    }

    /// Look up a resolved dependency of type `T`.
    pub fn dependency<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.dependencies
            .get(&TypeKey::of::<T>())
            .and_then(|value| Arc::clone(value).downcast::<T>().ok())
    }
}

impl Debug for ActorArgs<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActorArgs")
            .field("stream", &self.stream)
            .field("dependencies", &self.dependencies.keys())
            .finish()
    }
}

/// A value an actor draws from the dispatch.
///
/// Implemented for every declared message type (domain and context roles,
/// via [`messages!`](crate::messages)) and for the dependency wrappers.
pub trait ActorParam: Sized + Send {
    /// Contract record for registration.
    fn spec() -> ParamSpec;

    /// Pull the value out of the invocation scope.
    fn extract(args: &ActorArgs<'_>) -> Result<Self, DispatchError>;
}

/// A dependency parameter with no default: the resolver must supply it.
///
/// # Example
/// ```rust,ignore
/// async fn employee_writer(
///     created: EmployeeCreated,
///     email: EmployeeWorkEmailGenerated,
///     repo: Dep<EmployeeRepository>,
/// ) -> EmployeeStored {
///     repo.save(&created, &email.email).await
/// }
/// ```
#[derive(Debug)]
pub struct Dep<T>(Arc<T>);

impl<T> Dep<T> {
    /// The shared dependency value.
    pub fn shared(&self) -> Arc<T> {
        Arc::clone(&self.0)
    }

    /// Unwrap into the shared value.
    pub fn into_inner(self) -> Arc<T> {
        self.0
    }
}

impl<T> Deref for Dep<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Send + Sync + 'static> ActorParam for Dep<T> {
    fn spec() -> ParamSpec {
        ParamSpec::dependency::<T>(false)
    }

    fn extract(args: &ActorArgs<'_>) -> Result<Self, DispatchError> {
        args.dependency::<T>()
            .map(Dep)
            .ok_or(DispatchError::MissingDependency {
                contract: TypeKey::of::<T>(),
            })
    }
}

/// A dependency parameter that falls back to `T::default()` when the
/// processor runs without a resolver.
#[derive(Debug)]
pub struct DepOrDefault<T>(Arc<T>);

impl<T> DepOrDefault<T> {
    /// The shared dependency value.
    pub fn shared(&self) -> Arc<T> {
        Arc::clone(&self.0)
    }
}

impl<T> Deref for DepOrDefault<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T: Default + Send + Sync + 'static> ActorParam for DepOrDefault<T> {
    fn spec() -> ParamSpec {
        ParamSpec::dependency::<T>(true)
    }

    fn extract(args: &ActorArgs<'_>) -> Result<Self, DispatchError> {
        Ok(Self(
            args.dependency::<T>()
                .unwrap_or_else(|| Arc::new(T::default())),
        ))
    }
}

/// What an actor may produce.
///
/// Normalisation rules: `()` produces nothing, a message produces a
/// singleton batch, `Option` zero-or-one, `Result` the audit union (pass the
/// domain message through, or emit an error message), and a
/// [`MessageBatch`] passes through as-is. Anything else is not an actor
/// return type — the classification failure is a compile error rather than a
/// dispatch-time fault.
pub trait ActorOutput: Send {
    /// Contract record for registration.
    fn spec() -> OutputSpec;

    /// Normalise into a message batch.
    fn into_messages(self) -> MessageBatch;
}

impl ActorOutput for () {
    fn spec() -> OutputSpec {
        OutputSpec::none()
    }

    fn into_messages(self) -> MessageBatch {
        Vec::new()
    }
}

impl<M: Contract> ActorOutput for Option<M> {
    fn spec() -> OutputSpec {
        OutputSpec::of::<M>()
    }

    fn into_messages(self) -> MessageBatch {
        match self {
            Some(message) => vec![Arc::new(message) as AnyMessage],
            None => Vec::new(),
        }
    }
}

impl<M: Contract, E: Contract> ActorOutput for Result<M, E> {
    fn spec() -> OutputSpec {
        OutputSpec::of::<M>()
    }

    fn into_messages(self) -> MessageBatch {
        match self {
            Ok(message) => vec![Arc::new(message) as AnyMessage],
            Err(error) => vec![Arc::new(error) as AnyMessage],
        }
    }
}

impl ActorOutput for MessageBatch {
    fn spec() -> OutputSpec {
        OutputSpec::none()
    }

    fn into_messages(self) -> MessageBatch {
        self
    }
}
