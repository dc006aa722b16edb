//! Adapters from plain functions to registry entries.
//!
//! [`IntoActor`] is implemented for sync and async functions of one to six
//! parameters whose parameter types implement
//! [`ActorParam`](super::contract::ActorParam) and whose return type
//! implements [`ActorOutput`](super::contract::ActorOutput). The adapter
//! compiles the signature into contract records and a type-erased
//! executable; the marker type parameter disambiguates the sync and async
//! blanket impls during inference.

// Layer 1: Standard library imports
use std::future::Future;

// Layer 2: Third-party crate imports
use futures::FutureExt;

// Layer 3: Internal module imports
use super::contract::{ActorOutput, ActorParam, OutputSpec, ParamSpec};
use super::entry::{Executable, SemanticTag};
use crate::dispatch::DispatchError;
use crate::util::ids::short_name;

/// One actor function on its way into the registry.
///
/// Built by the [`actor!`](crate::actor) macro, which captures the function
/// name for convention-based classification; an explicit
/// [`tagged`](ActorDef::tagged) call overrides the convention.
pub struct ActorDef<F> {
    name: &'static str,
    tag: Option<SemanticTag>,
    function: F,
}

impl<F> ActorDef<F> {
    /// Wrap a function under the given name. The name may be a full path;
    /// only the final segment is kept.
    pub fn new(name: &'static str, function: F) -> Self {
        Self {
            name: short_name(name),
            tag: None,
            function,
        }
    }

    /// The captured short name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The explicit tag, when one was set.
    pub fn tag(&self) -> Option<SemanticTag> {
        self.tag
    }

    /// Attach an explicit semantic tag, overriding the name convention.
    pub fn tagged(mut self, tag: SemanticTag) -> Self {
        self.tag = Some(tag);
        self
    }

    /// Mark the actor to be ignored by the registry.
    pub fn skipped(self) -> Self {
        self.tagged(SemanticTag::Skip)
    }

    pub(crate) fn into_inner(self) -> (&'static str, Option<SemanticTag>, F) {
        (self.name, self.tag, self.function)
    }
}

impl<F> std::fmt::Debug for ActorDef<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorDef")
            .field("name", &self.name)
            .field("tag", &self.tag)
            .finish()
    }
}

/// The compiled form of one actor function.
pub struct ActorParts {
    /// Parameter contracts in source order.
    pub params: Vec<ParamSpec>,

    /// Declared production.
    pub output: OutputSpec,

    /// Type-erased executable body.
    pub executable: Executable,
}

/// Compile a function into [`ActorParts`].
///
/// The `Marker` parameter exists only to keep the sync and async blanket
/// impls coherent; it is always inferred.
pub trait IntoActor<Marker>: Sized {
    fn into_parts(self) -> ActorParts;
}

#[doc(hidden)]
pub struct SyncMarker;

#[doc(hidden)]
pub struct AsyncMarker;

macro_rules! impl_into_actor {
    ($($P:ident),+) => {
        impl<Func, Out, $($P),+> IntoActor<(SyncMarker, ($($P,)+), Out)> for Func
        where
            Func: Fn($($P),+) -> Out + Send + Sync + 'static,
            Out: ActorOutput + 'static,
            $($P: ActorParam + 'static,)+
        {
            fn into_parts(self) -> ActorParts {
                ActorParts {
                    params: vec![$($P::spec()),+],
                    output: Out::spec(),
                    executable: Executable::Sync(Box::new(move |args| {
                        Ok((self)($($P::extract(args)?),+).into_messages())
                    })),
                }
            }
        }

        impl<Func, Fut, Out, $($P),+> IntoActor<(AsyncMarker, ($($P,)+), Out)> for Func
        where
            Func: Fn($($P),+) -> Fut + Send + Sync + 'static,
            Fut: Future<Output = Out> + Send + 'static,
            Out: ActorOutput + 'static,
            $($P: ActorParam + 'static,)+
        {
            #[allow(non_snake_case)]
            fn into_parts(self) -> ActorParts {
                ActorParts {
                    params: vec![$($P::spec()),+],
                    output: Out::spec(),
                    executable: Executable::Async(Box::new(move |args| {
                        // Extract while the stream borrow is alive; the
                        // returned future owns its arguments.
                        let extracted = (|| -> Result<_, DispatchError> {
                            Ok(($($P::extract(args)?,)+))
                        })();
                        match extracted {
                            Ok(($($P,)+)) => {
                                let fut = (self)($($P),+);
                                async move { Ok(fut.await.into_messages()) }.boxed()
                            }
                            Err(error) => std::future::ready(Err(error)).boxed(),
                        }
                    })),
                }
            }
        }
    };
}

impl_into_actor!(P1);
impl_into_actor!(P1, P2);
impl_into_actor!(P1, P2, P3);
impl_into_actor!(P1, P2, P3, P4);
impl_into_actor!(P1, P2, P3, P4, P5);
impl_into_actor!(P1, P2, P3, P4, P5, P6);

/// Capture a function together with its identifier.
///
/// The captured name drives convention-based classification
/// (`_usecase`, `_io`, `_reader`, `_writer`, `_auditor`, `_context`,
/// `_response`); chain [`tagged`](ActorDef::tagged) to override it.
///
/// # Example
/// ```rust,ignore
/// registry.add(actor!(create_employee_usecase))?;
/// registry.add(actor!(io::employee_writer))?;
/// registry.add(actor!(validate).tagged(SemanticTag::Auditor))?;
/// ```
#[macro_export]
macro_rules! actor {
    ($f:path) => {
        $crate::registry::ActorDef::new(stringify!($f), $f)
    };
}

/// Register a batch of actor functions.
///
/// The Rust counterpart of walking a module namespace: list the functions
/// once, names beginning with `_` are skipped, and the first registration
/// error short-circuits the batch.
///
/// # Example
/// ```rust,ignore
/// register_module!(registry, {
///     create_employee_context,
///     employee_creation_auditor,
///     create_employee_usecase,
///     io::employee_writer,
/// })?;
/// ```
#[macro_export]
macro_rules! register_module {
    ($registry:expr, { $($actor:path),* $(,)? }) => {{
        (|| -> ::std::result::Result<(), $crate::registry::RegistryError> {
            $(
                let def = $crate::actor!($actor);
                if !def.name().starts_with('_') {
                    let _ = $registry.add(def)?;
                }
            )*
            ::std::result::Result::Ok(())
        })()
    }};
}
