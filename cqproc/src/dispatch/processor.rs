//! The command/query processor.
//!
//! [`CQProcessor::dispatch`] seeds a fresh [`PriorityLoop`] and returns a
//! single-shot [`Dispatch`] iterator. Each call to [`Dispatch::next`]
//! drives the loop: the next ready job runs (sync directly, async awaited
//! in-line), its production is normalised into messages, and every message
//! is wrapped in a [`Packet`] and yielded. Yielded messages re-enter the
//! loop — with stream replacement when the producing actor was an audit —
//! so downstream jobs see them before they start. An error-category
//! message is yielded and then terminates the dispatch.

// Layer 1: Standard library imports
use std::collections::VecDeque;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

// Layer 2: Third-party crate imports
use futures::FutureExt;
use tracing::{debug, trace};

// Layer 3: Internal module imports
use super::error::DispatchError;
use super::scheduler::{Job, PriorityLoop};
use crate::message::{AnyMessage, Contract, MessageBatch, Packet};
use crate::registry::{ActorArgs, ActorEntry, ActorRegistry, DependencyMap, Executable, SemanticKind};
use crate::resolver::Resolver;
use crate::util::TraceId;

/// Processor over one registry, optionally wired to a dependency resolver.
///
/// The processor itself is stateless; every [`dispatch`](Self::dispatch)
/// call builds a fresh stream and loop, discarded when the returned
/// iterator completes.
#[derive(Clone, Copy)]
pub struct CQProcessor<'a> {
    registry: &'a ActorRegistry,
    resolver: Option<&'a dyn Resolver>,
}

impl<'a> CQProcessor<'a> {
    /// A processor without a resolver: dependency parameters fall back to
    /// their declared defaults, or fail the dispatch.
    pub fn new(registry: &'a ActorRegistry) -> Self {
        Self {
            registry,
            resolver: None,
        }
    }

    /// A processor resolving dependency parameters through `resolver`.
    pub fn with_resolver(registry: &'a ActorRegistry, resolver: &'a dyn Resolver) -> Self {
        Self {
            registry,
            resolver: Some(resolver),
        }
    }

    /// Start a dispatch seeded with one message.
    pub fn dispatch<M: Contract>(&self, seed: M) -> Dispatch<'a> {
        self.dispatch_any(Arc::new(seed))
    }

    /// Start a dispatch seeded with a type-erased message.
    pub fn dispatch_any(&self, seed: AnyMessage) -> Dispatch<'a> {
        Dispatch::new(self.registry, self.resolver, seed)
    }
}

impl std::fmt::Debug for CQProcessor<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CQProcessor")
            .field("registry", &self.registry)
            .field("has_resolver", &self.resolver.is_some())
            .finish()
    }
}

/// One running dispatch: a single-shot asynchronous iterator of packets.
///
/// Actors execute strictly sequentially in priority order; the iterator
/// suspends only to await the resolver, to await an async actor body, and
/// between yields. After `next` returns `None` (queue drained) or an
/// `Err` (dispatch fault), the iterator is fused.
pub struct Dispatch<'a> {
    scheduler: PriorityLoop<'a>,
    resolver: Option<&'a dyn Resolver>,
    seed: AnyMessage,
    ready: VecDeque<AnyMessage>,
    trace_id: TraceId,
    ran_any_job: bool,
    terminated: bool,
}

impl<'a> Dispatch<'a> {
    fn new(registry: &'a ActorRegistry, resolver: Option<&'a dyn Resolver>, seed: AnyMessage) -> Self {
        let trace_id = TraceId::new();
        debug!(%trace_id, seed = seed.name(), "dispatch started");
        let mut scheduler = PriorityLoop::new(registry);
        scheduler.register(Arc::clone(&seed), false);
        Self {
            scheduler,
            resolver,
            seed,
            ready: VecDeque::new(),
            trace_id,
            ran_any_job: false,
            terminated: false,
        }
    }

    /// The dispatch-wide trace id stamped on every yielded packet.
    pub fn trace_id(&self) -> TraceId {
        self.trace_id
    }

    /// Yield the next packet of this dispatch.
    ///
    /// Returns `None` once the job queue has drained or after a
    /// termination; a dispatch whose seed triggered no job at all yields
    /// exactly the seed packet before finishing.
    pub async fn next(&mut self) -> Option<Result<Packet, DispatchError>> {
        loop {
            if let Some(message) = self.ready.pop_front() {
                return Some(Ok(self.pack(message)));
            }
            if self.terminated {
                return None;
            }
            let Some(job) = self.scheduler.next_job() else {
                self.terminated = true;
                if !self.ran_any_job {
                    // Nothing consumes the seed: surface it as-is.
                    return Some(Ok(self.pack(Arc::clone(&self.seed))));
                }
                debug!(trace_id = %self.trace_id, "dispatch drained");
                return None;
            };
            self.ran_any_job = true;

            let batch = match self.run_job(&job).await {
                Ok(batch) => batch,
                Err(error) => {
                    self.terminated = true;
                    return Some(Err(error));
                }
            };

            let replace = job.entry().kind == SemanticKind::Audit;
            for message in batch {
                if message.category().is_error() {
                    debug!(
                        trace_id = %self.trace_id,
                        error = message.name(),
                        "dispatch terminated by error message"
                    );
                    self.ready.push_back(message);
                    self.terminated = true;
                    break;
                }
                self.ready.push_back(Arc::clone(&message));
                // Feed back before the next job starts.
                self.scheduler.register(message, replace);
            }
        }
    }

    async fn run_job(&self, job: &Job) -> Result<MessageBatch, DispatchError> {
        let entry = job.entry();
        let dependencies = self.compile_dependencies(entry).await?;
        let args = ActorArgs::new(self.scheduler.stream(), &dependencies);
        trace!(actor = entry.name, "running job");

        match &entry.runtime {
            Executable::Sync(body) => match catch_unwind(AssertUnwindSafe(|| body(&args))) {
                Ok(result) => result,
                Err(payload) => Err(DispatchError::ActorPanicked {
                    actor: entry.id,
                    detail: panic_detail(&payload),
                }),
            },
            Executable::Async(body) => {
                match AssertUnwindSafe(body(&args)).catch_unwind().await {
                    Ok(result) => result,
                    Err(payload) => Err(DispatchError::ActorPanicked {
                        actor: entry.id,
                        detail: panic_detail(&payload),
                    }),
                }
            }
        }
    }

    async fn compile_dependencies(
        &self,
        entry: &ActorEntry,
    ) -> Result<DependencyMap, DispatchError> {
        let mut dependencies = DependencyMap::new();
        for spec in &entry.parameters.dependencies {
            match self.resolver {
                Some(resolver) => {
                    let value = resolver.resolve(spec.contract).await.map_err(|source| {
                        DispatchError::CannotResolveActorParameter {
                            actor: entry.id,
                            parameter: spec.contract.name(),
                            source: Some(source),
                        }
                    })?;
                    dependencies.insert(spec.contract, value);
                }
                // No resolver: the wrapper falls back to its declared
                // default at extraction.
                None if spec.has_default => {}
                None => {
                    return Err(DispatchError::CannotResolveActorParameter {
                        actor: entry.id,
                        parameter: spec.contract.name(),
                        source: None,
                    });
                }
            }
        }
        Ok(dependencies)
    }

    fn pack(&self, message: AnyMessage) -> Packet {
        Packet::new(message, self.trace_id)
    }
}

impl std::fmt::Debug for Dispatch<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatch")
            .field("trace_id", &self.trace_id)
            .field("scheduler", &self.scheduler)
            .field("pending_yields", &self.ready.len())
            .field("terminated", &self.terminated)
            .finish()
    }
}

fn panic_detail(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
