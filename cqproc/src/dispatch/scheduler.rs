//! Priority scheduling of actor invocations.
//!
//! The loop owns the per-dispatch [`Stream`], a binary heap of ready
//! [`Job`]s, and the rules for enqueuing new jobs when a fresh message
//! lands: consumers of the message are scheduled, context producers for
//! their missing context parameters are pre-scheduled, and a job is only
//! pushed once every message parameter it needs is already streamed.

// Layer 1: Standard library imports
use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use tracing::{debug, trace};

// Layer 3: Internal module imports
use super::stream::Stream;
use crate::message::AnyMessage;
use crate::registry::{ActorEntry, ActorRegistry, SemanticKind};
use crate::util::TypeKey;

/// One scheduled actor invocation.
///
/// Ordered by `(priority, sequence)`: semantic priority first, then FIFO
/// within equal priorities. The parameter list is a contract snapshot only;
/// values are read from the stream when the job runs.
#[derive(Debug)]
pub struct Job {
    priority: u8,
    sequence: u64,
    pub(crate) entry: Arc<ActorEntry>,
    pub(crate) parameters: Vec<TypeKey>,
}

impl Job {
    /// Semantic priority of the scheduled actor.
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// FIFO tie-break within one priority.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// The scheduled registry entry.
    pub fn entry(&self) -> &Arc<ActorEntry> {
        &self.entry
    }
}

impl PartialEq for Job {
    fn eq(&self, other: &Self) -> bool {
        (self.priority, self.sequence) == (other.priority, other.sequence)
    }
}

impl Eq for Job {}

impl PartialOrd for Job {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Job {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then(self.sequence.cmp(&other.sequence))
    }
}

/// The per-dispatch scheduler.
pub struct PriorityLoop<'r> {
    registry: &'r ActorRegistry,
    stream: Stream,
    queue: BinaryHeap<Reverse<Job>>,
    sequence: u64,
}

impl<'r> PriorityLoop<'r> {
    pub(crate) fn new(registry: &'r ActorRegistry) -> Self {
        Self {
            registry,
            stream: Stream::new(),
            queue: BinaryHeap::new(),
            sequence: 0,
        }
    }

    /// The dispatch stream.
    pub fn stream(&self) -> &Stream {
        &self.stream
    }

    /// Record a message and schedule its consumers.
    ///
    /// With `replace` set the message overwrites its stream slot without
    /// re-enqueuing anything — the audit handoff: the audited message
    /// already triggered its jobs when it was first registered. Without
    /// `replace`, a duplicate contract is a no-op.
    pub fn register(&mut self, message: AnyMessage, replace: bool) {
        if replace {
            trace!(message = message.name(), "stream replace");
            self.stream.replace(message);
            return;
        }
        if self.stream.insert(Arc::clone(&message)) {
            trace!(message = message.name(), "stream insert");
            self.register_jobs(&message);
        }
    }

    /// The next ready job, lowest `(priority, sequence)` first. The loop
    /// terminates when this returns `None`.
    pub fn next_job(&mut self) -> Option<Job> {
        self.queue.pop().map(|Reverse(job)| job)
    }

    fn register_jobs(&mut self, message: &AnyMessage) {
        let registry = self.registry;
        let is_context = message.category().is_context();
        for entry in registry.get(message.key()) {
            // A context producer must not be re-triggered by the very
            // context type it produces.
            if is_context && entry.kind == SemanticKind::Context {
                continue;
            }
            for context_parameter in &entry.parameters.context {
                self.register_context_job(context_parameter.contract);
            }
            self.enqueue(entry);
        }
    }

    fn register_context_job(&mut self, contract: TypeKey) {
        if self.stream.contains(contract) {
            return;
        }
        let registry = self.registry;
        for entry in registry.get(contract) {
            if entry.kind == SemanticKind::Context {
                self.enqueue(entry);
            }
        }
    }

    fn enqueue(&mut self, entry: &Arc<ActorEntry>) {
        let mut parameters =
            Vec::with_capacity(entry.parameters.domain.len() + entry.parameters.context.len());
        for contract in entry.parameters.message_contracts() {
            if !self.stream.contains(contract) {
                // Not ready yet; the job is re-attempted when the missing
                // message is registered.
                trace!(actor = entry.name, missing = %contract, "job not ready");
                return;
            }
            parameters.push(contract);
        }
        self.sequence += 1;
        debug!(
            actor = entry.name,
            priority = entry.kind.priority(),
            sequence = self.sequence,
            "job enqueued"
        );
        self.queue.push(Reverse(Job {
            priority: entry.kind.priority(),
            sequence: self.sequence,
            entry: Arc::clone(entry),
            parameters,
        }));
    }
}

impl std::fmt::Debug for PriorityLoop<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PriorityLoop")
            .field("stream", &self.stream)
            .field("queued", &self.queue.len())
            .field("sequence", &self.sequence)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::actor;
    use proptest::prelude::*;

    crate::messages! {
        command PlaceOrder;
        context PlaceOrderContext;
        domain_event OrderPlaced;
        error OrderRejected;
    }

    #[derive(Debug, Clone)]
    struct PlaceOrder;
    #[derive(Debug, Clone)]
    struct PlaceOrderContext;
    #[derive(Debug, Clone)]
    struct OrderPlaced;
    #[derive(Debug, Clone)]
    struct OrderRejected;

    fn place_order_context(_command: PlaceOrder) -> PlaceOrderContext {
        PlaceOrderContext
    }

    fn place_order_auditor(
        command: PlaceOrder,
        _ctx: PlaceOrderContext,
    ) -> Result<PlaceOrder, OrderRejected> {
        Ok(command)
    }

    fn place_order_usecase(_command: PlaceOrder) -> OrderPlaced {
        OrderPlaced
    }

    async fn order_writer(_event: OrderPlaced) {}

    fn fixture_registry() -> ActorRegistry {
        let mut registry = ActorRegistry::new();
        registry.add(actor!(place_order_auditor)).unwrap();
        registry.add(actor!(place_order_usecase)).unwrap();
        registry.add(actor!(place_order_context)).unwrap();
        registry.add(actor!(order_writer)).unwrap();
        registry
    }

    #[test]
    fn test_seed_schedules_context_before_waiting_auditor() {
        let registry = fixture_registry();
        let mut scheduler = PriorityLoop::new(&registry);
        scheduler.register(Arc::new(PlaceOrder), false);

        // The auditor is not ready (its context is missing), so the queue
        // holds the context producer and the use-case.
        let first = scheduler.next_job().unwrap();
        assert_eq!(first.entry().name, "place_order_context");
        let second = scheduler.next_job().unwrap();
        assert_eq!(second.entry().name, "place_order_usecase");
        assert!(scheduler.next_job().is_none());
    }

    #[test]
    fn test_context_arrival_wakes_auditor_at_higher_priority() {
        let registry = fixture_registry();
        let mut scheduler = PriorityLoop::new(&registry);
        scheduler.register(Arc::new(PlaceOrder), false);
        scheduler.register(Arc::new(PlaceOrderContext), false);

        // Context producer (0) first, auditor (1) before use-case (2),
        // even though the use-case was enqueued earlier.
        let names: Vec<_> = std::iter::from_fn(|| scheduler.next_job())
            .map(|job| job.entry().name)
            .collect();
        assert_eq!(
            names,
            vec![
                "place_order_context",
                "place_order_auditor",
                "place_order_usecase"
            ]
        );
    }

    #[test]
    fn test_duplicate_registration_never_retriggers() {
        let registry = fixture_registry();
        let mut scheduler = PriorityLoop::new(&registry);
        scheduler.register(Arc::new(PlaceOrder), false);
        scheduler.register(Arc::new(PlaceOrder), false);

        let count = std::iter::from_fn(|| scheduler.next_job()).count();
        assert_eq!(count, 2, "second seed must not enqueue more jobs");
    }

    #[test]
    fn test_replace_never_enqueues() {
        let registry = fixture_registry();
        let mut scheduler = PriorityLoop::new(&registry);
        scheduler.register(Arc::new(PlaceOrder), true);

        assert!(scheduler.next_job().is_none());
        assert!(scheduler.stream().contains(TypeKey::of::<PlaceOrder>()));
    }

    #[test]
    fn test_multi_parameter_job_waits_for_last_message() {
        crate::messages! {
            domain_event LineAdded;
        }

        #[derive(Debug, Clone)]
        struct LineAdded;

        async fn invoice_writer(_order: OrderPlaced, _line: LineAdded) {}

        let mut registry = ActorRegistry::new();
        registry.add(actor!(invoice_writer)).unwrap();

        let mut scheduler = PriorityLoop::new(&registry);
        scheduler.register(Arc::new(OrderPlaced), false);
        assert!(scheduler.next_job().is_none(), "half the inputs, no job");

        scheduler.register(Arc::new(LineAdded), false);
        let job = scheduler.next_job().unwrap();
        assert_eq!(job.entry().name, "invoice_writer");
        assert_eq!(job.parameters.len(), 2);
    }

    proptest! {
        /// Popping the heap always yields (priority, sequence) order, for
        /// any interleaving of pushes.
        #[test]
        fn prop_jobs_pop_in_priority_then_fifo_order(priorities in proptest::collection::vec(0u8..10, 1..64)) {
            let registry = fixture_registry();
            let entry = Arc::clone(registry.iter().next().unwrap());

            let mut queue = BinaryHeap::new();
            for (sequence, priority) in priorities.iter().enumerate() {
                queue.push(Reverse(Job {
                    priority: *priority,
                    sequence: sequence as u64,
                    entry: Arc::clone(&entry),
                    parameters: Vec::new(),
                }));
            }

            let mut popped: Vec<(u8, u64)> = Vec::new();
            while let Some(Reverse(job)) = queue.pop() {
                popped.push((job.priority(), job.sequence()));
            }
            let mut sorted = popped.clone();
            sorted.sort();
            prop_assert_eq!(popped, sorted);
        }
    }
}
