// Layer 1: Standard library imports
use std::any::Any;
use std::fmt::Debug;
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none for this module)

// Layer 3: Internal module imports
use crate::util::TypeKey;

/// Emitter kind of an event message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A fact produced by a use-case actor.
    BusinessDomain,
    /// A fact produced by a read-side IO actor.
    Read,
    /// A fact produced by a write-side IO actor.
    Write,
    /// A fact shaped for the caller by a response actor.
    Response,
}

/// Semantic category of a message.
///
/// A concrete message type belongs to exactly one category, declared through
/// the [`messages!`](crate::messages) macro. The category test is a constant
/// time enum match, the structural equivalent of an `instanceof` check in a
/// runtime-reflective host.
///
/// # Example
/// ```rust
/// use cqproc::message::{Category, EventKind};
///
/// assert!(Category::Command.is_task());
/// assert!(Category::Query.is_task());
/// assert!(Category::Event(EventKind::Write).is_event());
/// assert!(Category::Error.is_error());
/// assert!(!Category::Context.is_task());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// An instruction to effect change.
    Command,
    /// A read request.
    Query,
    /// A value produced by a context actor to enrich a later invocation.
    Context,
    /// A fact, subdivided by emitter kind.
    Event(EventKind),
    /// A terminal event; processing stops after it is yielded.
    Error,
}

impl Category {
    /// Commands and queries together form the task family.
    pub fn is_task(self) -> bool {
        matches!(self, Category::Command | Category::Query)
    }

    /// Events, including terminal errors.
    pub fn is_event(self) -> bool {
        matches!(self, Category::Event(_) | Category::Error)
    }

    /// Context enrichment values.
    pub fn is_context(self) -> bool {
        matches!(self, Category::Context)
    }

    /// Terminal error messages.
    pub fn is_error(self) -> bool {
        matches!(self, Category::Error)
    }
}

/// Object-safe message contract.
///
/// Messages are immutable values; once constructed they travel the dispatch
/// type-erased as [`AnyMessage`] and are identified by their [`TypeKey`].
/// Implementations come from the [`messages!`](crate::messages) macro, never
/// by hand.
pub trait Message: Any + Debug + Send + Sync {
    /// The semantic category of this message.
    fn category(&self) -> Category;

    /// Stable identity of the concrete message type.
    fn key(&self) -> TypeKey;

    /// Short type name, for logs and assertions.
    fn name(&self) -> &'static str {
        self.key().name()
    }

    /// Upcast for downcasting back to the concrete type.
    fn as_any(&self) -> &dyn Any;
}

/// A type-erased, shareable message.
pub type AnyMessage = Arc<dyn Message>;

/// A normalised actor production: zero or more messages.
pub type MessageBatch = Vec<AnyMessage>;

/// Static side of the message contract, used at registration time.
///
/// Carries the category as a constant so the registry can classify
/// parameters and productions without a value at hand. `Clone` is required
/// because actors take messages by value and extraction clones out of the
/// dispatch stream.
pub trait Contract: Message + Clone + Sized {
    /// The declared category of this message type.
    const CATEGORY: Category;

    /// Stable identity of this message type.
    fn contract_key() -> TypeKey {
        TypeKey::of::<Self>()
    }

    /// Short type name.
    fn contract_name() -> &'static str {
        Self::contract_key().name()
    }
}

/// Marker for messages that may seed a dispatch: commands and queries.
pub trait Task: Message {}

#[cfg(test)]
mod tests {
    use super::*;

    crate::messages! {
        command Ping;
        query Peek;
        context PingContext;
        domain_event Pinged;
        read_event PeekLoaded;
        write_event PingStored;
        response_event PingReply;
        error PingFailed;
    }

    #[derive(Debug, Clone)]
    struct Ping;
    #[derive(Debug, Clone)]
    struct Peek;
    #[derive(Debug, Clone)]
    struct PingContext;
    #[derive(Debug, Clone)]
    struct Pinged;
    #[derive(Debug, Clone)]
    struct PeekLoaded;
    #[derive(Debug, Clone)]
    struct PingStored;
    #[derive(Debug, Clone)]
    struct PingReply;
    #[derive(Debug, Clone)]
    struct PingFailed;

    #[test]
    fn test_declared_categories() {
        assert_eq!(Ping::CATEGORY, Category::Command);
        assert_eq!(Peek::CATEGORY, Category::Query);
        assert_eq!(PingContext::CATEGORY, Category::Context);
        assert_eq!(Pinged::CATEGORY, Category::Event(EventKind::BusinessDomain));
        assert_eq!(PeekLoaded::CATEGORY, Category::Event(EventKind::Read));
        assert_eq!(PingStored::CATEGORY, Category::Event(EventKind::Write));
        assert_eq!(PingReply::CATEGORY, Category::Event(EventKind::Response));
        assert_eq!(PingFailed::CATEGORY, Category::Error);
    }

    #[test]
    fn test_value_category_matches_contract() {
        let message: AnyMessage = Arc::new(Pinged);
        assert_eq!(message.category(), Category::Event(EventKind::BusinessDomain));
        assert_eq!(message.name(), "Pinged");
        assert!(message.as_any().downcast_ref::<Pinged>().is_some());
    }

    #[test]
    fn test_task_marker_covers_commands_and_queries() {
        fn assert_task<T: Task>() {}

        assert_task::<Ping>();
        assert_task::<Peek>();
    }

    #[test]
    fn test_category_predicates() {
        assert!(Category::Command.is_task());
        assert!(Category::Query.is_task());
        assert!(Category::Error.is_event());
        assert!(Category::Error.is_error());
        assert!(Category::Context.is_context());
        assert!(!Category::Event(EventKind::Read).is_task());
    }
}
