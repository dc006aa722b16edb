// Layer 1: Standard library imports
// (none)

// Layer 2: Third-party crate imports
use chrono::{DateTime, Utc};

// Layer 3: Internal module imports
use super::taxonomy::{AnyMessage, Category, Contract};
use crate::util::{PacketId, TraceId};

/// Envelope synthesized by the processor for every emitted message.
///
/// All packets of one dispatch share a `trace_id`; the `id` and
/// `created_at` are fresh per packet. The payload stays type-erased and is
/// recovered with [`payload_as`](Packet::payload_as).
///
/// # Example
/// ```rust,ignore
/// let mut dispatch = processor.dispatch(CreateEmployee { .. });
/// while let Some(packet) = dispatch.next().await {
///     let packet = packet?;
///     if let Some(created) = packet.payload_as::<EmployeeCreated>() {
///         println!("{} created at {}", created.id, packet.created_at);
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Packet {
    /// Unique packet identifier.
    pub id: PacketId,

    /// Dispatch-wide correlation identifier.
    pub trace_id: TraceId,

    /// Packet creation timestamp.
    pub created_at: DateTime<Utc>,

    /// The emitted message.
    pub payload: AnyMessage,
}

impl Packet {
    pub(crate) fn new(payload: AnyMessage, trace_id: TraceId) -> Self {
        Self {
            id: PacketId::new(),
            trace_id,
            created_at: Utc::now(),
            payload,
        }
    }

    /// Category of the carried message.
    pub fn category(&self) -> Category {
        self.payload.category()
    }

    /// Short type name of the carried message.
    pub fn name(&self) -> &'static str {
        self.payload.name()
    }

    /// Whether the carried message terminates the dispatch.
    pub fn is_error(&self) -> bool {
        self.payload.category().is_error()
    }

    /// Downcast the payload to a concrete message type.
    pub fn payload_as<M: Contract>(&self) -> Option<&M> {
        self.payload.as_any().downcast_ref::<M>()
    }
}
