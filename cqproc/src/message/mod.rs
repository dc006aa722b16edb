//! Message taxonomy and envelopes.
//!
//! Every value on the bus belongs to exactly one semantic [`Category`]:
//! commands and queries (together, tasks), context values, events (business
//! domain, read, write, response), and terminal errors. User types declare
//! their category once through the [`messages!`](crate::messages) macro and
//! are moved around type-erased as [`AnyMessage`].

pub mod envelope;
pub mod error;
pub mod taxonomy;

mod macros;

pub use envelope::Packet;
pub use error::ErrorEvent;
pub use taxonomy::{AnyMessage, Category, Contract, EventKind, Message, MessageBatch, Task};
