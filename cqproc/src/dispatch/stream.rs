// Layer 1: Standard library imports
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

// Layer 2: Third-party crate imports
// (none for this module)

// Layer 3: Internal module imports
use crate::message::AnyMessage;
use crate::util::TypeKey;

/// Per-dispatch deduplication table: the latest message of each concrete
/// type seen during this dispatch.
///
/// At most one message per contract. [`insert`](Stream::insert) is a no-op
/// when the contract is already present — a duplicate never re-triggers
/// jobs — while [`replace`](Stream::replace) overwrites unconditionally,
/// which is the audit handoff path.
#[derive(Debug, Default)]
pub struct Stream {
    latest: HashMap<TypeKey, AnyMessage>,
}

impl Stream {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record a message under its contract. Returns `true` when the
    /// contract was new; `false` leaves the stream untouched.
    pub fn insert(&mut self, message: AnyMessage) -> bool {
        match self.latest.entry(message.key()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(message);
                true
            }
        }
    }

    /// Overwrite the message recorded under its contract.
    pub fn replace(&mut self, message: AnyMessage) {
        self.latest.insert(message.key(), message);
    }

    /// The latest message of the given contract, if any.
    pub fn get(&self, contract: TypeKey) -> Option<&AnyMessage> {
        self.latest.get(&contract)
    }

    /// Whether a message of the given contract has been streamed.
    pub fn contains(&self, contract: TypeKey) -> bool {
        self.latest.contains_key(&contract)
    }

    /// Number of distinct contracts streamed.
    pub fn len(&self) -> usize {
        self.latest.len()
    }

    /// Whether nothing has been streamed yet.
    pub fn is_empty(&self) -> bool {
        self.latest.is_empty()
    }
}
