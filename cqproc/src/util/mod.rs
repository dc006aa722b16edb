//! Shared identity types for packets, traces, actors, and message contracts.

pub mod ids;

pub use ids::{PacketId, TraceId, TypeKey};
