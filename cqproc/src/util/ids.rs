// Layer 1: Standard library imports
use std::any::{type_name, TypeId};
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

// Layer 2: Third-party crate imports
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Layer 3: Internal module imports
// (none)

/// Unique identifier for one emitted packet.
///
/// # Example
/// ```rust
/// use cqproc::util::PacketId;
///
/// let id1 = PacketId::new();
/// let id2 = PacketId::new();
/// assert_ne!(id1, id2); // Globally unique
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PacketId(Uuid);

impl PacketId {
    /// Generate a new random PacketId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create PacketId from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PacketId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PacketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dispatch-wide correlation identifier.
///
/// Every packet synthesized during one dispatch carries the same trace id,
/// so a consumer can stitch the emitted stream back together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Generate a new random TraceId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create TraceId from existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TraceId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable identity of a message or dependency contract.
///
/// # Design
/// Equality and hashing use `std::any::TypeId` only, so two types with the
/// same short name in different modules can never alias each other in the
/// dispatch stream or the routing index. The short type name is carried
/// purely for display and logging.
///
/// # Example
/// ```rust
/// use cqproc::util::TypeKey;
///
/// struct CreateEmployee;
///
/// let key = TypeKey::of::<CreateEmployee>();
/// assert_eq!(key.name(), "CreateEmployee");
/// assert_eq!(key, TypeKey::of::<CreateEmployee>());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Derive the key of a concrete type.
    pub fn of<T: 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: short_name(type_name::<T>()),
        }
    }

    /// Short type name, without the module path.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The underlying `TypeId`.
    pub fn type_id(&self) -> TypeId {
        self.id
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Strip the module path from a type or function path.
pub(crate) fn short_name(full: &'static str) -> &'static str {
    full.rsplit("::").next().unwrap_or(full).trim()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_packet_id_uniqueness() {
        assert_ne!(PacketId::new(), PacketId::new());
    }

    #[test]
    fn test_trace_id_roundtrip() {
        let uuid = Uuid::new_v4();
        let id = TraceId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), &uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_type_key_equality_by_type() {
        struct A;
        struct B;

        assert_eq!(TypeKey::of::<A>(), TypeKey::of::<A>());
        assert_ne!(TypeKey::of::<A>(), TypeKey::of::<B>());
    }

    #[test]
    fn test_type_key_short_name() {
        mod inner {
            pub struct Deep;
        }
        assert_eq!(TypeKey::of::<inner::Deep>().name(), "Deep");
    }

    #[test]
    fn test_short_name_handles_spaced_paths() {
        // stringify!(a::b) produces "a :: b"
        assert_eq!(short_name("fixtures :: employee_writer"), "employee_writer");
        assert_eq!(short_name("bare"), "bare");
    }
}
