// Layer 1: Standard library imports
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

// Layer 2: Third-party crate imports
use tracing::debug;

// Layer 3: Internal module imports
use super::entry::{ActorEntry, ActorId, ActorParameters, SemanticKind};
use super::error::RegistryError;
use super::into_actor::{ActorDef, IntoActor};
use crate::util::TypeKey;

/// Name-convention table, scanned in order; the first matching suffix wins.
const SUFFIX_KINDS: &[(&str, SemanticKind)] = &[
    ("_usecase", SemanticKind::Usecase),
    ("_io", SemanticKind::Io),
    ("_reader", SemanticKind::Io),
    ("_writer", SemanticKind::Io),
    ("_auditor", SemanticKind::Audit),
    ("_context", SemanticKind::Context),
    ("_response", SemanticKind::Response),
];

/// Routing index from message contracts to the actors consuming them.
///
/// A registry is built once — per process or per test — by
/// [`add`](ActorRegistry::add)ing actor functions or batching them through
/// [`register_module!`](crate::register_module), and is append-only: no
/// entry mutates after registration, so it may be shared (behind an `Arc`)
/// across any number of dispatches.
///
/// # Classification
///
/// An actor's semantic kind comes from its explicit
/// [`SemanticTag`](super::SemanticTag) when one is set, otherwise from its
/// name suffix (`_usecase`, `_io`, `_reader`, `_writer`, `_auditor`,
/// `_context`, `_response`). A `skip` tag excludes the function entirely.
///
/// # Indexing
///
/// - CONTEXT entries are indexed under the context contract they *produce*,
///   which is how the loop finds the producer of a missing context value.
/// - Every other entry is indexed under each of its domain and context
///   parameter contracts; AUDIT entries are prepended so that
///   [`get`](ActorRegistry::get) yields audits strictly before anything
///   else for the same contract.
#[derive(Default)]
pub struct ActorRegistry {
    actors: HashMap<ActorId, Arc<ActorEntry>>,
    order: Vec<ActorId>,
    routes: HashMap<TypeKey, Vec<ActorId>>,
}

impl ActorRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify and index one actor function.
    ///
    /// Returns the entry id, or `None` when the actor is tagged `skip`.
    /// Re-adding the same function is a no-op: the derived id is stable,
    /// and an id already present leaves the registry untouched.
    ///
    /// # Errors
    ///
    /// - [`RegistryError::CannotDeriveActorPurpose`] when neither a tag nor
    ///   a name suffix identifies the semantic kind.
    /// - [`RegistryError::CannotDefineActorParameter`] when the signature
    ///   has no domain parameter.
    /// - [`RegistryError::CannotRegisterActor`] when a CONTEXT actor does
    ///   not declare a context-typed return.
    pub fn add<F, Marker>(&mut self, def: ActorDef<F>) -> Result<Option<ActorId>, RegistryError>
    where
        F: IntoActor<Marker> + 'static,
    {
        let (name, tag, function) = def.into_inner();
        let kind = match tag {
            Some(tag) => match tag.kind() {
                Some(kind) => kind,
                None => {
                    debug!(actor = name, "actor tagged skip, ignoring");
                    return Ok(None);
                }
            },
            None => {
                suffix_kind(name).ok_or(RegistryError::CannotDeriveActorPurpose(name))?
            }
        };

        let id = ActorId::derive(name, TypeId::of::<F>());
        if self.actors.contains_key(&id) {
            return Ok(Some(id));
        }

        let parts = function.into_parts();
        let parameters = ActorParameters::split(parts.params);
        if parameters.domain.is_empty() {
            return Err(RegistryError::CannotDefineActorParameter(name));
        }
        if kind == SemanticKind::Context {
            let produces_context =
                matches!(parts.output.category, Some(category) if category.is_context());
            if !produces_context {
                return Err(RegistryError::CannotRegisterActor {
                    actor: name,
                    reason: "context actors must declare a context-typed return".to_string(),
                });
            }
        }

        debug!(actor = name, kind = ?kind, id = %id, "actor registered");
        self.index(Arc::new(ActorEntry {
            id,
            name,
            kind,
            parameters,
            output: parts.output,
            runtime: parts.executable,
        }));
        Ok(Some(id))
    }

    /// Every entry keyed on the given contract: audits first, then the
    /// rest in registration order.
    pub fn get(&self, contract: TypeKey) -> impl Iterator<Item = &Arc<ActorEntry>> + '_ {
        self.routes
            .get(&contract)
            .into_iter()
            .flatten()
            .filter_map(|id| self.actors.get(id))
    }

    /// Look up one entry by id.
    pub fn get_by_id(&self, id: ActorId) -> Option<&Arc<ActorEntry>> {
        self.actors.get(&id)
    }

    /// All entries, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ActorEntry>> + '_ {
        self.order.iter().filter_map(|id| self.actors.get(id))
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.actors.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.actors.is_empty()
    }

    /// Re-index every entry of another registry into this one.
    ///
    /// Entries already present (by id) are left untouched.
    pub fn merge(&mut self, other: ActorRegistry) {
        for id in other.order {
            if self.actors.contains_key(&id) {
                continue;
            }
            if let Some(entry) = other.actors.get(&id) {
                self.index(Arc::clone(entry));
            }
        }
    }

    fn index(&mut self, entry: Arc<ActorEntry>) {
        self.order.push(entry.id);
        match entry.kind {
            SemanticKind::Context => {
                if let Some(contract) = entry.output.contract {
                    self.routes.entry(contract).or_default().push(entry.id);
                }
            }
            SemanticKind::Audit => {
                for contract in entry.parameters.message_contracts() {
                    self.routes.entry(contract).or_default().insert(0, entry.id);
                }
            }
            _ => {
                for contract in entry.parameters.message_contracts() {
                    self.routes.entry(contract).or_default().push(entry.id);
                }
            }
        }
        self.actors.insert(entry.id, entry);
    }
}

impl std::fmt::Debug for ActorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActorRegistry")
            .field("actors", &self.order.len())
            .field("contracts", &self.routes.len())
            .finish()
    }
}

fn suffix_kind(name: &str) -> Option<SemanticKind> {
    SUFFIX_KINDS
        .iter()
        .find(|(suffix, _)| name.ends_with(suffix))
        .map(|(_, kind)| *kind)
}
