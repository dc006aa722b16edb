//! Integration tests for registry construction: conventions, tags, batch
//! registration, and routing order.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

mod common;

use common::*;
use cqproc::registry::ActorDef;
use cqproc::{actor, register_module, ActorRegistry, RegistryError, SemanticKind, SemanticTag};

// ============================================================================
// Convention-based classification
// ============================================================================

async fn employee_reader(_query: GetEmployee) {}

#[test]
fn test_name_conventions_map_to_kinds() {
    let cases: Vec<(&str, SemanticKind)> = vec![
        ("employee_creation_auditor", SemanticKind::Audit),
        ("create_employee_usecase", SemanticKind::Usecase),
        ("generate_work_email_usecase", SemanticKind::Usecase),
        ("create_employee_context", SemanticKind::Context),
        ("employee_writer", SemanticKind::Io),
        ("employee_reader", SemanticKind::Io),
    ];

    let mut registry = ActorRegistry::new();
    registry.add(actor!(employee_creation_auditor)).unwrap();
    registry.add(actor!(create_employee_usecase)).unwrap();
    registry.add(actor!(generate_work_email_usecase)).unwrap();
    registry.add(actor!(create_employee_context)).unwrap();
    registry.add(actor!(employee_writer)).unwrap();
    registry.add(actor!(employee_reader)).unwrap();

    let registered: Vec<(&str, SemanticKind)> = registry
        .iter()
        .map(|entry| (entry.name, entry.kind))
        .collect();
    assert_eq!(registered, cases);
}

#[test]
fn test_explicit_tags_match_convention_results() {
    // Tagged registration of suffix-free names is equivalent to the
    // convention: reader and writer both land on IO.
    let mut registry = ActorRegistry::new();
    registry
        .add(actor!(employee_creation_auditor).tagged(SemanticTag::Auditor))
        .unwrap();
    registry
        .add(ActorDef::new("create_employee", create_employee_usecase).tagged(SemanticTag::Usecase))
        .unwrap();
    registry
        .add(ActorDef::new("save_employee", employee_writer).tagged(SemanticTag::Writer))
        .unwrap();
    registry
        .add(ActorDef::new("get_employee", employee_reader).tagged(SemanticTag::Reader))
        .unwrap();
    registry
        .add(
            ActorDef::new("get_employee_context", create_employee_context)
                .tagged(SemanticTag::Context),
        )
        .unwrap();

    let kinds: Vec<SemanticKind> = registry.iter().map(|entry| entry.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SemanticKind::Audit,
            SemanticKind::Usecase,
            SemanticKind::Io,
            SemanticKind::Io,
            SemanticKind::Context,
        ]
    );
}

#[test]
fn test_unclassifiable_name_fails_setup() {
    let mut registry = ActorRegistry::new();
    let result = registry.add(ActorDef::new("store_employee", create_employee_usecase));
    assert!(matches!(
        result,
        Err(RegistryError::CannotDeriveActorPurpose("store_employee"))
    ));
}

// ============================================================================
// Batch registration
// ============================================================================

fn _shadow_usecase(_command: CreateEmployee) {}

#[test]
fn test_register_module_registers_every_listed_actor() {
    let mut registry = ActorRegistry::new();
    register_module!(registry, {
        employee_creation_auditor,
        create_employee_usecase,
        generate_work_email_usecase,
        create_employee_context,
        generate_supervised_employee_email_context,
        employee_writer,
    })
    .unwrap();

    let names: Vec<&str> = registry.iter().map(|entry| entry.name).collect();
    assert_eq!(
        names,
        vec![
            "employee_creation_auditor",
            "create_employee_usecase",
            "generate_work_email_usecase",
            "create_employee_context",
            "generate_supervised_employee_email_context",
            "employee_writer",
        ]
    );
}

#[test]
fn test_register_module_skips_underscored_names() {
    let mut registry = ActorRegistry::new();
    register_module!(registry, {
        create_employee_usecase,
        _shadow_usecase,
    })
    .unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(
        registry.iter().next().unwrap().name,
        "create_employee_usecase"
    );
}

#[test]
fn test_register_module_short_circuits_on_error() {
    fn unclassifiable(_command: CreateEmployee) {}

    let mut registry = ActorRegistry::new();
    let result = register_module!(registry, {
        unclassifiable,
        create_employee_usecase,
    });

    assert!(matches!(
        result,
        Err(RegistryError::CannotDeriveActorPurpose(_))
    ));
    // Nothing after the failing entry was registered.
    assert!(registry.is_empty());
}

// ============================================================================
// Routing order
// ============================================================================

#[test]
fn test_audits_precede_all_other_entries_per_contract() {
    fn second_auditor(command: CreateEmployee) -> CreateEmployee {
        command
    }

    let mut registry = ActorRegistry::new();
    registry.add(actor!(create_employee_usecase)).unwrap();
    registry
        .add(ActorDef::new("first_auditor", employee_creation_auditor))
        .unwrap();
    registry.add(actor!(second_auditor).tagged(SemanticTag::Auditor)).unwrap();

    let kinds: Vec<SemanticKind> = registry
        .get(cqproc::TypeKey::of::<CreateEmployee>())
        .map(|entry| entry.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            SemanticKind::Audit,
            SemanticKind::Audit,
            SemanticKind::Usecase,
        ]
    );
}

#[test]
fn test_skip_tag_is_honoured_in_batches() {
    let mut registry = ActorRegistry::new();
    registry
        .add(actor!(create_employee_usecase).skipped())
        .unwrap();
    registry.add(actor!(employee_writer)).unwrap();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.iter().next().unwrap().kind, SemanticKind::Io);
}

#[test]
fn test_merged_registries_route_like_one() {
    let mut commands = ActorRegistry::new();
    commands.add(actor!(create_employee_usecase)).unwrap();

    let mut audits = ActorRegistry::new();
    audits.add(actor!(employee_creation_auditor)).unwrap();

    commands.merge(audits);

    let kinds: Vec<SemanticKind> = commands
        .get(cqproc::TypeKey::of::<CreateEmployee>())
        .map(|entry| entry.kind)
        .collect();
    assert_eq!(kinds, vec![SemanticKind::Audit, SemanticKind::Usecase]);
}
