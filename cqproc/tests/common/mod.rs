//! Shared employee fixtures for the integration suites.

#![allow(dead_code)]

use chrono::{Datelike, NaiveDate};
use parking_lot::Mutex;
use uuid::Uuid;

use cqproc::registry::Dep;
use cqproc::{messages, register_module, ActorRegistry};

/// Route dispatch logs to the test output when `RUST_LOG` asks for them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CreateEmployee {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct GetEmployee {
    pub id: u64,
}

#[derive(Debug, Clone)]
pub struct CreateEmployeeContext {
    pub is_exists: bool,
}

#[derive(Debug, Clone)]
pub struct GenerateEmployeeEmailContext {
    pub server: String,
}

#[derive(Debug, Clone)]
pub struct EmployeeCreated {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub birth_date: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct EmployeeWorkEmailGenerated {
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct EmployeeStored {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone)]
pub struct EmployeeDuplicated {
    pub first_name: String,
    pub last_name: String,
}

messages! {
    command CreateEmployee;
    query GetEmployee;
    context CreateEmployeeContext;
    context GenerateEmployeeEmailContext;
    domain_event EmployeeCreated;
    domain_event EmployeeWorkEmailGenerated;
    write_event EmployeeStored;
    error EmployeeDuplicated;
}

// ---------------------------------------------------------------------------
// Test doubles
// ---------------------------------------------------------------------------

/// Deterministic repository: ids derive from the save counter.
#[derive(Debug, Default)]
pub struct EmployeeRepository {
    saved: Mutex<u32>,
}

impl EmployeeRepository {
    pub fn save(&self, _first_name: &str, _last_name: &str) -> Uuid {
        let mut saved = self.saved.lock();
        *saved += 1;
        Uuid::from_u128(u128::from(*saved))
    }

    pub fn saved_count(&self) -> u32 {
        *self.saved.lock()
    }
}

// ---------------------------------------------------------------------------
// Actors
// ---------------------------------------------------------------------------

pub fn create_employee_context(employee: CreateEmployee) -> CreateEmployeeContext {
    CreateEmployeeContext {
        is_exists: employee.first_name == "Alexander" && employee.last_name == "Petrov",
    }
}

pub fn employee_creation_auditor(
    employee: CreateEmployee,
    employee_context: CreateEmployeeContext,
) -> Result<CreateEmployee, EmployeeDuplicated> {
    if employee_context.is_exists {
        Err(EmployeeDuplicated {
            first_name: employee.first_name,
            last_name: employee.last_name,
        })
    } else {
        Ok(employee)
    }
}

pub fn create_employee_usecase(employee: CreateEmployee) -> EmployeeCreated {
    EmployeeCreated {
        id: Uuid::new_v4(),
        first_name: employee.first_name,
        last_name: employee.last_name,
        phone: employee.phone,
        birth_date: employee.birth_date,
    }
}

pub fn generate_supervised_employee_email_context(
    employee: EmployeeCreated,
) -> GenerateEmployeeEmailContext {
    let server = if employee.birth_date.year() < 1991 {
        "example.su"
    } else {
        "example.ru"
    };
    GenerateEmployeeEmailContext {
        server: server.to_string(),
    }
}

pub fn generate_work_email_usecase(
    employee: EmployeeCreated,
    email_context: GenerateEmployeeEmailContext,
) -> EmployeeWorkEmailGenerated {
    EmployeeWorkEmailGenerated {
        email: format!(
            "{}.{}@{}",
            employee.first_name, employee.last_name, email_context.server
        ),
    }
}

pub async fn employee_writer(
    employee_created: EmployeeCreated,
    email_generated: EmployeeWorkEmailGenerated,
    employee_repository: Dep<EmployeeRepository>,
) -> EmployeeStored {
    EmployeeStored {
        id: employee_repository.save(&employee_created.first_name, &employee_created.last_name),
        email: email_generated.email,
    }
}

// ---------------------------------------------------------------------------
// Fixture builders
// ---------------------------------------------------------------------------

/// The full employee registry, in the canonical registration order.
pub fn employee_registry() -> ActorRegistry {
    let mut registry = ActorRegistry::new();
    #[allow(clippy::unwrap_used)]
    register_module!(registry, {
        employee_creation_auditor,
        create_employee_usecase,
        generate_work_email_usecase,
        create_employee_context,
        generate_supervised_employee_email_context,
        employee_writer,
    })
    .unwrap();
    registry
}

pub fn john_doe() -> CreateEmployee {
    CreateEmployee {
        first_name: "John".to_string(),
        last_name: "Doe".to_string(),
        phone: "123456789".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1978, 3, 4).unwrap_or_default(),
    }
}

pub fn alexander_petrov() -> CreateEmployee {
    CreateEmployee {
        first_name: "Alexander".to_string(),
        last_name: "Petrov".to_string(),
        phone: "123456789".to_string(),
        birth_date: NaiveDate::from_ymd_opt(1998, 3, 4).unwrap_or_default(),
    }
}
