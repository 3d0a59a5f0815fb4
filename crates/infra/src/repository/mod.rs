//! Persistence boundary for employees and companies.
//!
//! Services only see the async traits in [`r#trait`]; the in-memory
//! implementations back tests and local runs, the Postgres ones back
//! deployments.

pub mod in_memory;
pub mod postgres;
pub mod schema;
pub mod r#trait;

pub use in_memory::{InMemoryCompanyRepository, InMemoryEmployeeRepository};
pub use postgres::{connect, PostgresCompanyRepository, PostgresEmployeeRepository};
pub use r#trait::{
    CompanyRepository, EmployeeFilter, EmployeeRepository, RepoError, RepoResult,
};
