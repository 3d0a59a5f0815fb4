//! Infrastructure layer: repositories, Postgres wiring, configuration.

pub mod config;
pub mod repository;

pub use config::{AppConfig, ConfigError, StoreBackend};
pub use repository::{
    CompanyRepository, EmployeeFilter, EmployeeRepository, InMemoryCompanyRepository,
    InMemoryEmployeeRepository, PostgresCompanyRepository, PostgresEmployeeRepository, RepoError,
    RepoResult,
};
