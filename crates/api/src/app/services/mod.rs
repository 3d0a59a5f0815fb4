//! Service wiring: repositories in, HTTP-shaped results out.

use std::sync::Arc;

use thiserror::Error;

use workforce_core::DomainError;
use workforce_infra::repository::schema;
use workforce_infra::{
    AppConfig, CompanyRepository, EmployeeRepository, InMemoryCompanyRepository,
    InMemoryEmployeeRepository, PostgresCompanyRepository, PostgresEmployeeRepository, RepoError,
    StoreBackend,
};

pub mod companies;
pub mod employees;

pub use companies::CompanyService;
pub use employees::EmployeeService;

/// Failure of a service operation.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Missing record or rejected input.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The store itself failed.
    #[error(transparent)]
    Repository(#[from] RepoError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Everything the HTTP handlers need, shared behind an `Arc`.
#[derive(Clone)]
pub struct AppServices {
    pub employees: EmployeeService,
    pub companies: CompanyService,
}

impl AppServices {
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        companies: Arc<dyn CompanyRepository>,
    ) -> Self {
        Self {
            employees: EmployeeService::new(employees.clone()),
            companies: CompanyService::new(companies, employees),
        }
    }

    /// Fresh, empty in-memory stores (dev/test).
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryEmployeeRepository::new()),
            Arc::new(InMemoryCompanyRepository::new()),
        )
    }
}

pub async fn build_services(config: &AppConfig) -> Result<AppServices, RepoError> {
    match &config.store {
        StoreBackend::InMemory => {
            tracing::warn!("USE_PERSISTENT_STORES is not set; data lives in memory only");
            Ok(AppServices::in_memory())
        }
        StoreBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = workforce_infra::repository::connect(database_url, *max_connections).await?;
            schema::bootstrap(&pool).await?;
            tracing::info!(max_connections, "using postgres stores");

            Ok(AppServices::new(
                Arc::new(PostgresEmployeeRepository::new(pool.clone())),
                Arc::new(PostgresCompanyRepository::new(pool)),
            ))
        }
    }
}
