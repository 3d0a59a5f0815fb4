use thiserror::Error;

use workforce_companies::{Company, NewCompany};
use workforce_core::{CompanyId, EmployeeId, PageRequest};
use workforce_employees::{Employee, NewEmployee};

/// Repository operation error.
///
/// These are **infrastructure errors**. A lookup that simply finds nothing is
/// not an error here; it comes back as `Ok(None)` / `Ok(false)` and the service
/// layer decides whether that means "not found".
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("store error in {operation}: {message}")]
    Store {
        operation: &'static str,
        message: String,
    },

    #[error("malformed row in {operation}: {message}")]
    MalformedRow {
        operation: &'static str,
        message: String,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Predicate for employee lookups. Every `Some` criterion must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub gender: Option<String>,
    pub company_id: Option<CompanyId>,
}

impl EmployeeFilter {
    pub fn by_gender(gender: impl Into<String>) -> Self {
        Self {
            gender: Some(gender.into()),
            ..Self::default()
        }
    }

    pub fn by_company(company_id: CompanyId) -> Self {
        Self {
            company_id: Some(company_id),
            ..Self::default()
        }
    }

    pub fn matches(&self, employee: &Employee) -> bool {
        self.gender.as_deref().is_none_or(|g| employee.has_gender(g))
            && self.company_id.is_none_or(|c| employee.works_for(c))
    }
}

/// Employee persistence.
///
/// All list operations return records in insertion order (ascending id).
#[async_trait::async_trait]
pub trait EmployeeRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<Employee>> {
        self.find_matching(&EmployeeFilter::default()).await
    }

    async fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;

    async fn find_matching(&self, filter: &EmployeeFilter) -> RepoResult<Vec<Employee>>;

    /// One page of the records matching `filter`.
    async fn find_page(
        &self,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> RepoResult<Vec<Employee>>;

    /// Persist a new employee; the store assigns the id.
    async fn insert(&self, new: NewEmployee) -> RepoResult<Employee>;

    /// Overwrite an existing employee. Returns `false` if no row has that id.
    async fn save(&self, employee: &Employee) -> RepoResult<bool>;

    /// Hard delete. Returns whether a row existed.
    async fn delete_by_id(&self, id: EmployeeId) -> RepoResult<bool>;

    async fn count_by_company(&self, company_id: CompanyId) -> RepoResult<u64>;

    async fn delete_all(&self) -> RepoResult<()>;
}

/// Company persistence. Lists are in insertion order (ascending id).
#[async_trait::async_trait]
pub trait CompanyRepository: Send + Sync {
    async fn find_all(&self) -> RepoResult<Vec<Company>>;

    async fn find_by_id(&self, id: CompanyId) -> RepoResult<Option<Company>>;

    async fn find_page(&self, page: PageRequest) -> RepoResult<Vec<Company>>;

    async fn insert(&self, new: NewCompany) -> RepoResult<Company>;

    async fn save(&self, company: &Company) -> RepoResult<bool>;

    /// Hard delete. Employees pointing at this company are left as they are.
    async fn delete_by_id(&self, id: CompanyId) -> RepoResult<bool>;

    async fn delete_all(&self) -> RepoResult<()>;
}
