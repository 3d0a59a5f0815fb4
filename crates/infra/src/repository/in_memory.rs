use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use workforce_companies::{Company, NewCompany};
use workforce_core::{CompanyId, EmployeeId, Entity, PageRequest};
use workforce_employees::{Employee, NewEmployee};

use super::r#trait::{CompanyRepository, EmployeeFilter, EmployeeRepository, RepoError, RepoResult};

fn poisoned() -> RepoError {
    RepoError::Unavailable("lock poisoned".to_string())
}

/// Id sequence mimicking a `BIGSERIAL` column: starts at 1, never reused.
#[derive(Debug)]
struct Sequence(AtomicI64);

impl Sequence {
    fn new() -> Self {
        Self(AtomicI64::new(1))
    }

    fn next(&self) -> i64 {
        self.0.fetch_add(1, Ordering::Relaxed)
    }
}

/// Rows keyed by entity id. A `BTreeMap` over a monotonic sequence keeps
/// iteration in insertion order.
#[derive(Debug)]
struct Table<E: Entity> {
    rows: RwLock<BTreeMap<E::Id, E>>,
    ids: Sequence,
}

impl<E: Entity + Clone> Table<E> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            ids: Sequence::new(),
        }
    }

    fn read(&self) -> RepoResult<RwLockReadGuard<'_, BTreeMap<E::Id, E>>> {
        self.rows.read().map_err(|_| poisoned())
    }

    fn write(&self) -> RepoResult<RwLockWriteGuard<'_, BTreeMap<E::Id, E>>> {
        self.rows.write().map_err(|_| poisoned())
    }

    fn get(&self, id: E::Id) -> RepoResult<Option<E>> {
        Ok(self.read()?.get(&id).cloned())
    }

    fn scan(&self, keep: impl Fn(&E) -> bool) -> RepoResult<Vec<E>> {
        Ok(self.read()?.values().filter(|row| keep(row)).cloned().collect())
    }

    fn count(&self, keep: impl Fn(&E) -> bool) -> RepoResult<u64> {
        let matching = self.read()?.values().filter(|row| keep(row)).count();
        Ok(u64::try_from(matching).unwrap_or(u64::MAX))
    }

    /// Mint the next id and store the row built from it.
    fn insert_with(&self, build: impl FnOnce(i64) -> E) -> RepoResult<E> {
        let mut rows = self.write()?;
        let row = build(self.ids.next());
        rows.insert(row.id(), row.clone());
        Ok(row)
    }

    /// Overwrite an existing row; `false` when its id is unknown.
    fn replace(&self, row: &E) -> RepoResult<bool> {
        let mut rows = self.write()?;
        match rows.get_mut(&row.id()) {
            Some(stored) => {
                *stored = row.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn remove(&self, id: E::Id) -> RepoResult<bool> {
        Ok(self.write()?.remove(&id).is_some())
    }

    fn clear(&self) -> RepoResult<()> {
        self.write()?.clear();
        Ok(())
    }
}

/// In-memory employee store.
///
/// Intended for tests/dev.
#[derive(Debug)]
pub struct InMemoryEmployeeRepository {
    table: Table<Employee>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryEmployeeRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        self.table.get(id)
    }

    async fn find_matching(&self, filter: &EmployeeFilter) -> RepoResult<Vec<Employee>> {
        self.table.scan(|e| filter.matches(e))
    }

    async fn find_page(
        &self,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> RepoResult<Vec<Employee>> {
        let matching = self.find_matching(filter).await?;
        let window = page.window(matching.len());
        Ok(matching[window].to_vec())
    }

    async fn insert(&self, new: NewEmployee) -> RepoResult<Employee> {
        let employee = self
            .table
            .insert_with(|id| Employee::from_new(EmployeeId::new(id), new))?;
        tracing::debug!(employee_id = %employee.id, "employee inserted");
        Ok(employee)
    }

    async fn save(&self, employee: &Employee) -> RepoResult<bool> {
        self.table.replace(employee)
    }

    async fn delete_by_id(&self, id: EmployeeId) -> RepoResult<bool> {
        self.table.remove(id)
    }

    async fn count_by_company(&self, company_id: CompanyId) -> RepoResult<u64> {
        self.table.count(|e| e.works_for(company_id))
    }

    async fn delete_all(&self) -> RepoResult<()> {
        self.table.clear()
    }
}

/// In-memory company store. Same ordering guarantees as
/// [`InMemoryEmployeeRepository`].
#[derive(Debug)]
pub struct InMemoryCompanyRepository {
    table: Table<Company>,
}

impl InMemoryCompanyRepository {
    pub fn new() -> Self {
        Self {
            table: Table::new(),
        }
    }
}

impl Default for InMemoryCompanyRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl CompanyRepository for InMemoryCompanyRepository {
    async fn find_all(&self) -> RepoResult<Vec<Company>> {
        self.table.scan(|_| true)
    }

    async fn find_by_id(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        self.table.get(id)
    }

    async fn find_page(&self, page: PageRequest) -> RepoResult<Vec<Company>> {
        let rows = self.table.read()?;
        let window = page.window(rows.len());
        Ok(rows
            .values()
            .skip(window.start)
            .take(window.len())
            .cloned()
            .collect())
    }

    async fn insert(&self, new: NewCompany) -> RepoResult<Company> {
        let company = self
            .table
            .insert_with(|id| Company::from_new(CompanyId::new(id), new))?;
        tracing::debug!(company_id = %company.id, "company inserted");
        Ok(company)
    }

    async fn save(&self, company: &Company) -> RepoResult<bool> {
        self.table.replace(company)
    }

    async fn delete_by_id(&self, id: CompanyId) -> RepoResult<bool> {
        self.table.remove(id)
    }

    async fn delete_all(&self) -> RepoResult<()> {
        self.table.clear()
    }
}
