//! Postgres-backed repositories.
//!
//! ## Error Mapping
//!
//! | SQLx Error | RepoError |
//! |------------|-----------|
//! | `PoolClosed` / `PoolTimedOut` / `Io` | `Unavailable` |
//! | `ColumnDecode` / `ColumnNotFound` / `Decode` | `MalformedRow` |
//! | anything else | `Store` |
//!
//! ## Ordering
//!
//! Ids come from `BIGSERIAL` columns, so `ORDER BY id` is insertion order.
//! `LIMIT NULL` is Postgres for "no limit", which lets one statement serve both
//! the paged and unpaged reads.

use std::sync::Arc;

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::instrument;

use workforce_companies::{Company, NewCompany};
use workforce_core::{CompanyId, EmployeeId, PageRequest};
use workforce_employees::{Employee, NewEmployee};

use super::r#trait::{CompanyRepository, EmployeeFilter, EmployeeRepository, RepoError, RepoResult};

/// Open a connection pool.
pub async fn connect(database_url: &str, max_connections: u32) -> RepoResult<PgPool> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))
}

fn map_sqlx_error(operation: &'static str, err: sqlx::Error) -> RepoError {
    match err {
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut => {
            RepoError::Unavailable(format!("connection pool unavailable in {operation}"))
        }
        sqlx::Error::Io(e) => RepoError::Unavailable(format!("io error in {operation}: {e}")),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::Decode(_) => RepoError::MalformedRow {
            operation,
            message: err.to_string(),
        },
        sqlx::Error::Database(db_err) => RepoError::Store {
            operation,
            message: db_err.message().to_string(),
        },
        other => RepoError::Store {
            operation,
            message: other.to_string(),
        },
    }
}

fn page_bounds(page: Option<PageRequest>) -> (Option<i64>, i64) {
    match page {
        Some(p) => (Some(p.limit() as i64), p.offset() as i64),
        None => (None, 0),
    }
}

fn employee_from_row(row: &PgRow) -> Result<Employee, sqlx::Error> {
    Ok(Employee {
        id: EmployeeId::new(row.try_get::<i64, _>("id")?),
        name: row.try_get("name")?,
        age: row.try_get("age")?,
        gender: row.try_get("gender")?,
        salary: row.try_get("salary")?,
        company_id: row
            .try_get::<Option<i64>, _>("company_id")?
            .map(CompanyId::new),
    })
}

fn company_from_row(row: &PgRow) -> Result<Company, sqlx::Error> {
    Ok(Company {
        id: CompanyId::new(row.try_get::<i64, _>("id")?),
        name: row.try_get("name")?,
    })
}

/// Postgres employee store (`employees` table).
#[derive(Debug, Clone)]
pub struct PostgresEmployeeRepository {
    pool: Arc<PgPool>,
}

impl PostgresEmployeeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn select(
        &self,
        operation: &'static str,
        filter: &EmployeeFilter,
        page: Option<PageRequest>,
    ) -> RepoResult<Vec<Employee>> {
        let (limit, offset) = page_bounds(page);

        let rows = sqlx::query(
            r#"
            SELECT id, name, age, gender, salary, company_id
            FROM employees
            WHERE ($1::TEXT IS NULL OR gender = $1)
              AND ($2::BIGINT IS NULL OR company_id = $2)
            ORDER BY id ASC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(filter.gender.as_deref())
        .bind(filter.company_id.map(CompanyId::get))
        .bind(limit)
        .bind(offset)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error(operation, e))?;

        let employees = rows
            .iter()
            .map(employee_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error(operation, e))?;

        tracing::debug!(operation, count = employees.len(), "employees loaded");
        Ok(employees)
    }
}

#[async_trait::async_trait]
impl EmployeeRepository for PostgresEmployeeRepository {
    #[instrument(skip(self), fields(employee_id = %id), err)]
    async fn find_by_id(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, age, gender, salary, company_id
            FROM employees
            WHERE id = $1
            "#,
        )
        .bind(id.get())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_employee_by_id", e))?;

        row.as_ref()
            .map(employee_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("find_employee_by_id", e))
    }

    #[instrument(skip(self), err)]
    async fn find_matching(&self, filter: &EmployeeFilter) -> RepoResult<Vec<Employee>> {
        self.select("find_employees", filter, None).await
    }

    #[instrument(skip(self), err)]
    async fn find_page(
        &self,
        filter: &EmployeeFilter,
        page: PageRequest,
    ) -> RepoResult<Vec<Employee>> {
        self.select("find_employee_page", filter, Some(page)).await
    }

    #[instrument(skip(self, new), err)]
    async fn insert(&self, new: NewEmployee) -> RepoResult<Employee> {
        let row = sqlx::query(
            r#"
            INSERT INTO employees (name, age, gender, salary, company_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, name, age, gender, salary, company_id
            "#,
        )
        .bind(&new.name)
        .bind(new.age)
        .bind(&new.gender)
        .bind(new.salary)
        .bind(new.company_id.map(CompanyId::get))
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_employee", e))?;

        employee_from_row(&row).map_err(|e| map_sqlx_error("insert_employee", e))
    }

    #[instrument(skip(self, employee), fields(employee_id = %employee.id), err)]
    async fn save(&self, employee: &Employee) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET name = $2, age = $3, gender = $4, salary = $5, company_id = $6
            WHERE id = $1
            "#,
        )
        .bind(employee.id.get())
        .bind(&employee.name)
        .bind(employee.age)
        .bind(&employee.gender)
        .bind(employee.salary)
        .bind(employee.company_id.map(CompanyId::get))
        .execute(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error("save_employee", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(employee_id = %id), err)]
    async fn delete_by_id(&self, id: EmployeeId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_employee", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(company_id = %company_id), err)]
    async fn count_by_company(&self, company_id: CompanyId) -> RepoResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE company_id = $1")
            .bind(company_id.get())
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("count_employees_by_company", e))?;

        Ok(u64::try_from(count).unwrap_or(0))
    }

    #[instrument(skip(self), err)]
    async fn delete_all(&self) -> RepoResult<()> {
        sqlx::query("DELETE FROM employees")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_all_employees", e))?;
        Ok(())
    }
}

/// Postgres company store (`companies` table).
#[derive(Debug, Clone)]
pub struct PostgresCompanyRepository {
    pool: Arc<PgPool>,
}

impl PostgresCompanyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool: Arc::new(pool),
        }
    }

    async fn select(&self, operation: &'static str, page: Option<PageRequest>) -> RepoResult<Vec<Company>> {
        let (limit, offset) = page_bounds(page);

        let rows = sqlx::query(
            r#"
            SELECT id, name
            FROM companies
            ORDER BY id ASC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error(operation, e))?;

        rows.iter()
            .map(company_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error(operation, e))
    }
}

#[async_trait::async_trait]
impl CompanyRepository for PostgresCompanyRepository {
    #[instrument(skip(self), err)]
    async fn find_all(&self) -> RepoResult<Vec<Company>> {
        self.select("find_companies", None).await
    }

    #[instrument(skip(self), fields(company_id = %id), err)]
    async fn find_by_id(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        let row = sqlx::query("SELECT id, name FROM companies WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_company_by_id", e))?;

        row.as_ref()
            .map(company_from_row)
            .transpose()
            .map_err(|e| map_sqlx_error("find_company_by_id", e))
    }

    #[instrument(skip(self), err)]
    async fn find_page(&self, page: PageRequest) -> RepoResult<Vec<Company>> {
        self.select("find_company_page", Some(page)).await
    }

    #[instrument(skip(self, new), err)]
    async fn insert(&self, new: NewCompany) -> RepoResult<Company> {
        let row = sqlx::query("INSERT INTO companies (name) VALUES ($1) RETURNING id, name")
            .bind(&new.name)
            .fetch_one(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_company", e))?;

        company_from_row(&row).map_err(|e| map_sqlx_error("insert_company", e))
    }

    #[instrument(skip(self, company), fields(company_id = %company.id), err)]
    async fn save(&self, company: &Company) -> RepoResult<bool> {
        let result = sqlx::query("UPDATE companies SET name = $2 WHERE id = $1")
            .bind(company.id.get())
            .bind(&company.name)
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("save_company", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), fields(company_id = %id), err)]
    async fn delete_by_id(&self, id: CompanyId) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM companies WHERE id = $1")
            .bind(id.get())
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_company", e))?;

        Ok(result.rows_affected() > 0)
    }

    #[instrument(skip(self), err)]
    async fn delete_all(&self) -> RepoResult<()> {
        sqlx::query("DELETE FROM companies")
            .execute(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_all_companies", e))?;
        Ok(())
    }
}
