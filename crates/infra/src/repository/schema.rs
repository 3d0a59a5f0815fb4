//! Table bootstrap for the Postgres store.
//!
//! Idempotent `CREATE ... IF NOT EXISTS` statements run at startup; there is no
//! versioned migration history. `employees.company_id` intentionally has no
//! foreign key: deleting a company leaves its employees in place.

use sqlx::PgPool;

use super::r#trait::{RepoError, RepoResult};

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS companies (
        id   BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS employees (
        id         BIGSERIAL PRIMARY KEY,
        name       TEXT    NOT NULL,
        age        INTEGER NOT NULL,
        gender     TEXT    NOT NULL,
        salary     BIGINT  NOT NULL,
        company_id BIGINT  NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS employees_company_id_idx ON employees (company_id)",
    "CREATE INDEX IF NOT EXISTS employees_gender_idx ON employees (gender)",
];

pub async fn bootstrap(pool: &PgPool) -> RepoResult<()> {
    for statement in STATEMENTS {
        sqlx::query(*statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::Store {
                operation: "bootstrap_schema",
                message: e.to_string(),
            })?;
    }
    tracing::info!(tables = 2, "schema ready");
    Ok(())
}
