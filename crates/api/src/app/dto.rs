use serde::{Deserialize, Serialize};

use workforce_core::{CompanyId, DomainError, DomainResult, EmployeeId};

// -------------------------
// Request DTOs
// -------------------------

/// Body of `POST /employees`. Every field except `companyId` is required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRequest {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub salary: i64,
    #[serde(default)]
    pub company_id: Option<CompanyId>,
}

/// Body of `PUT /employees/{id}`. Absent and `null` both mean "leave as is".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdateRequest {
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub salary: Option<i64>,
}

/// Body of `POST /companies`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyRequest {
    pub name: String,
}

/// Body of `PUT /companies/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyUpdateRequest {
    #[serde(default)]
    pub name: Option<String>,
}

/// Query string of `GET /employees`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeListQuery {
    pub gender: Option<String>,
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl EmployeeListQuery {
    pub fn page(&self) -> DomainResult<Option<(i64, i64)>> {
        page_params(self.page_number, self.page_size)
    }
}

/// Query string of `GET /companies`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyListQuery {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl CompanyListQuery {
    pub fn page(&self) -> DomainResult<Option<(i64, i64)>> {
        page_params(self.page_number, self.page_size)
    }
}

/// Paging applies only when both parameters are present.
fn page_params(number: Option<i64>, size: Option<i64>) -> DomainResult<Option<(i64, i64)>> {
    match (number, size) {
        (Some(number), Some(size)) => Ok(Some((number, size))),
        (None, None) => Ok(None),
        _ => Err(DomainError::validation(
            "pageNumber and pageSize must be provided together",
        )),
    }
}

// -------------------------
// Response DTOs
// -------------------------

/// Employee as seen by clients. There is deliberately no salary field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeResponse {
    pub id: EmployeeId,
    pub name: String,
    pub age: i32,
    pub gender: String,
}

/// Company with its live headcount; never embeds the employee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyResponse {
    pub id: CompanyId,
    pub name: String,
    pub employees_count: u64,
}
