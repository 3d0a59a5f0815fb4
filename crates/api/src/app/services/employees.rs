use std::sync::Arc;

use workforce_core::{DomainError, EmployeeId, PageRequest};
use workforce_employees::Employee;
use workforce_infra::{EmployeeFilter, EmployeeRepository};

use super::{ServiceError, ServiceResult};
use crate::app::dto::{EmployeeRequest, EmployeeResponse, EmployeeUpdateRequest};
use crate::app::mapper;

#[derive(Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
}

fn to_responses(employees: Vec<Employee>) -> Vec<EmployeeResponse> {
    employees.iter().map(mapper::employee_to_response).collect()
}

impl EmployeeService {
    pub fn new(employees: Arc<dyn EmployeeRepository>) -> Self {
        Self { employees }
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<EmployeeResponse>> {
        Ok(to_responses(self.employees.find_all().await?))
    }

    pub async fn find_by_id(&self, id: EmployeeId) -> ServiceResult<EmployeeResponse> {
        let employee = self.load(id).await?;
        Ok(mapper::employee_to_response(&employee))
    }

    pub async fn find_all_by_gender(&self, gender: &str) -> ServiceResult<Vec<EmployeeResponse>> {
        let employees = self
            .employees
            .find_matching(&EmployeeFilter::by_gender(gender))
            .await?;
        Ok(to_responses(employees))
    }

    /// 1-indexed page over all employees in insertion order.
    pub async fn find_by_page(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> ServiceResult<Vec<EmployeeResponse>> {
        let page = PageRequest::new(page_number, page_size)?;
        let employees = self
            .employees
            .find_page(&EmployeeFilter::default(), page)
            .await?;
        Ok(to_responses(employees))
    }

    /// Page over the employees of one gender.
    pub async fn find_by_gender_page(
        &self,
        gender: &str,
        page_number: i64,
        page_size: i64,
    ) -> ServiceResult<Vec<EmployeeResponse>> {
        let page = PageRequest::new(page_number, page_size)?;
        let employees = self
            .employees
            .find_page(&EmployeeFilter::by_gender(gender), page)
            .await?;
        Ok(to_responses(employees))
    }

    pub async fn create(&self, request: EmployeeRequest) -> ServiceResult<EmployeeResponse> {
        let employee = self
            .employees
            .insert(mapper::employee_request_to_new(request))
            .await?;
        tracing::info!(employee_id = %employee.id, "employee created");
        Ok(mapper::employee_to_response(&employee))
    }

    /// Overwrite age and/or salary; everything else keeps its stored value.
    pub async fn update(&self, id: EmployeeId, request: EmployeeUpdateRequest) -> ServiceResult<()> {
        let mut employee = self.load(id).await?;
        mapper::employee_update_from_request(request).apply_to(&mut employee);

        if !self.employees.save(&employee).await? {
            // Deleted between the read and the write.
            return Err(DomainError::not_found("employee", id.get()).into());
        }
        tracing::info!(employee_id = %id, "employee updated");
        Ok(())
    }

    /// Idempotent: deleting an unknown id is not an error.
    pub async fn delete(&self, id: EmployeeId) -> ServiceResult<()> {
        let existed = self.employees.delete_by_id(id).await?;
        tracing::info!(employee_id = %id, existed, "employee deleted");
        Ok(())
    }

    async fn load(&self, id: EmployeeId) -> ServiceResult<Employee> {
        self.employees
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::not_found("employee", id.get())))
    }
}
