use std::sync::Arc;

use workforce_companies::Company;
use workforce_core::{CompanyId, DomainError, PageRequest};
use workforce_infra::{CompanyRepository, EmployeeFilter, EmployeeRepository};

use super::{ServiceError, ServiceResult};
use crate::app::dto::{CompanyRequest, CompanyResponse, CompanyUpdateRequest, EmployeeResponse};
use crate::app::mapper;

#[derive(Clone)]
pub struct CompanyService {
    companies: Arc<dyn CompanyRepository>,
    employees: Arc<dyn EmployeeRepository>,
}

impl CompanyService {
    pub fn new(
        companies: Arc<dyn CompanyRepository>,
        employees: Arc<dyn EmployeeRepository>,
    ) -> Self {
        Self {
            companies,
            employees,
        }
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<CompanyResponse>> {
        let companies = self.companies.find_all().await?;
        self.to_responses(companies).await
    }

    pub async fn find_by_page(
        &self,
        page_number: i64,
        page_size: i64,
    ) -> ServiceResult<Vec<CompanyResponse>> {
        let page = PageRequest::new(page_number, page_size)?;
        let companies = self.companies.find_page(page).await?;
        self.to_responses(companies).await
    }

    pub async fn find_by_id(&self, id: CompanyId) -> ServiceResult<CompanyResponse> {
        let company = self.load(id).await?;
        self.to_response(company).await
    }

    pub async fn create(&self, request: CompanyRequest) -> ServiceResult<CompanyResponse> {
        let company = self
            .companies
            .insert(mapper::company_request_to_new(request))
            .await?;
        tracing::info!(company_id = %company.id, "company created");
        // A fresh company starts empty even if stale rows already carry its id.
        Ok(mapper::company_to_response(company, 0))
    }

    pub async fn update(&self, id: CompanyId, request: CompanyUpdateRequest) -> ServiceResult<()> {
        let mut company = self.load(id).await?;
        mapper::company_update_from_request(request).apply_to(&mut company);

        if !self.companies.save(&company).await? {
            return Err(DomainError::not_found("company", id.get()).into());
        }
        tracing::info!(company_id = %id, "company updated");
        Ok(())
    }

    /// Removes the company row only. Its employees keep their `companyId`.
    pub async fn delete(&self, id: CompanyId) -> ServiceResult<()> {
        let existed = self.companies.delete_by_id(id).await?;
        tracing::info!(company_id = %id, existed, "company deleted");
        Ok(())
    }

    pub async fn find_employees_by_company_id(
        &self,
        id: CompanyId,
    ) -> ServiceResult<Vec<EmployeeResponse>> {
        self.load(id).await?;
        let employees = self
            .employees
            .find_matching(&EmployeeFilter::by_company(id))
            .await?;
        Ok(employees.iter().map(mapper::employee_to_response).collect())
    }

    async fn load(&self, id: CompanyId) -> ServiceResult<Company> {
        self.companies
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::from(DomainError::not_found("company", id.get())))
    }

    /// Headcount is read from the employee store each time, never cached.
    async fn to_response(&self, company: Company) -> ServiceResult<CompanyResponse> {
        let count = self.employees.count_by_company(company.id).await?;
        Ok(mapper::company_to_response(company, count))
    }

    async fn to_responses(&self, companies: Vec<Company>) -> ServiceResult<Vec<CompanyResponse>> {
        let mut responses = Vec::with_capacity(companies.len());
        for company in companies {
            responses.push(self.to_response(company).await?);
        }
        Ok(responses)
    }
}
