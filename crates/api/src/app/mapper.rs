//! Translation between wire DTOs and domain entities. No IO here; the
//! company headcount is looked up by the caller and passed in.

use workforce_companies::{Company, CompanyUpdate, NewCompany};
use workforce_employees::{Employee, EmployeeUpdate, NewEmployee};

use crate::app::dto::{
    CompanyRequest, CompanyResponse, CompanyUpdateRequest, EmployeeRequest, EmployeeResponse,
    EmployeeUpdateRequest,
};

pub fn employee_to_response(employee: &Employee) -> EmployeeResponse {
    EmployeeResponse {
        id: employee.id,
        name: employee.name.clone(),
        age: employee.age,
        gender: employee.gender.clone(),
    }
}

pub fn employee_request_to_new(request: EmployeeRequest) -> NewEmployee {
    NewEmployee {
        name: request.name,
        age: request.age,
        gender: request.gender,
        salary: request.salary,
        company_id: request.company_id,
    }
}

pub fn employee_update_from_request(request: EmployeeUpdateRequest) -> EmployeeUpdate {
    EmployeeUpdate {
        age: request.age,
        salary: request.salary,
    }
}

pub fn company_to_response(company: Company, employees_count: u64) -> CompanyResponse {
    CompanyResponse {
        id: company.id,
        name: company.name,
        employees_count,
    }
}

pub fn company_request_to_new(request: CompanyRequest) -> NewCompany {
    NewCompany { name: request.name }
}

pub fn company_update_from_request(request: CompanyUpdateRequest) -> CompanyUpdate {
    CompanyUpdate { name: request.name }
}

#[cfg(test)]
mod tests {
    use super::*;
    use workforce_core::{CompanyId, EmployeeId};

    #[test]
    fn employee_response_has_no_salary() {
        let employee = Employee {
            id: EmployeeId::new(5),
            name: "Bob".to_string(),
            age: 22,
            gender: "Male".to_string(),
            salary: 10000,
            company_id: Some(CompanyId::new(1)),
        };
        let value = serde_json::to_value(employee_to_response(&employee)).unwrap();
        assert_eq!(value["id"], 5);
        assert_eq!(value["name"], "Bob");
        assert!(value.get("salary").is_none());
    }

    #[test]
    fn employee_request_keeps_salary_and_company() {
        let new = employee_request_to_new(EmployeeRequest {
            name: "Alice".to_string(),
            age: 24,
            gender: "Female".to_string(),
            salary: 5000,
            company_id: Some(CompanyId::new(2)),
        });
        assert_eq!(new.salary, 5000);
        assert_eq!(new.company_id, Some(CompanyId::new(2)));
    }

    #[test]
    fn company_response_carries_given_count() {
        let company = Company {
            id: CompanyId::new(1),
            name: "OOCL".to_string(),
        };
        let response = company_to_response(company, 3);
        assert_eq!(response.employees_count, 3);
        assert_eq!(response.name, "OOCL");
    }
}
