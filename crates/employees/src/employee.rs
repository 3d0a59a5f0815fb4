use serde::{Deserialize, Serialize};

use workforce_core::{CompanyId, EmployeeId, Entity};

/// A persisted employee.
///
/// `salary` lives on the entity but is never part of a read response; the API
/// layer maps this into a salary-free shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub salary: i64,
    pub company_id: Option<CompanyId>,
}

impl Employee {
    /// Materialize a new employee once the store has assigned its id.
    pub fn from_new(id: EmployeeId, new: NewEmployee) -> Self {
        Self {
            id,
            name: new.name,
            age: new.age,
            gender: new.gender,
            salary: new.salary,
            company_id: new.company_id,
        }
    }

    /// Exact, case-sensitive gender match.
    pub fn has_gender(&self, gender: &str) -> bool {
        self.gender == gender
    }

    pub fn works_for(&self, company_id: CompanyId) -> bool {
        self.company_id == Some(company_id)
    }
}

impl Entity for Employee {
    type Id = EmployeeId;

    fn id(&self) -> EmployeeId {
        self.id
    }
}

/// An employee that has not been stored yet (no id).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewEmployee {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub salary: i64,
    pub company_id: Option<CompanyId>,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeUpdate {
    pub age: Option<i32>,
    pub salary: Option<i64>,
}

impl EmployeeUpdate {
    /// Merge the present fields into `employee`. Identity and every field not
    /// carried by the update are preserved.
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(salary) = self.salary {
            employee.salary = salary;
        }
        if let Some(age) = self.age {
            employee.age = age;
        }
    }
}
