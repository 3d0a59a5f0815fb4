//! Companies domain module.
//!
//! A company only carries a name; its headcount is derived from employee
//! records at read time and never stored here.

pub mod company;

pub use company::{Company, CompanyUpdate, NewCompany};
