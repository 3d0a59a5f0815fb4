//! Employees domain module.
//!
//! Holds the persisted employee record and the pure rules for creating and
//! partially updating it (no IO, no HTTP, no storage).

pub mod employee;

pub use employee::{Employee, EmployeeUpdate, NewEmployee};
