//! SeaORM entities for the staff registry.

pub mod employee;
pub mod employee_type;

pub mod prelude {
    pub use super::employee::Entity as Employee;
    pub use super::employee_type::Entity as EmployeeType;
}
