use entity::{employee, employee_type, employee_type::Code};
use serde::Serialize;

use crate::error::{StaffError, StaffResult};

/// Title shown for executives regardless of the stored role label.
pub const EXECUTIVE_TITLE: &str = "General Manager";

/// Title for a role: its label, except executives, who are general managers.
pub fn title_for(role: &employee_type::Model) -> &str {
    match role.code {
        Code::Executive => EXECUTIVE_TITLE,
        _ => &role.text,
    }
}

/// An employee loaded together with its role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StaffMember {
    pub employee: employee::Model,
    pub role: Option<employee_type::Model>,
}

impl StaffMember {
    pub fn new(employee: employee::Model, role: Option<employee_type::Model>) -> Self {
        Self { employee, role }
    }

    /// Requires a role; an employee without one yields [`StaffError::MissingRole`].
    pub fn role_title(&self) -> StaffResult<&str> {
        self.role
            .as_ref()
            .map(title_for)
            .ok_or(StaffError::MissingRole {
                employee_id: self.employee.id,
            })
    }

    pub fn summary(&self) -> StaffSummary {
        StaffSummary {
            id: self.employee.id,
            name: format!("{} {}", self.employee.firstname, self.employee.surname),
            role_code: self.role.as_ref().map(|r| r.code),
            role_title: self.role.as_ref().map(|r| title_for(r).to_string()),
            manager_id: self.employee.manager_id,
        }
    }
}

/// Flattened, serializable view of a staff member.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StaffSummary {
    pub id: i32,
    pub name: String,
    pub role_code: Option<Code>,
    pub role_title: Option<String>,
    pub manager_id: Option<i32>,
}
