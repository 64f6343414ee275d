use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StaffError {
    #[error("{field}: {message}")]
    Validation {
        field: &'static str,
        message: String,
    },
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    /// `role_title` was read on an employee without a role.
    #[error("employee {employee_id} has no role")]
    MissingRole { employee_id: i32 },
    #[error(transparent)]
    Db(#[from] DbErr),
}

impl StaffError {
    pub(crate) fn validation(field: &'static str, message: impl Into<String>) -> Self {
        StaffError::Validation {
            field,
            message: message.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, StaffError::Validation { .. })
    }
}

pub type StaffResult<T> = Result<T, StaffError>;
