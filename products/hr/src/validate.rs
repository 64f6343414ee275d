use entity::employee_type::Code;

use crate::error::{StaffError, StaffResult};

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_ROLE_TEXT_LEN: usize = 100;

pub fn parse_code(value: &str) -> StaffResult<Code> {
    Code::parse(value.trim()).ok_or_else(|| {
        let allowed = Code::ALL
            .iter()
            .map(|c| c.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        StaffError::validation("code", format!("{value:?} is not one of {allowed}"))
    })
}

/// Required, trimmed, at most `max` characters.
pub fn required_text(field: &'static str, value: &str, max: usize) -> StaffResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(StaffError::validation(field, "is required"));
    }
    if trimmed.chars().count() > max {
        return Err(StaffError::validation(
            field,
            format!("must be at most {max} characters"),
        ));
    }
    Ok(trimmed.to_string())
}
