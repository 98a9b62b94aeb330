//! Input validation helpers shared by the services.

use uuid::Uuid;

use crate::error::{ AppError, Result };

/// A field that must be present and not blank. The value is kept as sent.
pub fn required(value: Option<String>, field_name: &str) -> Result<String> {
    match value {
        Some(value) => not_blank(value, field_name),
        None => Err(AppError::InvalidInput(format!("{} is required", field_name))),
    }
}

/// A field that may be omitted, but cannot be blank when given.
pub fn optional(value: Option<String>, field_name: &str) -> Result<Option<String>> {
    value.map(|value| not_blank(value, field_name)).transpose()
}

pub fn required_number(value: Option<f64>, field_name: &str) -> Result<f64> {
    let value = value.ok_or_else(|| AppError::InvalidInput(format!("{} is required", field_name)))?;
    finite(value, field_name)
}

pub fn finite(value: f64, field_name: &str) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AppError::InvalidInput(format!("{} must be a finite number", field_name)))
    }
}

/// Validate email format (basic check).
pub fn email(value: &str) -> Result<()> {
    if value.contains('@') {
        Ok(())
    } else {
        Err(AppError::InvalidInput("Invalid email format".to_string()))
    }
}

/// Parse a path id. Anything that is not a UUID cannot name a stored record,
/// so it is reported as not found.
pub fn record_id(id: &str, resource: &'static str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound(resource))
}

fn not_blank(value: String, field_name: &str) -> Result<String> {
    if value.trim().is_empty() {
        Err(AppError::InvalidInput(format!("{} cannot be empty", field_name)))
    } else {
        Ok(value)
    }
}
