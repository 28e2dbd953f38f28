use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, PartialEq, Debug, Clone)]
pub enum ValidationError {
    #[error("{field} is required")]
    Required { field: &'static str },
    #[error("End date must be after start date")]
    EndNotAfterStart,
    #[error("{field} must be a valid email address")]
    InvalidEmail { field: &'static str },
    #[error("{field} must be at least {min}")]
    TooSmall { field: &'static str, min: i64 },
    #[error("{field} must be a hex colour like #2563eb")]
    InvalidColor { field: &'static str },
}

/// Checks a form before it is submitted.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

pub fn required_some<T>(field: &'static str, value: &Option<T>) -> Result<(), ValidationError> {
    match value {
        Some(_) => Ok(()),
        None => Err(ValidationError::Required { field }),
    }
}

pub fn end_after_start(start: NaiveDate, end: NaiveDate) -> Result<(), ValidationError> {
    if end <= start {
        return Err(ValidationError::EndNotAfterStart);
    }
    Ok(())
}

pub fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    let valid = match value.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.'),
        None => false,
    };

    if !valid || value.contains(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail { field });
    }
    Ok(())
}

pub fn at_least(field: &'static str, value: i64, min: i64) -> Result<(), ValidationError> {
    if value < min {
        return Err(ValidationError::TooSmall { field, min });
    }
    Ok(())
}

pub fn hex_color(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let valid = value.len() == 7 && value.starts_with('#') && value[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !valid {
        return Err(ValidationError::InvalidColor { field });
    }
    Ok(())
}
