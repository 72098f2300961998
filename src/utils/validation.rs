use crate::utils::error::{ContractError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ContractError::InvalidFieldValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Length is counted in characters, not bytes.
pub fn validate_max_length(field_name: &str, value: &str, max_length: usize) -> Result<()> {
    let length = value.chars().count();
    if length > max_length {
        return Err(ContractError::InvalidFieldValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value has {} characters, at most {} allowed", length, max_length),
        });
    }
    Ok(())
}

pub fn validate_required_text(field_name: &str, value: &str, max_length: usize) -> Result<()> {
    validate_non_empty_string(field_name, value)?;
    validate_max_length(field_name, value, max_length)
}

pub fn validate_optional_text(field_name: &str, value: Option<&str>, max_length: usize) -> Result<()> {
    match value {
        Some(text) => validate_max_length(field_name, text, max_length),
        None => Ok(()),
    }
}

pub fn validate_non_negative(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(ContractError::InvalidFieldValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    if value < 0.0 {
        return Err(ContractError::InvalidFieldValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be negative".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ContractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ContractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_ordered_range(field_name: &str, min: f64, max: f64) -> Result<()> {
    if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
        return Err(ContractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: format!("{}..{}", min, max),
            reason: "Range bounds must be finite, non-negative and ordered".to_string(),
        });
    }
    Ok(())
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ContractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ContractError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}
