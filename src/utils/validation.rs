use crate::utils::error::{RangeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(RangeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(RangeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| RangeError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RangeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_zero(field_name: &str, value: i32) -> Result<()> {
    if value == 0 {
        return Err(RangeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must not be zero".to_string(),
        });
    }
    Ok(())
}

pub fn validate_min<T: PartialOrd + std::fmt::Display + Copy>(
    argument: &str,
    value: T,
    min: T,
) -> Result<()> {
    if value < min {
        return Err(RangeError::invalid_argument(
            argument,
            value,
            format!("{} must be >= {}", argument, min),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./out").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "a\0b").is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let present = Some(3);
        let missing: Option<i32> = None;
        assert_eq!(*validate_required_field("from", &present).unwrap(), 3);
        assert!(matches!(
            validate_required_field("from", &missing),
            Err(RangeError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_min() {
        assert!(validate_min("from", 1, 1).is_ok());
        let err = validate_min("from", -2, 1).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid argument `from` = -2: from must be >= 1"
        );
    }

    #[test]
    fn test_validate_non_zero_and_non_empty() {
        assert!(validate_non_zero("step", 2).is_ok());
        assert!(validate_non_zero("step", 0).is_err());
        assert!(validate_non_empty_string("name", "evens").is_ok());
        assert!(validate_non_empty_string("name", "   ").is_err());
    }
}
