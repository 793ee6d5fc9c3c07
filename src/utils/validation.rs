use crate::utils::error::{CheckError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    for file in files {
        if let Some(extension) = std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            if !allowed_set.contains(extension) {
                return Err(CheckError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
        } else {
            return Err(CheckError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

/// Exclusive on both ends: `test_size` of exactly 0 or 1 leaves one split empty.
pub fn validate_open_range(field_name: &str, value: f32, min: f32, max: f32) -> Result<()> {
    if !(value > min && value < max) {
        return Err(CheckError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be strictly between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("data.dir", "data").is_ok());
        assert!(validate_path("data.dir", "").is_err());
        assert!(validate_path("data.dir", "da\0ta").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("modeling.n_trees", 10, 1).is_ok());
        assert!(validate_positive_number("modeling.n_trees", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["Fraud_Data.csv".to_string(), "creditcard.csv".to_string()];
        assert!(validate_file_extensions("data.files", &files, &["csv"]).is_ok());

        let invalid_files = vec!["data.txt".to_string()];
        assert!(validate_file_extensions("data.files", &invalid_files, &["csv"]).is_err());

        let no_extension = vec!["creditcard".to_string()];
        assert!(validate_file_extensions("data.files", &no_extension, &["csv"]).is_err());
    }

    #[test]
    fn test_validate_open_range() {
        assert!(validate_open_range("modeling.test_size", 0.2, 0.0, 1.0).is_ok());
        assert!(validate_open_range("modeling.test_size", 0.0, 0.0, 1.0).is_err());
        assert!(validate_open_range("modeling.test_size", 1.0, 0.0, 1.0).is_err());
        assert!(validate_open_range("modeling.test_size", f32::NAN, 0.0, 1.0).is_err());
    }
}
