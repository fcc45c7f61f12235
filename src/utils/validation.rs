use crate::utils::error::{ClassifyError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ClassifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ClassifyError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ClassifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(ClassifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ClassifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(ClassifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ClassifyError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClassifyError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Rejects a row range whose start lies beyond its end.
pub fn validate_row_bounds(start_row: usize, end_row: usize) -> Result<()> {
    if start_row > end_row {
        return Err(ClassifyError::InvalidConfigValueError {
            field: "start_row".to_string(),
            value: start_row.to_string(),
            reason: format!("Start row must not exceed end row ({})", end_row),
        });
    }
    Ok(())
}

pub fn validate_distinct_names(field_name: &str, names: &[&str]) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        validate_non_empty_string(field_name, name)?;
        if !seen.insert(*name) {
            return Err(ClassifyError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Column names must be distinct".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("api_endpoint", "https://api.openai.com/v1").is_ok());
        assert!(validate_url("api_endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("api_endpoint", "").is_err());
        assert!(validate_url("api_endpoint", "invalid-url").is_err());
        assert!(validate_url("api_endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("checkpoint_every", 10, 1).is_ok());
        assert!(validate_positive_number("checkpoint_every", 0, 1).is_err());
    }

    #[test]
    fn test_validate_row_bounds() {
        assert!(validate_row_bounds(0, 0).is_ok());
        assert!(validate_row_bounds(1, 123850).is_ok());
        assert!(validate_row_bounds(10, 9).is_err());
    }

    #[test]
    fn test_validate_distinct_names() {
        assert!(validate_distinct_names("columns", &["title", "company_name"]).is_ok());
        assert!(validate_distinct_names("columns", &["title", "title"]).is_err());
        assert!(validate_distinct_names("columns", &["title", " "]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let key = Some("sk-test".to_string());
        assert_eq!(validate_required_field("api_key", &key).unwrap(), "sk-test");
        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("api_key", &missing),
            Err(ClassifyError::MissingConfigError { .. })
        ));
    }
}
