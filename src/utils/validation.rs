use crate::utils::error::{QrisError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 渲染尺寸上限，避免一次配置錯誤就配置出巨大的記憶體
pub const MAX_DIMENSION: u32 = 4096;

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(QrisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(QrisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(QrisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
        });
    }
    Ok(())
}

pub fn validate_dimension(field_name: &str, value: u32) -> Result<()> {
    validate_range(field_name, value, 1, MAX_DIMENSION)
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
            if !allowed_set.contains(extension.to_ascii_lowercase().as_str()) {
                return Err(QrisError::InvalidConfigValueError {
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
            return Err(QrisError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: file.clone(),
                reason: "File has no extension or invalid filename".to_string(),
            });
        }
    }

    Ok(())
}

/// A bare file name: no directory separators, no `..`, nothing absolute.
pub fn validate_file_name(field_name: &str, name: &str) -> Result<()> {
    validate_path(field_name, name)?;

    if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
        return Err(QrisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: name.to_string(),
            reason: "Must be a plain file name without directories".to_string(),
        });
    }
    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| QrisError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(QrisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
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
        return Err(QrisError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dimension() {
        assert!(validate_dimension("image.width", 300).is_ok());
        assert!(validate_dimension("image.width", 1).is_ok());
        assert!(validate_dimension("image.width", 0).is_err());
        assert!(validate_dimension("image.width", MAX_DIMENSION + 1).is_err());
    }

    #[test]
    fn test_validate_positive_number() {
        assert!(validate_positive_number("requests", 5, 1).is_ok());
        assert!(validate_positive_number("requests", 0, 1).is_err());
    }

    #[test]
    fn test_validate_file_extensions() {
        let files = vec!["order-1.png".to_string(), "ORDER-2.PNG".to_string()];
        assert!(validate_file_extensions("requests.filename", &files, &["png"]).is_ok());

        let invalid_files = vec!["order.jpg".to_string()];
        assert!(validate_file_extensions("requests.filename", &invalid_files, &["png"]).is_err());

        let no_ext = vec!["order".to_string()];
        assert!(validate_file_extensions("requests.filename", &no_ext, &["png"]).is_err());
    }

    #[test]
    fn test_validate_file_name() {
        assert!(validate_file_name("requests.filename", "order-1.png").is_ok());
        assert!(validate_file_name("requests.filename", "..png").is_ok());
        assert!(validate_file_name("requests.filename", "../x.png").is_err());
        assert!(validate_file_name("requests.filename", "sub/x.png").is_err());
        assert!(validate_file_name("requests.filename", "..\\x.png").is_err());
        assert!(validate_file_name("requests.filename", "/tmp/x.png").is_err());
        assert!(validate_file_name("requests.filename", "..").is_err());
        assert!(validate_file_name("requests.filename", "").is_err());
    }

    #[test]
    fn test_validate_required_and_non_empty() {
        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("payload.base", &missing),
            Err(QrisError::MissingConfigError { .. })
        ));
        assert!(validate_non_empty_string("payload.base", "   ").is_err());
        assert!(validate_path("image.logo_path", "").is_err());
        assert!(validate_path("image.logo_path", "logo/qris.png").is_ok());
    }
}
