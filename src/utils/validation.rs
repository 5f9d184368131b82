use crate::utils::error::{ExportError, Result};
use url::Url;

pub fn validate_org_url(url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ExportError::ConfigError {
            message: "org URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ExportError::ConfigError {
                message: format!("unsupported org URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ExportError::ConfigError {
            message: format!("invalid org URL '{}': {}", url_str, e),
        }),
    }
}

pub fn validate_non_empty(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ExportError::ConfigError {
            message: format!("{} cannot be empty", field_name),
        });
    }
    Ok(())
}
