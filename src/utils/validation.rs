use crate::utils::error::{Result, SeederError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    validate_scheme(field_name, url_str, &["http", "https"])
}

pub fn validate_database_url(field_name: &str, url_str: &str) -> Result<()> {
    validate_scheme(field_name, url_str, &["mysql", "mariadb"])?;

    let url = Url::parse(url_str).map_err(|e| invalid(field_name, url_str, e.to_string()))?;
    if url.path().trim_start_matches('/').is_empty() {
        return Err(invalid(
            field_name,
            url_str,
            "Database name is missing from the URL path".to_string(),
        ));
    }
    Ok(())
}

fn validate_scheme(field_name: &str, url_str: &str, allowed: &[&str]) -> Result<()> {
    if url_str.is_empty() {
        return Err(invalid(field_name, url_str, "URL cannot be empty".to_string()));
    }

    match Url::parse(url_str) {
        Ok(url) if allowed.contains(&url.scheme()) => Ok(()),
        Ok(url) => Err(invalid(
            field_name,
            url_str,
            format!(
                "Unsupported URL scheme: {}. Allowed schemes: {}",
                url.scheme(),
                allowed.join(", ")
            ),
        )),
        Err(e) => Err(invalid(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(invalid(
            field_name,
            value,
            "Value cannot be empty or whitespace-only".to_string(),
        ));
    }
    Ok(())
}

fn invalid(field_name: &str, value: &str, reason: String) -> SeederError {
    SeederError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: value.to_string(),
        reason,
    }
}
