use crate::domain::model::RegistrationRecord;
use crate::utils::error::{Result, SeederError};
use serde::Deserialize;
use std::path::Path;

pub const FIXED_PHONE: &str = "1234567890";

pub fn fixed_test_user() -> RegistrationRecord {
    RegistrationRecord::new("testuser", "testuser@example.com", "TestPassword123!")
        .with_phone(FIXED_PHONE)
}

/// Parses `email:password`. The username is the local part of the email.
pub fn parse_explicit_user(entry: &str) -> Result<RegistrationRecord> {
    let (email, password) = entry.split_once(':').ok_or_else(|| SeederError::InvalidInput {
        message: format!("expected email:password, got '{}'", entry),
    })?;
    build_user(email.trim(), password, None, None)
}

#[derive(Debug, Deserialize)]
struct CsvUser {
    email: String,
    password: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    phone_number: Option<String>,
}

/// Reads explicit users from a CSV file with `email,password` columns and
/// optional `username,phone_number` columns.
pub fn load_users_csv<P: AsRef<Path>>(path: P) -> Result<Vec<RegistrationRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)?;

    let mut users = Vec::new();
    for row in reader.deserialize::<CsvUser>() {
        let row = row?;
        users.push(build_user(
            &row.email,
            &row.password,
            row.username.filter(|u| !u.is_empty()),
            row.phone_number.filter(|p| !p.is_empty()),
        )?);
    }
    Ok(users)
}

fn build_user(
    email: &str,
    password: &str,
    username: Option<String>,
    phone: Option<String>,
) -> Result<RegistrationRecord> {
    if email.is_empty() || password.is_empty() {
        return Err(SeederError::InvalidInput {
            message: "email and password must not be empty".to_string(),
        });
    }
    let username = username.unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());

    Ok(RegistrationRecord::new(username, email, password)
        .with_phone(phone.unwrap_or_else(|| FIXED_PHONE.to_string())))
}
