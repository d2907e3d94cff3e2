use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account creation request, as the auth service's register endpoint expects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub phone_number: Option<String>,
    pub profile_picture: Option<String>,
}

impl RegistrationRecord {
    /// Builds a record whose confirmation always matches the password.
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let password = password.into();
        Self {
            username: username.into(),
            email: email.into(),
            confirm_password: password.clone(),
            password,
            phone_number: None,
            profile_picture: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone_number = Some(phone.into());
        self
    }

    pub fn with_picture(mut self, url: impl Into<String>) -> Self {
        self.profile_picture = Some(url.into());
        self
    }

    pub fn picture_or_default(&self) -> String {
        self.profile_picture
            .clone()
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| avatar_url(&self.email))
    }
}

pub fn avatar_url(key: &str) -> String {
    format!("https://i.pravatar.cc/150?u={}", key)
}

/// Row of the auth service's `AspNetUsers` table.
#[derive(Debug, Clone)]
pub struct PersistedAccount {
    pub id: String,
    pub user_name: String,
    pub normalized_user_name: String,
    pub email: String,
    pub normalized_email: String,
    pub email_confirmed: bool,
    pub password_hash: String,
    pub security_stamp: String,
    pub concurrency_stamp: String,
    pub phone_number: Option<String>,
    pub phone_number_confirmed: bool,
    pub two_factor_enabled: bool,
    pub lockout_end: Option<DateTime<Utc>>,
    pub lockout_enabled: bool,
    pub access_failed_count: i32,
    pub date_of_birth: DateTime<Utc>,
    pub bio: String,
    pub profile_picture: String,
    pub gender: String,
    pub location: String,
    pub interests: String,
    pub last_active: DateTime<Utc>,
}

/// Profile payload for the profile service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub name: String,
    pub bio: String,
    pub profile_picture_url: String,
    pub preferences: String,
}

/// Row of the user service's `UserProfiles` table.
#[derive(Debug, Clone)]
pub struct ProfileRow {
    pub name: String,
    pub bio: String,
    pub profile_picture_url: String,
    pub preferences: String,
    pub email: String,
    pub gender: String,
    pub location: String,
    pub interests: String,
    pub date_of_birth: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub last_active_at: DateTime<Utc>,
    pub is_verified: bool,
}

/// Random demographic fields shared by account and profile rows.
#[derive(Debug, Clone)]
pub struct Demographics {
    pub date_of_birth: DateTime<Utc>,
    pub bio: String,
    pub gender: String,
    pub location: String,
    pub interests: String,
    pub last_active: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub users: &'static [&'static str],
    pub actions: &'static [&'static str],
}

/// Outcome counters for one dispatch call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub attempted: usize,
    pub created: usize,
    pub profiles_seeded: usize,
    pub failures: Vec<String>,
}

impl DispatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn merge(&mut self, other: DispatchReport) {
        self.attempted += other.attempted;
        self.created += other.created;
        self.profiles_seeded += other.profiles_seeded;
        self.failures.extend(other.failures);
    }
}
