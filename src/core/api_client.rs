use crate::config::SeederConfig;
use crate::domain::model::{LoginRequest, ProfileRecord, RegistrationRecord};
use crate::utils::error::{Result, SeederError};
use reqwest::{Client, Response};
use std::time::Duration;

pub const REGISTER_PATH: &str = "/api/auth/register";
pub const LOGIN_PATH: &str = "/api/Auth/login";
pub const PROFILES_PATH: &str = "/api/UserProfiles";

/// HTTP client for the auth service and the profile service.
#[derive(Debug, Clone)]
pub struct ServiceClient {
    client: Client,
    auth_base: String,
    user_base: String,
}

impl ServiceClient {
    pub fn new(
        auth_base: impl Into<String>,
        user_base: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            auth_base: auth_base.into().trim_end_matches('/').to_string(),
            user_base: user_base.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &SeederConfig) -> Result<Self> {
        Self::new(
            config.auth_api_url.clone(),
            config.user_api_url.clone(),
            config.http_timeout,
        )
    }

    pub fn auth_base_url(&self) -> &str {
        &self.auth_base
    }

    pub async fn register(&self, record: &RegistrationRecord) -> Result<()> {
        let url = format!("{}{}", self.auth_base, REGISTER_PATH);
        tracing::debug!("📡 POST {} for {}", url, record.email);

        let response = self.client.post(&url).json(record).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    /// Returns the bearer token from the login response's `token` field.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let url = format!("{}{}", self.auth_base, LOGIN_PATH);
        tracing::debug!("📡 POST {} for {}", url, email);

        let response = self
            .client
            .post(&url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let body: serde_json::Value = ensure_success(response).await?.json().await?;

        body.get("token")
            .and_then(|t| t.as_str())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .ok_or(SeederError::MissingToken)
    }

    pub async fn create_profile(&self, token: &str, profile: &ProfileRecord) -> Result<()> {
        let url = format!("{}{}", self.user_base, PROFILES_PATH);
        tracing::debug!("📡 POST {} for {}", url, profile.name);

        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .json(profile)
            .send()
            .await?;
        ensure_success(response).await?;
        Ok(())
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(SeederError::UnexpectedStatus {
        status: status.as_u16(),
        body,
    })
}
