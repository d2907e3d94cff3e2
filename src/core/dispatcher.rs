use crate::config::{CreationMode, ServiceTarget, TargetSelection};
use crate::core::api_client::ServiceClient;
use crate::core::generator::FixtureGenerator;
use crate::core::password::hash_password;
use crate::domain::model::{
    DispatchReport, PersistedAccount, ProfileRecord, ProfileRow, RegistrationRecord,
};
use crate::domain::ports::DatabaseGateway;
use crate::utils::error::{ErrorCategory, Result, SeederError};
use chrono::Utc;
use uuid::Uuid;

pub const PROFILE_BIO: &str = "Test user bio";
pub const PROFILE_PREFERENCES: &str = "Testing, Automation";

/// Sends records to a database or to the service APIs, depending on the
/// creation mode of the selection.
pub struct SinkDispatcher<G: DatabaseGateway> {
    gateway: G,
    client: ServiceClient,
    generator: FixtureGenerator,
    external_services: bool,
}

impl<G: DatabaseGateway> SinkDispatcher<G> {
    pub fn new(gateway: G, client: ServiceClient, generator: FixtureGenerator) -> Self {
        Self {
            gateway,
            client,
            generator,
            external_services: true,
        }
    }

    pub fn with_external_services(mut self, enabled: bool) -> Self {
        self.external_services = enabled;
        self
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn generator_mut(&mut self) -> &mut FixtureGenerator {
        &mut self.generator
    }

    pub async fn dispatch(
        &mut self,
        records: &[RegistrationRecord],
        target: &TargetSelection,
        seed_profile: bool,
    ) -> DispatchReport {
        match target.mode {
            CreationMode::DirectInsert => self.insert_direct(records, target).await,
            CreationMode::ApiCall => self.insert_via_api(records, target, seed_profile).await,
        }
    }

    /// Writes all records in one transaction. Any error leaves the database
    /// untouched and ends up in the report.
    pub async fn insert_direct(
        &mut self,
        records: &[RegistrationRecord],
        target: &TargetSelection,
    ) -> DispatchReport {
        let mut report = DispatchReport {
            attempted: records.len(),
            ..Default::default()
        };
        if !self.external_services {
            tracing::warn!("⏭️ External services disabled, skipping direct insert");
            report.failures.push(SeederError::ServicesUnavailable.to_string());
            return report;
        }

        tracing::info!(
            "Creating {} users directly in {}...",
            records.len(),
            target.describe()
        );

        let result = match target.service {
            ServiceTarget::Auth => self.write_accounts(records, &target.connection).await,
            ServiceTarget::User => self.write_profiles(records, &target.connection).await,
            other => Err(SeederError::Unsupported {
                target: other.to_string(),
                operation: "Direct insert".to_string(),
            }),
        };

        match result {
            Ok(inserted) => {
                report.created = inserted as usize;
                tracing::info!(
                    "✅ Created {} users directly in {}.",
                    inserted,
                    target.service
                );
            }
            Err(e) => {
                tracing::error!("❌ [ERROR] Failed to create users: {}", e.user_friendly_message());
                tracing::error!("💡 {}", e.recovery_suggestion());
                report.failures.push(e.to_string());
            }
        }
        report
    }

    async fn write_accounts(&mut self, records: &[RegistrationRecord], url: &str) -> Result<u64> {
        let mut accounts = Vec::with_capacity(records.len());
        for record in records {
            accounts.push(self.to_account(record));
            tracing::info!("👤 Prepared account {} ({})", record.username, record.email);
        }
        self.gateway.insert_accounts(url, &accounts).await
    }

    async fn write_profiles(&mut self, records: &[RegistrationRecord], url: &str) -> Result<u64> {
        let rows: Vec<ProfileRow> = records
            .iter()
            .map(|record| {
                tracing::info!("👤 Prepared profile {} ({})", record.username, record.email);
                self.to_profile_row(record)
            })
            .collect();
        self.gateway.insert_profiles(url, &rows).await
    }

    fn to_account(&mut self, record: &RegistrationRecord) -> PersistedAccount {
        let filler = self.generator.filler();

        PersistedAccount {
            id: Uuid::new_v4().to_string(),
            user_name: record.username.clone(),
            normalized_user_name: record.username.to_uppercase(),
            email: record.email.clone(),
            normalized_email: record.email.to_uppercase(),
            email_confirmed: false,
            password_hash: hash_password(&record.password),
            security_stamp: Uuid::new_v4().to_string().to_uppercase(),
            concurrency_stamp: Uuid::new_v4().to_string(),
            phone_number: record.phone_number.clone(),
            phone_number_confirmed: false,
            two_factor_enabled: false,
            lockout_end: None,
            lockout_enabled: true,
            access_failed_count: 0,
            date_of_birth: filler.date_of_birth,
            bio: filler.bio,
            profile_picture: record.picture_or_default(),
            gender: filler.gender,
            location: filler.location,
            interests: filler.interests,
            last_active: filler.last_active,
        }
    }

    fn to_profile_row(&mut self, record: &RegistrationRecord) -> ProfileRow {
        let filler = self.generator.filler();

        ProfileRow {
            name: record.username.clone(),
            bio: filler.bio,
            profile_picture_url: record.picture_or_default(),
            preferences: self.generator.preferences(),
            email: record.email.clone(),
            gender: filler.gender,
            location: filler.location,
            interests: filler.interests,
            date_of_birth: filler.date_of_birth,
            created_at: Utc::now(),
            last_active_at: filler.last_active,
            is_verified: false,
        }
    }

    /// Register, then optionally log in and create the profile, one record at
    /// a time. Failures are logged per record and never stop the loop.
    pub async fn insert_via_api(
        &self,
        records: &[RegistrationRecord],
        target: &TargetSelection,
        seed_profile: bool,
    ) -> DispatchReport {
        let mut report = DispatchReport {
            attempted: records.len(),
            ..Default::default()
        };
        if !self.external_services {
            tracing::warn!("⏭️ External services disabled, skipping API user creation");
            report.failures.push(SeederError::ServicesUnavailable.to_string());
            return report;
        }
        if target.service != ServiceTarget::Auth {
            let err = SeederError::Unsupported {
                target: target.service.to_string(),
                operation: "API user creation".to_string(),
            };
            tracing::error!("❌ [ERROR] {}. Select {} first.", err, ServiceTarget::Auth);
            report.failures.push(err.to_string());
            return report;
        }

        tracing::info!(
            "Creating {} users via API call to AuthService ({})...",
            records.len(),
            self.client.auth_base_url()
        );

        for record in records {
            let mut record = record.clone();
            record.profile_picture = Some(record.picture_or_default());

            if let Err(e) = self.client.register(&record).await {
                self.log_register_failure(&record, &e);
                report.failures.push(format!("register {}: {}", record.email, e));
                continue;
            }
            report.created += 1;
            tracing::info!("✅ Successfully created user: {} via API.", record.username);

            if !seed_profile {
                continue;
            }

            match self.seed_profile(&record).await {
                Ok(()) => {
                    report.profiles_seeded += 1;
                    tracing::info!("✅ Created user-service profile for {}", record.username);
                }
                Err(e) => {
                    tracing::error!(
                        "❌ [ERROR] Failed to seed user-service profile for {}: {}",
                        record.email,
                        e
                    );
                    report.failures.push(format!("profile {}: {}", record.email, e));
                }
            }
        }

        tracing::info!(
            "📊 API run finished: {}/{} users created, {} profiles seeded, {} failures",
            report.created,
            report.attempted,
            report.profiles_seeded,
            report.failures.len()
        );
        report
    }

    async fn seed_profile(&self, record: &RegistrationRecord) -> Result<()> {
        let token = self.client.login(&record.email, &record.password).await?;
        let profile = ProfileRecord {
            name: record.username.clone(),
            bio: PROFILE_BIO.to_string(),
            profile_picture_url: record.picture_or_default(),
            preferences: PROFILE_PREFERENCES.to_string(),
        };
        self.client.create_profile(&token, &profile).await
    }

    fn log_register_failure(&self, record: &RegistrationRecord, error: &SeederError) {
        match error.category() {
            ErrorCategory::Connectivity => tracing::error!(
                "❌ [ERROR] API request failed for user {}: {}. Ensure AuthService is running at {}.",
                record.username,
                error,
                self.client.auth_base_url()
            ),
            _ => tracing::error!(
                "❌ [ERROR] Failed to create user {} via API: {}",
                record.username,
                error
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SeederConfig;
    use crate::core::api_client::{LOGIN_PATH, PROFILES_PATH, REGISTER_PATH};
    use async_trait::async_trait;
    use httpmock::prelude::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryGateway {
        accounts: Mutex<Vec<PersistedAccount>>,
        profiles: Mutex<Vec<ProfileRow>>,
        fail: bool,
    }

    #[async_trait]
    impl DatabaseGateway for MemoryGateway {
        async fn test_connection(&self, _url: &str) -> Result<()> {
            Ok(())
        }

        async fn insert_accounts(&self, _url: &str, accounts: &[PersistedAccount]) -> Result<u64> {
            if self.fail {
                return Err(SeederError::DatabaseError(sqlx::Error::PoolTimedOut));
            }
            self.accounts.lock().unwrap().extend_from_slice(accounts);
            Ok(accounts.len() as u64)
        }

        async fn insert_profiles(&self, _url: &str, profiles: &[ProfileRow]) -> Result<u64> {
            self.profiles.lock().unwrap().extend_from_slice(profiles);
            Ok(profiles.len() as u64)
        }

        async fn count_rows(&self, _url: &str, _table: &str) -> Result<i64> {
            Ok(self.accounts.lock().unwrap().len() as i64)
        }
    }

    fn dispatcher(gateway: MemoryGateway, base: &str) -> SinkDispatcher<MemoryGateway> {
        let client = ServiceClient::new(base, base, None).unwrap();
        SinkDispatcher::new(gateway, client, FixtureGenerator::with_seed(3))
    }

    fn selection(service: ServiceTarget, mode: CreationMode) -> TargetSelection {
        SeederConfig::default().selection(service, mode)
    }

    fn users() -> Vec<RegistrationRecord> {
        vec![
            RegistrationRecord::new("a", "a@b.com", "Secret123!"),
            RegistrationRecord::new("c", "c@d.com", "Other456!").with_phone("1234567890"),
        ]
    }

    #[tokio::test]
    async fn test_direct_insert_maps_accounts() {
        let mut dispatcher = dispatcher(MemoryGateway::default(), "http://localhost:1");
        let report = dispatcher
            .insert_direct(&users(), &selection(ServiceTarget::Auth, CreationMode::DirectInsert))
            .await;

        assert!(report.is_clean());
        assert_eq!(report.created, 2);

        let accounts = dispatcher.gateway().accounts.lock().unwrap();
        let first = &accounts[0];
        assert_eq!(first.normalized_user_name, "A");
        assert_eq!(first.normalized_email, "A@B.COM");
        assert!(!first.email_confirmed);
        assert!(!first.phone_number_confirmed);
        assert!(!first.two_factor_enabled);
        assert!(first.lockout_enabled);
        assert_eq!(first.access_failed_count, 0);
        assert!(first.password_hash.starts_with("AQAAAAI"));
        assert_eq!(first.security_stamp, first.security_stamp.to_uppercase());
        assert_ne!(first.id, accounts[1].id);
        assert_eq!(first.profile_picture, "https://i.pravatar.cc/150?u=a@b.com");
        assert_eq!(accounts[1].phone_number.as_deref(), Some("1234567890"));
    }

    #[tokio::test]
    async fn test_direct_insert_into_user_database_writes_profiles() {
        let mut dispatcher = dispatcher(MemoryGateway::default(), "http://localhost:1");
        let report = dispatcher
            .insert_direct(&users(), &selection(ServiceTarget::User, CreationMode::DirectInsert))
            .await;

        assert_eq!(report.created, 2);
        let profiles = dispatcher.gateway().profiles.lock().unwrap();
        assert_eq!(profiles[0].name, "a");
        assert_eq!(profiles[1].email, "c@d.com");
        assert!(dispatcher.gateway().accounts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_direct_insert_failure_lands_in_report() {
        let gateway = MemoryGateway {
            fail: true,
            ..Default::default()
        };
        let mut dispatcher = dispatcher(gateway, "http://localhost:1");
        let report = dispatcher
            .insert_direct(&users(), &selection(ServiceTarget::Auth, CreationMode::DirectInsert))
            .await;

        assert_eq!(report.created, 0);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("Database error"));
    }

    #[tokio::test]
    async fn test_direct_insert_into_swipe_database_is_unsupported() {
        let mut dispatcher = dispatcher(MemoryGateway::default(), "http://localhost:1");
        let report = dispatcher
            .insert_direct(&users(), &selection(ServiceTarget::Swipe, CreationMode::DirectInsert))
            .await;

        assert_eq!(report.created, 0);
        assert!(report.failures[0].contains("not supported"));
    }

    #[tokio::test]
    async fn test_api_without_profile_never_logs_in() {
        let server = MockServer::start();
        let register = server.mock(|when, then| {
            when.method(POST).path(REGISTER_PATH);
            then.status(200);
        });
        let login = server.mock(|when, then| {
            when.method(POST).path(LOGIN_PATH);
            then.status(200).json_body(serde_json::json!({"token": "t"}));
        });
        let profile = server.mock(|when, then| {
            when.method(POST).path(PROFILES_PATH);
            then.status(201);
        });

        let dispatcher = dispatcher(MemoryGateway::default(), &server.base_url());
        let report = dispatcher
            .insert_via_api(&users(), &selection(ServiceTarget::Auth, CreationMode::ApiCall), false)
            .await;

        register.assert_hits(2);
        login.assert_hits(0);
        profile.assert_hits(0);
        assert_eq!(report.created, 2);
        assert_eq!(report.profiles_seeded, 0);
    }

    #[tokio::test]
    async fn test_failed_registration_skips_login_and_profile() {
        let server = MockServer::start();
        let rejected = server.mock(|when, then| {
            when.method(POST)
                .path(REGISTER_PATH)
                .json_body_partial(r#"{"email": "a@b.com"}"#);
            then.status(400).body("DuplicateEmail");
        });
        let accepted = server.mock(|when, then| {
            when.method(POST)
                .path(REGISTER_PATH)
                .json_body_partial(r#"{"email": "c@d.com"}"#);
            then.status(200);
        });
        let login = server.mock(|when, then| {
            when.method(POST)
                .path(LOGIN_PATH)
                .json_body(serde_json::json!({"email": "c@d.com", "password": "Other456!"}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"token": "jwt-c"}));
        });
        let profile = server.mock(|when, then| {
            when.method(POST)
                .path(PROFILES_PATH)
                .header("Authorization", "Bearer jwt-c")
                .json_body_partial(r#"{"name": "c", "bio": "Test user bio"}"#);
            then.status(201);
        });

        let dispatcher = dispatcher(MemoryGateway::default(), &server.base_url());
        let report = dispatcher
            .insert_via_api(&users(), &selection(ServiceTarget::Auth, CreationMode::ApiCall), true)
            .await;

        rejected.assert();
        accepted.assert();
        login.assert_hits(1);
        profile.assert_hits(1);
        assert_eq!(report.created, 1);
        assert_eq!(report.profiles_seeded, 1);
        assert_eq!(report.failures.len(), 1);
        assert!(report.failures[0].contains("400"));
    }

    #[tokio::test]
    async fn test_missing_token_skips_profile() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path(REGISTER_PATH);
            then.status(200);
        });
        server.mock(|when, then| {
            when.method(POST).path(LOGIN_PATH);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"expires": 3600}));
        });
        let profile = server.mock(|when, then| {
            when.method(POST).path(PROFILES_PATH);
            then.status(201);
        });

        let dispatcher = dispatcher(MemoryGateway::default(), &server.base_url());
        let report = dispatcher
            .insert_via_api(
                &users()[..1],
                &selection(ServiceTarget::Auth, CreationMode::ApiCall),
                true,
            )
            .await;

        profile.assert_hits(0);
        assert_eq!(report.created, 1);
        assert_eq!(report.profiles_seeded, 0);
        assert!(report.failures[0].contains("token"));
    }

    #[tokio::test]
    async fn test_api_mode_requires_auth_target() {
        let server = MockServer::start();
        let register = server.mock(|when, then| {
            when.method(POST).path(REGISTER_PATH);
            then.status(200);
        });

        let dispatcher = dispatcher(MemoryGateway::default(), &server.base_url());
        let report = dispatcher
            .insert_via_api(&users(), &selection(ServiceTarget::User, CreationMode::ApiCall), true)
            .await;

        register.assert_hits(0);
        assert_eq!(report.created, 0);
        assert_eq!(report.failures.len(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_auth_service_continues_loop() {
        let dispatcher = dispatcher(MemoryGateway::default(), "http://127.0.0.1:1");
        let report = dispatcher
            .insert_via_api(&users(), &selection(ServiceTarget::Auth, CreationMode::ApiCall), true)
            .await;

        assert_eq!(report.attempted, 2);
        assert_eq!(report.created, 0);
        assert_eq!(report.failures.len(), 2);
    }

    #[tokio::test]
    async fn test_offline_dispatch_sends_nothing() {
        let mut dispatcher =
            dispatcher(MemoryGateway::default(), "http://127.0.0.1:1").with_external_services(false);
        let report = dispatcher
            .dispatch(
                &users(),
                &selection(ServiceTarget::Auth, CreationMode::DirectInsert),
                false,
            )
            .await;

        assert_eq!(report.created, 0);
        assert!(dispatcher.gateway().accounts.lock().unwrap().is_empty());
        assert_eq!(report.failures, vec!["External services are disabled".to_string()]);
    }
}
