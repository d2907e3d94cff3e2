use crate::domain::model::{PersistedAccount, ProfileRow};
use crate::domain::ports::DatabaseGateway;
use crate::utils::error::{Result, SeederError};
use async_trait::async_trait;
use sqlx::{Connection, MySqlConnection};

const INSERT_ACCOUNT: &str = "INSERT INTO AspNetUsers (\
    Id, UserName, NormalizedUserName, Email, NormalizedEmail, EmailConfirmed, \
    PasswordHash, SecurityStamp, ConcurrencyStamp, PhoneNumber, PhoneNumberConfirmed, \
    TwoFactorEnabled, LockoutEnd, LockoutEnabled, AccessFailedCount, \
    DateOfBirth, Bio, ProfilePicture, Gender, Location, Interests, LastActive) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

const INSERT_PROFILE: &str = "INSERT INTO UserProfiles (\
    Name, Bio, ProfilePictureUrl, Preferences, Email, Gender, Location, Interests, \
    DateOfBirth, CreatedAt, LastActiveAt, IsVerified) \
    VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// MySQL gateway. Each call opens a single connection, so nothing outlives it.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlGateway;

#[async_trait]
impl DatabaseGateway for MySqlGateway {
    async fn test_connection(&self, database_url: &str) -> Result<()> {
        let mut conn = MySqlConnection::connect(database_url).await?;
        conn.ping().await?;
        conn.close().await?;
        Ok(())
    }

    async fn insert_accounts(
        &self,
        database_url: &str,
        accounts: &[PersistedAccount],
    ) -> Result<u64> {
        let mut conn = MySqlConnection::connect(database_url).await?;
        let mut tx = conn.begin().await?;

        let mut inserted = 0;
        for account in accounts {
            inserted += sqlx::query(INSERT_ACCOUNT)
                .bind(&account.id)
                .bind(&account.user_name)
                .bind(&account.normalized_user_name)
                .bind(&account.email)
                .bind(&account.normalized_email)
                .bind(account.email_confirmed)
                .bind(&account.password_hash)
                .bind(&account.security_stamp)
                .bind(&account.concurrency_stamp)
                .bind(&account.phone_number)
                .bind(account.phone_number_confirmed)
                .bind(account.two_factor_enabled)
                .bind(account.lockout_end)
                .bind(account.lockout_enabled)
                .bind(account.access_failed_count)
                .bind(account.date_of_birth)
                .bind(&account.bio)
                .bind(&account.profile_picture)
                .bind(&account.gender)
                .bind(&account.location)
                .bind(&account.interests)
                .bind(account.last_active)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        conn.close().await?;
        Ok(inserted)
    }

    async fn insert_profiles(&self, database_url: &str, profiles: &[ProfileRow]) -> Result<u64> {
        let mut conn = MySqlConnection::connect(database_url).await?;
        let mut tx = conn.begin().await?;

        let mut inserted = 0;
        for profile in profiles {
            inserted += sqlx::query(INSERT_PROFILE)
                .bind(&profile.name)
                .bind(&profile.bio)
                .bind(&profile.profile_picture_url)
                .bind(&profile.preferences)
                .bind(&profile.email)
                .bind(&profile.gender)
                .bind(&profile.location)
                .bind(&profile.interests)
                .bind(profile.date_of_birth)
                .bind(profile.created_at)
                .bind(profile.last_active_at)
                .bind(profile.is_verified)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        conn.close().await?;
        Ok(inserted)
    }

    async fn count_rows(&self, database_url: &str, table: &str) -> Result<i64> {
        ensure_identifier(table)?;

        let mut conn = MySqlConnection::connect(database_url).await?;
        let (count,): (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM `{}`", table))
            .fetch_one(&mut conn)
            .await?;
        conn.close().await?;
        Ok(count)
    }
}

fn ensure_identifier(table: &str) -> Result<()> {
    if table.is_empty() || !table.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SeederError::InvalidInput {
            message: format!("invalid table name '{}'", table),
        });
    }
    Ok(())
}
