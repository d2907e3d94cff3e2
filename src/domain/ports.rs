use crate::domain::model::{PersistedAccount, ProfileRow};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Relational store reached through a connection URL. Every call opens its own
/// connection and releases it before returning.
#[async_trait]
pub trait DatabaseGateway: Send + Sync {
    async fn test_connection(&self, database_url: &str) -> Result<()>;

    /// Inserts all accounts in one transaction. Nothing is committed on error.
    async fn insert_accounts(&self, database_url: &str, accounts: &[PersistedAccount])
        -> Result<u64>;

    /// Inserts all profile rows in one transaction. Nothing is committed on error.
    async fn insert_profiles(&self, database_url: &str, profiles: &[ProfileRow]) -> Result<u64>;

    async fn count_rows(&self, database_url: &str, table: &str) -> Result<i64>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs an opaque shell command line to completion.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &str) -> Result<CommandOutput>;
}
