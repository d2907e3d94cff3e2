use crate::core::generator::parse_user_count;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "test-data-generator", version)]
#[command(about = "Seeds users and profiles into the dating app services")]
pub struct CliArgs {
    /// Number of random users to create (at most 10000)
    #[arg(long, value_name = "N", value_parser = parse_count_arg)]
    pub create_users: Option<usize>,

    /// Create users through the auth and profile service APIs
    #[arg(long)]
    pub api: bool,

    /// Create users by inserting rows into the auth database (wins over --api)
    #[arg(long)]
    pub direct: bool,

    /// Explicit user to create, as email:password (repeatable)
    #[arg(long = "user", value_name = "EMAIL:PASSWORD")]
    pub users: Vec<String>,

    /// Base URL of the user/profile service
    #[arg(long, value_name = "URL")]
    pub user_service_url: Option<String>,

    /// Add testuser@example.com / TestPassword123! (created before any --user entries)
    #[arg(long)]
    pub create_fixed_testuser: bool,

    /// CSV file with email,password columns of explicit users
    #[arg(long, value_name = "PATH")]
    pub users_csv: Option<PathBuf>,

    /// Seed the demo personas plus generated demo users
    #[arg(long)]
    pub demo: bool,

    /// Seed for the random data generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run without external services (no database, HTTP or subprocess calls)
    #[arg(long)]
    pub offline: bool,

    /// Path to a TOML configuration file
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl CliArgs {
    /// Any operation flag switches the tool from the menu to batch mode.
    pub fn is_batch(&self) -> bool {
        self.create_users.is_some()
            || self.api
            || self.direct
            || !self.users.is_empty()
            || self.user_service_url.is_some()
            || self.create_fixed_testuser
            || self.users_csv.is_some()
            || self.demo
            || self.offline
    }
}

/// Help and version requests keep clap's own output and exit status. Every
/// other parse error is reported and the run ends with status 0.
pub fn is_informational(error: &clap::Error) -> bool {
    matches!(
        error.kind(),
        ErrorKind::DisplayHelp
            | ErrorKind::DisplayVersion
            | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
    )
}

fn parse_count_arg(value: &str) -> Result<usize, String> {
    parse_user_count(value).map_err(|e| e.to_string())
}
