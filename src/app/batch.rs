use crate::app::session::{write_report, write_scenarios};
use crate::config::{CliArgs, CreationMode, SeederConfig, ServiceTarget};
use crate::core::dispatcher::SinkDispatcher;
use crate::core::explicit::{fixed_test_user, load_users_csv, parse_explicit_user};
use crate::domain::model::{DispatchReport, RegistrationRecord};
use crate::domain::ports::DatabaseGateway;
use crate::utils::error::Result;
use std::io::Write;

/// What a batch invocation asked for, resolved from the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchPlan {
    pub mode: CreationMode,
    pub explicit_users: Vec<RegistrationRecord>,
    pub random_count: usize,
    pub demo: bool,
}

impl BatchPlan {
    /// Bad `--user` entries and unreadable CSV files are logged and skipped.
    pub fn from_args(args: &CliArgs) -> Self {
        let mode = if args.direct {
            CreationMode::DirectInsert
        } else if args.api {
            CreationMode::ApiCall
        } else {
            CreationMode::default()
        };

        let mut explicit_users = Vec::new();
        if args.create_fixed_testuser {
            explicit_users.push(fixed_test_user());
        }
        for entry in &args.users {
            match parse_explicit_user(entry) {
                Ok(user) => explicit_users.push(user),
                Err(e) => tracing::error!("❌ [ERROR] Skipping --user entry: {}", e),
            }
        }
        if let Some(path) = &args.users_csv {
            match load_users_csv(path) {
                Ok(users) => {
                    tracing::info!("📁 Loaded {} users from {}", users.len(), path.display());
                    explicit_users.extend(users);
                }
                Err(e) => tracing::error!(
                    "❌ [ERROR] Could not read users from {}: {}",
                    path.display(),
                    e.user_friendly_message()
                ),
            }
        }

        Self {
            mode,
            explicit_users,
            random_count: args.create_users.unwrap_or(0),
            demo: args.demo,
        }
    }
}

/// One-shot run against the auth database: explicit users first, then demo
/// users, then random users. Per-record failures only show up in the report.
pub async fn run_batch<G, W>(
    args: &CliArgs,
    config: &SeederConfig,
    dispatcher: &mut SinkDispatcher<G>,
    out: &mut W,
) -> Result<DispatchReport>
where
    G: DatabaseGateway,
    W: Write,
{
    let plan = BatchPlan::from_args(args);
    let mut report = DispatchReport::default();

    if !config.external_services {
        let record = dispatcher.generator_mut().random_record();
        writeln!(
            out,
            "🧪 Offline smoke check: generated {} <{}>",
            record.username, record.email
        )?;
        writeln!(out, "Batch mode complete. Exiting.")?;
        return Ok(report);
    }

    let target = config.selection(ServiceTarget::Auth, plan.mode);
    tracing::info!("🚀 Batch run against {} using {}", target.describe(), plan.mode);

    if !plan.explicit_users.is_empty() {
        report.merge(dispatcher.dispatch(&plan.explicit_users, &target, true).await);
    }

    if plan.demo {
        let records = dispatcher.generator_mut().demo_users(config.demo_fill);
        report.merge(dispatcher.dispatch(&records, &target, true).await);
        write_scenarios(out)?;
    }

    if plan.random_count > 0 {
        let records = dispatcher.generator_mut().generate(plan.random_count, &[]);
        report.merge(dispatcher.dispatch(&records, &target, true).await);
    }

    write_report(out, &report)?;
    writeln!(out, "Batch mode complete. Exiting.")?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::NamedTempFile;

    fn args(flags: &[&str]) -> CliArgs {
        CliArgs::parse_from(std::iter::once("test-data-generator").chain(flags.iter().copied()))
    }

    #[test]
    fn test_direct_wins_over_api() {
        assert_eq!(
            BatchPlan::from_args(&args(&["--api", "--direct"])).mode,
            CreationMode::DirectInsert
        );
        assert_eq!(
            BatchPlan::from_args(&args(&["--api"])).mode,
            CreationMode::ApiCall
        );
        assert_eq!(
            BatchPlan::from_args(&args(&["--create-users", "2"])).mode,
            CreationMode::DirectInsert
        );
    }

    #[test]
    fn test_explicit_users_collected_in_order() {
        let plan = BatchPlan::from_args(&args(&[
            "--create-fixed-testuser",
            "--user",
            "a@b.com:Secret123!",
            "--user",
            "broken-entry",
            "--create-users",
            "4",
        ]));

        let emails: Vec<&str> = plan.explicit_users.iter().map(|u| u.email.as_str()).collect();
        assert_eq!(emails, vec!["testuser@example.com", "a@b.com"]);
        assert_eq!(plan.random_count, 4);
    }

    #[test]
    fn test_csv_users_are_appended() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "email,password").unwrap();
        writeln!(file, "x@y.com,Pw1!").unwrap();

        let path = file.path().to_string_lossy().to_string();
        let plan = BatchPlan::from_args(&args(&["--users-csv", &path]));

        assert_eq!(plan.explicit_users.len(), 1);
        assert_eq!(plan.explicit_users[0].username, "x");
    }

    #[test]
    fn test_missing_csv_is_skipped() {
        let plan = BatchPlan::from_args(&args(&["--users-csv", "/nonexistent/users.csv"]));
        assert!(plan.explicit_users.is_empty());
    }
}
