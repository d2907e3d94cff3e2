use crate::config::ServiceTarget;
use crate::domain::ports::{CommandOutput, CommandRunner};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Runs commands through `<shell> -c <command>`.
#[derive(Debug, Clone)]
pub struct ShellRunner {
    shell: String,
}

impl ShellRunner {
    pub fn new(shell: impl Into<String>) -> Self {
        Self {
            shell: shell.into(),
        }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> Result<CommandOutput> {
        let output = tokio::process::Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .output()
            .await?;

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ResetOutcome {
    pub target: ServiceTarget,
    pub command: String,
    pub result: std::result::Result<CommandOutput, String>,
}

impl ResetOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(&self.result, Ok(output) if output.success())
    }
}

/// Drops and re-migrates every target in turn. A failing target is logged
/// and the remaining ones still run.
pub async fn reset_all<R: CommandRunner + ?Sized>(
    runner: &R,
    targets: &[(ServiceTarget, String)],
) -> Vec<ResetOutcome> {
    let mut outcomes = Vec::with_capacity(targets.len());

    for (target, command) in targets {
        tracing::info!("🔄 Resetting {}", target);
        let result = match runner.run(command).await {
            Ok(output) => {
                tracing::info!(
                    "[Reset] {}\n{}\n{}",
                    command,
                    output.stdout.trim_end(),
                    output.stderr.trim_end()
                );
                if !output.success() {
                    tracing::error!(
                        "❌ [ERROR] Reset of {} exited with {:?}",
                        target,
                        output.exit_code
                    );
                }
                Ok(output)
            }
            Err(e) => {
                tracing::error!(
                    "❌ [ERROR] Failed to reset DB with command: {}\n{}",
                    command,
                    e
                );
                Err(e.to_string())
            }
        };

        outcomes.push(ResetOutcome {
            target: *target,
            command: command.clone(),
            result,
        });
    }

    outcomes
}
