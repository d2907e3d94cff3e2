use crate::config::{CreationMode, SeederConfig, ServiceTarget, TargetSelection};
use crate::core::dispatcher::SinkDispatcher;
use crate::core::generator::{demo_scenarios, parse_user_count};
use crate::core::reset::reset_all;
use crate::core::status::{render_status, status_overview};
use crate::domain::model::DispatchReport;
use crate::domain::ports::{CommandRunner, DatabaseGateway};
use crate::utils::error::Result;
use crate::utils::validation::validate_database_url;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

const QUICK_API_USERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuCommand {
    ResetAll,
    SelectTarget,
    CreateUsers,
    CreateSwipes,
    CreateMatches,
    CreateMessages,
    SetConnection,
    ShowStatus,
    SelectMode,
    QuickApiUsers,
    CreateUsersWithProfiles,
    SeedDemo,
    Exit,
    Invalid(String),
}

impl MenuCommand {
    pub fn parse(input: &str) -> Self {
        match input.trim().to_ascii_uppercase().as_str() {
            "R" => MenuCommand::ResetAll,
            "0" => MenuCommand::SelectTarget,
            "1" => MenuCommand::CreateUsers,
            "2" => MenuCommand::CreateSwipes,
            "3" => MenuCommand::CreateMatches,
            "4" => MenuCommand::CreateMessages,
            "5" => MenuCommand::SetConnection,
            "S" => MenuCommand::ShowStatus,
            "7" => MenuCommand::SelectMode,
            "8" => MenuCommand::QuickApiUsers,
            "9" => MenuCommand::CreateUsersWithProfiles,
            "D" => MenuCommand::SeedDemo,
            "6" => MenuCommand::Exit,
            other => MenuCommand::Invalid(other.to_string()),
        }
    }
}

/// Interactive menu over one dispatcher. The selection is owned here and
/// passed by reference into every dispatch.
pub struct Session<G: DatabaseGateway, C: CommandRunner> {
    config: SeederConfig,
    selection: TargetSelection,
    dispatcher: SinkDispatcher<G>,
    runner: C,
}

impl<G: DatabaseGateway, C: CommandRunner> Session<G, C> {
    pub fn new(config: SeederConfig, dispatcher: SinkDispatcher<G>, runner: C) -> Self {
        let selection = config.selection(ServiceTarget::Auth, CreationMode::default());
        Self {
            config,
            selection,
            dispatcher,
            runner,
        }
    }

    pub fn selection(&self) -> &TargetSelection {
        &self.selection
    }

    pub fn dispatcher(&self) -> &SinkDispatcher<G> {
        &self.dispatcher
    }

    pub fn runner(&self) -> &C {
        &self.runner
    }

    /// Loops until the exit key or end of input.
    pub async fn run<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        loop {
            self.show_status(out).await?;
            self.render_menu(out)?;

            let Some(line) = read_line(input).await? else {
                writeln!(out, "Exiting...")?;
                return Ok(());
            };
            if !self.execute(MenuCommand::parse(&line), input, out).await? {
                return Ok(());
            }
        }
    }

    /// Runs one menu command. Returns false once the session should end.
    pub async fn execute<R, W>(
        &mut self,
        command: MenuCommand,
        input: &mut R,
        out: &mut W,
    ) -> Result<bool>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        tracing::debug!("Menu command: {:?}", command);

        match command {
            MenuCommand::ResetAll => {
                if confirm(input, out, "Are you sure you want to reset ALL databases? (y/n): ")
                    .await?
                {
                    self.reset(out).await?;
                }
            }
            MenuCommand::SelectTarget => self.select_target(input, out).await?,
            MenuCommand::CreateUsers => {
                self.offer_reset(input, out).await?;
                if let Some(count) = prompt_count(input, out).await? {
                    let records = self.dispatcher.generator_mut().generate(count, &[]);
                    let report = self.dispatcher.dispatch(&records, &self.selection, false).await;
                    write_report(out, &report)?;
                }
            }
            MenuCommand::CreateSwipes => writeln!(out, "[STUB] Create swipes is not implemented yet.")?,
            MenuCommand::CreateMatches => {
                writeln!(out, "[STUB] Create mutual matches is not implemented yet.")?
            }
            MenuCommand::CreateMessages => {
                writeln!(out, "[STUB] Create messages is not implemented yet.")?
            }
            MenuCommand::SetConnection => self.set_connection(input, out).await?,
            MenuCommand::ShowStatus => self.show_status(out).await?,
            MenuCommand::SelectMode => self.select_mode(input, out).await?,
            MenuCommand::QuickApiUsers => {
                self.offer_reset(input, out).await?;
                let target = self
                    .config
                    .selection(ServiceTarget::Auth, CreationMode::ApiCall);
                let records = self.dispatcher.generator_mut().generate(QUICK_API_USERS, &[]);
                let report = self.dispatcher.insert_via_api(&records, &target, true).await;
                write_report(out, &report)?;
            }
            MenuCommand::CreateUsersWithProfiles => {
                self.offer_reset(input, out).await?;
                if let Some(count) = prompt_count(input, out).await? {
                    let target = TargetSelection {
                        mode: CreationMode::ApiCall,
                        ..self.selection.clone()
                    };
                    let records = self.dispatcher.generator_mut().generate(count, &[]);
                    let report = self.dispatcher.insert_via_api(&records, &target, true).await;
                    write_report(out, &report)?;
                }
            }
            MenuCommand::SeedDemo => {
                let records = self
                    .dispatcher
                    .generator_mut()
                    .demo_users(self.config.demo_fill);
                let report = self.dispatcher.dispatch(&records, &self.selection, true).await;
                write_report(out, &report)?;
                write_scenarios(out)?;
            }
            MenuCommand::Exit => {
                writeln!(out, "Exiting...")?;
                return Ok(false);
            }
            MenuCommand::Invalid(key) => {
                tracing::debug!("Unknown menu key '{}'", key);
                writeln!(out, "Invalid option")?;
            }
        }
        Ok(true)
    }

    fn render_menu<W: Write>(&self, out: &mut W) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "========== MENU ==========")?;
        writeln!(
            out,
            "Target: {} | Mode: {}",
            self.selection.describe(),
            self.selection.mode
        )?;
        writeln!(out, "R. Reset all databases")?;
        writeln!(out, "0. Select target database")?;
        writeln!(out, "1. Create users")?;
        writeln!(out, "2. Create swipes")?;
        writeln!(out, "3. Create mutual matches")?;
        writeln!(out, "4. Create messages")?;
        writeln!(out, "5. Set custom connection string")?;
        writeln!(out, "S. Show status")?;
        writeln!(out, "7. Select creation mode")?;
        writeln!(out, "8. Create {} users via API (with profiles)", QUICK_API_USERS)?;
        writeln!(out, "9. Create users in auth and user service")?;
        writeln!(out, "D. Seed demo users")?;
        writeln!(out, "6. Exit")?;
        write!(out, "Choose an option: ")?;
        out.flush()?;
        Ok(())
    }

    async fn show_status<W: Write>(&self, out: &mut W) -> Result<()> {
        if !self.config.external_services {
            writeln!(out, "⏭️ External services disabled, status overview skipped.")?;
            return Ok(());
        }
        let rows = status_overview(self.dispatcher.gateway(), &self.config).await;
        render_status(&rows, out)?;
        Ok(())
    }

    async fn reset<W: Write>(&self, out: &mut W) -> Result<()> {
        if !self.config.external_services {
            writeln!(out, "⏭️ External services disabled, database reset skipped.")?;
            return Ok(());
        }

        let outcomes = reset_all(&self.runner, &self.config.reset_targets()).await;
        for outcome in &outcomes {
            if outcome.succeeded() {
                writeln!(out, "✅ {} reset", outcome.target)?;
            } else {
                writeln!(out, "❌ [ERROR] {} reset failed", outcome.target)?;
            }
        }
        Ok(())
    }

    async fn offer_reset<R, W>(&self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        if confirm(
            input,
            out,
            "Do you want to reset all databases before creating users? (y/n): ",
        )
        .await?
        {
            self.reset(out).await?;
        }
        Ok(())
    }

    async fn select_target<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "Select target database:")?;
        for (i, target) in ServiceTarget::ALL.iter().enumerate() {
            writeln!(out, "{}. {}", i + 1, target.label())?;
        }
        write!(out, "Choice: ")?;
        out.flush()?;

        let Some(choice) = read_line(input).await? else {
            return Ok(());
        };
        match ServiceTarget::from_menu_key(&choice) {
            Some(target) => {
                self.selection = self.config.selection(target, self.selection.mode);
                writeln!(out, "Selected: {}", self.selection.describe())?;
                self.check_connection(out).await?;
            }
            None => writeln!(out, "Invalid selection")?,
        }
        Ok(())
    }

    async fn set_connection<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        write!(
            out,
            "Enter a MySQL connection URL for {} (empty restores the default): ",
            self.selection.service
        )?;
        out.flush()?;

        let Some(url) = read_line(input).await? else {
            return Ok(());
        };
        if url.is_empty() {
            self.selection = self
                .config
                .selection(self.selection.service, self.selection.mode);
            writeln!(out, "Restored default connection for {}", self.selection.service)?;
            return Ok(());
        }

        if let Err(e) = validate_database_url("connection", &url) {
            writeln!(out, "❌ [ERROR] {}", e)?;
            return Ok(());
        }
        self.selection.connection = url;
        self.selection.custom_connection = true;
        writeln!(out, "Using {}", self.selection.describe())?;
        self.check_connection(out).await
    }

    async fn select_mode<R, W>(&mut self, input: &mut R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        writeln!(out, "Select user creation mode:")?;
        writeln!(out, "1. Direct insert")?;
        writeln!(out, "2. API call")?;
        write!(out, "Choice: ")?;
        out.flush()?;

        let Some(choice) = read_line(input).await? else {
            return Ok(());
        };
        match choice.as_str() {
            "1" => self.selection.mode = CreationMode::DirectInsert,
            "2" => self.selection.mode = CreationMode::ApiCall,
            _ => {
                writeln!(out, "Invalid selection")?;
                return Ok(());
            }
        }
        writeln!(out, "User creation mode set to {}", self.selection.mode)?;
        Ok(())
    }

    async fn check_connection<W: Write>(&self, out: &mut W) -> Result<()> {
        if !self.config.external_services {
            writeln!(out, "⏭️ External services disabled, connection test skipped.")?;
            return Ok(());
        }
        match self
            .dispatcher
            .gateway()
            .test_connection(&self.selection.connection)
            .await
        {
            Ok(()) => writeln!(out, "✅ Connection to {} successful.", self.selection.service)?,
            Err(e) => {
                tracing::error!("❌ Connection test failed: {}", e);
                writeln!(out, "❌ [ERROR] Database is not available: {}", e)?;
                writeln!(out, "💡 {}", e.recovery_suggestion())?;
            }
        }
        Ok(())
    }
}

async fn read_line<R: AsyncBufRead + Unpin>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line).await? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

async fn confirm<R, W>(input: &mut R, out: &mut W, question: &str) -> Result<bool>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "{}", question)?;
    out.flush()?;
    Ok(read_line(input)
        .await?
        .is_some_and(|answer| answer.eq_ignore_ascii_case("y")))
}

async fn prompt_count<R, W>(input: &mut R, out: &mut W) -> Result<Option<usize>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "How many users to create? ")?;
    out.flush()?;

    let Some(answer) = read_line(input).await? else {
        return Ok(None);
    };
    match parse_user_count(&answer) {
        Ok(count) => Ok(Some(count)),
        Err(e) => {
            tracing::warn!("Rejected user count: {}", e);
            writeln!(out, "❌ [ERROR] {}", e)?;
            Ok(None)
        }
    }
}

pub(crate) fn write_report<W: Write>(out: &mut W, report: &DispatchReport) -> Result<()> {
    writeln!(
        out,
        "📊 {}/{} users created, {} profiles seeded, {} failures",
        report.created,
        report.attempted,
        report.profiles_seeded,
        report.failures.len()
    )?;
    for failure in &report.failures {
        writeln!(out, "  ❌ [ERROR] {}", failure)?;
    }
    Ok(())
}

pub(crate) fn write_scenarios<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "🎬 Demo scenarios:")?;
    for scenario in demo_scenarios() {
        writeln!(out, "- {}: {}", scenario.name, scenario.description)?;
        writeln!(out, "  Users: {}", scenario.users.join(", "))?;
        for action in scenario.actions {
            writeln!(out, "  * {}", action)?;
        }
    }
    Ok(())
}
