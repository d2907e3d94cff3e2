use anyhow::Context;
use clap::Parser;
use test_data_generator::config::cli::is_informational;
use test_data_generator::utils::logger;
use test_data_generator::{
    run_batch, CliArgs, FixtureGenerator, MySqlGateway, SeederConfig, ServiceClient, Session,
    ShellRunner, SinkDispatcher,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if is_informational(&e) => e.exit(),
        Err(e) => {
            eprintln!("❌ [ERROR] {}", e.render().to_string().trim_end());
            return Ok(());
        }
    };

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting test-data-generator");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = match SeederConfig::load(&args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let client =
        ServiceClient::from_config(&config).context("failed to build the HTTP client")?;

    let generator = FixtureGenerator::from_seed_option(config.seed);
    let mut dispatcher = SinkDispatcher::new(MySqlGateway, client, generator)
        .with_external_services(config.external_services);
    let mut out = std::io::stdout();

    if args.is_batch() {
        if let Err(e) = run_batch(&args, &config, &mut dispatcher, &mut out).await {
            tracing::error!("❌ Batch run failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
        }
        return Ok(());
    }

    let runner = ShellRunner::new(config.reset_shell.clone());
    let mut session = Session::new(config, dispatcher, runner);
    let mut input = tokio::io::BufReader::new(tokio::io::stdin());

    if let Err(e) = session.run(&mut input, &mut out).await {
        tracing::error!("❌ Session ended with an error: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
    }

    Ok(())
}
