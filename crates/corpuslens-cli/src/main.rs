//! corpuslens CLI - upload, query and compare documents in a hosted retrieval corpus.

use clap::Parser;
use corpuslens_cli::commands;
use corpuslens_cli::repl;
use corpuslens_cli::{Cli, Command, Config, Formatter, Session};
use corpuslens_sdk::CorpusClient;
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> corpuslens_cli::Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Load or create config
    let mut config = match &cli.config {
        Some(path) => Config::load_from(Path::new(path))?,
        None => Config::load()?,
    };

    // Override profile if specified
    if let Some(profile_name) = cli.profile {
        config.switch_profile(profile_name)?;
    }

    // Determine output format
    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let api_key = cli.api_key.as_deref();

    match cli.command {
        None | Some(Command::Repl) => {
            repl::run_repl(&mut config, api_key, &formatter).await?;
        }
        Some(Command::Connect(args)) => {
            commands::execute_connect(args, api_key, &mut config, &formatter).await?;
        }
        Some(Command::Profile(args)) => {
            commands::execute_profile(args, &mut config, &formatter)?;
        }
        Some(cmd) => {
            let connection = config.get_active_profile()?.connection(api_key)?;
            let timeout = config.settings.timeout();
            // The permission probe runs even when the connection test would fail
            let client = match cmd {
                Command::Permissions => CorpusClient::with_timeout(connection, timeout)?,
                _ => CorpusClient::connect(connection, timeout).await?,
            };
            let mut session = Session::new();
            session.attach(client);

            match cmd {
                Command::Upload(args) => {
                    let report = commands::execute_upload(args, &mut session, &config.settings, &formatter).await?;
                    if report.succeeded() < report.total() {
                        std::process::exit(1);
                    }
                }
                Command::Query(args) => {
                    commands::execute_query(args, &mut session, &formatter).await?;
                }
                Command::Compare(args) => {
                    commands::execute_compare(args, &session, &formatter).await?;
                }
                Command::Documents(args) => {
                    commands::execute_documents(args, &session, &formatter).await?;
                }
                Command::Permissions => {
                    commands::execute_permissions(&session, &formatter).await?;
                }
                Command::Connect(_) | Command::Profile(_) | Command::Repl => unreachable!(),
            }
        }
    }

    Ok(())
}
