//! Interactive REPL (Read-Eval-Print Loop) mode.
//!
//! The REPL owns one [`Session`] for the life of the process, so uploads and
//! the conversation log carry over between commands.

use crate::cli::{
    Command, CompareArgs, ConnectArgs, DocumentsArgs, ProfileAction, ProfileArgs, QueryArgs, StrategyArg,
    UploadArgs,
};
use crate::commands;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use corpuslens_sdk::DEFAULT_RESULT_LIMIT;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;
use tracing::debug;

/// Run the interactive REPL.
pub async fn run_repl(config: &mut Config, api_key: Option<&str>, formatter: &Formatter) -> Result<()> {
    println!(
        "{}",
        formatter.info("corpuslens REPL - Type 'help' for commands, 'exit' to quit")
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = Session::new();

    loop {
        let prompt = if session.is_connected() {
            "corpuslens> "
        } else {
            "corpuslens (disconnected)> "
        };

        match editor.readline(prompt) {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(ReplCommand::History) => match formatter.format_history(session.history()) {
                        Ok(out) => println!("{}", out),
                        Err(e) => eprintln!("{}", formatter.error(&e.to_string())),
                    },
                    Ok(ReplCommand::Clear) => {
                        session.clear_history();
                        println!("{}", formatter.success("Conversation history cleared"));
                    }
                    Ok(ReplCommand::Files) => {
                        println!("{}", formatter.format_uploaded_files(session.uploaded_files()));
                    }
                    Ok(ReplCommand::Disconnect) => {
                        if session.disconnect() {
                            println!("{}", formatter.success("Disconnected"));
                        } else {
                            println!("{}", formatter.info("Not connected"));
                        }
                    }
                    Ok(ReplCommand::Command(cmd)) => {
                        if let Err(e) = execute_repl_command(cmd, &mut session, config, api_key, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use 'exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    // Save history
    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug)]
enum ReplCommand {
    Exit,
    Help,
    History,
    Clear,
    Files,
    Disconnect,
    Command(Command),
}

/// Parse a REPL command line.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();

    if parts.is_empty() {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    }

    match parts[0] {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "history" => Ok(ReplCommand::History),
        "clear" => Ok(ReplCommand::Clear),
        "files" => Ok(ReplCommand::Files),
        "disconnect" => Ok(ReplCommand::Disconnect),
        "connect" => parse_connect_command(&parts[1..]),
        "upload" => parse_upload_command(&parts[1..]),
        "query" | "ask" => parse_query_command(&parts[1..]),
        "compare" => parse_compare_command(&parts[1..]),
        "documents" | "docs" => parse_documents_command(&parts[1..]),
        "permissions" => Ok(ReplCommand::Command(Command::Permissions)),
        "profile" => parse_profile_command(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: Command,
    session: &mut Session,
    config: &mut Config,
    api_key: Option<&str>,
    formatter: &Formatter,
) -> Result<()> {
    debug!(?cmd, "repl command");
    match cmd {
        Command::Connect(args) => {
            let client = commands::execute_connect(args, api_key, config, formatter).await?;
            session.attach(client);
        }
        Command::Profile(args) => commands::execute_profile(args, config, formatter)?,
        Command::Upload(args) => {
            commands::execute_upload(args, session, &config.settings, formatter).await?;
        }
        Command::Query(args) => commands::execute_query(args, session, formatter).await?,
        Command::Compare(args) => {
            commands::execute_compare(args, session, formatter).await?;
        }
        Command::Documents(args) => commands::execute_documents(args, session, formatter).await?,
        Command::Permissions => commands::execute_permissions(session, formatter).await?,
        Command::Repl => {
            println!("{}", formatter.info("Already in REPL mode"));
        }
    }

    Ok(())
}

// Simple command parsers for REPL (minimal argument parsing)

fn parse_connect_command(args: &[&str]) -> Result<ReplCommand> {
    if args.len() == 1 || args.len() > 3 {
        return Err(CliError::InvalidInput(
            "Usage: connect [<customer_id> <corpus_id> [base_url]]".to_string(),
        ));
    }

    Ok(ReplCommand::Command(Command::Connect(ConnectArgs {
        customer_id: args.first().map(|s| s.to_string()),
        corpus_id: args.get(1).map(|s| s.to_string()),
        base_url: args.get(2).map(|s| s.to_string()),
        ..Default::default()
    })))
}

fn parse_upload_command(args: &[&str]) -> Result<ReplCommand> {
    let mut files = Vec::new();
    let mut strategy = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match *arg {
            "--strategy" | "-s" => {
                strategy = match iter.next().copied() {
                    Some("multipart") => Some(StrategyArg::Multipart),
                    Some("structured") => Some(StrategyArg::Structured),
                    _ => {
                        return Err(CliError::InvalidInput(
                            "Strategy must be 'multipart' or 'structured'".to_string(),
                        ))
                    }
                };
            }
            file => files.push(file.to_string()),
        }
    }

    if files.is_empty() {
        return Err(CliError::InvalidInput(
            "Usage: upload <file.pdf> [file2.pdf ...] [--strategy multipart|structured]".to_string(),
        ));
    }

    Ok(ReplCommand::Command(Command::Upload(UploadArgs { files, strategy })))
}

fn parse_query_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Err(CliError::InvalidInput("Usage: query <question>".to_string()));
    }

    Ok(ReplCommand::Command(Command::Query(QueryArgs {
        question: args.iter().map(|s| s.to_string()).collect(),
        limit: DEFAULT_RESULT_LIMIT,
    })))
}

fn parse_compare_command(args: &[&str]) -> Result<ReplCommand> {
    let mut compare = CompareArgs::default();
    let mut extra = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match *arg {
            "--csv" => {
                let path = iter
                    .next()
                    .ok_or_else(|| CliError::InvalidInput("Usage: --csv <path>".to_string()))?;
                compare.csv = Some(path.to_string());
            }
            "--chart" => compare.chart = true,
            word => extra.push(word),
        }
    }

    if !extra.is_empty() {
        compare.metrics = Some(extra.join(" "));
    }

    Ok(ReplCommand::Command(Command::Compare(compare)))
}

fn parse_documents_command(args: &[&str]) -> Result<ReplCommand> {
    let limit = match args.first() {
        Some(n) => n
            .parse()
            .map_err(|_| CliError::InvalidInput(format!("Invalid limit: {}", n)))?,
        None => 10,
    };

    Ok(ReplCommand::Command(Command::Documents(DocumentsArgs { limit })))
}

fn parse_profile_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Ok(ReplCommand::Command(Command::Profile(ProfileArgs {
            action: ProfileAction::Show,
        })));
    }

    let action = match args[0] {
        "list" => ProfileAction::List,
        "show" => ProfileAction::Show,
        "switch" => {
            if args.len() < 2 {
                return Err(CliError::InvalidInput("Usage: profile switch <name>".to_string()));
            }
            ProfileAction::Switch {
                name: args[1].to_string(),
            }
        }
        _ => return Err(CliError::InvalidInput(format!("Unknown profile action: {}", args[0]))),
    };

    Ok(ReplCommand::Command(Command::Profile(ProfileArgs { action })))
}

fn editor_error(err: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", err)))
}

fn get_history_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
    let dir = home.join(".corpuslens");
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  connect [customer corpus [url]]  - Test the connection and attach to the corpus");
    println!("  upload <files> [--strategy s]    - Upload PDF files (s: multipart|structured)");
    println!("  query <question>                 - Ask a question about the documents");
    println!("  compare [metrics] [--csv p] [--chart]");
    println!("                                   - Extract Revenue, Net Profit, Gross Profit,");
    println!("                                     Total Assets plus comma-separated extras");
    println!("  documents [limit]                - List documents in the corpus");
    println!("  permissions                      - Check what the API key may do");
    println!("  history                          - Show the conversation, newest first");
    println!("  clear                            - Clear the conversation history");
    println!("  files                            - Files uploaded in this session");
    println!("  disconnect                       - Drop the current connection");
    println!("  profile [list|show|switch]       - Manage profiles");
    println!("  help, ?                          - Show this help");
    println!("  exit, quit, q                    - Exit REPL");
    println!();
}
