//! Interactive REPL (Read-Eval-Print Loop) mode.

use crate::cli::{ProfileAction, ProfileArgs};
use crate::commands;
use crate::cli::document_limits_note;
use crate::commands::analyze::{build_analyzer, load_template, report_run, run_analysis};
use crate::config::{self, Config};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::session::Session;
use kashshaf_domain::ModelId;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Environment variable consulted for the initial API key
pub const API_KEY_ENV: &str = "KASHSHAF_API_KEY";

/// Run the interactive REPL.
pub async fn run_repl(config: &mut Config, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.info("Kashshaf REPL - Type 'help' for commands, 'exit' to quit"));
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    // Load history
    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = new_session(config)?;

    loop {
        let prompt = match session.document().and_then(|p| p.file_name()) {
            Some(name) => format!("kashshaf [{}]> ", name.to_string_lossy()),
            None => "kashshaf> ".to_string(),
        };

        match editor.readline(&prompt) {
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
                    Ok(ReplCommand::Help) => {
                        print_help(config, formatter);
                    }
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut session, config, formatter).await {
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
    Open(PathBuf),
    Model(Option<ModelId>),
    Key(String),
    Analyze,
    Reply,
    Table,
    Save(Option<PathBuf>),
    Status,
    Models,
    Profile(ProfileArgs),
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
        "open" => parse_open_command(&parts[1..]),
        "model" => parse_model_command(&parts[1..]),
        "key" => parse_key_command(&parts[1..]),
        "analyze" | "run" => Ok(ReplCommand::Analyze),
        "reply" => Ok(ReplCommand::Reply),
        "table" => Ok(ReplCommand::Table),
        "save" => Ok(ReplCommand::Save(join_path(&parts[1..]))),
        "status" => Ok(ReplCommand::Status),
        "models" => Ok(ReplCommand::Models),
        "profile" => parse_profile_command(&parts[1..]),
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: {}. Type 'help' for available commands.",
            parts[0]
        ))),
    }
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: ReplCommand,
    session: &mut Session,
    config: &mut Config,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Open(path) => {
            let path = session.open(path)?;
            println!("{}", formatter.success(&format!("Opened {}", path.display())));
        }
        ReplCommand::Model(None) => {
            println!("{}", formatter.format_models(session.model()));
        }
        ReplCommand::Model(Some(model)) => {
            session.set_model(model);
            println!("{}", formatter.success(&format!("Model set to {}", model)));
        }
        ReplCommand::Key(key) => {
            session.set_api_key(key)?;
            println!("{}", formatter.success("API key set for this session"));
        }
        ReplCommand::Analyze => {
            analyze_document(session, config, formatter).await?;
        }
        ReplCommand::Reply => {
            let run = session
                .last_run()
                .ok_or_else(|| CliError::InvalidInput("No run yet. Use 'analyze' first.".to_string()))?;
            println!("{}", run.result.raw_reply);
        }
        ReplCommand::Table => {
            let run = session
                .last_run()
                .ok_or_else(|| CliError::InvalidInput("No run yet. Use 'analyze' first.".to_string()))?;
            let labels = active_template_labels(config)?;
            println!("{}", formatter.format_records(&run.result.records, &labels)?);
        }
        ReplCommand::Save(path) => {
            let path = path.unwrap_or_else(|| config.settings.output_file.clone());
            let bytes = session.save(&path)?;
            println!(
                "{}",
                formatter.success(&format!("Saved {} bytes to {}", bytes, path.display()))
            );
        }
        ReplCommand::Status => {
            print_status(session, config, formatter);
        }
        ReplCommand::Models => {
            println!("{}", formatter.format_models(session.model()));
        }
        ReplCommand::Profile(args) => {
            let switching = matches!(args.action, ProfileAction::Switch { .. });
            commands::execute_profile(args, config, formatter)?;
            if switching {
                apply_profile(session, config)?;
            }
        }
        ReplCommand::Exit | ReplCommand::Help => {}
    }

    Ok(())
}

/// Run one analysis of the open document and keep it in the session.
async fn analyze_document(session: &mut Session, config: &Config, formatter: &Formatter) -> Result<()> {
    let path = session.require_document()?.to_path_buf();
    let api_key = session.require_api_key()?;

    let profile = config.get_active_profile()?;
    let template = load_template(profile.template.as_deref())?;
    let analyzer = build_analyzer(config, template, api_key)?;

    let run = run_analysis(&analyzer, &path, session.model(), formatter).await?;
    report_run(
        &run,
        &analyzer.template().field_labels(),
        config.settings.show_reply,
        formatter,
    )?;

    let empty = run.result.is_empty();
    session.replace_run(run);

    if session.export_buffer().is_some() {
        let hint = if empty {
            "The previous spreadsheet is kept; use 'save [path]' to write it"
        } else {
            "Use 'save [path]' to write the spreadsheet"
        };
        println!("{}", formatter.info(hint));
    }

    Ok(())
}

/// Session seeded from the active profile and the environment.
fn new_session(config: &Config) -> Result<Session> {
    let profile = config.get_active_profile()?;
    let api_key = std::env::var(API_KEY_ENV)
        .ok()
        .or_else(|| profile.api_key.clone());
    Ok(Session::new(profile.model_id()?, api_key))
}

/// Adopt the active profile's model and stored key.
fn apply_profile(session: &mut Session, config: &Config) -> Result<()> {
    let profile = config.get_active_profile()?;
    session.set_model(profile.model_id()?);
    if let Some(key) = &profile.api_key {
        session.set_api_key(key.clone())?;
    }
    Ok(())
}

fn active_template_labels(config: &Config) -> Result<kashshaf_domain::FieldLabels> {
    let profile = config.get_active_profile()?;
    Ok(load_template(profile.template.as_deref())?.field_labels())
}

fn print_status(session: &Session, config: &Config, formatter: &Formatter) {
    println!("{}", formatter.info("Session status:"));
    println!("  Profile:  {}", config.active_profile);
    match session.document() {
        Some(path) => println!("  Document: {}", path.display()),
        None => println!("  Document: (none)"),
    }
    println!("  Model:    {}", session.model());
    println!(
        "  API key:  {}",
        if session.has_api_key() { "set" } else { "not set" }
    );
    match session.last_run() {
        Some(run) => println!(
            "  Last run: {} record(s), {} skipped line(s){}",
            run.result.records.len(),
            run.result.skipped_lines,
            if run.export.is_some() { ", ready to save" } else { "" }
        ),
        None => println!("  Last run: (none)"),
    }
}

// Simple command parsers for REPL (minimal argument parsing)

fn parse_open_command(args: &[&str]) -> Result<ReplCommand> {
    join_path(args)
        .map(ReplCommand::Open)
        .ok_or_else(|| CliError::InvalidInput("Usage: open <file>".to_string()))
}

fn parse_model_command(args: &[&str]) -> Result<ReplCommand> {
    match args.first() {
        None => Ok(ReplCommand::Model(None)),
        Some(id) => {
            let model = id.parse::<ModelId>().map_err(CliError::InvalidInput)?;
            Ok(ReplCommand::Model(Some(model)))
        }
    }
}

fn parse_key_command(args: &[&str]) -> Result<ReplCommand> {
    match args {
        [key] => Ok(ReplCommand::Key(key.to_string())),
        _ => Err(CliError::InvalidInput("Usage: key <credential>".to_string())),
    }
}

fn parse_profile_command(args: &[&str]) -> Result<ReplCommand> {
    if args.is_empty() {
        return Ok(ReplCommand::Profile(ProfileArgs {
            action: ProfileAction::Show,
        }));
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

    Ok(ReplCommand::Profile(ProfileArgs { action }))
}

/// Rejoin the remaining words so paths may contain spaces.
fn join_path(args: &[&str]) -> Option<PathBuf> {
    (!args.is_empty()).then(|| PathBuf::from(args.join(" ")))
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!("Failed to initialize editor: {}", e)))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = config::config_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(config: &Config, formatter: &Formatter) {
    println!("{}", formatter.info("Available commands:"));
    println!();
    println!("  open <file>                - Select the .docx document to analyze");
    println!("  model [id]                 - Show models, or select one (gpt-4, gpt-3.5-turbo)");
    println!("  key <credential>           - Set the API key for this session");
    println!("  analyze                    - Analyze the open document");
    println!("  reply                      - Show the model's last reply");
    println!("  table                      - Show the last run's records");
    println!("  save [path]                - Write the last run's spreadsheet (default: kashafaat.xlsx)");
    println!("  status                     - Show session state");
    println!("  models                     - List supported models");
    println!("  profile [list|show|switch] - Manage profiles");
    println!("  help, ?                    - Show this help");
    println!("  exit, quit, q              - Exit REPL");
    println!();
    println!("{}", document_limits_note(config.analyzer.max_text_length));
    println!();
}
