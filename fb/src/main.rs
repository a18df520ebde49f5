//! focusboard - terminal kanban board with focus mode
//!
//! CLI entry point: opens the board, or prints it and the effective config.

use std::fs;
use std::path::PathBuf;

use clap::{CommandFactory, FromArgMatches};
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use focusboard::board::BoardProjection;
use focusboard::cli::{Cli, Command, OutputFormat, generate_after_help};
use focusboard::config::Config;
use focusboard::domain::Status;
use focusboard::store::TaskStore;
use focusboard::tui;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Note: Can't log params here since logging isn't initialized yet
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("focusboard")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    // The TUI owns the terminal, so logs always go to a file
    let log_file = fs::File::create(log_dir.join("focusboard.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Build command with dynamic after_help that shows config and log locations
    let cmd = Cli::command().after_help(generate_after_help());
    let cli = Cli::from_arg_matches(&cmd.get_matches())?;

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if cli.empty {
        debug!("main: --empty given, disabling seed tasks");
        config.board.seed = false;
    }

    info!(version = env!("GIT_DESCRIBE"), "focusboard starting");

    match cli.command {
        None | Some(Command::Board) => cmd_board(&config).await,
        Some(Command::Show { format }) => cmd_show(&config, format),
        Some(Command::Config { format }) => cmd_config(&config, format),
    }
}

/// Open the interactive board
async fn cmd_board(config: &Config) -> Result<()> {
    debug!("cmd_board: called");
    let store = config.board.initial_store();
    tui::run(config, store).await
}

/// Print the starting board
fn cmd_show(config: &Config, format: OutputFormat) -> Result<()> {
    debug!(?format, "cmd_show: called");
    let store = config.board.initial_store();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&board_json(&store))?);
        }
        OutputFormat::Yaml => {
            print!("{}", serde_yaml::to_string(&board_json(&store))?);
        }
        OutputFormat::Text => {
            let projection = BoardProjection::project(&store);
            for column in projection.columns() {
                let title = format!("{} ({})", column.status.title(), column.cards.len());
                let title = match column.status {
                    Status::Todo => title.yellow().bold(),
                    Status::InProgress => title.cyan().bold(),
                    Status::Done => title.green().bold(),
                };
                println!("{}", title);
                if column.cards.is_empty() {
                    println!("  {}", "(empty)".dimmed());
                }
                for card in &column.cards {
                    println!("  {} {}", format!("#{}", card.id).dimmed(), card.text);
                }
            }
        }
    }
    Ok(())
}

/// Board contents grouped by column
fn board_json(store: &TaskStore) -> serde_json::Value {
    let projection = BoardProjection::project(store);
    let columns: Vec<_> = projection
        .columns()
        .iter()
        .map(|column| {
            let tasks: Vec<_> = column
                .cards
                .iter()
                .filter_map(|card| store.find_task(card.id))
                .collect();
            serde_json::json!({
                "status": column.status,
                "title": column.status.title(),
                "tasks": tasks,
            })
        })
        .collect();
    serde_json::json!({ "columns": columns, "next-id": store.next_id() })
}

/// Print the effective configuration
fn cmd_config(config: &Config, format: OutputFormat) -> Result<()> {
    debug!(?format, "cmd_config: called");
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(config)?),
        OutputFormat::Text => {
            println!("{}", "focusboard configuration".bright_cyan().bold());
            println!(
                "  log-level: {}",
                config.log_level.as_deref().unwrap_or("(default)")
            );
            let t = &config.timing;
            println!(
                "  timing: entrance {}ms, exit {}ms, next {}ms, completion {}ms, tick {}ms",
                t.entrance_delay_ms, t.exit_delay_ms, t.next_delay_ms, t.completion_animation_ms, t.tick_rate_ms
            );
            println!(
                "  board: seed {} ({} seed tasks)",
                config.board.seed,
                config.board.seed_tasks.len()
            );
            println!(
                "  notify: bell {}, toast {}ms",
                config.notify.bell, config.notify.toast_ms
            );
        }
    }
    Ok(())
}
