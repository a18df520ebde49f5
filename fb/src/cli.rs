//! CLI command definitions and subcommands

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

/// focusboard - terminal kanban board with focus mode
#[derive(Debug, Parser)]
#[command(
    name = "fb",
    about = "Terminal kanban board with a one-task-at-a-time focus mode",
    version = env!("GIT_DESCRIBE"),
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Start with an empty board instead of the seed tasks
    #[arg(short, long, global = true)]
    pub empty: bool,

    /// Subcommand to execute (default: open the board)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Open the interactive board (default)
    Board,

    /// Print the starting board without opening the TUI
    Show {
        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Print the effective configuration
    Config {
        /// Output format
        #[arg(short, long, default_value = "yaml")]
        format: OutputFormat,
    },
}

/// Get the log file path
pub fn get_log_path() -> PathBuf {
    debug!("get_log_path: called");
    let path = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("focusboard")
        .join("logs")
        .join("focusboard.log");
    debug!(?path, "get_log_path: returning path");
    path
}

/// Generate the after_help text with config and log locations
pub fn generate_after_help() -> String {
    debug!("generate_after_help: called");
    let mut help = String::new();

    help.push_str("Config files (first found wins):\n");
    help.push_str("  ./.focusboard.yml\n");
    if let Some(dir) = dirs::config_dir() {
        help.push_str(&format!("  {}\n", dir.join("focusboard").join("focusboard.yml").display()));
    }

    help.push('\n');
    help.push_str(&format!("Logs are written to: {}\n", get_log_path().display()));
    help
}

/// Output format for show/config commands
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        debug!(%s, "OutputFormat::from_str: called");
        match s.to_lowercase().as_str() {
            "text" | "plain" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(format!("Unknown format: {}. Use: text, json, or yaml", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_command() {
        let cli = Cli::parse_from(["fb"]);
        assert!(cli.command.is_none());
        assert!(!cli.empty);
    }

    #[test]
    fn test_cli_parse_show_json() {
        let cli = Cli::parse_from(["fb", "show", "--format", "json"]);
        assert!(matches!(
            cli.command,
            Some(Command::Show {
                format: OutputFormat::Json
            })
        ));
    }

    #[test]
    fn test_cli_parse_config_defaults_to_yaml() {
        let cli = Cli::parse_from(["fb", "config"]);
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                format: OutputFormat::Yaml
            })
        ));
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from(["fb", "show", "--empty", "-c", "/path/to/config.yml", "-l", "debug"]);
        assert!(cli.empty);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("yml".parse::<OutputFormat>(), Ok(OutputFormat::Yaml));
        assert!("table".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_log_path_under_focusboard() {
        let path = get_log_path();
        assert!(path.ends_with("focusboard/logs/focusboard.log"));
    }
}
