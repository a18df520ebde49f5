//! focusboard configuration types and loading

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::board::Timing;
use crate::domain::{Status, Task, TaskId};
use crate::store::TaskStore;

/// Main focusboard configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level", skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,

    /// Transition and refresh timing
    pub timing: TimingConfig,

    /// Initial board contents
    pub board: BoardConfig,

    /// Notification delivery
    pub notify: NotifyConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .focusboard.yml
        let local_config = PathBuf::from(".focusboard.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/focusboard/focusboard.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("focusboard").join("focusboard.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read only the log level, before logging is set up
    ///
    /// Any failure here is silent; the full load reports it later.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        Self::load(config_path).ok().and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Transition and refresh timing, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Delay before the focus overlay counts as open
    #[serde(rename = "entrance-delay-ms")]
    pub entrance_delay_ms: u64,

    /// Focus overlay exit transition
    #[serde(rename = "exit-delay-ms")]
    pub exit_delay_ms: u64,

    /// Transition between a focused task and the next one
    #[serde(rename = "next-delay-ms")]
    pub next_delay_ms: u64,

    /// Completion animation on a card
    #[serde(rename = "completion-animation-ms")]
    pub completion_animation_ms: u64,

    /// Terminal event poll / redraw interval
    #[serde(rename = "tick-rate-ms")]
    pub tick_rate_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            entrance_delay_ms: 50,
            exit_delay_ms: 500,
            next_delay_ms: 400,
            completion_animation_ms: 600,
            tick_rate_ms: 33,
        }
    }
}

impl TimingConfig {
    /// Transition durations for the board
    pub fn timing(&self) -> Timing {
        Timing {
            entrance: Duration::from_millis(self.entrance_delay_ms),
            exit: Duration::from_millis(self.exit_delay_ms),
            next: Duration::from_millis(self.next_delay_ms),
            completion_animation: Duration::from_millis(self.completion_animation_ms),
        }
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

/// A task placed on the board at startup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedTask {
    pub text: String,
    #[serde(default)]
    pub status: Status,
}

impl SeedTask {
    fn new(text: &str, status: Status) -> Self {
        Self {
            text: text.to_string(),
            status,
        }
    }
}

/// Initial board contents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Populate an empty board with the seed tasks
    pub seed: bool,

    /// Tasks to start with, numbered from 1 in this order
    #[serde(rename = "seed-tasks")]
    pub seed_tasks: Vec<SeedTask>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            seed: true,
            seed_tasks: vec![
                SeedTask::new("Design wacky UI", Status::Done),
                SeedTask::new("Implement drag n drop", Status::InProgress),
                SeedTask::new("Add ADHD mode", Status::Todo),
                SeedTask::new("Find 90s sounds", Status::Todo),
            ],
        }
    }
}

impl BoardConfig {
    /// Build the starting task store
    ///
    /// Seed tasks with blank text are skipped; ids stay sequential.
    pub fn initial_store(&self) -> TaskStore {
        if !self.seed {
            return TaskStore::new();
        }
        let tasks = self
            .seed_tasks
            .iter()
            .filter(|s| !s.text.trim().is_empty())
            .enumerate()
            .map(|(i, s)| Task::new(TaskId(i as u64 + 1), s.text.trim(), s.status));
        TaskStore::with_tasks(tasks)
    }
}

/// Notification delivery
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotifyConfig {
    /// Ring the terminal bell on completion and denial
    pub bell: bool,

    /// How long a notification stays in the status line
    #[serde(rename = "toast-ms")]
    pub toast_ms: u64,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            bell: false,
            toast_ms: 1500,
        }
    }
}

impl NotifyConfig {
    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.log_level, None);
        assert_eq!(config.timing.exit_delay_ms, 500);
        assert!(config.board.seed);
        assert_eq!(config.board.seed_tasks.len(), 4);
        assert!(!config.notify.bell);
    }

    #[test]
    fn test_timing_conversion() {
        let timing = TimingConfig::default().timing();
        assert_eq!(timing, Timing::default());
    }

    #[test]
    fn test_default_seed_store() {
        let store = BoardConfig::default().initial_store();

        assert_eq!(store.len(), 4);
        assert_eq!(store.next_id(), TaskId(5));
        assert_eq!(store.find_task(TaskId(1)).unwrap().status, Status::Done);
        assert_eq!(store.find_task(TaskId(2)).unwrap().status, Status::InProgress);
        assert_eq!(store.find_task(TaskId(4)).unwrap().text, "Find 90s sounds");
    }

    #[test]
    fn test_seed_disabled_gives_empty_store() {
        let config = BoardConfig {
            seed: false,
            ..Default::default()
        };
        assert!(config.initial_store().is_empty());
    }

    #[test]
    fn test_deserialize_config() {
        let yaml = r#"
log-level: debug

timing:
  entrance-delay-ms: 10
  exit-delay-ms: 200
  next-delay-ms: 150
  completion-animation-ms: 300
  tick-rate-ms: 16

board:
  seed: true
  seed-tasks:
    - text: Write release notes
    - text: Ship it
      status: in-progress

notify:
  bell: true
  toast-ms: 800
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.timing.exit_delay_ms, 200);
        assert_eq!(config.timing.tick_rate(), Duration::from_millis(16));
        assert_eq!(config.board.seed_tasks[0].status, Status::Todo);
        assert_eq!(config.board.seed_tasks[1].status, Status::InProgress);
        assert!(config.notify.bell);
        assert_eq!(config.notify.toast_duration(), Duration::from_millis(800));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let yaml = r#"
timing:
  exit-delay-ms: 250
"#;

        let config: Config = serde_yaml::from_str(yaml).unwrap();

        // Specified value
        assert_eq!(config.timing.exit_delay_ms, 250);

        // Defaults for unspecified
        assert_eq!(config.timing.entrance_delay_ms, 50);
        assert_eq!(config.board.seed_tasks.len(), 4);
        assert_eq!(config.notify.toast_ms, 1500);
    }

    #[test]
    fn test_load_from_explicit_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "board:\n  seed: false").unwrap();

        let config = Config::load(Some(&file.path().to_path_buf())).unwrap();
        assert!(!config.board.seed);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let path = PathBuf::from("/nonexistent/focusboard.yml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_blank_seed_tasks_are_skipped() {
        let config = BoardConfig {
            seed: true,
            seed_tasks: vec![SeedTask::new("  ", Status::Todo), SeedTask::new("real", Status::Done)],
        };
        let store = config.initial_store();
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_task(TaskId(1)).unwrap().text, "real");
    }
}
