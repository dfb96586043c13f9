//! Timestamped file logger for the visualizer. Each component opens its own
//! log file (`<name>.log`) inside a shared directory; messages are appended
//! with a UTC timestamp and mirrored to the console with a per-level color.

use std::fmt::{self, Display};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }

    fn ansi(self) -> &'static str {
        match self {
            Level::Info => "\x1b[36m",
            Level::Warn => "\x1b[93m",
            Level::Error => "\x1b[91m",
        }
    }
}

/// Appends log lines to a component-specific file.
#[derive(Debug, Clone)]
pub struct Logger {
    log_file: PathBuf,
}

impl Logger {
    /// Creates the log directory if needed and truncates `<name>.log`
    /// inside it, so every run starts with a fresh file.
    pub fn new(log_dir: &Path, name: &str) -> Result<Self, LoggerError> {
        std::fs::create_dir_all(log_dir)?;
        let log_file = log_dir.join(format!("{}.log", name));

        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&log_file)?;

        Ok(Logger { log_file })
    }

    fn log(&self, level: Level, message: &str) -> Result<(), LoggerError> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S");
        let line = format!("[{}] [{}]: {}\n", level.tag(), timestamp, message);

        eprint!("{}{}\x1b[0m", level.ansi(), line);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }

    pub fn info(&self, message: &str) -> Result<(), LoggerError> {
        self.log(Level::Info, message)
    }

    pub fn warn(&self, message: &str) -> Result<(), LoggerError> {
        self.log(Level::Warn, message)
    }

    pub fn error(&self, message: &str) -> Result<(), LoggerError> {
        self.log(Level::Error, message)
    }
}

#[derive(Debug)]
pub enum LoggerError {
    Io(std::io::Error),
}

impl Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::Io(e) => write!(f, "[Io]: {}", e),
        }
    }
}

impl std::error::Error for LoggerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoggerError::Io(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for LoggerError {
    fn from(err: std::io::Error) -> Self {
        LoggerError::Io(err)
    }
}
