//! Logging configuration
//!
//! The subscriber itself is installed by the binary; this is only the
//! serializable part that lives in the settings file.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

/// Logging section of the settings file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default level (`error`, `warn`, `info`, `debug`, `trace`, `off`).
    /// `RUST_LOG` takes precedence when set.
    pub level: String,
    /// Write to stderr
    pub console_output: bool,
    /// Also write to `log_dir/file_name`
    pub file_output: bool,
    pub log_dir: PathBuf,
    pub file_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console_output: true,
            file_output: false,
            log_dir: PathBuf::from("logs"),
            file_name: "firemix.log".to_string(),
        }
    }
}

impl LogConfig {
    /// Parse `level`, falling back to INFO if it is not a valid level
    pub fn parse_level(&self) -> LevelFilter {
        self.level.trim().parse().unwrap_or(LevelFilter::INFO)
    }

    pub fn current_log_path(&self) -> PathBuf {
        self.log_dir.join(&self.file_name)
    }

    /// Create the log directory if file output is on
    pub fn ensure_log_directory(&self) -> std::io::Result<()> {
        if self.file_output {
            std::fs::create_dir_all(&self.log_dir)?;
        }
        Ok(())
    }
}
