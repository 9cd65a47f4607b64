//! Command-line configuration and log file setup.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use thiserror::Error;
use tracing::Level;

use crate::infra::rpc::BackendCommand;

/// Directory under the user's home holding explorer state.
pub const APP_DIR: &str = ".qpm-explorer";
/// Default log file name inside [`APP_DIR`].
pub const LOG_FILE: &str = "explorer.log";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Terminal file browser driven by an external backend process.
#[derive(Debug, Parser)]
#[command(name = "qpm-explorer", version, about)]
pub struct Cli {
    /// Backend program speaking newline-delimited JSON-RPC on stdio.
    #[arg(long, env = "QPM_EXPLORER_BACKEND", value_name = "PROGRAM")]
    pub backend: PathBuf,
    /// Argument passed to the backend program; repeat for more.
    #[arg(long = "backend-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub backend_args: Vec<String>,
    /// Log file path [default: ~/.qpm-explorer/explorer.log].
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    #[arg(long, value_name = "LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
    /// Seconds to wait for each backend response.
    #[arg(long, value_name = "SECONDS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    pub request_timeout_secs: u64,
}

/// Errors raised while resolving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine the home directory; pass --log-file explicitly")]
    HomeDirUnavailable,
    #[error("--request-timeout-secs must be greater than zero")]
    ZeroTimeout,
    #[error("failed to open log file `{path}`: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Fully resolved settings used by the binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExplorerConfig {
    pub backend: BackendCommand,
    pub log_file: PathBuf,
    pub log_level: Level,
    pub request_timeout: Duration,
}

impl Cli {
    /// Resolves defaults that depend on the environment.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the timeout is zero or no log file path
    /// can be derived.
    pub fn resolve(self) -> Result<ExplorerConfig, ConfigError> {
        self.resolve_with_home(dirs::home_dir())
    }

    fn resolve_with_home(self, home: Option<PathBuf>) -> Result<ExplorerConfig, ConfigError> {
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        let log_file = match self.log_file {
            Some(log_file) => log_file,
            None => home
                .ok_or(ConfigError::HomeDirUnavailable)?
                .join(APP_DIR)
                .join(LOG_FILE),
        };

        Ok(ExplorerConfig {
            backend: BackendCommand {
                program: self.backend,
                args: self.backend_args,
            },
            log_file,
            log_level: self.log_level,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
        })
    }
}

/// Opens `path` for appending, creating missing parent directories.
///
/// # Errors
/// Returns [`ConfigError::LogFile`] when the directory or file cannot be
/// created.
pub fn open_log_file(path: &Path) -> Result<File, ConfigError> {
    let log_file_error = |source| ConfigError::LogFile {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(log_file_error)?;
    }

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(log_file_error)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).expect("failed to parse arguments")
    }

    #[test]
    fn test_parse_applies_defaults() {
        // Arrange
        let args = ["qpm-explorer", "--backend", "/usr/bin/qpm-backend"];

        // Act
        let cli = parse(&args);

        // Assert
        assert_eq!(cli.backend, PathBuf::from("/usr/bin/qpm-backend"));
        assert!(cli.backend_args.is_empty());
        assert_eq!(cli.log_file, None);
        assert_eq!(cli.log_level, Level::INFO);
        assert_eq!(cli.request_timeout_secs, DEFAULT_REQUEST_TIMEOUT_SECS);
    }

    #[test]
    fn test_parse_collects_repeated_backend_args() {
        // Arrange
        let args = [
            "qpm-explorer",
            "--backend",
            "node",
            "--backend-arg",
            "server.js",
            "--backend-arg",
            "--stdio",
            "--log-level",
            "debug",
        ];

        // Act
        let cli = parse(&args);

        // Assert
        assert_eq!(cli.backend_args, vec!["server.js", "--stdio"]);
        assert_eq!(cli.log_level, Level::DEBUG);
    }

    #[test]
    fn test_resolve_defaults_log_file_under_home() {
        // Arrange
        let home = tempfile::tempdir().expect("failed to create temp dir");
        let cli = parse(&["qpm-explorer", "--backend", "backend"]);

        // Act
        let config = cli
            .resolve_with_home(Some(home.path().to_path_buf()))
            .expect("failed to resolve config");

        // Assert
        assert_eq!(config.log_file, home.path().join(APP_DIR).join(LOG_FILE));
        assert_eq!(config.backend.program, PathBuf::from("backend"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_resolve_without_home_requires_explicit_log_file() {
        // Arrange
        let cli = parse(&["qpm-explorer", "--backend", "backend"]);

        // Act
        let result = cli.resolve_with_home(None);

        // Assert
        assert!(matches!(result, Err(ConfigError::HomeDirUnavailable)));
    }

    #[test]
    fn test_resolve_rejects_zero_timeout() {
        // Arrange
        let cli = parse(&[
            "qpm-explorer",
            "--backend",
            "backend",
            "--request-timeout-secs",
            "0",
        ]);

        // Act
        let result = cli.resolve_with_home(None);

        // Assert
        assert!(matches!(result, Err(ConfigError::ZeroTimeout)));
    }

    #[test]
    fn test_open_log_file_creates_parent_and_appends() {
        // Arrange
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("nested").join(LOG_FILE);
        fs::create_dir_all(path.parent().expect("log file has a parent"))
            .expect("failed to create directory");
        fs::write(&path, "first\n").expect("failed to seed log file");

        // Act
        let mut file = open_log_file(&path).expect("failed to open log file");
        file.write_all(b"second\n").expect("failed to write log line");

        // Assert
        let content = fs::read_to_string(&path).expect("failed to read log file");
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_creates_missing_directories() {
        // Arrange
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let path = dir.path().join("a").join("b").join(LOG_FILE);

        // Act
        let result = open_log_file(&path);

        // Assert
        assert!(result.is_ok());
        assert!(path.exists());
    }
}
