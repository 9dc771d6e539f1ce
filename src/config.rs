use crate::consts;
use log::LevelFilter;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Settings about data files
    #[serde(default)]
    pub(crate) files: FileConfig,

    /// Settings about the log
    #[serde(default)]
    pub(crate) logging: LogConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Load the configuration file at `path`, allowing it to be missing.  If
    /// `path` is an error, the default configuration is used instead, and the
    /// error is returned alongside it so that it can be reported once logging
    /// is set up.
    pub(crate) fn load_or_default(
        path: Result<PathBuf, ConfigError>,
    ) -> Result<(Config, Option<ConfigError>), ConfigError> {
        match path {
            Ok(path) => Ok((Config::load(&path, true)?, None)),
            Err(e) => Ok((Config::default(), Some(e))),
        }
    }

    /// Install the global logger as configured.  If no log file is set,
    /// nothing is installed and log messages are discarded.
    pub(crate) fn init_logging(&self) -> Result<(), ConfigError> {
        let Some(ref path) = self.files.log_file else {
            return Ok(());
        };
        let file = fs_err::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(ConfigError::LogFile)?;
        env_logger::Builder::new()
            .filter_level(self.logging.level)
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init()?;
        Ok(())
    }
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct FileConfig {
    /// Path at which the high score is stored
    pub(crate) high_score_file: PathBuf,

    /// Path to append log messages to
    pub(crate) log_file: Option<PathBuf>,
}

impl Default for FileConfig {
    fn default() -> FileConfig {
        FileConfig {
            high_score_file: PathBuf::from(consts::HIGH_SCORE_FILE),
            log_file: None,
        }
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default)]
pub(crate) struct LogConfig {
    /// Most verbose level of messages to write
    pub(crate) level: LevelFilter,
}

impl Default for LogConfig {
    fn default() -> LogConfig {
        LogConfig {
            level: LevelFilter::Info,
        }
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[source] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("failed to open log file")]
    LogFile(#[source] std::io::Error),
    #[error("failed to install logger")]
    Logger(#[from] log::SetLoggerError),
}
