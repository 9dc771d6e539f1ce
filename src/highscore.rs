use std::path::{Path, PathBuf};
use thiserror::Error;

/// Loads & saves the high score as a single integer in a file
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct HighScoreStore {
    path: PathBuf,
}

impl HighScoreStore {
    pub(crate) fn new(path: PathBuf) -> HighScoreStore {
        HighScoreStore { path }
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    /// Read the high score from disk.  If the file cannot be read or parsed,
    /// a warning is logged and zero is returned.
    pub(crate) fn load(&self) -> u32 {
        match self.try_load() {
            Ok(score) => score,
            Err(e) => {
                log::warn!("{:#}; starting from a high score of 0", anyhow::Error::new(e));
                0
            }
        }
    }

    /// Read the high score from disk.  A missing file is a high score of
    /// zero.
    pub(crate) fn try_load(&self) -> Result<u32, LoadError> {
        let src = match fs_err::read(&self.path) {
            Ok(src) => src,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::debug!("No high score file at {}", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(LoadError::read(e)),
        };
        serde_json::from_slice(&src).map_err(LoadError::deserialize)
    }

    /// Write `score` to disk, replacing any previously-saved value
    pub(crate) fn save(&self, score: u32) -> Result<(), SaveError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(SaveError::mkdir)?;
        }
        let mut src = serde_json::to_string(&score).map_err(SaveError::serialize)?;
        src.push('\n');
        fs_err::write(&self.path, &src).map_err(SaveError::write)?;
        log::info!("Saved high score {score} to {}", self.path.display());
        Ok(())
    }
}

#[derive(Debug, Error)]
#[error("Failed to save high score to disk")]
pub(crate) struct SaveError(#[source] SaveErrorSource);

impl SaveError {
    fn mkdir(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Mkdir(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        SaveError(SaveErrorSource::Serialize(e))
    }

    fn write(e: std::io::Error) -> Self {
        SaveError(SaveErrorSource::Write(e))
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to create parent directories")]
    Mkdir(#[source] std::io::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write high score file")]
    Write(#[source] std::io::Error),
}

#[derive(Debug, Error)]
#[error("Failed to read high score from disk")]
pub(crate) struct LoadError(#[source] LoadErrorSource);

impl LoadError {
    fn read(e: std::io::Error) -> Self {
        LoadError(LoadErrorSource::Read(e))
    }

    fn deserialize(e: serde_json::Error) -> Self {
        LoadError(LoadErrorSource::Deserialize(e))
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read high score file")]
    Read(#[source] std::io::Error),
    #[error("failed to deserialize high score")]
    Deserialize(#[source] serde_json::Error),
}
