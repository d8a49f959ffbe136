use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// A required sprite file is absent.  Fatal at startup.
    #[error("{name} not found! (looked in {path})")]
    MissingAsset { name: String, path: PathBuf },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
