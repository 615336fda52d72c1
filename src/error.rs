use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a sprite file could not be turned into a `Sprite`.
#[derive(Debug, Error)]
pub enum SpriteError {
    #[error("failed to read sprite {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("sprite {path} has no size header")]
    MissingHeader { path: PathBuf },
    #[error("sprite {path} has a malformed size header {header:?} (expected WIDTHxHEIGHT)")]
    BadHeader { path: PathBuf, header: String },
    #[error("sprite {path} has no glyph rows")]
    EmptyArt { path: PathBuf },
}

/// Failures that end the terminal front-end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}
