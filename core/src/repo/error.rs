use std::path::PathBuf;

use thiserror::Error;

use crate::object::{DecodeError, Id};
use crate::zlib::DecompressError;

/// Describes the potential error conditions that might arise from `Repo` operations.
#[derive(Debug, Error)]
pub enum Error {
    /// No object is stored under this ID.
    #[error("object {0} not found")]
    NotFound(Id),

    /// The stored bytes are not a valid compressed stream.
    #[error("object {id} is corrupt: {source}")]
    CorruptData {
        id: Id,
        #[source]
        source: DecompressError,
    },

    /// An object already stored under this ID has different content.
    #[error("object {0} already exists with different content")]
    Collision(Id),

    /// The stored bytes decompressed but are not a valid object.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("work dir doesn't exist: {}", .0.display())]
    WorkDirDoesntExist(PathBuf),

    #[error("git dir doesn't exist: {}", .0.display())]
    GitDirDoesntExist(PathBuf),

    #[error("git dir already exists: {}", .0.display())]
    GitDirShouldntExist(PathBuf),

    /// A file name can't be stored in a tree entry.
    #[error("path name is not valid UTF-8: {}", .0.display())]
    InvalidPathName(PathBuf),

    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// A specialized `Result` type for `Repo` operations.
pub type Result<T> = std::result::Result<T, Error>;
