use std::io;

use cid::Cid;
use thiserror::Error;

use crate::error::ErrorClass;
use crate::node::{Kind, NodeError};

/// Errors raised by a resolver while loading a block.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("block not found: {0}")]
    NotFound(Cid),

    #[error("unsupported codec {codec:#x} for block {cid}")]
    UnsupportedCodec { cid: Cid, codec: u64 },

    #[error("resolution cancelled")]
    Cancelled,

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("resolver backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl ResolveError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ResolveError::Cancelled => ErrorClass::Cancellation,
            _ => ErrorClass::Resolution,
        }
    }
}

/// Errors raised while reading a piece-addressed file.
///
/// Inside [`Read`](std::io::Read) and [`Seek`](std::io::Seek) these travel
/// as [`io::Error`]; [`FileError::from_io`] recovers them.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("node error: {0}")]
    Node(#[from] NodeError),

    #[error("pieces length {0} is not a multiple of 20")]
    MalformedPieces(usize),

    #[error("invalid piece length: {0}")]
    InvalidPieceLength(i64),

    #[error("invalid file length: {0}")]
    InvalidLength(i64),

    /// The digest count does not match the file length, so the last piece
    /// would be empty or longer than `piece length`.
    #[error("pieces holds {pieces} digests but the file needs {expected}")]
    PieceCountMismatch { pieces: usize, expected: u64 },

    #[error("no pieces cover offset {offset} of a {length} byte file")]
    NoPiecesSelected { offset: u64, length: u64 },

    #[error("piece {index} ended {missing} bytes short")]
    ShortPiece { index: usize, missing: u64 },

    #[error("seek to a negative or overflowing position")]
    InvalidSeek,

    #[error("failed to resolve block {cid}: {source}")]
    Resolution { cid: Cid, source: ResolveError },

    #[error("block {cid} resolved to a {kind} node, not a byte stream")]
    NotByteStream { cid: Cid, kind: Kind },

    #[error("block {0} already failed to resolve")]
    ResolutionPoisoned(Cid),

    #[error("cancelled while resolving block {0}")]
    Cancelled(Cid),

    #[error("multihash error: {0}")]
    Multihash(#[from] cid::multihash::Error),
}

impl FileError {
    pub fn class(&self) -> ErrorClass {
        match self {
            FileError::Node(e) => e.class(),
            FileError::MalformedPieces(_)
            | FileError::InvalidPieceLength(_)
            | FileError::InvalidLength(_)
            | FileError::PieceCountMismatch { .. }
            | FileError::NoPiecesSelected { .. }
            | FileError::ShortPiece { .. }
            | FileError::InvalidSeek => ErrorClass::Range,
            FileError::Resolution { source, .. } => source.class(),
            FileError::NotByteStream { .. } | FileError::ResolutionPoisoned(_) => {
                ErrorClass::Resolution
            }
            FileError::Cancelled(_) => ErrorClass::Cancellation,
            FileError::Multihash(_) => ErrorClass::Schema,
        }
    }

    pub fn into_io(self) -> io::Error {
        match self {
            FileError::InvalidSeek => io::Error::new(io::ErrorKind::InvalidInput, self),
            other => io::Error::other(other),
        }
    }

    /// Returns the `FileError` carried by an I/O error, if there is one.
    pub fn from_io(err: &io::Error) -> Option<&FileError> {
        err.get_ref()?.downcast_ref::<FileError>()
    }
}
