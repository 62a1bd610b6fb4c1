use thiserror::Error;

use crate::bencode::BencodeError;
use crate::error::ErrorClass;
use crate::node::NodeError;

/// Errors that can occur when parsing torrent files.
#[derive(Debug, Error)]
pub enum MetainfoError {
    /// The torrent file contains invalid bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] BencodeError),

    /// A node accessor failed.
    #[error("node error: {0}")]
    Node(#[from] NodeError),

    /// A required field is missing from the torrent file.
    #[error("missing field: {0}")]
    MissingField(&'static str),

    /// A field has an invalid value or kind.
    #[error("invalid field: {0}")]
    InvalidField(&'static str),

    /// The info hash has an invalid length (must be 20 bytes).
    #[error("invalid info hash length")]
    InvalidInfoHashLength,

    /// The info hash is not valid hex.
    #[error("invalid info hash hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// Multi-file torrents cannot be viewed as one piece-addressed file.
    #[error("multi-file torrents are not supported")]
    MultiFile,

    /// An I/O error occurred while reading the torrent file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MetainfoError {
    pub fn class(&self) -> ErrorClass {
        match self {
            MetainfoError::Bencode(e) => e.class(),
            MetainfoError::Node(e) => e.class(),
            MetainfoError::Io(_) => ErrorClass::Format,
            MetainfoError::InvalidInfoHashLength | MetainfoError::InvalidHex(_) => {
                ErrorClass::Format
            }
            MetainfoError::MissingField(_)
            | MetainfoError::InvalidField(_)
            | MetainfoError::MultiFile => ErrorClass::Schema,
        }
    }
}
