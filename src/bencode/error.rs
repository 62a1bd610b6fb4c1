use bytes::Bytes;
use thiserror::Error;

use crate::error::ErrorClass;
use crate::node::{Kind, NodeError};

#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    #[error("invalid string length")]
    InvalidStringLength,

    #[error("unexpected character: {0}")]
    UnexpectedChar(char),

    #[error("trailing data after value")]
    TrailingData,

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("dictionary key is not a byte string")]
    NonStringKey,

    #[error("duplicate dictionary key: {}", String::from_utf8_lossy(.0))]
    DuplicateKey(Bytes),

    #[error("{0} nodes cannot be bencoded")]
    UnsupportedKind(Kind),

    #[error("node error: {0}")]
    Node(#[from] NodeError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl BencodeError {
    pub fn class(&self) -> ErrorClass {
        match self {
            BencodeError::UnexpectedEof
            | BencodeError::InvalidInteger(_)
            | BencodeError::InvalidStringLength
            | BencodeError::UnexpectedChar(_)
            | BencodeError::TrailingData
            | BencodeError::NestingTooDeep
            | BencodeError::Io(_) => ErrorClass::Format,
            BencodeError::NonStringKey
            | BencodeError::DuplicateKey(_)
            | BencodeError::UnsupportedKind(_) => ErrorClass::Schema,
            BencodeError::Node(e) => e.class(),
        }
    }
}
