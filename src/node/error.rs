use bytes::Bytes;
use thiserror::Error;

use super::kind::Kind;
use crate::error::ErrorClass;

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("wrong kind: {method} needs {expected}, node is {actual}")]
    WrongKind {
        method: &'static str,
        expected: Kind,
        actual: Kind,
    },

    #[error("duplicate map key: {}", String::from_utf8_lossy(.0))]
    DuplicateKey(Bytes),

    #[error("missing map key: {0}")]
    MissingKey(String),

    #[error("list index {index} out of range (length {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

impl NodeError {
    pub fn class(&self) -> ErrorClass {
        match self {
            NodeError::WrongKind { .. } => ErrorClass::Access,
            NodeError::DuplicateKey(_)
            | NodeError::MissingKey(_)
            | NodeError::IndexOutOfRange { .. } => ErrorClass::Schema,
        }
    }
}
