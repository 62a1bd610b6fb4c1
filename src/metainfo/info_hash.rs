use super::error::MetainfoError;
use crate::bencode::encode;
use crate::node::Node;
use sha1::{Digest, Sha1};
use std::fmt;

/// The v1 info hash: SHA-1 of the canonically bencoded `info` dictionary.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct InfoHash([u8; 20]);

impl InfoHash {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, MetainfoError> {
        let arr: [u8; 20] = bytes
            .try_into()
            .map_err(|_| MetainfoError::InvalidInfoHashLength)?;
        Ok(InfoHash(arr))
    }

    pub fn from_hex(s: &str) -> Result<Self, MetainfoError> {
        Self::from_bytes(&hex::decode(s)?)
    }

    /// Hashes an `info` node. Key order in the node does not matter.
    pub fn from_info(info: &Node) -> Result<Self, MetainfoError> {
        let encoded = encode(info)?;
        Ok(InfoHash(Sha1::digest(&encoded).into()))
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
