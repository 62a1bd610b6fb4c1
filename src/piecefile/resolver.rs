use std::fmt;
use std::io::{Cursor, Read, Seek};
use std::sync::Arc;

use bytes::Bytes;
use cid::Cid;
use dashmap::DashMap;
use sha1::{Digest, Sha1};
use tokio_util::sync::CancellationToken;

use super::error::{FileError, ResolveError};
use super::piece_cid;
use crate::constants::RAW_CODEC;
use crate::node::{Kind, Node};

/// A seekable byte stream.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// What a resolver hands back for a content identifier.
pub enum Block {
    /// An eagerly materialized node.
    Node(Node),
    /// A node that only exposes its content as a stream.
    Stream(Box<dyn ReadSeek + Send>),
}

impl Block {
    /// Returns the block content as a seekable stream.
    ///
    /// Only `Bytes` nodes and streams carry that capability. Any other node
    /// is handed back as its kind.
    pub fn into_byte_stream(self) -> Result<Box<dyn ReadSeek + Send>, Kind> {
        match self {
            Block::Node(Node::Bytes(data)) => Ok(Box::new(Cursor::new(data))),
            Block::Node(other) => Err(other.kind()),
            Block::Stream(stream) => Ok(stream),
        }
    }
}

impl fmt::Debug for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Block::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Loads content-addressed blocks.
///
/// Implementations may block on disk or network I/O. They should watch `cx`
/// and give up with [`ResolveError::Cancelled`] once it is cancelled. Any
/// timeout policy belongs here too.
pub trait Resolver: Send + Sync {
    /// Loads the block `cid`. `hint` is the kind the caller expects.
    fn load(&self, cx: &CancellationToken, cid: &Cid, hint: Kind) -> Result<Block, ResolveError>;
}

impl<R: Resolver + ?Sized> Resolver for Arc<R> {
    fn load(&self, cx: &CancellationToken, cid: &Cid, hint: Kind) -> Result<Block, ResolveError> {
        (**self).load(cx, cid, hint)
    }
}

/// In-memory store of raw blocks addressed by their SHA-1 CID.
#[derive(Debug, Default)]
pub struct MemoryResolver {
    blocks: DashMap<Cid, Bytes>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` and returns the CID a torrent piece digest would map to.
    pub fn insert(&self, data: impl Into<Bytes>) -> Result<Cid, FileError> {
        let data = data.into();
        let digest: [u8; 20] = Sha1::digest(&data).into();
        let cid = piece_cid(&digest)?;
        self.blocks.insert(cid, data);
        Ok(cid)
    }

    /// Stores `data` under `cid` without checking that they match.
    pub fn insert_unchecked(&self, cid: Cid, data: impl Into<Bytes>) {
        self.blocks.insert(cid, data.into());
    }

    pub fn remove(&self, cid: &Cid) -> Option<Bytes> {
        self.blocks.remove(cid).map(|(_, data)| data)
    }

    pub fn contains(&self, cid: &Cid) -> bool {
        self.blocks.contains_key(cid)
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}

impl Resolver for MemoryResolver {
    fn load(&self, cx: &CancellationToken, cid: &Cid, _hint: Kind) -> Result<Block, ResolveError> {
        if cx.is_cancelled() {
            return Err(ResolveError::Cancelled);
        }
        if cid.codec() != RAW_CODEC {
            return Err(ResolveError::UnsupportedCodec {
                cid: *cid,
                codec: cid.codec(),
            });
        }
        let data = self
            .blocks
            .get(cid)
            .map(|entry| entry.value().clone())
            .ok_or(ResolveError::NotFound(*cid))?;
        Ok(Block::Node(Node::Bytes(data)))
    }
}
