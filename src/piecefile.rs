//! Piece-addressed virtual files.
//!
//! A v1 torrent describes its file as a list of SHA-1 piece digests. If
//! every piece is stored as a raw content-addressed block, the digest is
//! enough to find it: the block's CID is the digest wrapped as a SHA-1
//! multihash under the `raw` codec. [`PieceFile`] uses that to expose the
//! whole file as one seekable stream, fetching pieces through a
//! [`Resolver`] only when a read reaches them.
//!
//! # Components
//!
//! - [`PieceFile`] - Byte-stream view over an `info` dictionary
//! - [`PieceFileReader`] - `Read + Seek` over a [`PieceFile`]
//! - [`DeferredBlockReader`] - Lazily resolved reader over one block
//! - [`PieceLayout`] - Piece boundary arithmetic
//! - [`Resolver`] - Block loading interface, with [`MemoryResolver`] and
//!   [`CachingResolver`]
//!
//! # Examples
//!
//! ```
//! use std::io::{Read, Seek, SeekFrom};
//! use std::sync::Arc;
//!
//! use bytes::Bytes;
//! use btfile::node::{Map, Node};
//! use btfile::piecefile::{MemoryResolver, PieceFile};
//! use tokio_util::sync::CancellationToken;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let content = b"hello, piece-addressed world".to_vec();
//! let store = Arc::new(MemoryResolver::new());
//!
//! let mut pieces = Vec::new();
//! for chunk in content.chunks(8) {
//!     let cid = store.insert(chunk.to_vec())?;
//!     pieces.extend_from_slice(cid.hash().digest());
//! }
//!
//! let mut info = Map::new();
//! info.insert("name", Node::string("hello.txt"))?;
//! info.insert("length", Node::Integer(content.len() as i64))?;
//! info.insert("piece length", Node::Integer(8))?;
//! info.insert("pieces", Node::String(Bytes::from(pieces)))?;
//!
//! let file = PieceFile::from_map(info, store, CancellationToken::new());
//! let mut reader = file.byte_stream();
//!
//! reader.seek(SeekFrom::Start(7))?;
//! let mut tail = String::new();
//! reader.read_to_string(&mut tail)?;
//! assert_eq!(tail, "piece-addressed world");
//! # Ok(())
//! # }
//! ```
//!
//! # Errors
//!
//! Problems with the piece metadata surface on the first read, not when the
//! file is constructed. Errors inside `Read`/`Seek` are [`std::io::Error`]s
//! wrapping a [`FileError`]; use [`FileError::from_io`] to get it back.

mod cache;
mod deferred;
mod error;
mod file;
mod layout;
mod resolver;

pub use cache::{CacheStats, CachingResolver};
pub use deferred::DeferredBlockReader;
pub use error::{FileError, ResolveError};
pub use file::{PieceFile, PieceFileReader};
pub use layout::{PieceLayout, PieceSpan};
pub use resolver::{Block, MemoryResolver, ReadSeek, Resolver};

use cid::multihash::Multihash;
use cid::Cid;

use crate::constants::{RAW_CODEC, SHA1_MULTIHASH_CODE};

/// Builds the CIDv1 of a raw block from its SHA-1 piece digest.
pub fn piece_cid(digest: &[u8]) -> Result<Cid, FileError> {
    let hash = Multihash::<64>::wrap(SHA1_MULTIHASH_CODE, digest)?;
    Ok(Cid::new_v1(RAW_CODEC, hash))
}
