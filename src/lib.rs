//! btfile - Piece-addressed torrent files
//!
//! This library decodes BitTorrent metainfo into a kinded node tree and
//! exposes a single-file torrent's content as a seekable byte stream whose
//! pieces are fetched lazily, by content address, from a block store.
//!
//! # Modules
//!
//! - [`node`] - Kinded tree model (maps, lists, strings, integers, bytes, links)
//! - [`bencode`] - BEP-3 Bencode decoding into nodes and canonical encoding
//! - [`metainfo`] - BEP-3 Torrent metainfo and info hash
//! - [`piecefile`] - Piece-addressed virtual files and block resolvers
//! - [`error`] - Error classification shared by every module

pub mod bencode;
pub mod constants;
pub mod error;
pub mod metainfo;
pub mod node;
pub mod piecefile;

pub use bencode::{decode, encode, BencodeError};
pub use error::ErrorClass;
pub use metainfo::{InfoHash, Metainfo, MetainfoError};
pub use node::{Kind, Map, Node, NodeError};
pub use piecefile::{
    piece_cid, Block, CachingResolver, DeferredBlockReader, FileError, MemoryResolver, PieceFile,
    PieceFileReader, ResolveError, Resolver,
};
