//! Torrent metainfo handling ([BEP-3]).
//!
//! A torrent file (`.torrent`) is a bencoded dictionary. Its `info`
//! dictionary names the content and lists one SHA-1 digest per piece; the
//! SHA-1 of the bencoded `info` dictionary is the torrent's info hash.
//!
//! [`Metainfo`] decodes a torrent into a [`Node`](crate::node::Node) tree,
//! recomputes the info hash from the canonical encoding and opens the
//! content as a [`PieceFile`](crate::piecefile::PieceFile).
//!
//! # Examples
//!
//! ```no_run
//! use std::io::Read;
//! use std::sync::Arc;
//!
//! use btfile::metainfo::Metainfo;
//! use btfile::piecefile::MemoryResolver;
//! use tokio_util::sync::CancellationToken;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let torrent = Metainfo::from_file("example.torrent")?;
//!
//! println!("Name: {}", torrent.name()?);
//! println!("Info hash: {}", torrent.info_hash());
//! println!("Size: {} bytes in {} pieces", torrent.length()?, torrent.piece_count()?);
//!
//! let blocks = Arc::new(MemoryResolver::new());
//! let file = torrent.file(blocks, CancellationToken::new())?;
//! let mut head = [0u8; 64];
//! file.byte_stream().read_exact(&mut head)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Torrent Structure
//!
//! - **info** - Core torrent metadata (hashed to create the info hash)
//!   - `name` - Suggested file name
//!   - `piece length` - Size of each piece in bytes
//!   - `pieces` - Concatenated SHA1 hashes of each piece
//!   - `length` - Total size
//! - **announce** - Primary tracker URL
//! - **announce-list** - Additional tracker tiers (BEP-12)
//! - **url-list** - Web seeds (BEP-19)
//! - **creation date** - Unix timestamp when created
//! - **comment** - Optional comment
//! - **created by** - Client that created the torrent
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod error;
mod info_hash;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use torrent::Metainfo;

#[cfg(test)]
mod tests;
