//! Bencode encoding and decoding ([BEP-3]) over [`Node`](crate::node::Node) trees.
//!
//! Bencode is the serialization format of `.torrent` files. The info hash of
//! a torrent is the SHA-1 of its bencoded `info` dictionary, so encoding must
//! be canonical for a decoded tree to hash back to the published value.
//!
//! # Data Types
//!
//! | Type | Format | Example | Node |
//! |------|--------|---------|------|
//! | Integer | `i<number>e` | `i42e` → 42 | `Integer` |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" | `String` (`Bytes` also encodes) |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] | `List` |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} | `Map` |
//!
//! Links have no bencode form.
//!
//! # Examples
//!
//! ```
//! use btfile::bencode::{decode, encode};
//!
//! // Non-canonical key order in, canonical order out.
//! let node = decode(b"d4:spami1e3:cowi2ee").unwrap();
//! assert_eq!(encode(&node).unwrap(), b"d3:cowi2e4:spami1ee");
//! ```
//!
//! # Error Handling
//!
//! Grammar violations are format errors:
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended unexpectedly
//! - [`BencodeError::InvalidInteger`] - Malformed integer (non-digits, leading zeros)
//! - [`BencodeError::InvalidStringLength`] - Malformed length prefix
//! - [`BencodeError::UnexpectedChar`] - Unexpected character in input
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded (max 64 levels)
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! Structural violations are schema errors:
//!
//! - [`BencodeError::NonStringKey`] - Dictionary key that is not a byte string
//! - [`BencodeError::DuplicateKey`] - Repeated dictionary key
//! - [`BencodeError::UnsupportedKind`] - Encoding a link
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;

pub use decode::{decode, decode_from};
pub use encode::{encode, encode_to};
pub use error::BencodeError;

#[cfg(test)]
mod tests;
