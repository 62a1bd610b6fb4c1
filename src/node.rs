//! Kinded tree data model.
//!
//! [`Node`] is a tagged union over the six kinds a decoded document can
//! hold: maps, lists, strings, integers, raw bytes and content links. Bencode
//! decodes into it and encodes out of it, and the torrent `info` dictionary
//! is read through its accessors.
//!
//! # Examples
//!
//! ```
//! use btfile::node::{Map, Node};
//!
//! let mut info = Map::with_capacity(2);
//! info.insert("name", Node::string("example.txt")).unwrap();
//! info.insert("length", Node::Integer(1024)).unwrap();
//!
//! // Duplicate keys are rejected, never overwritten.
//! assert!(info.insert("name", Node::string("other")).is_err());
//!
//! let node = Node::Map(info);
//! assert_eq!(node.lookup("length").unwrap().as_integer().unwrap(), 1024);
//! assert!(node.as_list().is_err());
//! ```

mod error;
mod kind;
mod map;
mod value;

pub use error::NodeError;
pub use kind::Kind;
pub use map::Map;
pub use value::Node;
