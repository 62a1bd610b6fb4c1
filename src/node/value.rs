use bytes::Bytes;
use cid::Cid;

use super::error::NodeError;
use super::kind::Kind;
use super::map::Map;

/// A node in a kinded tree.
///
/// # Examples
///
/// ```
/// use btfile::node::{Kind, Node};
///
/// let int: Node = 42i64.into();
/// let string: Node = "hello".into();
///
/// assert_eq!(int.kind(), Kind::Integer);
/// assert_eq!(int.as_integer().unwrap(), 42);
/// assert_eq!(string.as_str().unwrap(), Some("hello"));
/// assert!(string.as_integer().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// String-keyed map with unique keys.
    Map(Map),
    /// Ordered list of nodes.
    List(Vec<Node>),
    /// Byte string behind a string-shaped accessor (may or may not be UTF-8).
    String(Bytes),
    /// Signed 64-bit integer.
    Integer(i64),
    /// Raw binary content.
    Bytes(Bytes),
    /// Link to a content-addressed block.
    Link(Cid),
}

impl Node {
    /// Creates a string node from UTF-8 text.
    pub fn string(s: &str) -> Self {
        Node::String(Bytes::copy_from_slice(s.as_bytes()))
    }

    pub fn kind(&self) -> Kind {
        match self {
            Node::Map(_) => Kind::Map,
            Node::List(_) => Kind::List,
            Node::String(_) => Kind::String,
            Node::Integer(_) => Kind::Integer,
            Node::Bytes(_) => Kind::Bytes,
            Node::Link(_) => Kind::Link,
        }
    }

    fn wrong_kind(&self, method: &'static str, expected: Kind) -> NodeError {
        NodeError::WrongKind {
            method,
            expected,
            actual: self.kind(),
        }
    }

    pub fn as_map(&self) -> Result<&Map, NodeError> {
        match self {
            Node::Map(m) => Ok(m),
            _ => Err(self.wrong_kind("as_map", Kind::Map)),
        }
    }

    /// Consumes the node and returns the map without cloning it.
    pub fn into_map(self) -> Result<Map, NodeError> {
        match self {
            Node::Map(m) => Ok(m),
            other => Err(other.wrong_kind("into_map", Kind::Map)),
        }
    }

    pub fn as_list(&self) -> Result<&[Node], NodeError> {
        match self {
            Node::List(l) => Ok(l),
            _ => Err(self.wrong_kind("as_list", Kind::List)),
        }
    }

    pub fn as_integer(&self) -> Result<i64, NodeError> {
        match self {
            Node::Integer(i) => Ok(*i),
            _ => Err(self.wrong_kind("as_integer", Kind::Integer)),
        }
    }

    /// Returns the raw content of a string node.
    pub fn as_string(&self) -> Result<&Bytes, NodeError> {
        match self {
            Node::String(s) => Ok(s),
            _ => Err(self.wrong_kind("as_string", Kind::String)),
        }
    }

    /// Returns a string node as text.
    ///
    /// Fails with `WrongKind` for non-string nodes. Content that is not valid
    /// UTF-8 yields `None`.
    pub fn as_str(&self) -> Result<Option<&str>, NodeError> {
        self.as_string().map(|s| std::str::from_utf8(s).ok())
    }

    /// Returns the content of a bytes node or a string node.
    ///
    /// Bencode has a single byte-string type, so binary fields such as piece
    /// digests decode as strings. Both kinds are accepted here.
    pub fn as_bytes(&self) -> Result<&Bytes, NodeError> {
        match self {
            Node::Bytes(b) | Node::String(b) => Ok(b),
            _ => Err(self.wrong_kind("as_bytes", Kind::Bytes)),
        }
    }

    pub fn as_link(&self) -> Result<&Cid, NodeError> {
        match self {
            Node::Link(c) => Ok(c),
            _ => Err(self.wrong_kind("as_link", Kind::Link)),
        }
    }

    /// Looks up a key in a map node.
    pub fn lookup(&self, key: &str) -> Result<&Node, NodeError> {
        match self {
            Node::Map(m) => m.lookup(key),
            _ => Err(self.wrong_kind("lookup", Kind::Map)),
        }
    }

    /// Looks up a position in a list node.
    pub fn lookup_index(&self, index: usize) -> Result<&Node, NodeError> {
        let list = match self {
            Node::List(l) => l,
            _ => return Err(self.wrong_kind("lookup_index", Kind::List)),
        };
        list.get(index).ok_or(NodeError::IndexOutOfRange {
            index,
            len: list.len(),
        })
    }

    /// Number of entries in a map or list, `None` for scalar kinds.
    pub fn len(&self) -> Option<usize> {
        match self {
            Node::Map(m) => Some(m.len()),
            Node::List(l) => Some(l.len()),
            _ => None,
        }
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Node::Integer(i)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::string(s)
    }
}

impl From<Vec<Node>> for Node {
    fn from(l: Vec<Node>) -> Self {
        Node::List(l)
    }
}

impl From<Map> for Node {
    fn from(m: Map) -> Self {
        Node::Map(m)
    }
}

impl From<Cid> for Node {
    fn from(c: Cid) -> Self {
        Node::Link(c)
    }
}
