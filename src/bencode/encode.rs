use super::error::BencodeError;
use crate::node::{Kind, Node};
use std::io::Write;

/// Encodes a node tree to canonical bencode.
///
/// - Integers: `i<number>e`
/// - Strings and bytes: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Maps: `d<key><value>...e`, keys sorted by byte order whatever the
///   map's insertion order
///
/// # Errors
///
/// Returns [`BencodeError::UnsupportedKind`] if the tree contains a link.
///
/// # Examples
///
/// ```
/// use btfile::bencode::encode;
/// use btfile::node::{Map, Node};
///
/// let mut map = Map::new();
/// map.insert("b", Node::Integer(1)).unwrap();
/// map.insert("a", Node::Integer(2)).unwrap();
///
/// let encoded = encode(&Node::Map(map)).unwrap();
/// assert_eq!(encoded, b"d1:ai2e1:bi1ee");
/// ```
pub fn encode(node: &Node) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    encode_to(node, &mut buf)?;
    Ok(buf)
}

/// Encodes a node tree into `writer`.
///
/// Output already written stays written if encoding fails part way.
pub fn encode_to<W: Write>(node: &Node, writer: &mut W) -> Result<(), BencodeError> {
    match node {
        Node::Integer(i) => {
            write!(writer, "i{}e", i)?;
        }
        Node::String(b) | Node::Bytes(b) => {
            write!(writer, "{}:", b.len())?;
            writer.write_all(b)?;
        }
        Node::List(l) => {
            writer.write_all(b"l")?;
            for item in l {
                encode_to(item, writer)?;
            }
            writer.write_all(b"e")?;
        }
        Node::Map(m) => {
            writer.write_all(b"d")?;
            for (key, val) in m.sorted_entries() {
                write!(writer, "{}:", key.len())?;
                writer.write_all(key)?;
                encode_to(val, writer)?;
            }
            writer.write_all(b"e")?;
        }
        Node::Link(_) => return Err(BencodeError::UnsupportedKind(Kind::Link)),
    }
    Ok(())
}
