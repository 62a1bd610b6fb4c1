use super::error::BencodeError;
use crate::constants::MAX_NESTING_DEPTH;
use crate::node::{Map, Node, NodeError};
use bytes::Bytes;
use std::io::Read;

/// Decodes one bencode value that spans all of `data`.
///
/// Byte strings decode as [`Node::String`]. Dictionary keys keep their input
/// order; a repeated key fails the whole decode.
///
/// # Examples
///
/// ```
/// use btfile::bencode::decode;
///
/// let node = decode(b"d3:cow3:moo4:spami42ee").unwrap();
/// assert_eq!(node.lookup("spam").unwrap().as_integer().unwrap(), 42);
///
/// assert!(decode(b"d1:a1:x1:a1:ye").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Node, BencodeError> {
    let mut pos = 0;
    let value = decode_value(data, &mut pos, 0)?;

    if pos != data.len() {
        return Err(BencodeError::TrailingData);
    }

    Ok(value)
}

/// Reads `reader` to the end and decodes its contents.
pub fn decode_from<R: Read>(mut reader: R) -> Result<Node, BencodeError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode(&data)
}

fn decode_value(data: &[u8], pos: &mut usize, depth: usize) -> Result<Node, BencodeError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(BencodeError::NestingTooDeep);
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    match data[*pos] {
        b'i' => decode_integer(data, pos),
        b'l' => decode_list(data, pos, depth),
        b'd' => decode_dict(data, pos, depth),
        b'0'..=b'9' => decode_string(data, pos),
        c => Err(BencodeError::UnexpectedChar(c as char)),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Node, BencodeError> {
    *pos += 1;

    let start = *pos;
    while *pos < data.len() && data[*pos] != b'e' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    let body = &data[start..*pos];
    let digits = body.strip_prefix(b"-").unwrap_or(body);

    if digits.is_empty() {
        return Err(BencodeError::InvalidInteger("empty".into()));
    }

    if !digits.iter().all(u8::is_ascii_digit) {
        return Err(BencodeError::InvalidInteger(
            String::from_utf8_lossy(body).into_owned(),
        ));
    }

    if body.starts_with(b"-0") || (digits[0] == b'0' && digits.len() > 1) {
        return Err(BencodeError::InvalidInteger("leading zeros".into()));
    }

    // Only ASCII remains at this point.
    let int_str = std::str::from_utf8(body)
        .map_err(|_| BencodeError::InvalidInteger("invalid utf8".into()))?;

    let value: i64 = int_str
        .parse()
        .map_err(|_| BencodeError::InvalidInteger(int_str.into()))?;

    *pos += 1;
    Ok(Node::Integer(value))
}

fn decode_string(data: &[u8], pos: &mut usize) -> Result<Node, BencodeError> {
    let start = *pos;
    while *pos < data.len() && data[*pos] != b':' {
        if !data[*pos].is_ascii_digit() {
            return Err(BencodeError::InvalidStringLength);
        }
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    let len_str =
        std::str::from_utf8(&data[start..*pos]).map_err(|_| BencodeError::InvalidStringLength)?;

    let len: usize = len_str
        .parse()
        .map_err(|_| BencodeError::InvalidStringLength)?;

    *pos += 1;

    let end = pos.checked_add(len).ok_or(BencodeError::InvalidStringLength)?;
    if end > data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    let bytes = Bytes::copy_from_slice(&data[*pos..end]);
    *pos = end;

    Ok(Node::String(bytes))
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize) -> Result<Node, BencodeError> {
    *pos += 1;
    let mut list = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        list.push(decode_value(data, pos, depth + 1)?);
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    *pos += 1;
    Ok(Node::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize) -> Result<Node, BencodeError> {
    *pos += 1;
    let mut map = Map::new();

    while *pos < data.len() && data[*pos] != b'e' {
        let key = match decode_value(data, pos, depth + 1)? {
            Node::String(b) => b,
            _ => return Err(BencodeError::NonStringKey),
        };

        let value = decode_value(data, pos, depth + 1)?;
        map.insert(key, value).map_err(|e| match e {
            NodeError::DuplicateKey(k) => BencodeError::DuplicateKey(k),
            other => BencodeError::Node(other),
        })?;
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    *pos += 1;
    Ok(Node::Map(map))
}
