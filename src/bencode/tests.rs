use bytes::Bytes;

use super::*;
use crate::error::ErrorClass;
use crate::node::{Kind, Map, Node};

fn string(s: &'static [u8]) -> Node {
    Node::String(Bytes::from_static(s))
}

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i42e").unwrap(), Node::Integer(42));
    assert_eq!(decode(b"i-42e").unwrap(), Node::Integer(-42));
    assert_eq!(decode(b"i0e").unwrap(), Node::Integer(0));
    assert_eq!(
        decode(b"i9223372036854775807e").unwrap(),
        Node::Integer(i64::MAX)
    );
    assert_eq!(
        decode(b"i-9223372036854775808e").unwrap(),
        Node::Integer(i64::MIN)
    );
}

#[test]
fn test_decode_integer_invalid() {
    assert!(decode(b"i-0e").is_err());
    assert!(decode(b"i03e").is_err());
    assert!(decode(b"ie").is_err());
    assert!(decode(b"i-e").is_err());
    assert!(decode(b"i+5e").is_err());
    assert!(decode(b"i1.5e").is_err());
    assert!(decode(b"i9223372036854775808e").is_err());
    assert!(matches!(decode(b"i42"), Err(BencodeError::UnexpectedEof)));

    let err = decode(b"i4x2e").unwrap_err();
    assert!(matches!(err, BencodeError::InvalidInteger(_)));
    assert_eq!(err.class(), ErrorClass::Format);
}

#[test]
fn test_decode_string() {
    assert_eq!(decode(b"4:spam").unwrap(), string(b"spam"));
    assert_eq!(decode(b"0:").unwrap(), string(b""));
}

#[test]
fn test_decode_string_invalid() {
    assert!(matches!(decode(b"5:spam"), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(decode(b"4spam"), Err(BencodeError::InvalidStringLength)));
    assert!(matches!(decode(b"4"), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(
        decode(b"99999999999999999999999:x"),
        Err(BencodeError::InvalidStringLength)
    ));
}

#[test]
fn test_decode_binary_string() {
    let data = [b'3', b':', 0x00, 0xff, 0x13];
    let node = decode(&data).unwrap();
    assert_eq!(node.kind(), Kind::String);
    assert_eq!(node.as_bytes().unwrap().as_ref(), &[0x00, 0xff, 0x13]);
    assert_eq!(node.as_str().unwrap(), None);
}

#[test]
fn test_decode_list() {
    let result = decode(b"l4:spami42ee").unwrap();
    let list = result.as_list().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0], string(b"spam"));
    assert_eq!(list[1], Node::Integer(42));
}

#[test]
fn test_decode_dict() {
    let result = decode(b"d3:cow3:moo4:spam4:eggse").unwrap();
    let map = result.as_map().unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map.get("cow"), Some(&string(b"moo")));
}

#[test]
fn test_decode_unterminated_containers() {
    assert!(matches!(decode(b"l4:spam"), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(decode(b"d3:cow3:moo"), Err(BencodeError::UnexpectedEof)));
    assert!(matches!(decode(b"d3:cowe"), Err(BencodeError::UnexpectedChar('e'))));
    assert!(matches!(decode(b""), Err(BencodeError::UnexpectedEof)));
}

#[test]
fn test_decode_duplicate_key() {
    let err = decode(b"d1:a1:x1:a1:ye").unwrap_err();
    assert!(matches!(err, BencodeError::DuplicateKey(ref k) if k.as_ref() == b"a"));
    assert_eq!(err.class(), ErrorClass::Schema);
}

#[test]
fn test_decode_non_string_key() {
    let err = decode(b"di1e3:mooe").unwrap_err();
    assert!(matches!(err, BencodeError::NonStringKey));
    assert_eq!(err.class(), ErrorClass::Schema);

    assert!(matches!(
        decode(b"dl1:ae3:mooe"),
        Err(BencodeError::NonStringKey)
    ));
}

#[test]
fn test_decode_nesting_limit() {
    let mut deep = vec![b'l'; 100];
    deep.extend(vec![b'e'; 100]);
    assert!(matches!(decode(&deep), Err(BencodeError::NestingTooDeep)));

    let mut shallow = vec![b'l'; 10];
    shallow.extend(vec![b'e'; 10]);
    assert!(decode(&shallow).is_ok());
}

#[test]
fn test_decode_from_reader() {
    let node = decode_from(&b"d3:fooi1ee"[..]).unwrap();
    assert_eq!(node.lookup("foo").unwrap().as_integer().unwrap(), 1);
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Node::Integer(42)).unwrap(), b"i42e");
    assert_eq!(encode(&Node::Integer(-42)).unwrap(), b"i-42e");
    assert_eq!(encode(&Node::Integer(0)).unwrap(), b"i0e");
}

#[test]
fn test_encode_string_and_bytes() {
    assert_eq!(encode(&string(b"spam")).unwrap(), b"4:spam");
    assert_eq!(
        encode(&Node::Bytes(Bytes::from_static(b"spam"))).unwrap(),
        b"4:spam"
    );
}

#[test]
fn test_encode_list() {
    let list = Node::List(vec![string(b"spam"), Node::Integer(42)]);
    assert_eq!(encode(&list).unwrap(), b"l4:spami42ee");
}

#[test]
fn test_encode_sorts_keys() {
    let mut map = Map::new();
    map.insert("b", Node::Integer(1)).unwrap();
    map.insert("a", Node::Integer(2)).unwrap();
    assert_eq!(encode(&Node::Map(map)).unwrap(), b"d1:ai2e1:bi1ee");
}

#[test]
fn test_encode_sorts_keys_bytewise() {
    // Byte order, so "Z" < "a" and "ab" < "b".
    let mut map = Map::new();
    map.insert("b", Node::Integer(1)).unwrap();
    map.insert("ab", Node::Integer(2)).unwrap();
    map.insert("Z", Node::Integer(3)).unwrap();
    assert_eq!(
        encode(&Node::Map(map)).unwrap(),
        b"d1:Zi3e2:abi2e1:bi1ee"
    );
}

#[test]
fn test_encode_nested_maps_sorted() {
    let mut inner = Map::new();
    inner.insert("y", Node::Integer(1)).unwrap();
    inner.insert("x", Node::Integer(2)).unwrap();

    let mut outer = Map::new();
    outer.insert("list", Node::List(vec![Node::Map(inner)])).unwrap();
    outer.insert("a", string(b"z")).unwrap();

    assert_eq!(
        encode(&Node::Map(outer)).unwrap(),
        b"d1:a1:z4:listld1:xi2e1:yi1eeee"
    );
}

#[test]
fn test_encode_link_unsupported() {
    let cid = crate::piecefile::piece_cid(&[7u8; 20]).unwrap();

    let mut map = Map::new();
    map.insert("link", Node::Link(cid)).unwrap();

    let err = encode(&Node::Map(map)).unwrap_err();
    assert!(matches!(err, BencodeError::UnsupportedKind(Kind::Link)));
    assert_eq!(err.class(), ErrorClass::Schema);
}

#[test]
fn test_encode_to_writer() {
    let mut out = Vec::new();
    encode_to(&Node::List(vec![Node::Integer(1)]), &mut out).unwrap();
    assert_eq!(out, b"li1ee");
}

#[test]
fn test_roundtrip_canonical() {
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    let encoded = encode(&decoded).unwrap();
    assert_eq!(encoded, original);
}

#[test]
fn test_roundtrip_tree() {
    let mut info = Map::new();
    info.insert("piece length", Node::Integer(262144)).unwrap();
    info.insert("name", Node::string("file.bin")).unwrap();
    info.insert("pieces", Node::String(Bytes::from(vec![0xabu8; 40])))
        .unwrap();

    let mut root = Map::new();
    root.insert("url-list", Node::List(vec![])).unwrap();
    root.insert("info", Node::Map(info)).unwrap();
    root.insert("creation date", Node::Integer(-1)).unwrap();
    root.insert(
        "nested",
        Node::List(vec![Node::List(vec![string(b"")]), Node::Integer(0)]),
    )
    .unwrap();
    let tree = Node::Map(root);

    let decoded = decode(&encode(&tree).unwrap()).unwrap();
    assert_eq!(decoded, tree);
}

#[test]
fn test_nested_structures() {
    let data = b"d4:listl4:spami42eee";
    let decoded = decode(data).unwrap();
    let encoded = encode(&decoded).unwrap();
    assert_eq!(encoded, data);
}

#[test]
fn test_trailing_data_error() {
    assert!(matches!(decode(b"i42eextra"), Err(BencodeError::TrailingData)));
}
