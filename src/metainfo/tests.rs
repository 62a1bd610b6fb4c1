use std::io::Write;
use std::sync::Arc;

use sha1::{Digest, Sha1};
use tempfile::NamedTempFile;
use tokio_util::sync::CancellationToken;

use super::*;
use crate::bencode::{encode, BencodeError};
use crate::error::ErrorClass;
use crate::piecefile::MemoryResolver;

const SAMPLE_LENGTH: usize = 273_042;
const SAMPLE_PIECE_LENGTH: usize = 262_144;
const SAMPLE_INFO_HASH: &str = "692f5588b1c7e7cae80cf8c588c2f80cb5f398e4";

fn sample_content() -> Vec<u8> {
    (0..SAMPLE_LENGTH).map(|i| (i * 7 % 251) as u8).collect()
}

fn sample_pieces(data: &[u8]) -> Vec<u8> {
    data.chunks(SAMPLE_PIECE_LENGTH)
        .flat_map(|chunk| Sha1::digest(chunk).to_vec())
        .collect()
}

fn push_str(out: &mut Vec<u8>, s: &[u8]) {
    out.extend_from_slice(format!("{}:", s.len()).as_bytes());
    out.extend_from_slice(s);
}

fn sample_info(pieces: &[u8]) -> Vec<u8> {
    let mut out = b"d".to_vec();
    push_str(&mut out, b"length");
    out.extend_from_slice(b"i273042e");
    push_str(&mut out, b"name");
    push_str(&mut out, b"Koala.jpg");
    push_str(&mut out, b"piece length");
    out.extend_from_slice(b"i262144e");
    push_str(&mut out, b"pieces");
    push_str(&mut out, pieces);
    out.push(b'e');
    out
}

fn sample_torrent(info: &[u8]) -> Vec<u8> {
    let mut out = b"d".to_vec();
    push_str(&mut out, b"comment");
    push_str(&mut out, b"dynamic metainfo from client");
    push_str(&mut out, b"created by");
    push_str(&mut out, b"go.torrent");
    push_str(&mut out, b"creation date");
    out.extend_from_slice(b"i1648770517e");
    push_str(&mut out, b"info");
    out.extend_from_slice(info);
    push_str(&mut out, b"url-list");
    out.extend_from_slice(b"le");
    out.push(b'e');
    out
}

#[test]
fn test_info_hash_of_sample() {
    let data = sample_content();
    let info = sample_info(&sample_pieces(&data));
    let torrent = sample_torrent(&info);

    let metainfo = Metainfo::from_bytes(&torrent).unwrap();
    assert_eq!(metainfo.info_hash().to_hex(), SAMPLE_INFO_HASH);

    let raw: [u8; 20] = Sha1::digest(&info).into();
    assert_eq!(metainfo.info_hash().as_bytes(), &raw);

    // The whole document was canonical, so it re-encodes byte for byte.
    let reencoded = encode(&crate::node::Node::Map(metainfo.root().clone())).unwrap();
    assert_eq!(reencoded, torrent);
}

#[test]
fn test_sample_fields() {
    let data = sample_content();
    let torrent = sample_torrent(&sample_info(&sample_pieces(&data)));
    let metainfo = Metainfo::from_bytes(&torrent).unwrap();

    assert_eq!(metainfo.name().unwrap(), "Koala.jpg");
    assert_eq!(metainfo.length().unwrap(), SAMPLE_LENGTH as u64);
    assert_eq!(metainfo.piece_length().unwrap(), SAMPLE_PIECE_LENGTH as u64);
    assert_eq!(metainfo.piece_count().unwrap(), 2);
    assert_eq!(metainfo.comment(), Some("dynamic metainfo from client"));
    assert_eq!(metainfo.created_by(), Some("go.torrent"));
    assert_eq!(metainfo.creation_date(), Some(1648770517));
    assert_eq!(metainfo.announce(), None);
    assert!(metainfo.url_list().is_empty());
    assert!(metainfo.announce_list().is_empty());
    assert!(!metainfo.is_multi_file());

    let first: [u8; 20] = Sha1::digest(&data[..SAMPLE_PIECE_LENGTH]).into();
    assert_eq!(metainfo.piece_hash(0).unwrap(), Some(first));
    assert_eq!(metainfo.piece_hash(2).unwrap(), None);
}

#[test]
fn test_sample_file_content() {
    let data = sample_content();
    let torrent = sample_torrent(&sample_info(&sample_pieces(&data)));
    let metainfo = Metainfo::from_bytes(&torrent).unwrap();

    let store = Arc::new(MemoryResolver::new());
    for chunk in data.chunks(SAMPLE_PIECE_LENGTH) {
        store.insert(chunk.to_vec()).unwrap();
    }

    let file = metainfo.file(store, CancellationToken::new()).unwrap();
    let content = file.read_all().unwrap();
    assert_eq!(content, data);

    let piece_length = metainfo.piece_length().unwrap() as usize;
    for i in 0..metainfo.piece_count().unwrap() {
        let start = i * piece_length;
        let end = (start + piece_length).min(content.len());
        let computed: [u8; 20] = Sha1::digest(&content[start..end]).into();
        assert_eq!(Some(computed), metainfo.piece_hash(i).unwrap());
    }
}

#[test]
fn test_info_hash_ignores_key_order() {
    let canonical = Metainfo::from_bytes(
        b"d4:infod6:lengthi3e4:name5:a.txt12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaaee",
    )
    .unwrap();
    let shuffled = Metainfo::from_bytes(
        b"d4:infod4:name5:a.txt6:pieces20:aaaaaaaaaaaaaaaaaaaa12:piece lengthi16384e6:lengthi3eee",
    )
    .unwrap();

    assert_eq!(
        canonical.info_hash().to_hex(),
        "8238f6572dfb2346b81f44f374e0e2b74b2d1e81"
    );
    assert_eq!(shuffled.info_hash(), canonical.info_hash());
}

#[test]
fn test_info_hash_from_hex() {
    let hex = "0123456789abcdef0123456789abcdef01234567";
    let hash = InfoHash::from_hex(hex).unwrap();
    assert_eq!(hash.to_hex(), hex);
    assert_eq!(hash.to_string(), hex);
    assert_eq!(format!("{:?}", hash), format!("InfoHash({})", hex));
}

#[test]
fn test_info_hash_invalid() {
    assert!(matches!(
        InfoHash::from_hex("0123"),
        Err(MetainfoError::InvalidInfoHashLength)
    ));
    assert!(matches!(
        InfoHash::from_hex("zz23456789abcdef0123456789abcdef01234567"),
        Err(MetainfoError::InvalidHex(_))
    ));
    assert!(InfoHash::from_bytes(&[0u8; 32]).is_err());
}

#[test]
fn test_from_file() {
    let data = sample_content();
    let torrent = sample_torrent(&sample_info(&sample_pieces(&data)));

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&torrent).unwrap();
    file.flush().unwrap();

    let metainfo = Metainfo::from_file(file.path()).unwrap();
    assert_eq!(metainfo.info_hash().to_hex(), SAMPLE_INFO_HASH);

    assert!(matches!(
        Metainfo::from_file(file.path().with_extension("missing")),
        Err(MetainfoError::Io(_))
    ));
}

#[test]
fn test_missing_or_invalid_info() {
    assert!(matches!(
        Metainfo::from_bytes(b"d7:comment4:demoe"),
        Err(MetainfoError::MissingField("info"))
    ));
    assert!(matches!(
        Metainfo::from_bytes(b"d4:infoi1ee"),
        Err(MetainfoError::InvalidField("info"))
    ));
    assert!(matches!(
        Metainfo::from_bytes(b"li1ee"),
        Err(MetainfoError::InvalidField("root"))
    ));
}

#[test]
fn test_duplicate_key_rejected() {
    let err = Metainfo::from_bytes(b"d4:infod4:name1:a4:name1:bee").unwrap_err();
    assert!(matches!(
        err,
        MetainfoError::Bencode(BencodeError::DuplicateKey(_))
    ));
    assert_eq!(err.class(), ErrorClass::Schema);
}

#[test]
fn test_invalid_fields() {
    let metainfo =
        Metainfo::from_bytes(b"d4:infod6:lengthi-1e4:name2:\xff\xfe6:pieces3:abcee").unwrap();
    assert!(matches!(
        metainfo.length(),
        Err(MetainfoError::InvalidField("length"))
    ));
    assert!(matches!(
        metainfo.piece_length(),
        Err(MetainfoError::MissingField("piece length"))
    ));
    assert!(matches!(
        metainfo.name(),
        Err(MetainfoError::InvalidField("name"))
    ));
    assert!(matches!(
        metainfo.pieces(),
        Err(MetainfoError::InvalidField("pieces"))
    ));
}

#[test]
fn test_trackers_and_web_seeds() {
    let metainfo = Metainfo::from_bytes(
        b"d8:announce17:http://a/announce13:announce-listll17:http://a/announceel17:http://b/announceee\
          4:infod6:lengthi1e4:name1:xe8:url-list12:http://seed/e",
    )
    .unwrap();

    assert_eq!(metainfo.announce(), Some("http://a/announce"));
    assert_eq!(
        metainfo.announce_list(),
        vec![vec!["http://a/announce"], vec!["http://b/announce"]]
    );
    assert_eq!(metainfo.url_list(), vec!["http://seed/"]);
}

#[test]
fn test_multi_file_rejected() {
    let metainfo = Metainfo::from_bytes(
        b"d4:infod5:filesld6:lengthi1e4:pathl1:aeee4:name3:dir12:piece lengthi16384e6:pieces0:ee",
    )
    .unwrap();
    assert!(metainfo.is_multi_file());
    assert!(matches!(
        metainfo.file(Arc::new(MemoryResolver::new()), CancellationToken::new()),
        Err(MetainfoError::MultiFile)
    ));
}
