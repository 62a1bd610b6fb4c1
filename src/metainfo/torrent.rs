use super::error::MetainfoError;
use super::info_hash::InfoHash;
use crate::bencode::decode;
use crate::constants::PIECE_HASH_LEN;
use crate::node::{Map, Node};
use crate::piecefile::{PieceFile, Resolver};
use bytes::Bytes;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A decoded torrent file.
///
/// The whole document stays available as a tree; the typed accessors only
/// read from it. Keys this type knows nothing about are kept as they are.
///
/// # Examples
///
/// ```
/// use btfile::metainfo::Metainfo;
///
/// let data = b"d7:comment4:demo4:infod6:lengthi3e4:name5:a.txt\
///              12:piece lengthi16384e6:pieces20:aaaaaaaaaaaaaaaaaaaaee";
/// let metainfo = Metainfo::from_bytes(data).unwrap();
///
/// assert_eq!(metainfo.name().unwrap(), "a.txt");
/// assert_eq!(metainfo.comment(), Some("demo"));
/// assert_eq!(
///     metainfo.info_hash().to_hex(),
///     "8238f6572dfb2346b81f44f374e0e2b74b2d1e81"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Metainfo {
    root: Map,
    info: Map,
    info_hash: InfoHash,
}

impl Metainfo {
    /// Parses a torrent file from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The data is not valid bencode
    /// - The top level is not a dictionary
    /// - The `info` dictionary is missing or not a dictionary
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let root = decode(data)?
            .into_map()
            .map_err(|_| MetainfoError::InvalidField("root"))?;

        let info_node = root.get("info").ok_or(MetainfoError::MissingField("info"))?;
        let info = info_node
            .as_map()
            .map_err(|_| MetainfoError::InvalidField("info"))?
            .clone();

        let info_hash = InfoHash::from_info(info_node)?;
        tracing::debug!("Parsed metainfo with info hash {}", info_hash);

        Ok(Self {
            root,
            info,
            info_hash,
        })
    }

    /// Reads and parses a torrent file from disk.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, MetainfoError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(&data)
    }

    /// The whole decoded document.
    pub fn root(&self) -> &Map {
        &self.root
    }

    pub fn info(&self) -> &Map {
        &self.info
    }

    pub fn info_hash(&self) -> InfoHash {
        self.info_hash
    }

    pub fn name(&self) -> Result<&str, MetainfoError> {
        self.info
            .get("name")
            .ok_or(MetainfoError::MissingField("name"))?
            .as_str()?
            .ok_or(MetainfoError::InvalidField("name"))
    }

    pub fn length(&self) -> Result<u64, MetainfoError> {
        self.positive_integer("length")
    }

    pub fn piece_length(&self) -> Result<u64, MetainfoError> {
        self.positive_integer("piece length")
    }

    /// The raw `pieces` string: one 20-byte SHA-1 digest per piece.
    pub fn pieces(&self) -> Result<&Bytes, MetainfoError> {
        let pieces = self
            .info
            .get("pieces")
            .ok_or(MetainfoError::MissingField("pieces"))?
            .as_bytes()?;
        if pieces.len() % PIECE_HASH_LEN != 0 {
            return Err(MetainfoError::InvalidField("pieces"));
        }
        Ok(pieces)
    }

    pub fn piece_count(&self) -> Result<usize, MetainfoError> {
        Ok(self.pieces()?.len() / PIECE_HASH_LEN)
    }

    pub fn piece_hash(&self, index: usize) -> Result<Option<[u8; 20]>, MetainfoError> {
        let start = index.saturating_mul(PIECE_HASH_LEN);
        Ok(self
            .pieces()?
            .get(start..start.saturating_add(PIECE_HASH_LEN))
            .and_then(|digest| digest.try_into().ok()))
    }

    /// True if the `info` dictionary describes a directory (`files` list).
    pub fn is_multi_file(&self) -> bool {
        self.info.contains_key("files")
    }

    /// Primary tracker URL.
    pub fn announce(&self) -> Option<&str> {
        self.optional_str("announce")
    }

    /// Multi-tier tracker list ([BEP-12](http://bittorrent.org/beps/bep_0012.html)).
    pub fn announce_list(&self) -> Vec<Vec<&str>> {
        self.root
            .get("announce-list")
            .and_then(|v| v.as_list().ok())
            .map(|tiers| {
                tiers
                    .iter()
                    .filter_map(|tier| {
                        tier.as_list()
                            .ok()
                            .map(|urls| urls.iter().filter_map(text).collect())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn comment(&self) -> Option<&str> {
        self.optional_str("comment")
    }

    pub fn created_by(&self) -> Option<&str> {
        self.optional_str("created by")
    }

    /// Unix timestamp when the torrent was created.
    pub fn creation_date(&self) -> Option<i64> {
        self.root
            .get("creation date")
            .and_then(|v| v.as_integer().ok())
    }

    /// Web seed URLs ([BEP-19](http://bittorrent.org/beps/bep_0019.html)).
    ///
    /// `url-list` may be a single string or a list of strings.
    pub fn url_list(&self) -> Vec<&str> {
        match self.root.get("url-list") {
            Some(Node::List(urls)) => urls.iter().filter_map(text).collect(),
            Some(single) => text(single).into_iter().collect(),
            None => Vec::new(),
        }
    }

    /// Opens the torrent's content as a piece-addressed file.
    pub fn file(
        &self,
        resolver: Arc<dyn Resolver>,
        cx: CancellationToken,
    ) -> Result<PieceFile, MetainfoError> {
        if self.is_multi_file() {
            return Err(MetainfoError::MultiFile);
        }
        Ok(PieceFile::from_map(self.info.clone(), resolver, cx))
    }

    fn positive_integer(&self, field: &'static str) -> Result<u64, MetainfoError> {
        let value = self
            .info
            .get(field)
            .ok_or(MetainfoError::MissingField(field))?
            .as_integer()?;
        match u64::try_from(value) {
            Ok(v) if v > 0 => Ok(v),
            _ => Err(MetainfoError::InvalidField(field)),
        }
    }

    fn optional_str(&self, key: &str) -> Option<&str> {
        self.root.get(key).and_then(text)
    }
}

fn text(node: &Node) -> Option<&str> {
    node.as_str().ok().flatten()
}
