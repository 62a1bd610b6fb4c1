use bytes::Bytes;

use super::error::NodeError;
use super::value::Node;

/// A string-keyed map with unique keys.
///
/// Entries keep their insertion order, which is what iteration yields.
/// Equality ignores order. Canonical bencode order is applied by the encoder,
/// never assumed from here.
#[derive(Debug, Clone, Default)]
pub struct Map {
    entries: Vec<(Bytes, Node)>,
}

impl Map {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a map expected to hold about `size_hint` entries.
    pub fn with_capacity(size_hint: usize) -> Self {
        Self {
            entries: Vec::with_capacity(size_hint),
        }
    }

    /// Adds an entry. A key that is already present is rejected and the
    /// existing value is left untouched.
    pub fn insert(&mut self, key: impl Into<Bytes>, value: Node) -> Result<(), NodeError> {
        let key = key.into();
        if self.contains_key(&key) {
            return Err(NodeError::DuplicateKey(key));
        }
        self.entries.push((key, value));
        Ok(())
    }

    pub fn get(&self, key: impl AsRef<[u8]>) -> Option<&Node> {
        let key = key.as_ref();
        self.entries
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v)
    }

    /// Like [`get`](Self::get), but a missing key is an error.
    pub fn lookup(&self, key: &str) -> Result<&Node, NodeError> {
        self.get(key)
            .ok_or_else(|| NodeError::MissingKey(key.to_string()))
    }

    pub fn contains_key(&self, key: impl AsRef<[u8]>) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&Bytes, &Node)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Entries sorted by ascending byte order of key.
    pub fn sorted_entries(&self) -> Vec<(&Bytes, &Node)> {
        let mut sorted: Vec<_> = self.iter().collect();
        sorted.sort_unstable_by(|a, b| a.0.cmp(b.0));
        sorted
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|o| o == v))
    }
}

impl Eq for Map {}
