use std::ops::Range;

use bytes::Bytes;
use cid::Cid;

use super::error::FileError;
use super::piece_cid;
use crate::constants::PIECE_HASH_LEN;
use crate::node::Map;

/// The byte range of one piece within the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSpan {
    pub index: usize,
    pub offset: u64,
    pub length: u64,
}

impl PieceSpan {
    pub fn byte_range(&self) -> Range<u64> {
        self.offset..self.end()
    }

    pub fn end(&self) -> u64 {
        self.offset + self.length
    }

    pub fn contains_offset(&self, offset: u64) -> bool {
        offset >= self.offset && offset < self.end()
    }
}

/// Piece geometry of a single-file torrent `info` dictionary.
///
/// Piece `i` covers `[i * piece_length, min((i + 1) * piece_length, length))`
/// and is addressed by the `i`-th 20-byte digest in `pieces`.
#[derive(Debug, Clone)]
pub struct PieceLayout {
    pieces: Bytes,
    piece_length: u64,
    length: u64,
}

impl PieceLayout {
    /// Reads `pieces`, `piece length` and `length` from an info map.
    ///
    /// Checks the digest string and the two lengths on their own. Whether
    /// they agree with each other is left to [`validate`](Self::validate).
    pub fn from_info(info: &Map) -> Result<Self, FileError> {
        let pieces = info.lookup("pieces")?.as_bytes()?.clone();
        if pieces.len() % PIECE_HASH_LEN != 0 {
            return Err(FileError::MalformedPieces(pieces.len()));
        }

        let piece_length = info.lookup("piece length")?.as_integer()?;
        if piece_length <= 0 {
            return Err(FileError::InvalidPieceLength(piece_length));
        }

        let length = info.lookup("length")?.as_integer()?;
        if length < 0 {
            return Err(FileError::InvalidLength(length));
        }

        Ok(Self {
            pieces,
            piece_length: piece_length as u64,
            length: length as u64,
        })
    }

    pub fn piece_length(&self) -> u64 {
        self.piece_length
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len() / PIECE_HASH_LEN
    }

    /// Number of pieces the file length calls for.
    pub fn expected_piece_count(&self) -> u64 {
        self.length.div_ceil(self.piece_length)
    }

    /// Checks that every piece but the last is full and the last one holds
    /// between 1 and `piece length` bytes.
    pub fn validate(&self) -> Result<(), FileError> {
        let expected = self.expected_piece_count();
        if self.piece_count() as u64 != expected {
            return Err(FileError::PieceCountMismatch {
                pieces: self.piece_count(),
                expected,
            });
        }
        Ok(())
    }

    pub fn digest(&self, index: usize) -> Option<&[u8]> {
        let start = index.checked_mul(PIECE_HASH_LEN)?;
        self.pieces.get(start..start.checked_add(PIECE_HASH_LEN)?)
    }

    /// Content identifier of the block holding piece `index`.
    pub fn cid(&self, index: usize) -> Result<Option<Cid>, FileError> {
        self.digest(index).map(piece_cid).transpose()
    }

    pub fn span(&self, index: usize) -> Option<PieceSpan> {
        if index >= self.piece_count() {
            return None;
        }
        let offset = u64::try_from(index)
            .ok()?
            .checked_mul(self.piece_length)?;
        if offset >= self.length {
            return None;
        }
        Some(PieceSpan {
            index,
            offset,
            length: self.piece_length.min(self.length - offset),
        })
    }

    /// Spans of every piece intersecting `[offset, length)`, in index order.
    pub fn pieces_from(&self, offset: u64) -> impl Iterator<Item = PieceSpan> + '_ {
        let first = usize::try_from(offset / self.piece_length).unwrap_or(usize::MAX);
        (first..self.piece_count()).map_while(move |i| self.span(i))
    }
}
