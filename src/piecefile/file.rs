use std::collections::VecDeque;
use std::fmt;
use std::io::{self, Read, Seek, SeekFrom, Take};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use super::deferred::DeferredBlockReader;
use super::error::FileError;
use super::layout::PieceLayout;
use super::resolver::{Block, Resolver};
use crate::node::{Kind, Map, Node};

/// A single-file torrent `info` dictionary viewed as its file content.
///
/// The content is never materialized up front. Each [`PieceFileReader`]
/// pulls pieces through the resolver as it reads, one block per piece digest.
/// The only capability is [`byte_stream`](Self::byte_stream); there are no
/// structural accessors to call by mistake.
#[derive(Clone)]
pub struct PieceFile {
    substrate: Arc<Map>,
    resolver: Arc<dyn Resolver>,
    cx: CancellationToken,
}

impl PieceFile {
    /// Wraps an `info` node. Fails if it is not a map.
    pub fn new(
        substrate: Node,
        resolver: Arc<dyn Resolver>,
        cx: CancellationToken,
    ) -> Result<Self, FileError> {
        Ok(Self::from_map(substrate.into_map()?, resolver, cx))
    }

    pub fn from_map(substrate: Map, resolver: Arc<dyn Resolver>, cx: CancellationToken) -> Self {
        Self {
            substrate: Arc::new(substrate),
            resolver,
            cx,
        }
    }

    /// Always [`Kind::Bytes`].
    pub fn kind(&self) -> Kind {
        Kind::Bytes
    }

    /// The `info` map this file is derived from.
    pub fn substrate(&self) -> &Map {
        &self.substrate
    }

    /// The declared `length` field.
    pub fn len(&self) -> Result<u64, FileError> {
        let length = declared_length(&self.substrate)?;
        u64::try_from(length).map_err(|_| FileError::InvalidLength(length))
    }

    pub fn is_empty(&self) -> Result<bool, FileError> {
        Ok(self.len()? == 0)
    }

    /// Opens an independent reader positioned at offset 0.
    pub fn byte_stream(&self) -> PieceFileReader {
        PieceFileReader {
            file: self.clone(),
            offset: 0,
            position: 0,
            chain: None,
        }
    }

    /// Reads the whole file into memory.
    pub fn read_all(&self) -> io::Result<Vec<u8>> {
        let mut data = Vec::new();
        self.byte_stream().read_to_end(&mut data)?;
        Ok(data)
    }
}

impl From<PieceFile> for Block {
    fn from(file: PieceFile) -> Self {
        Block::Stream(Box::new(file.byte_stream()))
    }
}

impl fmt::Debug for PieceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieceFile")
            .field("substrate", &self.substrate)
            .finish_non_exhaustive()
    }
}

fn declared_length(substrate: &Map) -> Result<i64, FileError> {
    Ok(substrate.lookup("length")?.as_integer()?)
}

/// Reader over a [`PieceFile`].
///
/// The first read after creation or after any seek builds a chain of
/// [`DeferredBlockReader`]s covering `[offset, length)`. Later reads keep
/// consuming that chain. Seeking drops it, so the pieces are resolved again
/// on the next read.
///
/// Reads do not move the seek offset: `SeekFrom::Current` is relative to
/// the target of the last seek. [`Seek::stream_position`] reports the read
/// cursor instead.
pub struct PieceFileReader {
    file: PieceFile,
    offset: u64,
    position: u64,
    chain: Option<PieceChain>,
}

impl PieceFileReader {
    /// Returns true while a reader chain is built and not yet invalidated.
    pub fn has_active_chain(&self) -> bool {
        self.chain.is_some()
    }

    fn build_chain(&self) -> io::Result<Option<PieceChain>> {
        let layout = PieceLayout::from_info(&self.file.substrate).map_err(FileError::into_io)?;

        if self.offset >= layout.length() {
            tracing::trace!(
                "Offset {} is at or past the end ({} bytes)",
                self.offset,
                layout.length()
            );
            return Ok(None);
        }

        layout.validate().map_err(FileError::into_io)?;

        let mut links = VecDeque::new();
        for span in layout.pieces_from(self.offset) {
            let cid = match layout.cid(span.index).map_err(FileError::into_io)? {
                Some(cid) => cid,
                None => break,
            };
            let mut reader =
                DeferredBlockReader::new(cid, self.file.resolver.clone(), self.file.cx.clone());

            let mut remaining = span.length;
            if span.offset < self.offset {
                let skip = self.offset - span.offset;
                reader.seek(SeekFrom::Start(skip))?;
                remaining -= skip;
            }

            links.push_back(ChainLink {
                index: span.index,
                reader: reader.take(remaining),
            });
        }

        match (links.front(), links.back()) {
            (Some(first), Some(last)) => tracing::debug!(
                "Built reader chain over pieces {}..={} at offset {}",
                first.index,
                last.index,
                self.offset
            ),
            _ => {
                return Err(FileError::NoPiecesSelected {
                    offset: self.offset,
                    length: layout.length(),
                }
                .into_io())
            }
        }

        Ok(Some(PieceChain { links }))
    }
}

impl Read for PieceFileReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        if self.chain.is_none() {
            match self.build_chain()? {
                Some(chain) => self.chain = Some(chain),
                None => return Ok(0),
            }
        }

        let n = match self.chain.as_mut() {
            Some(chain) => chain.read(buf)?,
            None => 0,
        };
        self.position += n as u64;
        Ok(n)
    }
}

impl Seek for PieceFileReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        if self.chain.take().is_some() {
            tracing::trace!("Seek dropped reader chain at offset {}", self.offset);
        }
        self.position = self.offset;

        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => self.offset.checked_add_signed(delta),
            SeekFrom::End(delta) => {
                let length = declared_length(&self.file.substrate).map_err(FileError::into_io)?;
                let length = u64::try_from(length)
                    .map_err(|_| FileError::InvalidLength(length).into_io())?;
                length.checked_add_signed(delta)
            }
        };

        self.offset = target.ok_or_else(|| FileError::InvalidSeek.into_io())?;
        self.position = self.offset;
        Ok(self.offset)
    }

    fn stream_position(&mut self) -> io::Result<u64> {
        Ok(self.position)
    }
}

impl fmt::Debug for PieceFileReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PieceFileReader")
            .field("offset", &self.offset)
            .field("position", &self.position)
            .field("chain", &self.chain)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
struct ChainLink {
    index: usize,
    reader: Take<DeferredBlockReader>,
}

/// Piece readers concatenated in index order, each bounded to the unread
/// part of its piece.
#[derive(Debug)]
struct PieceChain {
    links: VecDeque<ChainLink>,
}

impl Read for PieceChain {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while let Some(link) = self.links.front_mut() {
            let n = link.reader.read(buf)?;
            if n > 0 {
                return Ok(n);
            }

            let missing = link.reader.limit();
            if missing > 0 {
                return Err(FileError::ShortPiece {
                    index: link.index,
                    missing,
                }
                .into_io());
            }

            tracing::trace!("Finished piece {}", link.index);
            self.links.pop_front();
        }
        Ok(0)
    }
}
