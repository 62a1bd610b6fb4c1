use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};
use std::sync::Arc;

use cid::Cid;
use tokio_util::sync::CancellationToken;

use super::error::{FileError, ResolveError};
use super::resolver::{ReadSeek, Resolver};
use crate::node::Kind;

enum State {
    Unresolved {
        cid: Cid,
        resolver: Arc<dyn Resolver>,
        cx: CancellationToken,
    },
    Resolved(Box<dyn ReadSeek + Send>),
    Failed(Cid),
}

/// Seekable reader over one content-addressed block, resolved on first use.
///
/// Nothing is loaded until the first `read` or `seek`. A successful load
/// drops the resolver and context and every later call goes straight to the
/// block's stream. A failed load is final: the reader reports
/// [`FileError::ResolutionPoisoned`] from then on.
pub struct DeferredBlockReader {
    state: State,
}

impl DeferredBlockReader {
    pub fn new(cid: Cid, resolver: Arc<dyn Resolver>, cx: CancellationToken) -> Self {
        Self {
            state: State::Unresolved { cid, resolver, cx },
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved(_))
    }

    /// The block's CID, until the reader has resolved.
    pub fn cid(&self) -> Option<&Cid> {
        match &self.state {
            State::Unresolved { cid, .. } | State::Failed(cid) => Some(cid),
            State::Resolved(_) => None,
        }
    }

    fn stream(&mut self) -> Result<&mut Box<dyn ReadSeek + Send>, FileError> {
        if let State::Unresolved { cid, .. } = &self.state {
            let cid = *cid;
            // Stays failed unless the load below succeeds.
            if let State::Unresolved { resolver, cx, .. } =
                std::mem::replace(&mut self.state, State::Failed(cid))
            {
                self.state = State::Resolved(resolve(cid, resolver, cx)?);
            }
        }

        match &mut self.state {
            State::Resolved(stream) => Ok(stream),
            State::Failed(cid) | State::Unresolved { cid, .. } => {
                Err(FileError::ResolutionPoisoned(*cid))
            }
        }
    }
}

fn resolve(
    cid: Cid,
    resolver: Arc<dyn Resolver>,
    cx: CancellationToken,
) -> Result<Box<dyn ReadSeek + Send>, FileError> {
    if cx.is_cancelled() {
        return Err(FileError::Cancelled(cid));
    }

    tracing::trace!("Resolving block {}", cid);
    let block = match resolver.load(&cx, &cid, Kind::Bytes) {
        Ok(block) => block,
        Err(ResolveError::Cancelled) => return Err(FileError::Cancelled(cid)),
        Err(_) if cx.is_cancelled() => return Err(FileError::Cancelled(cid)),
        Err(source) => {
            tracing::debug!("Failed to resolve block {}: {}", cid, source);
            return Err(FileError::Resolution { cid, source });
        }
    };

    if cx.is_cancelled() {
        tracing::debug!("Context cancelled while resolving block {}", cid);
        return Err(FileError::Cancelled(cid));
    }

    block
        .into_byte_stream()
        .map_err(|kind| FileError::NotByteStream { cid, kind })
}

impl Read for DeferredBlockReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stream().map_err(FileError::into_io)?.read(buf)
    }
}

impl Seek for DeferredBlockReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.stream().map_err(FileError::into_io)?.seek(pos)
    }
}

impl fmt::Debug for DeferredBlockReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &self.state {
            State::Unresolved { .. } => "unresolved",
            State::Resolved(_) => "resolved",
            State::Failed(_) => "failed",
        };
        f.debug_struct("DeferredBlockReader")
            .field("cid", &self.cid())
            .field("state", &state)
            .finish()
    }
}
