use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::Bytes;
use cid::Cid;
use dashmap::DashMap;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use super::error::ResolveError;
use super::resolver::{Block, Resolver};
use crate::constants::DEFAULT_CACHE_CAPACITY;
use crate::node::{Kind, Node};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

/// Bounded cache of materialized blocks in front of another resolver.
///
/// Only `Bytes` nodes are kept; streams pass through uncached. The oldest
/// block is evicted first. Readers see the same bytes with or without the
/// cache.
pub struct CachingResolver<R> {
    inner: R,
    blocks: DashMap<Cid, Bytes>,
    order: Mutex<VecDeque<Cid>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl<R: Resolver> CachingResolver<R> {
    pub fn new(inner: R) -> Self {
        Self::with_capacity(inner, DEFAULT_CACHE_CAPACITY)
    }

    /// A capacity of zero disables caching.
    pub fn with_capacity(inner: R, capacity: usize) -> Self {
        Self {
            inner,
            blocks: DashMap::with_capacity(capacity),
            order: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn inner(&self) -> &R {
        &self.inner
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.blocks.len(),
        }
    }

    pub fn clear(&self) {
        let mut order = self.order.lock();
        order.clear();
        self.blocks.clear();
    }

    fn store(&self, cid: Cid, data: Bytes) {
        if self.capacity == 0 {
            return;
        }
        let mut order = self.order.lock();
        if self.blocks.insert(cid, data).is_some() {
            return;
        }
        order.push_back(cid);
        while order.len() > self.capacity {
            if let Some(evicted) = order.pop_front() {
                self.blocks.remove(&evicted);
                tracing::trace!("Evicted block {} from cache", evicted);
            }
        }
    }
}

impl<R: Resolver> Resolver for CachingResolver<R> {
    fn load(&self, cx: &CancellationToken, cid: &Cid, hint: Kind) -> Result<Block, ResolveError> {
        if let Some(data) = self.blocks.get(cid).map(|entry| entry.value().clone()) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("Cache hit for block {}", cid);
            return Ok(Block::Node(Node::Bytes(data)));
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let block = self.inner.load(cx, cid, hint)?;
        if let Block::Node(Node::Bytes(data)) = &block {
            self.store(*cid, data.clone());
        }
        Ok(block)
    }
}
