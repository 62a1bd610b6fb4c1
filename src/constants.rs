//! Format constants and tuning parameters.
//!
//! Values fixed by the BitTorrent v1 metainfo format and the content
//! identifier scheme used to address piece blocks, plus the few knobs that
//! bound memory use.

// ============================================================================
// Piece hashing
// ============================================================================

/// Length of one SHA-1 piece digest in the `pieces` string (BEP-3).
pub const PIECE_HASH_LEN: usize = 20;

// ============================================================================
// Content identifiers
// ============================================================================

/// Multicodec code of the SHA-1 multihash function.
pub const SHA1_MULTIHASH_CODE: u64 = 0x11;

/// Multicodec code of the `raw` content codec. Piece blocks are raw bytes.
pub const RAW_CODEC: u64 = 0x55;

// ============================================================================
// Bencode
// ============================================================================

/// Maximum container nesting accepted by the decoder.
pub const MAX_NESTING_DEPTH: usize = 64;

// ============================================================================
// Caching
// ============================================================================

/// Default number of blocks held by a [`CachingResolver`](crate::piecefile::CachingResolver).
pub const DEFAULT_CACHE_CAPACITY: usize = 64;
