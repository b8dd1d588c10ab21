//! Common types and constants for the Keen map codecs
//!
//! This module defines the error type, the pipeline stage identifiers used
//! for error context, the format marker constants shared by the Galaxy and
//! Classic codecs, and the bounds-checked little-endian field readers.

use std::fmt;
use thiserror::Error;

/// Pipeline stage in which an error was detected.
///
/// Every decode error carries its stage so a corrupt file can be diagnosed
/// down to the pass and byte offset that rejected it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Carmack back-reference expansion (Galaxy, bytes to words)
    Carmack,
    /// RLEW run-length expansion (Galaxy, words to words)
    Rlew,
    /// Galaxy index/header parsing and plane slicing
    GalaxyHeader,
    /// Classic run-length decompression
    ClassicRle,
    /// Classic header parsing and plane slicing
    ClassicHeader,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Carmack => "carmack",
            Stage::Rlew => "rlew",
            Stage::GalaxyHeader => "galaxy header",
            Stage::ClassicRle => "classic rle",
            Stage::ClassicHeader => "classic header",
        };
        f.write_str(name)
    }
}

/// Error type for map decode/encode operations
///
/// All errors are local to a single decode or encode call. Decoding is a
/// deterministic parse of static data, so re-invoking with the same bytes
/// always yields the same error.
#[derive(Debug, Error)]
pub enum MapError {
    /// Reading the next token or header field would run past the input
    #[error("{stage}: truncated input at byte {offset}")]
    TruncatedInput {
        /// Stage that hit the end of its input
        stage: Stage,
        /// Byte offset of the read that could not be satisfied
        offset: usize,
    },

    /// A pointer token referenced output that has not been produced
    #[error(
        "{stage}: back-reference to word {source_index} with only {produced} words produced (token at byte {offset})"
    )]
    CorruptBackReference {
        /// Stage that resolved the back-reference
        stage: Stage,
        /// Byte offset of the offending token
        offset: usize,
        /// Output word index the token referenced
        source_index: usize,
        /// Number of output words produced so far
        produced: usize,
    },

    /// A declared size disagrees with the actual data length
    #[error("{stage}: declared size {declared} disagrees with actual size {actual}")]
    UnexpectedEof {
        /// Stage whose declared size was violated
        stage: Stage,
        /// Size the stream header declared
        declared: usize,
        /// Size actually available or produced
        actual: usize,
    },

    /// Expansion would write past the size declared in the stream header
    #[error("{stage}: output exceeds declared size of {declared} words (token at byte {offset})")]
    DeclaredSizeExceeded {
        /// Stage whose output overran
        stage: Stage,
        /// Byte offset of the token that overflowed the output
        offset: usize,
        /// Declared output size in words
        declared: usize,
    },

    /// Galaxy map number outside the index file's slot range
    #[error("invalid map index {requested} (index file has {slots} slots)")]
    InvalidMapIndex {
        /// Requested map number
        requested: usize,
        /// Number of slots the index file holds
        slots: usize,
    },

    /// Encoder input grid does not match the declared dimensions
    #[error("plane has {actual} cells, expected {expected}")]
    PlaneSizeMismatch {
        /// Cell count implied by width * height
        expected: usize,
        /// Cell count of the grid actually supplied
        actual: usize,
    },

    /// Encoder input grid is too large for the 16-bit plane size field
    #[error("plane byte size {bytes} exceeds the format limit of {max}")]
    PlaneTooLarge {
        /// Rounded plane byte size the map would need
        bytes: usize,
        /// Largest plane byte size the header can store
        max: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for map codec operations
pub type Result<T> = std::result::Result<T, MapError>;

// Format-wide marker constants

/// High byte marking a Carmack near-pointer token
pub const CARMACK_NEAR: u8 = 0xA7;

/// High byte marking a Carmack far-pointer token
pub const CARMACK_FAR: u8 = 0xA8;

/// RLEW run-record marker word
pub const RLEW_MARKER: u16 = 0xABCD;

/// Classic run-record marker (a `0xFEFE` word, stored as two bytes)
pub const CLASSIC_MARKER: [u8; 2] = [0xFE, 0xFE];

/// Read a little-endian u16 field, reporting truncation with stage context
pub(crate) fn read_u16_le(buf: &[u8], offset: usize, stage: Stage) -> Result<u16> {
    match buf.get(offset..offset + 2) {
        Some(b) => Ok(u16::from_le_bytes([b[0], b[1]])),
        None => Err(MapError::TruncatedInput { stage, offset }),
    }
}

/// Read a little-endian u32 field, reporting truncation with stage context
pub(crate) fn read_u32_le(buf: &[u8], offset: usize, stage: Stage) -> Result<u32> {
    match buf.get(offset..offset + 4) {
        Some(b) => Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]])),
        None => Err(MapError::TruncatedInput { stage, offset }),
    }
}
