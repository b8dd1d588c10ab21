//! Classic engine map format
//!
//! Classic maps are single self-contained files: a run-length-compressed
//! buffer whose decompressed form holds a 36-byte header followed by a
//! tile plane and a sprite plane, each padded to a 16-byte-aligned plane
//! size. Unlike the Galaxy format there is a symmetric encoder; it always
//! writes planes uncompressed.

pub mod map;
pub mod rle;

pub use map::{ClassicMap, PLANE_COUNT, TILE_PLANE_OFFSET};
pub use rle::decompress;

use crate::Result;

/// Decode a whole Classic map file: decompress, then slice into grids.
pub fn decode_classic_map(file: &[u8]) -> Result<ClassicMap> {
    map::decode(&rle::decompress(file)?)
}

/// Encode a Classic map to its on-disk layout, stored uncompressed.
pub fn encode_classic_map(classic_map: &ClassicMap) -> Result<Vec<u8>> {
    map::encode(classic_map)
}
