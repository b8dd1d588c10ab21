//! Galaxy archive container
//!
//! Parses the two-file Galaxy archive layout and drives the per-plane
//! decompression pipeline. The index file ("maphead") holds one 32-bit
//! little-endian offset per map slot at byte `2 + 4 * slot`, zero meaning
//! the slot is empty. The data file ("gamemaps") holds, at each resolved
//! offset, three u32 plane offsets, three u16 compressed plane lengths,
//! u16 width, u16 height, and a 16-byte NUL-padded map name. Each present
//! plane is sliced out of the data file and run through
//! [`super::carmack`] then [`super::rlew`].

use super::{carmack, rlew, INDEX_BASE, MAX_PLANES, NAME_LEN};
use crate::common::{read_u16_le, read_u32_le};
use crate::{MapError, Result, Stage};

/// Identity of a Galaxy plane within its map header.
///
/// Absent planes are omitted from [`GalaxyMap::planes`] rather than
/// zero-filled, so each surviving plane carries its declared slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneKind {
    /// Background tile IDs
    Background,
    /// Foreground tile IDs
    Foreground,
    /// Sprite/object IDs, 0 = empty cell
    Sprite,
}

/// One decompressed map layer: `width * height` words, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plane {
    /// Which declared plane slot this layer came from
    pub kind: PlaneKind,
    /// Cell values, row-major (y-major, x-minor)
    pub words: Vec<u16>,
}

/// A fully decoded Galaxy map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalaxyMap {
    /// Map width in tiles
    pub width: u16,
    /// Map height in tiles
    pub height: u16,
    /// Map name from the header, trailing NUL padding trimmed
    pub name: String,
    /// Present planes in declared order (background, foreground, sprite);
    /// absent planes are omitted, so this holds 0 to 3 entries
    pub planes: Vec<Plane>,
}

impl GalaxyMap {
    /// Look up a plane by kind, if the map stores it.
    pub fn plane(&self, kind: PlaneKind) -> Option<&Plane> {
        self.planes.iter().find(|p| p.kind == kind)
    }
}

/// Number of map slots the index file holds.
pub fn slot_count(index: &[u8]) -> usize {
    index.len().saturating_sub(INDEX_BASE) / 4
}

/// Decode one map from a Galaxy archive.
///
/// `data` is the whole data file, `index` the whole index file. Returns
/// `Ok(None)` when the slot's index entry is the zero sentinel (an empty
/// slot is a normal outcome, not an error). A `map_number` outside the
/// index file's slot range is [`MapError::InvalidMapIndex`].
pub fn decode_galaxy_map(data: &[u8], index: &[u8], map_number: usize) -> Result<Option<GalaxyMap>> {
    let entry = INDEX_BASE + map_number * 4;
    if entry + 4 > index.len() {
        return Err(MapError::InvalidMapIndex {
            requested: map_number,
            slots: slot_count(index),
        });
    }
    let map_offset = read_u32_le(index, entry, Stage::GalaxyHeader)? as usize;
    if map_offset == 0 {
        return Ok(None);
    }

    // Offsets first as a block of 3x4 bytes, then lengths as a block of
    // 3x2 bytes; a length slot is occupied even when its offset is zero.
    let mut descriptors = [(0usize, 0usize); MAX_PLANES];
    for (i, d) in descriptors.iter_mut().enumerate() {
        let offset = read_u32_le(data, map_offset + i * 4, Stage::GalaxyHeader)? as usize;
        let length = read_u16_le(data, map_offset + 12 + i * 2, Stage::GalaxyHeader)? as usize;
        *d = (offset, length);
    }

    let width = read_u16_le(data, map_offset + 18, Stage::GalaxyHeader)?;
    let height = read_u16_le(data, map_offset + 20, Stage::GalaxyHeader)?;
    let name = match data.get(map_offset + 22..map_offset + 22 + NAME_LEN) {
        Some(bytes) => decode_name(bytes),
        None => {
            return Err(MapError::TruncatedInput {
                stage: Stage::GalaxyHeader,
                offset: map_offset + 22,
            })
        }
    };

    const KINDS: [PlaneKind; MAX_PLANES] =
        [PlaneKind::Background, PlaneKind::Foreground, PlaneKind::Sprite];

    let mut planes = Vec::with_capacity(MAX_PLANES);
    for (&(offset, length), &kind) in descriptors.iter().zip(KINDS.iter()) {
        if offset == 0 {
            continue;
        }
        let compressed = data.get(offset..offset + length).ok_or(MapError::TruncatedInput {
            stage: Stage::GalaxyHeader,
            offset,
        })?;
        let halfcomp = carmack::decode(compressed)?;
        let words = rlew::decode(&halfcomp)?;
        planes.push(Plane { kind, words });
    }

    Ok(Some(GalaxyMap {
        width,
        height,
        name,
        planes,
    }))
}

/// Map each header byte to one character and trim trailing NUL padding.
fn decode_name(bytes: &[u8]) -> String {
    let name: String = bytes.iter().map(|&b| b as char).collect();
    name.trim_end_matches('\0').to_string()
}
