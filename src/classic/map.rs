//! Classic map header slicing and encoding
//!
//! Operates on the decompressed form produced by [`super::rle`]. Header
//! layout (all fields little-endian, offsets from the start of the
//! decompressed buffer):
//!
//! | offset | len | field                                          |
//! |--------|-----|------------------------------------------------|
//! | 0      | 4   | declared payload size                          |
//! | 4      | 2   | width in tiles                                 |
//! | 6      | 2   | height in tiles                                |
//! | 8      | 2   | plane count (always 2)                         |
//! | 18     | 2   | plane byte size, `width*height*2` rounded to 16 |
//! | 36     |     | tile plane                                     |
//! | 36+psz |     | sprite plane                                   |
//!
//! The encoder always stores planes uncompressed. The original format's
//! compressor is asymmetric (decoders only require valid decompression),
//! and that behavior is preserved here.

use super::rle;
use crate::common::read_u16_le;
use crate::{MapError, Result, Stage};

/// Byte offset of the width field
pub const WIDTH_OFFSET: usize = 4;

/// Byte offset of the height field
pub const HEIGHT_OFFSET: usize = 6;

/// Byte offset of the plane count field
pub const PLANE_COUNT_OFFSET: usize = 8;

/// Byte offset of the plane byte size field
pub const PLANE_SIZE_OFFSET: usize = 18;

/// Byte offset of the tile plane
pub const TILE_PLANE_OFFSET: usize = 36;

/// Number of planes a Classic map stores
pub const PLANE_COUNT: u16 = 2;

/// A decoded Classic map: tile and sprite grids plus dimensions.
///
/// Grids are flat row-major `width * height` word arrays owned by the map;
/// sprite value 0 means an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassicMap {
    /// Map width in tiles
    pub width: u16,
    /// Map height in tiles
    pub height: u16,
    /// Tile IDs, row-major
    pub tiles: Vec<u16>,
    /// Sprite IDs, row-major, 0 = empty
    pub sprites: Vec<u16>,
}

impl ClassicMap {
    /// Build a map from grids, validating both against the dimensions.
    pub fn new(width: u16, height: u16, tiles: Vec<u16>, sprites: Vec<u16>) -> Result<Self> {
        let cells = width as usize * height as usize;
        for plane in [&tiles, &sprites] {
            if plane.len() != cells {
                return Err(MapError::PlaneSizeMismatch {
                    expected: cells,
                    actual: plane.len(),
                });
            }
        }
        Ok(Self {
            width,
            height,
            tiles,
            sprites,
        })
    }

    /// Tile ID at `(x, y)`, or `None` outside the map.
    pub fn get_tile(&self, x: usize, y: usize) -> Option<u16> {
        self.cell(&self.tiles, x, y)
    }

    /// Sprite ID at `(x, y)`, or `None` outside the map.
    pub fn get_sprite(&self, x: usize, y: usize) -> Option<u16> {
        self.cell(&self.sprites, x, y)
    }

    fn cell(&self, plane: &[u16], x: usize, y: usize) -> Option<u16> {
        if x >= self.width as usize || y >= self.height as usize {
            return None;
        }
        plane.get(y * self.width as usize + x).copied()
    }
}

/// Slice a decompressed Classic buffer into tile and sprite grids.
pub fn decode(buf: &[u8]) -> Result<ClassicMap> {
    let width = read_u16_le(buf, WIDTH_OFFSET, Stage::ClassicHeader)?;
    let height = read_u16_le(buf, HEIGHT_OFFSET, Stage::ClassicHeader)?;
    let plane_size = read_u16_le(buf, PLANE_SIZE_OFFSET, Stage::ClassicHeader)? as usize;
    let cells = width as usize * height as usize;

    let tiles = read_plane(buf, TILE_PLANE_OFFSET, cells)?;
    let sprites = read_plane(buf, TILE_PLANE_OFFSET + plane_size, cells)?;

    Ok(ClassicMap {
        width,
        height,
        tiles,
        sprites,
    })
}

fn read_plane(buf: &[u8], base: usize, cells: usize) -> Result<Vec<u16>> {
    let mut plane = Vec::with_capacity(cells);
    for i in 0..cells {
        plane.push(read_u16_le(buf, base + i * 2, Stage::ClassicHeader)?);
    }
    Ok(plane)
}

/// Encode a Classic map back to its on-disk layout, stored uncompressed.
///
/// Both planes are padded to the rounded plane byte size, so the file is
/// `36 + 2 * planeByteSize` bytes with the declared size field covering
/// everything after the leading dword. The sprite plane lands at byte
/// `32 + planeByteSize + 4`, the exact base the original header layout
/// uses for the second plane. A map whose rounded plane size does not fit
/// the 16-bit header field is rejected rather than truncated.
pub fn encode(map: &ClassicMap) -> Result<Vec<u8>> {
    let cells = map.width as usize * map.height as usize;
    for plane in [&map.tiles, &map.sprites] {
        if plane.len() != cells {
            return Err(MapError::PlaneSizeMismatch {
                expected: cells,
                actual: plane.len(),
            });
        }
    }

    let plane_size = (cells * 2 + 15) & !15;
    if plane_size > u16::MAX as usize {
        return Err(MapError::PlaneTooLarge {
            bytes: plane_size,
            max: u16::MAX as usize,
        });
    }
    let total = TILE_PLANE_OFFSET + 2 * plane_size;

    let mut out = vec![0u8; total];
    write_u32(&mut out, 0, (total - rle::HEADER_LEN) as u32);
    write_u16(&mut out, WIDTH_OFFSET, map.width);
    write_u16(&mut out, HEIGHT_OFFSET, map.height);
    write_u16(&mut out, PLANE_COUNT_OFFSET, PLANE_COUNT);
    write_u16(&mut out, PLANE_SIZE_OFFSET, plane_size as u16);

    let mut offset = TILE_PLANE_OFFSET;
    for &tile in &map.tiles {
        write_u16(&mut out, offset, tile);
        offset += 2;
    }

    offset = 32 + plane_size + 4;
    for &sprite in &map.sprites {
        write_u16(&mut out, offset, sprite);
        offset += 2;
    }

    Ok(out)
}

fn write_u16(buf: &mut [u8], offset: usize, value: u16) {
    buf[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
}

fn write_u32(buf: &mut [u8], offset: usize, value: u32) {
    buf[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructor_validates_grids() {
        assert!(ClassicMap::new(2, 2, vec![1, 2, 3, 4], vec![0; 4]).is_ok());
        assert!(matches!(
            ClassicMap::new(2, 2, vec![1, 2, 3], vec![0; 4]),
            Err(MapError::PlaneSizeMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_cell_accessors() {
        let map = ClassicMap::new(2, 2, vec![1, 2, 3, 4], vec![0, 0, 0, 5]).unwrap();
        assert_eq!(map.get_tile(1, 0), Some(2));
        assert_eq!(map.get_tile(0, 1), Some(3));
        assert_eq!(map.get_sprite(1, 1), Some(5));
        assert_eq!(map.get_tile(2, 0), None);
        assert_eq!(map.get_sprite(0, 2), None);
    }

    #[test]
    fn test_encode_header_fields() {
        let map = ClassicMap::new(2, 2, vec![1, 2, 3, 4], vec![0, 0, 0, 5]).unwrap();
        let out = encode(&map).unwrap();
        // 8 tile bytes round up to a 16-byte plane
        assert_eq!(out.len(), 36 + 2 * 16);
        assert_eq!(u32::from_le_bytes(out[0..4].try_into().unwrap()) as usize, out.len() - 4);
        assert_eq!(u16::from_le_bytes(out[4..6].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(out[6..8].try_into().unwrap()), 2);
        assert_eq!(u16::from_le_bytes(out[8..10].try_into().unwrap()), PLANE_COUNT);
        assert_eq!(u16::from_le_bytes(out[18..20].try_into().unwrap()), 16);
        // tile plane at 36, sprite plane at 32 + 16 + 4
        assert_eq!(u16::from_le_bytes(out[36..38].try_into().unwrap()), 1);
        assert_eq!(u16::from_le_bytes(out[52..54].try_into().unwrap()), 0);
        assert_eq!(u16::from_le_bytes(out[58..60].try_into().unwrap()), 5);
    }

    #[test]
    fn test_encode_decode_identity() {
        let map = ClassicMap::new(2, 2, vec![1, 2, 3, 4], vec![0, 0, 0, 5]).unwrap();
        let decoded = decode(&encode(&map).unwrap()).unwrap();
        assert_eq!(decoded, map);
    }

    #[test]
    fn test_encode_rejects_plane_size_overflowing_header_field() {
        // 256x256 needs a 131072-byte plane, past what the u16 field holds
        let cells = 256 * 256;
        let map = ClassicMap::new(256, 256, vec![1; cells], vec![0; cells]).unwrap();
        assert!(matches!(
            encode(&map),
            Err(MapError::PlaneTooLarge { bytes: 131072, .. })
        ));
    }

    #[test]
    fn test_encode_largest_plane_that_fits() {
        // 128x256 would need a 65536-byte plane; one row shorter fits
        let cells = 128 * 255;
        let map = ClassicMap::new(128, 255, vec![2; cells], vec![0; cells]).unwrap();
        let encoded = encode(&map).unwrap();
        assert_eq!(
            u16::from_le_bytes(encoded[PLANE_SIZE_OFFSET..PLANE_SIZE_OFFSET + 2].try_into().unwrap()),
            (cells * 2) as u16
        );
        assert_eq!(decode(&encoded).unwrap(), map);
    }

    #[test]
    fn test_decode_truncated_buffer() {
        let map = ClassicMap::new(2, 2, vec![1, 2, 3, 4], vec![0; 4]).unwrap();
        let mut bytes = encode(&map).unwrap();
        bytes.truncate(40);
        assert!(matches!(
            decode(&bytes),
            Err(MapError::TruncatedInput { stage: Stage::ClassicHeader, .. })
        ));
    }
}
