//! Galaxy engine map format
//!
//! The Galaxy archive is split across two files: an index file ("maphead")
//! mapping map numbers to byte offsets, and a data file ("gamemaps")
//! holding per-map headers and compressed planes. Each plane is compressed
//! twice: Carmack back-reference coding over RLEW run-length coding. The
//! two stages stay independent pure functions; fixtures are naturally
//! staged at the intermediate word array.

pub mod carmack;
pub mod map;
pub mod rlew;

pub use map::{decode_galaxy_map, slot_count, GalaxyMap, Plane, PlaneKind};

/// Byte offset of the first index entry (two reserved bytes precede it)
pub const INDEX_BASE: usize = 2;

/// Maximum number of planes a Galaxy map header declares
pub const MAX_PLANES: usize = 3;

/// Length of the fixed name field in a map header
pub const NAME_LEN: usize = 16;
