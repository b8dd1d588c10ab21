//! keenmaps - Decoder and encoder for Commander Keen map formats
//!
//! This crate recovers tile and sprite layers from the on-disk level
//! formats of the Commander Keen family (1990s DOS era). The "Galaxy"
//! engine (Keen 4-6) stores maps in a two-file archive whose planes are
//! compressed twice, Carmack back-reference coding over RLEW run-length
//! coding; the earlier "Classic" engine (Keen 1-3) stores one map per file
//! behind a single run-length stage, and for that family edited maps can
//! be re-encoded back to the original binary layout.
//!
//! # Features
//!
//! - Galaxy archive decoding: maphead index + gamemaps headers + the
//!   Carmack and RLEW stages as independently usable pure functions
//! - Classic map decoding and uncompressed re-encoding
//! - Typed errors naming the failing stage and byte offset
//! - No I/O: all codecs operate on buffers the caller already owns
//!
//! # Example - Galaxy
//!
//! ```no_run
//! use keenmaps::decode_galaxy_map;
//!
//! let gamemaps = std::fs::read("GAMEMAPS.CK4")?;
//! let maphead = std::fs::read("MAPHEAD.CK4")?;
//!
//! if let Some(map) = decode_galaxy_map(&gamemaps, &maphead, 0)? {
//!     println!("{}: {}x{}, {} planes", map.name, map.width, map.height, map.planes.len());
//! }
//! # Ok::<(), keenmaps::MapError>(())
//! ```
//!
//! # Example - Classic round trip
//!
//! ```no_run
//! use keenmaps::{decode_classic_map, encode_classic_map};
//!
//! let file = std::fs::read("LEVEL01.CK1")?;
//! let mut map = decode_classic_map(&file)?;
//! map.tiles[0] = 7;
//! let rewritten = encode_classic_map(&map)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod classic;
pub mod common;
pub mod error;
pub mod galaxy;
pub mod tables;

// Re-export commonly used types
pub use classic::{decode_classic_map, encode_classic_map, ClassicMap};
pub use common::{MapError, Result, Stage, CARMACK_FAR, CARMACK_NEAR, CLASSIC_MARKER, RLEW_MARKER};
pub use galaxy::{decode_galaxy_map, GalaxyMap, Plane, PlaneKind};
