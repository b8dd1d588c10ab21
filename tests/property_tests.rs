//! Property-based tests for the Keen map codecs
//!
//! These tests use randomized inputs to verify that the decoders reject
//! garbage gracefully (typed errors, never panics) and that the Classic
//! encode/decode pair is a semantic round trip.

use keenmaps::classic::{self, decode_classic_map, encode_classic_map, ClassicMap};
use keenmaps::galaxy::{carmack, decode_galaxy_map, rlew};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_carmack_never_panics(data in prop::collection::vec(any::<u8>(), 0..1000)) {
        // Random bytes are rarely a valid stream, but decoding must only
        // ever return a typed error.
        let _ = carmack::decode(&data);
    }
}

proptest! {
    #[test]
    fn test_rlew_never_panics(words in prop::collection::vec(any::<u16>(), 0..500)) {
        let _ = rlew::decode(&words);
    }
}

proptest! {
    #[test]
    fn test_classic_decompress_never_panics(data in prop::collection::vec(any::<u8>(), 0..1000)) {
        let _ = classic::decompress(&data);
    }
}

proptest! {
    #[test]
    fn test_galaxy_decode_never_panics(
        data in prop::collection::vec(any::<u8>(), 0..400),
        index in prop::collection::vec(any::<u8>(), 0..64),
        slot in 0usize..16,
    ) {
        let _ = decode_galaxy_map(&data, &index, slot);
    }
}

proptest! {
    #[test]
    fn test_carmack_literal_only_streams(
        // high bytes below 0xA7 can never collide with a pointer marker
        words in prop::collection::vec(0u16..0xA700, 1..200)
    ) {
        let mut input = ((words.len() * 2) as u16).to_le_bytes().to_vec();
        for w in &words {
            input.extend_from_slice(&w.to_le_bytes());
        }
        let decoded = carmack::decode(&input).unwrap();
        prop_assert_eq!(decoded, words);
    }
}

proptest! {
    #[test]
    fn test_rlew_run_expansion_length(
        count in 1u16..200,
        value in any::<u16>(),
    ) {
        let declared = count * 2;
        let input = [declared, keenmaps::RLEW_MARKER, count, value];
        let out = rlew::decode(&input).unwrap();
        prop_assert_eq!(out.len(), count as usize);
        prop_assert!(out.iter().all(|&w| w == value));
    }
}

proptest! {
    #[test]
    fn test_classic_round_trip(
        width in 1u16..12,
        height in 1u16..12,
        seed in any::<u64>(),
    ) {
        let cells = width as usize * height as usize;
        // word values below 0x8000 cannot form the 0xFEFE marker, so the
        // uncompressed store survives decompression verbatim
        let mut state = seed;
        let mut next = || {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            ((state >> 33) & 0x7FFF) as u16
        };
        let tiles: Vec<u16> = (0..cells).map(|_| next()).collect();
        let sprites: Vec<u16> = (0..cells).map(|_| next()).collect();

        let map = ClassicMap::new(width, height, tiles, sprites).unwrap();
        let encoded = encode_classic_map(&map).unwrap();
        let decoded = decode_classic_map(&encoded).unwrap();
        prop_assert_eq!(decoded, map);
    }
}
