//! Classic run-length decompression
//!
//! A Classic map file opens with a 32-bit little-endian size of the
//! payload that follows. The first four bytes are copied to the output
//! verbatim (they are re-read as header fields by the map decoder), then
//! the payload is scanned as 2-byte words: the marker word `0xFE 0xFE`
//! introduces a repeat record `{count, value}`, any other word is copied
//! as-is. The scan continues while the payload cursor is `<= declared`,
//! matching the original decoder's loop bound.

use crate::common::{read_u16_le, read_u32_le, CLASSIC_MARKER};
use crate::{MapError, Result, Stage};

/// Byte length of the declared-size field a Classic file opens with
pub const HEADER_LEN: usize = 4;

/// Decompress a whole Classic map file into its in-memory form.
///
/// The output grows dynamically; the expansion ratio is data-dependent. A
/// buffer that ends before the declared payload size is consumed is
/// [`MapError::UnexpectedEof`].
pub fn decompress(input: &[u8]) -> Result<Vec<u8>> {
    let declared = read_u32_le(input, 0, Stage::ClassicRle)? as usize;

    let mut out = Vec::with_capacity(HEADER_LEN + declared);
    out.extend_from_slice(&input[..HEADER_LEN]);

    let mut pos = 0usize;
    while pos <= declared {
        let at = HEADER_LEN + pos;
        if at + 2 > input.len() {
            // The loop bound admits one read starting exactly at the
            // declared size; files trimmed to the payload simply end here.
            if pos >= declared {
                break;
            }
            return Err(MapError::UnexpectedEof {
                stage: Stage::ClassicRle,
                declared,
                actual: input.len().saturating_sub(HEADER_LEN),
            });
        }
        let word = [input[at], input[at + 1]];
        pos += 2;

        if word == CLASSIC_MARKER {
            let count = read_u16_le(input, HEADER_LEN + pos, Stage::ClassicRle)? as usize;
            pos += 2;
            let value = match input.get(HEADER_LEN + pos..HEADER_LEN + pos + 2) {
                Some(v) => [v[0], v[1]],
                None => {
                    return Err(MapError::TruncatedInput {
                        stage: Stage::ClassicRle,
                        offset: HEADER_LEN + pos,
                    })
                }
            };
            pos += 2;
            for _ in 0..count {
                out.extend_from_slice(&value);
            }
        } else {
            out.extend_from_slice(&word);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(payload: &[u8]) -> Vec<u8> {
        let mut v = (payload.len() as u32).to_le_bytes().to_vec();
        v.extend_from_slice(payload);
        v
    }

    #[test]
    fn test_verbatim_payload_passes_through() {
        let input = file(&[0x01, 0x00, 0x02, 0x00, 0x03, 0x00]);
        assert_eq!(decompress(&input).unwrap(), input);
    }

    #[test]
    fn test_repeat_record_expands() {
        let input = file(&[0xFE, 0xFE, 0x03, 0x00, 0xAB, 0xCD]);
        let out = decompress(&input).unwrap();
        assert_eq!(&out[..4], &input[..4]);
        assert_eq!(&out[4..], &[0xAB, 0xCD, 0xAB, 0xCD, 0xAB, 0xCD]);
    }

    #[test]
    fn test_mixed_literals_and_records() {
        let input = file(&[0x11, 0x22, 0xFE, 0xFE, 0x02, 0x00, 0x99, 0x88, 0x33, 0x44]);
        let out = decompress(&input).unwrap();
        assert_eq!(&out[4..], &[0x11, 0x22, 0x99, 0x88, 0x99, 0x88, 0x33, 0x44]);
    }

    #[test]
    fn test_truncated_payload() {
        let mut input = file(&[0x01, 0x00, 0x02, 0x00]);
        input.truncate(input.len() - 1);
        assert!(matches!(
            decompress(&input),
            Err(MapError::UnexpectedEof { stage: Stage::ClassicRle, .. })
        ));
    }

    #[test]
    fn test_truncated_repeat_record() {
        let input = file(&[0xFE, 0xFE, 0x05]);
        assert!(decompress(&input).is_err());
    }

    #[test]
    fn test_missing_header() {
        assert!(matches!(
            decompress(&[0x00, 0x00]),
            Err(MapError::TruncatedInput { stage: Stage::ClassicRle, .. })
        ));
    }
}
