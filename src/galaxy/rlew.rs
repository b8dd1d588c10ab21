//! RLEW run-length expansion
//!
//! Second stage of the Galaxy plane pipeline: expands the word stream
//! produced by [`super::carmack`] into the final flat plane. The first word
//! is the decompressed size in bytes; from index 1 onward, the marker word
//! `0xABCD` introduces a three-word run record `{marker, count, value}` and
//! any other word is a literal emitted once.

use crate::common::RLEW_MARKER;
use crate::{MapError, Result, Stage};

/// Expand an RLEW-compressed word stream.
///
/// Output length is fixed at `words[0] / 2` elements. A run that would
/// write past that length, or a stream that ends before filling it, is a
/// corruption error. Words past the point where the output fills up are
/// ignored, matching the original decoder.
pub fn decode(words: &[u16]) -> Result<Vec<u16>> {
    let declared_bytes = match words.first() {
        Some(&w) => w as usize,
        None => {
            return Err(MapError::TruncatedInput {
                stage: Stage::Rlew,
                offset: 0,
            })
        }
    };
    let word_count = declared_bytes / 2;

    let mut out: Vec<u16> = Vec::with_capacity(word_count);
    let mut pos = 1;

    while out.len() < word_count {
        let current = read_word(words, pos)?;
        if current == RLEW_MARKER {
            let count = read_word(words, pos + 1)? as usize;
            let value = read_word(words, pos + 2)?;
            if out.len() + count > word_count {
                return Err(MapError::DeclaredSizeExceeded {
                    stage: Stage::Rlew,
                    offset: pos * 2,
                    declared: word_count,
                });
            }
            out.extend(std::iter::repeat(value).take(count));
            pos += 3;
        } else {
            out.push(current);
            pos += 1;
        }
    }

    Ok(out)
}

fn read_word(words: &[u16], pos: usize) -> Result<u16> {
    words.get(pos).copied().ok_or(MapError::TruncatedInput {
        stage: Stage::Rlew,
        // offsets are reported in bytes across all stages
        offset: pos * 2,
    })
}
