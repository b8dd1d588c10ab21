//! Carmack back-reference expansion
//!
//! First stage of the Galaxy plane pipeline: expands a byte stream of
//! variable-width tokens into 16-bit words. Pointer tokens copy words from
//! earlier output, so the output is kept as a growable array addressed by
//! integer indices; a copy region may overlap its own destination (run
//! extension), which the word-at-a-time copy loop makes well-defined.
//!
//! Token shapes, keyed on the second byte of each token:
//!
//! | high byte | low byte | payload            | effect                          |
//! |-----------|----------|--------------------|---------------------------------|
//! | `0xA7`    | `0`      | 1 byte `v`         | literal word `0xA7v` (escape)   |
//! | `0xA7`    | `n > 0`  | 1 byte `shift`     | copy `n` words from `len-shift` |
//! | `0xA8`    | `0`      | 1 byte `v`         | literal word `0xA8v` (escape)   |
//! | `0xA8`    | `n > 0`  | 2 bytes LE `pos`   | copy `n` words from index `pos` |
//! | other     | any      | none               | literal word                    |

use crate::common::{read_u16_le, CARMACK_FAR, CARMACK_NEAR};
use crate::{MapError, Result, Stage};

/// Expand a Carmack-compressed byte stream into 16-bit words.
///
/// The first two bytes are a little-endian byte count declaring the size of
/// the expanded output; the output is pre-sized to `prefix / 2` words and
/// any token that would write past it (or reference a word that was never
/// produced) is a corruption error. The declared count is not validated
/// against the input length here: the first expanded word doubles as the
/// length prefix of the RLEW stage that follows.
pub fn decode(input: &[u8]) -> Result<Vec<u16>> {
    let declared_bytes = read_u16_le(input, 0, Stage::Carmack)? as usize;
    let word_count = declared_bytes / 2;

    let mut out: Vec<u16> = Vec::with_capacity(word_count);
    let mut pos = 2;

    while pos < input.len() {
        let (low, high) = match input.get(pos..pos + 2) {
            Some(t) => (t[0], t[1]),
            None => {
                return Err(MapError::TruncatedInput {
                    stage: Stage::Carmack,
                    offset: pos,
                })
            }
        };

        match high {
            CARMACK_NEAR | CARMACK_FAR if low == 0 => {
                // Escaped literal: the third byte replaces the low byte of
                // a word whose high byte collides with a pointer marker.
                let v = payload_byte(input, pos + 2)?;
                emit(&mut out, u16::from(high) << 8 | u16::from(v), word_count, pos)?;
                pos += 3;
            }
            CARMACK_NEAR => {
                let shift = payload_byte(input, pos + 2)? as usize;
                let start = out.len()
                    .checked_sub(shift)
                    .ok_or(MapError::CorruptBackReference {
                        stage: Stage::Carmack,
                        offset: pos,
                        source_index: shift,
                        produced: out.len(),
                    })?;
                copy_back(&mut out, start, low as usize, word_count, pos)?;
                pos += 3;
            }
            CARMACK_FAR => {
                let start = read_u16_le(input, pos + 2, Stage::Carmack)? as usize;
                copy_back(&mut out, start, low as usize, word_count, pos)?;
                pos += 4;
            }
            _ => {
                emit(&mut out, u16::from(high) << 8 | u16::from(low), word_count, pos)?;
                pos += 2;
            }
        }
    }

    if out.len() != word_count {
        return Err(MapError::UnexpectedEof {
            stage: Stage::Carmack,
            declared: word_count,
            actual: out.len(),
        });
    }

    Ok(out)
}

fn payload_byte(input: &[u8], offset: usize) -> Result<u8> {
    input.get(offset).copied().ok_or(MapError::TruncatedInput {
        stage: Stage::Carmack,
        offset,
    })
}

fn emit(out: &mut Vec<u16>, word: u16, declared: usize, token_offset: usize) -> Result<()> {
    if out.len() >= declared {
        return Err(MapError::DeclaredSizeExceeded {
            stage: Stage::Carmack,
            offset: token_offset,
            declared,
        });
    }
    out.push(word);
    Ok(())
}

/// Copy `count` words starting at output index `start`, one word at a time
/// so the source may overlap the still-growing destination.
fn copy_back(
    out: &mut Vec<u16>,
    start: usize,
    count: usize,
    declared: usize,
    token_offset: usize,
) -> Result<()> {
    for k in 0..count {
        let source = start + k;
        let word = match out.get(source) {
            Some(&w) => w,
            None => {
                return Err(MapError::CorruptBackReference {
                    stage: Stage::Carmack,
                    offset: token_offset,
                    source_index: source,
                    produced: out.len(),
                })
            }
        };
        emit(out, word, declared, token_offset)?;
    }
    Ok(())
}
