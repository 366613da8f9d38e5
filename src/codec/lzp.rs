//! Codec for LZP frame payloads.

use crate::errcode::DecodeError;
use super::BitStream;

/// Size of the back-reference window.
///
/// Copy commands address the window with 12 bits.  The window is
/// aligned to multiples of 4096 output bytes, so a source position is
/// always within the current block or the one before it.
pub const WINDOW_SIZE: usize = 0x1000;

/// Shortest match a copy command can describe.
pub const MIN_MATCH: usize = 3;

/// Longest match a copy command can describe.
pub const MAX_MATCH: usize = 18;

/// Bias added to the 12-bit address field of a copy command.
pub const ADDRESS_BIAS: usize = 18;

/// A decoded copy command.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub struct CopyCommand {
    /// Number of bytes to copy, from `MIN_MATCH` to `MAX_MATCH`.
    pub length: usize,

    /// Position of the source within its 4096-byte block.
    pub address: usize,
}

impl CopyCommand {
    /// Decode a copy command from its two bytes.
    ///
    /// The low nibble of `hi` holds the length minus 3.  The high
    /// nibble of `hi` and all of `lo` form the 12-bit address field,
    /// stored minus 18.
    pub fn from_bytes(lo: u8, hi: u8) -> Self {
        let length = (hi & 0x0F) as usize + MIN_MATCH;
        let field = (((hi & 0xF0) as usize) << 4) | lo as usize;
        let address = (field + ADDRESS_BIAS) & (WINDOW_SIZE - 1);

        CopyCommand {
            length: length,
            address: address,
        }
    }

    /// Resolve the source position given the current output length.
    ///
    /// The address is placed in the block containing `output_len`.
    /// If that lands beyond the output, the source is in the previous
    /// block.  The result is negative when there is no previous block.
    pub fn source(&self, output_len: usize) -> i64 {
        let base = output_len & !(WINDOW_SIZE - 1);
        let pos = (self.address | base) as i64;
        if pos > output_len as i64 {
            pos - WINDOW_SIZE as i64
        } else {
            pos
        }
    }
}

/// Decompress an LZP frame payload into pixel indices.
///
/// The payload is a sequence of groups.  Each group begins with a
/// mask byte, whose bits are read from least significant to most
/// significant.  A set bit is followed by one literal byte.  A clear
/// bit is followed by a two byte copy command (see `CopyCommand`).
///
/// Copies are performed one byte at a time, so a source that overlaps
/// the bytes being written repeats them.
///
/// Decoding stops as soon as the payload is exhausted, which may be
/// in the middle of a group.
///
/// # Examples
///
/// ```
/// let src = [ 0xFF, 1, 2, 3, 4, 5, 6, 7, 8 ];
/// let out = lzp::codec::decompress(&src).unwrap();
/// assert_eq!(out, vec![1, 2, 3, 4, 5, 6, 7, 8]);
/// ```
pub fn decompress(src: &[u8])
        -> Result<Vec<u8>, DecodeError> {
    decompress_with_capacity(src, 0)
}

/// Decompress an LZP frame payload, reserving `capacity` bytes of
/// output up front.
pub fn decompress_with_capacity(src: &[u8], capacity: usize)
        -> Result<Vec<u8>, DecodeError> {
    let mut r = BitStream::new(src);
    let mut out = Vec::with_capacity(capacity);

    while let Some(mut mask) = r.read_u8() {
        for _ in 0..8 {
            if mask & 1 != 0 {
                match r.read_u8() {
                    Some(c) => out.push(c),
                    None => {
                        warn!("Payload ends after mask byte at offset {}",
                                r.position() - 1);
                        break;
                    },
                }
            } else {
                let remaining = r.remaining();
                match r.read_copy_command() {
                    Some((lo, hi)) =>
                        copy_match(&mut out, CopyCommand::from_bytes(lo, hi))?,
                    None => {
                        if remaining > 0 {
                            warn!("Payload ends inside a copy command at offset {}",
                                    r.position() - remaining);
                        }
                        break;
                    },
                }
            }

            if r.is_empty() {
                break;
            }

            mask = mask >> 1;
        }
    }

    Ok(out)
}

/// Append a match to the output, one byte at a time.
fn copy_match(out: &mut Vec<u8>, cmd: CopyCommand)
        -> Result<(), DecodeError> {
    let mut pos = cmd.source(out.len());

    for _ in 0..cmd.length {
        if pos < 0 || pos as usize >= out.len() {
            return Err(DecodeError::BadBackReference(pos, out.len()));
        }

        let c = out[pos as usize];
        out.push(c);
        pos = pos + 1;
    }

    Ok(())
}
