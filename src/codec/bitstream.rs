//! Byte cursor over a compressed frame payload.

/// Sequential reader over a frame payload.
///
/// The cursor never reads past the end of the payload; every read
/// reports exhaustion with `None` instead.
pub struct BitStream<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> BitStream<'a> {
    /// Create a cursor at the start of the payload.
    pub fn new(src: &'a [u8]) -> Self {
        BitStream {
            src: src,
            pos: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Declared payload length.
    pub fn len(&self) -> usize {
        self.src.len()
    }

    /// True when every byte of the payload has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.src.len()
    }

    /// Number of bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.src.len() - self.pos
    }

    /// Read the next byte.
    pub fn read_u8(&mut self) -> Option<u8> {
        let b = self.src.get(self.pos).cloned();
        if b.is_some() {
            self.pos = self.pos + 1;
        }
        b
    }

    /// Read the two bytes of a copy command, low byte first.
    ///
    /// If only one byte remains it is consumed and discarded, leaving
    /// the cursor at the end of the payload.
    pub fn read_copy_command(&mut self) -> Option<(u8, u8)> {
        if self.remaining() < 2 {
            self.pos = self.src.len();
            return None;
        }

        let lo = self.src[self.pos];
        let hi = self.src[self.pos + 1];
        self.pos = self.pos + 2;
        Some((lo, hi))
    }
}
