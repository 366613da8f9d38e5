//! Palette implementation.

use std::fmt;
use std::io::Read;
use std::slice::Chunks;

use crate::{LzpError,LzpResult};

/// Number of colours in a palette.
pub const NUM_COLS: usize = 256;

/// Size of a palette on disk: one R, G, B triple per colour.
pub const SIZE_OF_PALETTE: usize = 3 * NUM_COLS;

/// A palette entry.
#[derive(Clone,Copy,Debug,Default,Eq,PartialEq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A 256 colour palette, read only once loaded.
#[derive(Clone)]
pub struct Palette {
    pal: [u8; SIZE_OF_PALETTE],
}

/// Iterator over the entries of a palette.
pub struct PaletteIter<'a> {
    chunks: Chunks<'a, u8>,
}

/*--------------------------------------------------------------*/

impl Palette {
    /// Create a palette from 768 bytes of R, G, B triples.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut pal = [0; 3 * 256];
    /// pal[3] = 0xFF;
    ///
    /// let palette = lzp::Palette::from_bytes(&pal).unwrap();
    /// assert_eq!(palette.get(1).r, 0xFF);
    /// ```
    pub fn from_bytes(buf: &[u8])
            -> LzpResult<Self> {
        if buf.len() != SIZE_OF_PALETTE {
            return Err(LzpError::BadPalette(buf.len()));
        }

        let mut pal = [0; SIZE_OF_PALETTE];
        pal.copy_from_slice(buf);
        Ok(Palette { pal: pal })
    }

    /// Read a palette from the current position of a reader.
    pub fn read<R: Read>(r: &mut R)
            -> LzpResult<Self> {
        let mut pal = [0; SIZE_OF_PALETTE];
        r.read_exact(&mut pal)?;
        Ok(Palette { pal: pal })
    }

    /// Get a palette entry.
    pub fn get(&self, idx: u8) -> Rgb {
        let i = 3 * idx as usize;
        Rgb {
            r: self.pal[i + 0],
            g: self.pal[i + 1],
            b: self.pal[i + 2],
        }
    }

    /// Iterate over all 256 entries.
    pub fn iter(&self) -> PaletteIter {
        PaletteIter {
            chunks: self.pal.chunks(3),
        }
    }

    /// The palette as 768 bytes of R, G, B triples.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pal[..]
    }

    /// Expand pixel indices into packed RGB24.
    ///
    /// Stops at the shorter of `buf` and `out`, in pixels.
    /// Returns the number of pixels written.
    ///
    /// # Examples
    ///
    /// ```
    /// let mut pal = [0; 3 * 256];
    /// pal[3..6].copy_from_slice(&[1, 2, 3]);
    /// let palette = lzp::Palette::from_bytes(&pal).unwrap();
    ///
    /// let mut out = [0; 6];
    /// palette.expand_rgb24(&[1, 0], &mut out);
    /// assert_eq!(out, [1, 2, 3, 0, 0, 0]);
    /// ```
    pub fn expand_rgb24(&self, buf: &[u8], out: &mut [u8]) -> usize {
        let mut count = 0;
        for (&c, dst) in buf.iter().zip(out.chunks_mut(3)) {
            if dst.len() < 3 {
                break;
            }

            let i = 3 * c as usize;
            dst.copy_from_slice(&self.pal[i..(i + 3)]);
            count = count + 1;
        }
        count
    }
}

impl fmt::Debug for Palette {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> Iterator for PaletteIter<'a> {
    type Item = Rgb;

    fn next(&mut self) -> Option<Rgb> {
        self.chunks.next().map(|c| Rgb { r: c[0], g: c[1], b: c[2] })
    }
}
