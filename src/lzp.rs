//! LZP container implementation.

use std::fs::File;
use std::io::{Read,Seek,SeekFrom};
use std::path::{Path,PathBuf};
use byteorder::LittleEndian as LE;
use byteorder::ReadBytesExt;

use crate::{LzpError,LzpResult};
use crate::codec::decompress_with_capacity;
use crate::options::{DecodeOptions,FrameSizePolicy};
use crate::palette::{Palette,SIZE_OF_PALETTE};

/// Size of the LZP header on disk.
///
/// An LZP container begins with a header, described below.  All
/// values are unsigned little-endian 32-bit words.  There is no
/// signature.
///
///   Offset | Length |    Name    | Description
///   ------:| ------:|:----------:| -----------------------------------
///        0 |      4 |   frames   | Number of frames in the container.
///        4 |      4 |    width   | Frame width in pixels.
///        8 |      4 |   height   | Frame height in pixels.
///       12 |      4 | frame rate | Frames per second during playback.
///       16 |     16 |  reserved  | Unused.
///       32 |    768 |   palette  | 256 R, G, B triples.
///
/// The frames follow the palette.  Each frame is a 4-byte payload
/// length followed by that many bytes of compressed pixels.
///
/// The container ends with the frame offset table: one 4-byte offset
/// per frame, from the start of the container to the frame's payload
/// length.
pub const SIZE_OF_LZP_HEADER: usize = 16;

/// Offset of the palette from the start of the container.
pub const OFFSET_OF_PALETTE: u64 = 0x20;

/// Offset of the first byte following the palette.
pub const OFFSET_OF_DATA: u64 = OFFSET_OF_PALETTE + SIZE_OF_PALETTE as u64;

/// Size of an entry in the frame offset table.
pub const SIZE_OF_FRAME_OFFSET: usize = 4;

/// Size of the length prefix of a frame payload.
pub const SIZE_OF_FRAME_LENGTH: usize = 4;

/// Upper bound on the pixels produced per payload byte.  A copy
/// command of two bytes expands to at most 18 pixels.
const MAX_EXPANSION: usize = 9;

/// LZP container, with exclusive ownership of its reader.
///
/// Frames are read and decoded on demand, in any order.
pub struct LzpFile<R = File> {
    hdr: LzpHeader,
    palette: Palette,
    frame_offsets: Vec<u32>,
    data_end: u64,
    stream_len: u64,
    options: DecodeOptions,

    filename: Option<PathBuf>,
    reader: R,
}

/// LZP header.
struct LzpHeader {
    frame_count: u32,
    w: u32,
    h: u32,
    frame_rate: u32,
}

/*--------------------------------------------------------------*/

impl LzpFile<File> {
    /// Open an LZP file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// lzp::LzpFile::open(Path::new("ex.lzp"));
    /// ```
    pub fn open(filename: &Path)
            -> LzpResult<Self> {
        if !filename.exists() {
            return Err(LzpError::NoFile);
        } else if !filename.is_file() {
            return Err(LzpError::NotARegularFile);
        }

        let file = File::open(filename)?;
        let mut lzp = LzpFile::from_reader(file)?;
        lzp.filename = Some(filename.to_path_buf());
        Ok(lzp)
    }
}

impl<R: Read + Seek> LzpFile<R> {
    /// Read the header, palette and frame offset table from a reader.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::io::Cursor;
    ///
    /// // An empty container: header, palette, no frames.
    /// let mut buf = vec![0; 0x20 + 768];
    /// buf[4] = 32;
    /// buf[8] = 20;
    ///
    /// let lzp = lzp::LzpFile::from_reader(Cursor::new(buf)).unwrap();
    /// assert_eq!(lzp.frame_count(), 0);
    /// assert_eq!(lzp.width(), 32);
    /// ```
    pub fn from_reader(mut reader: R)
            -> LzpResult<Self> {
        let stream_len = reader.seek(SeekFrom::End(0))?;
        if stream_len < OFFSET_OF_DATA {
            return Err(LzpError::BadMagic);
        }

        reader.seek(SeekFrom::Start(0))?;
        let hdr = read_lzp_header(&mut reader)?;

        reader.seek(SeekFrom::Start(OFFSET_OF_PALETTE))?;
        let palette = Palette::read(&mut reader)?;

        let table_size = hdr.frame_count as u64 * SIZE_OF_FRAME_OFFSET as u64;
        if table_size > stream_len - OFFSET_OF_DATA {
            return Err(LzpError::BadMagic);
        }

        let data_end = stream_len - table_size;
        reader.seek(SeekFrom::Start(data_end))?;
        let frame_offsets = read_frame_offsets(&mut reader, &hdr, data_end)?;

        debug!("{}x{}, {}fps, {} frames, frame table at 0x{:08x}",
                hdr.w, hdr.h, hdr.frame_rate, hdr.frame_count, data_end);

        Ok(LzpFile {
            hdr: hdr,
            palette: palette,
            frame_offsets: frame_offsets,
            data_end: data_end,
            stream_len: stream_len,
            options: DecodeOptions::default(),

            filename: None,
            reader: reader,
        })
    }

    /// Read the compressed payload of a frame, without decoding it.
    ///
    /// Payloads can be decoded independently of each other with
    /// `codec::decompress`.
    pub fn read_payload(&mut self, idx: usize)
            -> LzpResult<Vec<u8>> {
        let offset = match self.frame_offsets.get(idx) {
            Some(&o) => o,
            None => return Err(LzpError::IndexOutOfRange(idx, self.frame_offsets.len())),
        };

        self.reader.seek(SeekFrom::Start(offset as u64))?;
        let length = self.reader.read_u32::<LE>()?;

        let end = offset as u64 + SIZE_OF_FRAME_LENGTH as u64 + length as u64;
        if end > self.stream_len {
            return Err(LzpError::BadFrameLength(idx, offset, length));
        }

        let mut buf = vec![0; length as usize];
        self.reader.read_exact(&mut buf)?;
        Ok(buf)
    }

    /// Decode a frame into width * height pixel indices, subject to
    /// the frame size policy.
    ///
    /// Under `FrameSizePolicy::Fit`, a frame is only padded up to the
    /// most pixels its payload could encode.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    ///
    /// if let Ok(ref mut lzp) = lzp::LzpFile::open(Path::new("ex.lzp")) {
    ///     for i in 0..lzp.frame_count() as usize {
    ///         let pixels = lzp.decode_frame(i);
    ///     }
    /// }
    /// ```
    pub fn decode_frame(&mut self, idx: usize)
            -> LzpResult<Vec<u8>> {
        let buf = self.read_payload(idx)?;
        let frame_size = self.frame_size();
        let max_pixels = MAX_EXPANSION * buf.len() + 8;
        let capacity = frame_size.min(max_pixels);
        let mut pixels = decompress_with_capacity(&buf, capacity)?;

        debug!("Frame {} - packed {} bytes, decoded {} bytes",
                idx, buf.len(), pixels.len());

        if pixels.len() != frame_size {
            match self.options.frame_size {
                FrameSizePolicy::Tolerate => (),
                FrameSizePolicy::Strict =>
                    return Err(LzpError::WrongFrameSize(idx, frame_size, pixels.len())),
                FrameSizePolicy::Fit => {
                    if frame_size > max_pixels {
                        return Err(LzpError::FrameTooLarge(idx, frame_size, buf.len()));
                    }
                    pixels.resize(frame_size, 0);
                },
            }
        }

        Ok(pixels)
    }
}

impl<R> LzpFile<R> {
    /// Get the frame count.
    pub fn frame_count(&self) -> u32 {
        self.hdr.frame_count
    }

    /// Get the frame width.
    pub fn width(&self) -> u32 {
        self.hdr.w
    }

    /// Get the frame height.
    pub fn height(&self) -> u32 {
        self.hdr.h
    }

    /// Number of frames per second during playback.
    pub fn frame_rate(&self) -> u32 {
        self.hdr.frame_rate
    }

    /// Number of milliseconds to display each frame during playback.
    /// Zero if the frame rate is zero.
    pub fn frame_duration_msec(&self) -> u32 {
        if self.hdr.frame_rate > 0 {
            1000 / self.hdr.frame_rate
        } else {
            0
        }
    }

    /// Number of pixels in a frame, width * height.
    pub fn frame_size(&self) -> usize {
        (self.hdr.w as usize).saturating_mul(self.hdr.h as usize)
    }

    /// Get the palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Get the frame offset table.
    pub fn frame_offsets(&self) -> &[u32] {
        &self.frame_offsets[..]
    }

    /// Offset of the frame offset table, the end of the frame data.
    pub fn data_end(&self) -> u64 {
        self.data_end
    }

    /// Get the file name, if opened from a path.
    pub fn filename(&self) -> Option<&Path> {
        self.filename.as_ref().map(|p| p.as_path())
    }

    /// Get the decode options.
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Set the decode options.
    pub fn set_options(&mut self, options: DecodeOptions) {
        self.options = options;
    }
}

/*--------------------------------------------------------------*/

/// Read the LZP header.
fn read_lzp_header<R: Read>(r: &mut R)
        -> LzpResult<LzpHeader> {
    let mut buf = [0; SIZE_OF_LZP_HEADER];
    r.read_exact(&mut buf)?;

    let mut r = &buf[..];
    let frame_count = r.read_u32::<LE>()?;
    let w = r.read_u32::<LE>()?;
    let h = r.read_u32::<LE>()?;
    let frame_rate = r.read_u32::<LE>()?;

    Ok(LzpHeader {
        frame_count: frame_count,
        w: w,
        h: h,
        frame_rate: frame_rate,
    })
}

/// Read and validate the frame offset table.
///
/// Offsets need not be ascending.
fn read_frame_offsets<R: Read>(r: &mut R, hdr: &LzpHeader, data_end: u64)
        -> LzpResult<Vec<u32>> {
    let mut offsets = Vec::with_capacity(hdr.frame_count as usize);

    for idx in 0..(hdr.frame_count as usize) {
        let offset = r.read_u32::<LE>()?;
        if offset as u64 > data_end {
            return Err(LzpError::BadOffsetTable(idx, offset, data_end));
        }

        if offsets.last().map_or(false, |&prev| offset < prev) {
            debug!("Frame {} at 0x{:08x} precedes the previous frame", idx, offset);
        }

        offsets.push(offset);
    }

    Ok(offsets)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use byteorder::LittleEndian as LE;
    use byteorder::WriteBytesExt;
    use crate::LzpError;
    use super::{LzpFile,OFFSET_OF_DATA,read_lzp_header};

    #[test]
    fn test_read_lzp_header() {
        let src = [
            0x02, 0x00, 0x00, 0x00, // frames 2
            0x40, 0x01, 0x00, 0x00, // width 320
            0xC8, 0x00, 0x00, 0x00, // height 200
            0x0F, 0x00, 0x00, 0x00, // frame rate 15
        ];

        let hdr = read_lzp_header(&mut &src[..]).expect("header");
        assert_eq!(hdr.frame_count, 2);
        assert_eq!(hdr.w, 320);
        assert_eq!(hdr.h, 200);
        assert_eq!(hdr.frame_rate, 15);
    }

    #[test]
    fn test_short_stream_is_bad_magic() {
        let buf = vec![0; OFFSET_OF_DATA as usize - 1];
        match LzpFile::from_reader(Cursor::new(buf)) {
            Err(LzpError::BadMagic) => (),
            _ => panic!("expected bad magic"),
        }
    }

    #[test]
    fn test_offset_table_overlapping_palette_is_bad_magic() {
        let mut buf = vec![0; OFFSET_OF_DATA as usize + 8];
        (&mut buf[0..4]).write_u32::<LE>(3).expect("frames");

        match LzpFile::from_reader(Cursor::new(buf)) {
            Err(LzpError::BadMagic) => (),
            _ => panic!("expected bad magic"),
        }
    }

    #[test]
    fn test_frame_duration() {
        let mut buf = vec![0; OFFSET_OF_DATA as usize];
        (&mut buf[12..16]).write_u32::<LE>(15).expect("frame rate");
        let lzp = LzpFile::from_reader(Cursor::new(buf)).expect("open");
        assert_eq!(lzp.frame_duration_msec(), 66);

        let buf = vec![0; OFFSET_OF_DATA as usize];
        let lzp = LzpFile::from_reader(Cursor::new(buf)).expect("open");
        assert_eq!(lzp.frame_duration_msec(), 0);
    }
}
