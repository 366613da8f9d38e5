//! LZP error codes.

use std::io;

pub type LzpResult<T> = Result<T, LzpError>;

quick_error! {
    /// Errors raised while decompressing a single frame payload.
    #[derive(Debug,Clone,PartialEq,Eq)]
    pub enum DecodeError {
        /// A copy command resolved to a position outside the output
        /// produced so far.  The position may be negative.
        BadBackReference(position: i64, output_len: usize) {
            display("Bad back reference to {} with {} bytes decoded",
                    position, output_len)
        }
    }
}

quick_error! {
    /// Errors raised while opening or reading an LZP container.
    #[derive(Debug)]
    pub enum LzpError {
        NoFile {
            display("File not found")
        }
        NotARegularFile {
            display("Not a regular file")
        }
        /// The stream is too short to hold the header, the palette and
        /// the frame offset table.
        BadMagic {
            display("Bad magic")
        }
        /// A frame offset points beyond the data region.
        BadOffsetTable(index: usize, offset: u32, limit: u64) {
            display("Frame table error - frame {} at 0x{:08x}, limit 0x{:08x}",
                    index, offset, limit)
        }
        IndexOutOfRange(index: usize, count: usize) {
            display("Frame {} out of range, {} frames", index, count)
        }
        /// A frame's declared payload length runs past the end of the
        /// stream.
        BadFrameLength(index: usize, offset: u32, length: u32) {
            display("Frame {} at 0x{:08x} has bad length {}",
                    index, offset, length)
        }
        WrongFrameSize(index: usize, expected: usize, actual: usize) {
            display("Frame {} decoded to {} bytes, expected {}",
                    index, actual, expected)
        }
        /// Padding a frame to width * height would need more pixels
        /// than any payload of its length can hold.
        FrameTooLarge(index: usize, frame_size: usize, payload_len: usize) {
            display("Frame {} of {} bytes cannot be padded to {} pixels",
                    index, payload_len, frame_size)
        }
        BadPalette(len: usize) {
            display("Palette must be 768 bytes, got {}", len)
        }
        Decode(err: DecodeError) {
            from()
            cause(err)
            display("Decode error: {}", err)
        }
        Io(err: io::Error) {
            from()
            cause(err)
            display("IO error: {}", err)
        }
    }
}
