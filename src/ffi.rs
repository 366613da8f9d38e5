//! Foreign function interface.

use std::ffi::CStr;
use std::fs::File;
use std::path::Path;
use std::ptr;
use std::slice;
use libc::{c_char,c_uint,size_t};

use crate::LzpFile;
use crate::codec::decompress;
use crate::palette::SIZE_OF_PALETTE;

// Print with "file:line - " prefix, for more informative error messages.
// C callers have no Rust logger, so this goes to stderr.
macro_rules! printerrorln {
    ($e:expr) => {
        eprintln!("{}:{} - {}", file!(), line!(), $e);
    };
}

/// Copy a result into a caller supplied buffer.
///
/// Returns 0 on success, or 2 if the buffer is too small.  The
/// required size is written to `out_len` in both cases.
fn write_output(file: &'static str, line: u32,
        src: &[u8], out_buf: *mut u8, max_len: size_t, out_len: *mut size_t)
        -> c_uint {
    unsafe{ ptr::write(out_len, src.len()) };
    if src.len() <= max_len {
        let dst_slice = unsafe{ slice::from_raw_parts_mut(out_buf, max_len) };
        dst_slice[0..src.len()].copy_from_slice(src);
        0
    } else {
        eprintln!("{}:{} - output buffer too small", file, line);
        2
    }
}

/*--------------------------------------------------------------*/
/* Codec                                                        */
/*--------------------------------------------------------------*/

/// Decompress an LZP frame payload.
#[no_mangle]
pub extern "C" fn lzprs_decompress(
        src: *const u8, src_len: size_t,
        out_buf: *mut u8, max_len: size_t, out_len: *mut size_t)
        -> c_uint {
    if src.is_null() || out_buf.is_null() || out_len.is_null() {
        printerrorln!("bad input parameters");
        return 1;
    }

    let src_slice = unsafe{ slice::from_raw_parts(src, src_len) };
    match decompress(src_slice) {
        Ok(pixels) => write_output(file!(), line!(), &pixels, out_buf, max_len, out_len),
        Err(e) => {
            printerrorln!(e);
            1
        },
    }
}

/*--------------------------------------------------------------*/
/* LZP                                                          */
/*--------------------------------------------------------------*/

/// Open an LZP file.
#[no_mangle]
pub extern "C" fn lzprs_open(filename: *const c_char)
        -> *mut LzpFile<File> {
    if filename.is_null() {
        printerrorln!("bad input parameters");
        return ptr::null_mut();
    }

    let cstr = unsafe{ CStr::from_ptr(filename) };
    match cstr.to_str() {
        Ok(s) => match LzpFile::open(Path::new(s)) {
            Ok(f) => Box::into_raw(Box::new(f)),
            Err(e) => {
                printerrorln!(e);
                ptr::null_mut()
            },
        },
        Err(e) => {
            printerrorln!(e);
            ptr::null_mut()
        },
    }
}

/// Close an LZP file.
#[no_mangle]
pub extern "C" fn lzprs_close(lzp: *mut LzpFile<File>) {
    if lzp.is_null() {
        return;
    }

    let _lzp = unsafe{ Box::from_raw(lzp) };
}

/// Get the frame count.
#[no_mangle]
pub extern "C" fn lzprs_frame_count(lzp: *const LzpFile<File>)
        -> c_uint {
    if lzp.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let lzp = unsafe{ &*lzp };
    lzp.frame_count() as c_uint
}

/// Get the frame width.
#[no_mangle]
pub extern "C" fn lzprs_width(lzp: *const LzpFile<File>)
        -> c_uint {
    if lzp.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let lzp = unsafe{ &*lzp };
    lzp.width() as c_uint
}

/// Get the frame height.
#[no_mangle]
pub extern "C" fn lzprs_height(lzp: *const LzpFile<File>)
        -> c_uint {
    if lzp.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let lzp = unsafe{ &*lzp };
    lzp.height() as c_uint
}

/// Number of frames per second during playback.
#[no_mangle]
pub extern "C" fn lzprs_frame_rate(lzp: *const LzpFile<File>)
        -> c_uint {
    if lzp.is_null() {
        printerrorln!("bad input parameters");
        return 0;
    }

    let lzp = unsafe{ &*lzp };
    lzp.frame_rate() as c_uint
}

/// Copy the 768 byte palette into `out_buf`.
#[no_mangle]
pub extern "C" fn lzprs_palette(
        lzp: *const LzpFile<File>, out_buf: *mut u8, max_len: size_t)
        -> c_uint {
    if lzp.is_null() || out_buf.is_null() {
        printerrorln!("bad input parameters");
        return 1;
    }

    if max_len < SIZE_OF_PALETTE {
        printerrorln!("output buffer too small");
        return 2;
    }

    let lzp = unsafe{ &*lzp };
    let dst_slice = unsafe{ slice::from_raw_parts_mut(out_buf, SIZE_OF_PALETTE) };
    dst_slice.copy_from_slice(lzp.palette().as_bytes());
    0
}

/// Decode a frame into `out_buf`.
#[no_mangle]
pub extern "C" fn lzprs_decode_frame(
        lzp: *mut LzpFile<File>, idx: size_t,
        out_buf: *mut u8, max_len: size_t, out_len: *mut size_t)
        -> c_uint {
    if lzp.is_null() || out_buf.is_null() || out_len.is_null() {
        printerrorln!("bad input parameters");
        return 1;
    }

    let lzp = unsafe{ &mut *lzp };
    match lzp.decode_frame(idx) {
        Ok(pixels) => write_output(file!(), line!(), &pixels, out_buf, max_len, out_len),
        Err(e) => {
            printerrorln!(e);
            1
        },
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::CString;
    use std::fs;
    use std::path::PathBuf;
    use std::ptr;
    use byteorder::LittleEndian as LE;
    use byteorder::WriteBytesExt;
    use crate::palette::SIZE_OF_PALETTE;
    use super::{lzprs_close,lzprs_decode_frame,lzprs_decompress,lzprs_frame_count,
            lzprs_frame_rate,lzprs_height,lzprs_open,lzprs_palette,lzprs_width};

    /// Write a 4x2 container with one frame to a temporary file.
    fn write_lzp(name: &str) -> PathBuf {
        let mut buf = Vec::new();
        buf.write_u32::<LE>(1).expect("frames");
        buf.write_u32::<LE>(4).expect("width");
        buf.write_u32::<LE>(2).expect("height");
        buf.write_u32::<LE>(12).expect("frame rate");
        buf.extend_from_slice(&[0; 16]);
        buf.extend((0..SIZE_OF_PALETTE).map(|i| (i / 3) as u8));

        let offset = buf.len() as u32;
        let payload = [ 0x03, 0x10, 0x20, 0xEF, 0xF2 ];
        buf.write_u32::<LE>(payload.len() as u32).expect("length");
        buf.extend_from_slice(&payload);
        buf.write_u32::<LE>(offset).expect("offset");

        let path = std::env::temp_dir().join(
                format!("lzprs-{}-{}.lzp", name, std::process::id()));
        fs::write(&path, &buf).expect("write");
        path
    }

    #[test]
    fn test_lzprs_decompress() {
        let src = [ 0x03, 0x10, 0x20, 0xEF, 0xF2 ];
        let mut out = [0; 16];
        let mut out_len = 0;

        let res = lzprs_decompress(src.as_ptr(), src.len(),
                out.as_mut_ptr(), out.len(), &mut out_len);
        assert_eq!(res, 0);
        assert_eq!(out_len, 7);
        assert_eq!(&out[0..7], &[0x10, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20]);
    }

    #[test]
    fn test_lzprs_decompress_buffer_too_small() {
        let src = [ 0x03, 0x10, 0x20, 0xEF, 0xF2 ];
        let mut out = [0; 4];
        let mut out_len = 0;

        let res = lzprs_decompress(src.as_ptr(), src.len(),
                out.as_mut_ptr(), out.len(), &mut out_len);
        assert_eq!(res, 2);
        assert_eq!(out_len, 7);
    }

    #[test]
    fn test_lzprs_file() {
        let path = write_lzp("file");
        let cpath = CString::new(path.to_str().expect("utf-8")).expect("c string");

        let lzp = lzprs_open(cpath.as_ptr());
        let _ = fs::remove_file(&path);
        assert!(!lzp.is_null());

        assert_eq!(lzprs_frame_count(lzp), 1);
        assert_eq!(lzprs_width(lzp), 4);
        assert_eq!(lzprs_height(lzp), 2);
        assert_eq!(lzprs_frame_rate(lzp), 12);

        // Palette.
        let mut small = [0; 16];
        assert_eq!(lzprs_palette(lzp, small.as_mut_ptr(), small.len()), 2);

        let mut pal = [0; SIZE_OF_PALETTE];
        assert_eq!(lzprs_palette(lzp, pal.as_mut_ptr(), pal.len()), 0);
        assert_eq!(&pal[0..6], &[0, 0, 0, 1, 1, 1]);
        assert_eq!(pal[3 * 255], 255);

        // Frames.
        let mut out = [0; 16];
        let mut out_len = 0;
        assert_eq!(lzprs_decode_frame(lzp, 0,
                out.as_mut_ptr(), out.len(), &mut out_len), 0);
        assert_eq!(out_len, 7);
        assert_eq!(&out[0..7], &[0x10, 0x20, 0x20, 0x20, 0x20, 0x20, 0x20]);

        out_len = 0;
        assert_eq!(lzprs_decode_frame(lzp, 1,
                out.as_mut_ptr(), out.len(), &mut out_len), 1);

        let mut short = [0; 3];
        assert_eq!(lzprs_decode_frame(lzp, 0,
                short.as_mut_ptr(), short.len(), &mut out_len), 2);
        assert_eq!(out_len, 7);

        lzprs_close(lzp);
    }

    #[test]
    fn test_lzprs_bad_input() {
        assert!(lzprs_open(ptr::null()).is_null());
        assert_eq!(lzprs_frame_count(ptr::null()), 0);
    }
}
