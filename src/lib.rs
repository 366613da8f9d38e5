//! This crate provides routines for decoding LZP animation
//! containers: a palette, followed by frames compressed with a
//! windowed LZSS variant, followed by a frame offset table.

extern crate byteorder;
extern crate libc;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

pub use crate::errcode::DecodeError;
pub use crate::errcode::LzpError;
pub use crate::errcode::LzpResult;
pub use crate::lzp::LzpFile;
pub use crate::options::DecodeOptions;
pub use crate::options::FrameSizePolicy;
pub use crate::palette::Palette;
pub use crate::palette::Rgb;

pub mod codec;
pub mod errcode;
pub mod ffi;
pub mod lzp;
pub mod options;
pub mod palette;
