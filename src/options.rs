//! Decoder configuration.

use std::fmt;
use std::str::FromStr;

/// What to do when a frame does not decode to exactly width * height
/// pixels.
///
/// The payload carries no pixel count, so decoding ends when the
/// compressed bytes run out, whatever the frame size.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub enum FrameSizePolicy {
    /// Return the decoded pixels unchanged.
    Tolerate,

    /// Fail with `LzpError::WrongFrameSize`.
    Strict,

    /// Truncate, or pad with colour 0, to width * height.
    Fit,
}

/// Options applied by `LzpFile::decode_frame`.
#[derive(Clone,Copy,Debug,Eq,PartialEq)]
pub struct DecodeOptions {
    pub frame_size: FrameSizePolicy,
}

impl Default for FrameSizePolicy {
    fn default() -> Self {
        FrameSizePolicy::Tolerate
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            frame_size: FrameSizePolicy::default(),
        }
    }
}

impl DecodeOptions {
    /// Options with the given frame size policy.
    pub fn with_frame_size(mut self, frame_size: FrameSizePolicy) -> Self {
        self.frame_size = frame_size;
        self
    }
}

impl fmt::Display for FrameSizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        use self::FrameSizePolicy::*;
        match *self {
            Tolerate => write!(f, "tolerate"),
            Strict => write!(f, "strict"),
            Fit => write!(f, "fit"),
        }
    }
}

impl FromStr for FrameSizePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "tolerate" => Ok(FrameSizePolicy::Tolerate),
            "strict" => Ok(FrameSizePolicy::Strict),
            "fit" => Ok(FrameSizePolicy::Fit),
            _ => Err(format!("unknown frame size policy '{}'", s)),
        }
    }
}
