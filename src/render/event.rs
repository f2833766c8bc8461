// Events emitted by a streaming image decoder.

extern crate alloc;

use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeEvent {
    /// Header parsed; image dimensions known
    Start { width: u32, height: u32 },
    /// One decoded pixel, in raster order. `w`/`h` are the block size the
    /// decoder reports for the pixel and are informational only.
    Pixel {
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        rgba: [u8; 4],
    },
    /// Stream complete
    End,
    /// Decoder rejected the stream
    Error { message: String },
}

impl DecodeEvent {
    pub const fn pixel(x: u32, y: u32, rgba: [u8; 4]) -> Self {
        DecodeEvent::Pixel {
            x,
            y,
            w: 1,
            h: 1,
            rgba,
        }
    }
}

impl fmt::Display for DecodeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeEvent::Start { width, height } => write!(f, "Start({}x{})", width, height),
            DecodeEvent::Pixel { x, y, .. } => write!(f, "Pixel({}, {})", x, y),
            DecodeEvent::End => write!(f, "End"),
            DecodeEvent::Error { message } => write!(f, "Error({})", message),
        }
    }
}
