// Render error taxonomy.
// Stream-level failures only; clipping and ignored alpha are logged,
// never returned.

extern crate alloc;

use alloc::string::String;
use core::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Malformed, truncated or out-of-order decode stream
    Decode(String),
    /// A buffer allocation failed; names the buffer
    OutOfMemory(&'static str),
    /// The byte source feeding the decoder failed
    Source(String),
}

impl RenderError {
    pub fn decode(msg: impl Into<String>) -> Self {
        RenderError::Decode(msg.into())
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, RenderError::Decode(_))
    }
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Decode(msg) => write!(f, "decode failed: {}", msg),
            RenderError::OutOfMemory(what) => write!(f, "out of memory for {}", what),
            RenderError::Source(msg) => write!(f, "source read failed: {}", msg),
        }
    }
}

impl core::error::Error for RenderError {}
