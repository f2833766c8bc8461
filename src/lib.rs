// Streaming dither-and-caption renderer for 1-bit e-paper panels

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod board;
pub mod drivers;
pub mod error;
pub mod fonts;
pub mod render;
pub mod ui;

pub use board::RenderConfig;
pub use drivers::{Canvas, Frame, Panel};
pub use error::RenderError;
pub use render::{Caption, DecodeEvent, Feeder, RenderSession, SessionState};
