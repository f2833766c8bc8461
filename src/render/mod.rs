// Image-to-monochrome render pipeline.
// event:   decoder event stream (Start / Pixel / End / Error)
// dither:  Floyd-Steinberg error diffusion to 1 bit
// caption: title / number / alt text for one render
// session: per-refresh state machine; owns canvas and error rows
// feed:    byte source -> decoder -> session pump with backpressure

pub mod caption;
pub mod dither;
pub mod event;
pub mod feed;
pub mod session;

pub use caption::Caption;
pub use dither::{DitherLines, dither_pixel, luminance};
pub use event::DecodeEvent;
pub use feed::{ByteSource, FEED_BUF, Feeder, StreamDecoder};
pub use session::{ImagePlacement, RenderSession, SessionState};
