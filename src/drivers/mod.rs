// Output side of the pipeline: the framebuffer and the panel seam.
//
// The panel driver itself (SPI, busy pin, refresh waveforms) lives
// outside this crate; it only has to implement `Panel`.

pub mod canvas;
pub mod panel;

pub use canvas::{Canvas, Frame};
pub use panel::Panel;
