// Text layout for 1-bit e-paper captions.
// Bounded word wrap, per-line centering, glyph blits via the canvas.

pub mod text;

pub use text::{WrappedLines, centered_x, draw_wrapped_text, line_count, wrap_lines};
