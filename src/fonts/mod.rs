// Fixed-size bitmap caption font.
// One monospace table, printable ASCII only; glyph cells are copied
// whole (ink and paper) so text always lands on a clean background.

pub mod bitmap;

pub use bitmap::{FIRST_CHAR, GlyphTable, LAST_CHAR, REPLACEMENT_CHAR};

use crate::board::CAPTION_FONT;

// the one table every render uses unless a config overrides it
pub const fn caption_glyphs() -> GlyphTable {
    GlyphTable::new(CAPTION_FONT)
}
