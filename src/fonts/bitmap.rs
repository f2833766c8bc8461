// Monospace 1-bit glyph table
//
// Backed by an embedded-graphics MonoFont living in flash (.rodata).
// Every glyph occupies the same cell; the cell is blitted whole with
// ink as BinaryColor::On and background as BinaryColor::Off, so on the
// canvas ink clears bits and background sets them.

use core::fmt;

use embedded_graphics::{
    mono_font::{MonoFont, MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

pub const FIRST_CHAR: char = ' ';
pub const LAST_CHAR: char = '~';

// drawn in place of anything outside FIRST_CHAR..=LAST_CHAR
pub const REPLACEMENT_CHAR: char = '?';

#[derive(Clone, Copy)]
pub struct GlyphTable {
    font: &'static MonoFont<'static>,
}

impl GlyphTable {
    pub const fn new(font: &'static MonoFont<'static>) -> Self {
        Self { font }
    }

    #[inline]
    pub fn glyph_width(&self) -> u32 {
        self.font.character_size.width
    }

    #[inline]
    pub fn glyph_height(&self) -> u32 {
        self.font.character_size.height
    }

    /// Horizontal distance between the origins of two adjacent glyphs.
    #[inline]
    pub fn advance(&self) -> u32 {
        self.font.character_size.width + self.font.character_spacing
    }

    #[inline]
    pub fn contains(ch: char) -> bool {
        (FIRST_CHAR..=LAST_CHAR).contains(&ch)
    }

    // pixel width of a run of `columns` glyphs
    #[inline]
    pub fn text_width(&self, columns: usize) -> i32 {
        columns as i32 * self.advance() as i32
    }

    fn style(&self) -> MonoTextStyle<'static, BinaryColor> {
        MonoTextStyleBuilder::new()
            .font(self.font)
            .text_color(BinaryColor::On)
            .background_color(BinaryColor::Off)
            .build()
    }

    /// Blit one glyph cell with its top-left corner at (x, y); returns the advance.
    pub fn draw_char<D>(&self, target: &mut D, ch: char, x: i32, y: i32) -> Result<u32, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let ch = if Self::contains(ch) {
            ch
        } else {
            REPLACEMENT_CHAR
        };
        let mut utf8 = [0u8; 4];
        let s: &str = ch.encode_utf8(&mut utf8);
        Text::with_baseline(s, Point::new(x, y), self.style(), Baseline::Top).draw(target)?;
        Ok(self.advance())
    }

    /// Draw `text` left to right from (x, y); returns the x after the last glyph.
    pub fn draw_str<D>(&self, target: &mut D, text: &str, x: i32, y: i32) -> Result<i32, D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let mut cx = x;
        for ch in text.chars() {
            cx += self.draw_char(target, ch, cx, y)? as i32;
        }
        Ok(cx)
    }
}

impl fmt::Debug for GlyphTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphTable")
            .field("glyph_width", &self.glyph_width())
            .field("glyph_height", &self.glyph_height())
            .field("advance", &self.advance())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::canvas::Canvas;
    use crate::fonts::caption_glyphs;

    fn cell_bits(canvas: &Canvas, glyphs: &GlyphTable, x0: i32) -> (usize, usize) {
        let (mut ink, mut paper) = (0, 0);
        for y in 0..glyphs.glyph_height() as i32 {
            for x in x0..x0 + glyphs.glyph_width() as i32 {
                match canvas.pixel(x, y) {
                    Some(true) => paper += 1,
                    Some(false) => ink += 1,
                    None => {}
                }
            }
        }
        (ink, paper)
    }

    #[test]
    fn caption_font_dimensions() {
        let glyphs = caption_glyphs();
        assert_eq!(glyphs.glyph_width(), 7);
        assert_eq!(glyphs.glyph_height(), 13);
        assert_eq!(glyphs.advance(), 7);
        assert_eq!(glyphs.text_width(10), 70);
    }

    #[test]
    fn printable_range() {
        assert!(GlyphTable::contains(' '));
        assert!(GlyphTable::contains('A'));
        assert!(GlyphTable::contains('~'));
        assert!(!GlyphTable::contains('\n'));
        assert!(!GlyphTable::contains('é'));
    }

    #[test]
    fn letter_leaves_ink() {
        let glyphs = caption_glyphs();
        let mut canvas = Canvas::allocate(32, 16).unwrap();
        let end = glyphs.draw_char(&mut canvas, 'A', 0, 0).unwrap();
        assert_eq!(end, 7);
        let (ink, paper) = cell_bits(&canvas, &glyphs, 0);
        assert!(ink > 0);
        assert!(paper > 0);
    }

    #[test]
    fn space_cell_is_copied_as_background() {
        let glyphs = caption_glyphs();
        let mut canvas = Canvas::allocate(32, 16).unwrap();
        canvas.fill(false);
        glyphs.draw_char(&mut canvas, ' ', 0, 0).unwrap();
        let (ink, paper) = cell_bits(&canvas, &glyphs, 0);
        assert_eq!(ink, 0);
        assert_eq!(paper, 7 * 13);
        // neighbouring column untouched
        assert_eq!(canvas.pixel(7, 0), Some(false));
    }

    #[test]
    fn unknown_chars_draw_replacement() {
        let glyphs = caption_glyphs();
        let mut a = Canvas::allocate(16, 16).unwrap();
        let mut b = Canvas::allocate(16, 16).unwrap();
        glyphs.draw_char(&mut a, 'é', 0, 0).unwrap();
        glyphs.draw_char(&mut b, REPLACEMENT_CHAR, 0, 0).unwrap();
        assert_eq!(a.data(), b.data());
    }

    #[test]
    fn draw_str_advances_per_glyph() {
        let glyphs = caption_glyphs();
        let mut canvas = Canvas::allocate(64, 16).unwrap();
        let end = glyphs.draw_str(&mut canvas, "abc", 3, 0).unwrap();
        assert_eq!(end, 3 + 21);
    }
}
