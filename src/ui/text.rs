// Word-wrapped, centered caption text
//
// Lines are cut by a bounded splitter: at most `max_columns` glyphs,
// broken at the last space that fits. A single word wider than the
// limit is hard-broken at `max_columns`. Each line is centered on the
// canvas; whatever falls outside is clipped by the canvas itself.

use crate::drivers::canvas::Canvas;
use crate::fonts::GlyphTable;

/// Iterator over the lines of `text` wrapped to `max_columns` glyphs.
#[derive(Clone, Debug)]
pub struct WrappedLines<'a> {
    rest: &'a str,
    max_columns: usize,
}

pub fn wrap_lines(text: &str, max_columns: usize) -> WrappedLines<'_> {
    WrappedLines {
        rest: text,
        max_columns: max_columns.max(1),
    }
}

pub fn line_count(text: &str, max_columns: usize) -> usize {
    wrap_lines(text, max_columns).count()
}

// left edge that centers `line_px` pixels on a `canvas_px` wide canvas
#[inline]
pub fn centered_x(canvas_px: i32, line_px: i32) -> i32 {
    (canvas_px - line_px) / 2
}

// (line, remainder) for text that already has no leading spaces
fn split_line(text: &str, max_columns: usize) -> (&str, &str) {
    // byte offset of the first glyph past the limit
    let Some((cut, _)) = text.char_indices().nth(max_columns) else {
        return (text, "");
    };

    // glyph right at the limit is a space: the full-width prefix fits
    if text[cut..].starts_with(' ') {
        return (&text[..cut], &text[cut + 1..]);
    }

    match text[..cut].rfind(' ') {
        Some(space) if space > 0 => (&text[..space], &text[space + 1..]),
        // no space to break at; hard-break the word
        _ => (&text[..cut], &text[cut..]),
    }
}

impl<'a> Iterator for WrappedLines<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let text = self.rest.trim_start_matches(' ');
        if text.is_empty() {
            self.rest = text;
            return None;
        }
        let (line, rest) = split_line(text, self.max_columns);
        self.rest = rest;
        Some(line.trim_end_matches(' '))
    }
}

/// Draw `text` wrapped to `max_columns`, one centered line per glyph row,
/// starting at `start_y`. Returns the y just below the last line.
pub fn draw_wrapped_text(
    canvas: &mut Canvas,
    glyphs: &GlyphTable,
    text: &str,
    max_columns: usize,
    start_y: i32,
) -> i32 {
    let canvas_px = canvas.width() as i32;
    let line_h = glyphs.glyph_height() as i32;
    let mut y = start_y;

    for line in wrap_lines(text, max_columns) {
        let columns = line.chars().count();
        let x = centered_x(canvas_px, glyphs.text_width(columns));
        let end_x = match glyphs.draw_str(canvas, line, x, y) {
            Ok(end_x) => end_x,
            Err(never) => match never {},
        };
        log::trace!("text: {} cols at ({}, {})..{}", columns, x, y, end_x);
        y += line_h;
    }
    y
}
