//! Panel geometry and render configuration
//!
//! The target is a Waveshare 7.5" V2 e-paper panel (800x480, 1 bit per
//! pixel, bit set = white). Everything here is a compile-time constant;
//! nothing is negotiated with the panel at runtime.

use embedded_graphics::mono_font::{MonoFont, ascii::FONT_7X13};

use crate::fonts::GlyphTable;

// Display
pub const DISPLAY_WIDTH: u16 = 800;
pub const DISPLAY_HEIGHT: u16 = 480;

pub const STRIDE_BYTES: usize = (DISPLAY_WIDTH as usize).div_ceil(8);
pub const FB_SIZE: usize = STRIDE_BYTES * DISPLAY_HEIGHT as usize;

// widest caption line, in glyph columns
pub const MAX_TEXT_COLUMNS: usize = 80;

// caption font; 7x13 cell, no inter-glyph spacing
pub const CAPTION_FONT: &MonoFont<'static> = &FONT_7X13;

/// Everything a render needs to know about the target surface.
#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub width: u16,
    pub height: u16,
    pub max_columns: usize,
    pub glyphs: GlyphTable,
}

impl RenderConfig {
    pub const EPD_7IN5_V2: Self = Self {
        width: DISPLAY_WIDTH,
        height: DISPLAY_HEIGHT,
        max_columns: MAX_TEXT_COLUMNS,
        glyphs: GlyphTable::new(CAPTION_FONT),
    };

    /// Same font and column limit, different panel size.
    pub const fn with_size(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            ..Self::EPD_7IN5_V2
        }
    }

    pub const fn with_max_columns(mut self, max_columns: usize) -> Self {
        self.max_columns = max_columns;
        self
    }

    pub const fn stride(&self) -> usize {
        (self.width as usize).div_ceil(8)
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::EPD_7IN5_V2
    }
}
