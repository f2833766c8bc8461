// One display refresh: decode events in, finished frame out.
//
// Idle -> AwaitingDimensions -> Rendering -> Flushed, or Failed from any
// state once something has gone wrong. The canvas is sized to the panel,
// the image is centered on it (clipped, never scaled) and dithered one
// pixel at a time; each row is written to the canvas when its last pixel
// arrives. Header text goes in above the image on Start, the alt text
// below it on End, then the frame is handed to the panel. Every exit
// path drops the canvas and line buffers.

extern crate alloc;

use alloc::format;
use core::fmt;

use log::{debug, error, info, warn};

use super::caption::Caption;
use super::dither::{DitherLines, WHITE};
use super::event::DecodeEvent;
use crate::board::RenderConfig;
use crate::drivers::{Canvas, Panel};
use crate::error::RenderError;
use crate::ui::text::{draw_wrapped_text, line_count};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    AwaitingDimensions,
    Rendering,
    Flushed,
    Failed,
}

impl SessionState {
    pub const fn is_terminal(self) -> bool {
        matches!(self, SessionState::Flushed | SessionState::Failed)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Idle => "Idle",
            SessionState::AwaitingDimensions => "AwaitingDimensions",
            SessionState::Rendering => "Rendering",
            SessionState::Flushed => "Flushed",
            SessionState::Failed => "Failed",
        };
        f.write_str(name)
    }
}

/// Where the image lands on the canvas. Offsets go negative when the image
/// is larger than the panel; those rows and columns are clipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImagePlacement {
    pub image_width: u32,
    pub image_height: u32,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl ImagePlacement {
    // image dimensions are at most i32::MAX, so both offsets fit in i32
    pub fn centered(panel_width: u16, panel_height: u16, image_width: u32, image_height: u32) -> Self {
        let x_offset = (panel_width as i64 - image_width as i64) / 2;
        let y_offset = (panel_height as i64 - image_height as i64) / 2;
        Self {
            image_width,
            image_height,
            x_offset: x_offset as i32,
            y_offset: y_offset as i32,
        }
    }

    pub fn clips(&self, panel_width: u16, panel_height: u16) -> bool {
        self.image_width > panel_width as u32 || self.image_height > panel_height as u32
    }

    // first canvas row below the image
    pub fn bottom(&self) -> i32 {
        self.y_offset.saturating_add(self.image_height as i32)
    }
}

pub struct RenderSession<P: Panel> {
    config: RenderConfig,
    caption: Option<Caption>,
    panel: P,
    state: SessionState,
    canvas: Option<Canvas>,
    lines: Option<DitherLines>,
    placement: Option<ImagePlacement>,
    // raster position the next pixel must have
    next_x: u32,
    next_y: u32,
    transparent: u32,
}

impl<P: Panel> RenderSession<P> {
    pub fn new(config: RenderConfig, caption: Caption, panel: P) -> Self {
        Self::build(config, Some(caption), panel)
    }

    /// Image only; no header or footer text.
    pub fn without_caption(config: RenderConfig, panel: P) -> Self {
        Self::build(config, None, panel)
    }

    fn build(config: RenderConfig, caption: Option<Caption>, panel: P) -> Self {
        Self {
            config,
            caption,
            panel,
            state: SessionState::Idle,
            canvas: None,
            lines: None,
            placement: None,
            next_x: 0,
            next_y: 0,
            transparent: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn placement(&self) -> Option<ImagePlacement> {
        self.placement
    }

    // canvas under construction; None before Start and after the session ends
    pub fn canvas(&self) -> Option<&Canvas> {
        self.canvas.as_ref()
    }

    pub fn panel(&self) -> &P {
        &self.panel
    }

    pub fn into_panel(self) -> P {
        self.panel
    }

    /// Feed one decoder event through the state machine.
    pub fn handle(&mut self, event: DecodeEvent) -> Result<(), RenderError> {
        if self.state.is_terminal() {
            return Err(RenderError::decode(format!(
                "{} after session ended ({})",
                event, self.state
            )));
        }

        let result = match (self.state, event) {
            (_, DecodeEvent::Error { message }) => Err(RenderError::Decode(message)),
            (SessionState::Idle, DecodeEvent::Start { width, height }) => self.start(width, height),
            (SessionState::Rendering, DecodeEvent::Pixel { x, y, rgba, .. }) => {
                self.pixel(x, y, rgba)
            }
            (SessionState::Rendering, DecodeEvent::End) => self.finish(),
            (state, event) => Err(RenderError::decode(format!(
                "unexpected {} while {}",
                event, state
            ))),
        };

        result.map_err(|e| self.fail(e))
    }

    fn start(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.state = SessionState::AwaitingDimensions;

        if width == 0 || height == 0 {
            return Err(RenderError::decode(format!(
                "zero image dimensions {}x{}",
                width, height
            )));
        }
        if width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(RenderError::decode(format!(
                "image dimensions {}x{} out of range",
                width, height
            )));
        }

        let cfg = self.config;
        info!(
            "render: image {}x{} on panel {}x{}",
            width, height, cfg.width, cfg.height
        );

        let mut canvas = Canvas::allocate(cfg.width, cfg.height)?;
        let placement = ImagePlacement::centered(cfg.width, cfg.height, width, height);
        if placement.clips(cfg.width, cfg.height) {
            warn!(
                "render: image {}x{} larger than panel {}x{}, clipping at offset ({}, {})",
                width, height, cfg.width, cfg.height, placement.x_offset, placement.y_offset
            );
        }

        // canvas is dropped with this frame if the line buffers don't fit
        let lines = DitherLines::new(width as usize)?;

        if let Some(caption) = &self.caption {
            let header = caption.header();
            let block = block_height(&cfg, &header);
            let y = ((placement.y_offset - block) / 2).max(0);
            debug!("render: header at y={} ({} px)", y, block);
            draw_wrapped_text(&mut canvas, &cfg.glyphs, &header, cfg.max_columns, y);
            if !caption.image_reference.is_empty() {
                debug!("render: source {}", caption.image_reference);
            }
        }

        self.canvas = Some(canvas);
        self.lines = Some(lines);
        self.placement = Some(placement);
        self.next_x = 0;
        self.next_y = 0;
        self.transparent = 0;
        self.state = SessionState::Rendering;
        Ok(())
    }

    fn pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<(), RenderError> {
        let (Some(canvas), Some(lines), Some(placement)) =
            (self.canvas.as_mut(), self.lines.as_mut(), self.placement)
        else {
            return Err(RenderError::decode("pixel without image buffers"));
        };

        if self.next_y >= placement.image_height {
            return Err(RenderError::decode(format!(
                "pixel ({}, {}) past the last row",
                x, y
            )));
        }
        if (x, y) != (self.next_x, self.next_y) {
            return Err(RenderError::decode(format!(
                "pixel ({}, {}) out of raster order, expected ({}, {})",
                x, y, self.next_x, self.next_y
            )));
        }

        if rgba[3] < u8::MAX {
            if self.transparent == 0 {
                debug!("render: pixel ({}, {}) alpha {} treated as opaque", x, y, rgba[3]);
            }
            self.transparent += 1;
        }

        lines.dither(x as usize, rgba);

        if x + 1 < placement.image_width {
            self.next_x += 1;
            return Ok(());
        }

        // last column: flush the row, then move the error rows along
        let cy = placement.y_offset + y as i32;
        if cy >= 0 && cy < canvas.height() as i32 {
            for i in 0..lines.width() {
                let cx = placement.x_offset + i as i32;
                canvas.set_pixel(cx, cy, lines.bit(i) == WHITE);
            }
        }
        lines.advance();

        self.next_x = 0;
        self.next_y += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        let Some(placement) = self.placement else {
            return Err(RenderError::decode("end without image"));
        };
        if self.next_y < placement.image_height {
            return Err(RenderError::decode(format!(
                "stream ended after {} of {} rows",
                self.next_y, placement.image_height
            )));
        }
        let Some(mut canvas) = self.canvas.take() else {
            return Err(RenderError::decode("end without canvas"));
        };

        if self.transparent > 0 {
            warn!(
                "render: {} pixels had transparency that was ignored",
                self.transparent
            );
        }

        let cfg = self.config;
        if let Some(caption) = &self.caption {
            let bottom = placement.bottom();
            let block = block_height(&cfg, &caption.alt_text);
            let margin = cfg.height as i32 - bottom;
            let y = bottom + ((margin - block) / 2).max(0);
            debug!("render: footer at y={} ({} px)", y, block);
            draw_wrapped_text(&mut canvas, &cfg.glyphs, &caption.alt_text, cfg.max_columns, y);
        }

        match self.panel.show(canvas.frame()) {
            Ok(()) => info!("render: frame delivered ({} bytes)", canvas.data().len()),
            Err(e) => error!("render: panel rejected frame: {:?}", e),
        }

        canvas.release();
        self.lines = None;
        self.state = SessionState::Flushed;
        Ok(())
    }

    /// Abandon the render from outside the event stream (source or decoder
    /// failure). Releases all buffers; a session that already ended is left
    /// as it is.
    pub fn abort(&mut self, err: RenderError) -> RenderError {
        if self.state.is_terminal() {
            return err;
        }
        self.fail(err)
    }

    // release everything and park in Failed
    fn fail(&mut self, err: RenderError) -> RenderError {
        if let Some(canvas) = self.canvas.take() {
            canvas.release();
        }
        self.lines = None;
        self.state = SessionState::Failed;
        error!("render: {}", err);
        err
    }
}

// pixel height of `text` once wrapped
fn block_height(cfg: &RenderConfig, text: &str) -> i32 {
    line_count(text, cfg.max_columns) as i32 * cfg.glyphs.glyph_height() as i32
}
