// Bit-packed monochrome canvas sized to the panel.
// 1 bit per pixel, MSB-first, row-major; stride = ceil(width / 8).
// Bit set = white (paper), bit clear = black (ink). Starts all white.
// Writes outside the panel are dropped here, so callers never clip.

extern crate alloc;

use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics_core::{
    Pixel,
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    pixelcolor::BinaryColor,
};

use crate::error::RenderError;

pub struct Canvas {
    buf: Vec<u8>,
    width: u16,
    height: u16,
    stride: usize,
}

/// Borrowed view of a finished canvas, as handed to the panel driver.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub data: &'a [u8],
    pub width: u16,
    pub height: u16,
    pub stride: usize,
}

impl Canvas {
    /// Allocate a white canvas; fails instead of aborting when the heap is short.
    pub fn allocate(width: u16, height: u16) -> Result<Self, RenderError> {
        let stride = (width as usize).div_ceil(8);
        let len = stride * height as usize;

        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| RenderError::OutOfMemory("canvas"))?;
        buf.resize(len, 0xFF);

        Ok(Self {
            buf,
            width,
            height,
            stride,
        })
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn data(&self) -> &[u8] {
        &self.buf
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            data: &self.buf,
            width: self.width,
            height: self.height,
            stride: self.stride,
        }
    }

    // byte index and mask for an in-bounds pixel
    #[inline]
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some((x / 8 + y * self.stride, 1 << (7 - (x % 8))))
    }

    /// Write one pixel; `white` sets the bit. Out-of-range writes are no-ops.
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, white: bool) {
        let Some((idx, mask)) = self.locate(x, y) else {
            return;
        };
        if white {
            self.buf[idx] |= mask;
        } else {
            self.buf[idx] &= !mask;
        }
    }

    /// Read one pixel back; `None` outside the canvas.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<bool> {
        self.locate(x, y).map(|(idx, mask)| self.buf[idx] & mask != 0)
    }

    pub fn fill(&mut self, white: bool) {
        self.buf.fill(if white { 0xFF } else { 0x00 });
    }

    /// Drop the framebuffer.
    pub fn release(self) {
        log::debug!("canvas: released {} bytes", self.buf.len());
    }
}

impl OriginDimensions for Canvas {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

// BinaryColor::On is ink, so it clears the bit
impl DrawTarget for Canvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            self.set_pixel(coord.x, coord.y, color == BinaryColor::Off);
        }
        Ok(())
    }
}
