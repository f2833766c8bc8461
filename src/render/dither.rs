// Floyd-Steinberg error diffusion, one pixel at a time.
// Two signed error rows, image_width long; the current row also holds
// the output bit of each column once that column has been dithered.

extern crate alloc;

use alloc::vec::Vec;

use crate::error::RenderError;

// output bit for paper
pub const WHITE: i32 = 1;
pub const BLACK: i32 = 0;

const THRESHOLD: i32 = 127;

/// Luma in 0..=255: 0.3 R + 0.59 G + 0.11 B, integer fixed point.
#[inline]
pub fn luminance(rgba: [u8; 4]) -> i32 {
    (30 * rgba[0] as i32 + 59 * rgba[1] as i32 + 11 * rgba[2] as i32) / 100
}

/// Dither column `x` of the current row; alpha is ignored.
///
/// Adds the pixel's luma to the error carried at `current_row[x]`, clips to
/// 0..=255 and thresholds. The quantisation error goes to the unprocessed
/// neighbours with weights 7/16 (right), 1/16 (below right), 3/16 (below
/// left) and 5/16 (below), in that order, each truncated toward zero.
/// Returns 1 (white) or 0 (black).
pub fn dither_pixel(
    current_row: &mut [i32],
    next_row: &mut [i32],
    x: usize,
    row_length: usize,
    rgba: [u8; 4],
) -> i32 {
    if x >= row_length || current_row.len() < row_length || next_row.len() < row_length {
        return BLACK;
    }

    let value = (current_row[x] + luminance(rgba)).clamp(0, 255);
    let bit = if value > THRESHOLD { WHITE } else { BLACK };
    let err = value - bit * 255;

    if x + 1 < row_length {
        current_row[x + 1] += err * 7 / 16;
        next_row[x + 1] += err / 16;
    }
    if x > 0 {
        next_row[x - 1] += err * 3 / 16;
    }
    next_row[x] += err * 5 / 16;

    bit
}

/// The pair of error rows for one image, with `width` as the row length
/// for dithering, swapping and clearing alike.
pub struct DitherLines {
    current: Vec<i32>,
    next: Vec<i32>,
    width: usize,
}

impl DitherLines {
    pub fn new(width: usize) -> Result<Self, RenderError> {
        Ok(Self {
            current: zeroed(width)?,
            next: zeroed(width)?,
            width,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Dither column `x` and keep its bit in place of the consumed error.
    pub fn dither(&mut self, x: usize, rgba: [u8; 4]) -> i32 {
        let bit = dither_pixel(&mut self.current, &mut self.next, x, self.width, rgba);
        if x < self.width {
            self.current[x] = bit;
        }
        bit
    }

    // bit of an already dithered column of the current row
    #[inline]
    pub fn bit(&self, x: usize) -> i32 {
        self.current[x]
    }

    /// Row finished: next becomes current, and the new next starts at zero.
    pub fn advance(&mut self) {
        core::mem::swap(&mut self.current, &mut self.next);
        self.next[..self.width].fill(0);
    }

    #[cfg(test)]
    fn rows(&self) -> (&[i32], &[i32]) {
        (&self.current, &self.next)
    }
}

fn zeroed(len: usize) -> Result<Vec<i32>, RenderError> {
    let mut v = Vec::new();
    v.try_reserve_exact(len)
        .map_err(|_| RenderError::OutOfMemory("dither line"))?;
    v.resize(len, 0);
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    const LEVELS: [u8; 3] = [0, 128, 255];

    #[test]
    fn threshold_over_channel_grid() {
        for &r in &LEVELS {
            for &g in &LEVELS {
                for &b in &LEVELS {
                    let rgba = [r, g, b, 255];
                    let mut cur = vec![0i32; 3];
                    let mut nxt = vec![0i32; 3];
                    let bit = dither_pixel(&mut cur, &mut nxt, 1, 3, rgba);
                    let expected = if luminance(rgba).clamp(0, 255) > 127 { 1 } else { 0 };
                    assert_eq!(bit, expected, "rgb=({}, {}, {})", r, g, b);
                }
            }
        }
    }

    #[test]
    fn luminance_extremes() {
        assert_eq!(luminance([0, 0, 0, 255]), 0);
        assert_eq!(luminance([255, 255, 255, 255]), 255);
        assert_eq!(luminance([128, 128, 128, 255]), 128);
        assert_eq!(luminance([255, 0, 0, 255]), 76);
        assert_eq!(luminance([0, 255, 0, 255]), 150);
        assert_eq!(luminance([0, 0, 255, 255]), 28);
    }

    #[test]
    fn alpha_is_ignored() {
        let mut a = (vec![0i32; 2], vec![0i32; 2]);
        let mut b = (vec![0i32; 2], vec![0i32; 2]);
        let opaque = dither_pixel(&mut a.0, &mut a.1, 0, 2, [200, 200, 200, 255]);
        let clear = dither_pixel(&mut b.0, &mut b.1, 0, 2, [200, 200, 200, 0]);
        assert_eq!(opaque, clear);
        assert_eq!(a, b);
    }

    #[test]
    fn error_goes_to_four_neighbours_in_kernel_ratio() {
        // mid grey 128 -> white, error 128 - 255 = -127
        let mut cur = vec![0i32; 3];
        let mut nxt = vec![0i32; 3];
        let bit = dither_pixel(&mut cur, &mut nxt, 1, 3, [128, 128, 128, 255]);
        assert_eq!(bit, WHITE);
        assert_eq!(cur[2], -127 * 7 / 16);
        assert_eq!(nxt[2], -127 / 16);
        assert_eq!(nxt[0], -127 * 3 / 16);
        assert_eq!(nxt[1], -127 * 5 / 16);
        // truncation toward zero
        assert_eq!((cur[2], nxt[2], nxt[0], nxt[1]), (-55, -7, -23, -39));
    }

    #[test]
    fn weights_sum_to_one() {
        let err = 16 * 1000;
        assert_eq!(err * 7 / 16 + err / 16 + err * 3 / 16 + err * 5 / 16, err);
    }

    #[test]
    fn edges_drop_out_of_row_neighbours() {
        let mut cur = vec![0i32; 2];
        let mut nxt = vec![0i32; 2];
        // black-ish 100 -> black, error +100
        dither_pixel(&mut cur, &mut nxt, 1, 2, [100, 100, 100, 255]);
        assert_eq!(cur, [0, 0]);
        assert_eq!(nxt, [100 * 3 / 16, 100 * 5 / 16]);

        let mut cur = vec![0i32; 2];
        let mut nxt = vec![0i32; 2];
        dither_pixel(&mut cur, &mut nxt, 0, 2, [100, 100, 100, 255]);
        assert_eq!(cur, [0, 100 * 7 / 16]);
        assert_eq!(nxt, [100 * 5 / 16, 100 / 16]);
    }

    #[test]
    fn carried_error_is_clipped_before_threshold() {
        let mut cur = vec![900i32, 0];
        let mut nxt = vec![0i32; 2];
        // 900 + 0 clips to 255 -> white with zero error
        assert_eq!(dither_pixel(&mut cur, &mut nxt, 0, 2, [0, 0, 0, 255]), WHITE);
        assert_eq!(cur[1], 0);
        assert_eq!(nxt, [0, 0]);

        let mut cur = vec![-900i32, 0];
        assert_eq!(
            dither_pixel(&mut cur, &mut nxt, 0, 2, [255, 255, 255, 255]),
            BLACK
        );
    }

    #[test]
    fn out_of_range_column_is_inert() {
        let mut cur = vec![5i32; 2];
        let mut nxt = vec![5i32; 2];
        assert_eq!(dither_pixel(&mut cur, &mut nxt, 2, 2, [255; 4]), BLACK);
        assert_eq!((cur, nxt), (vec![5, 5], vec![5, 5]));
    }

    #[test]
    fn lines_advance_swaps_and_clears() {
        let mut lines = DitherLines::new(3).unwrap();
        for x in 0..3 {
            lines.dither(x, [100, 100, 100, 255]);
        }
        let carried: Vec<i32> = lines.rows().1.to_vec();
        assert!(carried.iter().any(|&e| e != 0));
        assert_eq!(lines.bit(0), BLACK);

        lines.advance();
        assert_eq!(lines.rows().0, &carried[..]);
        assert_eq!(lines.rows().1, &[0, 0, 0]);
    }

    #[test]
    fn grey_row_alternates() {
        let mut lines = DitherLines::new(8).unwrap();
        let bits: Vec<i32> = (0..8).map(|x| lines.dither(x, [128, 128, 128, 255])).collect();
        let whites = bits.iter().filter(|&&b| b == WHITE).count();
        assert!((3..=5).contains(&whites), "{:?}", bits);
    }

    #[test]
    fn gradient_brightness_does_not_drift() {
        let (w, h) = (64usize, 48usize);
        let mut lines = DitherLines::new(w).unwrap();
        let mut src_sum = 0i64;
        let mut out_sum = 0i64;

        for y in 0..h {
            for x in 0..w {
                let v = ((x + y) * 255 / (w + h - 2)) as u8;
                let rgba = [v, v, v, 255];
                src_sum += luminance(rgba) as i64;
                out_sum += lines.dither(x, rgba) as i64 * 255;
            }
            lines.advance();
        }

        let n = (w * h) as i64;
        let drift = (out_sum - src_sum).abs() as f64 / n as f64;
        assert!(drift < 255.0, "average drift {} exceeds one step", drift);
        // and in practice it stays within a few grey levels
        assert!(drift < 16.0, "average drift {}", drift);
    }
}
