//! RGBA pixel buffer with the handful of primitives the brick-figure art style needs.
//!
//! All coordinates are signed pixel indices. Shapes with a non-positive width or
//! height draw nothing, and anything outside the canvas is clipped silently.

use crate::error::{Result, SpriteForgeError};
use crate::model::Rect;
use image::{Rgba, RgbaImage};

pub type Color = Rgba<u8>;

/// Fully transparent black, the initial state of every canvas pixel.
pub const TRANSPARENT: Color = Rgba([0, 0, 0, 0]);

/// Fixed-size RGBA8 canvas (straight alpha).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// Creates a fully transparent canvas.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            pixels: RgbaImage::new(width, height),
        }
    }

    /// Like [`Canvas::new`], but reports an allocation failure instead of aborting.
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        let err = || SpriteForgeError::Allocation { width, height };
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(err)?;
        let mut buf: Vec<u8> = Vec::new();
        buf.try_reserve_exact(len).map_err(|_| err())?;
        buf.resize(len, 0);
        let pixels = RgbaImage::from_raw(width, height, buf).ok_or_else(err)?;
        Ok(Self { pixels })
    }

    pub fn from_rgba(pixels: RgbaImage) -> Self {
        Self { pixels }
    }

    pub fn as_rgba(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn into_rgba(self) -> RgbaImage {
        self.pixels
    }

    /// Raw RGBA bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.pixels.as_raw()
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    /// Pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if self.in_bounds(x, y) {
            Some(*self.pixels.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width() && (y as u32) < self.height()
    }

    /// Clips the half-open span `[start, start + len)` to `[0, limit)`.
    fn clip_span(start: i32, len: i32, limit: u32) -> Option<(u32, u32)> {
        let lo = (start as i64).max(0);
        let hi = (start as i64 + len as i64).min(limit as i64);
        if lo < hi {
            Some((lo as u32, hi as u32))
        } else {
            None
        }
    }

    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if self.in_bounds(x, y) {
            self.pixels.put_pixel(x as u32, y as u32, color);
        }
    }

    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (Some((x0, x1)), Some((y0, y1))) = (
            Self::clip_span(x, w, self.width()),
            Self::clip_span(y, h, self.height()),
        ) else {
            return;
        };
        for yy in y0..y1 {
            for xx in x0..x1 {
                self.pixels.put_pixel(xx, yy, color);
            }
        }
    }

    /// Fills the rectangle, then overdraws a right strip and a bottom strip of
    /// `edge` pixels with `shade` (light comes from the top-left).
    #[allow(clippy::too_many_arguments)]
    pub fn shaded_rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
        shade: Color,
        edge: i32,
    ) {
        if w <= 0 || h <= 0 {
            return;
        }
        self.fill_rect(x, y, w, h, color);
        if edge <= 0 {
            return;
        }
        let ew = edge.min(w);
        let eh = edge.min(h);
        self.fill_rect(x + w - ew, y, ew, h, shade);
        self.fill_rect(x, y + h - eh, w, eh, shade);
    }

    /// Fills a simple polygon (even-odd rule), sampling pixel centres.
    pub fn polygon(&mut self, points: &[(i32, i32)], color: Color) {
        if points.len() < 3 {
            return;
        }
        let min_y = points.iter().map(|p| p.1).min().unwrap_or(0);
        let max_y = points.iter().map(|p| p.1).max().unwrap_or(0);
        let Some((y0, y1)) = Self::clip_span(min_y, max_y - min_y, self.height()) else {
            return;
        };
        let mut xs: Vec<f64> = Vec::with_capacity(points.len());
        for py in y0..y1 {
            let yc = py as f64 + 0.5;
            xs.clear();
            for i in 0..points.len() {
                let (ax, ay) = points[i];
                let (bx, by) = points[(i + 1) % points.len()];
                let (ay, by) = (ay as f64, by as f64);
                if (ay <= yc && yc < by) || (by <= yc && yc < ay) {
                    let t = (yc - ay) / (by - ay);
                    xs.push(ax as f64 + t * (bx - ax) as f64);
                }
            }
            xs.sort_by(|a, b| a.total_cmp(b));
            for pair in xs.chunks_exact(2) {
                let start = (pair[0] - 0.5).ceil() as i32;
                let end = (pair[1] - 0.5).ceil() as i32;
                self.fill_rect(start, py as i32, end - start, 1, color);
            }
        }
    }

    /// Fills the ellipse inscribed in the `w`x`h` box at `(x, y)`.
    pub fn ellipse(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let (Some((x0, x1)), Some((y0, y1))) = (
            Self::clip_span(x, w, self.width()),
            Self::clip_span(y, h, self.height()),
        ) else {
            return;
        };
        let rx = w as f64 / 2.0;
        let ry = h as f64 / 2.0;
        let cx = x as f64 + rx;
        let cy = y as f64 + ry;
        for yy in y0..y1 {
            for xx in x0..x1 {
                let dx = (xx as f64 + 0.5 - cx) / rx;
                let dy = (yy as f64 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.pixels.put_pixel(xx, yy, color);
                }
            }
        }
    }

    /// One-pixel Bresenham line, both endpoints included.
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let (mut x, mut y) = (x0, y0);
        let mut err = dx + dy;
        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Outlines part of the ellipse inscribed in the `w`x`h` box at `(x, y)`.
    ///
    /// Angles are degrees; 0 points right and angles grow clockwise in image space,
    /// so `0..180` is the lower half. An `end` below `start` wraps once around, a
    /// sweep of 360 or more draws the full outline, and non-finite angles draw nothing.
    #[allow(clippy::too_many_arguments)]
    pub fn arc(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        start_deg: f64,
        end_deg: f64,
        color: Color,
    ) {
        if w <= 0 || h <= 0 {
            return;
        }
        if !start_deg.is_finite() || !end_deg.is_finite() {
            return;
        }
        let raw = end_deg - start_deg;
        let start_deg = start_deg.rem_euclid(360.0);
        let sweep = if raw >= 360.0 {
            360.0
        } else if raw >= 0.0 {
            raw
        } else {
            // reduce both ends first; `raw` alone may have lost all precision
            (end_deg.rem_euclid(360.0) - start_deg).rem_euclid(360.0)
        };
        let rx = (w - 1) as f64 / 2.0;
        let ry = (h - 1) as f64 / 2.0;
        let cx = x as f64 + rx;
        let cy = y as f64 + ry;
        let steps = (((rx.max(ry) + 1.0) * sweep.to_radians() * 2.0).ceil() as usize).max(1);
        for i in 0..=steps {
            let a = (start_deg + sweep * i as f64 / steps as f64).to_radians();
            let px = (cx + rx * a.cos()).round() as i32;
            let py = (cy + ry * a.sin()).round() as i32;
            self.set_pixel(px, py, color);
        }
    }

    /// Copies `src` (alpha included, no blending) with its top-left at `(at_x, at_y)`.
    pub fn paste(&mut self, src: &Canvas, at_x: i32, at_y: i32) {
        let (sw, sh) = src.dimensions();
        let (Some((x0, x1)), Some((y0, y1))) = (
            Self::clip_span(at_x, sw as i32, self.width()),
            Self::clip_span(at_y, sh as i32, self.height()),
        ) else {
            return;
        };
        for dy in y0..y1 {
            let sy = (dy as i64 - at_y as i64) as u32;
            for dx in x0..x1 {
                let sx = (dx as i64 - at_x as i64) as u32;
                let px = *src.pixels.get_pixel(sx, sy);
                self.pixels.put_pixel(dx, dy, px);
            }
        }
    }

    /// Copies out the part of `rect` that lies inside the canvas.
    pub fn crop(&self, rect: Rect) -> Canvas {
        let view = image::imageops::crop_imm(&self.pixels, rect.x, rect.y, rect.w, rect.h);
        Canvas::from_rgba(view.to_image())
    }
}
