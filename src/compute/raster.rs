//! Software rasterizer for frame images.
//!
//! Everything is composited onto an opaque background with source-over
//! blending, so finished frames are fully opaque.

use font8x8::{BASIC_FONTS, UnicodeFonts};
use glam::Vec2;
use image::{Rgba as Pixel, RgbaImage};

use crate::schema::Rgba;

/// Width and height of one glyph cell at scale 1.
pub const GLYPH_SIZE: u32 = 8;

/// Horizontal anchoring of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    /// Text starts at the anchor.
    Left,
    /// Text is centered on the anchor.
    Center,
    /// Text ends at the anchor.
    Right,
}

/// Drawing surface owned by a single frame.
pub struct Canvas {
    image: RgbaImage,
}

impl Canvas {
    /// Create a canvas filled with an opaque background.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let bg = background.with_alpha(1.0).to_rgba8();
        Self {
            image: RgbaImage::from_pixel(width, height, Pixel(bg)),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Blend `color` over the pixel at (x, y); out-of-bounds writes are dropped.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || x >= self.image.width() as i32 || y >= self.image.height() as i32 {
            return;
        }
        let px = self.image.get_pixel_mut(x as u32, y as u32);
        px.0 = color.over(px.0);
    }

    /// Fill a convex polygon by sampling pixel centers.
    ///
    /// Each covered pixel is blended exactly once.
    pub fn fill_polygon(&mut self, points: &[Vec2], color: Rgba) {
        if points.len() < 3 {
            return;
        }

        let (mut min_y, mut max_y) = (f32::INFINITY, f32::NEG_INFINITY);
        for p in points {
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        let row_start = (min_y - 0.5).ceil().max(0.0) as i32;
        let row_end = ((max_y - 0.5).floor() as i32).min(self.image.height() as i32 - 1);

        for row in row_start..=row_end {
            let sy = row as f32 + 0.5;
            let mut x_min = f32::INFINITY;
            let mut x_max = f32::NEG_INFINITY;

            for i in 0..points.len() {
                let a = points[i];
                let b = points[(i + 1) % points.len()];
                if (a.y <= sy && b.y > sy) || (b.y <= sy && a.y > sy) {
                    let t = (sy - a.y) / (b.y - a.y);
                    let x = a.x + t * (b.x - a.x);
                    x_min = x_min.min(x);
                    x_max = x_max.max(x);
                }
            }
            if x_min > x_max {
                continue;
            }

            let col_start = (x_min - 0.5).ceil().max(0.0) as i32;
            let col_end = ((x_max - 0.5).floor() as i32).min(self.image.width() as i32 - 1);
            for col in col_start..=col_end {
                self.blend_pixel(col, row, color);
            }
        }
    }

    /// Draw a one pixel wide line.
    pub fn draw_line(&mut self, a: Vec2, b: Vec2, color: Rgba) {
        let (x0, y0) = (a.x.floor() as i32, a.y.floor() as i32);
        let (x1, y1) = (b.x.floor() as i32, b.y.floor() as i32);

        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        let (mut x, mut y) = (x0, y0);

        loop {
            self.blend_pixel(x, y, color);
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

    /// Draw a closed outline through `points`.
    pub fn draw_outline(&mut self, points: &[Vec2], color: Rgba) {
        for i in 0..points.len() {
            self.draw_line(points[i], points[(i + 1) % points.len()], color);
        }
    }

    /// Draw a single line of text vertically centered on `anchor`.
    ///
    /// Characters missing from the font are drawn as blanks.
    pub fn draw_text(&mut self, text: &str, anchor: Vec2, scale: u32, align: TextAlign, color: Rgba) {
        let scale = scale.max(1);
        let (width, height) = measure_text(text, scale);
        let left = match align {
            TextAlign::Left => anchor.x,
            TextAlign::Center => anchor.x - width as f32 * 0.5,
            TextAlign::Right => anchor.x - width as f32,
        }
        .round() as i32;
        let top = (anchor.y - height as f32 * 0.5).round() as i32;

        let cell = (GLYPH_SIZE * scale) as i32;
        for (i, ch) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch) else {
                continue;
            };
            let gx = left + i as i32 * cell;
            for (row, bits) in glyph.iter().enumerate() {
                for col in 0..GLYPH_SIZE {
                    if *bits & (1u8 << col) == 0 {
                        continue;
                    }
                    let px = gx + (col * scale) as i32;
                    let py = top + (row as u32 * scale) as i32;
                    for dy in 0..scale as i32 {
                        for dx in 0..scale as i32 {
                            self.blend_pixel(px + dx, py + dy, color);
                        }
                    }
                }
            }
        }
    }

    /// Read back a pixel.
    #[cfg(test)]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    /// Finish drawing and take the image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Pixel size of a text run at the given scale.
pub fn measure_text(text: &str, scale: u32) -> (u32, u32) {
    let cell = GLYPH_SIZE * scale.max(1);
    (text.chars().count() as u32 * cell, cell)
}
