//! The figure canvas.
//!
//! A [`Figure`] owns an RGB raster and the drawing primitives the chart
//! layer is built from. There is no ambient "current figure": every plot
//! operation returns the figure it drew, and the caller decides whether to
//! save, inspect, or drop it.

use crate::core::error::Result;
use crate::viz::font::{glyph, GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use std::path::Path;

/// Plain black for frames and text.
pub(crate) const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Plain white, the canvas background.
pub(crate) const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// Light grey used for grid lines.
pub(crate) const GRID_GREY: Rgb<u8> = Rgb([210, 210, 210]);

/// An off-screen figure backed by an RGB raster.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    img: RgbImage,
}

impl Figure {
    /// Create a white canvas of the given pixel size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            img: RgbImage::from_pixel(width, height, WHITE),
        }
    }

    /// Canvas width in pixels.
    pub fn width(&self) -> u32 {
        self.img.width()
    }

    /// Canvas height in pixels.
    pub fn height(&self) -> u32 {
        self.img.height()
    }

    /// Borrow the underlying raster.
    pub fn image(&self) -> &RgbImage {
        &self.img
    }

    /// Take ownership of the underlying raster.
    pub fn into_image(self) -> RgbImage {
        self.img
    }

    /// Encode the figure as PNG at `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.img.save(path.as_ref())?;
        log::info!("saved figure to {}", path.as_ref().display());
        Ok(())
    }

    /// Fill an axis-aligned rectangle. Degenerate sizes are ignored.
    pub(crate) fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb<u8>) {
        if width == 0 || height == 0 {
            return;
        }
        draw_filled_rect_mut(&mut self.img, Rect::at(x, y).of_size(width, height), color);
    }

    /// Draw a straight line segment between two pixel positions.
    pub(crate) fn draw_line(&mut self, from: (f32, f32), to: (f32, f32), color: Rgb<u8>) {
        draw_line_segment_mut(&mut self.img, from, to, color);
    }

    /// Draw a filled circular marker.
    pub(crate) fn draw_marker(&mut self, center: (i32, i32), radius: i32, color: Rgb<u8>) {
        draw_filled_circle_mut(&mut self.img, center, radius, color);
    }

    /// Draw text with the built-in font, anchored at its top-left corner.
    pub(crate) fn draw_text(&mut self, x: i32, y: i32, text: &str, scale: u32, color: Rgb<u8>) {
        for (index, c) in text.chars().enumerate() {
            let Some(columns) = glyph(c) else { continue };
            let origin_x = x + (index as u32 * GLYPH_ADVANCE * scale) as i32;
            for (col, &bits) in columns.iter().enumerate() {
                for row in 0..GLYPH_HEIGHT {
                    if bits & (1 << row) != 0 {
                        self.fill_rect(
                            origin_x + (col as u32 * scale) as i32,
                            y + (row * scale) as i32,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
    }

    /// Draw text rotated a quarter turn counter-clockwise (reading
    /// bottom-to-top), anchored at the top-left corner of the rotated block.
    pub(crate) fn draw_text_rot90(
        &mut self,
        x: i32,
        y: i32,
        text: &str,
        scale: u32,
        color: Rgb<u8>,
    ) {
        let total = text_width(text, scale);
        for (index, c) in text.chars().enumerate() {
            let Some(columns) = glyph(c) else { continue };
            let offset = index as u32 * GLYPH_ADVANCE * scale;
            for (col, &bits) in columns.iter().enumerate() {
                for row in 0..GLYPH_HEIGHT {
                    if bits & (1 << row) != 0 {
                        // (gx, gy) in text space maps to (gy, total - gx).
                        let gx = offset + col as u32 * scale;
                        let gy = row * scale;
                        self.fill_rect(
                            x + gy as i32,
                            y + (total - gx - scale) as i32,
                            scale,
                            scale,
                            color,
                        );
                    }
                }
            }
        }
    }
}

/// Rendered pixel width of a text run at the given scale.
pub(crate) fn text_width(text: &str, scale: u32) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        0
    } else {
        (chars * GLYPH_ADVANCE - (GLYPH_ADVANCE - GLYPH_WIDTH)) * scale
    }
}

/// Rendered pixel height of a text run at the given scale.
pub(crate) fn text_height(scale: u32) -> u32 {
    GLYPH_HEIGHT * scale
}

/// Blend a color towards white, an alpha-on-white approximation for shaded
/// bands.
pub(crate) fn tint(color: Rgb<u8>, alpha: f64) -> Rgb<u8> {
    let alpha = alpha.clamp(0.0, 1.0);
    let mut channels = [0u8; 3];
    for (i, channel) in channels.iter_mut().enumerate() {
        let value = 255.0 - (255.0 - color.0[i] as f64) * alpha;
        *channel = value.round() as u8;
    }
    Rgb(channels)
}
