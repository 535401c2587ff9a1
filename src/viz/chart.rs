//! Internal chart layer: axes, ticks, grids, curves, bands, legends.
//!
//! Wraps a [`Figure`] with a data-to-pixel transform for a single plot
//! area. Only the plot operations use this; the public surface hands out
//! finished figures.

use crate::core::error::{EvalError, Result};
use crate::ensure;
use crate::viz::figure::{text_height, text_width, Figure, BLACK, GRID_GREY};
use image::Rgb;

/// Margins around the plot area, in pixels.
const MARGIN_LEFT: u32 = 78;
const MARGIN_RIGHT: u32 = 28;
const MARGIN_TOP: u32 = 46;
const MARGIN_BOTTOM: u32 = 62;

/// Tick mark length in pixels.
const TICK_LENGTH: u32 = 5;

#[derive(Debug)]
pub(crate) struct Chart {
    fig: Figure,
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
    xlim: (f64, f64),
    ylim: (f64, f64),
}

impl Chart {
    /// Create a chart with standard margins and the given data limits.
    pub(crate) fn new(
        width: u32,
        height: u32,
        xlim: (f64, f64),
        ylim: (f64, f64),
    ) -> Result<Self> {
        ensure!(
            width > MARGIN_LEFT + MARGIN_RIGHT && height > MARGIN_TOP + MARGIN_BOTTOM,
            EvalError::invalid_parameter(
                "figure size",
                format!("{}x{}", width, height),
                "too small for the plot margins",
            )
        );
        ensure!(
            xlim.1 > xlim.0 && ylim.1 > ylim.0,
            EvalError::invalid_parameter(
                "axis limits",
                format!("x: {:?}, y: {:?}", xlim, ylim),
                "limits must span a positive range",
            )
        );
        Ok(Self {
            fig: Figure::new(width, height),
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            right: width - MARGIN_RIGHT,
            bottom: height - MARGIN_BOTTOM,
            xlim,
            ylim,
        })
    }

    /// Map a data x to a pixel column.
    pub(crate) fn x_px(&self, x: f64) -> f32 {
        let t = (x - self.xlim.0) / (self.xlim.1 - self.xlim.0);
        self.left as f32 + (t * (self.right - self.left) as f64) as f32
    }

    /// Map a data y to a pixel row (pixel rows grow downwards).
    pub(crate) fn y_px(&self, y: f64) -> f32 {
        let t = (y - self.ylim.0) / (self.ylim.1 - self.ylim.0);
        self.bottom as f32 - (t * (self.bottom - self.top) as f64) as f32
    }

    /// Clamp a data y into the axis range.
    fn clamp_y(&self, y: f64) -> f64 {
        y.clamp(self.ylim.0, self.ylim.1)
    }

    /// Draw the rectangular axes frame.
    pub(crate) fn draw_frame(&mut self) {
        let (l, t, r, b) = (
            self.left as f32,
            self.top as f32,
            self.right as f32,
            self.bottom as f32,
        );
        self.fig.draw_line((l, t), (r, t), BLACK);
        self.fig.draw_line((l, b), (r, b), BLACK);
        self.fig.draw_line((l, t), (l, b), BLACK);
        self.fig.draw_line((r, t), (r, b), BLACK);
    }

    /// Draw light grid lines at the given data positions.
    pub(crate) fn draw_grid(&mut self, xticks: &[f64], yticks: &[f64]) {
        for &x in xticks {
            let px = self.x_px(x);
            self.fig
                .draw_line((px, self.top as f32), (px, self.bottom as f32), GRID_GREY);
        }
        for &y in yticks {
            let py = self.y_px(y);
            self.fig
                .draw_line((self.left as f32, py), (self.right as f32, py), GRID_GREY);
        }
    }

    /// Draw x-axis tick marks with numeric labels.
    pub(crate) fn draw_x_ticks(&mut self, ticks: &[f64]) {
        for &x in ticks {
            let px = self.x_px(x);
            self.fig.draw_line(
                (px, self.bottom as f32),
                (px, (self.bottom + TICK_LENGTH) as f32),
                BLACK,
            );
            let label = format_tick(x);
            let width = text_width(&label, 1);
            self.fig.draw_text(
                px as i32 - width as i32 / 2,
                (self.bottom + TICK_LENGTH + 4) as i32,
                &label,
                1,
                BLACK,
            );
        }
    }

    /// Draw y-axis tick marks with numeric labels.
    pub(crate) fn draw_y_ticks(&mut self, ticks: &[f64]) {
        for &y in ticks {
            let py = self.y_px(y);
            self.fig.draw_line(
                ((self.left - TICK_LENGTH) as f32, py),
                (self.left as f32, py),
                BLACK,
            );
            let label = format_tick(y);
            let width = text_width(&label, 1);
            self.fig.draw_text(
                self.left as i32 - TICK_LENGTH as i32 - 4 - width as i32,
                py as i32 - text_height(1) as i32 / 2,
                &label,
                1,
                BLACK,
            );
        }
    }

    /// Centered title above the plot area.
    pub(crate) fn title(&mut self, text: &str) {
        let width = text_width(text, 2);
        let center = (self.left + self.right) / 2;
        self.fig.draw_text(
            center as i32 - width as i32 / 2,
            (self.top / 2) as i32 - text_height(2) as i32 / 2,
            text,
            2,
            BLACK,
        );
    }

    /// Centered x-axis label below the tick labels.
    pub(crate) fn x_label(&mut self, text: &str) {
        let width = text_width(text, 1);
        let center = (self.left + self.right) / 2;
        let y = self.bottom + TICK_LENGTH + 4 + text_height(1) + 10;
        self.fig
            .draw_text(center as i32 - width as i32 / 2, y as i32, text, 1, BLACK);
    }

    /// Rotated y-axis label along the left edge.
    pub(crate) fn y_label(&mut self, text: &str) {
        let width = text_width(text, 1);
        let center = (self.top + self.bottom) / 2;
        self.fig.draw_text_rot90(
            8,
            center as i32 - width as i32 / 2,
            text,
            1,
            BLACK,
        );
    }

    /// Polyline through data points, clipped to the y range.
    pub(crate) fn polyline(&mut self, xs: &[f64], ys: &[f64], color: Rgb<u8>) {
        for window in 1..xs.len().min(ys.len()) {
            let from = (
                self.x_px(xs[window - 1]),
                self.y_px(self.clamp_y(ys[window - 1])),
            );
            let to = (self.x_px(xs[window]), self.y_px(self.clamp_y(ys[window])));
            self.fig.draw_line(from, to, color);
        }
    }

    /// Dashed straight line between two data points.
    pub(crate) fn dashed_line(&mut self, from: (f64, f64), to: (f64, f64), color: Rgb<u8>) {
        let segments = 24u32;
        for i in 0..segments {
            if i % 2 != 0 {
                continue;
            }
            let t0 = i as f64 / segments as f64;
            let t1 = (i + 1) as f64 / segments as f64;
            let p0 = (
                self.x_px(from.0 + (to.0 - from.0) * t0),
                self.y_px(self.clamp_y(from.1 + (to.1 - from.1) * t0)),
            );
            let p1 = (
                self.x_px(from.0 + (to.0 - from.0) * t1),
                self.y_px(self.clamp_y(from.1 + (to.1 - from.1) * t1)),
            );
            self.fig.draw_line(p0, p1, color);
        }
    }

    /// Circular markers at the data points.
    pub(crate) fn markers(&mut self, xs: &[f64], ys: &[f64], color: Rgb<u8>) {
        for (&x, &y) in xs.iter().zip(ys.iter()) {
            let center = (
                self.x_px(x) as i32,
                self.y_px(self.clamp_y(y)) as i32,
            );
            self.fig.draw_marker(center, 3, color);
        }
    }

    /// Fill the vertical band between two curves, column by column.
    ///
    /// `xs` must be ascending; the band edges are interpolated linearly
    /// between the given points.
    pub(crate) fn fill_between(
        &mut self,
        xs: &[f64],
        lower: &[f64],
        upper: &[f64],
        color: Rgb<u8>,
    ) {
        if xs.len() < 2 {
            return;
        }
        let start = self.x_px(xs[0].max(self.xlim.0)).ceil() as i32;
        let stop = self.x_px(xs[xs.len() - 1].min(self.xlim.1)).floor() as i32;
        for px in start..=stop {
            let x = self.xlim.0
                + (px as f64 - self.left as f64) / (self.right - self.left) as f64
                    * (self.xlim.1 - self.xlim.0);
            let lo = self.clamp_y(interpolate(xs, lower, x));
            let hi = self.clamp_y(interpolate(xs, upper, x));
            let top = self.y_px(hi) as i32;
            let bottom = self.y_px(lo) as i32;
            if bottom >= top {
                self.fig
                    .fill_rect(px, top, 1, (bottom - top + 1) as u32, color);
            }
        }
    }

    /// Legend box in the top-right corner of the plot area.
    pub(crate) fn legend(&mut self, entries: &[(&str, Rgb<u8>)]) {
        if entries.is_empty() {
            return;
        }
        let swatch = 14u32;
        let pad = 6u32;
        let line_height = text_height(1).max(swatch) + 4;
        let widest = entries
            .iter()
            .map(|(label, _)| text_width(label, 1))
            .max()
            .unwrap_or(0);
        let box_width = pad * 3 + swatch + widest;
        let box_height = pad * 2 + line_height * entries.len() as u32 - 4;

        let x0 = self.right.saturating_sub(box_width + 8) as i32;
        let y0 = (self.top + 8) as i32;

        self.fig.fill_rect(x0, y0, box_width, box_height, image::Rgb([255, 255, 255]));
        let (fx0, fy0) = (x0 as f32, y0 as f32);
        let (fx1, fy1) = (x0 as f32 + box_width as f32, y0 as f32 + box_height as f32);
        self.fig.draw_line((fx0, fy0), (fx1, fy0), BLACK);
        self.fig.draw_line((fx0, fy1), (fx1, fy1), BLACK);
        self.fig.draw_line((fx0, fy0), (fx0, fy1), BLACK);
        self.fig.draw_line((fx1, fy0), (fx1, fy1), BLACK);

        for (index, (label, color)) in entries.iter().enumerate() {
            let row = y0 + (pad + index as u32 * line_height) as i32;
            self.fig
                .fill_rect(x0 + pad as i32, row, swatch, swatch / 2 + 4, *color);
            self.fig.draw_text(
                x0 + (pad * 2 + swatch) as i32,
                row,
                label,
                1,
                BLACK,
            );
        }
    }

    /// Evenly spaced tick positions across a limit range.
    pub(crate) fn ticks(lim: (f64, f64), count: usize) -> Vec<f64> {
        let count = count.max(2);
        (0..count)
            .map(|i| lim.0 + (lim.1 - lim.0) * i as f64 / (count - 1) as f64)
            .collect()
    }

    /// Finish drawing and hand out the figure.
    pub(crate) fn into_figure(self) -> Figure {
        self.fig
    }
}

/// Linear interpolation of `ys` over ascending `xs` at position `x`.
fn interpolate(xs: &[f64], ys: &[f64], x: f64) -> f64 {
    if x <= xs[0] {
        return ys[0];
    }
    if x >= xs[xs.len() - 1] {
        return ys[ys.len() - 1];
    }
    for i in 1..xs.len() {
        if x <= xs[i] {
            let span = xs[i] - xs[i - 1];
            if span == 0.0 {
                return ys[i];
            }
            let t = (x - xs[i - 1]) / span;
            return ys[i - 1] + (ys[i] - ys[i - 1]) * t;
        }
    }
    ys[ys.len() - 1]
}

/// Compact numeric tick label: integers bare, fractions at two decimals.
fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.2}", value)
    }
}
