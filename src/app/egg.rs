use std::f64::consts::PI;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Line},
    },
};

use crate::config::EggShape;

// one sample per degree
pub const SAMPLES: u32 = 360;

// breathing room around the shell, in curve units
const PADDING: f64 = 10.0;

/// Points on the egg curve, y pointing up, from 0° to 360° inclusive.
///
/// x = a·cos t
/// y = (√(b² − d²·cos² t) + d·sin t)·sin t
///
/// Curve from https://observablehq.com/@toja/egg-curve
pub fn egg_outline(shape: &EggShape, samples: u32) -> Vec<(f64, f64)> {
    let EggShape { a, b, d } = *shape;
    let samples = samples.max(1);

    (0..=samples)
        .map(|i| {
            let rad = i as f64 / samples as f64 * 2.0 * PI;
            let (sin, cos) = rad.sin_cos();
            let x = a * cos;
            let y = ((b * b - d * d * cos * cos).sqrt() + d * sin) * sin;
            (x, y)
        })
        .collect()
}

/// Shell colour: pale cream at the start, deepening to red once done.
pub fn fill_color(progress: f32) -> Color {
    let left = 1.0 - progress.clamp(0.0, 1.0);
    Color::Rgb(255, (239.0 * left) as u8, (174.0 * left) as u8)
}

pub struct Egg<'a> {
    pub shape: &'a EggShape,
    pub progress: f32,
}

impl Widget for Egg<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let points = egg_outline(self.shape, SAMPLES);
        let color = fill_color(self.progress);

        let (y_min, y_max) = points
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
        let y_bounds = [y_min - PADDING, y_max + PADDING];

        // cells are about twice as tall as wide
        let half_width = (y_bounds[1] - y_bounds[0]) * area.width as f64 / (4.0 * area.height as f64);
        let half_width = half_width.max(self.shape.a + PADDING);

        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([-half_width, half_width])
            .y_bounds(y_bounds)
            .paint(|ctx| {
                // the curve is mirrored around x = 0, so chords fill it
                for &(x, y) in &points {
                    ctx.draw(&Line::new(x, y, -x, y, color));
                }
                for pair in points.windows(2) {
                    let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
                    ctx.draw(&Line::new(x1, y1, x2, y2, color));
                }
            })
            .render(area, buf);
    }
}
