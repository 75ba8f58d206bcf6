use crate::computing::Bounds;
use crate::computing::Couple;
use crate::computing::Float;
use crate::computing::bounds_center;
use crate::drawing::PathSink;
use crate::drawing::PathStep;
use crate::drawing::replay;

use wizdraw::push_cubic_bezier_segments;
use wizdraw::stroke;
use wizdraw::fill;

use vek::bezier::CubicBezier2;
use vek::vec::Vec2;

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use rgb::RGBA8;

use core::f32::consts::FRAC_PI_2;
use alloc::{vec, vec::Vec, boxed::Box};

/// Polyline approximation of path commands.
///
/// Every `move_to` opens a new contour.
#[derive(Debug, Clone)]
pub struct Flattener {
    points: Vec<Couple>,
    starts: Vec<usize>,
    tolerance: Float,
}

impl Flattener {
    pub fn new() -> Self {
        Self::with_tolerance(0.4)
    }

    /// `tolerance` is the maximum distance, in pixels, between a curve
    /// and its segments.
    pub fn with_tolerance(tolerance: Float) -> Self {
        Self {
            points: Vec::new(),
            starts: Vec::new(),
            tolerance,
        }
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.starts.clear();
    }

    pub fn points(&self) -> &[Couple] {
        &self.points
    }

    pub fn contours(&self) -> impl Iterator<Item = &[Couple]> + '_ {
        self.starts.iter().enumerate().map(move |(i, &from)| {
            let to = self.starts.get(i + 1).copied().unwrap_or(self.points.len());
            &self.points[from..to]
        })
    }

    fn continue_contour(&mut self) {
        if self.starts.is_empty() {
            self.starts.push(self.points.len());
        }
    }

    /// Skips `point` when the contour already ends there.
    fn push_joined(&mut self, point: Couple) {
        let last = self.starts.last().and_then(|&s| self.points[s..].last());
        let joined = matches!(last, Some(last) if (*last - point).magnitude_squared() < 1e-6);
        if !joined {
            self.points.push(point);
        }
    }
}

impl Default for Flattener {
    fn default() -> Self {
        Self::new()
    }
}

fn unit_at(radians: Float) -> Couple {
    let (y, x) = radians.sin_cos();
    Couple::new(x, y)
}

impl PathSink for Flattener {
    fn move_to(&mut self, point: Couple) {
        self.starts.push(self.points.len());
        self.points.push(point);
    }

    fn line_to(&mut self, point: Couple) {
        self.continue_contour();
        self.points.push(point);
    }

    fn add_arc(&mut self, bounds: Bounds, start_angle: Float, sweep_angle: Float) {
        self.continue_contour();

        // pieces are built on the unit circle, then scaled to the ellipse
        let center = bounds_center(&bounds);
        let radii = (bounds.max - bounds.min) * 0.5;
        let to_canvas = |unit: Couple| center + unit * radii;
        let tolerance = self.tolerance;

        let angle = start_angle.to_radians();
        let sweep = sweep_angle.to_radians();
        let mut start = unit_at(angle);
        self.push_joined(to_canvas(start));

        // called for each piece covering at most 90°:
        let process = |start: Couple, end: Couple, points: &mut Vec<Couple>| {
            // uses https://stackoverflow.com/a/44829356
            let q2 = 1.0 + start.x * end.x + start.y * end.y;
            let k2 = (4.0 / 3.0) * ((2.0 * q2).sqrt() - q2) / (start.x * end.y - start.y * end.x);

            let curve = CubicBezier2 {
                start: to_canvas(start),
                ctrl0: to_canvas(Couple::new(start.x - k2 * start.y, start.y + k2 * start.x)),
                ctrl1: to_canvas(Couple::new(end.x + k2 * end.y, end.y - k2 * end.x)),
                end: to_canvas(end),
            };

            push_cubic_bezier_segments::<8>(&curve, tolerance, points);
        };

        if sweep == 0.0 || !sweep.is_finite() {
            return;
        }

        let pieces = (sweep.abs() / FRAC_PI_2 - 1e-4).ceil().max(1.0) as usize;
        let step = sweep / pieces as Float;
        for i in 1..=pieces {
            let end = unit_at(angle + step * i as Float);
            process(start, end, &mut self.points);
            start = end;
        }
    }
}

/// Software RGBA surface drawing recorded paths.
pub struct Canvas {
    width: usize,
    height: usize,
    pixels: Box<[RGBA8]>,
    mask: Box<[u8]>,
    flattener: Flattener,
    scratch: Vec<Couple>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        let length = width * height;
        Self {
            width,
            height,
            pixels: vec![RGBA8::new(0, 0, 0, 0); length].into_boxed_slice(),
            mask: vec![0; length].into_boxed_slice(),
            flattener: Flattener::new(),
            scratch: Vec::new(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[RGBA8] {
        &self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<RGBA8> {
        match x < self.width && y < self.height {
            true => Some(self.pixels[y * self.width + x]),
            false => None,
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(RGBA8::new(0, 0, 0, 0));
    }

    pub fn stroke<const SSAA: usize>(&mut self, path: &[PathStep], width: Float, color: RGBA8) {
        self.flattener.clear();
        replay(path, &mut self.flattener);

        let size = Vec2::new(self.width, self.height);
        for contour in self.flattener.contours() {
            if contour.len() < 2 {
                continue;
            }

            self.mask.fill(0);
            stroke::<SSAA>(contour, &mut self.mask, size, width);
            paint_mask(&mut self.pixels, &self.mask, color);
        }
    }

    /// Fills each contour, closing it first.
    pub fn fill<const SSAA: usize, const SSAA_SQ: usize>(&mut self, path: &[PathStep], color: RGBA8) {
        self.flattener.clear();
        replay(path, &mut self.flattener);

        let size = Vec2::new(self.width, self.height);
        for contour in self.flattener.contours() {
            if contour.len() < 3 {
                continue;
            }

            self.scratch.clear();
            self.scratch.extend_from_slice(contour);
            self.scratch.push(contour[0]);

            self.mask.fill(0);
            fill::<SSAA, SSAA_SQ>(&self.scratch, &mut self.mask, size);
            paint_mask(&mut self.pixels, &self.mask, color);
        }
    }
}

fn paint_mask(dst: &mut [RGBA8], mask: &[u8], color: RGBA8) {
    for (pixel, q) in dst.iter_mut().zip(mask) {
        if *q != 0 {
            blend_pixel(pixel, color, *q);
        }
    }
}

/// Source-over blending of `src_pixel`, scaled by `mask_alpha`.
#[inline(always)]
pub fn blend_pixel(dst_pixel: &mut RGBA8, src_pixel: RGBA8, mask_alpha: u8) {
    if src_pixel.a == 255 && mask_alpha == 255 {
        *dst_pixel = src_pixel;
    } else {
        let src_alpha = ((src_pixel.a as u32) * (mask_alpha as u32)) / 255;
        let u8_max = u8::MAX as u32;
        let dst_alpha = u8_max - src_alpha;

        let for_each = |src: u8, dst: &mut u8| {
            let src_scaled = (src as u32) * src_alpha;
            let dst_scaled = (*dst as u32) * dst_alpha;
            *dst = ((src_scaled + dst_scaled) / u8_max) as u8;
        };

        for_each(src_pixel.r, &mut dst_pixel.r);
        for_each(src_pixel.g, &mut dst_pixel.g);
        for_each(src_pixel.b, &mut dst_pixel.b);

        let a = src_alpha + ((dst_pixel.a as u32) * dst_alpha) / u8_max;
        dst_pixel.a = a.min(u8_max) as u8;
    }
}
