// Software surface: an RGB float buffer with source-over blending.
// Pixel (x, y) is covered by a shape when its centre (x + 0.5, y + 0.5) is.

use super::surface::Surface;
use palette::Srgb;
use smallvec::SmallVec;
use std::ops::Range;
use ultraviolet::Vec2;

const CURVE_SEGMENTS: usize = 16;

pub struct RasterSurface {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 3]>,
    color: [f32; 3],
    alpha: f32,
}

/// Pixel indices whose centres fall inside `[lo, hi)`, clamped to `0..limit`.
fn covered(lo: f32, hi: f32, limit: usize) -> Range<usize> {
    let start = (lo - 0.5).ceil().max(0.0) as usize;
    let end = ((hi - 0.5).ceil().max(0.0) as usize).min(limit);
    start..end.max(start)
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.mag_sq();
    let t = if len_sq > 0.0 {
        ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0)
    } else {
        0.0
    };
    (p - (a + ab * t)).mag()
}

/// Buffer dimensions for a requested size; an unaddressable buffer collapses
/// to an empty surface.
fn checked_dims(width: usize, height: usize) -> (usize, usize, usize) {
    match width.checked_mul(height) {
        Some(len) => (width, height, len),
        None => {
            log::warn!("raster surface {width}x{height} is too large; using an empty surface");
            (0, 0, 0)
        }
    }
}

impl RasterSurface {
    pub fn new(width: usize, height: usize) -> Self {
        let (width, height, len) = checked_dims(width, height);
        Self {
            width,
            height,
            pixels: vec![[0.0; 3]; len],
            color: [0.0; 3],
            alpha: 1.0,
        }
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<Srgb<u8>> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let [r, g, b] = self.pixels[y * self.width + x];
        Some(Srgb::new(r, g, b).into_format())
    }

    /// Fraction of pixels that are visibly non-black.
    pub fn lit_fraction(&self) -> f32 {
        if self.pixels.is_empty() {
            return 0.0;
        }
        let lit = self
            .pixels
            .iter()
            .filter(|p| p.iter().any(|c| *c >= 1.0 / 255.0))
            .count();
        lit as f32 / self.pixels.len() as f32
    }

    fn blend(&mut self, x: usize, y: usize) {
        let a = self.alpha;
        let dst = &mut self.pixels[y * self.width + x];
        for (d, s) in dst.iter_mut().zip(self.color) {
            *d = *d * (1.0 - a) + s * a;
        }
    }

    fn bounds(points: &[Vec2]) -> (Vec2, Vec2) {
        points.iter().fold(
            (Vec2::broadcast(f32::INFINITY), Vec2::broadcast(f32::NEG_INFINITY)),
            |(lo, hi), p| (lo.min_by_component(*p), hi.max_by_component(*p)),
        )
    }
}

impl Surface for RasterSurface {
    fn width(&self) -> f32 {
        self.width as f32
    }

    fn height(&self) -> f32 {
        self.height as f32
    }

    fn resize(&mut self, width: f32, height: f32) {
        let (width, height, len) =
            checked_dims(width.max(0.0).round() as usize, height.max(0.0).round() as usize);
        self.width = width;
        self.height = height;
        self.pixels = vec![[0.0; 3]; len];
    }

    fn set_color(&mut self, color: Srgb<u8>) {
        let c: Srgb<f32> = color.into_format();
        self.color = [c.red, c.green, c.blue];
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        self.alpha = alpha.clamp(0.0, 1.0);
    }

    fn fill_rect(&mut self, origin: Vec2, size: Vec2) {
        for y in covered(origin.y, origin.y + size.y, self.height) {
            for x in covered(origin.x, origin.x + size.x, self.width) {
                self.blend(x, y);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        if radius <= 0.0 {
            return;
        }
        let r_sq = radius * radius;
        for y in covered(center.y - radius, center.y + radius, self.height) {
            for x in covered(center.x - radius, center.x + radius, self.width) {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - center;
                if d.mag_sq() <= r_sq {
                    self.blend(x, y);
                }
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Vec2]) {
        if points.len() < 3 {
            return;
        }
        let (lo, hi) = Self::bounds(points);
        for y in covered(lo.y, hi.y, self.height) {
            let yc = y as f32 + 0.5;
            let mut crossings: SmallVec<[f32; 16]> = SmallVec::new();
            for (i, a) in points.iter().enumerate() {
                let b = points[(i + 1) % points.len()];
                if (a.y <= yc) != (b.y <= yc) {
                    crossings.push(a.x + (yc - a.y) / (b.y - a.y) * (b.x - a.x));
                }
            }
            crossings.sort_by(|a, b| a.total_cmp(b));
            for pair in crossings.chunks_exact(2) {
                for x in covered(pair[0], pair[1], self.width) {
                    self.blend(x, y);
                }
            }
        }
    }

    fn stroke_quadratic(&mut self, from: Vec2, control: Vec2, to: Vec2, line_width: f32) {
        let half = line_width * 0.5;
        if half <= 0.0 {
            return;
        }
        let curve: SmallVec<[Vec2; CURVE_SEGMENTS + 1]> = (0..=CURVE_SEGMENTS)
            .map(|i| {
                let t = i as f32 / CURVE_SEGMENTS as f32;
                let u = 1.0 - t;
                from * (u * u) + control * (2.0 * u * t) + to * (t * t)
            })
            .collect();
        let (lo, hi) = Self::bounds(&curve);
        for y in covered(lo.y - half, hi.y + half, self.height) {
            for x in covered(lo.x - half, hi.x + half, self.width) {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let hit = curve
                    .windows(2)
                    .any(|seg| distance_to_segment(p, seg[0], seg[1]) <= half);
                if hit {
                    self.blend(x, y);
                }
            }
        }
    }
}
