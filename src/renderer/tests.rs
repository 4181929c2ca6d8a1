use super::*;
use crate::colors::PaintColor;
use crate::config::PaintConfig;
use crate::device::DeviceProfile;
use crate::paint_drop::PaintDrop;
use palette::Srgb;
use ultraviolet::Vec2;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    Color(Srgb<u8>),
    Alpha(f32),
    Rect(Vec2, Vec2),
    Circle(Vec2, f32),
    Polygon(usize),
    Quadratic(Vec2, Vec2, Vec2, f32),
}

/// Records every call so tests can assert on the draw sequence.
pub(crate) struct RecordingSurface {
    pub width: f32,
    pub height: f32,
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height, ops: Vec::new() }
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }
    fn height(&self) -> f32 {
        self.height
    }
    fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }
    fn set_color(&mut self, color: Srgb<u8>) {
        self.ops.push(Op::Color(color));
    }
    fn set_global_alpha(&mut self, alpha: f32) {
        self.ops.push(Op::Alpha(alpha));
    }
    fn fill_rect(&mut self, origin: Vec2, size: Vec2) {
        self.ops.push(Op::Rect(origin, size));
    }
    fn fill_circle(&mut self, center: Vec2, radius: f32) {
        self.ops.push(Op::Circle(center, radius));
    }
    fn fill_polygon(&mut self, points: &[Vec2]) {
        self.ops.push(Op::Polygon(points.len()));
    }
    fn stroke_quadratic(&mut self, from: Vec2, control: Vec2, to: Vec2, line_width: f32) {
        self.ops.push(Op::Quadratic(from, control, to, line_width));
    }
}

fn drop_at(pos: Vec2, spread: f32) -> PaintDrop {
    PaintDrop {
        pos,
        size: 20.0,
        fall_speed: 2.0,
        drift: 0.5,
        color: PaintColor::Violet,
        opacity: 0.9,
        spread,
        spread_limit: 80.0,
        spread_rate: 0.3,
    }
}

fn plain_style() -> RenderStyle {
    RenderStyle { fade_alpha: 0.05, blob_points: 16, ornaments: false }
}

#[test]
fn frame_starts_with_fade_overlay() {
    let mut surface = RecordingSurface::new(200.0, 100.0);
    draw_frame(&mut surface, &[], &plain_style());
    assert_eq!(
        surface.ops,
        vec![
            Op::Color(Srgb::new(0, 0, 0)),
            Op::Alpha(0.05),
            Op::Rect(Vec2::zero(), Vec2::new(200.0, 100.0)),
            Op::Alpha(1.0),
        ]
    );
}

#[test]
fn falling_drop_is_an_opaque_circle() {
    let mut surface = RecordingSurface::new(200.0, 100.0);
    let drop = drop_at(Vec2::new(30.0, 40.0), 0.0);
    draw_drop(&mut surface, &drop, &plain_style());
    assert_eq!(
        surface.ops,
        vec![
            Op::Color(PaintColor::Violet.srgb()),
            Op::Alpha(0.9),
            Op::Circle(Vec2::new(30.0, 40.0), 20.0),
            Op::Alpha(1.0),
        ]
    );
}

#[test]
fn spreading_drop_is_a_translucent_blob() {
    let mut surface = RecordingSurface::new(200.0, 100.0);
    let drop = drop_at(Vec2::new(30.0, 40.0), 5.0);
    let style = RenderStyle { blob_points: 12, ..plain_style() };
    draw_drop(&mut surface, &drop, &style);
    assert_eq!(surface.ops.len(), 4);
    match surface.ops[1] {
        Op::Alpha(a) => assert!((a - 0.9 * 0.7).abs() < 1e-6),
        ref other => panic!("expected alpha, got {other:?}"),
    }
    assert_eq!(surface.ops[2], Op::Polygon(12));
    assert_eq!(surface.ops[3], Op::Alpha(1.0));
}

#[test]
fn alpha_is_reset_after_every_drop() {
    let mut surface = RecordingSurface::new(200.0, 100.0);
    let drops = vec![
        drop_at(Vec2::new(10.0, 10.0), 0.0),
        drop_at(Vec2::new(50.0, 90.0), 12.0),
        drop_at(Vec2::new(90.0, 20.0), 0.0),
    ];
    let style = RenderStyle { ornaments: true, ..plain_style() };
    draw_frame(&mut surface, &drops, &style);
    let resets_before_color = surface
        .ops
        .windows(2)
        .filter(|w| matches!(w[1], Op::Color(_)) && w[0] == Op::Alpha(1.0))
        .count();
    // Every drop after the fade begins right after a reset.
    assert_eq!(resets_before_color, drops.len());
    assert_eq!(surface.ops.last(), Some(&Op::Alpha(1.0)));
}

#[test]
fn ornaments_add_rings_and_tail() {
    let style = RenderStyle { ornaments: true, ..plain_style() };

    let mut surface = RecordingSurface::new(200.0, 100.0);
    draw_drop(&mut surface, &drop_at(Vec2::new(50.0, 50.0), 10.0), &style);
    let rings: Vec<f32> = surface
        .ops
        .iter()
        .filter_map(|op| match op {
            Op::Circle(_, r) => Some(*r),
            _ => None,
        })
        .collect();
    assert_eq!(rings.len(), 5);
    for (r, expected) in rings.iter().zip([3.0, 8.0, 13.0, 18.0, 23.0]) {
        assert!((r - expected).abs() < 1e-4, "{r} != {expected}");
    }

    let mut surface = RecordingSurface::new(200.0, 100.0);
    draw_drop(&mut surface, &drop_at(Vec2::new(50.0, 50.0), 0.0), &style);
    assert!(surface.ops.contains(&Op::Quadratic(
        Vec2::new(50.0, 30.0),
        Vec2::new(55.0, 10.0),
        Vec2::new(50.0, -10.0),
        10.0,
    )));
}

#[test]
fn blob_outline_follows_wobble_formula() {
    let drop = drop_at(Vec2::new(0.0, 0.0), 10.0);
    let outline = blob_outline(&drop, 16);
    assert_eq!(outline.len(), 16);
    for (i, p) in outline.iter().enumerate() {
        let angle = i as f32 * std::f32::consts::TAU / 16.0;
        let expected = 20.0 + 10.0 + (angle * 3.0).sin() * 10.0;
        assert!((p.mag() - expected.abs()).abs() < 1e-3, "vertex {i}");
    }
}

#[test]
fn zero_sized_surface_draws_nothing() {
    let mut surface = RecordingSurface::new(0.0, 0.0);
    draw_frame(&mut surface, &[drop_at(Vec2::zero(), 0.0)], &plain_style());
    assert!(surface.ops.is_empty());
}

#[test]
fn style_follows_profile() {
    let style = RenderStyle::from(&PaintConfig::for_profile(DeviceProfile::Constrained));
    assert_eq!(style, RenderStyle { fade_alpha: 0.1, blob_points: 12, ornaments: false });
}

#[test]
fn raster_fade_darkens_gradually() {
    let mut surface = RasterSurface::new(4, 4);
    surface.set_color(Srgb::new(255, 255, 255));
    surface.fill_rect(Vec2::zero(), Vec2::new(4.0, 4.0));
    assert_eq!(surface.pixel(0, 0), Some(Srgb::new(255, 255, 255)));

    draw_frame(&mut surface, &[], &RenderStyle { fade_alpha: 0.5, ..plain_style() });
    let p = surface.pixel(3, 3).map(|c| c.red);
    assert!(matches!(p, Some(127) | Some(128)), "{p:?}");
    assert_eq!(surface.lit_fraction(), 1.0);
}

#[test]
fn raster_circle_covers_its_disc() {
    let mut surface = RasterSurface::new(20, 20);
    surface.set_color(PaintColor::Gold.srgb());
    surface.fill_circle(Vec2::new(10.0, 10.0), 3.0);
    assert_eq!(surface.pixel(10, 10), Some(PaintColor::Gold.srgb()));
    assert_eq!(surface.pixel(0, 0), Some(Srgb::new(0, 0, 0)));
    let lit = surface.lit_fraction() * 400.0;
    // Disc of radius 3 covers roughly 28 pixels.
    assert!(lit > 20.0 && lit < 36.0, "{lit}");
}

#[test]
fn raster_polygon_and_clipping() {
    let mut surface = RasterSurface::new(10, 10);
    surface.set_color(Srgb::new(255, 0, 0));
    surface.fill_polygon(&[
        Vec2::new(-5.0, -5.0),
        Vec2::new(5.0, -5.0),
        Vec2::new(5.0, 5.0),
        Vec2::new(-5.0, 5.0),
    ]);
    assert_eq!(surface.pixel(4, 4), Some(Srgb::new(255, 0, 0)));
    assert_eq!(surface.pixel(5, 5), Some(Srgb::new(0, 0, 0)));
    assert!((surface.lit_fraction() - 0.25).abs() < 1e-6);
}

#[test]
fn raster_resize_clears_contents() {
    let mut surface = RasterSurface::new(4, 4);
    surface.set_color(Srgb::new(255, 255, 255));
    surface.fill_rect(Vec2::zero(), Vec2::new(4.0, 4.0));
    surface.resize(8.0, 2.0);
    assert_eq!((surface.width(), surface.height()), (8.0, 2.0));
    assert_eq!(surface.lit_fraction(), 0.0);
}

#[test]
fn raster_overflowing_size_becomes_empty() {
    let surface = RasterSurface::new(usize::MAX, 2);
    assert_eq!((surface.width(), surface.height()), (0.0, 0.0));
    assert_eq!(surface.lit_fraction(), 0.0);

    let mut surface = RasterSurface::new(4, 4);
    surface.resize(1.0e19, 1.0e19);
    assert_eq!((surface.width(), surface.height()), (0.0, 0.0));
    draw_frame(&mut surface, &[drop_at(Vec2::zero(), 0.0)], &plain_style());
}
