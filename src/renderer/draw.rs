// Drawing routines for the paint drop effect

use super::surface::Surface;
use crate::colors::fade_color;
use crate::config::{self, PaintConfig};
use crate::paint_drop::{PaintDrop, Phase};
use crate::profile_scope;
use smallvec::SmallVec;
use ultraviolet::Vec2;

/// Per-frame drawing parameters taken from the paint configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderStyle {
    pub fade_alpha: f32,
    pub blob_points: usize,
    pub ornaments: bool,
}

impl From<&PaintConfig> for RenderStyle {
    fn from(config: &PaintConfig) -> Self {
        Self {
            fade_alpha: config.fade_alpha,
            blob_points: config.blob_points,
            ornaments: config.ornaments,
        }
    }
}

/// Blob outline vertices: `points` samples at even angles, radius
/// `size + spread + sin(3θ)·10`.
pub fn blob_outline(drop: &PaintDrop, points: usize) -> SmallVec<[Vec2; 16]> {
    let step = std::f32::consts::TAU / points as f32;
    (0..points)
        .map(|i| {
            let angle = i as f32 * step;
            let radius = drop.size
                + drop.spread
                + (angle * config::BLOB_WOBBLE_LOBES).sin() * config::BLOB_WOBBLE;
            drop.pos + Vec2::new(angle.cos(), angle.sin()) * radius
        })
        .collect()
}

/// Fade the previous frame toward black, then draw every drop.
pub fn draw_frame<S: Surface + ?Sized>(surface: &mut S, drops: &[PaintDrop], style: &RenderStyle) {
    profile_scope!("paint_render");
    let (width, height) = (surface.width(), surface.height());
    if width <= 0.0 || height <= 0.0 {
        return;
    }

    surface.set_color(fade_color());
    surface.set_global_alpha(style.fade_alpha);
    surface.fill_rect(Vec2::zero(), Vec2::new(width, height));
    surface.set_global_alpha(1.0);

    for drop in drops {
        draw_drop(surface, drop, style);
    }
}

pub fn draw_drop<S: Surface + ?Sized>(surface: &mut S, drop: &PaintDrop, style: &RenderStyle) {
    surface.set_color(drop.color.srgb());
    match drop.phase() {
        Phase::Spreading => {
            surface.set_global_alpha(drop.opacity * config::BLOB_ALPHA_FACTOR);
            surface.fill_polygon(&blob_outline(drop, style.blob_points));

            if style.ornaments {
                surface.set_global_alpha(drop.opacity * config::DETAIL_ALPHA_FACTOR);
                for j in 0..config::DETAIL_RING_COUNT {
                    let radius = drop.spread * config::DETAIL_RING_SPREAD_FACTOR
                        + j as f32 * config::DETAIL_RING_STEP;
                    surface.fill_circle(drop.pos, radius);
                }
            }
        }
        Phase::Falling => {
            surface.set_global_alpha(drop.opacity);
            surface.fill_circle(drop.pos, drop.size);

            if style.ornaments {
                let from = drop.pos - Vec2::new(0.0, drop.size);
                let control = drop.pos
                    + Vec2::new(drop.drift * config::TAIL_DRIFT_BEND, -2.0 * drop.size);
                let to = drop.pos - Vec2::new(0.0, 3.0 * drop.size);
                surface.set_global_alpha(drop.opacity * config::TAIL_ALPHA_FACTOR);
                surface.stroke_quadratic(from, control, to, drop.size * config::TAIL_WIDTH_FACTOR);
            }
        }
    }
    surface.set_global_alpha(1.0);
}
