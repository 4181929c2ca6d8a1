// paint_drop/types.rs
// Contains the PaintDrop record, its phase, and the per-frame advance

use crate::colors::PaintColor;
use crate::config::{self, DropRanges};
use ultraviolet::Vec2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Falling,
    Spreading,
}

/// Why a drop was recycled during an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recycle {
    /// The blob grew past its spread limit.
    SpreadExhausted,
    /// The drop fell past the bottom margin.
    OffSurface,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PaintDrop {
    pub pos: Vec2,
    pub size: f32,
    pub fall_speed: f32,
    pub drift: f32,
    pub color: PaintColor,
    pub opacity: f32,
    pub spread: f32,
    pub spread_limit: f32,
    pub spread_rate: f32,
}

impl PaintDrop {
    /// A fresh drop just above the top edge, at a random column.
    pub fn randomize(width: f32, _height: f32, ranges: &DropRanges, rng: &mut fastrand::Rng) -> Self {
        Self {
            pos: Vec2::new(rng.f32() * width, config::RESPAWN_Y),
            size: ranges.size.sample(rng),
            fall_speed: ranges.fall_speed.sample(rng),
            color: PaintColor::random(rng),
            drift: ranges.drift.sample(rng),
            opacity: ranges.opacity.sample(rng),
            spread: 0.0,
            spread_limit: ranges.spread_limit.sample(rng),
            spread_rate: ranges.spread_rate.sample(rng),
        }
    }

    /// A drop for the initial population, scattered vertically across
    /// `[0, height)` so the first frames do not show one synchronized wave.
    pub fn scattered(width: f32, height: f32, ranges: &DropRanges, rng: &mut fastrand::Rng) -> Self {
        let mut drop = Self::randomize(width, height, ranges, rng);
        drop.pos.y = rng.f32() * height;
        drop
    }

    /// Vertical position past which the drop spreads instead of falling.
    pub fn spread_threshold(height: f32) -> f32 {
        height * config::SPREAD_THRESHOLD_FRACTION
    }

    pub fn phase(&self) -> Phase {
        if self.spread > 0.0 {
            Phase::Spreading
        } else {
            Phase::Falling
        }
    }

    /// Move the drop one frame forward. Returns the recycle reason if the drop
    /// finished its life cycle; the caller replaces it.
    pub fn advance(&mut self, height: f32) -> Option<Recycle> {
        self.pos.y += self.fall_speed;
        self.pos.x += self.drift;

        if self.pos.y > Self::spread_threshold(height) {
            self.spread += self.spread_rate;
            if self.spread > self.spread_limit {
                return Some(Recycle::SpreadExhausted);
            }
        }

        if self.pos.y > height + config::RECYCLE_MARGIN {
            return Some(Recycle::OffSurface);
        }
        None
    }
}
