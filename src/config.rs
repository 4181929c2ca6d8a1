// Centralized configuration for paint drop parameters

use crate::device::DeviceProfile;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// ====================
// Phase Boundaries
// ====================
/// Fraction of the surface height past which a drop stops falling and spreads.
pub const SPREAD_THRESHOLD_FRACTION: f32 = 0.7;
/// Distance below the bottom edge at which a drop is recycled.
pub const RECYCLE_MARGIN: f32 = 100.0;
/// Vertical position a recycled drop restarts from (above the top edge).
pub const RESPAWN_Y: f32 = -50.0;

// ====================
// Drop Attributes
// ====================
pub const DROP_SIZE_MIN: f32 = 10.0;
pub const DROP_SIZE_SPAN_DESKTOP: f32 = 30.0;
pub const DROP_SIZE_SPAN_CONSTRAINED: f32 = 20.0;
pub const FALL_SPEED_MIN: f32 = 1.0;
pub const FALL_SPEED_SPAN_DESKTOP: f32 = 3.0;
pub const FALL_SPEED_SPAN_CONSTRAINED: f32 = 2.0;
pub const DRIFT_MAX: f32 = 1.0;
pub const OPACITY_MIN: f32 = 0.8;
pub const OPACITY_MAX: f32 = 1.0;
pub const SPREAD_LIMIT_MIN: f32 = 50.0;
pub const SPREAD_LIMIT_SPAN_DESKTOP: f32 = 100.0;
pub const SPREAD_LIMIT_SPAN_CONSTRAINED: f32 = 60.0;
pub const SPREAD_RATE_MIN: f32 = 0.2;
pub const SPREAD_RATE_SPAN_DESKTOP: f32 = 0.5;
pub const SPREAD_RATE_SPAN_CONSTRAINED: f32 = 0.3;

// ====================
// Rendering
// ====================
pub const CAPACITY_DESKTOP: usize = 30;
pub const CAPACITY_CONSTRAINED: usize = 15;
/// Alpha of the black overlay painted each frame (trail fade).
pub const FADE_ALPHA_DESKTOP: f32 = 0.05;
pub const FADE_ALPHA_CONSTRAINED: f32 = 0.1;
/// Angular samples around a spreading blob.
pub const BLOB_POINTS_DESKTOP: usize = 16;
pub const BLOB_POINTS_CONSTRAINED: usize = 12;
/// Amplitude of the `sin(3θ)` wobble on the blob outline.
pub const BLOB_WOBBLE: f32 = 10.0;
pub const BLOB_WOBBLE_LOBES: f32 = 3.0;
/// Blob fill alpha as a fraction of the drop opacity.
pub const BLOB_ALPHA_FACTOR: f32 = 0.7;
/// Detail rings drawn inside a blob when ornaments are enabled.
pub const DETAIL_RING_COUNT: usize = 5;
pub const DETAIL_RING_SPREAD_FACTOR: f32 = 0.3;
pub const DETAIL_RING_STEP: f32 = 5.0;
pub const DETAIL_ALPHA_FACTOR: f32 = 0.3;
/// Tail stroked behind a falling drop when ornaments are enabled.
pub const TAIL_ALPHA_FACTOR: f32 = 0.5;
pub const TAIL_WIDTH_FACTOR: f32 = 0.5;
pub const TAIL_DRIFT_BEND: f32 = 10.0;

// ====================
// Scheduling / Host
// ====================
pub const DEFAULT_FRAME_RATE: f32 = 60.0;
pub const DEFAULT_SURFACE_WIDTH: f32 = 1280.0;
pub const DEFAULT_SURFACE_HEIGHT: f32 = 720.0;
/// Largest accepted surface edge, in pixels.
pub const MAX_SURFACE_DIMENSION: f32 = 16384.0;
/// Slowest accepted pacing of the frame timer.
pub const MIN_FRAME_RATE: f32 = 1.0;
pub const DEFAULT_HEADLESS_FRAMES: usize = 600;
pub const DEFAULT_CONFIG_FILE: &str = "paint_drops.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid { field, reason: reason.into() }
    }
}

/// Check one surface edge: finite, positive, at most [`MAX_SURFACE_DIMENSION`].
pub fn validate_dimension(field: &'static str, value: f32) -> Result<f32, ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::invalid(field, format!("{value} is not a positive size")));
    }
    if value > MAX_SURFACE_DIMENSION {
        return Err(ConfigError::invalid(
            field,
            format!("{value} exceeds the {MAX_SURFACE_DIMENSION} pixel limit"),
        ));
    }
    Ok(value)
}

/// Half-open random interval `[min, max)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// `min + span * r` where `span = max - min` and `r` is drawn from `[0, 1)`.
    pub fn sample(&self, rng: &mut fastrand::Rng) -> f32 {
        self.min + rng.f32() * (self.max - self.min)
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, field: &'static str, positive: bool) -> Result<(), ConfigError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(ConfigError::invalid(field, "bounds must be finite"));
        }
        if self.min > self.max {
            return Err(ConfigError::invalid(
                field,
                format!("min {} exceeds max {}", self.min, self.max),
            ));
        }
        if positive && self.min <= 0.0 {
            return Err(ConfigError::invalid(field, "must be strictly positive"));
        }
        Ok(())
    }
}

/// Random ranges a fresh drop is drawn from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DropRanges {
    pub size: Span,
    pub fall_speed: Span,
    pub drift: Span,
    pub opacity: Span,
    pub spread_limit: Span,
    pub spread_rate: Span,
}

impl DropRanges {
    pub fn for_profile(profile: DeviceProfile) -> Self {
        let (size, speed, limit, rate) = match profile {
            DeviceProfile::Desktop => (
                DROP_SIZE_SPAN_DESKTOP,
                FALL_SPEED_SPAN_DESKTOP,
                SPREAD_LIMIT_SPAN_DESKTOP,
                SPREAD_RATE_SPAN_DESKTOP,
            ),
            DeviceProfile::Constrained => (
                DROP_SIZE_SPAN_CONSTRAINED,
                FALL_SPEED_SPAN_CONSTRAINED,
                SPREAD_LIMIT_SPAN_CONSTRAINED,
                SPREAD_RATE_SPAN_CONSTRAINED,
            ),
        };
        Self {
            size: Span::new(DROP_SIZE_MIN, DROP_SIZE_MIN + size),
            fall_speed: Span::new(FALL_SPEED_MIN, FALL_SPEED_MIN + speed),
            drift: Span::new(-DRIFT_MAX, DRIFT_MAX),
            opacity: Span::new(OPACITY_MIN, OPACITY_MAX),
            spread_limit: Span::new(SPREAD_LIMIT_MIN, SPREAD_LIMIT_MIN + limit),
            spread_rate: Span::new(SPREAD_RATE_MIN, SPREAD_RATE_MIN + rate),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.size.validate("ranges.size", true)?;
        self.fall_speed.validate("ranges.fall_speed", true)?;
        self.drift.validate("ranges.drift", false)?;
        self.opacity.validate("ranges.opacity", true)?;
        if self.opacity.max > 1.0 {
            return Err(ConfigError::invalid("ranges.opacity", "max must not exceed 1.0"));
        }
        self.spread_limit.validate("ranges.spread_limit", true)?;
        self.spread_rate.validate("ranges.spread_rate", true)?;
        Ok(())
    }
}

impl Default for DropRanges {
    fn default() -> Self {
        Self::for_profile(DeviceProfile::Desktop)
    }
}

/// Runtime configuration of one paint animation instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaintConfig {
    pub profile: DeviceProfile,
    pub capacity: usize,
    pub fade_alpha: f32,
    pub blob_points: usize,
    /// Detail rings on blobs and tails on falling drops.
    pub ornaments: bool,
    pub ranges: DropRanges,
    pub frame_rate: f32,
    /// Fixed seed for reproducible runs; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl PaintConfig {
    pub fn for_profile(profile: DeviceProfile) -> Self {
        let constrained = profile.is_constrained();
        Self {
            profile,
            capacity: if constrained { CAPACITY_CONSTRAINED } else { CAPACITY_DESKTOP },
            fade_alpha: if constrained { FADE_ALPHA_CONSTRAINED } else { FADE_ALPHA_DESKTOP },
            blob_points: if constrained { BLOB_POINTS_CONSTRAINED } else { BLOB_POINTS_DESKTOP },
            ornaments: !constrained,
            ranges: DropRanges::for_profile(profile),
            frame_rate: DEFAULT_FRAME_RATE,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fade_alpha > 0.0 && self.fade_alpha <= 1.0) {
            return Err(ConfigError::invalid(
                "fade_alpha",
                format!("{} is outside (0, 1]", self.fade_alpha),
            ));
        }
        if self.blob_points < 3 {
            return Err(ConfigError::invalid("blob_points", "a blob needs at least 3 points"));
        }
        if !(self.frame_rate.is_finite() && self.frame_rate >= MIN_FRAME_RATE) {
            return Err(ConfigError::invalid(
                "frame_rate",
                format!("{} is below {} fps", self.frame_rate, MIN_FRAME_RATE),
            ));
        }
        self.ranges.validate()
    }
}

impl Default for PaintConfig {
    fn default() -> Self {
        Self::for_profile(DeviceProfile::Desktop)
    }
}
