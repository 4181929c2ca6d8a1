// simulation/simulation.rs
// Contains the PaintSimulation struct and its per-frame update step

use crate::config::PaintConfig;
use crate::paint_drop::{PaintDrop, Phase, Recycle};
use crate::profile_scope;

/// Counters accumulated across update steps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimulationStats {
    pub frames: u64,
    pub spread_exhausted: u64,
    pub off_surface: u64,
}

impl SimulationStats {
    pub fn recycled(&self) -> u64 {
        self.spread_exhausted + self.off_surface
    }
}

/// The owned drop collection and the surface dimensions its phase
/// boundaries are computed from.
pub struct PaintSimulation {
    pub width: f32,
    pub height: f32,
    drops: Vec<PaintDrop>,
    config: PaintConfig,
    rng: fastrand::Rng,
    stats: SimulationStats,
}

impl PaintSimulation {
    pub fn new(width: f32, height: f32, config: PaintConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        };
        let drops = (0..config.capacity)
            .map(|_| PaintDrop::scattered(width, height, &config.ranges, &mut rng))
            .collect();
        log::debug!(
            "paint simulation: {} drops on {}x{} ({:?})",
            config.capacity,
            width,
            height,
            config.profile
        );
        Self {
            width,
            height,
            drops,
            config,
            rng,
            stats: SimulationStats::default(),
        }
    }

    pub fn drops(&self) -> &[PaintDrop] {
        &self.drops
    }

    /// Direct access for hosts and tests that need to place drops.
    pub fn drops_mut(&mut self) -> &mut [PaintDrop] {
        &mut self.drops
    }

    pub fn config(&self) -> &PaintConfig {
        &self.config
    }

    pub fn stats(&self) -> SimulationStats {
        self.stats
    }

    /// Number of drops in each phase: `(falling, spreading)`.
    pub fn phase_counts(&self) -> (usize, usize) {
        let spreading = self
            .drops
            .iter()
            .filter(|d| d.phase() == Phase::Spreading)
            .count();
        (self.drops.len() - spreading, spreading)
    }

    pub fn step(&mut self) {
        profile_scope!("paint_update");
        let (width, height) = (self.width, self.height);
        for drop in &mut self.drops {
            if let Some(reason) = drop.advance(height) {
                match reason {
                    Recycle::SpreadExhausted => self.stats.spread_exhausted += 1,
                    Recycle::OffSurface => self.stats.off_surface += 1,
                }
                *drop = PaintDrop::randomize(width, height, &self.config.ranges, &mut self.rng);
            }
        }
        self.stats.frames += 1;
    }

    /// Adopt new surface dimensions. Existing drops keep their state; only
    /// future phase boundaries and respawn columns change.
    pub fn resize(&mut self, width: f32, height: f32) {
        if width == self.width && height == self.height {
            return;
        }
        log::debug!(
            "paint simulation resized {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
    }
}
