// app/frame_loop.rs
// Owns one paint animation instance and drives it from frame callbacks

use super::scheduler::{FrameRequest, FrameScheduler};
use crate::config::{ConfigError, PaintConfig};
use crate::device::DeviceProfile;
use crate::renderer::{draw_frame, RenderStyle, Surface};
use crate::simulation::PaintSimulation;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Visibility {
    Visible,
    Hidden,
}

/// Simulation, surface and scheduler for one animation. Without a surface
/// every operation is a no-op.
///
/// The configuration is validated on construction, so an instance built
/// from code gets the same checks as one loaded from TOML.
pub struct FrameLoop<S: Surface, F: FrameScheduler> {
    simulation: Option<PaintSimulation>,
    surface: Option<S>,
    scheduler: F,
    style: RenderStyle,
    profile: DeviceProfile,
    pending: Option<FrameRequest>,
    started: bool,
    paused: bool,
    hidden: bool,
    power_saving: bool,
    frames_rendered: u64,
}

impl<S: Surface, F: FrameScheduler> FrameLoop<S, F> {
    pub fn new(surface: Option<S>, scheduler: F, config: PaintConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let style = RenderStyle::from(&config);
        let profile = config.profile;
        let simulation = match &surface {
            Some(s) => Some(PaintSimulation::new(s.width(), s.height(), config)),
            None => {
                log::debug!("no drawing surface; paint animation disabled");
                None
            }
        };
        Ok(Self {
            simulation,
            surface,
            scheduler,
            style,
            profile,
            pending: None,
            started: false,
            paused: false,
            hidden: false,
            power_saving: false,
            frames_rendered: 0,
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.surface.is_some()
    }

    /// A frame callback is outstanding.
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn simulation(&self) -> Option<&PaintSimulation> {
        self.simulation.as_ref()
    }

    pub fn simulation_mut(&mut self) -> Option<&mut PaintSimulation> {
        self.simulation.as_mut()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn start(&mut self) {
        if !self.is_enabled() || self.started {
            return;
        }
        log::debug!("paint animation started");
        self.started = true;
        self.reconcile();
    }

    /// Stop scheduling frames. Idempotent; drop state is kept.
    pub fn pause(&mut self) {
        self.paused = true;
        self.reconcile();
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.reconcile();
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.hidden = visibility == Visibility::Hidden;
        self.reconcile();
    }

    /// Battery-saver hint. Constrained devices stop animating while it is on.
    pub fn set_power_saving(&mut self, enabled: bool) {
        self.power_saving = enabled;
        self.reconcile();
    }

    /// Resize the surface, then re-read its dimensions into the simulation.
    pub fn resize(&mut self, width: f32, height: f32) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.resize(width, height);
        if let Some(sim) = self.simulation.as_mut() {
            sim.resize(surface.width(), surface.height());
        }
    }

    /// Frame callback entry point. Runs one update and render pass if
    /// `request` is the outstanding one, then schedules the next frame.
    /// Returns whether a frame ran.
    pub fn on_frame(&mut self, request: FrameRequest) -> bool {
        if self.pending != Some(request) {
            log::trace!("discarding stale frame request {}", request.id());
            return false;
        }
        self.pending = None;

        let (Some(sim), Some(surface)) = (self.simulation.as_mut(), self.surface.as_mut()) else {
            return false;
        };
        sim.step();
        draw_frame(surface, sim.drops(), &self.style);
        self.frames_rendered += 1;

        self.pending = Some(self.scheduler.request_frame());
        true
    }

    fn should_run(&self) -> bool {
        self.is_enabled()
            && self.started
            && !self.paused
            && !self.hidden
            && !(self.power_saving && self.profile.is_constrained())
    }

    fn reconcile(&mut self) {
        match (self.should_run(), self.pending) {
            (true, None) => {
                self.pending = Some(self.scheduler.request_frame());
                log::debug!("paint animation scheduled");
            }
            (false, Some(request)) => {
                self.scheduler.cancel_frame(request);
                self.pending = None;
                log::debug!("paint animation suspended");
            }
            _ => {}
        }
    }
}

#[cfg(test)]
#[path = "frame_loop_tests.rs"]
mod tests;
