// init_config.rs
// Handles loading and parsing the start-up configuration from paint_drops.toml

use crate::config::{self, ConfigError, PaintConfig};
use crate::device::DeviceProfile;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct InitConfig {
    pub surface: Option<SurfaceConfig>,
    #[serde(default)]
    pub animation: AnimationConfig,
    pub headless: Option<HeadlessConfig>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SurfaceConfig {
    pub width: Option<f32>,
    pub height: Option<f32>,
    /// Host user agent; selects the device profile when none is given.
    pub user_agent: Option<String>,
}

/// Overrides on top of the profile defaults. Omitted fields keep the value
/// the resolved profile prescribes.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AnimationConfig {
    pub profile: Option<DeviceProfile>,
    pub capacity: Option<usize>,
    pub fade_alpha: Option<f32>,
    pub blob_points: Option<usize>,
    pub ornaments: Option<bool>,
    pub frame_rate: Option<f32>,
    pub seed: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HeadlessConfig {
    pub frames: Option<usize>,
}

impl InitConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Load `paint_drops.toml` from the working directory, falling back to
    /// defaults when the file does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        match Self::load_from_file(config::DEFAULT_CONFIG_FILE) {
            Err(ConfigError::Io { source, .. }) if source.kind() == std::io::ErrorKind::NotFound => {
                log::info!("{} not found, using defaults", config::DEFAULT_CONFIG_FILE);
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Surface dimensions, using the global defaults when values are not
    /// provided. Each edge must be finite, positive and within
    /// [`config::MAX_SURFACE_DIMENSION`].
    pub fn surface_size(&self) -> Result<(f32, f32), ConfigError> {
        let surface = self.surface.as_ref();
        let width = surface
            .and_then(|s| s.width)
            .unwrap_or(config::DEFAULT_SURFACE_WIDTH);
        let height = surface
            .and_then(|s| s.height)
            .unwrap_or(config::DEFAULT_SURFACE_HEIGHT);
        Ok((
            config::validate_dimension("surface.width", width)?,
            config::validate_dimension("surface.height", height)?,
        ))
    }

    /// Explicit profile, else detected from the user agent, else desktop.
    pub fn profile(&self) -> DeviceProfile {
        self.animation.profile.unwrap_or_else(|| {
            self.surface
                .as_ref()
                .and_then(|s| s.user_agent.as_deref())
                .map(DeviceProfile::from_user_agent)
                .unwrap_or_default()
        })
    }

    pub fn headless_frames(&self) -> usize {
        self.headless
            .as_ref()
            .and_then(|h| h.frames)
            .unwrap_or(config::DEFAULT_HEADLESS_FRAMES)
    }

    /// Resolve the profile defaults plus overrides into a validated config.
    pub fn paint_config(&self) -> Result<PaintConfig, ConfigError> {
        let a = &self.animation;
        let mut cfg = PaintConfig::for_profile(self.profile());
        if let Some(capacity) = a.capacity {
            cfg.capacity = capacity;
        }
        if let Some(fade_alpha) = a.fade_alpha {
            cfg.fade_alpha = fade_alpha;
        }
        if let Some(blob_points) = a.blob_points {
            cfg.blob_points = blob_points;
        }
        if let Some(ornaments) = a.ornaments {
            cfg.ornaments = ornaments;
        }
        if let Some(frame_rate) = a.frame_rate {
            cfg.frame_rate = frame_rate;
        }
        cfg.seed = a.seed;
        cfg.validate()?;
        Ok(cfg)
    }
}
