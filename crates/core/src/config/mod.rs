use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{
    geometry::RotationState, render::Surface, scene::SphereParams, timeline::DEFAULT_SPIN,
    DemoError, Result,
};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub sorter: SorterConfig,
    pub graphics: GraphicsConfig,
}

impl AppConfig {
    /// Parses a JSON document. Missing fields fall back to their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        tracing::debug!(?path, "loaded configuration");
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<()> {
        if self.sorter.min_value > self.sorter.max_value {
            return Err(DemoError::invalid(format!(
                "sorter.min_value ({}) exceeds sorter.max_value ({})",
                self.sorter.min_value, self.sorter.max_value
            )));
        }
        let surface = self.graphics.surface;
        if !(surface.width > 0.0 && surface.height > 0.0) {
            return Err(DemoError::invalid(format!(
                "graphics.surface must be positive, got {}x{}",
                surface.width, surface.height
            )));
        }
        Ok(())
    }
}

/// Settings for the sorting visualiser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SorterConfig {
    pub array_len: usize,
    pub min_value: i64,
    pub max_value: i64,
    pub step_interval_ms: u64,
}

impl Default for SorterConfig {
    fn default() -> Self {
        Self {
            array_len: 10,
            min_value: 1,
            max_value: 100,
            step_interval_ms: 500,
        }
    }
}

impl SorterConfig {
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

/// Settings for the 3D graphics demo.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsConfig {
    pub surface: Surface,
    pub sphere: SphereParams,
    /// Rotation added on every animation tick.
    pub spin: RotationState,
    pub frame_interval_ms: u64,
}

impl Default for GraphicsConfig {
    fn default() -> Self {
        Self {
            surface: Surface::default(),
            sphere: SphereParams::default(),
            spin: DEFAULT_SPIN,
            frame_interval_ms: 16,
        }
    }
}
