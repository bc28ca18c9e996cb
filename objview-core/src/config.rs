/// Viewer settings, loadable from a JSON file
use std::fs;
use std::path::Path;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assemble::TriangulationPolicy;
use crate::renderer::{Renderer, SolidRenderer, WireframeRenderer};
use crate::shading::Light;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Solid,
    Wireframe,
}

impl RenderMode {
    pub fn renderer(self) -> Box<dyn Renderer> {
        match self {
            RenderMode::Solid => Box::new(SolidRenderer),
            RenderMode::Wireframe => Box::new(WireframeRenderer),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Pixels per model unit at zoom 1.
    pub scale: f32,
    pub light_direction: [f32; 3],
    /// 0x00RRGGBB
    pub background: u32,
    pub triangulation: TriangulationPolicy,
    pub render_mode: RenderMode,
    /// Degrees of rotation per unit of pointer motion.
    pub rotate_sensitivity: f32,
    /// Zoom change per wheel notch.
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scale: 150.0,
            light_direction: [0.0, 0.0, 1.0],
            background: 0x0000_0000,
            triangulation: TriangulationPolicy::Drop,
            render_mode: RenderMode::Solid,
            rotate_sensitivity: 0.5,
            zoom_step: 0.1,
            min_zoom: 0.05,
            max_zoom: 20.0,
        }
    }
}

impl ViewerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the camera and renderer cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: String| Err(ConfigError::Invalid(message));

        if !(self.scale.is_finite() && self.scale > 0.0) {
            return invalid(format!("scale must be positive, got {}", self.scale));
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return invalid(format!("zoom_step must be positive, got {}", self.zoom_step));
        }
        if !self.rotate_sensitivity.is_finite() {
            return invalid(format!(
                "rotate_sensitivity must be finite, got {}",
                self.rotate_sensitivity
            ));
        }
        if !(self.min_zoom.is_finite() && self.max_zoom.is_finite())
            || self.min_zoom <= 0.0
            || self.min_zoom > self.max_zoom
        {
            return invalid(format!(
                "zoom limits must satisfy 0 < min_zoom <= max_zoom, got {} and {}",
                self.min_zoom, self.max_zoom
            ));
        }
        if !self.light_direction.iter().all(|c| c.is_finite()) {
            return invalid(format!(
                "light_direction must be finite, got {:?}",
                self.light_direction
            ));
        }
        Ok(())
    }

    pub fn light(&self) -> Light {
        Light::directional(Vector3::from(self.light_direction))
    }
}
