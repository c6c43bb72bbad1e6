//! Centralized runtime options with TOML preset support.
//!
//! All tweakables (background and label color, shader focal points and
//! ripple parameters, animation timings, camera projection) are
//! consolidated here. Options serialize to/from TOML; every section is
//! `#[serde(default)]` so a partial file overriding one section works.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Background and cursor-feedback settings.
    pub display: DisplayOptions,
    /// Ripple shader parameters.
    pub shader: ShaderOptions,
    /// Click-feedback animation timings.
    pub animation: AnimationOptions,
    /// Camera projection and text-plane placement.
    pub camera: CameraOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`NavError::Io`] if the file is unreadable or
    /// [`NavError::OptionsParse`] for invalid TOML.
    pub fn load(path: &Path) -> Result<Self, NavError> {
        let content = std::fs::read_to_string(path).map_err(NavError::Io)?;
        toml::from_str(&content)
            .map_err(|e| NavError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`NavError::OptionsParse`] if serialization fails or
    /// [`NavError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), NavError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| NavError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(NavError::Io)?;
        }
        std::fs::write(path, content).map_err(NavError::Io)
    }
}

/// Background and cursor-feedback settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Clear color behind the labels (linear RGBA).
    pub background: [f64; 4],
    /// Switch the platform cursor to a pointer while hovering a label.
    pub hover_cursor: bool,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            background: [0.02, 0.02, 0.035, 1.0],
            hover_cursor: true,
        }
    }
}

/// Ripple shader parameters shared by all labels at mount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShaderOptions {
    /// Orbit base of the first focal point, in NDC.
    pub focal_a: [f32; 2],
    /// Orbit base of the second focal point, in NDC.
    pub focal_b: [f32; 2],
    /// Radius of the slow focal-point drift orbit (0 pins the points).
    pub drift_radius: f32,
    /// Angular rate of the drift orbit, radians per second.
    pub drift_rate: f32,
    /// Spiral phase advance per second.
    pub speed: f32,
    /// Angular band count of each spiral field.
    pub band_count: f32,
    /// Base label color (linear RGB).
    pub color: [f32; 3],
    /// Base opacity before the glow boost.
    pub base_opacity: f32,
    /// Vertex displacement strength at rest.
    pub distortion_strength: f32,
    /// Glow/opacity boost strength at rest.
    pub ripple_intensity: f32,
}

impl Default for ShaderOptions {
    fn default() -> Self {
        Self {
            focal_a: [-0.4, 0.25],
            focal_b: [0.45, -0.3],
            drift_radius: 0.2,
            drift_rate: 0.3,
            speed: 1.5,
            band_count: 6.0,
            color: [0.85, 0.9, 1.0],
            base_opacity: 0.95,
            distortion_strength: 0.015,
            ripple_intensity: 1.0,
        }
    }
}

/// Click-feedback animation timings and peaks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationOptions {
    /// Scale-up phase duration, milliseconds.
    pub activate_ms: u64,
    /// Hold at peak, milliseconds.
    pub hold_ms: u64,
    /// Revert phase duration, milliseconds.
    pub revert_ms: u64,
    /// Delay from activation to navigation, milliseconds. Kept shorter
    /// than the total animation so the feedback is visible before the
    /// route changes.
    pub nav_delay_ms: u64,
    /// Peak scale multiplier during activation.
    pub scale_peak: f32,
    /// Peak distortion/ripple multiplier during activation.
    pub effect_peak: f32,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            activate_ms: 250,
            hold_ms: 150,
            revert_ms: 450,
            nav_delay_ms: 600,
            scale_peak: 1.4,
            effect_peak: 2.0,
        }
    }
}

/// Camera projection and text-plane placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane.
    pub znear: f32,
    /// Far clipping plane.
    pub zfar: f32,
    /// Distance from the camera to the text plane.
    pub distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            distance: 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[shader]
band_count = 9.0
";
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.shader.band_count, 9.0);
        // Everything else should be default
        assert_eq!(opts.shader.speed, 1.5);
        assert_eq!(opts.animation.nav_delay_ms, 600);
        assert_eq!(opts.camera.distance, 8.0);
    }

    #[test]
    fn navigation_fires_before_revert_completes() {
        // The navigate-mid-revert timing is deliberate; the defaults
        // must keep the delay inside the activate+hold+revert window.
        let a = AnimationOptions::default();
        assert!(a.nav_delay_ms < a.activate_ms + a.hold_ms + a.revert_ms);
        assert!(a.nav_delay_ms >= a.activate_ms + a.hold_ms);
    }
}
