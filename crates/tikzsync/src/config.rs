//! Configuration types for tikzsync sessions.
//!
//! All types implement [`serde::Deserialize`] and every field has a default,
//! so a configuration file only needs to mention what it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining the sections below.
//! - [`ViewportConfig`] - Preview canvas size and scale for the geometry mapper.
//! - [`SamplingConfig`] - Bounds used when sampling plot expressions.
//! - [`PreviewConfig`] - Visual options of the exported preview.
//!
//! # Example
//!
//! ```
//! # use tikzsync::config::AppConfig;
//! let config = AppConfig::default();
//! assert!(config.viewport().viewport().is_ok());
//! assert!(config.preview().background_color().is_ok());
//! ```

use serde::Deserialize;

use tikzsync_core::{
    color::Color,
    geometry::{Size, Viewport},
};
use tikzsync_parser::expr::SampleLimits;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Geometry mapper section.
    #[serde(default)]
    viewport: ViewportConfig,

    /// Plot sampling section.
    #[serde(default)]
    sampling: SamplingConfig,

    /// Preview rendering section.
    #[serde(default)]
    preview: PreviewConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(viewport: ViewportConfig, sampling: SamplingConfig, preview: PreviewConfig) -> Self {
        Self {
            viewport,
            sampling,
            preview,
        }
    }

    pub fn viewport(&self) -> &ViewportConfig {
        &self.viewport
    }

    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    pub fn preview(&self) -> &PreviewConfig {
        &self.preview
    }
}

/// Preview canvas configuration.
///
/// The logical origin is always placed at the canvas center.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Canvas width in pixels.
    width: f64,
    /// Canvas height in pixels.
    height: f64,
    /// Pixels per logical unit.
    scale: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: Viewport::DEFAULT_WIDTH,
            height: Viewport::DEFAULT_HEIGHT,
            scale: Viewport::DEFAULT_SCALE,
        }
    }
}

impl ViewportConfig {
    pub fn new(width: f64, height: f64, scale: f64) -> Self {
        Self {
            width,
            height,
            scale,
        }
    }

    /// Returns the configured [`Viewport`].
    ///
    /// # Errors
    ///
    /// Returns an error if any dimension is not a positive finite number.
    pub fn viewport(&self) -> Result<Viewport, String> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("scale", self.scale),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!(
                    "Invalid viewport {name} in config: expected a positive number, got {value}"
                ));
            }
        }
        Ok(Viewport::new(Size::new(self.width, self.height), self.scale))
    }
}

/// Plot sampling bounds.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Upper bound on samples per plot.
    max_samples: u32,
    /// Sampled values beyond this magnitude are dropped.
    clamp: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_samples: SampleLimits::DEFAULT_MAX_SAMPLES,
            clamp: SampleLimits::DEFAULT_CLAMP,
        }
    }
}

impl SamplingConfig {
    pub fn new(max_samples: u32, clamp: f64) -> Self {
        Self { max_samples, clamp }
    }

    /// Returns the limits handed to the expression sampler.
    ///
    /// # Errors
    ///
    /// Returns an error if the limits would not bound sampling, see
    /// [`SampleLimits::validate`].
    pub fn limits(&self) -> Result<SampleLimits, String> {
        let limits = SampleLimits {
            max_samples: self.max_samples,
            clamp: self.clamp,
        };
        limits
            .validate()
            .map_err(|err| format!("Invalid sampling in config: {err}"))?;
        Ok(limits)
    }
}

/// Visual options of the rendered preview.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Background color as a CSS color string.
    background_color: String,
    /// Label font size in pixels.
    font_size: f64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            background_color: "#ffffff".to_string(),
            font_size: 14.0,
        }
    }
}

impl PreviewConfig {
    /// Returns the parsed background [`Color`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Color, String> {
        Color::new(&self.background_color)
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.viewport().viewport(), Ok(Viewport::default()));
        assert_eq!(config.sampling().limits(), Ok(SampleLimits::default()));
        assert_eq!(config.preview().background_color(), Ok(Color::WHITE));
        assert_eq!(config.preview().font_size(), 14.0);
    }

    #[test]
    fn test_partial_sections() {
        let config: AppConfig = toml::from_str(
            r#"
            [viewport]
            scale = 20.0

            [sampling]
            max_samples = 500
            "#,
        )
        .unwrap();

        let viewport = config.viewport().viewport().unwrap();
        assert_eq!(viewport.scale(), 20.0);
        assert_eq!(viewport.size(), Size::new(500.0, 400.0));
        let limits = config.sampling().limits().unwrap();
        assert_eq!(limits.max_samples, 500);
        assert_eq!(limits.clamp, 1000.0);
    }

    #[test]
    fn test_invalid_viewport() {
        let viewport = ViewportConfig::new(500.0, 0.0, 40.0);
        let err = viewport.viewport().unwrap_err();
        assert!(err.contains("height"));
    }

    #[test]
    fn test_sampling_bounds() {
        assert!(SamplingConfig::new(SampleLimits::SAMPLES_CEILING, 1.0).limits().is_ok());

        for sampling in [
            SamplingConfig::new(u32::MAX, 1000.0),
            SamplingConfig::new(0, 1000.0),
            SamplingConfig::new(2000, -1.0),
            SamplingConfig::new(2000, f64::NAN),
        ] {
            let err = sampling.limits().unwrap_err();
            assert!(err.starts_with("Invalid sampling in config"), "{err}");
        }
    }

    #[test]
    fn test_sampling_bounds_from_toml() {
        let config: AppConfig = toml::from_str(
            r#"
            [sampling]
            max_samples = 4294967295
            clamp = -1.0
            "#,
        )
        .unwrap();
        assert!(config.sampling().limits().is_err());
    }

    #[test]
    fn test_invalid_background_color() {
        let config: AppConfig = toml::from_str(
            r#"
            [preview]
            background_color = "not-a-color"
            "#,
        )
        .unwrap();
        assert!(config.preview().background_color().is_err());
    }
}
