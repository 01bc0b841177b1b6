#![forbid(unsafe_code)]

//! Window configuration as data.
//!
//! [`WindowConfig`] captures the construction contract of one snapping
//! window: allowed anchors, margin, optional resize limits, and the motion
//! tuning constants. It can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! anchors = ["SE", "NE", "SW", "NW"]
//! margin = 15.0
//!
//! [resize]
//! default_width = 480.0
//! min_width = 240.0
//! max_width = 960.0
//!
//! [tuning]
//! flick_threshold = 8.0
//! ```
//!
//! ```rust,ignore
//! let config = WindowConfig::from_toml_file("snapdock.toml")?;
//! let config = WindowConfig::from_json_str(json)?;
//! ```
//!
//! # Defaults
//!
//! Every field has a default: one `NW` anchor, a 15px margin, a 320x180
//! element, resizing disabled, and the tuning listed on [`MotionTuning`].

#[cfg(feature = "config-files")]
use std::path::Path;

use serde::{Deserialize, Serialize};
use snapdock_core::{
    AnchorSet, DEFAULT_ANGLE_TIE_EPSILON, DEFAULT_ASPECT_RATIO, ResizeLimits, Vector2,
    width_from_target,
};

/// Default gap between a resting window and the viewport edges.
pub const DEFAULT_MARGIN: f64 = 15.0;

// ---------------------------------------------------------------------------
// Top-level WindowConfig
// ---------------------------------------------------------------------------

/// Construction contract for one snapping window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Allowed anchors; the first is the initial anchor.
    pub anchors: AnchorSet,
    /// Gap from the viewport edges when anchored. Must be non-negative.
    pub margin: f64,
    /// Element size used when resizing is disabled.
    pub element_size: Vector2,
    /// Resize handle settings; `None` disables resizing.
    pub resize: Option<ResizeConfig>,
    /// Animation and release-selection tuning.
    pub tuning: MotionTuning,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            anchors: AnchorSet::default(),
            margin: DEFAULT_MARGIN,
            element_size: Vector2::new(320.0, 180.0),
            resize: None,
            tuning: MotionTuning::default(),
        }
    }
}

impl WindowConfig {
    /// Default configuration with the given anchors.
    #[must_use]
    pub fn new(anchors: AnchorSet) -> Self {
        Self {
            anchors,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    #[must_use]
    pub fn with_element_size(mut self, size: Vector2) -> Self {
        self.element_size = size;
        self
    }

    #[must_use]
    pub fn with_resize(mut self, resize: ResizeConfig) -> Self {
        self.resize = Some(resize);
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: MotionTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Whether the resize handle is active.
    #[must_use]
    pub fn resize_enabled(&self) -> bool {
        self.resize.is_some()
    }

    /// Size of the window at mount time.
    #[must_use]
    pub fn initial_size(&self) -> Vector2 {
        match &self.resize {
            Some(resize) => width_from_target(resize.default_width, &resize.limits()),
            None => self.element_size,
        }
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "config-files")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk and validate.
    #[cfg(feature = "config-files")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config-files")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk and validate.
    #[cfg(feature = "config-files")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize to a TOML string.
    #[cfg(feature = "config-files")]
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::TomlSerialize)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !(self.margin.is_finite() && self.margin >= 0.0) {
            errors.push(format!("margin must be finite and >= 0, got {}", self.margin));
        }

        if !(self.element_size.is_finite()
            && self.element_size.x >= 0.0
            && self.element_size.y >= 0.0)
        {
            errors.push(format!(
                "element_size must be finite and >= 0, got {}x{}",
                self.element_size.x, self.element_size.y
            ));
        }

        if let Some(resize) = &self.resize {
            resize.validate_into(&mut errors);
        }

        self.tuning.validate_into(&mut errors);
        errors
    }

    /// Consume `self`, returning it only if [`validate`](Self::validate) is clean.
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Resize handle settings. Height always follows `width / aspect_ratio`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResizeConfig {
    /// Width at mount time (clamped into the limits).
    pub default_width: f64,
    pub min_width: f64,
    pub max_width: f64,
    /// Width divided by height.
    pub aspect_ratio: f64,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            default_width: 480.0,
            min_width: 240.0,
            max_width: 960.0,
            aspect_ratio: DEFAULT_ASPECT_RATIO,
        }
    }
}

impl ResizeConfig {
    #[must_use]
    pub const fn limits(&self) -> ResizeLimits {
        ResizeLimits::new(self.min_width, self.max_width, self.aspect_ratio)
    }

    fn validate_into(&self, errors: &mut Vec<String>) {
        if !(self.min_width.is_finite() && self.min_width > 0.0) {
            errors.push(format!(
                "resize.min_width must be finite and > 0, got {}",
                self.min_width
            ));
        }
        if !(self.max_width.is_finite() && self.max_width >= self.min_width) {
            errors.push(format!(
                "resize.max_width must be finite and >= min_width ({}), got {}",
                self.min_width, self.max_width
            ));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            errors.push(format!(
                "resize.aspect_ratio must be finite and > 0, got {}",
                self.aspect_ratio
            ));
        }
        if !self.default_width.is_finite() {
            errors.push(format!(
                "resize.default_width must be finite, got {}",
                self.default_width
            ));
        }
    }
}

/// Tuning constants for easing and release-time anchor selection.
///
/// These are feel parameters rather than contracts; every one can be
/// overridden from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionTuning {
    /// Per-frame lerp factor while dragging (default: 0.2).
    pub drag_smoothing: f64,
    /// Per-frame lerp factor while gliding to an anchor (default: 0.02).
    pub snap_smoothing: f64,
    /// Distance at which a glide is considered settled (default: 1.0).
    pub settle_epsilon: f64,
    /// Average recent delta magnitude above which a release is a flick
    /// (default: 6.0 units per pointer event).
    pub flick_threshold: f64,
    /// Number of recent pointer deltas averaged on release (default: 5).
    pub velocity_window: usize,
    /// Angle difference treated as a tie between flick candidates
    /// (default: 0.1 rad).
    pub angle_tie_epsilon: f64,
    /// Frame rate the smoothing factors are expressed against (default: 60).
    pub reference_frame_rate: f64,
}

impl Default for MotionTuning {
    fn default() -> Self {
        Self {
            drag_smoothing: 0.2,
            snap_smoothing: 0.02,
            settle_epsilon: 1.0,
            flick_threshold: 6.0,
            velocity_window: 5,
            angle_tie_epsilon: DEFAULT_ANGLE_TIE_EPSILON,
            reference_frame_rate: 60.0,
        }
    }
}

impl MotionTuning {
    fn validate_into(&self, errors: &mut Vec<String>) {
        for (name, value) in [
            ("drag_smoothing", self.drag_smoothing),
            ("snap_smoothing", self.snap_smoothing),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                errors.push(format!("tuning.{name} must be in (0, 1], got {value}"));
            }
        }
        if !(self.settle_epsilon.is_finite() && self.settle_epsilon > 0.0) {
            errors.push(format!(
                "tuning.settle_epsilon must be finite and > 0, got {}",
                self.settle_epsilon
            ));
        }
        if !(self.flick_threshold.is_finite() && self.flick_threshold >= 0.0) {
            errors.push(format!(
                "tuning.flick_threshold must be finite and >= 0, got {}",
                self.flick_threshold
            ));
        }
        if self.velocity_window == 0 {
            errors.push("tuning.velocity_window must be > 0".into());
        }
        if !(self.angle_tie_epsilon.is_finite() && self.angle_tie_epsilon >= 0.0) {
            errors.push(format!(
                "tuning.angle_tie_epsilon must be finite and >= 0, got {}",
                self.angle_tie_epsilon
            ));
        }
        if !(self.reference_frame_rate.is_finite() && self.reference_frame_rate > 0.0) {
            errors.push(format!(
                "tuning.reference_frame_rate must be finite and > 0, got {}",
                self.reference_frame_rate
            ));
        }
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors that can occur when building or loading a window configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-files")]
    Toml(toml::de::Error),
    /// TOML serialization error.
    #[cfg(feature = "config-files")]
    TomlSerialize(toml::ser::Error),
    /// JSON parse error.
    #[cfg(feature = "config-files")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-files")]
            Self::TomlSerialize(e) => write!(f, "TOML serialize error: {e}"),
            #[cfg(feature = "config-files")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::TomlSerialize(e) => Some(e),
            #[cfg(feature = "config-files")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
