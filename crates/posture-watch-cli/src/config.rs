//! Configuration file support for posture-watch.
//!
//! Supports TOML configuration from:
//! - XDG config: `~/.config/posture-watch/config.toml` (lowest priority)
//! - Project-local: `.posture-watch.toml` (searched up directory tree)
//! - CLI flags (highest priority, applied separately)

use std::path::{Path, PathBuf};

use posture_watch_core::pipeline::{AlertConfig, GeometryConfig, MonitorConfig, SmoothingConfig};
use serde::Deserialize;
use tracing::{debug, info};

/// Top-level configuration structure.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Alert settings.
    pub alert: AlertSection,
    /// Temporal smoothing settings.
    pub smoothing: SmoothingSection,
    /// Geometric rule thresholds.
    pub geometry: GeometrySection,
    /// Classifier settings.
    pub model: ModelSection,
    /// Posture log settings.
    pub log: LogSection,
    /// Output formatting settings.
    pub output: OutputSection,
}

/// Alert configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct AlertSection {
    /// Seconds of continuous bad posture before an alert.
    pub threshold_secs: Option<f64>,
    /// User the alerts are recorded for.
    pub user_id: Option<u32>,
    /// Enable/disable alert side effects.
    pub enabled: Option<bool>,
}

/// Smoothing configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct SmoothingSection {
    /// Rolling window capacity in frames.
    pub window: Option<usize>,
    /// Frames needed before majority voting starts.
    pub min_fill: Option<usize>,
}

/// Geometry thresholds.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct GeometrySection {
    /// Shoulder depth asymmetry below which the subject is frontal.
    pub frontal_rotation: Option<f32>,
    /// Absolute shoulder slope in pixels that counts as leaning.
    pub lean_slope: Option<f32>,
    /// Absolute head deviation ratio that counts as off-center.
    pub head_deviation: Option<f32>,
    /// Depth difference that diagnoses forward head.
    pub forward_head_depth: Option<f32>,
    /// Depth difference that overrides a good verdict.
    pub forward_head_override_depth: Option<f32>,
    /// Vertical reference height above the hips in pixels.
    pub torso_reference_offset: Option<f32>,
    /// Neck incline below which the heuristic reports bad posture.
    pub heuristic_neck_angle: Option<f32>,
}

/// Classifier configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct ModelSection {
    /// Explicit classifier artifact path.
    pub path: Option<PathBuf>,
    /// Classifier output interpretation: "margin" or "probability".
    pub output: Option<String>,
    /// Custom models directory path.
    pub dir: Option<PathBuf>,
}

/// Posture log configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct LogSection {
    /// Log file path.
    pub path: Option<PathBuf>,
    /// Maximum stored label length in characters.
    pub label_max_len: Option<usize>,
}

/// Output formatting configuration.
#[derive(Debug, Default, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Output format: "json" or "jsonl".
    pub format: Option<String>,
    /// Pretty-print JSON output.
    pub pretty: Option<bool>,
    /// Show progress bar.
    pub progress: Option<bool>,
    /// Include overlay geometry in reports.
    pub geometry: Option<bool>,
}

impl AppConfig {
    /// Load configuration from XDG and project-local files.
    ///
    /// Priority (lowest to highest):
    /// 1. XDG config: `~/.config/posture-watch/config.toml`
    /// 2. Project-local: `.posture-watch.toml` (searched up from cwd)
    ///
    /// Missing files are silently ignored. Invalid values are logged as warnings.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(xdg_path) = xdg_config_path() {
            if xdg_path.exists() {
                info!("Loading XDG config: {}", xdg_path.display());
                if let Some(xdg_config) = load_file(&xdg_path) {
                    config = xdg_config;
                }
            } else {
                debug!("XDG config not found: {}", xdg_path.display());
            }
        }

        if let Some(project_path) = find_project_config() {
            info!("Loading project config: {}", project_path.display());
            if let Some(project_config) = load_file(&project_path) {
                config.merge(project_config);
            }
        }

        if let Err(e) = config.validate() {
            eprintln!("warning: {e}");
        }

        config
    }

    /// Builds pipeline tunables, falling back to the tuned defaults.
    pub fn monitor_config(&self) -> MonitorConfig {
        let g = &self.geometry;
        let geometry_defaults = GeometryConfig::default();
        let smoothing_defaults = SmoothingConfig::default();
        let alert_defaults = AlertConfig::default();

        let window = self.smoothing.window.unwrap_or(smoothing_defaults.window);
        let min_fill = self
            .smoothing
            .min_fill
            .unwrap_or(smoothing_defaults.min_fill)
            .min(window);

        MonitorConfig {
            geometry: GeometryConfig {
                frontal_rotation: g.frontal_rotation.unwrap_or(geometry_defaults.frontal_rotation),
                torso_reference_offset: g
                    .torso_reference_offset
                    .unwrap_or(geometry_defaults.torso_reference_offset),
                lean_slope: g.lean_slope.unwrap_or(geometry_defaults.lean_slope),
                head_deviation: g.head_deviation.unwrap_or(geometry_defaults.head_deviation),
                forward_head_depth: g
                    .forward_head_depth
                    .unwrap_or(geometry_defaults.forward_head_depth),
                forward_head_override_depth: g
                    .forward_head_override_depth
                    .unwrap_or(geometry_defaults.forward_head_override_depth),
                heuristic_neck_angle: g
                    .heuristic_neck_angle
                    .unwrap_or(geometry_defaults.heuristic_neck_angle),
            },
            smoothing: SmoothingConfig { window, min_fill },
            alert: AlertConfig {
                threshold_secs: self
                    .alert
                    .threshold_secs
                    .unwrap_or(alert_defaults.threshold_secs),
                user_id: self.alert.user_id.unwrap_or(alert_defaults.user_id),
            },
        }
    }

    /// Validate configuration values are within acceptable ranges.
    fn validate(&self) -> Result<(), String> {
        if let Some(t) = self.alert.threshold_secs {
            if t.is_nan() || t <= 0.0 {
                return Err(format!("alert.threshold_secs must be positive, got {t}"));
            }
        }

        if self.smoothing.window == Some(0) {
            return Err("smoothing.window must be at least 1".to_string());
        }
        if let (Some(window), Some(min_fill)) = (self.smoothing.window, self.smoothing.min_fill) {
            if min_fill > window {
                return Err(format!(
                    "smoothing.min_fill ({min_fill}) exceeds smoothing.window ({window})"
                ));
            }
        }

        let non_negative = [
            ("geometry.frontal_rotation", self.geometry.frontal_rotation),
            ("geometry.lean_slope", self.geometry.lean_slope),
            ("geometry.head_deviation", self.geometry.head_deviation),
            ("geometry.torso_reference_offset", self.geometry.torso_reference_offset),
        ];
        for (name, value) in non_negative {
            if let Some(v) = value {
                if v < 0.0 {
                    return Err(format!("{name} must not be negative, got {v}"));
                }
            }
        }
        if let Some(a) = self.geometry.heuristic_neck_angle {
            if !(0.0..=180.0).contains(&a) {
                return Err(format!(
                    "geometry.heuristic_neck_angle must be 0-180, got {a}"
                ));
            }
        }
        if let (Some(diagnose), Some(override_depth)) = (
            self.geometry.forward_head_depth,
            self.geometry.forward_head_override_depth,
        ) {
            if override_depth > diagnose {
                return Err(format!(
                    "geometry.forward_head_override_depth ({override_depth}) should not be above geometry.forward_head_depth ({diagnose})"
                ));
            }
        }

        if let Some(ref o) = self.model.output {
            if o != "margin" && o != "probability" {
                return Err(format!(
                    "model.output must be 'margin' or 'probability', got '{o}'"
                ));
            }
        }

        if self.log.label_max_len == Some(0) {
            return Err("log.label_max_len must be at least 1".to_string());
        }

        if let Some(ref f) = self.output.format {
            if f != "json" && f != "jsonl" {
                return Err(format!(
                    "output.format must be 'json' or 'jsonl', got '{f}'"
                ));
            }
        }

        Ok(())
    }

    /// Merge another config into this one.
    /// Values from `other` override values in `self` when present.
    fn merge(&mut self, other: Self) {
        // Alert
        self.alert.threshold_secs = other.alert.threshold_secs.or(self.alert.threshold_secs);
        self.alert.user_id = other.alert.user_id.or(self.alert.user_id);
        self.alert.enabled = other.alert.enabled.or(self.alert.enabled);

        // Smoothing
        self.smoothing.window = other.smoothing.window.or(self.smoothing.window);
        self.smoothing.min_fill = other.smoothing.min_fill.or(self.smoothing.min_fill);

        // Geometry
        let (g, o) = (&mut self.geometry, other.geometry);
        g.frontal_rotation = o.frontal_rotation.or(g.frontal_rotation);
        g.lean_slope = o.lean_slope.or(g.lean_slope);
        g.head_deviation = o.head_deviation.or(g.head_deviation);
        g.forward_head_depth = o.forward_head_depth.or(g.forward_head_depth);
        g.forward_head_override_depth = o
            .forward_head_override_depth
            .or(g.forward_head_override_depth);
        g.torso_reference_offset = o.torso_reference_offset.or(g.torso_reference_offset);
        g.heuristic_neck_angle = o.heuristic_neck_angle.or(g.heuristic_neck_angle);

        // Model
        self.model.path = other.model.path.or_else(|| self.model.path.take());
        self.model.output = other.model.output.or_else(|| self.model.output.take());
        self.model.dir = other.model.dir.or_else(|| self.model.dir.take());

        // Log
        self.log.path = other.log.path.or_else(|| self.log.path.take());
        self.log.label_max_len = other.log.label_max_len.or(self.log.label_max_len);

        // Output
        self.output.format = other.output.format.or_else(|| self.output.format.take());
        self.output.pretty = other.output.pretty.or(self.output.pretty);
        self.output.progress = other.output.progress.or(self.output.progress);
        self.output.geometry = other.output.geometry.or(self.output.geometry);
    }
}

/// Get the XDG config file path.
fn xdg_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("posture-watch").join("config.toml"))
}

/// Find project-local config by searching up from current directory.
fn find_project_config() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_in_parents(&cwd)
}

/// Search for `.posture-watch.toml` in the given directory and its parents.
fn find_config_in_parents(start: &Path) -> Option<PathBuf> {
    let mut current = Some(start);

    while let Some(dir) = current {
        let config_path = dir.join(".posture-watch.toml");
        if config_path.exists() {
            return Some(config_path);
        }
        current = dir.parent();
    }

    None
}

/// Load and parse a TOML config file.
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            tracing::warn!("Failed to read config file {}: {}", path.display(), e);
            return None;
        }
    };

    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!("Failed to parse config file {}: {}", path.display(), e);
            None
        }
    }
}
