//! # Map Project Configuration
//!
//! Parses `map.toml` — the declarative config for a Chronomap project: where
//! the event dataset lives, how coordinates are grouped, the timeline window,
//! and the styling constants the renderer reads. Every field has a default,
//! so an empty `[section]` is valid.
//!
//! ## Table of Contents
//! 1. MapConfig — Top-level config
//! 2. DatasetConfig — Event dataset location
//! 3. GroupingConfig — Coordinate merging
//! 4. PlaybackConfig — Timeline window and tick rate
//! 5. StyleConfig — Pass-through renderer styling
//! 6. Loading

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cluster::{PointRole, DEFAULT_GROUP_PRECISION};

// ============================================================================
// 1. MapConfig — Top-level config
// ============================================================================

/// Top-level project configuration, parsed from `map.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapConfig {
    /// Event dataset location
    #[serde(default)]
    pub dataset: DatasetConfig,
    /// Coordinate grouping
    #[serde(default)]
    pub grouping: GroupingConfig,
    /// Timeline window and playback
    #[serde(default)]
    pub playback: PlaybackConfig,
    /// Renderer styling constants
    #[serde(default)]
    pub style: StyleConfig,
}

// ============================================================================
// 2. DatasetConfig — Event dataset location
// ============================================================================

/// Where the JSON event dataset lives, relative to `map.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Relative path to the dataset file
    #[serde(default = "default_dataset_path")]
    pub path: String,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: default_dataset_path(),
        }
    }
}

fn default_dataset_path() -> String {
    "data/historical-events.json".to_string()
}

// ============================================================================
// 3. GroupingConfig — Coordinate merging
// ============================================================================

/// How near-duplicate coordinates merge into one visual point.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Rounding decimals for the bucket key (5 ≈ 1.1 m at the equator)
    #[serde(default = "default_precision")]
    pub precision: u32,
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            precision: default_precision(),
        }
    }
}

fn default_precision() -> u32 {
    DEFAULT_GROUP_PRECISION
}

// ============================================================================
// 4. PlaybackConfig — Timeline window and tick rate
// ============================================================================

/// Timeline window bounds and playback tick rate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Earliest selectable year
    #[serde(default = "default_min_year")]
    pub min_year: i32,
    /// Latest selectable year
    #[serde(default = "default_max_year")]
    pub max_year: i32,
    /// Visible window length in years
    #[serde(default = "default_window_span")]
    pub window_span: i32,
    /// Years moved per window shift
    #[serde(default = "default_shift_step")]
    pub shift_step: i32,
    /// Seconds between playback ticks
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            min_year: default_min_year(),
            max_year: default_max_year(),
            window_span: default_window_span(),
            shift_step: default_shift_step(),
            tick_seconds: default_tick_seconds(),
        }
    }
}

fn default_min_year() -> i32 {
    1700
}
fn default_max_year() -> i32 {
    2000
}
fn default_window_span() -> i32 {
    150
}
fn default_shift_step() -> i32 {
    25
}
fn default_tick_seconds() -> u64 {
    1
}

// ============================================================================
// 5. StyleConfig — Pass-through renderer styling
// ============================================================================

/// Styling constants consumed by the map renderer: role colors for event
/// dots, line/label colors, and the cluster bubble ramp. The core never
/// interprets these beyond `role_color`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Dot color for the selected event's bucket
    #[serde(default = "default_event_primary")]
    pub event_primary: String,
    /// Dot color for buckets holding a related event
    #[serde(default = "default_event_related")]
    pub event_related: String,
    /// Dot color for everything else
    #[serde(default = "default_event_default")]
    pub event_default: String,
    /// Connection line color
    #[serde(default = "default_line")]
    pub line: String,
    /// Connection line color while hovered
    #[serde(default = "default_line_hover")]
    pub line_hover: String,
    /// Connection label color
    #[serde(default = "default_label")]
    pub label: String,
    /// Cluster bubble ramp: low end
    #[serde(default = "default_cluster_low")]
    pub cluster_low: String,
    /// Cluster bubble ramp: midpoint
    #[serde(default = "default_cluster_mid")]
    pub cluster_mid: String,
    /// Cluster bubble ramp: high end
    #[serde(default = "default_cluster_high")]
    pub cluster_high: String,
    /// First point-count breakpoint of the ramp
    #[serde(default = "default_cluster_step_1")]
    pub cluster_step_1: u32,
    /// Second point-count breakpoint of the ramp
    #[serde(default = "default_cluster_step_2")]
    pub cluster_step_2: u32,
    /// Bubble radii (px) for each ramp step
    #[serde(default = "default_radius_small")]
    pub radius_small: f32,
    #[serde(default = "default_radius_med")]
    pub radius_med: f32,
    #[serde(default = "default_radius_large")]
    pub radius_large: f32,
    /// Cluster engine radius in pixels
    #[serde(default = "default_cluster_radius_px")]
    pub cluster_radius_px: f32,
    /// Zoom level beyond which clustering stops
    #[serde(default = "default_cluster_max_zoom")]
    pub cluster_max_zoom: f32,
}

impl StyleConfig {
    /// Dot color for a point role.
    pub fn role_color(&self, role: PointRole) -> &str {
        match role {
            PointRole::Primary => &self.event_primary,
            PointRole::Related => &self.event_related,
            PointRole::Default => &self.event_default,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            event_primary: default_event_primary(),
            event_related: default_event_related(),
            event_default: default_event_default(),
            line: default_line(),
            line_hover: default_line_hover(),
            label: default_label(),
            cluster_low: default_cluster_low(),
            cluster_mid: default_cluster_mid(),
            cluster_high: default_cluster_high(),
            cluster_step_1: default_cluster_step_1(),
            cluster_step_2: default_cluster_step_2(),
            radius_small: default_radius_small(),
            radius_med: default_radius_med(),
            radius_large: default_radius_large(),
            cluster_radius_px: default_cluster_radius_px(),
            cluster_max_zoom: default_cluster_max_zoom(),
        }
    }
}

fn default_event_primary() -> String {
    "#f5222d".to_string()
}
fn default_event_related() -> String {
    "#1677ff".to_string()
}
fn default_event_default() -> String {
    "#666666".to_string()
}
fn default_line() -> String {
    "#333333".to_string()
}
fn default_line_hover() -> String {
    "#000000".to_string()
}
fn default_label() -> String {
    "rgba(12, 107, 3, 1)".to_string()
}
fn default_cluster_low() -> String {
    "#9ecae1".to_string()
}
fn default_cluster_mid() -> String {
    "#6baed6".to_string()
}
fn default_cluster_high() -> String {
    "#3182bd".to_string()
}
fn default_cluster_step_1() -> u32 {
    10
}
fn default_cluster_step_2() -> u32 {
    25
}
fn default_radius_small() -> f32 {
    16.0
}
fn default_radius_med() -> f32 {
    20.0
}
fn default_radius_large() -> f32 {
    26.0
}
fn default_cluster_radius_px() -> f32 {
    70.0
}
fn default_cluster_max_zoom() -> f32 {
    13.0
}

// ============================================================================
// 6. Loading
// ============================================================================

impl MapConfig {
    /// Load a MapConfig from a `map.toml` file path.
    pub fn load(path: &Path) -> Result<Self, MapConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| MapConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: MapConfig =
            toml::from_str(&content).map_err(|source| MapConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::info!("Loaded map config from {}", path.display());
        Ok(config)
    }

    /// Resolve the dataset path relative to the directory holding `map.toml`.
    pub fn dataset_path(&self, config_dir: &Path) -> PathBuf {
        config_dir.join(&self.dataset.path)
    }
}

/// Errors from loading `map.toml`.
#[derive(Debug, Error)]
pub enum MapConfigError {
    /// File I/O error
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// TOML parse error
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
