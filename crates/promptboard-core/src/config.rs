//! Board configuration: layout constants and interaction rules.

use crate::items::CanvasImage;
use serde::{Deserialize, Serialize};

/// Default x for new top-level images.
pub const DEFAULT_LEFT_MARGIN: f64 = 100.0;
/// Default y for the first top-level image on a board.
pub const DEFAULT_TOP_MARGIN: f64 = 100.0;
/// Gap between successive unrelated images.
pub const DEFAULT_VERTICAL_STRIDE: f64 = 400.0;
/// Gap between successive iterations of one lineage.
pub const DEFAULT_HORIZONTAL_STRIDE: f64 = 300.0;
/// Smallest selection the grouping action accepts.
pub const DEFAULT_MIN_GROUP_SIZE: usize = 2;

/// Spawn coordinates for new images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub left_margin: f64,
    pub top_margin: f64,
    pub vertical_stride: f64,
    pub horizontal_stride: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            left_margin: DEFAULT_LEFT_MARGIN,
            top_margin: DEFAULT_TOP_MARGIN,
            vertical_stride: DEFAULT_VERTICAL_STRIDE,
            horizontal_stride: DEFAULT_HORIZONTAL_STRIDE,
        }
    }
}

/// Where a pending image lands when the user clicks to place it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Use the computed spawn position (stack or chain).
    #[default]
    Suggested,
    /// Use the click point verbatim.
    AtClick,
}

/// Configuration for the application state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub layout: LayoutConfig,
    /// Thumbnail edge length used by marquee selection.
    pub thumbnail_size: f64,
    pub placement: PlacementMode,
    pub min_group_size: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            thumbnail_size: CanvasImage::DEFAULT_SIZE,
            placement: PlacementMode::default(),
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
        }
    }
}

impl BoardConfig {
    /// Parse configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
