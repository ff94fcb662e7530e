//! Generated image item.

use super::{CanvasItem, ItemId};
use crate::lineage::Lineage;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Generation type tag picked when the prompt was submitted.
///
/// The core never interprets it; it is echoed back by the generator and
/// carried into every iteration of the lineage.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GenerationType(String);

impl GenerationType {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GenerationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An image produced by the generator and placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasImage {
    pub(crate) id: ItemId,
    /// Pixel source reference (URL or data reference).
    pub src: String,
    /// Generation type tag.
    pub kind: GenerationType,
    /// Prompt that produced this version.
    pub prompt: String,
    /// Version within the lineage, starting at 1.
    pub version: u32,
    /// Top-left corner position.
    pub position: Point,
    /// Root prompt of the lineage. Absent on the first member.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_prompt: Option<String>,
    /// Every prompt that led to this image, including its own.
    #[serde(default)]
    pub lineage: Lineage,
}

impl CanvasImage {
    /// Rendered thumbnail edge length, used for hit and marquee tests.
    pub const DEFAULT_SIZE: f64 = 256.0;

    /// Longest prompt shown in a label before it gets truncated.
    const LABEL_MAX_CHARS: usize = 30;

    /// Create a new image item.
    pub fn new(src: String, kind: GenerationType, prompt: String, version: u32, position: Point) -> Self {
        Self {
            id: Uuid::new_v4(),
            src,
            kind,
            prompt,
            version,
            position,
            base_prompt: None,
            lineage: Lineage::new(),
        }
    }

    /// Set the root prompt of the lineage this image iterates on.
    pub fn with_base_prompt(mut self, base_prompt: Option<String>) -> Self {
        self.base_prompt = base_prompt;
        self
    }

    /// Attach the prompt lineage.
    pub fn with_lineage(mut self, lineage: Lineage) -> Self {
        self.lineage = lineage;
        self
    }

    /// The prompt that identifies this image's lineage.
    ///
    /// First members are keyed by their own prompt, later ones by the base prompt.
    pub fn lineage_key(&self) -> &str {
        self.base_prompt.as_deref().unwrap_or(&self.prompt)
    }

    /// Check whether this image is part of the lineage rooted at `key`.
    pub fn belongs_to_lineage(&self, key: &str) -> bool {
        self.prompt == key || self.base_prompt.as_deref() == Some(key)
    }

    /// Whether this image started its own lineage.
    pub fn is_top_level(&self) -> bool {
        self.base_prompt.is_none()
    }

    /// Bounding box for a thumbnail of the given edge length.
    pub fn bounds(&self, size: f64) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.position.x + size,
            self.position.y + size,
        )
    }

    /// Short caption: the (possibly truncated) prompt followed by the version.
    pub fn label(&self) -> String {
        let count = self.prompt.chars().count();
        if count > Self::LABEL_MAX_CHARS {
            let head: String = self.prompt.chars().take(Self::LABEL_MAX_CHARS - 3).collect();
            format!("{}... (v{})", head, self.version)
        } else {
            format!("{} (v{})", self.prompt, self.version)
        }
    }
}

impl CanvasItem for CanvasImage {
    fn id(&self) -> ItemId {
        self.id
    }

    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}
