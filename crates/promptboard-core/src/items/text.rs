//! Text note item.

use super::{CanvasItem, ItemId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font size options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    /// Medium size (default).
    #[default]
    Medium,
    Large,
}

impl FontSize {
    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            FontSize::Small => "Small",
            FontSize::Medium => "Medium",
            FontSize::Large => "Large",
        }
    }

    /// Get all available font sizes.
    pub fn all() -> &'static [FontSize] {
        &[FontSize::Small, FontSize::Medium, FontSize::Large]
    }
}

/// A text note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasText {
    pub(crate) id: ItemId,
    /// The text content. Empty means placeholder.
    pub content: String,
    /// Position (top-left anchor).
    pub position: Point,
    /// Font size.
    #[serde(default)]
    pub font_size: FontSize,
    /// Whether the text is in editing mode. UI-only, never serialized.
    #[serde(skip)]
    pub editing: bool,
}

impl CanvasText {
    /// Create a new text item.
    pub fn new(position: Point, content: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            content,
            position,
            font_size: FontSize::default(),
            editing: false,
        }
    }

    /// Create an empty text that starts in editing mode.
    pub fn placeholder(position: Point) -> Self {
        let mut text = Self::new(position, String::new());
        text.editing = true;
        text
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: FontSize) -> Self {
        self.font_size = size;
        self
    }

    /// Get the text content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Set the text content.
    pub fn set_content(&mut self, content: String) {
        self.content = content;
    }

    /// Whether the text has no content yet.
    pub fn is_placeholder(&self) -> bool {
        self.content.is_empty()
    }
}

impl CanvasItem for CanvasText {
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
