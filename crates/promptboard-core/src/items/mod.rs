//! Item definitions for the board.

mod group;
mod image;
mod text;

pub use group::Group;
pub use image::{CanvasImage, GenerationType};
pub use text::{CanvasText, FontSize};

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for images and texts.
pub type ItemId = Uuid;

/// Unique identifier for groups.
pub type GroupId = Uuid;

/// Common trait for every positioned item on a board.
pub trait CanvasItem {
    /// Get the unique identifier.
    fn id(&self) -> ItemId;

    /// Get the top-left anchor in canvas coordinates.
    fn position(&self) -> Point;

    /// Move the item to an absolute position.
    fn set_position(&mut self, position: Point);

    /// Move the item by a delta.
    fn translate(&mut self, delta: Vec2) {
        let position = self.position();
        self.set_position(position + delta);
    }
}

/// The kind of an item, for callers that only need to branch on type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemKind {
    Image,
    Text,
}

/// Borrowed view over either item type.
#[derive(Debug, Clone, Copy)]
pub enum ItemRef<'a> {
    Image(&'a CanvasImage),
    Text(&'a CanvasText),
}

impl<'a> ItemRef<'a> {
    pub fn id(&self) -> ItemId {
        match self {
            ItemRef::Image(i) => i.id(),
            ItemRef::Text(t) => t.id(),
        }
    }

    pub fn position(&self) -> Point {
        match self {
            ItemRef::Image(i) => i.position(),
            ItemRef::Text(t) => t.position(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            ItemRef::Image(_) => ItemKind::Image,
            ItemRef::Text(_) => ItemKind::Text,
        }
    }

    /// Get the image if this item is an image.
    pub fn as_image(&self) -> Option<&'a CanvasImage> {
        match *self {
            ItemRef::Image(i) => Some(i),
            ItemRef::Text(_) => None,
        }
    }

    /// Get the text if this item is a text.
    pub fn as_text(&self) -> Option<&'a CanvasText> {
        match *self {
            ItemRef::Text(t) => Some(t),
            ItemRef::Image(_) => None,
        }
    }
}
