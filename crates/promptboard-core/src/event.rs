//! Input events fed into the application state.
//!
//! Positions are canvas coordinates; the host converts from screen space.

use crate::board::BoardId;
use crate::generation::{GeneratedImage, GenerationError};
use crate::items::{FontSize, GenerationType, ItemId};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Keys the text editor reacts to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Escape,
    Delete,
    Backspace,
    Other(String),
}

impl Key {
    /// Map a DOM-style key name.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Enter" => Key::Enter,
            "Escape" => Key::Escape,
            "Delete" => Key::Delete,
            "Backspace" => Key::Backspace,
            other => Key::Other(other.to_string()),
        }
    }

    /// Enter or Escape.
    pub fn ends_editing(&self) -> bool {
        matches!(self, Key::Enter | Key::Escape)
    }

    /// Delete or Backspace.
    pub fn is_erase(&self) -> bool {
        matches!(self, Key::Delete | Key::Backspace)
    }
}

/// Everything the host can tell the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // Boards
    CreateBoard { name: String },
    RenameBoard { id: BoardId, name: String },
    DeleteBoard { id: BoardId },
    SelectBoard { id: BoardId },

    // Prompt composer and generation
    OpenComposer { kind: GenerationType },
    IterateFrom { image_id: ItemId },
    CloseComposer,
    SubmitPrompt { prompt: String },
    GenerationFinished(Result<GeneratedImage, GenerationError>),

    // Canvas
    BeginTextPlacement,
    CanvasClick { position: Point },
    /// Pointer pressed on the empty background.
    PointerDown { position: Point },
    /// Pointer pressed on an item.
    ItemPointerDown { id: ItemId, position: Point },
    PointerMove { position: Point },
    PointerUp { position: Point },
    /// Move an item to an absolute position, e.g. from a host drag library.
    MoveItem { id: ItemId, position: Point },
    GroupSelection,
    ClearSelection,

    // Text editing
    EditText { id: ItemId, content: String },
    SetFontSize { id: ItemId, size: FontSize },
    DoubleClickText { id: ItemId },
    TextKey { id: ItemId, key: Key },
    TextBlur { id: ItemId },
}
