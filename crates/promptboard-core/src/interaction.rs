//! Transient interaction state: selection, active gesture and text tool.
//!
//! Kept apart from the board so item data stays free of UI concerns.

use crate::drag::DragState;
use crate::items::ItemId;
use crate::selection::Marquee;

/// Pointer gesture in progress.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    /// Rubber-band selection on the background.
    Marquee(Marquee),
    /// Dragging a single item (and its group).
    Drag(DragState),
}

/// Selection and gesture tracking for the current board.
#[derive(Debug, Clone, Default)]
pub struct Interaction {
    /// Selected item IDs in hit order.
    selected: Vec<ItemId>,
    gesture: Gesture,
    /// Whether the next canvas click creates a text.
    text_tool: bool,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the selected item IDs.
    pub fn selected(&self) -> &[ItemId] {
        &self.selected
    }

    /// Check if an item is selected.
    pub fn is_selected(&self, id: ItemId) -> bool {
        self.selected.contains(&id)
    }

    /// Replace the whole selection.
    pub fn set_selection(&mut self, ids: Vec<ItemId>) {
        self.selected = ids;
    }

    /// Remove an item from the selection.
    pub fn deselect(&mut self, id: ItemId) {
        self.selected.retain(|&s| s != id);
    }

    pub fn clear_selection(&mut self) {
        self.selected.clear();
    }

    /// Get the active gesture.
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub(crate) fn gesture_mut(&mut self) -> &mut Gesture {
        &mut self.gesture
    }

    pub fn begin_marquee(&mut self, marquee: Marquee) {
        self.gesture = Gesture::Marquee(marquee);
    }

    pub fn begin_drag(&mut self, drag: DragState) {
        self.gesture = Gesture::Drag(drag);
    }

    /// Finish whatever gesture is active, keeping the selection.
    pub fn end_gesture(&mut self) -> Gesture {
        std::mem::take(&mut self.gesture)
    }

    pub fn is_marquee_active(&self) -> bool {
        matches!(self.gesture, Gesture::Marquee(_))
    }

    /// Whether the text tool waits for a canvas click.
    pub fn text_tool_armed(&self) -> bool {
        self.text_tool
    }

    pub fn set_text_tool(&mut self, armed: bool) {
        self.text_tool = armed;
    }

    /// Forget everything, e.g. when switching boards.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
