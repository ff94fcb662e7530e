//! Dragging items and propagating the move to their group.

use crate::board::Board;
use crate::items::ItemId;
use kurbo::{Point, Vec2};

/// Move an item to `to` and shift the rest of its group by the same delta.
///
/// Returns the applied delta, or None if the item is not on the board.
pub fn move_item(board: &mut Board, id: ItemId, to: Point) -> Option<Vec2> {
    let from = board.position_of(id)?;
    let delta = to - from;
    board.set_position(id, to);

    if let Some(group_id) = board.group_of(id) {
        let moved = board.translate_group(group_id, delta, id);
        log::debug!("Moved {} by ({}, {}) with {} group members", id, delta.x, delta.y, moved);
    }
    Some(delta)
}

/// State of an active item drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// The item under the pointer.
    pub item_id: ItemId,
    /// Pointer position minus the item's origin at pointer-down.
    pub grab_offset: Vec2,
    /// Starting point of the drag.
    pub start_point: Point,
    /// Current point of the drag.
    pub current_point: Point,
}

impl DragState {
    /// Start dragging `item_id`, whose origin is `origin`, from `pointer`.
    pub fn new(item_id: ItemId, origin: Point, pointer: Point) -> Self {
        Self {
            item_id,
            grab_offset: pointer - origin,
            start_point: pointer,
            current_point: pointer,
        }
    }

    /// Record a pointer sample and return the item's new origin.
    pub fn update(&mut self, pointer: Point) -> Point {
        self.current_point = pointer;
        pointer - self.grab_offset
    }

    /// Total pointer movement since the drag began.
    pub fn delta(&self) -> Vec2 {
        self.current_point - self.start_point
    }
}
