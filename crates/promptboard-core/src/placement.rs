//! Placement engine: spawn positions and version numbers for new images.
//!
//! Unrelated generations stack downward from the top margin. Iterations of
//! one prompt chain rightward from the most recent member of their lineage.

use crate::board::Board;
use crate::config::{LayoutConfig, PlacementMode};
use kurbo::Point;

/// Version the next member of the lineage keyed by `key` receives.
///
/// One more than the number of images already in the lineage. Images are
/// never deleted, so this equals one plus the count of earlier members.
pub fn next_version(board: &Board, key: &str) -> u32 {
    let existing = board
        .images()
        .iter()
        .filter(|image| image.belongs_to_lineage(key))
        .count();
    existing as u32 + 1
}

/// Default position for a new image.
///
/// Without a base prompt the image starts a new row below every other
/// top-level image. With one it goes one stride to the right of the latest
/// image of that lineage, or falls back to a new row if the lineage has no
/// image on this board.
pub fn suggested_position(board: &Board, base_prompt: Option<&str>, layout: &LayoutConfig) -> Point {
    if let Some(base) = base_prompt {
        if let Some(last) = board.images().iter().rev().find(|image| image.belongs_to_lineage(base)) {
            return Point::new(last.position.x + layout.horizontal_stride, last.position.y);
        }
    }
    next_row_position(board, layout)
}

/// Position below the lowest top-level image, or the top margin on an empty board.
fn next_row_position(board: &Board, layout: &LayoutConfig) -> Point {
    let lowest = board
        .images()
        .iter()
        .filter(|image| image.is_top_level())
        .map(|image| image.position.y)
        .fold(None, |acc: Option<f64>, y| Some(acc.map_or(y, |m| m.max(y))));

    let y = match lowest {
        Some(max_y) => max_y + layout.vertical_stride,
        None => layout.top_margin,
    };
    Point::new(layout.left_margin, y)
}

/// Resolve where a pending image lands for a placement click.
pub fn placement_position(mode: PlacementMode, suggested: Point, click: Point) -> Point {
    match mode {
        PlacementMode::Suggested => suggested,
        PlacementMode::AtClick => click,
    }
}
