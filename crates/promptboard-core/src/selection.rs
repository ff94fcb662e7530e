//! Marquee selection.

use crate::board::Board;
use crate::items::{CanvasImage, CanvasItem, CanvasText, ItemId};
use kurbo::{Point, Rect};

/// Normalized rectangle spanned by two corner points, in either order.
pub fn selection_rect(a: Point, b: Point) -> Rect {
    Rect::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
}

/// Strict overlap between the rectangle and an image thumbnail.
///
/// Touching edges do not count.
pub fn image_intersects(rect: Rect, image: &CanvasImage, size: f64) -> bool {
    let bounds = image.bounds(size);
    rect.x0 < bounds.x1 && rect.x1 > bounds.x0 && rect.y0 < bounds.y1 && rect.y1 > bounds.y0
}

/// Strict containment of a text anchor in the rectangle.
///
/// Text extents depend on rendering, so only the anchor point is tested.
pub fn text_inside(rect: Rect, text: &CanvasText) -> bool {
    let p = text.position();
    p.x > rect.x0 && p.x < rect.x1 && p.y > rect.y0 && p.y < rect.y1
}

/// IDs of every item the rectangle spanned by `a` and `b` selects.
///
/// Images come first in board order, then texts.
pub fn items_in_rect(board: &Board, a: Point, b: Point, thumbnail_size: f64) -> Vec<ItemId> {
    let rect = selection_rect(a, b);
    let images = board
        .images()
        .iter()
        .filter(|image| image_intersects(rect, image, thumbnail_size))
        .map(|image| image.id());
    let texts = board
        .texts()
        .iter()
        .filter(|text| text_inside(rect, text))
        .map(|text| text.id());
    images.chain(texts).collect()
}

/// Marquee gesture in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marquee {
    /// Where the pointer went down.
    pub start: Point,
    /// Latest pointer sample.
    pub current: Point,
}

impl Marquee {
    pub fn new(start: Point) -> Self {
        Self {
            start,
            current: start,
        }
    }

    /// Get the marquee as a normalized rectangle.
    pub fn to_rect(&self) -> Rect {
        selection_rect(self.start, self.current)
    }

    /// Items currently under the marquee.
    pub fn hits(&self, board: &Board, thumbnail_size: f64) -> Vec<ItemId> {
        items_in_rect(board, self.start, self.current, thumbnail_size)
    }
}
