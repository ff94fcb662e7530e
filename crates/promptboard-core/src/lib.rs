//! Promptboard Core Library
//!
//! Platform-agnostic data structures and interaction logic for an infinite
//! canvas of generated images and text notes.

pub mod app;
pub mod board;
pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod generation;
pub mod interaction;
pub mod items;
pub mod lineage;
pub mod placement;
pub mod selection;
pub mod time;

pub use app::{reduce, AppState, Composer, Notice, Outcome, PendingImage};
pub use board::{Board, BoardId};
pub use config::{BoardConfig, LayoutConfig, PlacementMode};
pub use drag::{move_item, DragState};
pub use error::{BoardError, BoardResult};
pub use event::{Event, Key};
pub use generation::{GeneratedImage, GenerationError, GenerationRequest, ImageGenerator};
pub use interaction::{Gesture, Interaction};
pub use items::{CanvasImage, CanvasItem, CanvasText, FontSize, GenerationType, Group, GroupId, ItemId};
pub use lineage::{Lineage, PromptEntry};
pub use placement::{next_version, suggested_position};
pub use selection::{items_in_rect, Marquee};
