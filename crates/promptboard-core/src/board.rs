//! Board container: items, groups and membership.

use crate::items::{CanvasImage, CanvasItem, CanvasText, Group, GroupId, ItemId, ItemRef};
use crate::time::now_millis;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier for boards.
pub type BoardId = Uuid;

/// A named canvas workspace holding images, texts and groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    /// Unique board identifier.
    pub id: BoardId,
    /// Display name.
    pub name: String,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: u64,
    /// Images in insertion order.
    images: Vec<CanvasImage>,
    /// Texts in insertion order.
    #[serde(default)]
    texts: Vec<CanvasText>,
    /// Groups in creation order.
    #[serde(default)]
    groups: Vec<Group>,
    /// Item to group mapping. The only record of group membership.
    #[serde(default)]
    membership: HashMap<ItemId, GroupId>,
}

impl Board {
    /// Create a new empty board.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: now_millis(),
            images: Vec::new(),
            texts: Vec::new(),
            groups: Vec::new(),
            membership: HashMap::new(),
        }
    }

    /// Images in insertion order.
    pub fn images(&self) -> &[CanvasImage] {
        &self.images
    }

    /// Texts in insertion order.
    pub fn texts(&self) -> &[CanvasText] {
        &self.texts
    }

    /// Groups in creation order.
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Add an image to the board.
    pub fn add_image(&mut self, image: CanvasImage) -> ItemId {
        let id = image.id();
        log::debug!("Board {}: added image {} (v{})", self.id, id, image.version);
        self.images.push(image);
        id
    }

    /// Add a text to the board.
    pub fn add_text(&mut self, text: CanvasText) -> ItemId {
        let id = text.id();
        log::debug!("Board {}: added text {}", self.id, id);
        self.texts.push(text);
        id
    }

    /// Remove a text and drop its group membership.
    pub fn remove_text(&mut self, id: ItemId) -> Option<CanvasText> {
        let index = self.texts.iter().position(|t| t.id() == id)?;
        self.membership.remove(&id);
        log::debug!("Board {}: removed text {}", self.id, id);
        Some(self.texts.remove(index))
    }

    /// Get an image by ID.
    pub fn image(&self, id: ItemId) -> Option<&CanvasImage> {
        self.images.iter().find(|i| i.id() == id)
    }

    /// Get a text by ID.
    pub fn text(&self, id: ItemId) -> Option<&CanvasText> {
        self.texts.iter().find(|t| t.id() == id)
    }

    /// Get a mutable reference to a text by ID.
    pub fn text_mut(&mut self, id: ItemId) -> Option<&mut CanvasText> {
        self.texts.iter_mut().find(|t| t.id() == id)
    }

    /// Get any item by ID.
    pub fn item(&self, id: ItemId) -> Option<ItemRef<'_>> {
        self.image(id)
            .map(ItemRef::Image)
            .or_else(|| self.text(id).map(ItemRef::Text))
    }

    /// All items, images first, each in insertion order.
    pub fn items(&self) -> impl Iterator<Item = ItemRef<'_>> {
        self.images
            .iter()
            .map(ItemRef::Image)
            .chain(self.texts.iter().map(ItemRef::Text))
    }

    /// Check whether an item with this ID lives on the board.
    pub fn contains(&self, id: ItemId) -> bool {
        self.item(id).is_some()
    }

    /// Position of any item.
    pub fn position_of(&self, id: ItemId) -> Option<Point> {
        self.item(id).map(|item| item.position())
    }

    /// Move an item to an absolute position. Returns false for unknown IDs.
    pub(crate) fn set_position(&mut self, id: ItemId, position: Point) -> bool {
        if let Some(image) = self.images.iter_mut().find(|i| i.id() == id) {
            image.set_position(position);
            return true;
        }
        if let Some(text) = self.texts.iter_mut().find(|t| t.id() == id) {
            text.set_position(position);
            return true;
        }
        false
    }

    /// Translate every item of a group except `skip`.
    pub(crate) fn translate_group(&mut self, group_id: GroupId, delta: Vec2, skip: ItemId) -> usize {
        let membership = &self.membership;
        let in_group = |id: ItemId| id != skip && membership.get(&id) == Some(&group_id);

        let mut moved = 0;
        for image in self.images.iter_mut().filter(|i| in_group(i.id())) {
            image.translate(delta);
            moved += 1;
        }
        for text in self.texts.iter_mut().filter(|t| in_group(t.id())) {
            text.translate(delta);
            moved += 1;
        }
        moved
    }

    /// Group an item currently belongs to.
    pub fn group_of(&self, id: ItemId) -> Option<GroupId> {
        self.membership.get(&id).copied()
    }

    /// Get a group by ID.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| g.id() == id)
    }

    /// Members of a group, images first, each in insertion order.
    ///
    /// Derived from the membership map, so an item regrouped elsewhere no
    /// longer shows up in its previous group.
    pub fn group_members(&self, group_id: GroupId) -> Vec<ItemId> {
        self.items()
            .map(|item| item.id())
            .filter(|id| self.membership.get(id) == Some(&group_id))
            .collect()
    }

    /// Group the given items under a fresh group.
    ///
    /// Unknown IDs are ignored. Known items leave whatever group they were in.
    /// Returns None if none of the IDs exist on the board.
    pub fn group_items(&mut self, item_ids: &[ItemId]) -> Option<GroupId> {
        let known: Vec<ItemId> = item_ids.iter().copied().filter(|&id| self.contains(id)).collect();
        if known.is_empty() {
            return None;
        }

        let group = Group::new(now_millis());
        let group_id = group.id();
        for id in known {
            self.membership.insert(id, group_id);
        }
        self.groups.push(group);

        log::info!(
            "Board {}: created group {} with {} members",
            self.id,
            group_id,
            self.group_members(group_id).len()
        );
        Some(group_id)
    }

    /// Check if the board is empty.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.texts.is_empty()
    }

    /// Get the number of items.
    pub fn len(&self) -> usize {
        self.images.len() + self.texts.len()
    }

    /// Serialize the board to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a board from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
