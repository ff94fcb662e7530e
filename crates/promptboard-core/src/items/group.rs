//! Group record for items that move together.

use super::GroupId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A group of items that move as a unit under drag propagation.
///
/// Membership is not stored here: the board's item-to-group map is the only
/// record of who belongs to which group, and members are derived from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub(crate) id: GroupId,
    /// Creation time in milliseconds since the Unix epoch.
    pub created_at: u64,
}

impl Group {
    /// Create a new group with a fresh identity.
    pub fn new(created_at: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at,
        }
    }

    /// Create a group with a specific ID.
    pub fn with_id(id: GroupId, created_at: u64) -> Self {
        Self { id, created_at }
    }

    pub fn id(&self) -> GroupId {
        self.id
    }
}
