//! EntityRef - Denormalized reference to a related entity

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// `{id, name}` pair embedded in join results so callers can render a
/// related entity without a second lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: Uuid,
    pub name: String,
}

impl EntityRef {
    pub fn new(id: Uuid, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
