//! AffiliationKind - The entity types a wrestler can be linked to

use serde::{Deserialize, Serialize};

/// Kind of affiliation a wrestler can hold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AffiliationKind {
    Promotion,
    Faction,
}

impl AffiliationKind {
    /// Human readable entity name, used in errors and logs
    pub fn entity_name(&self) -> &'static str {
        match self {
            AffiliationKind::Promotion => "Promotion",
            AffiliationKind::Faction => "Faction",
        }
    }

    /// Blob store bucket holding this kind's images
    pub fn image_bucket(&self) -> &'static str {
        match self {
            AffiliationKind::Promotion => "promotion-images",
            AffiliationKind::Faction => "faction-images",
        }
    }
}

impl std::fmt::Display for AffiliationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AffiliationKind::Promotion => write!(f, "promotion"),
            AffiliationKind::Faction => write!(f, "faction"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds_name_their_buckets() {
        assert_eq!(AffiliationKind::Promotion.image_bucket(), "promotion-images");
        assert_eq!(AffiliationKind::Faction.image_bucket(), "faction-images");
        assert_eq!(AffiliationKind::Faction.to_string(), "faction");
    }
}
