//! WrestlerFilter - Client-side search over the wrestler list

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::Wrestler;

/// Search criteria for wrestlers. Every supplied criterion must match.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct WrestlerFilter {
    /// Case-insensitive substring of the wrestler's name
    #[serde(default)]
    pub name: Option<String>,
    /// Wrestler must be linked to this promotion
    #[serde(default)]
    pub promotion_id: Option<Uuid>,
    /// Wrestler must be linked to this faction
    #[serde(default)]
    pub faction_id: Option<Uuid>,
}

impl WrestlerFilter {
    pub fn is_empty(&self) -> bool {
        self.needle().is_none() && self.promotion_id.is_none() && self.faction_id.is_none()
    }

    pub fn matches(&self, wrestler: &Wrestler) -> bool {
        if let Some(needle) = self.needle() {
            if !name_matches(&wrestler.name, &needle) {
                return false;
            }
        }
        if let Some(id) = self.promotion_id {
            if !wrestler.promotions.iter().any(|p| p.id == id) {
                return false;
            }
        }
        if let Some(id) = self.faction_id {
            if !wrestler.factions.iter().any(|f| f.id == id) {
                return false;
            }
        }
        true
    }

    fn needle(&self) -> Option<String> {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }
}

/// Case-insensitive substring match. `needle` must already be lowercase.
pub fn name_matches(name: &str, needle: &str) -> bool {
    name.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::EntityRef;
    use chrono::Utc;

    fn wrestler(name: &str, promotions: Vec<EntityRef>, factions: Vec<EntityRef>) -> Wrestler {
        Wrestler {
            id: Uuid::new_v4(),
            name: name.to_string(),
            image_url: None,
            created_at: Utc::now(),
            promotions,
            factions,
        }
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let filter = WrestlerFilter {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(filter.is_empty());
        assert!(filter.matches(&wrestler("Anyone", vec![], vec![])));
    }

    #[test]
    fn test_name_is_case_insensitive_substring() {
        let filter = WrestlerFilter {
            name: Some("OMEGA".to_string()),
            ..Default::default()
        };
        assert!(filter.matches(&wrestler("Kenny Omega", vec![], vec![])));
        assert!(!filter.matches(&wrestler("Kazuchika Okada", vec![], vec![])));
    }

    #[test]
    fn test_all_criteria_must_match() {
        let aew = EntityRef::new(Uuid::new_v4(), "AEW");
        let elite = EntityRef::new(Uuid::new_v4(), "The Elite");
        let filter = WrestlerFilter {
            name: Some("kenny".to_string()),
            promotion_id: Some(aew.id),
            faction_id: Some(elite.id),
        };

        assert!(filter.matches(&wrestler(
            "Kenny Omega",
            vec![aew.clone()],
            vec![elite.clone()]
        )));
        assert!(!filter.matches(&wrestler("Kenny Omega", vec![aew], vec![])));
        assert!(!filter.matches(&wrestler("Kenny Omega", vec![], vec![elite])));
    }
}
