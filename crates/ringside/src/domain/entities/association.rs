//! Association - Wrestler to Promotion/Faction join record

use uuid::Uuid;

use crate::domain::value_objects::AffiliationKind;

/// A pure join record. The pair is the identity; existence is the only fact
/// it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Association {
    pub kind: AffiliationKind,
    pub wrestler_id: Uuid,
    pub target_id: Uuid,
}

impl Association {
    pub fn new(kind: AffiliationKind, wrestler_id: Uuid, target_id: Uuid) -> Self {
        Self {
            kind,
            wrestler_id,
            target_id,
        }
    }
}

/// Drop repeated ids, keeping the first occurrence's position.
pub fn dedup_ids(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_ids_keeps_first_occurrence() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(dedup_ids(&[b, a, b, a, b]), vec![b, a]);
        assert!(dedup_ids(&[]).is_empty());
    }
}
