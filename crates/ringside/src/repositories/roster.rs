//! Roster - the three repositories over one pair of stores

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{Counted, DomainError, Faction, Promotion, Wrestler, WrestlerFilter};
use crate::ports::{BlobStore, RelationalStore};

use super::affiliation_repository::{FactionRepository, PromotionRepository};
use super::wrestler_repository::WrestlerRepository;

/// Promotion and faction lists with live wrestler counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterCounts {
    pub promotions: Vec<Counted<Promotion>>,
    pub factions: Vec<Counted<Faction>>,
}

/// Entry point for callers: one repository per entity, sharing the stores
pub struct Roster<S: ?Sized, B: ?Sized> {
    pub wrestlers: WrestlerRepository<S, B>,
    pub promotions: PromotionRepository<S, B>,
    pub factions: FactionRepository<S, B>,
}

impl<S, B> Roster<S, B>
where
    S: RelationalStore + ?Sized,
    B: BlobStore + ?Sized,
{
    pub fn new(store: Arc<S>, blobs: Arc<B>) -> Self {
        Self {
            wrestlers: WrestlerRepository::new(store.clone(), blobs.clone()),
            promotions: PromotionRepository::new(store.clone(), blobs.clone()),
            factions: FactionRepository::new(store, blobs),
        }
    }

    /// Re-read both counted lists concurrently.
    ///
    /// Call after any wrestler write so counts reflect the new links.
    pub async fn refresh_counts(&self) -> Result<RosterCounts, DomainError> {
        let (promotions, factions) = tokio::try_join!(
            self.promotions.list_with_count(),
            self.factions.list_with_count()
        )?;
        tracing::debug!(
            "Refreshed counts: {} promotion(s), {} faction(s)",
            promotions.len(),
            factions.len()
        );
        Ok(RosterCounts {
            promotions,
            factions,
        })
    }

    pub async fn search_wrestlers(
        &self,
        filter: &WrestlerFilter,
    ) -> Result<Vec<Wrestler>, DomainError> {
        self.wrestlers.search(filter).await
    }

    pub async fn search_promotions(
        &self,
        query: &str,
    ) -> Result<Vec<Counted<Promotion>>, DomainError> {
        self.promotions.search(query).await
    }

    pub async fn search_factions(&self, query: &str) -> Result<Vec<Counted<Faction>>, DomainError> {
        self.factions.search(query).await
    }
}
