//! Wrestler Repository
//!
//! CRUD for wrestlers, read-side reconstruction of their promotion and
//! faction sets, and write-side association management through
//! `AssociationSync`.

use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    AffiliationKind, DomainError, NewWrestler, Wrestler, WrestlerFilter, WrestlerUpdate,
};
use crate::ports::{BlobStore, Filter, Query, RelationalStore, Row, Table};

use super::association_sync::AssociationSync;
use super::image_upload::upload_image;
use super::joins::{decode_first, decode_wrestlers, entity_row, validate_name, wrestler_join_query};
use super::update_locks::UpdateLocks;

const ENTITY_TYPE: &str = "Wrestler";
const IMAGE_BUCKET: &str = "wrestler-images";

#[derive(serde::Deserialize)]
struct IdRow {
    id: Uuid,
}

/// Repository for wrestlers and their association sets
pub struct WrestlerRepository<S: ?Sized, B: ?Sized> {
    store: Arc<S>,
    blobs: Arc<B>,
    locks: UpdateLocks,
}

impl<S, B> WrestlerRepository<S, B>
where
    S: RelationalStore + ?Sized,
    B: BlobStore + ?Sized,
{
    pub fn new(store: Arc<S>, blobs: Arc<B>) -> Self {
        Self {
            store,
            blobs,
            locks: UpdateLocks::new(),
        }
    }

    fn sync(&self) -> AssociationSync<'_, S> {
        AssociationSync::new(&*self.store)
    }

    /// Plain rows, newest first, association sets left empty
    pub async fn list(&self) -> Result<Vec<Wrestler>, DomainError> {
        let query = Query::select(Table::Wrestlers)
            .columns(Table::Wrestlers.columns())
            .newest_first();
        decode_wrestlers(self.store.select(&query).await?)
    }

    /// Every wrestler with both association sets, newest first
    pub async fn list_with_associations(&self) -> Result<Vec<Wrestler>, DomainError> {
        decode_wrestlers(self.store.select(&wrestler_join_query()).await?)
    }

    /// One wrestler with both association sets
    pub async fn get_with_associations(&self, id: Uuid) -> Result<Option<Wrestler>, DomainError> {
        let query = wrestler_join_query().filter(Filter::id("id", id));
        let rows = self.store.select(&query).await?;
        Ok(decode_wrestlers(rows)?.into_iter().next())
    }

    /// Client-side search over the joined list
    pub async fn search(&self, filter: &WrestlerFilter) -> Result<Vec<Wrestler>, DomainError> {
        let all = self.list_with_associations().await?;
        if filter.is_empty() {
            return Ok(all);
        }
        Ok(all.into_iter().filter(|w| filter.matches(w)).collect())
    }

    /// Insert the wrestler row, then its promotion and faction links.
    ///
    /// Returns the wrestler re-read from the store so reference names come
    /// from the promotion/faction rows themselves.
    pub async fn create(&self, new: NewWrestler) -> Result<Wrestler, DomainError> {
        validate_name(ENTITY_TYPE, &new.name)?;

        let rows = self
            .store
            .insert(
                Table::Wrestlers,
                vec![entity_row(&new.name, new.image_url.as_deref())],
            )
            .await?;
        let IdRow { id } = decode_first(rows, Table::Wrestlers)?;

        let sync = self.sync();
        sync.link(AffiliationKind::Promotion, id, &new.promotion_ids).await?;
        sync.link(AffiliationKind::Faction, id, &new.faction_ids).await?;

        tracing::info!("Created Wrestler: {} ({})", new.name, id);

        self.refetch(id).await
    }

    /// Update the wrestler row, then fully replace both association sets.
    ///
    /// Steps run in order: base row, clear promotions, clear factions,
    /// insert promotions, insert factions. A failure stops the sequence and
    /// leaves earlier steps applied; repeating the call converges.
    ///
    /// Updates of the same wrestler through this repository run one at a
    /// time, so concurrent callers never end with a merge of their sets.
    pub async fn update(&self, id: Uuid, update: WrestlerUpdate) -> Result<Wrestler, DomainError> {
        validate_name(ENTITY_TYPE, &update.name)?;

        let guard = self.locks.acquire(id).await;
        let result = self.apply_update(id, update).await;
        self.locks.release(id, guard).await;
        result
    }

    async fn apply_update(
        &self,
        id: Uuid,
        update: WrestlerUpdate,
    ) -> Result<Wrestler, DomainError> {
        let mut fields = Row::new();
        fields.insert("name".to_string(), Value::String(update.name));
        if let Some(image_url) = update.image_url {
            fields.insert(
                "image_url".to_string(),
                image_url.map(Value::String).unwrap_or(Value::Null),
            );
        }

        let updated = self
            .store
            .update(Table::Wrestlers, fields, &Filter::id("id", id))
            .await?;
        if updated.is_empty() {
            tracing::warn!("Update matched no Wrestler with id {}", id);
            return Err(DomainError::not_found(ENTITY_TYPE, id));
        }

        self.sync()
            .replace_all(
                id,
                &[
                    (AffiliationKind::Promotion, update.promotion_ids.as_slice()),
                    (AffiliationKind::Faction, update.faction_ids.as_slice()),
                ],
            )
            .await?;

        self.refetch(id).await
    }

    /// Delete a wrestler; the store cascades to its links
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let removed = self
            .store
            .delete(Table::Wrestlers, &Filter::id("id", id))
            .await?;
        if removed > 0 {
            tracing::info!("Deleted Wrestler: {}", id);
        }
        Ok(removed > 0)
    }

    /// Upload a wrestler image and return its public URL
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DomainError> {
        upload_image(&*self.blobs, IMAGE_BUCKET, file_name, bytes).await
    }

    async fn refetch(&self, id: Uuid) -> Result<Wrestler, DomainError> {
        self.get_with_associations(id)
            .await?
            .ok_or_else(|| DomainError::not_found(ENTITY_TYPE, id))
    }
}
