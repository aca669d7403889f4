//! Promotion / Faction Repository
//!
//! CRUD over one affiliation table plus a read view enriched with live
//! wrestler counts. Written once, generic over the affiliation kind.

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::domain::{
    Affiliation, AffiliationChanges, Counted, DomainError, EntityRef, Faction, Promotion,
};
use crate::ports::{BlobStore, Filter, Query, RelationalStore, Row, Table};

use super::image_upload::upload_image;
use super::joins::{
    count_query, decode, decode_all, decode_counted, decode_first, entity_row, validate_name,
};

pub type PromotionRepository<S, B> = AffiliationRepository<S, B, Promotion>;
pub type FactionRepository<S, B> = AffiliationRepository<S, B, Faction>;

/// Repository for promotions or factions
pub struct AffiliationRepository<S: ?Sized, B: ?Sized, A> {
    store: Arc<S>,
    blobs: Arc<B>,
    _kind: PhantomData<fn() -> A>,
}

impl<S, B, A> AffiliationRepository<S, B, A>
where
    S: RelationalStore + ?Sized,
    B: BlobStore + ?Sized,
    A: Affiliation,
{
    pub fn new(store: Arc<S>, blobs: Arc<B>) -> Self {
        Self {
            store,
            blobs,
            _kind: PhantomData,
        }
    }

    fn table() -> Table {
        Table::affiliation(A::KIND)
    }

    fn entity_type() -> &'static str {
        A::KIND.entity_name()
    }

    /// All rows, newest first
    pub async fn list(&self) -> Result<Vec<A>, DomainError> {
        let query = Query::select(Self::table())
            .columns(Self::table().columns())
            .newest_first();
        decode_all(self.store.select(&query).await?)
    }

    /// All rows with the number of linked wrestlers, newest first
    pub async fn list_with_count(&self) -> Result<Vec<Counted<A>>, DomainError> {
        let rows = self.store.select(&count_query(A::KIND)).await?;
        rows.into_iter().map(decode_counted::<A>).collect()
    }

    /// Case-insensitive name search over the counted list
    pub async fn search(&self, query: &str) -> Result<Vec<Counted<A>>, DomainError> {
        let needle = query.trim().to_lowercase();
        let all = self.list_with_count().await?;
        if needle.is_empty() {
            return Ok(all);
        }
        Ok(all
            .into_iter()
            .filter(|c| crate::domain::name_matches(c.item.name(), &needle))
            .collect())
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<A>, DomainError> {
        let query = Query::select(Self::table())
            .columns(Self::table().columns())
            .filter(Filter::id("id", id));
        self.store
            .select(&query)
            .await?
            .into_iter()
            .next()
            .map(decode::<A>)
            .transpose()
    }

    /// `{id, name}` pairs for pickers, newest first
    pub async fn options(&self) -> Result<Vec<EntityRef>, DomainError> {
        let query = Query::select(Self::table())
            .columns(&["id", "name"])
            .newest_first();
        decode_all(self.store.select(&query).await?)
    }

    /// Insert a new row. Names are stored as given; duplicates (in any
    /// case) are allowed.
    pub async fn create(&self, name: &str, image_url: Option<String>) -> Result<A, DomainError> {
        validate_name(Self::entity_type(), name)?;
        let rows = self
            .store
            .insert(Self::table(), vec![entity_row(name, image_url.as_deref())])
            .await?;
        let created: A = decode_first(rows, Self::table())?;

        tracing::info!(
            "Created {}: {} ({})",
            Self::entity_type(),
            created.name(),
            created.id()
        );

        Ok(created)
    }

    /// Update the supplied fields only
    pub async fn update(&self, id: Uuid, changes: AffiliationChanges) -> Result<A, DomainError> {
        if let Some(name) = &changes.name {
            validate_name(Self::entity_type(), name)?;
        }
        if changes.is_empty() {
            return self
                .get(id)
                .await?
                .ok_or_else(|| DomainError::not_found(Self::entity_type(), id));
        }

        let mut fields = Row::new();
        if let Some(name) = changes.name {
            fields.insert("name".to_string(), Value::String(name));
        }
        if let Some(image_url) = changes.image_url {
            fields.insert(
                "image_url".to_string(),
                image_url.map(Value::String).unwrap_or(Value::Null),
            );
        }

        let rows = self
            .store
            .update(Self::table(), fields, &Filter::id("id", id))
            .await?;
        match rows.into_iter().next() {
            Some(row) => decode(row),
            None => {
                tracing::warn!("Update matched no {} with id {}", Self::entity_type(), id);
                Err(DomainError::not_found(Self::entity_type(), id))
            }
        }
    }

    /// Delete a row; the store cascades to its wrestler links. Returns
    /// whether anything was deleted.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let removed = self
            .store
            .delete(Self::table(), &Filter::id("id", id))
            .await?;
        if removed > 0 {
            tracing::info!("Deleted {}: {}", Self::entity_type(), id);
        }
        Ok(removed > 0)
    }

    /// Upload an image to this kind's bucket and return its public URL
    pub async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, DomainError> {
        upload_image(&*self.blobs, A::KIND.image_bucket(), file_name, bytes).await
    }
}
