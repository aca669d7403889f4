//! Association Synchronizer
//!
//! Reconciles a wrestler's links to promotions/factions with a desired id
//! set by full replacement: delete every existing join row for the
//! wrestler, then bulk-insert the desired rows. Idempotent, not
//! incremental. A failing store call aborts the remaining steps and is
//! returned unchanged; completed steps are not rolled back.

use uuid::Uuid;

use crate::domain::{dedup_ids, AffiliationKind, Association, DomainError};
use crate::ports::{Filter, RelationalStore, Table};

use super::joins::association_row;

pub struct AssociationSync<'a, S: RelationalStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: RelationalStore + ?Sized> AssociationSync<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Remove every `kind` link of the wrestler
    pub async fn clear(
        &self,
        kind: AffiliationKind,
        wrestler_id: Uuid,
    ) -> Result<u64, DomainError> {
        let removed = self
            .store
            .delete(
                Table::association(kind),
                &Filter::id("wrestler_id", wrestler_id),
            )
            .await?;
        tracing::debug!("Cleared {} {} link(s) of wrestler {}", removed, kind, wrestler_id);
        Ok(removed)
    }

    /// Bulk-insert one join row per distinct id. No store call when `ids`
    /// is empty.
    pub async fn link(
        &self,
        kind: AffiliationKind,
        wrestler_id: Uuid,
        ids: &[Uuid],
    ) -> Result<usize, DomainError> {
        let ids = dedup_ids(ids);
        if ids.is_empty() {
            return Ok(0);
        }

        let rows = ids
            .iter()
            .map(|id| association_row(&Association::new(kind, wrestler_id, *id)))
            .collect();
        self.store.insert(Table::association(kind), rows).await?;
        tracing::debug!("Linked wrestler {} to {} {}(s)", wrestler_id, ids.len(), kind);
        Ok(ids.len())
    }

    /// Make the wrestler's `kind` links exactly `desired`
    pub async fn replace(
        &self,
        kind: AffiliationKind,
        wrestler_id: Uuid,
        desired: &[Uuid],
    ) -> Result<(), DomainError> {
        self.replace_all(wrestler_id, &[(kind, desired)]).await
    }

    /// Replace several kinds at once: every kind is cleared before any
    /// desired rows are inserted.
    pub async fn replace_all(
        &self,
        wrestler_id: Uuid,
        desired: &[(AffiliationKind, &[Uuid])],
    ) -> Result<(), DomainError> {
        for (kind, _) in desired {
            self.clear(*kind, wrestler_id).await?;
        }
        for (kind, ids) in desired {
            self.link(*kind, wrestler_id, ids).await?;
        }
        Ok(())
    }
}
