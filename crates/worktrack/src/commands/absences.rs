use uuid::Uuid;

use worktrack_core::absence::{remove_entry, replace_entry, AbsenceKind, NewRangeEntry, RangeEntry};
use worktrack_core::storage::{entries_collection_name, SickEntries, StoreError, VacationEntries};

use super::StoreApi;
use crate::error::Result;

impl StoreApi {
    pub async fn get_entries(&self, kind: AbsenceKind) -> Result<Vec<RangeEntry>> {
        let entries = match kind {
            AbsenceKind::Vacation => self.store.get::<VacationEntries>().await?,
            AbsenceKind::Sick => self.store.get::<SickEntries>().await?,
        };
        Ok(entries)
    }

    /// Appends a new entry under a fresh id and returns it.
    pub async fn add_entry(&self, kind: AbsenceKind, entry: NewRangeEntry) -> Result<RangeEntry> {
        let entry = entry.into_entry(Uuid::new_v4(), kind);
        let stored = entry.clone();
        self.update_entries(kind, |entries| {
            entries.push(entry);
            Ok(())
        })
        .await?;
        tracing::debug!(%kind, id = %stored.id, start = %stored.start_date, end = %stored.end_date, "Entry added");
        Ok(stored)
    }

    /// Replaces the entry with the same id and kind.
    pub async fn update_entry(&self, entry: RangeEntry) -> Result<RangeEntry> {
        let kind = entry.kind;
        let stored = entry.clone();
        self.update_entries(kind, |entries| {
            let id = entry.id;
            if replace_entry(entries, entry) {
                Ok(())
            } else {
                Err(StoreError::not_found(entries_collection_name(kind), id))
            }
        })
        .await?;
        tracing::debug!(%kind, id = %stored.id, "Entry updated");
        Ok(stored)
    }

    /// Removes the entry with `id`. Removing an unknown id succeeds.
    pub async fn delete_entry(&self, kind: AbsenceKind, id: Uuid) -> Result<()> {
        let removed = self
            .update_entries(kind, |entries| Ok(remove_entry(entries, id)))
            .await?;
        if removed.is_none() {
            tracing::debug!(%kind, %id, "Entry to delete was already gone");
        }
        Ok(())
    }
}
