//! Keeps calendar days and vacation/sick range entries in step.
//!
//! Each operation runs as a sequence of single-collection durable writes.
//! There is no transaction across collections: an operation interrupted
//! halfway leaves drift that [`EntrySynchronizer::resync_range`] repairs.

use chrono::NaiveDate;
use uuid::Uuid;

use worktrack_core::absence::{
    covered_by_wider_entry, plan_range, plan_single_day, AbsenceKind, NewRangeEntry, RangeEntry,
    RangePlan, SingleDayChange,
};
use worktrack_core::calendar::{DayType, WorkDay};
use worktrack_core::storage::{entries_collection_name, StoreError, WorkDays};

use crate::commands::StoreApi;
use crate::error::{Error, Result};

#[derive(Clone)]
pub struct EntrySynchronizer {
    api: StoreApi,
}

impl EntrySynchronizer {
    pub fn new(api: StoreApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &StoreApi {
        &self.api
    }

    /// Stores `day`, reading its previous type from the durable layer.
    pub async fn save_day(&self, day: WorkDay) -> Result<WorkDay> {
        let previous = self.api.get_day(day.date).await?.map(|d| d.day_type);
        self.save_day_after(previous, day).await
    }

    /// Stores `day` given the type the date had before.
    ///
    /// Moving into vacation or sick creates a single-day entry unless one
    /// exists; moving out of it removes the single-day entry.
    pub async fn save_day_after(&self, previous: Option<DayType>, day: WorkDay) -> Result<WorkDay> {
        let day = day.normalized();

        self.sync_single_day(day.date, previous, Some(day.day_type), &day.notes)
            .await?;
        self.api.set_day(day).await
    }

    /// Deletes the day at `date`, reading its previous type from the durable layer.
    pub async fn delete_day(&self, date: NaiveDate) -> Result<()> {
        let previous = self.api.get_day(date).await?.map(|d| d.day_type);
        self.delete_day_after(previous, date).await
    }

    pub async fn delete_day_after(&self, previous: Option<DayType>, date: NaiveDate) -> Result<()> {
        self.sync_single_day(date, previous, None, "").await?;
        self.api.delete_day(date).await
    }

    /// Stores a new entry, then writes a day record for each of its weekdays.
    pub async fn add_range(&self, kind: AbsenceKind, entry: NewRangeEntry) -> Result<RangeEntry> {
        let entry = self.api.add_entry(kind, entry).await?;
        self.apply_plan(plan_range(None, Some(&entry))).await?;
        tracing::info!(%kind, id = %entry.id, start = %entry.start_date, end = %entry.end_date, "Range added");
        Ok(entry)
    }

    /// Moves an entry's days to its new range, then stores the entry.
    ///
    /// The stored version decides which days are cleared.
    pub async fn update_range(&self, entry: RangeEntry) -> Result<RangeEntry> {
        let old = self.stored_entry(entry.kind, entry.id).await?;
        self.apply_plan(plan_range(Some(&old), Some(&entry))).await?;
        let entry = self.api.update_entry(entry).await?;
        tracing::info!(kind = %entry.kind, id = %entry.id, start = %entry.start_date, end = %entry.end_date, "Range updated");
        Ok(entry)
    }

    /// Clears the days of the entry with `id`, then deletes it.
    ///
    /// An unknown id deletes nothing and succeeds.
    pub async fn delete_range(&self, kind: AbsenceKind, id: Uuid) -> Result<()> {
        match self.stored_entry(kind, id).await {
            Ok(old) => self.apply_plan(plan_range(Some(&old), None)).await?,
            Err(Error::Store(StoreError::NotFound { .. })) => {
                tracing::debug!(%kind, %id, "Range to delete was already gone");
            }
            Err(error) => return Err(error),
        }
        self.api.delete_entry(kind, id).await?;
        tracing::info!(%kind, %id, "Range deleted");
        Ok(())
    }

    /// Rewrites the days of `entry` from scratch.
    ///
    /// Running it any number of times gives the same calendar.
    pub async fn resync_range(&self, entry: &RangeEntry) -> Result<()> {
        self.apply_plan(plan_range(Some(entry), Some(entry))).await?;
        tracing::info!(kind = %entry.kind, id = %entry.id, "Range resynced");
        Ok(())
    }

    async fn sync_single_day(
        &self,
        date: NaiveDate,
        previous: Option<DayType>,
        next: Option<DayType>,
        notes: &str,
    ) -> Result<()> {
        for kind in AbsenceKind::ALL {
            let entries = self.api.get_entries(kind).await?;

            let leaving = previous == Some(kind.day_type()) && next != previous;
            if leaving && covered_by_wider_entry(&entries, date) {
                tracing::debug!(%kind, %date, "Day leaves a multi-day range; range kept as is");
            }

            match plan_single_day(kind, date, previous, next, notes, &entries) {
                Some(SingleDayChange::Create { kind, entry }) => {
                    let entry = self.api.add_entry(kind, entry).await?;
                    tracing::debug!(%kind, %date, id = %entry.id, "Single-day entry created");
                }
                Some(SingleDayChange::Remove { kind, id }) => {
                    self.api.delete_entry(kind, id).await?;
                    tracing::debug!(%kind, %date, %id, "Single-day entry removed");
                }
                None => {}
            }
        }
        Ok(())
    }

    async fn stored_entry(&self, kind: AbsenceKind, id: Uuid) -> Result<RangeEntry> {
        self.api
            .get_entries(kind)
            .await?
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| StoreError::not_found(entries_collection_name(kind), id).into())
    }

    /// Applies a plan in one calendar write, clearing before writing.
    async fn apply_plan(&self, plan: RangePlan) -> Result<()> {
        if plan.is_empty() {
            return Ok(());
        }
        let (cleared, written) = (plan.clear.len(), plan.write.len());
        self.api
            .store()
            .update::<WorkDays, _>(|days| {
                for date in &plan.clear {
                    days.remove(date);
                }
                for day in plan.write {
                    days.insert(day.date, day);
                }
                Ok(())
            })
            .await?;
        tracing::debug!(cleared, written, "Range days applied");
        Ok(())
    }
}
