use std::sync::Arc;

use tokio::sync::watch;
use uuid::Uuid;

use worktrack_core::absence::{
    budget_for_year, remove_entry, replace_entry, upsert_budget, AbsenceKind, NewRangeEntry,
    RangeEntry, VacationBudget,
};
use worktrack_core::calendar::{remaining_vacation_days, used_days_in_year};
use worktrack_core::storage::{entries_collection_name, StoreError};

use super::Optimistic;
use crate::error::Result;
use crate::sync::EntrySynchronizer;

/// Vacation and sick entries, plus the yearly vacation budgets.
pub struct AbsenceState {
    sync: EntrySynchronizer,
    vacation: Optimistic<Vec<RangeEntry>>,
    sick: Optimistic<Vec<RangeEntry>>,
    budgets: Optimistic<Vec<VacationBudget>>,
}

impl AbsenceState {
    pub fn new(sync: EntrySynchronizer) -> Self {
        Self {
            sync,
            vacation: Optimistic::default(),
            sick: Optimistic::default(),
            budgets: Optimistic::default(),
        }
    }

    fn cell(&self, kind: AbsenceKind) -> &Optimistic<Vec<RangeEntry>> {
        match kind {
            AbsenceKind::Vacation => &self.vacation,
            AbsenceKind::Sick => &self.sick,
        }
    }

    fn cell_mut(&mut self, kind: AbsenceKind) -> &mut Optimistic<Vec<RangeEntry>> {
        match kind {
            AbsenceKind::Vacation => &mut self.vacation,
            AbsenceKind::Sick => &mut self.sick,
        }
    }

    pub fn entries(&self, kind: AbsenceKind) -> Arc<Vec<RangeEntry>> {
        self.cell(kind).current()
    }

    pub fn subscribe(&self, kind: AbsenceKind) -> watch::Receiver<Arc<Vec<RangeEntry>>> {
        self.cell(kind).subscribe()
    }

    pub fn budgets(&self) -> Arc<Vec<VacationBudget>> {
        self.budgets.current()
    }

    pub fn subscribe_budgets(&self) -> watch::Receiver<Arc<Vec<VacationBudget>>> {
        self.budgets.subscribe()
    }

    /// Replaces all three collections with the durable ones.
    pub async fn load_all(&mut self) -> Result<()> {
        let api = self.sync.api().clone();
        let vacation = api.get_entries(AbsenceKind::Vacation).await?;
        let sick = api.get_entries(AbsenceKind::Sick).await?;
        let budgets = api.get_budgets().await?;
        tracing::debug!(
            vacation = vacation.len(),
            sick = sick.len(),
            budgets = budgets.len(),
            "Absences loaded"
        );
        self.vacation.replace(vacation);
        self.sick.replace(sick);
        self.budgets.replace(budgets);
        Ok(())
    }

    /// Shows a placeholder entry at once and replaces it with the stored one.
    pub async fn add(&mut self, kind: AbsenceKind, entry: NewRangeEntry) -> Result<RangeEntry> {
        let placeholder = entry.clone().into_entry(Uuid::new_v4(), kind);
        let temp_id = placeholder.id;
        let sync = self.sync.clone();

        self.cell_mut(kind)
            .mutate_settle(
                "add_entry",
                |entries| entries.push(placeholder),
                async move { sync.add_range(kind, entry).await },
                |entries, stored| {
                    if let Some(slot) = entries.iter_mut().find(|e| e.id == temp_id) {
                        *slot = stored.clone();
                    }
                },
            )
            .await
    }

    pub async fn update(&mut self, entry: RangeEntry) -> Result<RangeEntry> {
        let kind = entry.kind;
        let shown = entry.clone();
        let sync = self.sync.clone();

        self.cell_mut(kind)
            .mutate_settle(
                "update_entry",
                |entries| {
                    replace_entry(entries, shown);
                },
                async move { sync.update_range(entry).await },
                |entries, stored| {
                    replace_entry(entries, stored.clone());
                },
            )
            .await
    }

    pub async fn delete(&mut self, kind: AbsenceKind, id: Uuid) -> Result<()> {
        let sync = self.sync.clone();

        self.cell_mut(kind)
            .mutate(
                "delete_entry",
                |entries| {
                    remove_entry(entries, id);
                },
                async move { sync.delete_range(kind, id).await },
            )
            .await
    }

    /// Rewrites the calendar days of a stored entry.
    pub async fn resync(&self, kind: AbsenceKind, id: Uuid) -> Result<()> {
        let entries = self.sync.api().get_entries(kind).await?;
        let entry = entries
            .iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| StoreError::not_found(entries_collection_name(kind), id))?;
        self.sync.resync_range(entry).await
    }

    pub async fn set_budget(&mut self, budget: VacationBudget) -> Result<VacationBudget> {
        let api = self.sync.api().clone();

        self.budgets
            .mutate_settle(
                "set_budget",
                |budgets| upsert_budget(budgets, budget),
                async move { api.set_budget(budget).await },
                |budgets, stored| upsert_budget(budgets, *stored),
            )
            .await
    }

    /// The budget for `year`, 0 when none is set.
    pub fn budget_for_year(&self, year: i32) -> u32 {
        budget_for_year(&self.budgets.current(), year)
    }

    /// Vacation business days taken in `year`.
    pub fn used_days(&self, year: i32) -> u32 {
        used_days_in_year(&self.vacation.current(), year)
    }

    pub fn remaining_days(&self, year: i32) -> u32 {
        remaining_vacation_days(self.budget_for_year(year), self.used_days(year))
    }
}
