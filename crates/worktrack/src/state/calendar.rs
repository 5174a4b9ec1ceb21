use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::watch;

use worktrack_core::calendar::{filter_month, DayType, WorkDay, YearMonth};

use super::Optimistic;
use crate::error::Result;
use crate::sync::EntrySynchronizer;

pub type DayMap = BTreeMap<NaiveDate, WorkDay>;

/// The calendar days of every month loaded so far.
pub struct CalendarState {
    sync: EntrySynchronizer,
    days: Optimistic<DayMap>,
    loaded: BTreeSet<YearMonth>,
}

impl CalendarState {
    pub fn new(sync: EntrySynchronizer) -> Self {
        Self {
            sync,
            days: Optimistic::default(),
            loaded: BTreeSet::new(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<DayMap>> {
        self.days.subscribe()
    }

    pub fn days(&self) -> Arc<DayMap> {
        self.days.current()
    }

    pub fn month(&self, month: YearMonth) -> Vec<WorkDay> {
        filter_month(&self.days.current(), month)
    }

    pub fn is_loaded(&self, month: YearMonth) -> bool {
        self.loaded.contains(&month)
    }

    /// Loads one month and merges it with the months already loaded.
    pub async fn load_month(&mut self, month: YearMonth) -> Result<()> {
        let fetched = self.sync.api().get_month(month).await?;
        tracing::debug!(%month, days = fetched.len(), "Month loaded");
        self.days.modify(|days| {
            days.retain(|date, _| !month.contains(*date));
            days.extend(fetched);
        });
        self.loaded.insert(month);
        Ok(())
    }

    /// Loads every loaded month again, e.g. after range entries changed.
    pub async fn reload(&mut self) -> Result<()> {
        for month in self.loaded.clone() {
            self.load_month(month).await?;
        }
        Ok(())
    }

    /// Shows `day` at once and stores it together with its range entry.
    pub async fn set_day(&mut self, day: WorkDay) -> Result<WorkDay> {
        let day = day.normalized();
        let previous = self.known_type(day.date);
        let sync = self.sync.clone();
        let shown = day.clone();

        self.days
            .mutate_settle(
                "set_day",
                |days| {
                    days.insert(shown.date, shown);
                },
                async move {
                    match previous {
                        Some(previous) => sync.save_day_after(previous, day).await,
                        None => sync.save_day(day).await,
                    }
                },
                |days, stored| {
                    days.insert(stored.date, stored.clone());
                },
            )
            .await
    }

    pub async fn delete_day(&mut self, date: NaiveDate) -> Result<()> {
        let previous = self.known_type(date);
        let sync = self.sync.clone();

        self.days
            .mutate(
                "delete_day",
                |days| {
                    days.remove(&date);
                },
                async move {
                    match previous {
                        Some(previous) => sync.delete_day_after(previous, date).await,
                        None => sync.delete_day(date).await,
                    }
                },
            )
            .await
    }

    /// The stored type at `date` if its month is loaded.
    ///
    /// The outer `None` means the snapshot cannot tell.
    fn known_type(&self, date: NaiveDate) -> Option<Option<DayType>> {
        self.is_loaded(YearMonth::of(date))
            .then(|| self.days.current().get(&date).map(|day| day.day_type))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveTime;

    use super::*;
    use crate::commands::StoreApi;
    use crate::storage::{MemoryBackend, RecordStore};
    use crate::test_support::FlakyBackend;
    use worktrack_core::absence::AbsenceKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    async fn state_with(backend: FlakyBackend) -> CalendarState {
        let store = RecordStore::new(Arc::new(backend));
        store.init().await.unwrap();
        CalendarState::new(EntrySynchronizer::new(StoreApi::new(Arc::new(store))))
    }

    #[tokio::test]
    async fn test_load_month_merges_months() {
        let backend = FlakyBackend::new();
        let mut state = state_with(backend).await;
        let api = state.sync.api().clone();
        api.set_day(WorkDay::of_type(date(2026, 2, 17), DayType::Sick))
            .await
            .unwrap();
        api.set_day(WorkDay::of_type(date(2026, 3, 2), DayType::SchoolDay))
            .await
            .unwrap();

        state.load_month(YearMonth::new(2026, 2).unwrap()).await.unwrap();
        state.load_month(YearMonth::new(2026, 3).unwrap()).await.unwrap();

        assert_eq!(state.days().len(), 2);
        assert_eq!(state.month(YearMonth::new(2026, 3).unwrap()).len(), 1);
    }

    #[tokio::test]
    async fn test_set_day_publishes_before_commit() {
        let backend = FlakyBackend::new();
        let mut state = state_with(backend.clone()).await;
        let month = YearMonth::new(2026, 2).unwrap();
        state.load_month(month).await.unwrap();
        let mut rx = state.subscribe();
        let day = WorkDay::work(date(2026, 2, 17), time(9, 0), time(17, 0), 30);
        backend.hold_saves(true);

        let observe = async {
            backend.wait_for_save().await;
            let visible = rx.borrow_and_update().get(&date(2026, 2, 17)).cloned();
            backend.hold_saves(false);
            backend.release_save();
            visible
        };
        let (stored, visible) = tokio::join!(state.set_day(day.clone()), observe);

        assert_eq!(stored.unwrap(), day);
        assert_eq!(visible, Some(day));
    }

    #[tokio::test]
    async fn test_failed_set_day_rolls_back() {
        let backend = FlakyBackend::new();
        let mut state = state_with(backend.clone()).await;
        let month = YearMonth::new(2026, 2).unwrap();
        state.load_month(month).await.unwrap();
        let before = state.days();
        backend.fail_saves(true);

        let result = state
            .set_day(WorkDay::of_type(date(2026, 2, 17), DayType::Vacation))
            .await;

        assert!(result.unwrap_err().is_write_failure());
        assert_eq!(state.days(), before);
    }

    #[tokio::test]
    async fn test_vacation_day_toggle_uses_snapshot_type() {
        let backend = FlakyBackend::new();
        let mut state = state_with(backend).await;
        let day = date(2026, 2, 17);
        state.load_month(YearMonth::of(day)).await.unwrap();

        state
            .set_day(WorkDay::of_type(day, DayType::Vacation))
            .await
            .unwrap();
        let api = state.sync.api().clone();
        assert_eq!(api.get_entries(AbsenceKind::Vacation).await.unwrap().len(), 1);

        state
            .set_day(WorkDay::work(day, time(8, 0), time(16, 30), 30))
            .await
            .unwrap();

        assert!(api.get_entries(AbsenceKind::Vacation).await.unwrap().is_empty());
        assert_eq!(state.days()[&day].day_type, DayType::Work);
    }

    #[tokio::test]
    async fn test_delete_day_in_unloaded_month_reads_durable_type() {
        let store = RecordStore::new(Arc::new(MemoryBackend::new()));
        store.init().await.unwrap();
        let sync = EntrySynchronizer::new(StoreApi::new(Arc::new(store)));
        let day = date(2026, 2, 17);
        sync.save_day(WorkDay::of_type(day, DayType::Sick)).await.unwrap();
        let mut state = CalendarState::new(sync.clone());

        state.delete_day(day).await.unwrap();

        assert!(sync.api().get_entries(AbsenceKind::Sick).await.unwrap().is_empty());
        assert_eq!(sync.api().get_day(day).await.unwrap(), None);
    }
}
