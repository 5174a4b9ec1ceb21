use std::collections::BTreeMap;

use chrono::NaiveDate;

use worktrack_core::calendar::{filter_month, WorkDay, YearMonth};
use worktrack_core::storage::WorkDays;

use super::StoreApi;
use crate::error::Result;

impl StoreApi {
    /// Returns the recorded days of `month`, keyed by date.
    pub async fn get_month(&self, month: YearMonth) -> Result<BTreeMap<NaiveDate, WorkDay>> {
        let days = self.store.get::<WorkDays>().await?;
        Ok(filter_month(&days, month)
            .into_iter()
            .map(|day| (day.date, day))
            .collect())
    }

    pub async fn get_day(&self, date: NaiveDate) -> Result<Option<WorkDay>> {
        Ok(self.store.get::<WorkDays>().await?.remove(&date))
    }

    /// Stores `day` under its date, replacing what was there.
    ///
    /// Non-work days lose their times and break. Times are stored as given;
    /// an end before the start counts as zero worked minutes.
    pub async fn set_day(&self, day: WorkDay) -> Result<WorkDay> {
        let day = day.normalized();

        let stored = day.clone();
        self.store
            .update::<WorkDays, _>(|days| {
                days.insert(day.date, day);
                Ok(())
            })
            .await?;
        tracing::debug!(date = %stored.date, day_type = %stored.day_type, "Day stored");
        Ok(stored)
    }

    /// Removes the day at `date`. Removing an absent day succeeds.
    pub async fn delete_day(&self, date: NaiveDate) -> Result<()> {
        self.store
            .update::<WorkDays, _>(|days| {
                days.remove(&date);
                Ok(())
            })
            .await?;
        tracing::debug!(%date, "Day deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::NaiveTime;

    use super::*;
    use crate::storage::{MemoryBackend, RecordStore};
    use worktrack_core::calendar::DayType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    async fn api() -> StoreApi {
        let store = RecordStore::new(Arc::new(MemoryBackend::new()));
        store.init().await.unwrap();
        StoreApi::new(Arc::new(store))
    }

    #[tokio::test]
    async fn test_set_day_round_trips_through_month_query() {
        let api = api().await;
        let day = WorkDay::work(date(2026, 2, 17), time(8, 15), time(16, 45), 45).with_notes("release");

        let stored = api.set_day(day.clone()).await.unwrap();
        let month = api.get_month(YearMonth::new(2026, 2).unwrap()).await.unwrap();

        assert_eq!(stored, day);
        assert_eq!(month.get(&day.date), Some(&day));
        assert_eq!(month.len(), 1);
    }

    #[tokio::test]
    async fn test_set_day_replaces_same_date() {
        let api = api().await;
        let day = date(2026, 2, 17);
        api.set_day(WorkDay::work(day, time(9, 0), time(17, 0), 30))
            .await
            .unwrap();

        api.set_day(WorkDay::of_type(day, DayType::SchoolDay))
            .await
            .unwrap();

        let stored = api.get_day(day).await.unwrap().unwrap();
        assert_eq!(stored.day_type, DayType::SchoolDay);
        assert_eq!(stored.work_start_time, None);
    }

    #[tokio::test]
    async fn test_set_day_normalizes_absence_times() {
        let api = api().await;
        let mut day = WorkDay::work(date(2026, 2, 17), time(9, 0), time(17, 0), 30);
        day.day_type = DayType::PaidAbsence;

        let stored = api.set_day(day).await.unwrap();

        assert_eq!(stored.work_start_time, None);
        assert_eq!(stored.break_minutes, 0);
    }

    #[tokio::test]
    async fn test_set_day_stores_reversed_times() {
        let api = api().await;
        let night = WorkDay::work(date(2026, 2, 18), time(22, 0), time(6, 0), 30);
        let empty = WorkDay::work(date(2026, 2, 19), time(9, 0), time(9, 0), 0);

        api.set_day(night.clone()).await.unwrap();
        api.set_day(empty.clone()).await.unwrap();

        let month = api.get_month(YearMonth::new(2026, 2).unwrap()).await.unwrap();
        assert_eq!(month.get(&date(2026, 2, 18)), Some(&night));
        assert_eq!(month.get(&date(2026, 2, 19)), Some(&empty));
    }

    #[tokio::test]
    async fn test_month_query_excludes_neighbours() {
        let api = api().await;
        for d in [date(2026, 1, 31), date(2026, 2, 2), date(2026, 3, 1)] {
            api.set_day(WorkDay::of_type(d, DayType::Sick)).await.unwrap();
        }

        let month = api.get_month(YearMonth::new(2026, 2).unwrap()).await.unwrap();

        assert_eq!(month.keys().copied().collect::<Vec<_>>(), vec![date(2026, 2, 2)]);
    }

    #[tokio::test]
    async fn test_delete_absent_day_succeeds() {
        let api = api().await;
        api.set_day(WorkDay::of_type(date(2026, 2, 17), DayType::Vacation))
            .await
            .unwrap();

        api.delete_day(date(2026, 2, 17)).await.unwrap();
        api.delete_day(date(2026, 2, 17)).await.unwrap();

        assert_eq!(api.get_day(date(2026, 2, 17)).await.unwrap(), None);
    }
}
