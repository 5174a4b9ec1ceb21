//! Wiring of the store, the holiday cache and the state containers.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;

use worktrack_core::absence::{AbsenceKind, NewRangeEntry, RangeEntry};
use worktrack_core::calendar::{classify_day, month_summary, DayClass, MonthSummary, WorkDay, YearMonth};
use worktrack_core::holiday::{Freshness, Holiday, HolidayLookup, HolidaySet, JsonFetcher};
use worktrack_core::storage::StorageBackend;

use crate::commands::StoreApi;
use crate::config::Config;
use crate::error::Result;
use crate::holidays::{HolidayCache, ReqwestFetcher};
use crate::state::{AbsenceState, CalendarState, SettingsState, TodoState};
use crate::storage::{JsonFileBackend, RecordStore};
use crate::sync::EntrySynchronizer;

/// One calendar cell of a month view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub class: DayClass,
    pub record: Option<WorkDay>,
}

/// A month as the calendar shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub month: YearMonth,
    pub days: Vec<CalendarDay>,
    pub holidays: Vec<Holiday>,
    /// `None` when no holiday data could be loaded at all.
    pub holiday_freshness: Option<Freshness>,
    pub summary: MonthSummary,
}

/// Vacation budget of one year with its usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetOverview {
    pub year: i32,
    pub total_days: u32,
    pub used_days: u32,
    pub remaining_days: u32,
}

/// The application context: durable layer plus client-visible state.
pub struct App {
    config: Config,
    api: StoreApi,
    holidays: HolidayCache,
    pub calendar: CalendarState,
    pub absences: AbsenceState,
    pub todos: TodoState,
    pub settings: SettingsState,
}

impl App {
    /// Opens the data file from `config` and the remote holiday source.
    pub async fn open(config: Config) -> Result<Self> {
        let backend = Arc::new(JsonFileBackend::new(&config.data_file));
        let fetcher = Arc::new(ReqwestFetcher::new());
        Self::with_parts(config, backend, fetcher).await
    }

    pub async fn with_parts(
        config: Config,
        backend: Arc<dyn StorageBackend>,
        fetcher: Arc<dyn JsonFetcher>,
    ) -> Result<Self> {
        let store = Arc::new(RecordStore::new(backend));
        store.init().await?;

        let api = StoreApi::new(Arc::clone(&store));
        let sync = EntrySynchronizer::new(api.clone());
        let holidays = HolidayCache::new(
            store,
            fetcher,
            config.holiday_base_url()?,
            config.holiday_policy(),
            config.session_cache_capacity,
        );

        let mut app = Self {
            calendar: CalendarState::new(sync.clone()),
            absences: AbsenceState::new(sync),
            todos: TodoState::new(api.clone()),
            settings: SettingsState::new(api.clone()),
            config,
            api,
            holidays,
        };
        app.absences.load_all().await?;
        app.todos.load_all().await?;
        app.settings.load().await?;

        tracing::info!(data_file = %app.config.data_file.display(), "Work tracker ready");
        Ok(app)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn api(&self) -> &StoreApi {
        &self.api
    }

    /// Stores a day and refreshes the range entries it may have touched.
    pub async fn set_day(&mut self, day: WorkDay) -> Result<WorkDay> {
        let result = self.calendar.set_day(day).await;
        self.absences.load_all().await?;
        result
    }

    pub async fn delete_day(&mut self, date: NaiveDate) -> Result<()> {
        let result = self.calendar.delete_day(date).await;
        self.absences.load_all().await?;
        result
    }

    /// Adds a range entry and refreshes the loaded calendar months.
    ///
    /// The entry is stored before its days are written, so a failed day
    /// write still leaves it listed and ready for [`resync_range`](Self::resync_range).
    pub async fn add_range(&mut self, kind: AbsenceKind, entry: NewRangeEntry) -> Result<RangeEntry> {
        let result = self.absences.add(kind, entry).await;
        self.refresh_after_range(result.is_err()).await?;
        result
    }

    pub async fn update_range(&mut self, entry: RangeEntry) -> Result<RangeEntry> {
        let result = self.absences.update(entry).await;
        self.refresh_after_range(result.is_err()).await?;
        result
    }

    pub async fn delete_range(&mut self, kind: AbsenceKind, id: Uuid) -> Result<()> {
        let result = self.absences.delete(kind, id).await;
        self.refresh_after_range(result.is_err()).await?;
        result
    }

    async fn refresh_after_range(&mut self, failed: bool) -> Result<()> {
        // A rollback may hide a half-applied change; show what was stored.
        if failed {
            self.absences.load_all().await?;
        }
        self.calendar.reload().await
    }

    pub async fn resync_range(&mut self, kind: AbsenceKind, id: Uuid) -> Result<()> {
        self.absences.resync(kind, id).await?;
        self.calendar.reload().await
    }

    /// Holidays of `year` for the configured region.
    pub async fn holidays(&self, year: i32) -> Result<HolidayLookup> {
        let region = self.settings.settings().region;
        self.holidays.get(year, region).await
    }

    /// Loads `month` and classifies each of its days.
    ///
    /// A holiday lookup that fails without any cached data leaves the
    /// holiday list empty instead of failing the view.
    pub async fn month_view(&mut self, month: YearMonth) -> Result<MonthView> {
        self.calendar.load_month(month).await?;

        let lookup = match self.holidays(month.year()).await {
            Ok(lookup) => Some(lookup),
            Err(error) => {
                tracing::warn!(%month, error = %error, "Showing month without holidays");
                None
            }
        };
        let empty = HolidaySet::default();
        let holidays = lookup.as_ref().map_or(&empty, |lookup| &lookup.holidays);

        let stored = self.calendar.days();
        let days = month
            .range()
            .days()
            .map(|date| {
                let record = stored.get(&date).cloned();
                CalendarDay {
                    date,
                    class: classify_day(date, record.as_ref(), holidays),
                    record,
                }
            })
            .collect();

        Ok(MonthView {
            month,
            days,
            holidays: holidays.holidays_in_month(month),
            holiday_freshness: lookup.as_ref().map(|lookup| lookup.freshness),
            summary: self.month_summary(month),
        })
    }

    /// Every stored budget with used and remaining days, by year.
    pub fn budget_overview(&self) -> Vec<BudgetOverview> {
        let mut overview: Vec<BudgetOverview> = self
            .absences
            .budgets()
            .iter()
            .map(|budget| BudgetOverview {
                year: budget.year,
                total_days: budget.total_days,
                used_days: self.absences.used_days(budget.year),
                remaining_days: self.absences.remaining_days(budget.year),
            })
            .collect();
        overview.sort_by_key(|row| row.year);
        overview
    }

    /// Work-time figures of a loaded month under the current settings.
    pub fn month_summary(&self, month: YearMonth) -> MonthSummary {
        let hours = self.settings.settings().work_hours_per_day;
        month_summary(&self.calendar.days(), month, hours)
    }
}
