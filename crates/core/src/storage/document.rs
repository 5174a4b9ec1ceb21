//! The durable document and its named collections.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::absence::{AbsenceKind, RangeEntry, VacationBudget};
use crate::calendar::WorkDay;
use crate::holiday::HolidayCacheEntry;
use crate::settings::AppSettings;
use crate::todo::Todo;

/// One field per collection. Missing fields load as their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct StoreDocument {
    pub work_days: BTreeMap<NaiveDate, WorkDay>,
    pub vacation_entries: Vec<RangeEntry>,
    pub sick_entries: Vec<RangeEntry>,
    pub vacation_budgets: Vec<VacationBudget>,
    pub todos: Vec<Todo>,
    pub settings: AppSettings,
    pub holiday_cache: Vec<HolidayCacheEntry>,
}

impl StoreDocument {
    pub fn entries(&self, kind: AbsenceKind) -> &Vec<RangeEntry> {
        match kind {
            AbsenceKind::Vacation => &self.vacation_entries,
            AbsenceKind::Sick => &self.sick_entries,
        }
    }

    pub fn entries_mut(&mut self, kind: AbsenceKind) -> &mut Vec<RangeEntry> {
        match kind {
            AbsenceKind::Vacation => &mut self.vacation_entries,
            AbsenceKind::Sick => &mut self.sick_entries,
        }
    }
}

/// A named partition of the document, read and replaced as a whole.
pub trait Collection {
    /// The document field name.
    const NAME: &'static str;
    type Value: Clone + Send + Sync + 'static;

    fn read(document: &StoreDocument) -> &Self::Value;
    fn write(document: &mut StoreDocument, value: Self::Value);
}

macro_rules! collection {
    ($(#[$meta:meta])* $marker:ident, $name:literal, $field:ident: $value:ty) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy)]
        pub struct $marker;

        impl Collection for $marker {
            const NAME: &'static str = $name;
            type Value = $value;

            fn read(document: &StoreDocument) -> &Self::Value {
                &document.$field
            }

            fn write(document: &mut StoreDocument, value: Self::Value) {
                document.$field = value;
            }
        }
    };
}

collection!(
    /// Calendar days keyed by date.
    WorkDays, "workDays", work_days: BTreeMap<NaiveDate, WorkDay>
);
collection!(VacationEntries, "vacationEntries", vacation_entries: Vec<RangeEntry>);
collection!(SickEntries, "sickEntries", sick_entries: Vec<RangeEntry>);
collection!(VacationBudgets, "vacationBudgets", vacation_budgets: Vec<VacationBudget>);
collection!(Todos, "todos", todos: Vec<Todo>);
collection!(
    /// The singleton settings record.
    Settings, "settings", settings: AppSettings
);
collection!(
    /// Durable holiday sets in insertion order.
    HolidayCache, "holidayCache", holiday_cache: Vec<HolidayCacheEntry>
);

/// The collection name that holds entries of `kind`.
pub fn entries_collection_name(kind: AbsenceKind) -> &'static str {
    match kind {
        AbsenceKind::Vacation => VacationEntries::NAME,
        AbsenceKind::Sick => SickEntries::NAME,
    }
}
