mod operations;
mod sync;
mod types;

pub use operations::{budget_for_year, remove_entry, replace_entry, upsert_budget};
pub use sync::{
    covered_by_wider_entry, find_single_day_entry, materialize, plan_range, plan_single_day,
    RangePlan, SingleDayChange,
};
pub use types::{AbsenceKind, NewRangeEntry, RangeEntry, VacationBudget};
