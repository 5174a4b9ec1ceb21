mod dates;
mod error;
mod operations;
mod stats;
mod types;

pub use dates::{count_business_days, is_weekday, weekdays_in_range, DateRange, YearMonth};
pub use error::CalendarError;
pub use operations::{classify_day, filter_month};
pub use stats::{
    format_minutes, format_overtime, month_summary, net_minutes, overtime_minutes,
    remaining_vacation_days, target_minutes, used_days_in_year, MonthSummary,
};
pub use types::{DayClass, DayType, WorkDay};
