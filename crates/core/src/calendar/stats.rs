//! Work-time and absence statistics for the dashboard and month views.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::dates::{count_business_days, DateRange, YearMonth};
use super::types::{DayType, WorkDay};
use crate::absence::RangeEntry;

/// Aggregated figures for one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub worked_minutes: i64,
    pub overtime_minutes: i64,
    pub business_days: u32,
    pub expected_minutes: i64,
}

/// Converts a daily target in hours to minutes.
pub fn target_minutes(hours_per_day: f64) -> i64 {
    (hours_per_day * 60.0).round() as i64
}

/// Net minutes worked between `start` and `end` minus the break.
///
/// Returns 0 when either time is missing and never goes below 0.
pub fn net_minutes(start: Option<NaiveTime>, end: Option<NaiveTime>, break_minutes: u32) -> i64 {
    match (start, end) {
        (Some(start), Some(end)) => {
            ((end - start).num_minutes() - i64::from(break_minutes)).max(0)
        }
        _ => 0,
    }
}

/// Overtime for one day. Negative means undertime.
pub fn overtime_minutes(net_minutes: i64, hours_per_day: f64) -> i64 {
    net_minutes - target_minutes(hours_per_day)
}

/// Business days of all entries, each clamped to `year`.
pub fn used_days_in_year(entries: &[RangeEntry], year: i32) -> u32 {
    let Some(bounds) = DateRange::year(year) else {
        return 0;
    };
    entries
        .iter()
        .filter_map(|entry| DateRange::new(entry.start_date, entry.end_date).intersect(&bounds))
        .map(|overlap| count_business_days(overlap.start, overlap.end))
        .sum()
}

/// Vacation days left from a yearly budget, never below zero.
pub fn remaining_vacation_days(budget: u32, used: u32) -> u32 {
    budget.saturating_sub(used)
}

/// Summarizes the stored days of a month.
///
/// Work days with both times count their net time and overtime. School days
/// count the full daily target with no overtime. Other types count nothing.
pub fn month_summary(
    days: &BTreeMap<NaiveDate, WorkDay>,
    month: YearMonth,
    hours_per_day: f64,
) -> MonthSummary {
    let target = target_minutes(hours_per_day);
    let business_days = count_business_days(month.first_day(), month.last_day());
    let mut summary = MonthSummary {
        business_days,
        expected_minutes: target * i64::from(business_days),
        ..MonthSummary::default()
    };

    for day in days.range(month.first_day()..=month.last_day()).map(|(_, day)| day) {
        match (day.day_type, day.work_start_time, day.work_end_time) {
            (DayType::Work, Some(start), Some(end)) => {
                let net = net_minutes(Some(start), Some(end), day.break_minutes);
                summary.worked_minutes += net;
                summary.overtime_minutes += overtime_minutes(net, hours_per_day);
            }
            (DayType::SchoolDay, _, _) => summary.worked_minutes += target,
            _ => {}
        }
    }
    summary
}

/// Formats minutes as `7h 30min`, `8h` or `45min`.
pub fn format_minutes(minutes: i64) -> String {
    let hours = minutes / 60;
    let rest = minutes % 60;
    match (hours, rest) {
        (0, m) => format!("{m}min"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}min"),
    }
}

/// Formats an overtime balance with its sign. `None` when it is exactly zero.
pub fn format_overtime(minutes: i64) -> Option<String> {
    if minutes == 0 {
        return None;
    }
    let sign = if minutes > 0 { '+' } else { '\u{2212}' };
    Some(format!("{sign}{}", format_minutes(minutes.abs())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::absence::AbsenceKind;
    use uuid::Uuid;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn entry(start: NaiveDate, end: NaiveDate) -> RangeEntry {
        RangeEntry {
            id: Uuid::new_v4(),
            start_date: start,
            end_date: end,
            notes: String::new(),
            kind: AbsenceKind::Vacation,
        }
    }

    #[test]
    fn test_net_minutes() {
        assert_eq!(net_minutes(Some(time(9, 0)), Some(time(17, 30)), 30), 480);
        assert_eq!(net_minutes(Some(time(9, 0)), None, 30), 0);
        assert_eq!(net_minutes(Some(time(9, 0)), Some(time(9, 10)), 30), 0);
    }

    #[test]
    fn test_overtime_with_fractional_target() {
        assert_eq!(overtime_minutes(480, 7.5), 30);
        assert_eq!(overtime_minutes(420, 8.0), -60);
    }

    #[test]
    fn test_used_days_clamped_to_year() {
        let entries = vec![
            // Mon 2025-12-29 .. Fri 2026-01-02: three business days fall in 2025
            entry(date(2025, 12, 29), date(2026, 1, 2)),
            entry(date(2026, 3, 2), date(2026, 3, 8)),
        ];

        assert_eq!(used_days_in_year(&entries, 2026), 2 + 5);
        assert_eq!(used_days_in_year(&entries, 2025), 3);
        assert_eq!(used_days_in_year(&entries, 2024), 0);
    }

    #[test]
    fn test_remaining_vacation_never_negative() {
        assert_eq!(remaining_vacation_days(30, 12), 18);
        assert_eq!(remaining_vacation_days(10, 12), 0);
    }

    #[test]
    fn test_month_summary_counts_work_and_school_days() {
        let mut days = BTreeMap::new();
        let worked = WorkDay::work(date(2026, 2, 2), time(8, 0), time(17, 30), 30);
        let short = WorkDay::work(date(2026, 2, 3), time(9, 0), time(15, 0), 0);
        let school = WorkDay::of_type(date(2026, 2, 4), DayType::SchoolDay);
        let vacation = WorkDay::of_type(date(2026, 2, 5), DayType::Vacation);
        let other_month = WorkDay::work(date(2026, 3, 2), time(8, 0), time(18, 0), 0);
        for day in [worked, short, school, vacation, other_month] {
            days.insert(day.date, day);
        }

        let summary = month_summary(&days, YearMonth::new(2026, 2).unwrap(), 8.0);

        assert_eq!(summary.worked_minutes, 540 + 360 + 480);
        assert_eq!(summary.overtime_minutes, 60 - 120);
        assert_eq!(summary.business_days, 20);
        assert_eq!(summary.expected_minutes, 20 * 480);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(450), "7h 30min");
        assert_eq!(format_minutes(480), "8h");
        assert_eq!(format_minutes(45), "45min");
        assert_eq!(format_minutes(0), "0min");
    }

    #[test]
    fn test_format_overtime() {
        assert_eq!(format_overtime(90).as_deref(), Some("+1h 30min"));
        assert_eq!(format_overtime(-45).as_deref(), Some("\u{2212}45min"));
        assert_eq!(format_overtime(0), None);
    }
}
