//! Pretty output formatting.

use worktrack_core::absence::{AbsenceKind, RangeEntry};
use worktrack_core::calendar::{
    format_minutes, format_overtime, net_minutes, DayClass, MonthSummary, WorkDay, YearMonth,
};
use worktrack_core::holiday::{Freshness, HolidayLookup};
use worktrack_core::settings::{AppSettings, RegionCode};
use worktrack_core::todo::Todo;

use crate::app::{BudgetOverview, MonthView};

const TIME_FORMAT: &str = "%H:%M";

/// Format a recorded day for display.
pub fn format_day(day: &WorkDay) -> String {
    let mut output = format!("{} [{}]", day.date, day.day_type);
    if let (Some(start), Some(end)) = (day.work_start_time, day.work_end_time) {
        output.push_str(&format!(
            "\n  Time: {}-{} ({} break)\n  Worked: {}",
            start.format(TIME_FORMAT),
            end.format(TIME_FORMAT),
            format_minutes(i64::from(day.break_minutes)),
            format_minutes(net_minutes(Some(start), Some(end), day.break_minutes)),
        ));
    }
    if !day.notes.is_empty() {
        output.push_str(&format!("\n  Notes: {}", day.notes));
    }
    output
}

fn format_class(class: &DayClass) -> String {
    match class {
        DayClass::Recorded(day_type) => day_type.to_string(),
        DayClass::Holiday(name) => format!("holiday: {name}"),
        DayClass::Weekend => "weekend".to_string(),
        DayClass::Open => "-".to_string(),
    }
}

/// Format a month as one line per day followed by its summary.
pub fn format_month_view(view: &MonthView) -> String {
    let mut output = format!("{}\n", view.month);
    output.push_str(&"-".repeat(40));
    for day in &view.days {
        output.push_str(&format!(
            "\n{} {}  {}",
            day.date,
            day.date.format("%a"),
            format_class(&day.class)
        ));
        if let Some(record) = &day.record {
            if let (Some(start), Some(end)) = (record.work_start_time, record.work_end_time) {
                output.push_str(&format!(
                    " {}-{}",
                    start.format(TIME_FORMAT),
                    end.format(TIME_FORMAT)
                ));
            }
        }
    }
    match view.holiday_freshness {
        Some(Freshness::Stale) => output.push_str("\n\nHolidays may be outdated."),
        None => output.push_str("\n\nHolidays unavailable."),
        Some(Freshness::Fresh) => {}
    }
    output.push_str("\n\n");
    output.push_str(&format_summary(view.month, &view.summary));
    output
}

/// Format the work-time figures of a month.
pub fn format_summary(month: YearMonth, summary: &MonthSummary) -> String {
    let mut output = format!(
        "SUMMARY {}\n  Worked: {}\n  Expected: {} ({} business days)",
        month,
        format_minutes(summary.worked_minutes),
        format_minutes(summary.expected_minutes),
        summary.business_days
    );
    output.push_str(&format!(
        "\n  Overtime: {}",
        format_overtime(summary.overtime_minutes).unwrap_or_else(|| "0min".to_string())
    ));
    output
}

/// Format a range entry for display.
pub fn format_entry(entry: &RangeEntry) -> String {
    let mut output = format!(
        "{} to {} [{}]\n  ID: {}",
        entry.start_date, entry.end_date, entry.kind, entry.id
    );
    if !entry.notes.is_empty() {
        output.push_str(&format!("\n  Notes: {}", entry.notes));
    }
    output
}

/// Format range entries for display.
pub fn format_entries(kind: AbsenceKind, entries: &[RangeEntry]) -> String {
    if entries.is_empty() {
        return format!("No {kind} entries found.");
    }
    let mut output = format!("{} ({})\n", kind.as_str().to_uppercase(), entries.len());
    output.push_str(&"-".repeat(40));
    for entry in entries {
        output.push_str(&format!("\n{}", format_entry(entry)));
        output.push('\n');
    }
    output
}

/// Format vacation budgets for display.
pub fn format_budgets(budgets: &[BudgetOverview]) -> String {
    if budgets.is_empty() {
        return "No budgets found.".to_string();
    }
    let mut output = format!("BUDGETS ({})\n", budgets.len());
    output.push_str(&"-".repeat(40));
    for budget in budgets {
        output.push_str(&format!(
            "\n{}: {} of {} days used, {} remaining",
            budget.year, budget.used_days, budget.total_days, budget.remaining_days
        ));
    }
    output
}

/// Format a to-do for display.
pub fn format_todo(todo: &Todo) -> String {
    let mut output = format!(
        "{} [{}, {}]\n  ID: {}",
        todo.title, todo.status, todo.priority, todo.id
    );
    if let Some(due) = todo.due_date {
        output.push_str(&format!("\n  Due: {due}"));
    }
    if !todo.description.is_empty() {
        output.push_str(&format!("\n  Description: {}", todo.description));
    }
    output
}

/// Format to-dos for display.
pub fn format_todos(todos: &[&Todo]) -> String {
    if todos.is_empty() {
        return "No todos found.".to_string();
    }
    let mut output = format!("TODOS ({})\n", todos.len());
    output.push_str(&"-".repeat(40));
    for todo in todos {
        output.push_str(&format!("\n{}", format_todo(todo)));
        output.push('\n');
    }
    output
}

/// Format the settings for display.
pub fn format_settings(settings: &AppSettings) -> String {
    format!(
        "Region: {} ({})\nWork hours per day: {}\nTheme: {}",
        settings.region.display_name(),
        settings.region,
        settings.work_hours_per_day,
        settings.theme
    )
}

/// Format the holidays of a year for display.
pub fn format_holidays(year: i32, region: RegionCode, lookup: &HolidayLookup) -> String {
    let mut holidays: Vec<_> = lookup.holidays.iter().collect();
    holidays.sort_by(|(a_name, a), (b_name, b)| a.date.cmp(&b.date).then_with(|| a_name.cmp(b_name)));

    let mut output = format!("HOLIDAYS {} {} ({})\n", year, region, holidays.len());
    output.push_str(&"-".repeat(40));
    for (name, info) in holidays {
        output.push_str(&format!("\n{}  {}", info.date, name));
        if !info.note.is_empty() {
            output.push_str(&format!("\n  {}", info.note));
        }
    }
    if lookup.is_stale() {
        output.push_str("\n\nServed from an expired cache; the holiday source was unreachable.");
    }
    output
}
