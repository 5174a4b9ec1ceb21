use uuid::Uuid;

use super::types::{RangeEntry, VacationBudget};

/// Replaces the budget for the same year, or appends it.
pub fn upsert_budget(budgets: &mut Vec<VacationBudget>, budget: VacationBudget) {
    match budgets.iter_mut().find(|b| b.year == budget.year) {
        Some(existing) => *existing = budget,
        None => budgets.push(budget),
    }
}

/// Total days budgeted for `year`, or 0 without a budget.
pub fn budget_for_year(budgets: &[VacationBudget], year: i32) -> u32 {
    budgets
        .iter()
        .find(|b| b.year == year)
        .map(|b| b.total_days)
        .unwrap_or(0)
}

/// Replaces the entry with the same id. Returns false if there is none.
pub fn replace_entry(entries: &mut [RangeEntry], entry: RangeEntry) -> bool {
    match entries.iter_mut().find(|e| e.id == entry.id) {
        Some(existing) => {
            *existing = entry;
            true
        }
        None => false,
    }
}

/// Removes and returns the entry with `id`.
pub fn remove_entry(entries: &mut Vec<RangeEntry>, id: Uuid) -> Option<RangeEntry> {
    let index = entries.iter().position(|e| e.id == id)?;
    Some(entries.remove(index))
}
