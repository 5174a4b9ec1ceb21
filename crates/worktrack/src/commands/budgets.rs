use worktrack_core::absence::{upsert_budget, VacationBudget};
use worktrack_core::storage::VacationBudgets;

use super::StoreApi;
use crate::error::Result;

impl StoreApi {
    pub async fn get_budgets(&self) -> Result<Vec<VacationBudget>> {
        Ok(self.store.get::<VacationBudgets>().await?)
    }

    /// Stores the budget for its year, replacing an earlier one.
    pub async fn set_budget(&self, budget: VacationBudget) -> Result<VacationBudget> {
        self.store
            .update::<VacationBudgets, _>(|budgets| {
                upsert_budget(budgets, budget);
                Ok(())
            })
            .await?;
        tracing::debug!(year = budget.year, total_days = budget.total_days, "Budget stored");
        Ok(budget)
    }
}
