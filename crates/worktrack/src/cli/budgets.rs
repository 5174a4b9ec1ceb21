//! Vacation budget CLI commands.

use clap::{Parser, Subcommand};

/// Budget commands.
#[derive(Debug, Parser)]
pub struct BudgetCommand {
    #[command(subcommand)]
    pub action: BudgetAction,
}

/// Available budget actions.
#[derive(Debug, Subcommand)]
pub enum BudgetAction {
    /// List budgets with used and remaining days.
    List,
    /// Set the vacation days for a year.
    Set {
        /// Year.
        year: i32,
        /// Total vacation days.
        days: u32,
    },
}
