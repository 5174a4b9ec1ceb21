//! CLI command definitions.

pub mod absences;
pub mod budgets;
pub mod days;
pub mod settings;
pub mod todos;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use worktrack_core::calendar::YearMonth;

/// Track work hours, absences and to-dos.
#[derive(Debug, Parser)]
#[command(name = "worktrack")]
#[command(about = "Track work hours, absences and to-dos", long_about = None)]
pub struct Cli {
    /// Data file path.
    #[arg(long, env = "WORKTRACK_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show a month with holidays and recorded days.
    Month {
        /// Month as YYYY-MM (default: current month).
        month: Option<YearMonth>,
    },
    /// Show worked time and overtime for a month.
    Summary {
        /// Month as YYYY-MM (default: current month).
        month: Option<YearMonth>,
    },
    /// List public holidays for the configured region.
    Holidays {
        /// Year (default: current year).
        #[arg(long)]
        year: Option<i32>,
    },
    /// Record or remove a single day.
    Day(days::DayCommand),
    /// Vacation ranges.
    Vacation(absences::AbsenceCommand),
    /// Sick leave ranges.
    Sick(absences::AbsenceCommand),
    /// Yearly vacation budgets.
    Budget(budgets::BudgetCommand),
    /// To-do list.
    Todo(todos::TodoCommand),
    /// Application settings.
    Settings(settings::SettingsCommand),
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use clap::CommandFactory;

    use super::*;
    use worktrack_core::calendar::DayType;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_month_with_format() {
        let cli = Cli::try_parse_from(["worktrack", "--format", "json", "month", "2026-02"]).unwrap();

        assert_eq!(cli.format, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Month { month: Some(m) } if m == YearMonth::new(2026, 2).unwrap()
        ));
    }

    #[test]
    fn test_parse_day_set() {
        let cli = Cli::try_parse_from([
            "worktrack", "day", "set", "2026-02-17", "--type", "work", "--start", "08:30",
            "--end", "17:00", "--break", "45",
        ])
        .unwrap();

        let Commands::Day(days::DayCommand {
            action: days::DayAction::Set { date, day_type, start, break_minutes, .. },
        }) = cli.command
        else {
            panic!("expected day set");
        };
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 2, 17).unwrap());
        assert_eq!(day_type, DayType::Work);
        assert_eq!(start.map(|t| t.to_string()), Some("08:30:00".to_string()));
        assert_eq!(break_minutes, 45);
    }

    #[test]
    fn test_invalid_month_is_rejected() {
        assert!(Cli::try_parse_from(["worktrack", "month", "2026-13"]).is_err());
    }
}
