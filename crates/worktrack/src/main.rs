//! worktrack CLI entry point.

use anyhow::{anyhow, bail, Result};
use chrono::{Datelike, Local};
use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use worktrack::cli::absences::{AbsenceAction, AbsenceCommand};
use worktrack::cli::budgets::BudgetAction;
use worktrack::cli::days::{build_day, DayAction};
use worktrack::cli::settings::{build_patch, SettingsAction};
use worktrack::cli::todos::TodoAction;
use worktrack::cli::{Cli, Commands, OutputFormat};
use worktrack::output::{pretty, render};
use worktrack::{App, Config};
use worktrack_core::absence::{AbsenceKind, NewRangeEntry, VacationBudget};
use worktrack_core::calendar::YearMonth;
use worktrack_core::todo::{by_status, NewTodo};

fn emit<T: Serialize>(format: OutputFormat, value: &T, pretty: impl FnOnce(&T) -> String) {
    println!("{}", render(value, format, pretty));
}

fn current_month() -> YearMonth {
    YearMonth::of(Local::now().date_naive())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::from_env();
    if let Some(data_file) = &cli.data_file {
        config = config.with_data_file(data_file);
    }

    let log_json = config.log_json;
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "worktrack=info".into()),
        )
        .with(log_json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!log_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();

    let mut app = App::open(config).await?;
    let format = cli.format;

    match cli.command {
        Commands::Month { month } => {
            let view = app.month_view(month.unwrap_or_else(current_month)).await?;
            emit(format, &view, pretty::format_month_view);
        }
        Commands::Summary { month } => {
            let month = month.unwrap_or_else(current_month);
            app.calendar.load_month(month).await?;
            let summary = app.month_summary(month);
            emit(format, &summary, |summary| pretty::format_summary(month, summary));
        }
        Commands::Holidays { year } => {
            let year = year.unwrap_or_else(|| Local::now().year());
            let region = app.settings.settings().region;
            let lookup = app.holidays(year).await?;
            emit(format, &lookup, |lookup| pretty::format_holidays(year, region, lookup));
        }
        Commands::Day(day_cmd) => match day_cmd.action {
            DayAction::Set {
                date,
                day_type,
                start,
                end,
                break_minutes,
                notes,
            } => {
                let day = app
                    .set_day(build_day(date, day_type, start, end, break_minutes, notes))
                    .await?;
                emit(format, &day, |day| format!("Saved:\n{}", pretty::format_day(day)));
            }
            DayAction::Delete { date } => {
                app.delete_day(date).await?;
                if !cli.quiet {
                    println!("Deleted day {}", date);
                }
            }
        },
        Commands::Vacation(cmd) => {
            run_absence(&mut app, AbsenceKind::Vacation, cmd, format, cli.quiet).await?
        }
        Commands::Sick(cmd) => run_absence(&mut app, AbsenceKind::Sick, cmd, format, cli.quiet).await?,
        Commands::Budget(budget_cmd) => match budget_cmd.action {
            BudgetAction::List => {
                let budgets = app.budget_overview();
                emit(format, &budgets, |budgets| pretty::format_budgets(budgets));
            }
            BudgetAction::Set { year, days } => {
                app.absences
                    .set_budget(VacationBudget {
                        year,
                        total_days: days,
                    })
                    .await?;
                let budgets = app.budget_overview();
                emit(format, &budgets, |budgets| pretty::format_budgets(budgets));
            }
        },
        Commands::Todo(todo_cmd) => match todo_cmd.action {
            TodoAction::List { status } => {
                let todos = app.todos.todos();
                let shown = match status {
                    Some(status) => by_status(&todos, status),
                    None => todos.iter().collect(),
                };
                emit(format, &shown, |shown| pretty::format_todos(shown));
            }
            TodoAction::Add {
                title,
                description,
                priority,
                due,
            } => {
                let mut new_todo = NewTodo::new(title)
                    .with_description(description)
                    .with_priority(priority);
                new_todo.due_date = due;
                let todo = app.todos.add(new_todo).await?;
                emit(format, &todo, |todo| format!("Created:\n{}", pretty::format_todo(todo)));
            }
            TodoAction::Status { id, status } => {
                let todo = app.todos.update_status(id, status).await?;
                emit(format, &todo, |todo| format!("Updated:\n{}", pretty::format_todo(todo)));
            }
            TodoAction::Delete { id } => {
                app.todos.delete(id).await?;
                if !cli.quiet {
                    println!("Deleted todo {}", id);
                }
            }
        },
        Commands::Settings(settings_cmd) => match settings_cmd.action {
            SettingsAction::Show => {
                let settings = app.settings.settings();
                emit(format, settings.as_ref(), pretty::format_settings);
            }
            SettingsAction::Set {
                region,
                hours,
                theme,
            } => {
                let patch = build_patch(region, hours, theme);
                if patch.is_empty() {
                    bail!("Nothing to change: pass --region, --hours or --theme");
                }
                let settings = app.settings.update(patch).await?;
                emit(format, &settings, pretty::format_settings);
            }
        },
    }

    Ok(())
}

async fn run_absence(
    app: &mut App,
    kind: AbsenceKind,
    cmd: AbsenceCommand,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    match cmd.action {
        AbsenceAction::List => {
            let entries = app.absences.entries(kind);
            emit(format, entries.as_ref(), |entries| pretty::format_entries(kind, entries));
        }
        AbsenceAction::Add { start, end, notes } => {
            let entry = app
                .add_range(
                    kind,
                    NewRangeEntry::new(start, end.unwrap_or(start)).with_notes(notes),
                )
                .await?;
            emit(format, &entry, |entry| format!("Created:\n{}", pretty::format_entry(entry)));
        }
        AbsenceAction::Update {
            id,
            start,
            end,
            notes,
        } => {
            let mut entry = app
                .absences
                .entries(kind)
                .iter()
                .find(|entry| entry.id == id)
                .cloned()
                .ok_or_else(|| anyhow!("No {kind} entry with ID {id}"))?;
            entry.start_date = start.unwrap_or(entry.start_date);
            entry.end_date = end.unwrap_or(entry.end_date);
            if let Some(notes) = notes {
                entry.notes = notes;
            }
            let entry = app.update_range(entry).await?;
            emit(format, &entry, |entry| format!("Updated:\n{}", pretty::format_entry(entry)));
        }
        AbsenceAction::Delete { id } => {
            app.delete_range(kind, id).await?;
            if !quiet {
                println!("Deleted {} entry {}", kind, id);
            }
        }
        AbsenceAction::Resync { id } => {
            app.resync_range(kind, id).await?;
            if !quiet {
                println!("Resynced {} entry {}", kind, id);
            }
        }
    }
    Ok(())
}
