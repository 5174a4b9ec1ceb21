//! Settings CLI commands.

use clap::{Parser, Subcommand};

use worktrack_core::settings::{RegionCode, SettingsPatch, Theme};

/// Settings commands.
#[derive(Debug, Parser)]
pub struct SettingsCommand {
    #[command(subcommand)]
    pub action: SettingsAction,
}

/// Available settings actions.
#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Show the current settings.
    Show,
    /// Change one or more settings.
    Set {
        /// German state code used for holidays, e.g. BY or NW.
        #[arg(long)]
        region: Option<RegionCode>,
        /// Daily target in hours.
        #[arg(long)]
        hours: Option<f64>,
        /// Theme: light or dark.
        #[arg(long)]
        theme: Option<Theme>,
    },
}

/// Builds the patch for `settings set` from the provided flags.
pub fn build_patch(
    region: Option<RegionCode>,
    hours: Option<f64>,
    theme: Option<Theme>,
) -> SettingsPatch {
    SettingsPatch {
        region,
        work_hours_per_day: hours,
        theme,
    }
}
