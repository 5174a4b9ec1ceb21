use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::SettingsError;

/// German federal states, used to select regional public holidays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum RegionCode {
    BW,
    #[default]
    BY,
    BE,
    BB,
    HB,
    HH,
    HE,
    MV,
    NI,
    NW,
    RP,
    SL,
    SN,
    ST,
    SH,
    TH,
}

impl RegionCode {
    pub const ALL: [RegionCode; 16] = [
        RegionCode::BW,
        RegionCode::BY,
        RegionCode::BE,
        RegionCode::BB,
        RegionCode::HB,
        RegionCode::HH,
        RegionCode::HE,
        RegionCode::MV,
        RegionCode::NI,
        RegionCode::NW,
        RegionCode::RP,
        RegionCode::SL,
        RegionCode::SN,
        RegionCode::ST,
        RegionCode::SH,
        RegionCode::TH,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RegionCode::BW => "BW",
            RegionCode::BY => "BY",
            RegionCode::BE => "BE",
            RegionCode::BB => "BB",
            RegionCode::HB => "HB",
            RegionCode::HH => "HH",
            RegionCode::HE => "HE",
            RegionCode::MV => "MV",
            RegionCode::NI => "NI",
            RegionCode::NW => "NW",
            RegionCode::RP => "RP",
            RegionCode::SL => "SL",
            RegionCode::SN => "SN",
            RegionCode::ST => "ST",
            RegionCode::SH => "SH",
            RegionCode::TH => "TH",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            RegionCode::BW => "Baden-Württemberg",
            RegionCode::BY => "Bayern",
            RegionCode::BE => "Berlin",
            RegionCode::BB => "Brandenburg",
            RegionCode::HB => "Bremen",
            RegionCode::HH => "Hamburg",
            RegionCode::HE => "Hessen",
            RegionCode::MV => "Mecklenburg-Vorpommern",
            RegionCode::NI => "Niedersachsen",
            RegionCode::NW => "Nordrhein-Westfalen",
            RegionCode::RP => "Rheinland-Pfalz",
            RegionCode::SL => "Saarland",
            RegionCode::SN => "Sachsen",
            RegionCode::ST => "Sachsen-Anhalt",
            RegionCode::SH => "Schleswig-Holstein",
            RegionCode::TH => "Thüringen",
        }
    }
}

impl fmt::Display for RegionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for RegionCode {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        RegionCode::ALL
            .into_iter()
            .find(|region| region.code() == code)
            .ok_or_else(|| SettingsError::UnknownRegion(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(SettingsError::UnknownTheme(other.to_string())),
        }
    }
}

/// The single application settings record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppSettings {
    #[serde(rename = "germanState", alias = "region")]
    pub region: RegionCode,
    pub work_hours_per_day: f64,
    pub theme: Theme,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            region: RegionCode::BY,
            work_hours_per_day: 8.0,
            theme: Theme::Light,
        }
    }
}

/// A partial settings update. Only the provided fields are merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(
        default,
        rename = "germanState",
        alias = "region",
        skip_serializing_if = "Option::is_none"
    )]
    pub region: Option<RegionCode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_hours_per_day: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
}

impl SettingsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_region(mut self, region: RegionCode) -> Self {
        self.region = Some(region);
        self
    }

    pub fn with_work_hours_per_day(mut self, hours: f64) -> Self {
        self.work_hours_per_day = Some(hours);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.work_hours_per_day.is_none() && self.theme.is_none()
    }

    /// Checks the provided fields.
    pub fn validate(&self) -> Result<(), SettingsError> {
        match self.work_hours_per_day {
            Some(hours) if !(hours > 0.0 && hours <= 24.0) => {
                Err(SettingsError::InvalidWorkHours(hours))
            }
            _ => Ok(()),
        }
    }

    /// Merges the provided fields into `settings`.
    pub fn apply_to(&self, settings: &mut AppSettings) {
        if let Some(region) = self.region {
            settings.region = region;
        }
        if let Some(hours) = self.work_hours_per_day {
            settings.work_hours_per_day = hours;
        }
        if let Some(theme) = self.theme {
            settings.theme = theme;
        }
    }
}
