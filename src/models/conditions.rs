use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use std::fmt;

/// Meteorological season, northern hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Autumn,
}

impl Season {
    /// Dec-Feb winter, Mar-May spring, Jun-Aug summer, Sep-Nov autumn.
    pub fn from_month(month: u32) -> Self {
        const ORDER: [Season; 4] = [Season::Autumn, Season::Winter, Season::Spring, Season::Summer];
        ORDER[((month / 3 + 1) % 4) as usize]
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self::from_month(now.month())
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Autumn => "autumn",
        }
    }
}

/// Coarse position of the sun relative to the horizon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    /// Between civil dawn and sunrise
    Sunrise,
    Day,
    /// Between sunset and civil dusk
    Sunset,
    Night,
}

impl TimeOfDay {
    pub const fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Sunrise => "sunrise",
            TimeOfDay::Day => "day",
            TimeOfDay::Sunset => "sunset",
            TimeOfDay::Night => "night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MoonPhase {
    New,
    Waxing,
    Full,
    Waning,
}

impl MoonPhase {
    /// Bucket a phase value on the 0 to 28 scale, four equal quarters.
    pub fn from_phase(value: f64) -> Self {
        if value < 7.0 {
            MoonPhase::New
        } else if value < 14.0 {
            MoonPhase::Waxing
        } else if value < 21.0 {
            MoonPhase::Full
        } else {
            MoonPhase::Waning
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            MoonPhase::New => "new",
            MoonPhase::Waxing => "waxing",
            MoonPhase::Full => "full",
            MoonPhase::Waning => "waning",
        }
    }
}

macro_rules! display_as_str {
    ($($t:ty),*) => {
        $(impl fmt::Display for $t {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_str!(Season, TimeOfDay, MoonPhase);

/// Everything a painting is conditioned on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditions {
    /// Key of the chosen setting, e.g. "lake"
    pub setting: String,

    /// Scene description the key maps to
    pub setting_description: String,

    pub season: Season,
    pub time_of_day: TimeOfDay,
    pub moon_phase: MoonPhase,

    /// Free-text weather description, e.g. "scattered clouds"
    pub weather: String,
}
