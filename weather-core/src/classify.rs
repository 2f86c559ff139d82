//! Mapping of provider weather codes (WMO) to display text and icon category.

use serde::Serialize;
use std::ops::RangeInclusive;

/// Icon family used to render a weather condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IconCategory {
    Sun,
    Moon,
    /// Also the fallback for codes nothing else claims.
    Cloud,
    Fog,
    Drizzle,
    Rain,
    Snow,
    Thunderstorm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub description: &'static str,
    pub icon: IconCategory,
}

pub const UNKNOWN: Classification =
    Classification { description: "Unknown", icon: IconCategory::Cloud };

struct Rule {
    codes: RangeInclusive<i64>,
    description: &'static str,
    icon: IconCategory,
}

const fn rule(lo: i64, hi: i64, description: &'static str, icon: IconCategory) -> Rule {
    Rule { codes: lo..=hi, description, icon }
}

// Disjoint, inclusive ranges. Code 0 is handled separately because its icon
// depends on the day flag.
const RULES: &[Rule] = &[
    rule(1, 3, "Partly Cloudy", IconCategory::Cloud),
    rule(45, 48, "Foggy", IconCategory::Fog),
    rule(51, 55, "Drizzle", IconCategory::Drizzle),
    rule(56, 57, "Freezing Drizzle", IconCategory::Drizzle),
    rule(61, 65, "Rain", IconCategory::Rain),
    rule(66, 67, "Freezing Rain", IconCategory::Rain),
    rule(71, 77, "Snow Fall", IconCategory::Snow),
    rule(80, 82, "Rain Showers", IconCategory::Rain),
    rule(85, 86, "Snow Showers", IconCategory::Snow),
    rule(95, 99, "Thunderstorm", IconCategory::Thunderstorm),
];

/// Classify a weather code. Never fails: unrecognized codes map to [`UNKNOWN`].
pub fn classify(code: i64, is_day: bool) -> Classification {
    if code == 0 {
        let icon = if is_day { IconCategory::Sun } else { IconCategory::Moon };
        return Classification { description: "Clear Sky", icon };
    }

    RULES
        .iter()
        .find(|r| r.codes.contains(&code))
        .map(|r| Classification { description: r.description, icon: r.icon })
        .unwrap_or(UNKNOWN)
}
