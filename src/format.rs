//! Value normalization: raw numeric stats to display strings and semantic
//! color classes.
//!
//! Formatting policy (fixed, used by every projection):
//! - percentages: ratio x 100 with exactly two decimals, `%` suffix;
//! - adaptive magnitudes: `|x| >= 1e6` as `{:.2}M`, `1e5..1e6` as
//!   whole-number `K`, `1e4..1e5` as one-decimal `K`, smaller integers
//!   verbatim, smaller fractions with two decimals; zero renders `"0"`.

use crate::color::{palette, Rgba};
use crate::stats::StatKey;

/// Formats an absolute value with magnitude-appropriate abbreviation.
pub fn adaptive(x: f64) -> String {
    let abs = x.abs();
    if abs >= 1_000_000.0 {
        format!("{:.2}M", x / 1_000_000.0)
    } else if abs >= 100_000.0 {
        format!("{:.0}K", x / 1_000.0)
    } else if abs >= 10_000.0 {
        format!("{:.1}K", x / 1_000.0)
    } else if x.fract() == 0.0 {
        format!("{}", x as i64)
    } else {
        format!("{x:.2}")
    }
}

/// Formats a ratio as a percentage: `0.5421` -> `"54.21%"`.
pub fn winrate(x: f64) -> String {
    format!("{:.2}%", x * 100.0)
}

/// Signed-delta form: empty for zero, `"+"` prefix for positive, the
/// number's own `-` for negative (never a double sign).
pub fn value_add_plus(x: f64) -> String {
    if x == 0.0 {
        String::new()
    } else if x > 0.0 {
        format!("+{}", adaptive(x))
    } else {
        adaptive(x)
    }
}

/// Signed percentage form for winrate/accuracy deltas.
pub fn delta_percent(x: f64) -> String {
    if x == 0.0 {
        String::new()
    } else if x > 0.0 {
        format!("+{}", winrate(x))
    } else {
        winrate(x)
    }
}

/// Formats one stat according to its key's formatting rule.
pub fn absolute(key: StatKey, x: f64) -> String {
    if key.is_percent() {
        winrate(x)
    } else {
        adaptive(x)
    }
}

/// Formats one stat delta according to its key's formatting rule.
pub fn delta(key: StatKey, x: f64) -> String {
    if key.is_percent() {
        delta_percent(x)
    } else {
        value_add_plus(x)
    }
}

/// Semantic color classification for a rendered value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueClass {
    Positive,
    Negative,
    Neutral,
    League(League),
}

impl ValueClass {
    /// Resolves the class against the caller's settings colors.
    pub fn color(self, positive: Rgba, negative: Rgba) -> Rgba {
        match self {
            ValueClass::Positive => positive,
            ValueClass::Negative => negative,
            ValueClass::Neutral => palette::GREY,
            ValueClass::League(league) => league.color(),
        }
    }
}

/// Classifies a delta. `reverse` flips the sign sense for stats where a
/// smaller value is an improvement.
pub fn classify_delta(x: f64, reverse: bool) -> ValueClass {
    if x == 0.0 || !x.is_finite() {
        ValueClass::Neutral
    } else if (x > 0.0) != reverse {
        ValueClass::Positive
    } else {
        ValueClass::Negative
    }
}

/// Rating league tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum League {
    Calibration,
    NoLeague,
    Gold,
    Platinum,
    Brilliant,
}

impl League {
    pub fn color(self) -> Rgba {
        match self {
            League::Gold => palette::GOLD,
            League::Platinum => palette::PLATINUM,
            League::Brilliant => palette::BRILLIANT,
            League::Calibration | League::NoLeague => palette::GREY,
        }
    }
}

/// Maps a rating value to its league tier. Calibration takes precedence
/// while calibration battles remain.
pub fn classify_league(rating: f64, calibration_battles_left: u32) -> League {
    if calibration_battles_left > 0 {
        League::Calibration
    } else if rating >= 5000.0 {
        League::Brilliant
    } else if rating >= 4000.0 {
        League::Platinum
    } else if rating >= 3000.0 {
        League::Gold
    } else {
        League::NoLeague
    }
}
