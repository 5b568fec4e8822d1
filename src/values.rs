//! Value projections: the three parallel numeric views of every slot
//! configuration, formatted for display.
//!
//! Empty slots are skipped entirely — absent from the result maps, and
//! callers tolerate the holes. Per-vehicle lookups for an id missing from
//! the source aggregate surface a loud [`CardForgeError::MissingVehicle`];
//! that is an upstream consistency bug, never defaulted away.

use std::collections::BTreeMap;

use crate::config::StatsViewSettings;
use crate::error::{CardForgeError, CfResult};
use crate::format::{self, ValueClass};
use crate::stats::{PlayerStats, SessionStats, StatBlock, StatKey, VehicleSession};

/// A display string plus its semantic color classification.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedValue {
    pub text: String,
    pub class: ValueClass,
}

/// Slot-id keyed formatted values for one block row.
pub type SlotValues = BTreeMap<u8, FormattedValue>;

fn project_absolute(block: &StatBlock, slots: impl Iterator<Item = (u8, StatKey)>) -> SlotValues {
    slots
        .map(|(id, key)| {
            (
                id,
                FormattedValue {
                    text: format::absolute(key, block.get(key)),
                    class: ValueClass::Neutral,
                },
            )
        })
        .collect()
}

fn project_delta(block: &StatBlock, slots: impl Iterator<Item = (u8, StatKey)>) -> SlotValues {
    slots
        .map(|(id, key)| {
            let raw = block.get(key);
            (
                id,
                FormattedValue {
                    text: format::delta(key, raw),
                    class: format::classify_delta(raw, key.lower_is_better()),
                },
            )
        })
        .collect()
}

fn find_vehicle<'a>(vehicles: &'a [VehicleSession], id: &str) -> CfResult<&'a VehicleSession> {
    vehicles
        .iter()
        .find(|v| v.id == id)
        .ok_or_else(|| CardForgeError::MissingVehicle(id.to_string()))
}

/// Absolute (lifetime) values.
pub struct Values<'a> {
    pub main: SlotValues,
    pub rating: SlotValues,
    view: &'a StatsViewSettings,
    vehicles: &'a [VehicleSession],
}

impl<'a> Values<'a> {
    pub fn new(
        player: &'a PlayerStats,
        session: &'a SessionStats,
        view: &'a StatsViewSettings,
    ) -> Self {
        let main = project_absolute(&player.all, view.common_slots.configured());

        let mut rating = SlotValues::new();
        for (id, key) in view.rating_slots.configured() {
            let value = if key == StatKey::Rating {
                rating_value(&player.rating.stats, player.rating.calibration_battles_left)
            } else {
                FormattedValue {
                    text: format::absolute(key, player.rating.stats.get(key)),
                    class: ValueClass::Neutral,
                }
            };
            rating.insert(id, value);
        }

        Values {
            main,
            rating,
            view,
            vehicles: &session.vehicles,
        }
    }

    /// Lifetime values of one vehicle.
    pub fn vehicle(&self, id: &str) -> CfResult<SlotValues> {
        let v = find_vehicle(self.vehicles, id)?;
        Ok(project_absolute(&v.all, self.view.common_slots.configured()))
    }
}

/// The `rating` slot shows calibration progress while calibration battles
/// remain, and classifies as a league tier otherwise.
fn rating_value(stats: &StatBlock, calibration_battles_left: u32) -> FormattedValue {
    let league = format::classify_league(stats.rating, calibration_battles_left);
    let text = if calibration_battles_left > 0 {
        format!("{} / 10", 10u32.saturating_sub(calibration_battles_left))
    } else {
        format::adaptive(stats.rating)
    };
    FormattedValue {
        text,
        class: ValueClass::League(league),
    }
}

/// Session-accumulated values.
pub struct SessionValues<'a> {
    pub main: SlotValues,
    pub rating: SlotValues,
    view: &'a StatsViewSettings,
    vehicles: &'a [VehicleSession],
}

impl<'a> SessionValues<'a> {
    pub fn new(session: &'a SessionStats, view: &'a StatsViewSettings) -> Self {
        SessionValues {
            main: project_absolute(&session.main_session, view.common_slots.configured()),
            rating: project_absolute(&session.rating_session, view.rating_slots.configured()),
            view,
            vehicles: &session.vehicles,
        }
    }

    pub fn vehicle(&self, id: &str) -> CfResult<SlotValues> {
        let v = find_vehicle(self.vehicles, id)?;
        Ok(project_absolute(
            &v.session,
            self.view.common_slots.configured(),
        ))
    }
}

/// Period-delta values, sign-prefixed and classified by direction.
pub struct DiffValues<'a> {
    pub main: SlotValues,
    pub rating: SlotValues,
    view: &'a StatsViewSettings,
    vehicles: &'a [VehicleSession],
}

impl<'a> DiffValues<'a> {
    pub fn new(session: &'a SessionStats, view: &'a StatsViewSettings) -> Self {
        DiffValues {
            main: project_delta(&session.main_diff, view.common_slots.configured()),
            rating: project_delta(&session.rating_diff, view.rating_slots.configured()),
            view,
            vehicles: &session.vehicles,
        }
    }

    pub fn vehicle(&self, id: &str) -> CfResult<SlotValues> {
        let v = find_vehicle(self.vehicles, id)?;
        Ok(project_delta(&v.delta, self.view.common_slots.configured()))
    }
}
