//! Per-slot coordinate tables.
//!
//! Built once per render from the final canvas width and the two slot
//! configurations. Every accessor is a pure function of a caller-supplied
//! block vertical offset; the y components are fixed per-role constants, so
//! all blocks of one kind place their rows at identical offsets relative to
//! the block top.

use std::collections::BTreeMap;

use crate::config::StatsViewSettings;
use crate::render::Point;

/// Slot-id keyed coordinate table for one row role.
pub type CoordinateTable = BTreeMap<u8, Point>;

pub struct RelativeCoordinates {
    x_common: Vec<i32>,
    x_rating: Vec<i32>,
    center_x: i32,
}

fn spread(width: u32, slot_count: usize) -> Vec<i32> {
    // x_i = width * i / (slots + 1), evenly dividing the canvas.
    (1..=slot_count)
        .map(|i| (width as i32 / (slot_count as i32 + 1)) * i as i32)
        .collect()
}

impl RelativeCoordinates {
    pub fn new(width: u32, view: &StatsViewSettings) -> Self {
        RelativeCoordinates {
            x_common: spread(width, view.common_slots.len()),
            x_rating: spread(width, view.rating_slots.len()),
            center_x: width as i32 / 2,
        }
    }

    fn row(xs: &[i32], y: i32) -> CoordinateTable {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| (i as u8 + 1, (x, y)))
            .collect()
    }

    fn icon_row(xs: &[i32], y: i32, icon_size: (u32, u32)) -> CoordinateTable {
        xs.iter()
            .enumerate()
            .map(|(i, &x)| (i as u8 + 1, (x - icon_size.0 as i32 / 2, y)))
            .collect()
    }

    /// Centered block title.
    pub fn block_label(&self, offset_y: i32) -> Point {
        (self.center_x, offset_y + 15)
    }

    // --- Main / rating blocks (full height, all four rows) ---

    pub fn main_icons(&self, offset_y: i32, icon_size: (u32, u32)) -> CoordinateTable {
        Self::icon_row(&self.x_common, offset_y + 40, icon_size)
    }

    pub fn main_values(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 97)
    }

    pub fn main_session(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 140)
    }

    pub fn main_diff(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 170)
    }

    pub fn main_labels(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 196)
    }

    pub fn rating_icons(&self, offset_y: i32, icon_size: (u32, u32)) -> CoordinateTable {
        Self::icon_row(&self.x_rating, offset_y + 40, icon_size)
    }

    pub fn rating_values(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_rating, offset_y + 97)
    }

    pub fn rating_session(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_rating, offset_y + 140)
    }

    pub fn rating_diff(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_rating, offset_y + 170)
    }

    pub fn rating_labels(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_rating, offset_y + 196)
    }

    // --- Full vehicle blocks ---

    pub fn vehicle_values(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 105)
    }

    pub fn vehicle_session(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 150)
    }

    pub fn vehicle_diff(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 185)
    }

    pub fn vehicle_labels(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 213)
    }

    // --- Short vehicle blocks (no period-delta row) ---

    pub fn short_vehicle_values(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 90)
    }

    pub fn short_vehicle_session(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 120)
    }

    pub fn short_vehicle_labels(&self, offset_y: i32) -> CoordinateTable {
        Self::row(&self.x_common, offset_y + 150)
    }
}
