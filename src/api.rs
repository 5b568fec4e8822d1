//! Backend-free service layer for embedding hosts (widget frontends, the
//! CLI). Computes layouts and coordinate tables as plain serializable data,
//! substituting a deterministic per-glyph width estimate for the backend's
//! text measurement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::{ImageSettings, StatsViewSettings, WidgetSettings};
use crate::error::CfResult;
use crate::layout::coords::RelativeCoordinates;
use crate::layout::{LayoutDefiner, LayoutInput, ResolvedLayout};
use crate::render::{FontRole, Point};
use crate::stats::{PlayerStats, SessionStats};

/// Average glyph advance per font role, in pixels. Close enough for header
/// pill sizing when no rasterizer is attached.
fn estimate_text_width(text: &str, font: FontRole) -> u32 {
    let advance = match font {
        FontRole::Nickname | FontRole::Value => 17,
        FontRole::Session | FontRole::VehicleTitle => 15,
        FontRole::Title | FontRole::Label => 11,
        FontRole::Delta | FontRole::Debug => 10,
    };
    text.chars().count() as u32 * advance
}

/// Coordinate rows of one block kind at offset zero, slot id -> point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoordinateRows {
    pub labels: BTreeMap<u8, Point>,
    pub values: BTreeMap<u8, Point>,
    pub session: BTreeMap<u8, Point>,
    /// Absent for short vehicle blocks, which have no period-delta row.
    pub diff: Option<BTreeMap<u8, Point>>,
}

/// Serializable result of one layout computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutResult {
    pub layout: ResolvedLayout,
    pub main_rows: CoordinateRows,
    pub rating_rows: CoordinateRows,
    pub vehicle_rows: CoordinateRows,
    pub short_vehicle_rows: CoordinateRows,
}

/// Resolves the full layout without a draw backend.
pub fn compute_layout(
    player: &PlayerStats,
    session: &SessionStats,
    image: &ImageSettings,
    widget: &WidgetSettings,
    view: &StatsViewSettings,
    widget_mode: bool,
) -> LayoutResult {
    let layout = LayoutDefiner::new(LayoutInput {
        player,
        session,
        image,
        widget,
        view,
        widget_mode,
    })
    .resolve(estimate_text_width);

    let coords = RelativeCoordinates::new(layout.geometry.width, view);

    let main_rows = CoordinateRows {
        labels: coords.main_labels(0),
        values: coords.main_values(0),
        session: coords.main_session(0),
        diff: Some(coords.main_diff(0)),
    };
    let rating_rows = CoordinateRows {
        labels: coords.rating_labels(0),
        values: coords.rating_values(0),
        session: coords.rating_session(0),
        diff: Some(coords.rating_diff(0)),
    };
    let vehicle_rows = CoordinateRows {
        labels: coords.vehicle_labels(0),
        values: coords.vehicle_values(0),
        session: coords.vehicle_session(0),
        diff: Some(coords.vehicle_diff(0)),
    };
    let short_vehicle_rows = CoordinateRows {
        labels: coords.short_vehicle_labels(0),
        values: coords.short_vehicle_values(0),
        session: coords.short_vehicle_session(0),
        diff: None,
    };

    LayoutResult {
        layout,
        main_rows,
        rating_rows,
        vehicle_rows,
        short_vehicle_rows,
    }
}

/// Summary of a validated view configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewSummary {
    pub common_slots: usize,
    pub rating_slots: usize,
    pub longest_key_len: usize,
}

/// Validates a stats-view configuration. Construction and deserialization
/// already reject malformed configs; this reports what a host usually wants
/// to display back.
pub fn validate_view_settings(view: &StatsViewSettings) -> CfResult<ViewSummary> {
    Ok(ViewSummary {
        common_slots: view.common_slots.len(),
        rating_slots: view.rating_slots.len(),
        longest_key_len: view
            .common_slots
            .longest_key_len()
            .max(view.rating_slots.longest_key_len()),
    })
}
