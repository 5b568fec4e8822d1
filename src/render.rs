//! Render pipeline orchestration.
//!
//! The pipeline owns the stage ordering and every per-call mutable state
//! (offset cursor, resolved layout, projections, surface); all of it lives
//! in a stack-local [`RenderContext`] created fresh per call, so concurrent
//! renders share nothing. Actual rasterization is delegated through the
//! [`DrawBackend`] trait — fonts, icons and pixel work live behind it.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use tracing::debug;

use crate::color::{palette, Rgba};
use crate::config::{ImageSettings, SlotConfig, StatsViewSettings, WidgetSettings};
use crate::error::{CardForgeError, CfResult};
use crate::format::{classify_league, League, ValueClass};
use crate::layout::coords::{CoordinateTable, RelativeCoordinates};
use crate::layout::{
    block_size, offsets, BackgroundMap, LayoutDefiner, LayoutInput, ResolvedLayout,
};
use crate::stats::{PlayerStats, SessionStats, StatKey, VehicleKind, VehicleSession};
use crate::values::{DiffValues, SessionValues, SlotValues, Values};

pub type Point = (i32, i32);

/// Font roles the core refers to; the backend maps them to real faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontRole {
    /// Block titles.
    Title,
    /// Vehicle block titles (kind, name, tier).
    VehicleTitle,
    /// Slot labels under the value rows.
    Label,
    /// Absolute value row.
    Value,
    /// Session value row.
    Session,
    /// Period-delta row.
    Delta,
    /// Header nickname and clan tag.
    Nickname,
    /// Debug overlay text.
    Debug,
}

/// Horizontal/vertical anchoring of a text draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextAnchor {
    Center,
    TopCenter,
    TopLeft,
}

/// One text draw, fully resolved by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextSpec {
    pub pos: Point,
    pub text: String,
    pub font: FontRole,
    pub color: Rgba,
    pub anchor: TextAnchor,
}

/// Icon identifiers; the backend owns the actual assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconKey {
    Stat(StatKey),
    League(League),
    RegionFlag(String),
}

/// The rasterization boundary. Implementations hold the static, read-only
/// asset caches (fonts, icons, default background) and may be shared across
/// concurrent renders.
pub trait DrawBackend {
    type Surface;

    /// Canvas-sized surface holding the (cropped) background image.
    fn create_surface(&self, width: u32, height: u32, widget_mode: bool) -> Self::Surface;

    fn measure_text(&self, text: &str, font: FontRole) -> u32;

    fn icon_size(&self, icon: &IconKey) -> (u32, u32);

    /// Composites the background through the stencil, applying blur,
    /// brightness and transparency per the settings.
    fn composite_background(
        &self,
        surface: &mut Self::Surface,
        stencil: &BackgroundMap,
        image: &ImageSettings,
        widget: &WidgetSettings,
        widget_mode: bool,
    );

    fn draw_text(&self, surface: &mut Self::Surface, spec: &TextSpec);

    fn draw_icon(&self, surface: &mut Self::Surface, pos: Point, icon: &IconKey);

    fn draw_watermark(&self, surface: &mut Self::Surface);

    fn encode_png(&self, surface: &Self::Surface) -> CfResult<Vec<u8>>;
}

/// Label lookup hook. The default implementation surfaces stat-key display
/// names; hosts with a locale store override it.
pub trait Localizer {
    fn stat_label(&self, key: StatKey) -> String {
        key.to_string()
    }

    fn main_title(&self) -> String {
        "Main".to_string()
    }

    fn rating_title(&self) -> String {
        "Rating".to_string()
    }

    fn league_label(&self, league: League) -> String {
        match league {
            League::Calibration => "Calibration".to_string(),
            League::NoLeague => "No league".to_string(),
            League::Gold => "Gold".to_string(),
            League::Platinum => "Platinum".to_string(),
            League::Brilliant => "Brilliant".to_string(),
        }
    }

    fn no_rating_label(&self) -> String {
        "No rating".to_string()
    }

    fn vehicle_kind_label(&self, kind: VehicleKind) -> String {
        match kind {
            VehicleKind::Heavy => "HT".to_string(),
            VehicleKind::Medium => "MT".to_string(),
            VehicleKind::Light => "LT".to_string(),
            VehicleKind::TankDestroyer => "TD".to_string(),
        }
    }
}

/// Stat-key display names, no locale store.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLocalizer;

impl Localizer for DefaultLocalizer {}

/// Requested output representation of the finished render.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Bytes,
    Surface,
    Base64,
}

impl OutputKind {
    /// Parses a textual output request. An unrecognized representation is
    /// the one user-facing contract violation that must surface.
    pub fn parse_request(s: &str) -> CfResult<Self> {
        s.parse()
            .map_err(|_| CardForgeError::InvalidOutput(s.to_string()))
    }
}

/// The finished render in the requested representation.
pub enum RenderOutput<S> {
    Bytes(Vec<u8>),
    Surface(S),
    Base64(String),
}

/// Immutable inputs to one render call.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub player: &'a PlayerStats,
    pub session: &'a SessionStats,
    pub image: &'a ImageSettings,
    pub widget: &'a WidgetSettings,
    pub view: &'a StatsViewSettings,
    pub widget_mode: bool,
    pub debug_overlay: bool,
}

/// Per-call render state. Created inside [`render`] and dropped at return;
/// never shared.
struct RenderContext<'a, B: DrawBackend> {
    backend: &'a B,
    loc: &'a dyn Localizer,
    req: RenderRequest<'a>,
    layout: ResolvedLayout,
    coords: RelativeCoordinates,
    values: Values<'a>,
    session_values: SessionValues<'a>,
    diff_values: DiffValues<'a>,
    surface: B::Surface,
    offset: i32,
}

/// Runs the full pipeline:
/// resolve -> pack -> geometry -> background -> header -> blocks ->
/// watermark -> [debug overlay] -> encode.
pub fn render<B: DrawBackend>(
    backend: &B,
    loc: &dyn Localizer,
    req: RenderRequest<'_>,
    output: OutputKind,
) -> CfResult<RenderOutput<B::Surface>> {
    let layout = LayoutDefiner::new(LayoutInput {
        player: req.player,
        session: req.session,
        image: req.image,
        widget: req.widget,
        view: req.view,
        widget_mode: req.widget_mode,
    })
    .resolve(|text, font| backend.measure_text(text, font));

    let geometry = layout.geometry;
    let mut surface = backend.create_surface(geometry.width, geometry.height, req.widget_mode);
    backend.composite_background(
        &mut surface,
        &layout.background,
        req.image,
        req.widget,
        req.widget_mode,
    );

    let mut ctx = RenderContext {
        backend,
        loc,
        req,
        coords: RelativeCoordinates::new(geometry.width, req.view),
        values: Values::new(req.player, req.session, req.view),
        session_values: SessionValues::new(req.session, req.view),
        diff_values: DiffValues::new(req.session, req.view),
        layout,
        surface,
        offset: offsets::FIRST as i32,
    };

    ctx.draw_header();
    ctx.draw_blocks()?;
    ctx.backend.draw_watermark(&mut ctx.surface);
    if req.debug_overlay {
        ctx.draw_debug_overlay();
    }

    debug!(output = %output, "render complete");

    match output {
        OutputKind::Bytes => Ok(RenderOutput::Bytes(backend.encode_png(&ctx.surface)?)),
        OutputKind::Base64 => {
            let png = backend.encode_png(&ctx.surface)?;
            Ok(RenderOutput::Base64(BASE64_STANDARD.encode(png)))
        }
        OutputKind::Surface => Ok(RenderOutput::Surface(ctx.surface)),
    }
}

impl<'a, B: DrawBackend> RenderContext<'a, B> {
    fn draw_header(&mut self) {
        let req = &self.req;
        if req.widget_mode && req.widget.disable_nickname {
            return;
        }

        self.backend
            .draw_text(&mut self.surface, &self.layout.header.nickname);
        if let Some(tag) = self.layout.header.clan_tag.clone() {
            self.backend.draw_text(&mut self.surface, &tag);
        }

        if !req.image.disable_flag {
            if let Some(region) = &req.player.region {
                self.backend.draw_icon(
                    &mut self.surface,
                    (10, 10),
                    &IconKey::RegionFlag(region.clone()),
                );
            }
        }
    }

    /// Draws every resolved block. Vehicles come from one forward position
    /// into the ordered vehicle list; the full-block and short-block loops
    /// each take an explicit slice of it. Exhaustion leaves the remaining
    /// slots undrawn.
    fn draw_blocks(&mut self) -> CfResult<()> {
        let counts = self.layout.counts;
        let main_suppressed = self.req.widget_mode && self.req.widget.disable_main_stats_block;

        let mut full_left = counts.full;

        if !main_suppressed && full_left > 0 {
            self.draw_main_block();
            self.offset += (block_size::MAIN + offsets::GAP) as i32;
            full_left -= 1;
        }

        if self.layout.include_rating && full_left > 0 {
            self.draw_rating_block();
            self.offset += (block_size::RATING + offsets::GAP) as i32;
            full_left -= 1;
        }

        // Copy the session reference out so the vehicle slices do not pin
        // a borrow of `self` across the mutable draw calls.
        let session: &SessionStats = self.req.session;
        let vehicles = &session.vehicles;
        let full_take = (full_left as usize).min(vehicles.len());
        let short_take = (counts.short as usize).min(vehicles.len() - full_take);

        let full_slice = &vehicles[..full_take];
        let short_slice = &vehicles[full_take..full_take + short_take];

        for vehicle in full_slice {
            self.draw_vehicle_block(vehicle)?;
            self.offset += (block_size::FULL_VEHICLE + offsets::GAP) as i32;
        }
        for vehicle in short_slice {
            self.draw_short_vehicle_block(vehicle)?;
            self.offset += (block_size::SHORT_VEHICLE + offsets::GAP) as i32;
        }
        Ok(())
    }

    fn draw_main_block(&mut self) {
        self.draw_block_title(self.loc.main_title(), FontRole::Title);
        self.draw_stat_icons(false);
        self.draw_labels(self.coords.main_labels(self.offset), false);
        Self::draw_value_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.main_values(self.offset),
            &self.values.main,
        );
        Self::draw_session_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.main_session(self.offset),
            &self.session_values.main,
        );
        Self::draw_delta_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.main_diff(self.offset),
            &self.diff_values.main,
        );
    }

    fn draw_rating_block(&mut self) {
        self.draw_block_title(self.loc.rating_title(), FontRole::Title);
        self.draw_stat_icons(true);
        self.draw_labels(self.coords.rating_labels(self.offset), true);
        Self::draw_value_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.rating_values(self.offset),
            &self.values.rating,
        );
        Self::draw_session_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.rating_session(self.offset),
            &self.session_values.rating,
        );
        Self::draw_delta_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.rating_diff(self.offset),
            &self.diff_values.rating,
        );
    }

    fn draw_vehicle_block(&mut self, vehicle: &VehicleSession) -> CfResult<()> {
        self.draw_block_title(self.vehicle_title(vehicle), FontRole::VehicleTitle);
        self.draw_stat_icons(false);
        self.draw_labels(self.coords.vehicle_labels(self.offset), false);
        Self::draw_value_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.vehicle_values(self.offset),
            &self.values.vehicle(&vehicle.id)?,
        );
        Self::draw_session_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.vehicle_session(self.offset),
            &self.session_values.vehicle(&vehicle.id)?,
        );
        Self::draw_delta_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.vehicle_diff(self.offset),
            &self.diff_values.vehicle(&vehicle.id)?,
        );
        Ok(())
    }

    /// Short blocks omit the period-delta row.
    fn draw_short_vehicle_block(&mut self, vehicle: &VehicleSession) -> CfResult<()> {
        self.draw_block_title(self.vehicle_title(vehicle), FontRole::VehicleTitle);
        self.draw_stat_icons(false);
        self.draw_labels(self.coords.short_vehicle_labels(self.offset), false);
        Self::draw_value_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.short_vehicle_values(self.offset),
            &self.values.vehicle(&vehicle.id)?,
        );
        Self::draw_session_row(
            self.backend,
            &mut self.surface,
            self.req.image,
            self.coords.short_vehicle_session(self.offset),
            &self.session_values.vehicle(&vehicle.id)?,
        );
        Ok(())
    }

    fn vehicle_title(&self, vehicle: &VehicleSession) -> String {
        format!(
            "{} • {} • {}",
            self.loc.vehicle_kind_label(vehicle.kind),
            vehicle.name,
            roman_tier(vehicle.tier)
        )
    }

    fn draw_block_title(&mut self, text: String, font: FontRole) {
        self.backend.draw_text(
            &mut self.surface,
            &TextSpec {
                pos: self.coords.block_label(self.offset),
                text,
                font,
                color: self.req.image.main_text_color,
                anchor: TextAnchor::Center,
            },
        );
    }

    fn slot_config(&self, rating: bool) -> &SlotConfig {
        if rating {
            &self.req.view.rating_slots
        } else {
            &self.req.view.common_slots
        }
    }

    fn draw_stat_icons(&mut self, rating: bool) {
        let slots: Vec<(u8, StatKey)> = self.slot_config(rating).configured().collect();
        for (slot, key) in slots {
            let icon = if rating && key == StatKey::Rating {
                IconKey::League(classify_league(
                    self.req.player.rating.rating(),
                    self.req.player.rating.calibration_battles_left,
                ))
            } else {
                IconKey::Stat(key)
            };
            let size = self.backend.icon_size(&icon);
            let table = if rating {
                self.coords.rating_icons(self.offset, size)
            } else {
                self.coords.main_icons(self.offset, size)
            };
            if let Some(&pos) = table.get(&slot) {
                self.backend.draw_icon(&mut self.surface, pos, &icon);
            }
        }
    }

    fn draw_labels(&mut self, table: CoordinateTable, rating: bool) {
        let slots: Vec<(u8, StatKey)> = self.slot_config(rating).configured().collect();
        for (slot, key) in slots {
            let text = if rating && key == StatKey::Rating {
                self.rating_slot_label()
            } else {
                self.loc.stat_label(key)
            };
            if let Some(&pos) = table.get(&slot) {
                self.backend.draw_text(
                    &mut self.surface,
                    &TextSpec {
                        pos,
                        text,
                        font: FontRole::Label,
                        color: self.req.image.stats_text_color,
                        anchor: TextAnchor::TopCenter,
                    },
                );
            }
        }
    }

    /// League name under the `rating` slot instead of the stat-key label.
    fn rating_slot_label(&self) -> String {
        let rating = &self.req.player.rating;
        if rating.calibration_battles_left >= 10 {
            self.loc.no_rating_label()
        } else {
            let league = classify_league(rating.rating(), rating.calibration_battles_left);
            self.loc.league_label(league)
        }
    }

    // The row helpers borrow the backend, surface and settings directly so
    // the row maps can be passed by reference out of the projections.
    fn draw_value_row(
        backend: &B,
        surface: &mut B::Surface,
        image: &ImageSettings,
        table: CoordinateTable,
        values: &SlotValues,
    ) {
        for (slot, value) in values {
            if let Some(&pos) = table.get(slot) {
                backend.draw_text(
                    surface,
                    &TextSpec {
                        pos,
                        text: value.text.clone(),
                        font: FontRole::Value,
                        color: value_fill(value.class, image),
                        anchor: TextAnchor::TopCenter,
                    },
                );
            }
        }
    }

    fn draw_session_row(
        backend: &B,
        surface: &mut B::Surface,
        image: &ImageSettings,
        table: CoordinateTable,
        values: &SlotValues,
    ) {
        for (slot, value) in values {
            if let Some(&pos) = table.get(slot) {
                backend.draw_text(
                    surface,
                    &TextSpec {
                        pos,
                        text: value.text.clone(),
                        font: FontRole::Session,
                        color: session_fill(value.class, image),
                        anchor: TextAnchor::TopCenter,
                    },
                );
            }
        }
    }

    fn draw_delta_row(
        backend: &B,
        surface: &mut B::Surface,
        image: &ImageSettings,
        table: CoordinateTable,
        values: &SlotValues,
    ) {
        for (slot, value) in values {
            if let Some(&pos) = table.get(slot) {
                backend.draw_text(
                    surface,
                    &TextSpec {
                        pos,
                        text: value.text.clone(),
                        font: FontRole::Delta,
                        color: value
                            .class
                            .color(image.positive_stats_color, image.negative_stats_color),
                        anchor: TextAnchor::TopCenter,
                    },
                );
            }
        }
    }

    fn draw_debug_overlay(&mut self) {
        let geometry = self.layout.geometry;
        let summary = format!(
            "DEBUG\nsize: {}x{}\nvehicles: {}\nblocks: {} full / {} short\ncommon slots: {}\nrating slots: {}",
            geometry.width,
            geometry.height,
            self.req.session.vehicles.len(),
            self.layout.counts.full,
            self.layout.counts.short,
            self.req.view.common_slots.len(),
            self.req.view.rating_slots.len(),
        );
        self.backend.draw_text(
            &mut self.surface,
            &TextSpec {
                pos: (20, geometry.height as i32 - 240),
                text: summary,
                font: FontRole::Debug,
                color: palette::WHITE,
                anchor: TextAnchor::TopLeft,
            },
        );
    }
}

fn value_fill(class: ValueClass, image: &ImageSettings) -> Rgba {
    if !image.colorize_stats {
        return image.stats_color;
    }
    match class {
        ValueClass::League(league) => league.color(),
        _ => image.stats_color,
    }
}

fn session_fill(class: ValueClass, image: &ImageSettings) -> Rgba {
    if !image.colorize_stats {
        return image.stats_color;
    }
    match class {
        ValueClass::League(league) => league.color(),
        _ => palette::LIGHT_GREY,
    }
}

fn roman_tier(tier: u8) -> &'static str {
    match tier {
        1 => "I",
        2 => "II",
        3 => "III",
        4 => "IV",
        5 => "V",
        6 => "VI",
        7 => "VII",
        8 => "VIII",
        9 => "IX",
        10 => "X",
        _ => "?",
    }
}
