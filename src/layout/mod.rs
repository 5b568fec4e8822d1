pub mod coords;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{palette, Rgba};
use crate::config::{ImageSettings, StatsViewSettings, WidgetSettings};
use crate::render::{FontRole, TextAnchor, TextSpec};
use crate::stats::{PlayerStats, SessionStats};

/// Fixed per-block pixel heights.
pub mod block_size {
    pub const MAIN: u32 = 240;
    pub const RATING: u32 = 240;
    pub const FULL_VEHICLE: u32 = 260;
    pub const SHORT_VEHICLE: u32 = 200;
}

/// Fixed margins between blocks and canvas edges.
pub mod offsets {
    pub const FIRST: u32 = 80;
    pub const GAP: u32 = 20;
    pub const HORIZONTAL: u32 = 50;
}

/// Canvas size ceilings and floors.
pub mod canvas {
    pub const MAX_WIDTH: u32 = 800;
    pub const MIN_WIDTH: u32 = 525;
    pub const MAX_HEIGHT: u32 = 1350;
    pub const MIN_HEIGHT: u32 = 380;
}

/// Default capacity ceilings outside widget mode.
pub const DEFAULT_MAX_FULL: u32 = 3;
pub const DEFAULT_MAX_SHORT: u32 = 2;

/// Resolved number of full-size and short-size block slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCounts {
    pub full: u32,
    pub short: u32,
}

impl BlockCounts {
    pub fn total(&self) -> u32 {
        self.full + self.short
    }
}

/// Greedy first-fit packer: every unit goes into a full slot while capacity
/// remains, then a short slot, then is dropped. Overflow is silent by
/// design; excess data units are omitted from the layout, not queued.
#[derive(Debug, Clone)]
pub struct BlockStack {
    full: u32,
    short: u32,
    max_full: u32,
    max_short: u32,
}

impl Default for BlockStack {
    fn default() -> Self {
        BlockStack {
            full: 0,
            short: 0,
            max_full: DEFAULT_MAX_FULL,
            max_short: DEFAULT_MAX_SHORT,
        }
    }
}

impl BlockStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconfigures the ceilings. Called once per render, before packing.
    pub fn set_limits(&mut self, max_full: u32, max_short: u32) {
        self.max_full = max_full;
        self.max_short = max_short;
    }

    pub fn add_unit(&mut self) {
        if self.full < self.max_full {
            self.full += 1;
        } else if self.short < self.max_short {
            self.short += 1;
        }
    }

    pub fn add_units(&mut self, n: u32) {
        for _ in 0..n {
            self.add_unit();
        }
    }

    pub fn counts(&self) -> BlockCounts {
        BlockCounts {
            full: self.full,
            short: self.short,
        }
    }

    pub fn reset(&mut self) {
        self.full = 0;
        self.short = 0;
    }
}

/// Final canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanvasGeometry {
    pub width: u32,
    pub height: u32,
}

/// The four block variants a canvas can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Main,
    Rating,
    FullVehicle,
    ShortVehicle,
}

impl BlockKind {
    pub fn height(self) -> u32 {
        match self {
            BlockKind::Main => block_size::MAIN,
            BlockKind::Rating => block_size::RATING,
            BlockKind::FullVehicle => block_size::FULL_VEHICLE,
            BlockKind::ShortVehicle => block_size::SHORT_VEHICLE,
        }
    }
}

/// One rounded rectangle of the background stencil.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoundedRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
    pub radius: u32,
    pub fill: Rgba,
}

/// Off-screen stencil description: one rounded rectangle per resolved block
/// plus the header pill. A backend rasterizes this to a mask the size of
/// the canvas and uses it when compositing the real background.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundMap {
    pub width: u32,
    pub height: u32,
    pub header_pill: RoundedRect,
    pub blocks: Vec<RoundedRect>,
}

/// Header text placement resolved against measured text widths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeaderLayout {
    pub nickname: TextSpec,
    pub clan_tag: Option<TextSpec>,
}

/// Everything the render pipeline needs from layout resolution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedLayout {
    pub counts: BlockCounts,
    pub include_rating: bool,
    pub geometry: CanvasGeometry,
    /// Kinds of the full-size blocks, top to bottom.
    pub full_kinds: Vec<BlockKind>,
    pub background: BackgroundMap,
    pub header: HeaderLayout,
}

/// Inputs to one layout resolution. Borrowed; nothing here outlives the
/// render call.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub player: &'a PlayerStats,
    pub session: &'a SessionStats,
    pub image: &'a ImageSettings,
    pub widget: &'a WidgetSettings,
    pub view: &'a StatsViewSettings,
    pub widget_mode: bool,
}

/// Orchestrates block-count resolution, canvas-size derivation and
/// background geometry. All steps are total functions of the input; absent
/// configuration was already defaulted at deserialization.
pub struct LayoutDefiner<'a> {
    input: LayoutInput<'a>,
    stack: BlockStack,
}

impl<'a> LayoutDefiner<'a> {
    pub fn new(input: LayoutInput<'a>) -> Self {
        LayoutDefiner {
            input,
            stack: BlockStack::new(),
        }
    }

    /// Runs every resolution step in order. `measure` is the text-width
    /// oracle of the rasterization layer (font metrics live there, not here).
    pub fn resolve(mut self, measure: impl Fn(&str, FontRole) -> u32) -> ResolvedLayout {
        let (counts, include_rating) = self.resolve_blocks();
        let geometry = self.resolve_geometry(counts);
        let full_kinds = self.full_block_kinds(counts.full, include_rating);
        let (background, header) = self.background_map(counts, geometry, &full_kinds, &measure);

        debug!(
            full = counts.full,
            short = counts.short,
            width = geometry.width,
            height = geometry.height,
            include_rating,
            "layout resolved"
        );

        ResolvedLayout {
            counts,
            include_rating,
            geometry,
            full_kinds,
            background,
            header,
        }
    }

    /// Step 1: feed the packer. Vehicles first, then the main-stats unit
    /// (unless suppressed in widget mode), then the rating unit if the
    /// rating aggregate has recorded battles.
    fn resolve_blocks(&mut self) -> (BlockCounts, bool) {
        let LayoutInput {
            session,
            image,
            widget,
            widget_mode,
            ..
        } = self.input;

        if widget_mode {
            self.stack
                .set_limits(widget.max_stats_blocks, widget.max_stats_small_blocks);
        } else {
            self.stack.set_limits(DEFAULT_MAX_FULL, DEFAULT_MAX_SHORT);
        }

        let vehicle_count = session.vehicles.len() as u32;
        self.stack.add_units(vehicle_count);

        let include_rating =
            !image.disable_rating_stats && session.rating_session.battles > 0.0;

        let main_suppressed = widget_mode && widget.disable_main_stats_block;
        if !main_suppressed {
            self.stack.add_unit();
        }
        // A suppressed main block with no vehicles would leave an empty
        // canvas; force one slot in.
        if main_suppressed && vehicle_count == 0 {
            self.stack.add_unit();
        }

        if include_rating {
            self.stack.add_unit();
        }

        let counts = self.stack.counts();
        debug!(full = counts.full, short = counts.short, "blocks packed");
        (counts, include_rating)
    }

    /// Step 2: canvas size. The absolute ceiling pair maps to the fixed
    /// maximum canvas; everything else derives from block heights and gaps.
    fn resolve_geometry(&self, counts: BlockCounts) -> CanvasGeometry {
        if counts.full == DEFAULT_MAX_FULL && counts.short == DEFAULT_MAX_SHORT {
            return CanvasGeometry {
                width: canvas::MAX_WIDTH,
                height: canvas::MAX_HEIGHT,
            };
        }

        // The height sum uses the full-vehicle size for every full block,
        // matching the observed geometry contract even though main and
        // rating blocks draw shorter.
        let height = offsets::FIRST
            + offsets::GAP * counts.total()
            + block_size::FULL_VEHICLE * counts.full
            + block_size::SHORT_VEHICLE * counts.short;

        let width = if self.input.widget_mode && self.input.widget.adaptive_width {
            let longest = self
                .input
                .view
                .common_slots
                .longest_key_len()
                .max(self.input.view.rating_slots.longest_key_len());
            ((longest as u32) * (canvas::MAX_WIDTH / 4)).max(canvas::MIN_WIDTH)
        } else {
            canvas::MAX_WIDTH
        };

        CanvasGeometry { width, height }
    }

    /// Kind of each full block by position. The first block is main-size
    /// unless widget settings disabled the main block, in which case rating
    /// takes its place when included.
    fn full_block_kinds(&self, full: u32, include_rating: bool) -> Vec<BlockKind> {
        let main_suppressed = self.input.widget_mode && self.input.widget.disable_main_stats_block;
        (0..full)
            .map(|i| {
                if main_suppressed {
                    if i == 0 && include_rating {
                        BlockKind::Rating
                    } else {
                        BlockKind::FullVehicle
                    }
                } else if i == 0 {
                    BlockKind::Main
                } else if i == 1 && include_rating {
                    BlockKind::Rating
                } else {
                    BlockKind::FullVehicle
                }
            })
            .collect()
    }

    /// Step 3: the stencil rectangles plus header text placement.
    fn background_map(
        &self,
        counts: BlockCounts,
        geometry: CanvasGeometry,
        full_kinds: &[BlockKind],
        measure: &impl Fn(&str, FontRole) -> u32,
    ) -> (BackgroundMap, HeaderLayout) {
        let widget = self.input.widget;

        let fill = if self.input.widget_mode {
            let alpha = ((1.0 - widget.background_transparency).abs() * 255.0) as u8;
            widget.stats_block_color.with_alpha(alpha)
        } else {
            palette::WHITE
        };

        let width = geometry.width as i32;
        let (header, text_width) = self.header_layout(width, measure);

        let header_pill = RoundedRect {
            x0: width / 2 - text_width as i32 / 2 - 10,
            y0: 12,
            x1: width / 2 + text_width as i32 / 2 + 10,
            y1: 60,
            radius: 10,
            fill,
        };

        let mut blocks = Vec::with_capacity(counts.total() as usize);
        let mut offset = offsets::FIRST as i32;

        for kind in full_kinds {
            blocks.push(RoundedRect {
                x0: offsets::HORIZONTAL as i32,
                y0: offset,
                x1: width - offsets::HORIZONTAL as i32,
                y1: offset + kind.height() as i32,
                radius: 25,
                fill,
            });
            offset += (kind.height() + offsets::GAP) as i32;
        }

        for _ in 0..counts.short {
            blocks.push(RoundedRect {
                x0: offsets::HORIZONTAL as i32,
                y0: offset,
                x1: width - offsets::HORIZONTAL as i32,
                y1: offset + block_size::SHORT_VEHICLE as i32,
                radius: 25,
                fill,
            });
            offset += (block_size::SHORT_VEHICLE + offsets::GAP) as i32;
        }

        let map = BackgroundMap {
            width: geometry.width,
            height: geometry.height,
            header_pill,
            blocks,
        };
        (map, header)
    }

    /// Nickname and clan-tag placement, honoring the hide toggles.
    /// Returns the header layout and the combined measured text width.
    fn header_layout(
        &self,
        width: i32,
        measure: &impl Fn(&str, FontRole) -> u32,
    ) -> (HeaderLayout, u32) {
        let LayoutInput { player, image, .. } = self.input;

        let nickname = if image.hide_nickname {
            "Player".to_string()
        } else {
            player.nickname.clone()
        };
        let clan_tag = if image.hide_clan_tag {
            None
        } else {
            player.clan_tag.as_deref()
        };

        match clan_tag {
            Some(tag) => {
                let tag_text = format!("[{tag}]");
                let tag_width = measure(&tag_text, FontRole::Nickname) + 10;
                let nick_width = measure(&nickname, FontRole::Nickname);
                let full_width = tag_width + nick_width;

                let header = HeaderLayout {
                    nickname: TextSpec {
                        pos: (width / 2 - tag_width as i32 / 2, 20),
                        text: nickname,
                        font: FontRole::Nickname,
                        color: image.nickname_color,
                        anchor: TextAnchor::TopCenter,
                    },
                    clan_tag: Some(TextSpec {
                        pos: (
                            width / 2 + full_width as i32 / 2 - tag_width as i32 / 2,
                            20,
                        ),
                        text: tag_text,
                        font: FontRole::Nickname,
                        color: image.clan_tag_color,
                        anchor: TextAnchor::TopCenter,
                    }),
                };
                (header, full_width)
            }
            None => {
                let full_width = measure(&nickname, FontRole::Nickname);
                let header = HeaderLayout {
                    nickname: TextSpec {
                        pos: (width / 2, 20),
                        text: nickname,
                        font: FontRole::Nickname,
                        color: image.nickname_color,
                        anchor: TextAnchor::TopCenter,
                    },
                    clan_tag: None,
                };
                (header, full_width)
            }
        }
    }
}
