use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::color::{palette, Rgba};
use crate::error::{CardForgeError, CfResult};
use crate::stats::StatKey;

/// One slot position: either bound to a stat or the explicit empty sentinel.
///
/// Serializes as the bare stat key string, with `"empty"` for the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SlotEntry {
    Empty,
    Stat(StatKey),
}

impl TryFrom<String> for SlotEntry {
    type Error = CardForgeError;

    fn try_from(s: String) -> CfResult<Self> {
        if s == "empty" {
            return Ok(SlotEntry::Empty);
        }
        s.parse::<StatKey>()
            .map(SlotEntry::Stat)
            .map_err(|_| CardForgeError::Config(format!("unknown stat key '{s}' in slot config")))
    }
}

impl From<SlotEntry> for String {
    fn from(e: SlotEntry) -> String {
        match e {
            SlotEntry::Empty => "empty".to_string(),
            SlotEntry::Stat(key) => key.to_string(),
        }
    }
}

/// Ordered slot configuration for one block row.
///
/// Slot ids are contiguous from 1 by construction: id `i + 1` is position
/// `i` in the backing vector. Iteration order determines left-to-right
/// placement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotConfig {
    entries: Vec<SlotEntry>,
}

impl SlotConfig {
    pub fn new(entries: Vec<SlotEntry>) -> CfResult<Self> {
        if entries.is_empty() {
            return Err(CardForgeError::Config(
                "slot config must bind at least one slot".to_string(),
            ));
        }
        Ok(SlotConfig { entries })
    }

    pub fn of_stats(keys: &[StatKey]) -> Self {
        SlotConfig {
            entries: keys.iter().copied().map(SlotEntry::Stat).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All slots in order, as `(slot_id, entry)` with ids starting at 1.
    pub fn slots(&self) -> impl Iterator<Item = (u8, SlotEntry)> + '_ {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, &e)| (i as u8 + 1, e))
    }

    /// Only the slots bound to a stat, skipping the empty sentinel.
    pub fn configured(&self) -> impl Iterator<Item = (u8, StatKey)> + '_ {
        self.slots().filter_map(|(id, e)| match e {
            SlotEntry::Stat(key) => Some((id, key)),
            SlotEntry::Empty => None,
        })
    }

    /// Length of the longest stat-key name bound anywhere in this config.
    /// Drives the adaptive-width rule.
    pub fn longest_key_len(&self) -> usize {
        self.configured()
            .map(|(_, key)| key.to_string().len())
            .max()
            .unwrap_or(0)
    }
}

/// The two independent slot configurations: common-stat rows and
/// rating-stat rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsViewSettings {
    pub common_slots: SlotConfig,
    pub rating_slots: SlotConfig,
}

impl Default for StatsViewSettings {
    fn default() -> Self {
        StatsViewSettings {
            common_slots: SlotConfig::of_stats(&[
                StatKey::Battles,
                StatKey::Winrate,
                StatKey::Accuracy,
                StatKey::Damage,
            ]),
            rating_slots: SlotConfig::of_stats(&[
                StatKey::Battles,
                StatKey::Winrate,
                StatKey::Rating,
                StatKey::Damage,
            ]),
        }
    }
}

/// Full-image rendering toggles and colors. Absent fields take documented
/// defaults; an absent settings object entirely is the default object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub disable_rating_stats: bool,
    pub disable_stats_blocks: bool,
    pub disable_flag: bool,
    pub hide_nickname: bool,
    pub hide_clan_tag: bool,
    pub colorize_stats: bool,
    /// Gaussian blur radius applied to the stenciled background.
    pub glass_effect: f32,
    /// Brightness factor for the stenciled background, 0 disables.
    pub stats_blocks_transparency: f32,
    pub nickname_color: Rgba,
    pub clan_tag_color: Rgba,
    pub stats_color: Rgba,
    pub stats_text_color: Rgba,
    pub main_text_color: Rgba,
    pub positive_stats_color: Rgba,
    pub negative_stats_color: Rgba,
}

impl Default for ImageSettings {
    fn default() -> Self {
        ImageSettings {
            disable_rating_stats: false,
            disable_stats_blocks: false,
            disable_flag: false,
            hide_nickname: false,
            hide_clan_tag: false,
            colorize_stats: true,
            glass_effect: 5.0,
            stats_blocks_transparency: 0.5,
            nickname_color: palette::WHITE,
            clan_tag_color: palette::LIGHT_GREY,
            stats_color: palette::WHITE,
            stats_text_color: palette::LIGHT_GREY,
            main_text_color: palette::WHITE,
            positive_stats_color: palette::GREEN,
            negative_stats_color: palette::RED,
        }
    }
}

/// Widget-mode profile: its own capacity ceilings plus the compact-surface
/// toggles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    pub max_stats_blocks: u32,
    pub max_stats_small_blocks: u32,
    pub disable_main_stats_block: bool,
    pub disable_nickname: bool,
    pub adaptive_width: bool,
    pub disable_bg: bool,
    pub use_bg_for_stats_blocks: bool,
    /// 0.0 = opaque stat blocks, 1.0 = fully transparent.
    pub background_transparency: f32,
    pub stats_block_color: Rgba,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        WidgetSettings {
            max_stats_blocks: 1,
            max_stats_small_blocks: 0,
            disable_main_stats_block: false,
            disable_nickname: false,
            adaptive_width: false,
            disable_bg: false,
            use_bg_for_stats_blocks: false,
            background_transparency: 0.5,
            stats_block_color: Rgba::opaque(240, 240, 240),
        }
    }
}

pub fn load_json<T: serde::de::DeserializeOwned, P: AsRef<Path>>(path: P) -> CfResult<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
