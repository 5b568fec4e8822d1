use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Closed set of stat identifiers a slot can be bound to.
///
/// Slot configurations deserialize into this enum, so an unknown stat key
/// fails at configuration load instead of at render time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumString, Display, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum StatKey {
    Battles,
    Wins,
    Losses,
    Winrate,
    Accuracy,
    Damage,
    Frags,
    Xp,
    MaxXp,
    Shots,
    Hits,
    SurvivedBattles,
    Rating,
    LeaderboardPosition,
}

impl StatKey {
    /// Percent-typed stats render through the percentage formatter; everything
    /// else renders through the adaptive magnitude formatter.
    pub fn is_percent(self) -> bool {
        matches!(self, StatKey::Winrate | StatKey::Accuracy)
    }

    /// Stats where a smaller value is an improvement, flipping delta colors.
    pub fn lower_is_better(self) -> bool {
        matches!(self, StatKey::LeaderboardPosition)
    }
}

/// One scope's numeric stats, keyed by [`StatKey`] through an exhaustive
/// accessor match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatBlock {
    pub battles: f64,
    pub wins: f64,
    pub losses: f64,
    pub winrate: f64,
    pub accuracy: f64,
    pub damage: f64,
    pub frags: f64,
    pub xp: f64,
    pub max_xp: f64,
    pub shots: f64,
    pub hits: f64,
    pub survived_battles: f64,
    pub rating: f64,
    pub leaderboard_position: f64,
}

impl StatBlock {
    pub fn get(&self, key: StatKey) -> f64 {
        match key {
            StatKey::Battles => self.battles,
            StatKey::Wins => self.wins,
            StatKey::Losses => self.losses,
            StatKey::Winrate => self.winrate,
            StatKey::Accuracy => self.accuracy,
            StatKey::Damage => self.damage,
            StatKey::Frags => self.frags,
            StatKey::Xp => self.xp,
            StatKey::MaxXp => self.max_xp,
            StatKey::Shots => self.shots,
            StatKey::Hits => self.hits,
            StatKey::SurvivedBattles => self.survived_battles,
            StatKey::Rating => self.rating,
            StatKey::LeaderboardPosition => self.leaderboard_position,
        }
    }
}

/// Lifetime rating-mode stats.
///
/// The upstream parsed-replay schema declares `rating` twice with
/// conflicting types; it is a single `f64` here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingStats {
    #[serde(flatten)]
    pub stats: StatBlock,
    pub calibration_battles_left: u32,
}

impl RatingStats {
    pub fn rating(&self) -> f64 {
        self.stats.rating
    }

    pub fn is_calibrating(&self) -> bool {
        self.calibration_battles_left > 0
    }
}

/// Broad vehicle classes, used only for block-label decoration.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumString, Display, Serialize, Deserialize, Default,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleKind {
    Heavy,
    #[default]
    Medium,
    Light,
    TankDestroyer,
}

/// One per-vehicle data unit with its three parallel numeric views.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleSession {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tier: u8,
    #[serde(default)]
    pub kind: VehicleKind,

    /// Lifetime totals.
    pub all: StatBlock,
    /// Values accumulated within the current session.
    pub session: StatBlock,
    /// Period deltas (signed).
    pub delta: StatBlock,
}

/// Session-diff aggregate: main and rating scopes plus the ordered
/// per-vehicle entries.
///
/// Vehicle order is significant: the render pipeline assigns vehicles to
/// full-size blocks first, then short blocks, in exactly this order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionStats {
    pub main_session: StatBlock,
    pub main_diff: StatBlock,
    pub rating_session: StatBlock,
    pub rating_diff: StatBlock,
    pub vehicles: Vec<VehicleSession>,
}

impl SessionStats {
    pub fn vehicle(&self, id: &str) -> Option<&VehicleSession> {
        self.vehicles.iter().find(|v| v.id == id)
    }
}

/// Lifetime player aggregate consumed by the absolute-value projection and
/// the header layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerStats {
    pub nickname: String,
    pub clan_tag: Option<String>,
    pub region: Option<String>,
    pub all: StatBlock,
    pub rating: RatingStats,
}
