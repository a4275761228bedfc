//! Core types shared across the war engine

use std::fmt;
use std::ops::Not;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One of the two opposing sides of the war
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Knights,
    Vikings,
}

impl Not for Team {
    type Output = Team;

    /// The opposing team
    fn not(self) -> Team {
        match self {
            Team::Knights => Team::Vikings,
            Team::Vikings => Team::Knights,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Team::Knights => write!(f, "Knight"),
            Team::Vikings => write!(f, "Viking"),
        }
    }
}

/// The kind of war action a player can take
///
/// `Placeholder` is synthetic: it stands in for the in-flight action during
/// activity averaging and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    NormalAttack,
    HeavyAttack,
    Defend,
    Bribe,
    Placeholder,
}

impl ActionKind {
    /// Whether this kind counts toward a player's activity average
    pub fn counts_for_activity(self) -> bool {
        matches!(
            self,
            ActionKind::Defend
                | ActionKind::NormalAttack
                | ActionKind::HeavyAttack
                | ActionKind::Placeholder
        )
    }
}

/// The result of an action after consulting storage and rolling dice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Regular,
    Critical,
    Missed,
}

impl Default for Outcome {
    fn default() -> Self {
        Outcome::Regular
    }
}

/// Discrete activity bracket derived from average daily actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tier(u8);

impl Tier {
    pub const T1: Tier = Tier(1);
    pub const T2: Tier = Tier(2);
    pub const T3: Tier = Tier(3);

    /// Construct a tier, returning `None` outside 1..=3
    pub fn new(level: u8) -> Option<Tier> {
        (1..=3).contains(&level).then_some(Tier(level))
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        UserId(id)
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single persisted war action
///
/// Written exactly once per command invocation and immutable afterwards.
/// `was_critical` and `raw_damage` stay `None` for kinds where they do not
/// apply (Defend, Bribe) and for attacks that missed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub user_id: UserId,
    pub team: Team,
    pub kind: ActionKind,
    pub timestamp: DateTime<Utc>,
    pub was_successful: bool,
    pub was_critical: Option<bool>,
    pub raw_damage: Option<f64>,
    pub items_dropped: String,
}

impl ActionRecord {
    /// Synthetic record standing in for the action currently being resolved
    pub fn placeholder(user_id: UserId, team: Team, timestamp: DateTime<Utc>) -> Self {
        ActionRecord {
            user_id,
            team,
            kind: ActionKind::Placeholder,
            timestamp,
            was_successful: true,
            was_critical: None,
            raw_damage: None,
            items_dropped: String::new(),
        }
    }
}

/// A player's defensive standing, supplied by the user-profile collaborator
///
/// `defend_level` is a 1-based key into the configured multiplier table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefendProfile {
    pub user_id: UserId,
    pub defend_level: u32,
}

/// The resolved invoking user
///
/// Identity and team membership are validated by an external collaborator
/// before the engine is invoked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub team: Team,
    pub name: String,
    pub display_name: String,
}
