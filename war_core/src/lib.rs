//! war_core - Combat-resolution core for a team-based war minigame
//!
//! This library provides:
//! - ContentLibrary: tiered, team-scoped, outcome-scoped narrative selection
//! - Activity averaging: rolling average with forgiveness and shadow-capping
//! - Tier classification: mapping an average to a discrete tier (1-3)
//! - Damage resolution: attack damage against aggregated team defence
//! - CombatEngine: the per-invocation pipeline gluing it all together
//!
//! Chat-platform plumbing (rendering, command parsing, persistence, the
//! success-probability oracle) lives outside this crate and is reached
//! through the traits in [`storage`] and [`engine`].

pub mod activity;
pub mod config;
pub mod content;
pub mod damage;
pub mod defense;
pub mod engine;
pub mod error;
pub mod storage;
pub mod types;

// Re-export core types for convenience
pub use activity::{average_daily_actions, tier_for_average};
pub use config::{ConfigError, WarConfig};
pub use content::{ContentError, ContentLibrary};
pub use damage::{AttackSpec, ResolvedAttack};
pub use defense::{defend_effect_percent, team_mitigation};
pub use engine::{ActionReport, CombatEngine, SuccessOracle};
pub use error::WarError;
pub use storage::{ActionFilters, ActionStore, MemoryStore, StorageError, TimeRange};
pub use types::{
    ActionKind, ActionRecord, Actor, DefendProfile, Outcome, Team, Tier, UserId,
};
