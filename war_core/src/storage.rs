//! Storage collaborator seam
//!
//! The engine never talks to a database directly; it reads and writes
//! through [`ActionStore`]. [`MemoryStore`] is the in-process
//! implementation used by tests and the demo binary.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::types::{ActionKind, ActionRecord, DefendProfile, Team, UserId};

/// Storage read/write failure in the external collaborator
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Closed timestamp interval `[start, end]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        TimeRange { start, end }
    }

    pub fn contains(&self, timestamp: DateTime<Utc>) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Server-side filters for an action query
#[derive(Debug, Clone, Copy, Default)]
pub struct ActionFilters {
    pub actor: Option<UserId>,
    pub team: Option<Team>,
    pub kind: Option<ActionKind>,
    pub success: Option<bool>,
    pub range: Option<TimeRange>,
}

impl ActionFilters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn actor(mut self, actor: UserId) -> Self {
        self.actor = Some(actor);
        self
    }

    pub fn team(mut self, team: Team) -> Self {
        self.team = Some(team);
        self
    }

    pub fn kind(mut self, kind: ActionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn successful(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    pub fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.range = Some(TimeRange::new(start, end));
        self
    }

    fn matches(&self, record: &ActionRecord) -> bool {
        self.actor.map_or(true, |a| record.user_id == a)
            && self.team.map_or(true, |t| record.team == t)
            && self.kind.map_or(true, |k| record.kind == k)
            && self.success.map_or(true, |s| record.was_successful == s)
            && self.range.map_or(true, |r| r.contains(record.timestamp))
    }
}

/// The narrow storage contract consumed by the war core
pub trait ActionStore {
    /// All persisted actions matching `filters`, ordered by timestamp
    fn get_actions(&self, filters: &ActionFilters) -> Result<Vec<ActionRecord>, StorageError>;

    /// Persist one action record
    fn add_action(&self, record: ActionRecord) -> Result<(), StorageError>;

    /// Defend profiles for the given players, keyed by id
    ///
    /// Ids with no profile are absent from the result.
    fn get_profiles_by_id(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, DefendProfile>, StorageError>;
}

/// In-memory store for tests and demos
#[derive(Debug, Default)]
pub struct MemoryStore {
    actions: Mutex<Vec<ActionRecord>>,
    profiles: Mutex<HashMap<UserId, DefendProfile>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a player's defend profile
    pub fn set_profile(&self, profile: DefendProfile) {
        self.profiles
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(profile.user_id, profile);
    }

    /// Snapshot of every persisted record, in insertion order
    pub fn all_actions(&self) -> Vec<ActionRecord> {
        self.actions.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl ActionStore for MemoryStore {
    fn get_actions(&self, filters: &ActionFilters) -> Result<Vec<ActionRecord>, StorageError> {
        let actions = self.actions.lock().unwrap_or_else(|e| e.into_inner());
        let mut matched: Vec<ActionRecord> = actions
            .iter()
            .filter(|record| filters.matches(record))
            .cloned()
            .collect();
        matched.sort_by_key(|record| record.timestamp);
        Ok(matched)
    }

    fn add_action(&self, record: ActionRecord) -> Result<(), StorageError> {
        self.actions
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(record);
        Ok(())
    }

    fn get_profiles_by_id(
        &self,
        ids: &[UserId],
    ) -> Result<HashMap<UserId, DefendProfile>, StorageError> {
        let profiles = self.profiles.lock().unwrap_or_else(|e| e.into_inner());
        Ok(ids
            .iter()
            .filter_map(|id| profiles.get(id).copied().map(|p| (*id, p)))
            .collect())
    }
}
