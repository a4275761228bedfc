//! Per-invocation combat orchestration
//!
//! Each command runs a fresh pipeline: classify the actor's activity,
//! roll the outcome, select a narrative, resolve damage, persist exactly
//! one record. The activity read happens strictly before the record write,
//! so the in-flight action is represented by the averager's placeholder
//! rather than read back from storage.

mod report;

pub use report::{substitute_placeholders, ActionReport};

use chrono::{DateTime, Utc};
use rand::Rng;
use tracing::debug;

use crate::activity::{average_daily_actions, tier_for_average};
use crate::config::{ConfigError, WarConfig};
use crate::content::ContentLibrary;
use crate::damage::AttackSpec;
use crate::defense::{defend_effect_percent, team_mitigation};
use crate::error::WarError;
use crate::storage::ActionStore;
use crate::types::{ActionKind, ActionRecord, Actor, Outcome};

/// The probability oracle deciding raw action success
///
/// Its formula lives outside this crate; the engine only consumes the
/// verdict.
pub trait SuccessOracle {
    fn is_action_successful(&self, actor: &Actor, timestamp: DateTime<Utc>, heavy: bool) -> bool;
}

/// Combat-resolution engine
///
/// Holds only shared immutable state; every invocation is an independent
/// run and the engine itself is safe to share across tasks.
pub struct CombatEngine<'a, S> {
    store: &'a S,
    content: &'a ContentLibrary,
    config: &'a WarConfig,
}

impl<'a, S: ActionStore> CombatEngine<'a, S> {
    pub fn new(store: &'a S, content: &'a ContentLibrary, config: &'a WarConfig) -> Self {
        CombatEngine {
            store,
            content,
            config,
        }
    }

    /// Attack the opposing team
    pub fn attack(
        &self,
        actor: &Actor,
        now: DateTime<Utc>,
        heavy: bool,
        oracle: &dyn SuccessOracle,
        rng: &mut impl Rng,
    ) -> Result<ActionReport, WarError> {
        let average =
            average_daily_actions(self.store, actor.id, actor.team, now, &self.config.activity)?;
        let tier = tier_for_average(average)?;

        let successful = oracle.is_action_successful(actor, now, heavy);
        let critical =
            successful && rng.gen::<f64>() <= self.config.damage.base_chance_for_critical;
        let outcome = match (successful, critical) {
            (false, _) => Outcome::Missed,
            (true, true) => Outcome::Critical,
            (true, false) => Outcome::Regular,
        };
        let kind = if heavy {
            ActionKind::HeavyAttack
        } else {
            ActionKind::NormalAttack
        };

        let story = self
            .content
            .get_random(actor.team, tier, kind, outcome, rng)?
            .to_string();

        let resolved = if successful {
            let mitigation =
                team_mitigation(self.store, !actor.team, now, &self.config.defence)?;
            Some(AttackSpec::new(outcome, heavy).resolve(mitigation, &self.config.damage))
        } else {
            None
        };

        debug!(
            actor = %actor.id,
            team = ?actor.team,
            average,
            tier = %tier,
            heavy,
            successful,
            critical,
            damage = resolved.map(|r| r.damage()),
            "attack resolved"
        );

        let record = ActionRecord {
            user_id: actor.id,
            team: actor.team,
            kind,
            timestamp: now,
            was_successful: successful,
            was_critical: Some(critical),
            raw_damage: resolved.map(|r| r.damage()),
            items_dropped: String::new(),
        };
        self.store.add_action(record.clone())?;

        Ok(report::attack_report(
            record,
            &story,
            heavy,
            outcome,
            resolved.map(|r| r.damage()).unwrap_or(0.0),
            &self.config.presentation,
        ))
    }

    /// Defend your own team
    pub fn defend(
        &self,
        actor: &Actor,
        now: DateTime<Utc>,
        oracle: &dyn SuccessOracle,
        rng: &mut impl Rng,
    ) -> Result<ActionReport, WarError> {
        let average =
            average_daily_actions(self.store, actor.id, actor.team, now, &self.config.activity)?;
        let tier = tier_for_average(average)?;

        let successful = oracle.is_action_successful(actor, now, false);
        let outcome = if successful {
            Outcome::Regular
        } else {
            Outcome::Missed
        };

        let story = self
            .content
            .get_random(actor.team, tier, ActionKind::Defend, outcome, rng)?
            .to_string();

        let profiles = self.store.get_profiles_by_id(&[actor.id])?;
        let profile = profiles.get(&actor.id).ok_or_else(|| {
            ConfigError::ValidationError(format!("no defend profile for user {}", actor.id))
        })?;
        let effect_percent =
            defend_effect_percent(profile.defend_level, &self.config.defence)?;

        debug!(
            actor = %actor.id,
            team = ?actor.team,
            average,
            tier = %tier,
            successful,
            effect_percent,
            "defend resolved"
        );

        let record = ActionRecord {
            user_id: actor.id,
            team: actor.team,
            kind: ActionKind::Defend,
            timestamp: now,
            was_successful: successful,
            was_critical: None,
            raw_damage: None,
            items_dropped: String::new(),
        };
        self.store.add_action(record.clone())?;

        Ok(report::defend_report(
            record,
            &story,
            outcome,
            effect_percent,
            &self.config.presentation,
        ))
    }

    /// Bribe the bot
    ///
    /// A degenerate path: no success roll, no tier lookup, no damage. The
    /// bribe always fails the war objective but is still recorded.
    pub fn bribe(
        &self,
        actor: &Actor,
        now: DateTime<Utc>,
        rng: &mut impl Rng,
    ) -> Result<ActionReport, WarError> {
        let story = self.content.random_bribe(rng)?.to_string();

        debug!(actor = %actor.id, team = ?actor.team, "bribe attempted");

        let record = ActionRecord {
            user_id: actor.id,
            team: actor.team,
            kind: ActionKind::Bribe,
            timestamp: now,
            was_successful: false,
            was_critical: None,
            raw_damage: None,
            items_dropped: String::new(),
        };
        self.store.add_action(record.clone())?;

        Ok(report::bribe_report(
            record,
            &story,
            actor,
            &self.config.presentation,
        ))
    }
}
