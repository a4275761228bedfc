//! Tunable war constants

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Tunable constants for the whole war engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarConfig {
    #[serde(default)]
    pub activity: ActivityConstants,
    #[serde(default)]
    pub damage: DamageConstants,
    #[serde(default)]
    pub defence: DefenceConstants,
    #[serde(default)]
    pub presentation: PresentationConstants,
}

impl Default for WarConfig {
    fn default() -> Self {
        WarConfig {
            activity: ActivityConstants::default(),
            damage: DamageConstants::default(),
            defence: DefenceConstants::default(),
            presentation: PresentationConstants::default(),
        }
    }
}

impl WarConfig {
    /// Check construction-time invariants the rest of the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.activity.max_forgiven_days >= self.activity.averaging_period_days {
            return Err(ConfigError::ValidationError(format!(
                "max_forgiven_days ({}) must be less than averaging_period_days ({})",
                self.activity.max_forgiven_days, self.activity.averaging_period_days
            )));
        }

        if self.defence.defend_level_multipliers.is_empty() {
            return Err(ConfigError::ValidationError(
                "defend_level_multipliers must not be empty".to_string(),
            ));
        }

        for (i, multiplier) in self.defence.defend_level_multipliers.iter().enumerate() {
            if !(0.0..=1.0).contains(multiplier) {
                return Err(ConfigError::ValidationError(format!(
                    "defend level {} multiplier {} outside [0, 1]",
                    i + 1,
                    multiplier
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.defence.maximum_team_defence) {
            return Err(ConfigError::ValidationError(format!(
                "maximum_team_defence {} outside [0, 1]",
                self.defence.maximum_team_defence
            )));
        }

        if !(0.0..=1.0).contains(&self.damage.base_chance_for_critical) {
            return Err(ConfigError::ValidationError(format!(
                "base_chance_for_critical {} outside [0, 1]",
                self.damage.base_chance_for_critical
            )));
        }

        Ok(())
    }
}

/// Activity-averaging knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityConstants {
    /// Trailing window size for activity averaging, in days
    #[serde(default = "default_averaging_period_days")]
    pub averaging_period_days: u32,
    /// Number of lowest-activity days dropped from the average
    #[serde(default = "default_max_forgiven_days")]
    pub max_forgiven_days: u32,
    /// Optional per-day count ceiling, applied only when unsuccessful
    /// actions are counted
    #[serde(default)]
    pub shadow_cap_limit_per_day: Option<u32>,
    /// Restrict averaging to successful records (disables the shadow cap)
    #[serde(default)]
    pub consider_only_successful_actions: bool,
}

impl Default for ActivityConstants {
    fn default() -> Self {
        ActivityConstants {
            averaging_period_days: 7,
            max_forgiven_days: 2,
            shadow_cap_limit_per_day: None,
            consider_only_successful_actions: false,
        }
    }
}

impl ActivityConstants {
    /// Effective number of days averaged over, after forgiveness
    ///
    /// `validate` guarantees this is greater than zero.
    pub fn effective_period(&self) -> u32 {
        self.averaging_period_days - self.max_forgiven_days
    }
}

fn default_averaging_period_days() -> u32 {
    7
}
fn default_max_forgiven_days() -> u32 {
    2
}

/// Attack damage knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DamageConstants {
    #[serde(default = "default_normal_damage")]
    pub base_damage_for_normal_attacks: f64,
    #[serde(default = "default_heavy_damage")]
    pub base_damage_for_heavy_attacks: f64,
    /// Bernoulli probability of a critical on a successful attack
    #[serde(default = "default_critical_chance")]
    pub base_chance_for_critical: f64,
    /// Multiplier applied after mitigation on a critical
    #[serde(default = "default_critical_multiplier")]
    pub damage_multiplier_for_critical: f64,
}

impl Default for DamageConstants {
    fn default() -> Self {
        DamageConstants {
            base_damage_for_normal_attacks: 10.0,
            base_damage_for_heavy_attacks: 40.0,
            base_chance_for_critical: 0.05,
            damage_multiplier_for_critical: 1.35,
        }
    }
}

fn default_normal_damage() -> f64 {
    10.0
}
fn default_heavy_damage() -> f64 {
    40.0
}
fn default_critical_chance() -> f64 {
    0.05
}
fn default_critical_multiplier() -> f64 {
    1.35
}

/// Defensive-aggregation knobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefenceConstants {
    /// Trailing window for counting active defenses, in minutes
    #[serde(default = "default_defend_duration")]
    pub defend_duration_minutes: i64,
    /// Mitigation fraction per defend level; level N is index N-1
    #[serde(default = "default_defend_multipliers")]
    pub defend_level_multipliers: Vec<f64>,
    /// Cap on summed team mitigation
    #[serde(default = "default_maximum_team_defence")]
    pub maximum_team_defence: f64,
}

impl Default for DefenceConstants {
    fn default() -> Self {
        DefenceConstants {
            defend_duration_minutes: 30,
            defend_level_multipliers: default_defend_multipliers(),
            maximum_team_defence: 0.25,
        }
    }
}

impl DefenceConstants {
    /// Mitigation fraction for a defend level
    pub fn multiplier_for_level(&self, level: u32) -> Result<f64, ConfigError> {
        level
            .checked_sub(1)
            .and_then(|i| self.defend_level_multipliers.get(i as usize))
            .copied()
            .ok_or_else(|| {
                ConfigError::ValidationError(format!(
                    "no multiplier configured for defend level {level}"
                ))
            })
    }
}

fn default_defend_duration() -> i64 {
    30
}
fn default_defend_multipliers() -> Vec<f64> {
    vec![0.05, 0.07, 0.09, 0.12, 0.15]
}
fn default_maximum_team_defence() -> f64 {
    0.25
}

/// Presentation strings and embed colours handed to the rendering layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PresentationConstants {
    #[serde(default = "default_attack_emote")]
    pub attack_emote: String,
    #[serde(default = "default_critical_emote")]
    pub critical_emote: String,
    #[serde(default = "default_defend_emote")]
    pub defend_emote: String,
    #[serde(default = "default_normal_attack_colour")]
    pub normal_attack_colour: u32,
    #[serde(default = "default_heavy_attack_colour")]
    pub heavy_attack_colour: u32,
    #[serde(default = "default_defend_colour")]
    pub defend_colour: u32,
    #[serde(default = "default_bribe_colour")]
    pub bribe_colour: u32,
    /// Bot display name substituted into bribe narratives
    #[serde(default = "default_bot_name")]
    pub bot_name: String,
}

impl Default for PresentationConstants {
    fn default() -> Self {
        PresentationConstants {
            attack_emote: default_attack_emote(),
            critical_emote: default_critical_emote(),
            defend_emote: default_defend_emote(),
            normal_attack_colour: default_normal_attack_colour(),
            heavy_attack_colour: default_heavy_attack_colour(),
            defend_colour: default_defend_colour(),
            bribe_colour: default_bribe_colour(),
            bot_name: default_bot_name(),
        }
    }
}

fn default_attack_emote() -> String {
    "\u{2694}\u{FE0F}".to_string()
}
fn default_critical_emote() -> String {
    "\u{1F4A5}".to_string()
}
fn default_defend_emote() -> String {
    "\u{1F6E1}\u{FE0F}".to_string()
}
fn default_normal_attack_colour() -> u32 {
    0xF1_4A_44
}
fn default_heavy_attack_colour() -> u32 {
    0x8B_00_00
}
fn default_defend_colour() -> u32 {
    0x3C_B3_71
}
fn default_bribe_colour() -> u32 {
    0xDA_A5_20
}
fn default_bot_name() -> String {
    "Warbot".to_string()
}
