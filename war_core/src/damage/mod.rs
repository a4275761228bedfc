//! Attack damage calculation
//!
//! Damage is resolved in two explicit phases: an [`AttackSpec`] describes
//! the attack before any storage-dependent input is known, and
//! [`AttackSpec::resolve`] fixes the final damage into an immutable
//! [`ResolvedAttack`]. Resolution reads nothing itself; the caller supplies
//! the mitigation snapshot, and the resolved value is never recomputed.

use crate::config::DamageConstants;
use crate::types::Outcome;

/// An attack whose damage has not been resolved yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackSpec {
    pub outcome: Outcome,
    pub is_heavy: bool,
}

impl AttackSpec {
    pub fn new(outcome: Outcome, is_heavy: bool) -> Self {
        AttackSpec { outcome, is_heavy }
    }

    /// Fix the final damage given the opposing team's mitigation fraction
    pub fn resolve(self, mitigation: f64, config: &DamageConstants) -> ResolvedAttack {
        let damage = match self.outcome {
            Outcome::Missed => 0.0,
            outcome => {
                let base = if self.is_heavy {
                    config.base_damage_for_heavy_attacks
                } else {
                    config.base_damage_for_normal_attacks
                };
                let adjusted = base * (1.0 - mitigation);
                if outcome == Outcome::Critical {
                    adjusted * config.damage_multiplier_for_critical
                } else {
                    adjusted
                }
            }
        };

        ResolvedAttack {
            outcome: self.outcome,
            is_heavy: self.is_heavy,
            damage,
        }
    }
}

/// An attack with its damage fixed for the lifetime of the action
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedAttack {
    outcome: Outcome,
    is_heavy: bool,
    damage: f64,
}

impl ResolvedAttack {
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn is_heavy(&self) -> bool {
        self.is_heavy
    }

    /// Final non-negative damage after heavy, defensive and critical modifiers
    pub fn damage(&self) -> f64 {
        self.damage
    }
}
