//! Defensive aggregation across a team's recent successful defends
//!
//! Reads are unsynchronized snapshots of the store: a Defend committed
//! after a concurrent Attack's mitigation read is not observed by that
//! Attack. Last-read-wins is an accepted race for a game-flavor feature.

use chrono::{DateTime, Duration, Utc};

use crate::config::DefenceConstants;
use crate::error::WarError;
use crate::storage::{ActionFilters, ActionStore};
use crate::types::{ActionKind, Team};

/// Summed mitigation fraction of `defending_team` at `at`
///
/// Counts each defender with a successful Defend inside the trailing
/// window once, maps their defend level to the configured multiplier, and
/// caps the sum at `maximum_team_defence`. Callers apply `1 - mitigation`
/// to base damage.
pub fn team_mitigation<S: ActionStore>(
    store: &S,
    defending_team: Team,
    at: DateTime<Utc>,
    config: &DefenceConstants,
) -> Result<f64, WarError> {
    let filters = ActionFilters::new()
        .team(defending_team)
        .kind(ActionKind::Defend)
        .successful(true)
        .between(
            at - Duration::minutes(config.defend_duration_minutes),
            // Tolerance so a defend stamped at the query instant counts.
            at + Duration::seconds(1),
        );
    let defends = store.get_actions(&filters)?;

    let defender_ids: Vec<_> = defends.iter().map(|action| action.user_id).collect();
    let profiles = store.get_profiles_by_id(&defender_ids)?;

    let mut total = 0.0;
    for profile in profiles.values() {
        total += config.multiplier_for_level(profile.defend_level)?;
    }

    Ok(total.min(config.maximum_team_defence))
}

/// The reported effect of a single Defend, as a percentage
///
/// Purely a lookup; it is not derived from other defenders' actions.
pub fn defend_effect_percent(defend_level: u32, config: &DefenceConstants) -> Result<f64, WarError> {
    Ok(100.0 * config.multiplier_for_level(defend_level)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::{ActionRecord, DefendProfile, UserId};
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 3, 20, 18, 0, 0).unwrap()
    }

    fn defend(user: u64, team: Team, minutes_ago: i64, success: bool) -> ActionRecord {
        ActionRecord {
            user_id: UserId(user),
            team,
            kind: ActionKind::Defend,
            timestamp: at() - Duration::minutes(minutes_ago),
            was_successful: success,
            was_critical: None,
            raw_damage: None,
            items_dropped: String::new(),
        }
    }

    fn store_with_defenders(levels: &[u32]) -> MemoryStore {
        let store = MemoryStore::new();
        for (i, &level) in levels.iter().enumerate() {
            let user = i as u64 + 1;
            store
                .add_action(defend(user, Team::Vikings, 5, true))
                .unwrap();
            store.set_profile(DefendProfile {
                user_id: UserId(user),
                defend_level: level,
            });
        }
        store
    }

    #[test]
    fn test_single_defender() {
        let store = store_with_defenders(&[1]);
        let config = DefenceConstants::default();
        let mitigation = team_mitigation(&store, Team::Vikings, at(), &config).unwrap();
        assert!((mitigation - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_sum_is_capped() {
        let store = store_with_defenders(&[1; 10]);
        let config = DefenceConstants {
            maximum_team_defence: 0.4,
            ..DefenceConstants::default()
        };
        // 10 x 0.05 = 0.5, capped at 0.4.
        let mitigation = team_mitigation(&store, Team::Vikings, at(), &config).unwrap();
        assert!((mitigation - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn test_window_and_filters() {
        let config = DefenceConstants::default();
        let store = MemoryStore::new();
        for user in 1..=4u64 {
            store.set_profile(DefendProfile {
                user_id: UserId(user),
                defend_level: 1,
            });
        }

        // Outside the 30-minute window.
        store.add_action(defend(1, Team::Vikings, 45, true)).unwrap();
        // Unsuccessful.
        store.add_action(defend(2, Team::Vikings, 5, false)).unwrap();
        // Wrong team.
        store.add_action(defend(3, Team::Knights, 5, true)).unwrap();
        // Counts.
        store.add_action(defend(4, Team::Vikings, 5, true)).unwrap();

        let mitigation = team_mitigation(&store, Team::Vikings, at(), &config).unwrap();
        assert!((mitigation - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn test_repeat_defender_counts_once() {
        let store = MemoryStore::new();
        store.set_profile(DefendProfile {
            user_id: UserId(1),
            defend_level: 2,
        });
        store.add_action(defend(1, Team::Vikings, 3, true)).unwrap();
        store.add_action(defend(1, Team::Vikings, 9, true)).unwrap();

        let config = DefenceConstants::default();
        let mitigation = team_mitigation(&store, Team::Vikings, at(), &config).unwrap();
        assert!((mitigation - 0.07).abs() < f64::EPSILON);
    }

    #[test]
    fn test_no_defenders() {
        let store = MemoryStore::new();
        let config = DefenceConstants::default();
        let mitigation = team_mitigation(&store, Team::Vikings, at(), &config).unwrap();
        assert_eq!(mitigation, 0.0);
    }

    #[test]
    fn test_unknown_level_is_a_configuration_fault() {
        let store = store_with_defenders(&[9]);
        let config = DefenceConstants::default();
        let result = team_mitigation(&store, Team::Vikings, at(), &config);
        assert!(matches!(result, Err(WarError::Config(_))));
    }

    #[test]
    fn test_effect_percent_is_a_lookup() {
        let config = DefenceConstants::default();
        assert!((defend_effect_percent(3, &config).unwrap() - 9.0).abs() < f64::EPSILON);
    }
}
