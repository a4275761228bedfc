//! The rolling-average activity classifier input
//!
//! Averages a player's war actions per day over a trailing window, with
//! forgiveness (the lowest-activity days are dropped) and an optional
//! shadow cap (a per-day ceiling that only applies when unsuccessful
//! actions are being counted).

use std::collections::HashMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use crate::config::ActivityConstants;
use crate::error::WarError;
use crate::storage::{ActionFilters, ActionStore};
use crate::types::{ActionRecord, Team, UserId};

/// A player's average number of war actions per day
///
/// Reads the actor's history over `[midnight(now - period), now]` and
/// appends one synthetic placeholder for the in-flight action, so the
/// average reflects it before it reaches storage. The read must happen
/// before the current action is persisted.
pub fn average_daily_actions<S: ActionStore>(
    store: &S,
    actor: UserId,
    team: Team,
    now: DateTime<Utc>,
    config: &ActivityConstants,
) -> Result<u32, WarError> {
    let mut filters = ActionFilters::new()
        .actor(actor)
        .between(window_start(now, config.averaging_period_days), now);
    if config.consider_only_successful_actions {
        filters = filters.successful(true);
    }

    let mut actions = store.get_actions(&filters)?;
    actions.push(ActionRecord::placeholder(actor, team, now));

    let mut buckets: HashMap<NaiveDate, u32> = HashMap::new();
    for action in actions
        .iter()
        .filter(|action| action.kind.counts_for_activity())
    {
        *buckets.entry(action.timestamp.date_naive()).or_insert(0) += 1;
    }

    let period = config.effective_period();

    // Forgiveness: keep only the `period` busiest days; the rest vanish
    // from the numerator while the denominator stays fixed.
    let mut day_counts: Vec<u32> = buckets.into_values().collect();
    day_counts.sort_unstable_by(|a, b| b.cmp(a));
    day_counts.truncate(period as usize);

    if !config.consider_only_successful_actions {
        if let Some(limit) = config.shadow_cap_limit_per_day.filter(|limit| *limit > 0) {
            for count in &mut day_counts {
                *count = (*count).min(limit);
            }
        }
    }

    let sum: u32 = day_counts.iter().sum();
    Ok(round_half_to_even(f64::from(sum) / f64::from(period)))
}

/// Midnight UTC at the start of the averaging window
fn window_start(now: DateTime<Utc>, period_days: u32) -> DateTime<Utc> {
    (now - Duration::days(i64::from(period_days)))
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_utc()
}

/// Round with half-to-even tie-breaking, like Python's `round`
///
/// The tie case matters at exact half-integer averages, which sit on tier
/// boundaries.
fn round_half_to_even(value: f64) -> u32 {
    let floor = value.floor();
    if value - floor == 0.5 {
        let floor = floor as u32;
        if floor % 2 == 0 {
            floor
        } else {
            floor + 1
        }
    } else {
        value.round() as u32
    }
}
