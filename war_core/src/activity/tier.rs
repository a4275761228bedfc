//! Mapping an average-actions value to a discrete tier

use crate::config::ConfigError;
use crate::types::Tier;

/// Classify a player's average daily war actions into a tier
///
/// Pure function. The three brackets partition all non-negative values, so
/// the error branch is defensive: reaching it means the bracket table
/// itself is misconfigured.
pub fn tier_for_average(average_daily_actions: u32) -> Result<Tier, ConfigError> {
    let brackets = [
        (Tier::T1, average_daily_actions <= 3),
        (Tier::T2, average_daily_actions <= 7),
        (Tier::T3, average_daily_actions > 7),
    ];

    brackets
        .iter()
        .find(|(_, eligible)| *eligible)
        .map(|(tier, _)| *tier)
        .ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "no eligible tier for average {average_daily_actions}"
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_thresholds() {
        for average in 0..=3 {
            assert_eq!(tier_for_average(average).unwrap(), Tier::T1);
        }
        for average in 4..=7 {
            assert_eq!(tier_for_average(average).unwrap(), Tier::T2);
        }
        assert_eq!(tier_for_average(8).unwrap(), Tier::T3);
        assert_eq!(tier_for_average(500).unwrap(), Tier::T3);
    }

    proptest! {
        #[test]
        fn test_every_average_has_a_tier(average in any::<u32>()) {
            let tier = tier_for_average(average).unwrap();
            prop_assert!((1..=3).contains(&tier.level()));
        }

        #[test]
        fn test_tiers_are_monotonic(a in any::<u32>(), b in any::<u32>()) {
            let (low, high) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(tier_for_average(low).unwrap() <= tier_for_average(high).unwrap());
        }
    }
}
