//! Integration test: a multi-day war between both teams
//!
//! Drives the full pipeline end to end: content loading, activity
//! averaging across days, tier progression, defensive aggregation and
//! record persistence.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use war_core::engine::SuccessOracle;
use war_core::{
    ActionKind, Actor, CombatEngine, ContentLibrary, DefendProfile, MemoryStore, Team, UserId,
    WarConfig,
};

const CONTENT: &str = r#"
[[team]]
name = "knights"

[[team.tier]]
level = 1

[[team.tier.normal_attack]]
text = "tier one charge"

[[team.tier.normal_attack]]
outcome = "missed"
text = "tier one stumble"

[[team.tier.defend]]
text = "tier one shield wall"

[[team.tier]]
level = 2

[[team.tier.normal_attack]]
text = "tier two charge"

[[team.tier.normal_attack]]
outcome = "missed"
text = "tier two stumble"

[[team.tier.defend]]
text = "tier two shield wall"

[[team]]
name = "vikings"

[[team.tier]]
level = 1

[[team.tier.defend]]
text = "tier one spear line"

[[bribe]]
text = "$NAME waves a pouch at $BOTNAME."
"#;

struct Always(bool);

impl SuccessOracle for Always {
    fn is_action_successful(&self, _: &Actor, _: DateTime<Utc>, _: bool) -> bool {
        self.0
    }
}

fn knight() -> Actor {
    Actor {
        id: UserId(1),
        team: Team::Knights,
        name: "galahad".to_string(),
        display_name: "Sir Galahad".to_string(),
    }
}

fn viking() -> Actor {
    Actor {
        id: UserId(2),
        team: Team::Vikings,
        name: "olga".to_string(),
        display_name: "Olga Ironside".to_string(),
    }
}

#[test]
fn escalating_activity_reaches_tier_two_content() {
    let store = MemoryStore::new();
    store.set_profile(DefendProfile {
        user_id: viking().id,
        defend_level: 1,
    });

    let mut config = WarConfig::default();
    config.damage.base_chance_for_critical = 0.0;
    config.validate().unwrap();
    let content = ContentLibrary::from_documents([CONTENT]).unwrap();
    let engine = CombatEngine::new(&store, &content, &config);
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // Five busy days: six attacks per day lifts the rolling average past
    // the tier-one threshold partway through.
    let start = Utc.with_ymd_and_hms(2021, 6, 1, 10, 0, 0).unwrap();
    let mut tier_two_seen = false;
    for day in 0..5 {
        for n in 0..6 {
            let at = start + Duration::days(day) + Duration::minutes(n * 25);
            let report = engine
                .attack(&knight(), at, false, &Always(true), &mut rng)
                .unwrap();
            if report.body.contains("tier two charge") {
                tier_two_seen = true;
            }
        }
    }
    assert!(tier_two_seen, "average never escaped tier one");

    let attacks = store
        .all_actions()
        .into_iter()
        .filter(|r| r.kind == ActionKind::NormalAttack)
        .count();
    assert_eq!(attacks, 30);
}

#[test]
fn defends_mitigate_the_next_attack() {
    let store = MemoryStore::new();
    store.set_profile(DefendProfile {
        user_id: viking().id,
        defend_level: 1,
    });

    let mut config = WarConfig::default();
    config.damage.base_chance_for_critical = 0.0;
    let content = ContentLibrary::from_documents([CONTENT]).unwrap();
    let engine = CombatEngine::new(&store, &content, &config);
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    let at = Utc.with_ymd_and_hms(2021, 6, 1, 10, 0, 0).unwrap();
    engine
        .defend(&viking(), at, &Always(true), &mut rng)
        .unwrap();

    // A knight attack five minutes later sees the viking defence.
    let report = engine
        .attack(
            &knight(),
            at + Duration::minutes(5),
            false,
            &Always(true),
            &mut rng,
        )
        .unwrap();
    assert_eq!(report.record.raw_damage, Some(9.5));

    // Well past the defend window the attack lands at full strength.
    let report = engine
        .attack(
            &knight(),
            at + Duration::minutes(90),
            false,
            &Always(true),
            &mut rng,
        )
        .unwrap();
    assert_eq!(report.record.raw_damage, Some(10.0));
}

#[test]
fn bribes_do_not_advance_the_war() {
    let store = MemoryStore::new();
    let config = WarConfig::default();
    let content = ContentLibrary::from_documents([CONTENT]).unwrap();
    let engine = CombatEngine::new(&store, &content, &config);
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let at = Utc.with_ymd_and_hms(2021, 6, 1, 10, 0, 0).unwrap();
    let report = engine.bribe(&viking(), at, &mut rng).unwrap();
    assert_eq!(report.body, "olga waves a pouch at Warbot.");

    let records = store.all_actions();
    assert_eq!(records.len(), 1);
    assert!(!records[0].was_successful);
    assert_eq!(records[0].raw_damage, None);
}
