//! Example Skirmish - a scripted run of the war engine
//!
//! Two players, one per team, trade attacks and defends against an
//! in-memory store with a seeded RNG, so every run prints the same battle.

use std::cell::RefCell;

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;
use war_core::engine::SuccessOracle;
use war_core::{
    Actor, CombatEngine, ContentLibrary, DefendProfile, MemoryStore, Team, UserId, WarConfig,
    WarError,
};

const CONTENT: &str = r#"
[[team]]
name = "knights"

[[team.tier]]
level = 1

[[team.tier.normal_attack]]
text = "You charge across the field, sword raised high."

[[team.tier.normal_attack]]
outcome = "critical"
text = "Your blade finds the gap in their shield wall!"

[[team.tier.normal_attack]]
outcome = "missed"
text = "Your horse stumbles and the charge falters."

[[team.tier.heavy_attack]]
text = "The trebuchet groans and hurls a boulder over the palisade."

[[team.tier.heavy_attack]]
outcome = "critical"
text = "The boulder crashes straight through the longhouse roof!"

[[team.tier.heavy_attack]]
outcome = "missed"
text = "The counterweight jams; the boulder rolls off harmlessly."

[[team.tier.defend]]
text = "You lock shields and brace for the raid."

[[team.tier.defend]]
outcome = "missed"
text = "Your shield strap snaps at the worst moment."

[[team]]
name = "vikings"

[[team.tier]]
level = 1

[[team.tier.normal_attack]]
text = "Your longship slides out of the fog toward the keep."

[[team.tier.normal_attack]]
outcome = "critical"
text = "Your axe splits the castle gate in a single blow!"

[[team.tier.normal_attack]]
outcome = "missed"
text = "The tide turns and the landing goes wide."

[[team.tier.heavy_attack]]
text = "A full raiding party storms the outer wall."

[[team.tier.heavy_attack]]
outcome = "critical"
text = "The wall crumbles under the weight of the assault!"

[[team.tier.heavy_attack]]
outcome = "missed"
text = "The ladders are too short; the raid breaks off."

[[team.tier.defend]]
text = "You drag the longships ashore and form a spear line."

[[team.tier.defend]]
outcome = "missed"
text = "The fog lifts and exposes your position."

[[bribe]]
text = "$DISPLAY_NAME slides a pouch of silver toward $BOTNAME. It is counted, noted, and confiscated."
"#;

/// Coin-flip oracle with its own seeded RNG
struct CoinFlip {
    chance: f64,
    rng: RefCell<ChaCha8Rng>,
}

impl CoinFlip {
    fn new(chance: f64, seed: u64) -> Self {
        CoinFlip {
            chance,
            rng: RefCell::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }
}

impl SuccessOracle for CoinFlip {
    fn is_action_successful(&self, _: &Actor, _: DateTime<Utc>, heavy: bool) -> bool {
        // Heavy attacks are harder to land.
        let chance = if heavy { self.chance * 0.6 } else { self.chance };
        self.rng.borrow_mut().gen::<f64>() < chance
    }
}

fn main() -> Result<(), WarError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = WarConfig::default();
    config.validate()?;
    let content = ContentLibrary::from_documents([CONTENT])?;
    info!(narratives = content.len(), "content library loaded");

    let store = MemoryStore::new();
    let knight = Actor {
        id: UserId(1),
        team: Team::Knights,
        name: "galahad".to_string(),
        display_name: "Sir Galahad".to_string(),
    };
    let viking = Actor {
        id: UserId(2),
        team: Team::Vikings,
        name: "olga".to_string(),
        display_name: "Olga Ironside".to_string(),
    };
    store.set_profile(DefendProfile {
        user_id: knight.id,
        defend_level: 2,
    });
    store.set_profile(DefendProfile {
        user_id: viking.id,
        defend_level: 3,
    });

    let engine = CombatEngine::new(&store, &content, &config);
    let oracle = CoinFlip::new(0.75, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    let mut now = Utc.with_ymd_and_hms(2021, 3, 20, 9, 0, 0).unwrap();
    let script: [(&Actor, &str); 8] = [
        (&viking, "defend"),
        (&knight, "attack"),
        (&viking, "attack"),
        (&knight, "defend"),
        (&viking, "heavy"),
        (&knight, "heavy"),
        (&viking, "bribe"),
        (&knight, "attack"),
    ];

    for (actor, action) in script {
        let report = match action {
            "attack" => engine.attack(actor, now, false, &oracle, &mut rng)?,
            "heavy" => engine.attack(actor, now, true, &oracle, &mut rng)?,
            "defend" => engine.defend(actor, now, &oracle, &mut rng)?,
            _ => engine.bribe(actor, now, &mut rng)?,
        };

        println!("== {} (#{:06x})", report.title, report.colour);
        println!("{}\n", report.body);

        now += Duration::minutes(10);
    }

    let records = store.all_actions();
    info!(records = records.len(), "skirmish complete");
    Ok(())
}
