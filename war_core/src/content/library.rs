//! The in-memory content index

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;
use rand::Rng;

use super::loader::{ContentDocument, StoryNode};
use super::ContentError;
use crate::types::{ActionKind, Outcome, Team, Tier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct ContentKey {
    team: Team,
    tier: Tier,
    kind: ActionKind,
    outcome: Outcome,
}

/// Indexed narrative library, built once at startup and read-only afterwards
///
/// Safe to share by reference across concurrent tasks; lookups never mutate
/// the index.
#[derive(Debug, Default)]
pub struct ContentLibrary {
    entries: HashMap<ContentKey, Vec<String>>,
    bribes: Vec<String>,
}

impl ContentLibrary {
    /// Load every `*.toml` document under `dir`, recursively
    pub fn load_dir(dir: &Path) -> Result<Self, ContentError> {
        let mut paths = Vec::new();
        collect_toml_paths(dir, &mut paths)?;
        paths.sort();

        let mut library = ContentLibrary::default();
        for path in &paths {
            let raw = fs::read_to_string(path)?;
            library.add_document(&raw)?;
        }
        Ok(library)
    }

    /// Build a library from already-read document strings
    pub fn from_documents<'a, I>(documents: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut library = ContentLibrary::default();
        for raw in documents {
            library.add_document(raw)?;
        }
        Ok(library)
    }

    fn add_document(&mut self, raw: &str) -> Result<(), ContentError> {
        let document: ContentDocument = toml::from_str(raw)?;

        for team_node in &document.team {
            for tier_node in &team_node.tier {
                let tier = tier_node.tier()?;
                self.add_leaves(
                    team_node.name,
                    tier,
                    ActionKind::NormalAttack,
                    &tier_node.normal_attack,
                )?;
                self.add_leaves(
                    team_node.name,
                    tier,
                    ActionKind::HeavyAttack,
                    &tier_node.heavy_attack,
                )?;
                self.add_leaves(team_node.name, tier, ActionKind::Defend, &tier_node.defend)?;
            }
        }

        for node in &document.bribe {
            if node.outcome != Outcome::Regular {
                return Err(ContentError::InvalidDocument(
                    "bribe entries may not carry an outcome".to_string(),
                ));
            }
            self.bribes.push(node.story()?);
        }

        Ok(())
    }

    fn add_leaves(
        &mut self,
        team: Team,
        tier: Tier,
        kind: ActionKind,
        nodes: &[StoryNode],
    ) -> Result<(), ContentError> {
        for node in nodes {
            if kind == ActionKind::Defend && node.outcome == Outcome::Critical {
                return Err(ContentError::InvalidDocument(format!(
                    "defend entry for {team}s tier {tier} may not be critical"
                )));
            }

            let key = ContentKey {
                team,
                tier,
                kind,
                outcome: node.outcome,
            };
            self.entries.entry(key).or_default().push(node.story()?);
        }
        Ok(())
    }

    /// A uniformly random narrative matching the exact tuple
    ///
    /// An empty match set is a content-authoring defect and surfaces as
    /// [`ContentError::NoMatchingContent`].
    pub fn get_random(
        &self,
        team: Team,
        tier: Tier,
        kind: ActionKind,
        outcome: Outcome,
        rng: &mut impl Rng,
    ) -> Result<&str, ContentError> {
        let key = ContentKey {
            team,
            tier,
            kind,
            outcome,
        };
        self.entries
            .get(&key)
            .and_then(|pool| pool.choose(rng))
            .map(String::as_str)
            .ok_or(ContentError::NoMatchingContent {
                team,
                tier: tier.level(),
                kind,
                outcome,
            })
    }

    /// A uniformly random bribe narrative from the global pool
    pub fn random_bribe(&self, rng: &mut impl Rng) -> Result<&str, ContentError> {
        self.bribes
            .choose(rng)
            .map(String::as_str)
            .ok_or(ContentError::EmptyBribePool)
    }

    /// Number of indexed non-bribe narratives
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.bribes.is_empty()
    }
}

fn collect_toml_paths(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), ContentError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_toml_paths(&path, paths)?;
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            paths.push(path);
        }
    }
    Ok(())
}
