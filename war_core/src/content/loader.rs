//! Schema types for content documents
//!
//! A document is a forest of `[[team]]` nodes holding `[[team.tier]]`
//! nodes, whose leaves are the narrative entries, plus a global `[[bribe]]`
//! pool that is team- and tier-independent:
//!
//! ```toml
//! [[team]]
//! name = "knights"
//!
//! [[team.tier]]
//! level = 1
//!
//! [[team.tier.normal_attack]]
//! text = "You swing your sword."
//!
//! [[team.tier.normal_attack]]
//! outcome = "critical"
//! text = "A devastating blow!"
//!
//! [[bribe]]
//! text = "$NAME slips $BOTNAME a pouch of coins."
//! ```

use serde::Deserialize;

use super::ContentError;
use crate::types::{Outcome, Team, Tier};

#[derive(Debug, Deserialize)]
pub(super) struct ContentDocument {
    #[serde(default)]
    pub team: Vec<TeamNode>,
    #[serde(default)]
    pub bribe: Vec<StoryNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TeamNode {
    pub name: Team,
    #[serde(default)]
    pub tier: Vec<TierNode>,
}

#[derive(Debug, Deserialize)]
pub(super) struct TierNode {
    pub level: u8,
    #[serde(default)]
    pub normal_attack: Vec<StoryNode>,
    #[serde(default)]
    pub heavy_attack: Vec<StoryNode>,
    #[serde(default)]
    pub defend: Vec<StoryNode>,
}

impl TierNode {
    pub(super) fn tier(&self) -> Result<Tier, ContentError> {
        Tier::new(self.level).ok_or_else(|| {
            ContentError::InvalidDocument(format!("tier level {} outside 1..=3", self.level))
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct StoryNode {
    #[serde(default)]
    pub outcome: Outcome,
    pub text: String,
}

impl StoryNode {
    /// Trimmed, newline-normalized narrative text
    pub(super) fn story(&self) -> Result<String, ContentError> {
        let story = self.text.replace("\r\n", "\n").trim().to_string();
        if story.is_empty() {
            return Err(ContentError::InvalidDocument(
                "narrative text is empty".to_string(),
            ));
        }
        Ok(story)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_defaults_to_regular() {
        let doc: ContentDocument = toml::from_str(
            r#"
            [[team]]
            name = "knights"

            [[team.tier]]
            level = 2

            [[team.tier.defend]]
            text = "You raise your shield."
            "#,
        )
        .unwrap();

        assert_eq!(doc.team[0].tier[0].defend[0].outcome, Outcome::Regular);
    }

    #[test]
    fn test_story_normalization() {
        let node = StoryNode {
            outcome: Outcome::Regular,
            text: "  line one\r\nline two  \n".to_string(),
        };
        assert_eq!(node.story().unwrap(), "line one\nline two");
    }

    #[test]
    fn test_empty_story_rejected() {
        let node = StoryNode {
            outcome: Outcome::Regular,
            text: "   \n ".to_string(),
        };
        assert!(node.story().is_err());
    }

    #[test]
    fn test_bad_tier_level() {
        let node = TierNode {
            level: 4,
            normal_attack: vec![],
            heavy_attack: vec![],
            defend: vec![],
        };
        assert!(node.tier().is_err());
    }
}
