//! Presentation data handed to the rendering collaborator

use crate::config::PresentationConstants;
use crate::types::{ActionRecord, Actor, Outcome};

/// Everything the rendering layer needs to display a resolved action
#[derive(Debug, Clone, PartialEq)]
pub struct ActionReport {
    pub record: ActionRecord,
    pub title: String,
    pub body: String,
    pub colour: u32,
}

pub(super) fn attack_report(
    record: ActionRecord,
    story: &str,
    heavy: bool,
    outcome: Outcome,
    damage: f64,
    presentation: &PresentationConstants,
) -> ActionReport {
    let title = format!(
        "You have used{indicator}Attack against {team}s!",
        indicator = if heavy { " Heavy " } else { " " },
        team = !record.team,
    );

    let formatted_story = format!("*{story}*");
    let body = if outcome == Outcome::Missed {
        formatted_story
    } else {
        let mut lines = vec![format!(
            "{} `{} damage!`",
            presentation.attack_emote,
            format_damage(damage)
        )];
        if outcome == Outcome::Critical {
            lines.push(format!("{} `Critical attack!`", presentation.critical_emote));
        }
        format!("{}\n\n{}", lines.join("\n"), formatted_story)
    };

    let colour = if heavy {
        presentation.heavy_attack_colour
    } else {
        presentation.normal_attack_colour
    };

    ActionReport {
        record,
        title,
        body,
        colour,
    }
}

pub(super) fn defend_report(
    record: ActionRecord,
    story: &str,
    outcome: Outcome,
    effect_percent: f64,
    presentation: &PresentationConstants,
) -> ActionReport {
    let title = format!("You have used Defend against {}s!", !record.team);

    let formatted_story = format!("*{story}*");
    let body = if outcome == Outcome::Missed {
        formatted_story
    } else {
        format!(
            "{} `{:.0}% team damage reduction!`\n\n{}",
            presentation.defend_emote, effect_percent, formatted_story
        )
    };

    ActionReport {
        record,
        title,
        body,
        colour: presentation.defend_colour,
    }
}

pub(super) fn bribe_report(
    record: ActionRecord,
    story: &str,
    actor: &Actor,
    presentation: &PresentationConstants,
) -> ActionReport {
    let body = substitute_placeholders(
        story,
        &[
            ("NAME", actor.name.as_str()),
            ("DISPLAY_NAME", actor.display_name.as_str()),
            ("BOTNAME", presentation.bot_name.as_str()),
        ],
    );

    ActionReport {
        record,
        title: format!("You have tried to bribe {}!", presentation.bot_name),
        body,
        colour: presentation.bribe_colour,
    }
}

/// Substitute `$VAR` and `${VAR}` placeholders, leaving unmatched ones verbatim
pub fn substitute_placeholders(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut chars = template.char_indices();

    while let Some((i, c)) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let rest = &template[i + 1..];
        let (name, consumed) = if let Some(inner) = rest.strip_prefix('{') {
            match inner.find('}') {
                Some(end) => (&inner[..end], end + 2),
                None => (&rest[..0], 0),
            }
        } else {
            let end = rest
                .find(|ch: char| !ch.is_ascii_alphanumeric() && ch != '_')
                .unwrap_or(rest.len());
            (&rest[..end], end)
        };

        match vars.iter().find(|(key, _)| *key == name && !name.is_empty()) {
            Some((_, value)) => {
                result.push_str(value);
                for _ in 0..consumed {
                    chars.next();
                }
            }
            None => result.push(c),
        }
    }

    result
}

fn format_damage(damage: f64) -> String {
    if damage.fract() == 0.0 {
        format!("{}", damage as i64)
    } else {
        format!("{damage:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_damage() {
        assert_eq!(format_damage(10.0), "10");
        assert_eq!(format_damage(9.5), "9.5");
        assert_eq!(format_damage(48.6), "48.6");
        assert_eq!(format_damage(0.0), "0");
    }

    #[test]
    fn test_substitution() {
        let out = substitute_placeholders(
            "$NAME meets ${NAME} and $BOTNAME.",
            &[("NAME", "Olga"), ("BOTNAME", "Warbot")],
        );
        assert_eq!(out, "Olga meets Olga and Warbot.");
    }

    #[test]
    fn test_unmatched_placeholders_left_verbatim() {
        let out = substitute_placeholders("$UNKNOWN and ${ALSO} and $", &[("NAME", "x")]);
        assert_eq!(out, "$UNKNOWN and ${ALSO} and $");
    }

    #[test]
    fn test_adjacent_text_is_preserved() {
        let out = substitute_placeholders("${NAME}'s plan", &[("NAME", "Olga")]);
        assert_eq!(out, "Olga's plan");
    }
}
