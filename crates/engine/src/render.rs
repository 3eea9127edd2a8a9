//! Output rendering: JSON documents and the plain-text summary.

use serde_json::Value;
use statblock_domain::DerivedStatBlock;

use crate::config::OutputFormat;
use crate::infrastructure::ports::PortError;

/// Render a stat block in the configured format.
pub fn render(block: &DerivedStatBlock, format: OutputFormat) -> Result<String, PortError> {
    match format {
        OutputFormat::Summary => Ok(summary(block)),
        OutputFormat::Json | OutputFormat::Pretty => {
            let document = block.to_document().map_err(PortError::serialization)?;
            render_document(&document, format)
        }
    }
}

/// Render a raw document. Summary output has no text form for arbitrary
/// documents, so it falls back to indented JSON.
pub fn render_document(document: &Value, format: OutputFormat) -> Result<String, PortError> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(document),
        OutputFormat::Pretty | OutputFormat::Summary => serde_json::to_string_pretty(document),
    };
    rendered.map_err(PortError::serialization)
}

/// Human-readable character summary.
pub fn summary(block: &DerivedStatBlock) -> String {
    let stats = &block.stats;
    let mut lines = vec![
        format!("Name: {}", stats.name),
        format!(
            "Level: {} (proficiency bonus {})",
            stats.level,
            signed(stats.proficiency_bonus)
        ),
        format!("Race: {}", stats.race),
        format!("Background: {}", stats.background),
        format!("Classes: {}", stats.class),
        format!("Subclasses: {}", stats.subclass),
        format!("Alignment: {}", stats.alignment),
        String::new(),
        "Attributes:".to_string(),
    ];

    lines.extend(block.attributes.iter().map(|attribute| {
        format!(
            "  {} {:>2} ({})",
            attribute.ability.abbreviation(),
            attribute.value,
            signed(attribute.modifier)
        )
    }));

    lines.push(String::new());
    lines.push("Saving Throws:".to_string());
    lines.extend(block.saving_throw_proficiencies.iter().map(|save| {
        let marker = if save.is_proficient { " *" } else { "" };
        format!("  {} {}{}", save.ability.abbreviation(), signed(save.value), marker)
    }));

    lines.push(String::new());
    lines.push("Proficient Skills:".to_string());
    let proficient: Vec<String> = block
        .skills
        .iter()
        .filter(|skill| skill.is_proficient)
        .map(|skill| {
            let marker = if skill.is_expertise { " (expertise)" } else { "" };
            format!("  {} {}{}", skill.skill.display_name(), signed(skill.value), marker)
        })
        .collect();
    if proficient.is_empty() {
        lines.push("  none".to_string());
    } else {
        lines.extend(proficient);
    }

    let hp = &block.hit_points;
    lines.push(String::new());
    lines.push(format!(
        "Hit Points: {}/{} ({} temp)",
        hp.current, hp.max, hp.temp
    ));
    lines.push(format!(
        "Armor Class: {} ({})",
        block.ac.base,
        signed(block.ac.modified)
    ));
    lines.push(format!("Speed: {} ft.", stats.speed));
    lines.push(format!("Conditions: {}", stats.conditions));

    lines.join("\n")
}

fn signed(value: i64) -> String {
    format!("{:+}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures;
    use statblock_domain::StatBlockEngine;

    fn sample_block() -> DerivedStatBlock {
        StatBlockEngine::new()
            .derive_from_value(&test_fixtures::sample_character())
            .unwrap()
    }

    #[test]
    fn compact_and_pretty_json_carry_the_same_document() {
        let block = sample_block();
        let compact = render(&block, OutputFormat::Json).unwrap();
        let pretty = render(&block, OutputFormat::Pretty).unwrap();

        assert!(!compact.contains('\n'));
        assert!(pretty.contains('\n'));
        let a: Value = serde_json::from_str(&compact).unwrap();
        let b: Value = serde_json::from_str(&pretty).unwrap();
        assert_eq!(a, b);
        assert_eq!(a["stats"][0]["character_name"], "Seraphine Vale");
    }

    #[test]
    fn summary_lists_headline_stats() {
        let text = summary(&sample_block());

        assert!(text.starts_with("Name: Seraphine Vale\n"));
        assert!(text.contains("Level: 6 (proficiency bonus +3)"));
        assert!(text.contains("Classes: Bard, Rogue"));
        assert!(text.contains("  DEX 16 (+3)"));
        assert!(text.contains("  CHA 18 (+4)"));
        assert!(text.contains("  Sleight of Hand +9 (expertise)"));
        assert!(text.contains("  Persuasion +7\n"));
        assert!(text.contains("  DEX +6 *"));
        assert!(text.contains("Hit Points: 31/39 (0 temp)"));
        assert!(text.contains("Armor Class: 14 (+1)"));
        assert!(text.contains("Speed: 30 ft."));
        assert!(text.contains("Conditions: Frightened"));
    }

    #[test]
    fn summary_without_proficiencies_says_none() {
        let block = StatBlockEngine::new()
            .derive_from_value(&serde_json::json!({"name": "Commoner"}))
            .unwrap();
        let text = summary(&block);
        assert!(text.contains("Proficient Skills:\n  none\n"));
    }

    #[test]
    fn error_documents_render_as_json_in_every_format() {
        let document = serde_json::json!({"error": "No data found."});
        assert_eq!(
            render_document(&document, OutputFormat::Json).unwrap(),
            r#"{"error":"No data found."}"#
        );
        let pretty = render_document(&document, OutputFormat::Summary).unwrap();
        assert_eq!(serde_json::from_str::<Value>(&pretty).unwrap(), document);
    }
}
