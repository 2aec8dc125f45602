//! Cross-check of the rock codes used by `ELEME` against the `ROCKS` table.

use super::source::SourceDeck;
use crate::domain::RockProperties;
use crate::parser::Requirement;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RockScan {
    pub element_count: usize,
    /// Verbatim five-column codes and how many elements use each.
    pub rock_types: BTreeMap<String, usize>,
    pub defined: BTreeSet<String>,
    pub missing: Vec<String>,
}

pub fn scan_rock_types(source: &SourceDeck, fallback: &[RockProperties]) -> RockScan {
    let mut rock_types = BTreeMap::new();
    for element in source.mesh.elements() {
        *rock_types.entry(element.rock_type.clone()).or_insert(0) += 1;
    }

    let defined: BTreeSet<String> = match source.blocks.get("ROCKS") {
        Some(block) => block
            .lines
            .iter()
            .filter_map(|line| line.record().text_field(0..5, Requirement::Optional).ok())
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .collect(),
        None => fallback.iter().map(|rock| rock.name.trim().to_string()).collect(),
    };

    let missing: Vec<String> = rock_types
        .keys()
        .filter(|code| !defined.contains(code.trim()))
        .cloned()
        .collect();
    for code in &missing {
        warn!(rock = %code, "rock type used by ELEME has no ROCKS entry");
    }

    RockScan {
        element_count: source.mesh.len(),
        rock_types,
        defined,
        missing,
    }
}

pub fn render_rock_report(scan: &RockScan) -> String {
    let mut lines = vec![
        format!("Scanned {} elements.", scan.element_count),
        "Unique rock types:".to_string(),
    ];
    lines.extend(
        scan.rock_types
            .iter()
            .map(|(code, count)| format!("  -> '{code}' ({count} elements)")),
    );
    if scan.missing.is_empty() {
        lines.push("Every rock type has a ROCKS entry.".to_string());
    } else {
        let quoted: Vec<String> = scan.missing.iter().map(|code| format!("'{code}'")).collect();
        lines.push(format!("Missing from ROCKS: {}", quoted.join(", ")));
    }

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

#[cfg(test)]
mod tests {
    use super::{render_rock_report, scan_rock_types};
    use crate::config::MeshConfig;
    use crate::domain::RockProperties;
    use crate::mesh::tests::eleme_line;
    use crate::modules::SourceDeck;

    fn source(with_rocks: bool) -> SourceDeck {
        let mut text = String::new();
        if with_rocks {
            text.push_str("ROCKS\nSAND1    2    2650.0\n");
        }
        text.push_str("ELEME\n");
        text.push_str(&eleme_line("A1  1", "SAND1", 0.0, 0.0, 0.0));
        text.push('\n');
        text.push_str(&eleme_line("A1  2", "SAND1", 0.0, 0.0, 1.0));
        text.push('\n');
        text.push_str(&eleme_line("A1  3", "CAP ", 0.0, 0.0, 2.0));
        text.push('\n');
        SourceDeck::parse(&text, &MeshConfig::default()).expect("source")
    }

    #[test]
    fn counts_codes_and_flags_missing_ones() {
        let scan = scan_rock_types(&source(true), &[]);
        assert_eq!(scan.element_count, 3);
        assert_eq!(scan.rock_types.get("SAND1"), Some(&2));
        assert_eq!(scan.rock_types.get("CAP  "), Some(&1));
        assert_eq!(scan.missing, vec!["CAP  ".to_string()]);

        let report = render_rock_report(&scan);
        assert!(report.contains("  -> 'CAP  ' (1 elements)"));
        assert!(report.contains("Missing from ROCKS: 'CAP  '"));
    }

    #[test]
    fn configured_rocks_stand_in_for_the_block() {
        let fallback = [
            RockProperties {
                name: "SAND1".to_string(),
                ..RockProperties::default()
            },
            RockProperties {
                name: "CAP".to_string(),
                ..RockProperties::default()
            },
        ];
        let scan = scan_rock_types(&source(false), &fallback);
        assert!(scan.missing.is_empty());
        assert!(render_rock_report(&scan).contains("Every rock type has a ROCKS entry."));
    }
}
