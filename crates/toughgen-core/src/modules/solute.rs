use super::source::SourceDeck;
use super::traits::DeckGenerator;
use crate::config::{DeckConfig, SoluteConfig};
use crate::domain::{DeckKind, DeckResult};
use crate::fixed_width::{Align, DeckFormat, DeckWriter, encode_int, encode_text};

/// ISPIA, itersfa, ISOLVC, NGAMM, NGAS1, ichdump, kcpl, Ico2h2o, nu
const SOLVER_OPTIONS: [i64; 9] = [2, 0, 5, 1, 1, 0, 1, 0, 0];
/// IZIWDF through IZBGDF
const DEFAULT_ZONES: [i64; 9] = [1, 1, 1, 1, 0, 0, 1, 0, 0];
const SOLVER_CONSTRAINTS: &str = "   1.00e-5   0.000     6.0     1.0";
const WEIGHTING: &str =
    "       1.0       1.0   1.0d-09   1.1d-05           ! itime wupc,dffun,dffung";
const CONVERGENCE: &str =
    "    1 0.100E-03  200 0.100E-05 0.100E-07  0.00E-05  0.00E-05    !  ........ TOLDC,TOLDR";
const FILE_NAME_WIDTH: usize = 30;

pub struct SoluteModule;

impl DeckGenerator for SoluteModule {
    fn deck(&self) -> DeckKind {
        DeckKind::Solute
    }

    fn reads_source(&self) -> bool {
        false
    }

    fn render(&self, _source: &SourceDeck, config: &DeckConfig) -> DeckResult<String> {
        render_solute_deck(&config.solute)
    }
}

pub fn render_solute_deck(config: &SoluteConfig) -> DeckResult<String> {
    let files = &config.files;
    let file_lines = [
        (&files.database, "thermodynamic database"),
        (&files.iteration, "iteration information"),
        (&files.aqueous, "aqueous concentrations in tecplot form"),
        (&files.minerals, "mineral data in tecplot form"),
        (&files.gases, "gas data in tecplot form"),
        (&files.time_series, "concentrations at specific elements over time"),
    ]
    .iter()
    .map(|(name, comment)| file_line(name, comment))
    .collect::<Vec<_>>();

    let output_controls = [
        i64::from(config.time_output_interval),
        0,
        i64::from(config.components),
        i64::from(config.minerals),
        i64::from(config.aqueous_species),
        0,
        0,
        0,
        1,
        1,
    ];

    let mut writer = DeckWriter::new(DeckFormat::Solute);
    writer.section("TITLE", [config.title.as_str()])?;
    writer.section("OPTIONS", [integer_record(&SOLVER_OPTIONS)?])?;
    writer.section("CONSTRAINTS", [SOLVER_CONSTRAINTS])?;
    writer.section("FILES", file_lines)?;
    writer.section("WEIGHTING", [WEIGHTING])?;
    writer.section("CONVERGENCE", [CONVERGENCE])?;
    writer.section("OUTPUT", [integer_record(&output_controls)?])?;
    writer.section("NODES", [String::new()])?;
    writer.section("COMPONENTS", [pointer_list(config.components)])?;
    writer.section("MINERALS", [pointer_list(config.minerals)])?;
    writer.section("AQUEOUS", [pointer_list(config.aqueous_species)])?;
    writer.section("ADSORPTION", [String::new()])?;
    writer.section("EXCHANGE", [String::new()])?;
    writer.section("DEFAULT_ZONES", [integer_record(&DEFAULT_ZONES)?])?;
    writer.section("ELEMENT_ZONES", [String::new()])?;
    writer.section("END", std::iter::empty::<String>())?;
    Ok(writer.finish())
}

fn integer_record(values: &[i64]) -> DeckResult<String> {
    values.iter().map(|&value| encode_int(value, 5)).collect()
}

fn file_line(name: &str, comment: &str) -> String {
    format!(
        "{} ! {}",
        encode_text(name, FILE_NAME_WIDTH, Align::Left),
        comment
    )
}

/// `1  2  3 ... count`; an empty line when there is nothing to point at.
fn pointer_list(count: u32) -> String {
    if count == 0 {
        return String::new();
    }
    let indices: Vec<String> = (1..=count).map(|index| index.to_string()).collect();
    format!("   {}", indices.join("  "))
}

#[cfg(test)]
mod tests {
    use super::{pointer_list, render_solute_deck};
    use crate::config::SoluteConfig;

    #[test]
    fn deck_lists_every_pointer_and_ends_with_end() {
        let deck = render_solute_deck(&SoluteConfig::default()).expect("solute");
        let lines: Vec<&str> = deck.lines().collect();

        assert_eq!(lines[0], "# Title");
        assert_eq!(lines[1], "'TOUGHREACT 3D CO2 Injection'");
        assert_eq!(lines[3], "    2    0    5    1    1    0    1    0    0");
        assert_eq!(
            lines[7],
            "TherAkin10.dat                 ! thermodynamic database"
        );
        assert!(lines.contains(&"  100    0   13    4   13    0    0    0    1    1"));
        assert!(lines.contains(&"   1  2  3  4"));
        assert_eq!(lines[lines.len() - 2], "# this \"end\" record is needed now");
        assert_eq!(lines[lines.len() - 1], "end");
    }

    #[test]
    fn pointer_lists_follow_the_counts() {
        assert_eq!(pointer_list(0), "");
        assert_eq!(pointer_list(3), "   1  2  3");
        let config = SoluteConfig {
            components: 11,
            minerals: 0,
            ..SoluteConfig::default()
        };
        let deck = render_solute_deck(&config).expect("solute");
        let after = deck
            .lines()
            .skip_while(|line| !line.starts_with("#pointer of minerals"))
            .nth(1);
        assert_eq!(after, Some(""));
        assert!(deck.contains("   1  2  3  4  5  6  7  8  9  10  11\n"));
    }
}
