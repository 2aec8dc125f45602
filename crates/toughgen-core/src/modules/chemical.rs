//! `chemical.inp` with `#` headers and `*` block terminators.

use super::source::SourceDeck;
use super::traits::DeckGenerator;
use crate::config::{ChemistryConfig, DeckConfig};
use crate::domain::{DeckError, DeckKind, DeckResult};
use crate::fixed_width::policy::CHEMICAL_RULE;
use crate::fixed_width::{
    Align, DeckFormat, DeckWriter, NumberStyle, ScientificStyle, encode, encode_int, encode_text,
};
use std::iter;

const SPECIES_NAME_WIDTH: usize = 20;
const WATER_NAME_WIDTH: usize = 10;
const CONCENTRATION_WIDTH: usize = 15;
const CONCENTRATION: NumberStyle = NumberStyle::Scientific(ScientificStyle {
    decimals: 3,
    exponent_digits: 2,
    short_literals: false,
});
/// Total-concentration constraint (`icon = 1`) for every primary species.
const WATER_ICON: i64 = 1;

pub struct ChemicalModule;

impl DeckGenerator for ChemicalModule {
    fn deck(&self) -> DeckKind {
        DeckKind::Chemical
    }

    fn reads_source(&self) -> bool {
        false
    }

    fn render(&self, _source: &SourceDeck, config: &DeckConfig) -> DeckResult<String> {
        render_chemical_deck(&config.chemistry)
    }
}

pub fn render_chemical_deck(config: &ChemistryConfig) -> DeckResult<String> {
    if config.primary_species.is_empty() {
        return Err(DeckError::config(
            "CONFIG.CHEMISTRY_SPECIES",
            "chemistry needs at least one primary species",
        ));
    }

    let empty = || iter::empty::<String>();
    let mut writer = DeckWriter::new(DeckFormat::Chemical);
    writer.section(
        "TITLE",
        [
            config.title.as_str(),
            CHEMICAL_RULE,
            "# DEFINITION OF THE GEOCHEMICAL SYSTEM",
        ],
    )?;
    writer.section("PRIMARY", species_records(&config.primary_species)?)?;
    writer.section("AQUEOUS_KINETICS", empty())?;
    writer.section("AQUEOUS_COMPLEXES", empty())?;
    writer.section("MINERALS", empty())?;
    writer.section("GASES", species_records(&config.gases)?)?;
    writer.section("SURFACE_COMPLEXES", empty())?;
    writer.section("DECAY", empty())?;
    writer.section("EXCHANGEABLE_CATIONS", empty())?;
    writer.section("WATER_ZONES", water_zone_records(config)?)?;
    // one mineral zone, with no minerals in it
    writer.section("MINERAL_ZONES", ["1", "1"])?;
    writer.section("GAS_ZONES", empty())?;
    writer.section("PERM_PORO_ZONES", empty())?;
    writer.section("ADSORPTION_ZONES", empty())?;
    writer.section("KD_ZONES", empty())?;
    writer.section("EXCHANGE_ZONES", empty())?;
    Ok(writer.finish())
}

fn species_records(names: &[String]) -> DeckResult<Vec<String>> {
    names
        .iter()
        .map(|name| -> DeckResult<String> {
            Ok(format!(
                "{}{}",
                encode_text(name, SPECIES_NAME_WIDTH, Align::Left),
                encode_int(0, 5)?
            ))
        })
        .collect()
}

fn water_zone_records(config: &ChemistryConfig) -> DeckResult<Vec<String>> {
    let water = &config.water;
    let mut lines = vec![
        // initial water types, boundary water types
        "1   0".to_string(),
        "# Index  Speciation T(C)  P(bar)".to_string(),
        format!(
            "1          {:.1}            {}",
            water.temperature, water.pressure_bar
        ),
        "#         icon        guess         ctot".to_string(),
    ];

    for species in &config.primary_species {
        let concentration = encode(
            water.concentration(species),
            CONCENTRATION_WIDTH,
            CONCENTRATION,
        )?;
        lines.push(format!(
            "{}{}{}{}   *  0.",
            encode_text(species, WATER_NAME_WIDTH, Align::Left),
            encode_int(WATER_ICON, 9)?,
            concentration,
            concentration
        ));
    }
    Ok(lines)
}
