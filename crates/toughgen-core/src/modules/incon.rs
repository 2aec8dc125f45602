use super::source::SourceDeck;
use super::traits::DeckGenerator;
use crate::config::{DeckConfig, InconVariant};
use crate::domain::{DeckKind, DeckResult, InitialState};
use crate::fixed_width::{
    Align, DeckFormat, DeckWriter, NumberStyle, ScientificStyle, encode, encode_int, encode_text,
    scientific,
};
use crate::numerics::{HydrostaticField, compute_initial_state};
use tracing::debug;

const INCON_FIELD_WIDTH: usize = 20;

pub struct InconModule;

impl DeckGenerator for InconModule {
    fn deck(&self) -> DeckKind {
        DeckKind::Incon
    }

    fn render(&self, source: &SourceDeck, config: &DeckConfig) -> DeckResult<String> {
        let field = compute_initial_state(source.mesh.elements(), &config.hydrostatic)?;
        debug!(
            elements = field.len(),
            reference_z = field.reference_z(),
            "computed hydrostatic field"
        );
        render_incon_deck(&field, config.incon.variant)
    }
}

pub fn render_incon_deck(field: &HydrostaticField, variant: InconVariant) -> DeckResult<String> {
    let (format, body) = match variant {
        InconVariant::Fixed => (DeckFormat::InconFixed, fixed_records(field)?),
        InconVariant::Free => (DeckFormat::InconFree, free_records(field)),
    };

    let mut writer = DeckWriter::new(format);
    writer.section("INCON", body)?;
    Ok(writer.finish())
}

fn primary_variables(state: &InitialState) -> [f64; 4] {
    [
        state.pressure,
        state.salinity,
        state.co2_fraction,
        state.temperature,
    ]
}

fn fixed_records(field: &HydrostaticField) -> DeckResult<Vec<String>> {
    let style = NumberStyle::Scientific(ScientificStyle::INCON_FIELD);
    let mut lines = Vec::with_capacity(field.len() * 2);
    for element in field.states() {
        // NSEQ = 0: one element per record
        let mut header = encode_text(&element.name, 5, Align::Left);
        header.push_str(&encode_int(0, 5)?);
        lines.push(header);

        let mut values = String::with_capacity(4 * INCON_FIELD_WIDTH);
        for value in primary_variables(&element.state) {
            values.push_str(&encode(value, INCON_FIELD_WIDTH, style)?);
        }
        lines.push(values);
    }
    Ok(lines)
}

fn free_records(field: &HydrostaticField) -> Vec<String> {
    let style = ScientificStyle::INCON_FREE;
    let mut lines = Vec::with_capacity(field.len() * 2);
    for element in field.states() {
        lines.push(encode_text(&element.name, 5, Align::Left));
        let values: Vec<String> = primary_variables(&element.state)
            .iter()
            .map(|&value| scientific(value, style.decimals, style.exponent_digits))
            .collect();
        lines.push(format!(" {}", values.join("  ")));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::render_incon_deck;
    use crate::config::InconVariant;
    use crate::domain::{Element, Point3};
    use crate::fixed_width::ruler;
    use crate::numerics::{HydrostaticConfig, compute_initial_state};

    fn field() -> crate::numerics::HydrostaticField {
        let elements: Vec<Element> = [("A1  1", 0.0), ("A1  2", 50.0), ("A1  3", 100.0)]
            .iter()
            .map(|(name, z)| Element {
                name: name.to_string(),
                rock_type: "SAND1".to_string(),
                center: Point3::new(0.0, 0.0, *z),
            })
            .collect();
        compute_initial_state(&elements, &HydrostaticConfig::default()).expect("field")
    }

    #[test]
    fn fixed_variant_has_ruler_and_twenty_column_fields() {
        let deck = render_incon_deck(&field(), InconVariant::Fixed).expect("incon");
        let lines: Vec<&str> = deck.lines().collect();

        assert_eq!(lines[0], ruler("INCON"));
        assert_eq!(lines[1], "A1  1    0");
        assert_eq!(
            lines[2],
            "1.08230000000000E+061.00000000000000E-010.00000000000000E+001.80000000000000E+01"
        );
        assert_eq!(lines[2].len(), 80);
        assert_eq!(lines[5], "A1  3    0");
        assert_eq!(&lines[6][..20], "1.01300000000000E+05");
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[7], "");
        assert!(deck.ends_with("\n\n"));
    }

    #[test]
    fn free_variant_has_no_header() {
        let deck = render_incon_deck(&field(), InconVariant::Free).expect("incon");
        let lines: Vec<&str> = deck.lines().collect();

        assert_eq!(lines[0], "A1  1");
        assert_eq!(
            lines[1],
            " 1.08230E+06  1.00000E-01  0.00000E+00  1.80000E+01"
        );
        assert!(!deck.contains("INCON"));
        assert!(deck.ends_with("\n\n"));
    }
}
