use crate::domain::{DeckError, DeckResult, ParserResult, RockProperties};
use crate::fixed_width::{Align, NumberStyle, ScientificStyle, encode, encode_int, encode_text};
use crate::parser::{DeckBlock, Record, Requirement};
use std::ops::Range;
use tracing::{debug, warn};

/// Relative permeability, capillary pressure and compressibility records
/// written after every reformatted rock.
pub const ROCK_CONTINUATION: [&str; 3] = [
    "  1.00E-09                           0.5",
    "    7           .457       .30        1.       .05",
    "    7           .457       .00    5.1e-5      1.e7      .999",
];

/// Number of continuation records (`NAD`) announced on each rock record.
const CONTINUATION_FLAG: i64 = 2;
const MIN_ROCK_RECORD: usize = 10;

const NAME_COLUMNS: Range<usize> = 0..5;
const NAD_COLUMNS: Range<usize> = 5..10;
const PROPERTY_COLUMNS: [Range<usize>; 7] =
    [10..20, 20..30, 30..40, 40..50, 50..60, 60..70, 70..80];

const FIXED: NumberStyle = NumberStyle::Fixed { decimals: 3 };
const PERMEABILITY: NumberStyle = NumberStyle::Scientific(ScientificStyle::ROCK_PERMEABILITY);

/// Body of the `ROCKS` section: the source block when present, otherwise the
/// configured rocks. `None` means the section is omitted.
pub fn rocks_section(
    block: Option<&DeckBlock>,
    fallback: &[RockProperties],
) -> DeckResult<Option<Vec<String>>> {
    if let Some(block) = block {
        let mut lines = Vec::new();
        // source continuation rows still owed by the last reformatted rock
        let mut pending = 0;
        for line in &block.lines {
            let record = line.record();
            let parsed = if record.len() < MIN_ROCK_RECORD {
                None
            } else {
                Some(parse_rock(&record))
            };
            match parsed {
                Some(Ok(rock)) => {
                    lines.extend(rock_record_lines(&rock)?);
                    pending = continuation_rows(&record);
                }
                _ if pending > 0 => {
                    pending -= 1;
                    debug!(
                        line = record.line_number,
                        "dropping source rock continuation row"
                    );
                }
                None => {}
                Some(Err(error)) => {
                    warn!("copying ROCKS record verbatim: {}", error.message());
                    lines.push(line.text.clone());
                }
            }
        }
        return Ok(Some(lines));
    }

    if fallback.is_empty() {
        return Ok(None);
    }
    let mut lines = Vec::with_capacity(fallback.len() * 4);
    for rock in fallback {
        lines.extend(rock_record_lines(rock)?);
    }
    Ok(Some(lines))
}

/// Rows following a rock record: one for `NAD = 1`, three for `NAD >= 2`.
fn continuation_rows(record: &Record<'_>) -> usize {
    let nad = record
        .text_field(NAD_COLUMNS, Requirement::Optional)
        .ok()
        .and_then(|raw| raw.parse::<i64>().ok())
        .unwrap_or(0);
    match nad {
        ..=0 => 0,
        1 => 1,
        _ => ROCK_CONTINUATION.len(),
    }
}

pub fn parse_rock(record: &Record<'_>) -> ParserResult<RockProperties> {
    let name = record.text_field(NAME_COLUMNS, Requirement::Optional)?;
    let mut values = [0.0_f64; 7];
    for (value, columns) in values.iter_mut().zip(PROPERTY_COLUMNS) {
        *value = rock_number(record, columns)?;
    }
    let [density, porosity, kx, ky, kz, thermal_conductivity, specific_heat] = values;

    Ok(RockProperties {
        name: name.to_string(),
        density,
        porosity,
        permeability: [kx, ky, kz],
        thermal_conductivity,
        specific_heat,
    })
}

// Trailing property columns may be cut short when the exporter trims lines.
fn rock_number(record: &Record<'_>, columns: Range<usize>) -> ParserResult<f64> {
    record.optional_f64_field(columns.clone())?.ok_or_else(|| {
        DeckError::parse(
            "INPUT.ROCK_PROPERTY",
            format!(
                "line {} columns {}-{}: missing rock property",
                record.line_number, columns.start, columns.end
            ),
        )
    })
}

pub fn rock_record_lines(rock: &RockProperties) -> DeckResult<Vec<String>> {
    let mut record = String::with_capacity(80);
    record.push_str(&encode_text(&rock.name, 5, Align::Left));
    record.push_str(&encode_int(CONTINUATION_FLAG, 5)?);
    record.push_str(&encode(rock.density, 10, FIXED)?);
    record.push_str(&encode(rock.porosity, 10, FIXED)?);
    for permeability in rock.permeability {
        record.push_str(&encode(permeability, 10, PERMEABILITY)?);
    }
    record.push_str(&encode(rock.thermal_conductivity, 10, FIXED)?);
    record.push_str(&encode(rock.specific_heat, 10, FIXED)?);

    let mut lines = vec![record];
    lines.extend(ROCK_CONTINUATION.iter().map(|line| line.to_string()));
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::{ROCK_CONTINUATION, rock_record_lines, rocks_section};
    use crate::domain::RockProperties;
    use crate::parser::segment_source_deck;

    #[test]
    fn rock_record_layout_is_column_exact() {
        let lines = rock_record_lines(&RockProperties::default()).expect("rock record");
        assert_eq!(
            lines[0],
            "Backg    2  2600.000     0.100  1.00E-13  1.00E-13  1.00E-14     2.510   920.000"
        );
        assert_eq!(lines[0].len(), 80);
        assert_eq!(&lines[1..], &ROCK_CONTINUATION);
    }

    #[test]
    fn source_rows_are_reformatted_or_passed_through() {
        let source = "\
ROCKS----1----*----2
    7           .457       .30        1.       .05
SAND1    2    2650.0      0.25   1.0e-12   1.0e-12   1.0d-13      2.51     920.0
    7           .457       .30        1.       .05
short
CAPRK    0    2700.0      0.05   1.0e-18   1.0e-18   1.0e-19      2.00     850.0
    6           .300       .20        1.       .05

ELEME
";
        let blocks = segment_source_deck(source);
        let lines = rocks_section(blocks.get("ROCKS"), &[])
            .expect("rocks")
            .expect("section present");

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "    7           .457       .30        1.       .05");
        assert_eq!(
            lines[1],
            "SAND1    2  2650.000     0.250  1.00E-12  1.00E-12  1.00E-13     2.510   920.000"
        );
        assert_eq!(&lines[2..5], &ROCK_CONTINUATION);
        assert!(lines[5].starts_with("CAPRK    2  2700.000"));
        assert_eq!(lines[9], "    6           .300       .20        1.       .05");
    }

    #[test]
    fn source_continuation_rows_are_replaced_not_repeated() {
        let source = "\
ROCKS
SAND1    1    2650.0      0.25   1.0e-12   1.0e-12   1.0e-13      2.51     920.0
  1.00E-09                           0.5
SHALE    2    2700.0      0.05   1.0e-18   1.0e-18   1.0e-19      2.00     850.0
  1.00E-09                           0.5
    7           .457       .30        1.       .05
    7           .457       .00    5.1e-5      1.e7      .999
";
        let blocks = segment_source_deck(source);
        let lines = rocks_section(blocks.get("ROCKS"), &[])
            .expect("rocks")
            .expect("section present");

        assert_eq!(lines.len(), 8);
        assert!(lines[0].starts_with("SAND1"));
        assert!(lines[4].starts_with("SHALE"));
        assert_eq!(&lines[5..], &ROCK_CONTINUATION);
    }

    #[test]
    fn configured_rocks_fill_in_for_a_missing_block() {
        assert_eq!(rocks_section(None, &[]).expect("rocks"), None);

        let lines = rocks_section(None, &[RockProperties::default()])
            .expect("rocks")
            .expect("section present");
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Backg    2"));
    }
}
