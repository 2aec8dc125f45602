use crate::config::FlowConfig;
use crate::domain::{DeckResult, SourceRate, SourceTerm};
use crate::fixed_width::{
    Align, NumberStyle, ScientificStyle, encode, encode_int, encode_ten, encode_text,
};

pub const SOLVR_RECORD: &str = "5  Z1  O0    8.0e-1     1.0e-7";
pub const REACT_RECORDS: [&str; 2] = [
    "00021004",
    "----*----1 MOP: 123456789*123456789*1234 ---*----5----*----6----*----7----*----8",
];

/// ELST and the blank columns between DELTMX and GF on PARAM.2.
const PARAM_ELEMENT_COLUMNS: &str = "A1 50 0.01";
/// DLT table entry required when DELTEN is negative.
const PARAM_TIME_STEP_TABLE: &str = " 1.";
const PARAM_TOLERANCES: &str = " 1.E-4     1.E00";
const PARAM_DEFAULT_STATE: &str =
    "             200.e5               .06               1.e-12               75.";

const TIMES_PER_RECORD: usize = 8;
const GENER_TABLE_PER_RECORD: usize = 4;
const GENER_TABLE_WIDTH: usize = 14;
const BLANK_FIELD: &str = "          ";

pub fn multi_lines(config: &FlowConfig) -> DeckResult<Vec<String>> {
    let mut record = String::with_capacity(20);
    for value in config.multi {
        record.push_str(&encode_int(i64::from(value), 5)?);
    }
    Ok(vec![record])
}

/// Source `SELEC` records verbatim when the deck has them.
pub fn selec_lines<'a>(
    source: Option<impl Iterator<Item = &'a str>>,
    config: &FlowConfig,
) -> Vec<String> {
    match source {
        Some(lines) => lines.map(str::to_string).collect(),
        None => config.selec.clone(),
    }
}

pub fn param_lines(config: &FlowConfig, max_time: f64) -> DeckResult<Vec<String>> {
    let mut first = String::with_capacity(40);
    first.push_str(&encode_int(i64::from(config.max_iterations), 8)?);
    first.push_str(&encode_int(i64::from(config.print_interval), 8)?);
    first.push_str(&encode_int(i64::from(config.max_time_steps), 4)?);
    first.push_str(&config.mop);

    let mut second = String::with_capacity(80);
    second.push_str(BLANK_FIELD);
    second.push_str(&encode_ten(max_time)?);
    second.push_str(&encode_ten(config.initial_time_step)?);
    second.push_str(&encode_ten(config.max_time_step)?);
    second.push_str(PARAM_ELEMENT_COLUMNS);
    second.push_str(&encode(config.gravity, 10, NumberStyle::Fixed { decimals: 2 })?);

    let mut lines = vec![first, second];
    if config.initial_time_step < 0.0 {
        lines.push(PARAM_TIME_STEP_TABLE.to_string());
    }
    lines.push(PARAM_TOLERANCES.to_string());
    lines.push(PARAM_DEFAULT_STATE.to_string());
    Ok(lines)
}

pub fn times_lines(times: &[f64]) -> DeckResult<Vec<String>> {
    let count = i64::try_from(times.len()).unwrap_or(i64::MAX);
    let mut lines = vec![encode_int(count, 5)?];
    for chunk in times.chunks(TIMES_PER_RECORD) {
        let mut record = String::with_capacity(chunk.len() * 10);
        for &time in chunk {
            record.push_str(&encode_ten(time)?);
        }
        lines.push(record);
    }
    Ok(lines)
}

/// One generation record, followed by the time/rate/enthalpy tables when the
/// rate is tabulated.
pub fn gener_lines(term: &SourceTerm) -> DeckResult<Vec<String>> {
    term.validate()?;

    let enthalpy = term.enthalpy.map(encode_ten).transpose()?;
    let (table_length, table_flag, rate, enthalpy) = match &term.rate {
        SourceRate::Constant(rate) => (
            1,
            ' ',
            encode_ten(*rate)?,
            enthalpy.unwrap_or_else(|| BLANK_FIELD.to_string()),
        ),
        SourceRate::Table(points) => (
            points.len(),
            if term.enthalpy.is_some() { 'h' } else { ' ' },
            BLANK_FIELD.to_string(),
            BLANK_FIELD.to_string(),
        ),
    };

    let mut record = String::with_capacity(60);
    record.push_str(&encode_text(&term.element, 5, Align::Left));
    record.push_str(&encode_text(&term.name, 5, Align::Left));
    // NSEQ, NADD, NADS
    record.push_str(&" ".repeat(15));
    record.push_str(&encode_int(i64::try_from(table_length).unwrap_or(i64::MAX), 5)?);
    record.push_str(&" ".repeat(5));
    record.push_str(&encode_text(&term.component, 4, Align::Left));
    record.push(table_flag);
    record.push_str(&rate);
    record.push_str(&enthalpy);

    let mut lines = vec![record.trim_end().to_string()];
    if let SourceRate::Table(points) = &term.rate {
        lines.extend(table_records(points.iter().map(|point| point.time))?);
        lines.extend(table_records(points.iter().map(|point| point.rate))?);
        if let Some(enthalpy) = term.enthalpy {
            lines.extend(table_records(points.iter().map(|_| enthalpy))?);
        }
    }
    Ok(lines)
}

fn table_records(values: impl Iterator<Item = f64>) -> DeckResult<Vec<String>> {
    let style = NumberStyle::Scientific(ScientificStyle::GENER_TABLE);
    let values: Vec<f64> = values.collect();
    values
        .chunks(GENER_TABLE_PER_RECORD)
        .map(|chunk| {
            chunk
                .iter()
                .map(|&value| encode(value, GENER_TABLE_WIDTH, style))
                .collect::<DeckResult<String>>()
        })
        .collect()
}
