//! `flow.inp`: rocks, solver controls, output times and the injection source.

mod rocks;
mod sections;

pub use rocks::{ROCK_CONTINUATION, parse_rock, rock_record_lines, rocks_section};
pub use sections::{gener_lines, param_lines, times_lines};

use super::rock_scan::scan_rock_types;
use super::source::SourceDeck;
use super::traits::DeckGenerator;
use crate::config::DeckConfig;
use crate::domain::{DeckKind, DeckResult};
use crate::fixed_width::{DeckFormat, DeckWriter};
use sections::{REACT_RECORDS, SOLVR_RECORD, multi_lines, selec_lines};
use std::iter;
use tracing::debug;

pub struct FlowModule;

impl DeckGenerator for FlowModule {
    fn deck(&self) -> DeckKind {
        DeckKind::Flow
    }

    fn render(&self, source: &SourceDeck, config: &DeckConfig) -> DeckResult<String> {
        render_flow_deck(source, config)
    }
}

pub fn render_flow_deck(source: &SourceDeck, config: &DeckConfig) -> DeckResult<String> {
    let injector = source.mesh.find_nearest(config.injection.target)?;
    let source_term = config
        .injection
        .source_term(&injector.element.name, &config.schedule);
    let times = config.schedule.output_times()?;
    let rock_scan = scan_rock_types(source, &config.rocks);
    debug!(
        rock_types = rock_scan.rock_types.len(),
        missing = rock_scan.missing.len(),
        "checked ELEME rock types"
    );

    let mut writer = DeckWriter::new(DeckFormat::Flow);
    writer.line(config.title.clone());
    if let Some(rocks) = rocks_section(source.blocks.get("ROCKS"), &config.rocks)? {
        writer.section("ROCKS", rocks)?;
    }
    writer.section("MULTI", multi_lines(&config.flow)?)?;
    writer.section(
        "SELEC",
        selec_lines(
            source.blocks.get("SELEC").map(|block| block.raw_lines()),
            &config.flow,
        ),
    )?;
    writer.section("SOLVR", [SOLVR_RECORD])?;
    writer.section("START", iter::empty::<String>())?;
    writer.section("REACT", REACT_RECORDS)?;
    writer.section("PARAM", param_lines(&config.flow, config.schedule.end_seconds())?)?;
    writer.section("TIMES", times_lines(&times)?)?;
    writer.section("GENER", gener_lines(&source_term)?)?;
    writer.section("ENDCY", iter::empty::<String>())?;
    Ok(writer.finish())
}
