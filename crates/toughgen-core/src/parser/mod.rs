//! Fixed-format input reading: positional records and keyword blocks.

mod blocks;
mod record;

pub use blocks::{
    DeckBlock, DeckBlocks, SOURCE_DECK_KEYWORDS, SourceLine, segment_blocks, segment_source_deck,
};
pub use record::{Record, Requirement, parse_fortran_f64};

use crate::domain::{DeckError, DeckResult};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

pub fn read_source_text(path: &Path, what: &str) -> DeckResult<String> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            DeckError::missing_input(
                "IO.SOURCE_MISSING",
                format!("{} '{}' not found", what, path.display()),
            )
        } else {
            DeckError::io(
                "IO.SOURCE_READ",
                format!("failed to read {} '{}': {}", what, path.display(), source),
            )
        }
    })
}

pub fn load_source_deck(path: &Path) -> DeckResult<DeckBlocks> {
    let source = read_source_text(path, "source deck")?;
    let blocks = segment_source_deck(&source);
    tracing::debug!(
        path = %path.display(),
        blocks = ?blocks.keywords().collect::<Vec<_>>(),
        "segmented source deck"
    );
    Ok(blocks)
}
