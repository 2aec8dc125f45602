use super::source::SourceDeck;
use super::traits::DeckGenerator;
use crate::config::DeckConfig;
use crate::domain::{DeckKind, DeckResult};
use crate::fixed_width::{DeckFormat, DeckWriter};

pub struct MeshDeckModule;

impl DeckGenerator for MeshDeckModule {
    fn deck(&self) -> DeckKind {
        DeckKind::Mesh
    }

    fn render(&self, source: &SourceDeck, _config: &DeckConfig) -> DeckResult<String> {
        render_mesh_deck(source)
    }
}

/// `ELEME` and `CONNE` records are copied verbatim; only headers and
/// terminators are regenerated.
pub fn render_mesh_deck(source: &SourceDeck) -> DeckResult<String> {
    source.mesh.require_elements()?;

    let mut writer = DeckWriter::new(DeckFormat::Mesh);
    for keyword in ["ELEME", "CONNE"] {
        if let Some(block) = source.blocks.get(keyword) {
            writer.section(keyword, block.raw_lines())?;
        }
    }
    Ok(writer.finish())
}
