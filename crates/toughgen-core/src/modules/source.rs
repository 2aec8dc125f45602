use crate::config::MeshConfig;
use crate::domain::DeckResult;
use crate::mesh::MeshModel;
use crate::parser::{DeckBlocks, load_source_deck, segment_source_deck};
use std::path::Path;

/// A segmented source deck together with the mesh read from its `ELEME` block.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SourceDeck {
    pub blocks: DeckBlocks,
    pub mesh: MeshModel,
}

impl SourceDeck {
    pub fn load(path: &Path, config: &MeshConfig) -> DeckResult<Self> {
        let blocks = load_source_deck(path)?;
        Self::from_blocks(blocks, config)
    }

    pub fn parse(text: &str, config: &MeshConfig) -> DeckResult<Self> {
        Self::from_blocks(segment_source_deck(text), config)
    }

    fn from_blocks(blocks: DeckBlocks, config: &MeshConfig) -> DeckResult<Self> {
        let mesh = MeshModel::from_blocks(&blocks, config.duplicates)?;
        Ok(Self { blocks, mesh })
    }
}
